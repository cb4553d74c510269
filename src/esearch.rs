//! ESearch summary extraction.
//!
//! An ESearch response carries a handful of bookkeeping elements (hit count,
//! history-server keys, the matched UID list) that downstream fetch steps
//! need. This module pulls them out of the raw response text into a
//! one-record table, without going through the tree flattener: the elements
//! of interest are fixed, flat and few.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;

/// The extracted elements, in output column order.
pub const SUMMARY_FIELDS: [&str; 7] = [
    "QueryTranslation",
    "Count",
    "RetMax",
    "RetStart",
    "QueryKey",
    "WebEnv",
    "IdList",
];

static FIELD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SUMMARY_FIELDS
        .iter()
        .map(|field| {
            // Non-greedy so the first occurrence wins; (?s) because
            // IdList spans lines.
            let pattern = format!("(?s)<{field}>(.*?)</{field}>");
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("<Id>(.*?)</Id>").unwrap());

/// Extract the summary values from an ESearch response, in
/// [`SUMMARY_FIELDS`] order. A missing element yields an empty string; the
/// `IdList` value is flattened to its comma-joined `<Id>` contents.
///
/// This is deliberately textual rather than tree-based, so it tolerates
/// responses that would not parse as a complete document.
pub fn extract_summary(xml: &str) -> Vec<String> {
    FIELD_PATTERNS
        .iter()
        .map(|(field, pattern)| {
            let captured = pattern
                .captures(xml)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
                .unwrap_or("");
            if *field == "IdList" {
                join_ids(captured)
            } else {
                captured.to_string()
            }
        })
        .collect()
}

fn join_ids(id_list: &str) -> String {
    ID_PATTERN
        .captures_iter(id_list)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Write the summary as a two-line TSV table: header, then values. Same
/// framing as the flattener output, tab-separated and CRLF-terminated.
pub fn write_summary<W: Write>(mut writer: W, values: &[String]) -> Result<()> {
    let header = SUMMARY_FIELDS.join("\t");
    let row = values.join("\t");
    write!(writer, "{header}\r\n{row}\r\n").context("Failed to write summary")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"<?xml version="1.0"?>
<eSearchResult>
  <Count>42</Count>
  <RetMax>20</RetMax>
  <RetStart>0</RetStart>
  <QueryKey>1</QueryKey>
  <WebEnv>NCID_1_abc</WebEnv>
  <IdList>
    <Id>11850928</Id>
    <Id>11482001</Id>
  </IdList>
  <QueryTranslation>"aspirin"[MeSH Terms]</QueryTranslation>
</eSearchResult>"#;

    #[test]
    fn test_extracts_all_fields_in_order() {
        let values = extract_summary(RESPONSE);

        assert_eq!(
            values,
            vec![
                "\"aspirin\"[MeSH Terms]",
                "42",
                "20",
                "0",
                "1",
                "NCID_1_abc",
                "11850928,11482001",
            ]
        );
    }

    #[test]
    fn test_missing_elements_yield_empty_strings() {
        let values = extract_summary("<eSearchResult><Count>3</Count></eSearchResult>");

        assert_eq!(values[0], "");
        assert_eq!(values[1], "3");
        assert_eq!(values[6], "");
    }

    #[test]
    fn test_empty_id_list() {
        let values = extract_summary("<eSearchResult><IdList></IdList></eSearchResult>");
        assert_eq!(values[6], "");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let values =
            extract_summary("<R><Count>1</Count><Count>2</Count></R>");
        assert_eq!(values[1], "1");
    }

    #[test]
    fn test_write_summary_framing() {
        let mut buffer = Vec::new();
        let values: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        write_summary(&mut buffer, &values).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "QueryTranslation\tCount\tRetMax\tRetStart\tQueryKey\tWebEnv\tIdList\r\n\
             0\t1\t2\t3\t4\t5\t6\r\n"
        );
    }
}
