use anyhow::{Context, Result};
use std::io::Write;

use crate::flatten::types::Table;

/// Serializes a [`Table`] as tab-separated values.
///
/// The header line holds the schema's column names, then one line per row in
/// traversal order. Every line, the last included, is terminated with CRLF.
///
/// By default field values are emitted verbatim: an embedded tab or newline
/// in attribute or text content will corrupt the framing. That is the
/// original format's behavior and downstream consumers may depend on it, so
/// escaping is opt-in via [`TableWriter::with_escaping`].
pub struct TableWriter<W: Write> {
    writer: W,
    escape_fields: bool,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter {
            writer,
            escape_fields: false,
        }
    }

    /// Backslash-escape `\`, tab, CR and LF inside field values.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_fields = escape;
        self
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.write_line(table.schema.columns())?;
        for row in &table.rows {
            self.write_line(row)?;
        }
        Ok(())
    }

    fn write_line(&mut self, fields: &[String]) -> Result<()> {
        let line = if self.escape_fields {
            fields
                .iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join("\t")
        } else {
            fields.join("\t")
        };
        write!(self.writer, "{line}\r\n").context("Failed to write table line")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush table output")
    }
}

fn escape_field(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}
