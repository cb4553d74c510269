//! # xmltab - XML to tabular text
//!
//! A library for flattening XML documents (such as E-utilities EFetch and
//! ESummary responses) into tab-separated tables, one row per element, with
//! positional columns that preserve the hierarchy the flat format loses.
//!
//! ## Modules
//!
//! - **tree**: the parsed-document boundary, an owned element tree
//! - **flatten**: schema discovery, row production and table serialization
//! - **esearch**: ESearch response bookkeeping extraction
//!
//! ## Quick Start
//!
//! ```rust
//! use xmltab::{xml_to_table, FlattenConfig};
//!
//! # fn main() -> xmltab::Result<()> {
//! let xml = r#"<Root><A x="1">hi</A><B><C/></B></Root>"#;
//! let table = xml_to_table(xml, &FlattenConfig::default())?;
//!
//! // One row per element, root included.
//! assert_eq!(table.rows.len(), 4);
//! assert_eq!(table.cell(0, "idx"), Some("root"));
//! assert_eq!(table.cell(1, "x"), Some("1"));
//! assert_eq!(table.cell(3, "stack"), Some("0;1;0"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Writing the table out
//!
//! ```rust
//! use xmltab::{xml_to_table, FlattenConfig, TableWriter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = xml_to_table(r#"<R><Item uid="7"/></R>"#, &FlattenConfig::default())?;
//!
//! let mut out = Vec::new();
//! let mut writer = TableWriter::new(&mut out);
//! writer.write_table(&table)?;
//! writer.flush()?;
//!
//! let text = String::from_utf8(out)?;
//! assert!(text.starts_with("idx\tlvl\tstack\ttag\ttext\tuid\r\n"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod esearch;
pub mod flatten;
pub mod tree;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use flatten::{
    discover_schema, flatten, FlattenConfig, Row, Schema, SchemaScope, Table, TableWriter,
};
pub use tree::{parse_document, Node};

/// Main entry point: parse a document and flatten it into a [`Table`].
///
/// Parse failures surface here; discovery and flattening cannot fail. The
/// whole tree and the whole row set are held in memory, which bounds
/// practical input size but keeps the output fully deterministic.
pub fn xml_to_table(xml: &str, config: &FlattenConfig) -> Result<Table> {
    let root = tree::parse_document(xml)?;
    let schema = discover_schema(&root, config);
    let rows = flatten(&root, &schema, config);
    Ok(Table { schema, rows })
}

/// Read a document from `path` and flatten it.
///
/// An unreadable file reports as [`Error::Io`] with the offending path; no
/// partial result is ever returned.
pub fn file_to_table(path: impl AsRef<std::path::Path>, config: &FlattenConfig) -> Result<Table> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    xml_to_table(&xml, config)
}
