use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced at the input boundary.
///
/// Flattening itself never fails: once a document has been parsed into a
/// [`Node`](crate::tree::Node) tree, schema discovery and row production run
/// to completion. Everything that can go wrong happens while reading or
/// parsing the document, before the core is reached.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Parse(#[from] quick_xml::Error),

    /// A second element appeared after the document element closed.
    #[error("malformed XML: junk after document element: <{0}>")]
    TrailingElement(String),

    /// The document ended while an element was still open.
    #[error("malformed XML: missing end tag for <{0}>")]
    UnclosedElement(String),

    /// The document contains no element at all.
    #[error("document has no root element")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, Error>;
