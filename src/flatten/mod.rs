//! XML flattening - turn an element tree into a flat table
//!
//! This module converts a parsed [`Node`](crate::tree::Node) tree into one
//! row per element. The hierarchy the flat format gives up is re-encoded in
//! three positional columns: `stack` (the ordinal path from the root), `lvl`
//! (depth) and `idx` (root-child ordinal).
//!
//! The column set is discovered once per document, frozen, and sorted
//! lexicographically before the first row is produced; see
//! [`discover_schema`] for the sampling heuristic and its configurable
//! full-tree alternative.

pub mod discover;
pub mod flattener;
pub mod types;
pub mod writer;

pub use discover::discover_schema;
pub use flattener::flatten;
pub use types::{FlattenConfig, Row, Schema, SchemaScope, Table, FIXED_COLUMNS, ROOT_SENTINEL};
pub use writer::TableWriter;
