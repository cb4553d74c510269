//! Schema discovery: fix the output column set before any row is produced.

use std::collections::BTreeSet;

use crate::flatten::types::{FlattenConfig, Schema, SchemaScope};
use crate::tree::Node;

/// Compute the frozen [`Schema`] for a document.
///
/// With [`SchemaScope::FirstCleanChild`] the root's own attributes are always
/// included, then the root's children are scanned in document order. A child
/// whose subtree carries an attribute named by `config.error_marker` is taken
/// for an error-response branch and skipped; the first clean child
/// contributes its entire subtree's attribute names and the scan stops.
///
/// If every child is marked, the last child examined is used anyway. That
/// degrades schema completeness instead of failing, and it means the marker
/// attribute itself becomes a column for all-error documents. A root with no
/// children yields just the fixed columns plus the root's attributes.
///
/// With [`SchemaScope::FullTree`] every attribute name in the tree becomes a
/// column and the sampling heuristic is bypassed entirely.
pub fn discover_schema(root: &Node, config: &FlattenConfig) -> Schema {
    let mut names: BTreeSet<String> = root
        .attributes
        .iter()
        .map(|(name, _)| name.clone())
        .collect();

    match config.schema_scope {
        SchemaScope::FullTree => {
            for child in &root.children {
                collect_subtree_names(child, &mut names);
            }
        }
        SchemaScope::FirstCleanChild => {
            let mut last_sample: Option<BTreeSet<String>> = None;
            for child in &root.children {
                let mut sample = BTreeSet::new();
                collect_subtree_names(child, &mut sample);
                let marked = sample.contains(&config.error_marker);
                last_sample = Some(sample);
                if !marked {
                    break;
                }
            }
            if let Some(sample) = last_sample {
                names.extend(sample);
            }
        }
    }

    Schema::from_attribute_names(names)
}

/// Every attribute name anywhere in `node`'s subtree, the node included.
fn collect_subtree_names(node: &Node, names: &mut BTreeSet<String>) {
    for (name, _) in &node.attributes {
        names.insert(name.clone());
    }
    for child in &node.children {
        collect_subtree_names(child, names);
    }
}
