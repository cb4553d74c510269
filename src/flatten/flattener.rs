//! Depth-first row production against a frozen schema.

use crate::flatten::types::{FlattenConfig, Row, Schema, ROOT_SENTINEL};
use crate::tree::Node;

/// Flatten a tree into one row per element, pre-order, siblings in document
/// order.
///
/// Position is tracked with an explicit ordinal path (the `stack` column):
/// the root carries the single-element sentinel path `[0]`, and each child
/// extends its parent's path with its 0-based ordinal. `lvl` is the depth
/// (`stack` length minus one) and `idx` is the root-child ordinal
/// (`stack[1]`), or `"root"` for the root row itself.
///
/// Attribute names absent from the schema are dropped silently; that loss is
/// inherent to freezing the schema up front. Flattening itself never fails:
/// the tree is acyclic by construction and held entirely in memory.
pub fn flatten(root: &Node, schema: &Schema, config: &FlattenConfig) -> Vec<Row> {
    let mut rows = Vec::with_capacity(root.node_count());
    let mut stack = vec![0usize];
    visit(root, &mut stack, schema, config, &mut rows);
    rows
}

fn visit(
    node: &Node,
    stack: &mut Vec<usize>,
    schema: &Schema,
    config: &FlattenConfig,
    rows: &mut Vec<Row>,
) {
    let fixed = schema.fixed();
    let mut row = schema.blank_row();

    for (name, value) in &node.attributes {
        if let Some(i) = schema.column_index(name) {
            row[i] = value.clone();
        }
    }

    if let Some(text) = node.text.as_deref() {
        if !text.is_empty() {
            row[fixed.text] = text.to_string();
        }
    }

    row[fixed.tag] = node.tag.clone();
    row[fixed.lvl] = (stack.len() - 1).to_string();
    row[fixed.idx] = match stack.get(1) {
        Some(ordinal) => ordinal.to_string(),
        None => ROOT_SENTINEL.to_string(),
    };
    row[fixed.stack] = stack
        .iter()
        .map(|ordinal| ordinal.to_string())
        .collect::<Vec<_>>()
        .join(&config.stack_separator);

    rows.push(row);

    for (ordinal, child) in node.children.iter().enumerate() {
        stack.push(ordinal);
        visit(child, stack, schema, config, rows);
        stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::discover::discover_schema;
    use crate::flatten::types::Table;

    fn spec_tree() -> Node {
        // Root -> [A(x="1", text="hi"), B -> [C(y="2")]]
        Node::new("Root")
            .with_child(Node::new("A").with_attribute("x", "1").with_text("hi"))
            .with_child(Node::new("B").with_child(Node::new("C").with_attribute("y", "2")))
    }

    fn flatten_tree(root: &Node) -> Table {
        let config = FlattenConfig::default();
        let schema = discover_schema(root, &config);
        let rows = flatten(root, &schema, &config);
        Table { schema, rows }
    }

    #[test]
    fn test_one_row_per_node() {
        let root = spec_tree();
        let table = flatten_tree(&root);

        assert_eq!(table.rows.len(), root.node_count());
        assert_eq!(table.rows.len(), 4);
    }

    #[test]
    fn test_worked_example_rows() {
        // Full-tree discovery so C's "y" attribute gets a column; the
        // default sampling scope would only see A's subtree.
        let root = spec_tree();
        let config = FlattenConfig {
            schema_scope: crate::flatten::types::SchemaScope::FullTree,
            ..FlattenConfig::default()
        };
        let schema = discover_schema(&root, &config);
        let rows = flatten(&root, &schema, &config);
        let table = Table { schema, rows };

        assert_eq!(table.cell(0, "tag"), Some("Root"));
        assert_eq!(table.cell(0, "lvl"), Some("0"));
        assert_eq!(table.cell(0, "idx"), Some("root"));
        assert_eq!(table.cell(0, "stack"), Some("0"));

        assert_eq!(table.cell(1, "tag"), Some("A"));
        assert_eq!(table.cell(1, "lvl"), Some("1"));
        assert_eq!(table.cell(1, "idx"), Some("0"));
        assert_eq!(table.cell(1, "stack"), Some("0;0"));
        assert_eq!(table.cell(1, "x"), Some("1"));
        assert_eq!(table.cell(1, "text"), Some("hi"));

        assert_eq!(table.cell(2, "tag"), Some("B"));
        assert_eq!(table.cell(2, "lvl"), Some("1"));
        assert_eq!(table.cell(2, "idx"), Some("1"));
        assert_eq!(table.cell(2, "stack"), Some("0;1"));

        assert_eq!(table.cell(3, "tag"), Some("C"));
        assert_eq!(table.cell(3, "lvl"), Some("2"));
        assert_eq!(table.cell(3, "idx"), Some("1"));
        assert_eq!(table.cell(3, "stack"), Some("0;1;0"));
        assert_eq!(table.cell(3, "y"), Some("2"));
    }

    #[test]
    fn test_sampled_scope_loses_unsampled_columns() {
        // Under the default sampling scope only A's subtree defines the
        // schema, so C's "y" never becomes a column.
        let root = spec_tree();
        let table = flatten_tree(&root);

        assert!(table.schema.column_index("x").is_some());
        assert!(table.schema.column_index("y").is_none());
        assert_eq!(table.cell(3, "y"), None);
        assert_eq!(table.cell(3, "tag"), Some("C"));
    }

    #[test]
    fn test_lvl_equals_stack_length_minus_one() {
        let root = spec_tree();
        let table = flatten_tree(&root);

        for i in 0..table.rows.len() {
            let lvl: usize = table.cell(i, "lvl").unwrap().parse().unwrap();
            let depth = table.cell(i, "stack").unwrap().split(';').count() - 1;
            assert_eq!(lvl, depth);
        }
    }

    #[test]
    fn test_child_stack_extends_parent_stack() {
        let root = spec_tree();
        let table = flatten_tree(&root);

        // C (row 3) sits at ordinal 0 under B (row 2).
        let parent = table.cell(2, "stack").unwrap();
        let child = table.cell(3, "stack").unwrap();
        assert_eq!(child, format!("{parent};0"));
    }

    #[test]
    fn test_preorder_and_sibling_order() {
        let root = Node::new("R")
            .with_child(Node::new("First").with_child(Node::new("Nested")))
            .with_child(Node::new("Second"));
        let table = flatten_tree(&root);

        let tags: Vec<&str> = (0..table.rows.len())
            .map(|i| table.cell(i, "tag").unwrap())
            .collect();
        assert_eq!(tags, vec!["R", "First", "Nested", "Second"]);
    }

    #[test]
    fn test_unknown_attributes_are_dropped() {
        // "extra" lives only in the second branch, outside the sampled one,
        // so the schema has no column for it and its value appears nowhere.
        let root = Node::new("Root")
            .with_child(Node::new("Rec").with_attribute("uid", "1"))
            .with_child(Node::new("Rec").with_attribute("extra", "lost"));
        let table = flatten_tree(&root);

        assert!(table.schema.column_index("extra").is_none());
        for row in &table.rows {
            assert!(!row.iter().any(|v| v == "lost"));
        }
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let root = spec_tree();
        let config = FlattenConfig::default();
        let schema = discover_schema(&root, &config);

        let first = flatten(&root, &schema, &config);
        let second = flatten(&root, &schema, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_stack_separator() {
        let mut config = FlattenConfig::default();
        config.stack_separator = String::from("/");

        let root = spec_tree();
        let schema = discover_schema(&root, &config);
        let rows = flatten(&root, &schema, &config);
        let table = Table { schema, rows };

        assert_eq!(table.cell(3, "stack"), Some("0/1/0"));
    }

    #[test]
    fn test_empty_text_is_not_recorded() {
        let root = Node::new("Root").with_child(Node::new("A").with_text(""));
        let table = flatten_tree(&root);

        assert_eq!(table.cell(1, "text"), Some(""));
    }
}
