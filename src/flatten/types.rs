use std::collections::{BTreeSet, HashMap};

/// The five columns every table carries regardless of what the document's
/// attributes contribute.
pub const FIXED_COLUMNS: [&str; 5] = ["idx", "lvl", "stack", "tag", "text"];

/// Value of the `idx` column for the root row, which has no parent ordinal.
pub const ROOT_SENTINEL: &str = "root";

/// One output record, aligned to the owning [`Schema`]'s column order.
pub type Row = Vec<String>;

/// The frozen set of output columns for one document.
///
/// Computed once by schema discovery, before any row is produced, and never
/// reordered or extended afterwards: attribute names first seen during
/// flattening are dropped, not appended. Columns are sorted
/// lexicographically, so fixed columns interleave with discovered attribute
/// names rather than grouping by origin.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    fixed: FixedIndices,
}

/// Positions of the fixed columns, resolved once at construction so the
/// flattener's hot path never does a name lookup for them.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FixedIndices {
    pub tag: usize,
    pub stack: usize,
    pub lvl: usize,
    pub idx: usize,
    pub text: usize,
}

impl Schema {
    /// Build a schema from discovered attribute names. The fixed columns are
    /// added unconditionally; duplicates collapse via the set union.
    pub fn from_attribute_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut set: BTreeSet<String> = names.into_iter().collect();
        set.extend(FIXED_COLUMNS.iter().map(|c| c.to_string()));

        // BTreeSet iteration is already the lexicographic column order.
        let columns: Vec<String> = set.into_iter().collect();
        let index: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut fixed = FixedIndices::default();
        for (i, name) in columns.iter().enumerate() {
            match name.as_str() {
                "tag" => fixed.tag = i,
                "stack" => fixed.stack = i,
                "lvl" => fixed.lvl = i,
                "idx" => fixed.idx = i,
                "text" => fixed.text = i,
                _ => {}
            }
        }

        Schema {
            columns,
            index,
            fixed,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column, if it survived discovery.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// A row with every column set to the empty string.
    pub fn blank_row(&self) -> Row {
        vec![String::new(); self.columns.len()]
    }

    pub(crate) fn fixed(&self) -> FixedIndices {
        self.fixed
    }
}

/// A flattened document: the frozen schema plus one row per element, in
/// pre-order traversal order.
#[derive(Debug, Clone)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl Table {
    /// Fetch a cell by row number and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let i = self.schema.column_index(column)?;
        self.rows.get(row).map(|r| r[i].as_str())
    }
}

/// How much of the tree schema discovery inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaScope {
    /// Sample the first root child whose subtree does not carry the error
    /// marker, assuming sibling subtrees are structurally homogeneous.
    /// Bounded single-branch cost; attributes unique to unsampled branches
    /// are lost.
    FirstCleanChild,

    /// Union attribute names over the entire tree. One extra full pass, no
    /// silent column loss.
    FullTree,
}

/// Configuration for schema discovery and flattening.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Discovery strategy, see [`SchemaScope`].
    pub schema_scope: SchemaScope,

    /// Attribute name that marks a sibling branch as an error response
    /// during sampled discovery.
    pub error_marker: String,

    /// Separator between ordinals in the `stack` column.
    pub stack_separator: String,

    /// Backslash-escape tabs, carriage returns, newlines and backslashes
    /// inside field values on output. Off by default: the original format
    /// emits fields verbatim.
    pub escape_fields: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            schema_scope: SchemaScope::FirstCleanChild,
            error_marker: String::from("ERROR"),
            stack_separator: String::from(";"),
            escape_fields: false,
        }
    }
}
