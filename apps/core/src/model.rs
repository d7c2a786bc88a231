/// One selectable entry in the flattened catalog, conceptually
/// `"group1/group2/leaf"`. Duplicates are allowed; identity is the exact
/// path string. The lowercased views used by the matcher are derived once
/// at construction so a ranking pass stays allocation-free per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    path: String,
    label: String,
    lower_path: String,
    lower_leaf: String,
    lower_label: String,
}

pub const PATH_SEPARATOR: char = '/';

/// Opening character of the `leaf [group]` qualifier in display labels.
pub const QUALIFIER_BRACKET: char = '[';

impl CatalogEntry {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let (group, leaf) = match path.rfind(PATH_SEPARATOR) {
            Some(index) => (&path[..index], &path[index + 1..]),
            None => ("", path.as_str()),
        };

        let label = if group.is_empty() {
            leaf.to_string()
        } else {
            format!("{leaf} [{group}]")
        };

        let lower_path = path.to_lowercase();
        let lower_leaf = leaf.to_lowercase();
        let lower_label = label.to_lowercase();

        Self {
            path,
            label,
            lower_path,
            lower_leaf,
            lower_label,
        }
    }

    /// Full `group/leaf` path; the identity handed to the host on invoke.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display form `leaf [group]`, the shape the result list renders.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lower_path(&self) -> &str {
        &self.lower_path
    }

    /// Leaf name only (text after the last separator), lowercased.
    pub fn lower_leaf(&self) -> &str {
        &self.lower_leaf
    }

    pub fn lower_label(&self) -> &str {
        &self.lower_label
    }
}

/// A catalog entry paired with its score for the current query. Rebuilt on
/// every ranking pass, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub entry: CatalogEntry,
    pub score: f64,
}
