use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::model::{CatalogEntry, PATH_SEPARATOR};

/// Leaves whose raw name starts with this sequence are non-discoverable
/// alternate bindings and never appear in the catalog.
pub const HIDDEN_MARKER: &str = "@;";

/// Keyboard-mnemonic marker stripped from display names before they become
/// part of a searchable path.
pub const ACCELERATOR_MARKER: char = '&';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Group { name: String, children: Vec<MenuNode> },
    Leaf { name: String },
}

impl MenuNode {
    pub fn group(name: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self::Group {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf { name: name.into() }
    }
}

/// Flattens a menu tree into `group1/group2/leaf` catalog entries,
/// depth-first. The root's own name does not contribute to any path.
/// Divider leaves (empty name) and hidden leaves are skipped; accelerator
/// markers are stripped from every segment.
pub fn flatten(root: &MenuNode) -> Vec<CatalogEntry> {
    let mut found = Vec::new();
    match root {
        MenuNode::Group { children, .. } => {
            for child in children {
                flatten_into(child, "", &mut found);
            }
        }
        MenuNode::Leaf { .. } => flatten_into(root, "", &mut found),
    }
    found
}

fn flatten_into(node: &MenuNode, prefix: &str, found: &mut Vec<CatalogEntry>) {
    match node {
        MenuNode::Group { name, children } => {
            let segment = strip_accelerator(name);
            let child_prefix = join_path(prefix, &segment);
            for child in children {
                flatten_into(child, &child_prefix, found);
            }
        }
        MenuNode::Leaf { name } => {
            if name.is_empty() || name.starts_with(HIDDEN_MARKER) {
                return;
            }
            let segment = strip_accelerator(name);
            if segment.is_empty() {
                return;
            }
            found.push(CatalogEntry::new(join_path(prefix, &segment)));
        }
    }
}

fn strip_accelerator(name: &str) -> String {
    name.chars().filter(|c| *c != ACCELERATOR_MARKER).collect()
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else if segment.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{segment}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogError {
    message: String,
}

impl CatalogError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CatalogError {}

/// Where the menu tree comes from. The engine consumes the tree exactly
/// once at startup; everything after that works on the flattened list.
pub trait CatalogSource {
    fn source_name(&self) -> &'static str;
    fn enumerate(&self) -> Result<MenuNode, CatalogError>;
}

pub fn load_catalog(source: &dyn CatalogSource) -> Result<Vec<CatalogEntry>, CatalogError> {
    let tree = source.enumerate()?;
    Ok(flatten(&tree))
}

/// Hand-authored catalog definition file. JSON5 keeps the format friendly
/// to comments and trailing commas: groups are objects, leaves are `null`
/// values.
pub struct Json5FileSource {
    path: PathBuf,
}

impl Json5FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for Json5FileSource {
    fn source_name(&self) -> &'static str {
        "json5-file"
    }

    fn enumerate(&self) -> Result<MenuNode, CatalogError> {
        let text = std::fs::read_to_string(&self.path).map_err(|error| {
            CatalogError::new(format!(
                "failed to read catalog file {}: {error}",
                self.path.display()
            ))
        })?;
        parse_catalog_json5(&text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeDef {
    Leaf(()),
    Group(BTreeMap<String, NodeDef>),
}

pub fn parse_catalog_json5(text: &str) -> Result<MenuNode, CatalogError> {
    let defs: BTreeMap<String, NodeDef> = json5::from_str(text)
        .map_err(|error| CatalogError::new(format!("invalid catalog definition: {error}")))?;
    Ok(MenuNode::group("", defs_to_children(defs)))
}

fn defs_to_children(defs: BTreeMap<String, NodeDef>) -> Vec<MenuNode> {
    defs.into_iter()
        .map(|(name, def)| match def {
            NodeDef::Leaf(()) => MenuNode::leaf(name),
            NodeDef::Group(children) => MenuNode::group(name, defs_to_children(children)),
        })
        .collect()
}

/// Builds a catalog from a directory tree: directories are groups, files
/// are leaves. Dotfiles and dot-directories are skipped. Useful for
/// running the launcher against a scripts folder outside any host.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CatalogSource for DirSource {
    fn source_name(&self) -> &'static str {
        "directory"
    }

    fn enumerate(&self) -> Result<MenuNode, CatalogError> {
        let mut tree: BTreeMap<String, NodeDef> = BTreeMap::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden_dir_entry(entry.path()));

        for entry in walker {
            let entry = entry.map_err(|error| {
                CatalogError::new(format!(
                    "failed to walk catalog directory {}: {error}",
                    self.root.display()
                ))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).map_err(|error| {
                CatalogError::new(format!("unexpected path outside root: {error}"))
            })?;
            insert_relative_path(&mut tree, relative);
        }

        Ok(MenuNode::group("", defs_to_children(tree)))
    }
}

fn is_hidden_dir_entry(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn insert_relative_path(tree: &mut BTreeMap<String, NodeDef>, relative: &Path) {
    let mut components: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    let Some(file_name) = components.pop() else {
        return;
    };

    let mut level = tree;
    for segment in components {
        let node = level
            .entry(segment)
            .or_insert_with(|| NodeDef::Group(BTreeMap::new()));
        match node {
            NodeDef::Group(children) => level = children,
            // A file and directory with the same name; the file wins and
            // the subtree is dropped.
            NodeDef::Leaf(()) => return,
        }
    }
    level.insert(file_name, NodeDef::Leaf(()));
}

/// Deterministic in-memory catalog for tests and demos, shaped like the
/// node menu of a compositing host.
pub struct FixtureSource;

impl CatalogSource for FixtureSource {
    fn source_name(&self) -> &'static str {
        "fixture"
    }

    fn enumerate(&self) -> Result<MenuNode, CatalogError> {
        Ok(MenuNode::group(
            "Nodes",
            vec![
                MenuNode::group(
                    "3D",
                    vec![
                        MenuNode::leaf("Axis"),
                        MenuNode::leaf("Camera"),
                        MenuNode::leaf("CameraTracker"),
                        MenuNode::group("Geometry", vec![MenuNode::leaf("Card")]),
                    ],
                ),
                MenuNode::group(
                    "Draw",
                    vec![MenuNode::leaf("Rectangle"), MenuNode::leaf("Text")],
                ),
                MenuNode::group(
                    "Transform",
                    vec![MenuNode::leaf("Move2D"), MenuNode::leaf("MatchMove")],
                ),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{flatten, MenuNode};

    #[test]
    fn flatten_skips_dividers_and_hidden_leaves() {
        let tree = MenuNode::group(
            "Nodes",
            vec![MenuNode::group(
                "Edit",
                vec![
                    MenuNode::leaf("Copy"),
                    MenuNode::leaf(""),
                    MenuNode::leaf("@;&CopyBranch"),
                    MenuNode::leaf("Paste"),
                ],
            )],
        );

        let entries = flatten(&tree);
        let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["Edit/Copy", "Edit/Paste"]);
    }

    #[test]
    fn flatten_strips_accelerator_markers() {
        let tree = MenuNode::group(
            "Nodes",
            vec![MenuNode::group("&File", vec![MenuNode::leaf("O&pen")])],
        );

        let entries = flatten(&tree);
        let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["File/Open"]);
    }
}
