//! Path segmentation, resource naming and the shared prefix tree.

use crate::error::ValidationError;
use crate::ir::EndpointDescriptor;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

pub const PATH_SEPARATOR: char = '/';
/// Joins segments inside a resource name.
pub const NAME_SEPARATOR: &str = "_";

static INVALID_NAME_CHARS: OnceLock<Regex> = OnceLock::new();

/// Split a raw endpoint path into its non-empty segments.
///
/// Leading and trailing separators are ignored and repeated separators collapse,
/// so `"/a//b/"` yields `["a", "b"]`. A path with no segments left is rejected.
pub fn segment_path(path: &str) -> Result<Vec<String>, ValidationError> {
    let segments: Vec<String> = path
        .trim_matches(PATH_SEPARATOR)
        .split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        return Err(ValidationError::EmptyPath {
            path: path.to_string(),
        });
    }
    Ok(segments)
}

/// Terraform resource name for a segment sequence.
///
/// Distinct sequences can map to the same name (`["a", "b"]` and `["a_b"]` both
/// give `a_b`); [`crate::lint_endpoints`] reports those collisions.
pub fn resource_name(segments: &[String]) -> String {
    let re = INVALID_NAME_CHARS
        .get_or_init(|| Regex::new(r"[^a-z0-9_]").expect("static resource name pattern"));
    let joined = segments.join(NAME_SEPARATOR).to_lowercase();
    re.replace_all(&joined, "_").into_owned()
}

/// Normalized key of a segment sequence (`/a/b`).
pub fn path_key(segments: &[String]) -> String {
    format!("{}{}", PATH_SEPARATOR, segments.join("/"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum ParentPath {
    Root,
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathNode {
    pub segments: Vec<String>,
    pub last_segment: String,
    pub parent: ParentPath,
    pub identifier: String,
    pub children: BTreeSet<String>,
}

impl PathNode {
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn path(&self) -> String {
        path_key(&self.segments)
    }
}

/// One node per unique path prefix across every endpoint of a generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceTree {
    nodes: BTreeMap<String, PathNode>,
    root_children: BTreeSet<String>,
}

impl ResourceTree {
    pub fn build(endpoints: &[EndpointDescriptor]) -> Result<Self, ValidationError> {
        let mut tree = ResourceTree::default();
        for endpoint in endpoints {
            let segments = segment_path(&endpoint.path)?;
            tree.insert_segments(&segments);
        }
        tracing::debug!(nodes = tree.len(), "built resource tree");
        Ok(tree)
    }

    /// Add every prefix of `segments`, reusing nodes that already exist.
    pub fn insert_segments(&mut self, segments: &[String]) {
        for depth in 1..=segments.len() {
            let prefix = &segments[..depth];
            let key = path_key(prefix);
            let parent = if depth == 1 {
                ParentPath::Root
            } else {
                ParentPath::Path(path_key(&segments[..depth - 1]))
            };
            if !self.nodes.contains_key(&key) {
                self.nodes.insert(
                    key.clone(),
                    PathNode {
                        segments: prefix.to_vec(),
                        last_segment: prefix[depth - 1].clone(),
                        parent: parent.clone(),
                        identifier: resource_name(prefix),
                        children: BTreeSet::new(),
                    },
                );
            }
            match parent {
                ParentPath::Root => {
                    self.root_children.insert(key);
                }
                ParentPath::Path(parent_key) => {
                    if let Some(parent_node) = self.nodes.get_mut(&parent_key) {
                        parent_node.children.insert(key);
                    }
                }
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&PathNode> {
        self.nodes.get(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_children(&self) -> &BTreeSet<String> {
        &self.root_children
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.values()
    }

    /// Nodes ordered shallowest first, ties broken by identifier then path.
    /// Every parent comes before its children.
    pub fn by_depth(&self) -> Vec<&PathNode> {
        let mut sorted: Vec<&PathNode> = self.nodes.values().collect();
        sorted.sort_by(|a, b| {
            a.depth()
                .cmp(&b.depth())
                .then_with(|| a.identifier.cmp(&b.identifier))
                .then_with(|| a.segments.cmp(&b.segments))
        });
        sorted
    }

    /// Indented listing of the tree, children under their parents.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for key in &self.root_children {
            self.render_node(key, 0, &mut out);
        }
        out
    }

    fn render_node(&self, key: &str, indent: usize, out: &mut String) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        out.push_str(&format!(
            "{}{} ({})\n",
            "  ".repeat(indent),
            node.last_segment,
            node.identifier
        ));
        for child in &node.children {
            self.render_node(child, indent + 1, out);
        }
    }
}
