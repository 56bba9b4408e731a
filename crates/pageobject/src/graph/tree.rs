// Page object tree export
//
// Snapshot of the relationship graph as seen from one root, rendered as
// Graphviz DOT or serialized as JSON.

use super::descriptor::{TypeDescriptor, TypePattern};
use super::relationship::{Origin, RelationshipGraph};
use crate::error::Result;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Kind of a node in the exported tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Page,
    /// Open generic shape matching any instantiation
    Generic,
}

impl NodeKind {
    fn color(self) -> &'static str {
        match self {
            NodeKind::Root => "palegreen3",
            NodeKind::Page => "lightskyblue",
            NodeKind::Generic => "khaki",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEdge {
    pub parent: String,
    pub child: String,
    pub origin: Origin,
}

/// Graph reachable from a root scope's root type.
#[derive(Debug, Clone, Serialize)]
pub struct PageObjectTree {
    pub root: String,
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
}

impl PageObjectTree {
    /// Breadth-first walk from `root` over traversable edges.
    pub fn from_graph(graph: &RelationshipGraph<'_>, root: &TypeDescriptor) -> Self {
        let mut tree = PageObjectTree {
            root: root.to_string(),
            nodes: vec![TreeNode {
                label: root.to_string(),
                kind: NodeKind::Root,
            }],
            edges: Vec::new(),
        };

        let mut queue = VecDeque::from([root.clone()]);
        while let Some(node) = queue.pop_front() {
            let parent_label = node.to_string();
            for edge in graph.edges() {
                if !matches!(&edge.parent, TypePattern::Exact(parent) if *parent == node) {
                    continue;
                }
                let child_label = edge.child.to_string();
                if !tree.nodes.iter().any(|n| n.label == child_label) {
                    let kind = if edge.child.is_open() {
                        NodeKind::Generic
                    } else {
                        NodeKind::Page
                    };
                    tree.nodes.push(TreeNode {
                        label: child_label.clone(),
                        kind,
                    });
                    match &edge.child {
                        TypePattern::Exact(child) => queue.push_back(child.clone()),
                        open => {
                            for instantiation in graph.instantiations(open) {
                                let label = instantiation.to_string();
                                if !tree.nodes.iter().any(|n| n.label == label) {
                                    tree.nodes.push(TreeNode {
                                        label: label.clone(),
                                        kind: NodeKind::Page,
                                    });
                                    tree.edges.push(TreeEdge {
                                        parent: child_label.clone(),
                                        child: label,
                                        origin: edge.origin,
                                    });
                                    queue.push_back(instantiation);
                                }
                            }
                        }
                    }
                }
                let exists = tree
                    .edges
                    .iter()
                    .any(|e| e.parent == parent_label && e.child == child_label);
                if !exists {
                    tree.edges.push(TreeEdge {
                        parent: parent_label.clone(),
                        child: child_label,
                        origin: edge.origin,
                    });
                }
            }
        }
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Graphviz rendering; dynamic edges are dashed.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph PageObjectTree {\n");
        dot.push_str("  node [shape=box, style=filled];\n");
        for node in &self.nodes {
            let _ = writeln!(
                dot,
                "  \"{}\" [fillcolor={}];",
                escape(&node.label),
                node.kind.color()
            );
        }
        for edge in &self.edges {
            let style = match edge.origin {
                Origin::Static => "solid",
                Origin::Dynamic => "dashed",
            };
            let _ = writeln!(
                dot,
                "  \"{}\" -> \"{}\" [style={}];",
                escape(&edge.parent),
                escape(&edge.child),
                style
            );
        }
        dot.push('}');
        dot.push('\n');
        dot
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the DOT rendering to `path`.
    pub async fn write_dot(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref().to_path_buf();
        tokio::fs::write(&path, self.to_dot()).await?;
        tracing::debug!(path = %path.display(), nodes = self.node_count(), "Wrote page object tree");
        Ok(path)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
