// Resolution paths and their enumeration

use super::descriptor::TypeDescriptor;
use super::relationship::RelationshipGraph;
use std::fmt;
use std::sync::Arc;

/// Ordered chain of descriptors from a root to a target.
///
/// The whole sequence is the cache signature: two ancestries ending in the
/// same type are different paths.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolutionPath(Arc<[TypeDescriptor]>);

impl ResolutionPath {
    pub fn new(descriptors: Vec<TypeDescriptor>) -> Self {
        Self(descriptors.into())
    }

    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.0
    }

    pub fn root(&self) -> Option<&TypeDescriptor> {
        self.0.first()
    }

    pub fn target(&self) -> Option<&TypeDescriptor> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `len` hops.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].into())
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.0.contains(descriptor)
    }
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, descriptor) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", descriptor)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResolutionPath({})", self)
    }
}

/// Depth-first enumeration of every simple path from `root` to `target`.
///
/// Children are visited in edge declaration order and the result is stably
/// sorted by length, so equal-length paths keep declaration order.
pub(crate) fn enumerate(
    graph: &RelationshipGraph<'_>,
    root: &TypeDescriptor,
    target: &TypeDescriptor,
) -> Vec<ResolutionPath> {
    let mut found = Vec::new();
    let mut stack = vec![root.clone()];
    descend(graph, target, &mut stack, &mut found);
    found.sort_by_key(ResolutionPath::len);
    found
}

fn descend(
    graph: &RelationshipGraph<'_>,
    target: &TypeDescriptor,
    stack: &mut Vec<TypeDescriptor>,
    found: &mut Vec<ResolutionPath>,
) {
    let Some(node) = stack.last().cloned() else {
        return;
    };
    if node == *target {
        found.push(ResolutionPath::new(stack.clone()));
        return;
    }

    for child in graph.children(&node, Some(target)) {
        if stack.contains(&child) {
            continue;
        }
        stack.push(child);
        descend(graph, target, stack, found);
        stack.pop();
    }
}
