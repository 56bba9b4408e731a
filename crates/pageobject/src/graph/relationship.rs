// Relationship graph - static edges plus a scope's dynamic overlay

use super::catalog::PageFactory;
use super::descriptor::{TypeDescriptor, TypePattern};
use super::path::{self, ResolutionPath};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Where an edge was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Static,
    Dynamic,
}

/// A directed "is reachable as a child of" edge.
#[derive(Debug, Clone, Serialize)]
pub struct Relationship {
    pub child: TypePattern,
    pub parent: TypePattern,
    pub origin: Origin,
}

impl Relationship {
    pub fn new(child: TypePattern, parent: TypePattern, origin: Origin) -> Self {
        Self {
            child,
            parent,
            origin,
        }
    }

    /// Equality of the link, ignoring origin.
    pub fn same_link(&self, child: &TypePattern, parent: &TypePattern) -> bool {
        self.child == *child && self.parent == *parent
    }

    /// Whether `node` is the exact parent of this edge.
    pub(crate) fn leaves(&self, node: &TypeDescriptor) -> bool {
        matches!(&self.parent, TypePattern::Exact(parent) if parent == node)
    }
}

/// Dynamic edges of one root scope.
///
/// Copy-on-write: registration replaces the shared vectors, so a snapshot
/// taken by a resolution always sees a complete edge set.
#[derive(Clone, Default)]
pub(crate) struct DynamicOverlay {
    edges: Arc<Vec<Relationship>>,
    factories: Arc<HashMap<TypeDescriptor, PageFactory>>,
}

impl DynamicOverlay {
    pub(crate) fn edges(&self) -> &[Relationship] {
        &self.edges
    }

    pub(crate) fn factory(&self, descriptor: &TypeDescriptor) -> Option<PageFactory> {
        self.factories.get(descriptor).cloned()
    }

    pub(crate) fn push_edge(&mut self, relationship: Relationship) {
        Arc::make_mut(&mut self.edges).push(relationship);
    }

    pub(crate) fn add_factory(&mut self, descriptor: TypeDescriptor, factory: PageFactory) {
        if !self.factories.contains_key(&descriptor) {
            Arc::make_mut(&mut self.factories).insert(descriptor, factory);
        }
    }
}

/// Types reachable from a root, as exact descriptors and open patterns.
#[derive(Debug, Default)]
pub struct Reachable {
    exact: HashSet<TypeDescriptor>,
    open: Vec<TypePattern>,
}

impl Reachable {
    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.exact.contains(descriptor) || self.open.iter().any(|p| p.matches(descriptor))
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.open.is_empty()
    }
}

/// Read view over the union of static and dynamic edges.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipGraph<'a> {
    static_edges: &'a [Relationship],
    dynamic_edges: &'a [Relationship],
}

impl<'a> RelationshipGraph<'a> {
    pub fn new(static_edges: &'a [Relationship], dynamic_edges: &'a [Relationship]) -> Self {
        Self {
            static_edges,
            dynamic_edges,
        }
    }

    /// Static edges first, then dynamic edges, each in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.static_edges.iter().chain(self.dynamic_edges.iter())
    }

    pub fn len(&self) -> usize {
        self.static_edges.len() + self.dynamic_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, child: &TypePattern, parent: &TypePattern) -> bool {
        self.edges().any(|e| e.same_link(child, parent))
    }

    /// Every simple path from `root` to `target`, shortest first.
    pub fn paths(&self, root: &TypeDescriptor, target: &TypeDescriptor) -> Vec<ResolutionPath> {
        path::enumerate(self, root, target)
    }

    /// Children of `node` along traversable edges, in edge order.
    ///
    /// An open child pattern leads to `target` when it matches it, and to
    /// every instantiation of the pattern that is an exact parent in this
    /// graph. Edges whose parent is an open pattern are never followed.
    pub(crate) fn children(
        &self,
        node: &TypeDescriptor,
        target: Option<&TypeDescriptor>,
    ) -> Vec<TypeDescriptor> {
        let mut children: Vec<TypeDescriptor> = Vec::new();
        let mut push = |child: &TypeDescriptor| {
            if !children.contains(child) {
                children.push(child.clone());
            }
        };
        for edge in self.edges().filter(|e| e.leaves(node)) {
            match &edge.child {
                TypePattern::Exact(child) => push(child),
                open => {
                    if let Some(target) = target.filter(|t| open.matches(t)) {
                        push(target);
                    }
                    for instantiation in self.instantiations(open) {
                        push(&instantiation);
                    }
                }
            }
        }
        children
    }

    /// Closed instantiations of `pattern` declared as exact parents.
    pub(crate) fn instantiations(&self, pattern: &TypePattern) -> Vec<TypeDescriptor> {
        if !pattern.is_open() {
            return Vec::new();
        }
        self.edges()
            .filter_map(|edge| match &edge.parent {
                TypePattern::Exact(parent) if pattern.matches(parent) => Some(parent.clone()),
                _ => None,
            })
            .collect()
    }

    /// Everything reachable from `root` along traversable edges.
    pub fn reachable(&self, root: &TypeDescriptor) -> Reachable {
        let mut reachable = Reachable::default();
        reachable.exact.insert(root.clone());
        let mut queue = VecDeque::from([root.clone()]);
        while let Some(node) = queue.pop_front() {
            for edge in self.edges().filter(|e| e.leaves(&node)) {
                if edge.child.is_open() && !reachable.open.contains(&edge.child) {
                    reachable.open.push(edge.child.clone());
                }
            }
            for child in self.children(&node, None) {
                if reachable.exact.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }
        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Root;
    struct Left;
    struct Right;
    #[allow(dead_code)]
    struct Item<T>(T);

    fn edge<C: 'static, P: 'static>(origin: Origin) -> Relationship {
        Relationship::new(TypePattern::exact::<C>(), TypePattern::exact::<P>(), origin)
    }

    #[test]
    fn test_contains_ignores_origin() {
        let statics = vec![edge::<Left, Root>(Origin::Static)];
        let dynamics = vec![edge::<Right, Root>(Origin::Dynamic)];
        let graph = RelationshipGraph::new(&statics, &dynamics);

        assert!(graph.contains(&TypePattern::exact::<Left>(), &TypePattern::exact::<Root>()));
        assert!(graph.contains(&TypePattern::exact::<Right>(), &TypePattern::exact::<Root>()));
        assert!(!graph.contains(&TypePattern::exact::<Root>(), &TypePattern::exact::<Left>()));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_open_child_is_not_an_exact_duplicate() {
        let statics = vec![Relationship::new(
            TypePattern::open::<Item<()>>(),
            TypePattern::exact::<Root>(),
            Origin::Static,
        )];
        let graph = RelationshipGraph::new(&statics, &[]);
        assert!(!graph.contains(&TypePattern::exact::<Item<String>>(), &TypePattern::exact::<Root>()));
    }

    #[test]
    fn test_reachable_includes_open_patterns() {
        let statics = vec![
            edge::<Left, Root>(Origin::Static),
            Relationship::new(
                TypePattern::open::<Item<()>>(),
                TypePattern::exact::<Left>(),
                Origin::Static,
            ),
        ];
        let graph = RelationshipGraph::new(&statics, &[]);
        let reachable = graph.reachable(&TypeDescriptor::of::<Root>());

        assert!(reachable.contains(&TypeDescriptor::of::<Root>()));
        assert!(reachable.contains(&TypeDescriptor::of::<Left>()));
        assert!(reachable.contains(&TypeDescriptor::of::<Item<u8>>()));
        assert!(!reachable.contains(&TypeDescriptor::of::<Right>()));
    }

    #[test]
    fn test_open_child_continues_through_declared_instantiations() {
        let statics = vec![
            Relationship::new(
                TypePattern::open::<Item<()>>(),
                TypePattern::exact::<Root>(),
                Origin::Static,
            ),
            edge::<Left, Item<u8>>(Origin::Static),
        ];
        let graph = RelationshipGraph::new(&statics, &[]);
        let root = TypeDescriptor::of::<Root>();

        let reachable = graph.reachable(&root);
        assert!(reachable.contains(&TypeDescriptor::of::<Left>()));

        let paths = graph.paths(&root, &TypeDescriptor::of::<Left>());
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].to_string(), "Root > Item<u8> > Left");

        // the requested instantiation is not duplicated
        assert_eq!(graph.children(&root, Some(&TypeDescriptor::of::<Item<u8>>())).len(), 1);
        assert_eq!(graph.children(&root, Some(&TypeDescriptor::of::<Item<i8>>())).len(), 2);
    }
}
