// Relationship graph and type catalog
//
// Leaves first:
// - descriptor: structural type identity and open generic patterns
// - catalog: registered types, supertypes and static edges
// - relationship: edges, the dynamic overlay and the combined graph view
// - path: resolution paths and their enumeration
// - resolver: interface to concrete candidate ranking
// - tree: DOT/JSON export of a root's reachable graph

pub mod catalog;
pub mod descriptor;
pub mod path;
pub mod relationship;
pub mod resolver;
pub mod tree;

pub use catalog::{Catalog, CatalogBuilder, TypeEntry, TypeKind};
pub use descriptor::{TypeDescriptor, TypePattern};
pub use path::ResolutionPath;
pub use relationship::{Origin, Reachable, Relationship, RelationshipGraph};
pub use resolver::{Candidate, InterfaceResolver};
pub use tree::{NodeKind, PageObjectTree, TreeEdge, TreeNode};

pub(crate) use catalog::{page_factory_of, PageFactory};
pub(crate) use relationship::DynamicOverlay;
