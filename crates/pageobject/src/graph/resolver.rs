// Interface resolver - maps a requested type to ranked concrete candidates

use super::catalog::{Catalog, TypeKind};
use super::descriptor::TypeDescriptor;

/// A concrete type able to satisfy a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub descriptor: TypeDescriptor,
    /// Supertype hops to the requested type; 0 for the type itself.
    pub distance: usize,
    /// Catalog registration order.
    pub order: usize,
}

/// Ranks concrete implementers of a requested type.
///
/// Candidates are ordered by distance first, so the most specific
/// implementer wins over one that only reaches the request through a
/// broader supertype. Equal distances fall back to catalog registration
/// order.
pub struct InterfaceResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> InterfaceResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Concrete candidates of the given kinds, best first.
    ///
    /// A request naming a registered concrete type resolves to itself.
    pub fn candidates<F>(
        &self,
        requested: &TypeDescriptor,
        kinds: &[TypeKind],
        in_scope: F,
    ) -> Vec<Candidate>
    where
        F: Fn(&TypeDescriptor) -> bool,
    {
        if let Some(entry) = self.catalog.get(requested) {
            if entry.kind().is_concrete() {
                return vec![Candidate {
                    descriptor: requested.clone(),
                    distance: 0,
                    order: entry.order(),
                }];
            }
        }

        let mut candidates: Vec<Candidate> = self
            .catalog
            .entries()
            .filter(|e| kinds.contains(&e.kind()) && in_scope(e.descriptor()))
            .filter_map(|e| {
                self.catalog
                    .distance(e.descriptor(), requested)
                    .map(|distance| Candidate {
                        descriptor: e.descriptor().clone(),
                        distance,
                        order: e.order(),
                    })
            })
            .collect();
        candidates.sort_by_key(|c| (c.distance, c.order));
        tracing::debug!(
            requested = %requested,
            candidates = candidates.len(),
            "Ranked interface candidates"
        );
        candidates
    }

    /// The best candidate, if any.
    pub fn resolve<F>(
        &self,
        requested: &TypeDescriptor,
        kinds: &[TypeKind],
        in_scope: F,
    ) -> Option<TypeDescriptor>
    where
        F: Fn(&TypeDescriptor) -> bool,
    {
        self.candidates(requested, kinds, in_scope)
            .into_iter()
            .next()
            .map(|c| c.descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ControlObject, Node, PageObject, UiObject};
    use crate::object::By;
    use std::sync::Arc;

    trait Shape: ControlObject {}
    trait Round: Shape {}

    #[derive(Default)]
    struct Square {
        node: Node,
    }
    #[derive(Default)]
    struct Circle {
        node: Node,
    }
    #[derive(Default)]
    struct Ellipse {
        node: Node,
    }
    #[derive(Default)]
    struct Panel {
        node: Node,
    }

    crate::impl_ui_object!(Square, Circle, Ellipse, Panel);
    impl PageObject for Panel {}
    impl ControlObject for Square {
        fn search_pattern(&self) -> By {
            By::css(".square")
        }
    }
    impl ControlObject for Circle {
        fn search_pattern(&self) -> By {
            By::css(".circle")
        }
    }
    impl ControlObject for Ellipse {
        fn search_pattern(&self) -> By {
            By::css(".ellipse")
        }
    }
    impl Shape for Square {}
    impl Shape for Circle {}
    impl Round for Circle {}
    impl Shape for Ellipse {}
    impl Round for Ellipse {}

    fn catalog() -> Catalog {
        Catalog::builder()
            .control::<Square>()
            .control::<Ellipse>()
            .control::<Circle>()
            .page::<Panel>()
            .implements::<Square, dyn Shape, _>(|s| s)
            .implements::<Ellipse, dyn Round, _>(|e| e)
            .implements::<Circle, dyn Round, _>(|c| c)
            .interface_extends::<dyn Round, dyn Shape, _>(|r| r as Arc<dyn Shape>)
            .build()
            .expect("catalog")
    }

    #[test]
    fn test_closest_implementer_wins() {
        let catalog = catalog();
        let resolver = InterfaceResolver::new(&catalog);

        let best = resolver.resolve(
            &TypeDescriptor::of::<dyn Shape>(),
            &[TypeKind::Control],
            |_| true,
        );
        assert_eq!(best, Some(TypeDescriptor::of::<Square>()));
    }

    #[test]
    fn test_equal_distance_falls_back_to_registration_order() {
        let catalog = catalog();
        let resolver = InterfaceResolver::new(&catalog);

        let candidates = resolver.candidates(
            &TypeDescriptor::of::<dyn Round>(),
            &[TypeKind::Control],
            |_| true,
        );
        let names: Vec<String> = candidates.iter().map(|c| c.descriptor.to_string()).collect();
        assert_eq!(names, vec!["Ellipse", "Circle"]);
        assert!(candidates.iter().all(|c| c.distance == 1));
    }

    #[test]
    fn test_concrete_request_resolves_to_itself() {
        let catalog = catalog();
        let resolver = InterfaceResolver::new(&catalog);
        let candidates =
            resolver.candidates(&TypeDescriptor::of::<Panel>(), &[TypeKind::Control], |_| false);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].distance, 0);
    }

    #[test]
    fn test_scope_filter_and_kind_filter() {
        let catalog = catalog();
        let resolver = InterfaceResolver::new(&catalog);
        let square = TypeDescriptor::of::<Square>();
        let candidates = resolver.candidates(
            &TypeDescriptor::of::<dyn Shape>(),
            &[TypeKind::Control],
            |d| *d != square,
        );
        assert_eq!(candidates[0].descriptor, TypeDescriptor::of::<Ellipse>());
        assert!(resolver
            .candidates(&TypeDescriptor::of::<dyn Shape>(), &[TypeKind::Page], |_| true)
            .is_empty());
    }
}
