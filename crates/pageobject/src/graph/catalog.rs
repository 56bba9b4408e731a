// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Concrete type catalog - the process-wide set of resolvable types
//
// Types are registered explicitly at startup through `CatalogBuilder`
// instead of being discovered by scanning. The builder records:
// - concrete page, root and control types with their constructors
// - abstract and interface types, which are never instantiated
// - supertype links (implements, interface extends, extends) used for
//   candidate ranking and for casting a concrete object to an interface
// - static "child of" declarations, expanded into graph edges on build
//
// Casting works on type-erased values: every concrete entry carries a caster
// turning `Arc<dyn Any>` into `Arc<T>`, and every implements/extends link
// carries a caster from `Arc<T>` (or `Arc<dyn I>`) to `Arc<dyn J>`. A cast
// composes the shortest chain of casters from the concrete type to the
// requested interface.

use super::descriptor::{TypeDescriptor, TypePattern};
use super::relationship::{Origin, Relationship};
use crate::error::{Error, Result};
use crate::object::{ControlObject, PageObject, TabObject};
use serde::Serialize;
use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, OnceLock};

pub(crate) type Erased = Box<dyn Any + Send + Sync>;
pub(crate) type Caster = Arc<dyn Fn(Erased) -> Option<Erased> + Send + Sync>;
pub(crate) type PageFactory = Arc<dyn Fn() -> Arc<dyn PageObject> + Send + Sync>;
pub(crate) type ControlFactory = Arc<dyn Fn() -> Arc<dyn ControlObject> + Send + Sync>;
pub(crate) type RootFactory = Arc<dyn Fn() -> (Arc<dyn PageObject>, Option<String>) + Send + Sync>;

static GLOBAL_CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();

/// What a catalog entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Root,
    Page,
    Control,
    Abstract,
    Interface,
}

impl TypeKind {
    /// Concrete kinds can be instantiated and resolved.
    pub fn is_concrete(self) -> bool {
        matches!(self, TypeKind::Root | TypeKind::Page | TypeKind::Control)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupertypeKind {
    Implements,
    InterfaceExtends,
    Extends,
}

#[derive(Clone)]
struct Supertype {
    descriptor: TypeDescriptor,
    kind: SupertypeKind,
    caster: Option<Caster>,
}

#[derive(Clone)]
enum Factory {
    Root(RootFactory),
    Page(PageFactory),
    Control(ControlFactory),
}

/// One registered type.
pub struct TypeEntry {
    descriptor: TypeDescriptor,
    kind: TypeKind,
    order: usize,
    supertypes: Vec<Supertype>,
    factory: Option<Factory>,
    self_caster: Option<Caster>,
}

impl TypeEntry {
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Registration order; breaks ties between equally distant candidates.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Direct supertypes (implemented interfaces, extended types).
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.supertypes.iter().map(|s| &s.descriptor)
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("descriptor", &self.descriptor)
            .field("kind", &self.kind)
            .field("order", &self.order)
            .field(
                "supertypes",
                &self.supertypes.iter().map(|s| (&s.descriptor, s.kind)).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The immutable set of registered types and static relationships.
pub struct Catalog {
    entries: Vec<TypeEntry>,
    index: HashMap<TypeDescriptor, usize>,
    edges: Vec<Relationship>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// A catalog without types or edges. Dynamic registration still works.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Installs this catalog as the process-wide catalog.
    ///
    /// Static relationships are established once per process; a second
    /// install is rejected.
    pub fn install_global(self) -> Result<Arc<Catalog>> {
        let catalog = Arc::new(self);
        GLOBAL_CATALOG.set(Arc::clone(&catalog)).map_err(|_| {
            Error::InvalidOperation("a global catalog is already installed".to_string())
        })?;
        tracing::debug!(
            types = catalog.entries.len(),
            edges = catalog.edges.len(),
            "Installed global catalog"
        );
        Ok(catalog)
    }

    /// The process-wide catalog, if one was installed.
    pub fn global() -> Option<Arc<Catalog>> {
        GLOBAL_CATALOG.get().cloned()
    }

    pub fn get(&self, descriptor: &TypeDescriptor) -> Option<&TypeEntry> {
        self.index.get(descriptor).map(|&i| &self.entries[i])
    }

    pub fn kind_of(&self, descriptor: &TypeDescriptor) -> Option<TypeKind> {
        self.get(descriptor).map(TypeEntry::kind)
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.index.contains_key(descriptor)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }

    /// Static edges in declaration order.
    pub fn static_edges(&self) -> &[Relationship] {
        &self.edges
    }

    /// True for trait objects and types registered as interfaces.
    pub fn is_interface(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.is_trait_object() || self.kind_of(descriptor) == Some(TypeKind::Interface)
    }

    /// True if the type may take part in a relationship.
    pub fn is_relatable(&self, descriptor: &TypeDescriptor) -> bool {
        !self.is_interface(descriptor) && self.kind_of(descriptor) != Some(TypeKind::Abstract)
    }

    /// Number of supertype hops from `from` to `to`, if `from` is assignable to `to`.
    pub fn distance(&self, from: &TypeDescriptor, to: &TypeDescriptor) -> Option<usize> {
        if from == to {
            return Some(0);
        }
        let mut seen: HashSet<&TypeDescriptor> = HashSet::new();
        let mut queue: VecDeque<(&TypeDescriptor, usize)> = VecDeque::new();
        queue.push_back((from, 0));
        while let Some((current, depth)) = queue.pop_front() {
            let Some(entry) = self.get(current) else {
                continue;
            };
            for supertype in &entry.supertypes {
                if supertype.descriptor == *to {
                    return Some(depth + 1);
                }
                if seen.insert(&supertype.descriptor) {
                    queue.push_back((&supertype.descriptor, depth + 1));
                }
            }
        }
        None
    }

    /// Concrete entries of the given kinds assignable to `target`, in registration order.
    pub(crate) fn implementers<'a>(
        &'a self,
        target: &'a TypeDescriptor,
        kinds: &'a [TypeKind],
    ) -> impl Iterator<Item = &'a TypeEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| kinds.contains(&e.kind) && self.distance(&e.descriptor, target).is_some())
    }

    /// Casts a type-erased concrete object to `I` along registered supertype links.
    pub(crate) fn cast<I>(
        &self,
        concrete: &TypeDescriptor,
        object: Arc<dyn Any + Send + Sync>,
    ) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let target = TypeDescriptor::of::<I>();
        let hops = self.caster_path(concrete, &target)?;
        let mut value: Erased = Box::new(object);
        for hop in hops {
            value = hop(value)?;
        }
        value.downcast::<Arc<I>>().ok().map(|boxed| *boxed)
    }

    pub(crate) fn page_factory(&self, descriptor: &TypeDescriptor) -> Option<PageFactory> {
        match &self.get(descriptor)?.factory {
            Some(Factory::Page(factory)) => Some(Arc::clone(factory)),
            Some(Factory::Root(factory)) => {
                let factory = Arc::clone(factory);
                Some(Arc::new(move || factory().0))
            }
            _ => None,
        }
    }

    pub(crate) fn control_factory(&self, descriptor: &TypeDescriptor) -> Option<ControlFactory> {
        match &self.get(descriptor)?.factory {
            Some(Factory::Control(factory)) => Some(Arc::clone(factory)),
            _ => None,
        }
    }

    pub(crate) fn root_factory(&self, descriptor: &TypeDescriptor) -> Option<RootFactory> {
        match &self.get(descriptor)?.factory {
            Some(Factory::Root(factory)) => Some(Arc::clone(factory)),
            _ => None,
        }
    }

    /// Shortest chain of casters from the concrete type to `to`.
    fn caster_path<'a>(
        &'a self,
        from: &'a TypeDescriptor,
        to: &'a TypeDescriptor,
    ) -> Option<Vec<Caster>> {
        let first = self.get(from)?.self_caster.clone()?;
        if from == to {
            return Some(vec![first]);
        }

        let mut previous: HashMap<&TypeDescriptor, (&TypeDescriptor, &Caster)> = HashMap::new();
        let mut queue: VecDeque<&TypeDescriptor> = VecDeque::new();
        queue.push_back(from);
        let mut found = false;
        'search: while let Some(current) = queue.pop_front() {
            let Some(entry) = self.get(current) else {
                continue;
            };
            for supertype in &entry.supertypes {
                let Some(caster) = &supertype.caster else {
                    continue;
                };
                if supertype.descriptor == *from || previous.contains_key(&supertype.descriptor) {
                    continue;
                }
                previous.insert(&supertype.descriptor, (current, caster));
                if supertype.descriptor == *to {
                    found = true;
                    break 'search;
                }
                queue.push_back(&supertype.descriptor);
            }
        }
        if !found {
            return None;
        }

        let mut hops = Vec::new();
        let mut cursor = to;
        while cursor != from {
            let (prev, caster) = previous.get(cursor)?;
            hops.push(Arc::clone(*caster));
            cursor = *prev;
        }
        hops.push(first);
        hops.reverse();
        Some(hops)
    }

    fn extends_transitively(&self, derived: &TypeDescriptor, base: &TypeDescriptor) -> bool {
        let mut seen: HashSet<&TypeDescriptor> = HashSet::new();
        let mut queue: VecDeque<&TypeDescriptor> = VecDeque::new();
        queue.push_back(derived);
        while let Some(current) = queue.pop_front() {
            let Some(entry) = self.get(current) else {
                continue;
            };
            for supertype in entry.supertypes.iter().filter(|s| s.kind == SupertypeKind::Extends) {
                if supertype.descriptor == *base {
                    return true;
                }
                if seen.insert(&supertype.descriptor) {
                    queue.push_back(&supertype.descriptor);
                }
            }
        }
        false
    }

    /// Expands child declarations into static edges.
    ///
    /// Interface parents become one edge per concrete implementer, and every
    /// type extending a declared child inherits the declaration.
    fn expand(&self, declarations: &[Declaration]) -> Vec<Relationship> {
        let mut edges: Vec<Relationship> = Vec::new();
        for declaration in declarations {
            let parents: Vec<TypePattern> = match &declaration.parent {
                TypePattern::Exact(parent) if self.is_interface(parent) => self
                    .implementers(parent, &[TypeKind::Root, TypeKind::Page])
                    .map(|e| TypePattern::Exact(e.descriptor.clone()))
                    .collect(),
                other => vec![other.clone()],
            };

            let mut children = vec![declaration.child.clone()];
            if let TypePattern::Exact(child) = &declaration.child {
                children.extend(
                    self.entries
                        .iter()
                        .filter(|e| matches!(e.kind, TypeKind::Root | TypeKind::Page))
                        .filter(|e| self.extends_transitively(&e.descriptor, child))
                        .map(|e| TypePattern::Exact(e.descriptor.clone())),
                );
            }

            for child in &children {
                for parent in &parents {
                    if !edges.iter().any(|e| e.same_link(child, parent)) {
                        edges.push(Relationship::new(child.clone(), parent.clone(), Origin::Static));
                    }
                }
            }
        }
        edges
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("entries", &self.entries)
            .field("edges", &self.edges)
            .finish()
    }
}

struct Draft {
    descriptor: TypeDescriptor,
    kind: Option<TypeKind>,
    supertypes: Vec<Supertype>,
    factory: Option<Factory>,
    self_caster: Option<Caster>,
}

struct Declaration {
    child: TypePattern,
    parent: TypePattern,
}

/// Startup registration of types and static relationships.
///
/// # Example
///
/// ```ignore
/// let catalog = Catalog::builder()
///     .root::<Shop>()
///     .child_of::<Cart, Shop>()
///     .child_of::<Checkout, Cart>()
///     .build()?;
/// ```
#[derive(Default)]
pub struct CatalogBuilder {
    drafts: Vec<Draft>,
    index: HashMap<TypeDescriptor, usize>,
    declarations: Vec<Declaration>,
    conflicts: Vec<String>,
}

impl CatalogBuilder {
    /// Registers a root (tab) type.
    pub fn root<R: TabObject + Default>(mut self) -> Self {
        let i = self.set_kind(TypeDescriptor::of::<R>(), TypeKind::Root);
        let draft = &mut self.drafts[i];
        draft.factory = Some(Factory::Root(Arc::new(|| {
            let root = Arc::new(R::default());
            let url = root.url();
            (root as Arc<dyn PageObject>, url)
        })));
        draft.self_caster = Some(self_caster::<R>());
        self
    }

    /// Registers a page type.
    pub fn page<P: PageObject + Default>(mut self) -> Self {
        let i = self.set_kind(TypeDescriptor::of::<P>(), TypeKind::Page);
        self.attach_page_factory::<P>(i);
        self
    }

    /// Registers a control type so it can be found through an interface.
    pub fn control<C: ControlObject + Default>(mut self) -> Self {
        let i = self.set_kind(TypeDescriptor::of::<C>(), TypeKind::Control);
        let draft = &mut self.drafts[i];
        draft.factory = Some(Factory::Control(Arc::new(|| {
            Arc::new(C::default()) as Arc<dyn ControlObject>
        })));
        draft.self_caster = Some(self_caster::<C>());
        self
    }

    /// Registers a type that is never instantiated.
    pub fn abstract_type<X: ?Sized + 'static>(mut self) -> Self {
        self.set_kind(TypeDescriptor::of::<X>(), TypeKind::Abstract);
        self
    }

    /// Registers an interface, normally a `dyn Trait`.
    pub fn interface<I: ?Sized + 'static>(mut self) -> Self {
        self.set_kind(TypeDescriptor::of::<I>(), TypeKind::Interface);
        self
    }

    /// Declares that `T` implements interface `I`; `cast` performs the upcast.
    pub fn implements<T, I, F>(mut self, cast: F) -> Self
    where
        T: Send + Sync + 'static,
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        let interface = TypeDescriptor::of::<I>();
        self.ensure_interface(interface.clone());
        let caster: Caster = Arc::new(move |erased: Erased| {
            let from = erased.downcast::<Arc<T>>().ok()?;
            Some(Box::new(cast(*from)) as Erased)
        });
        self.add_supertype(
            TypeDescriptor::of::<T>(),
            interface,
            SupertypeKind::Implements,
            Some(caster),
        );
        self
    }

    /// Declares that interface `I` extends interface `J`.
    pub fn interface_extends<I, J, F>(mut self, cast: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        J: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<I>) -> Arc<J> + Send + Sync + 'static,
    {
        let from = TypeDescriptor::of::<I>();
        let to = TypeDescriptor::of::<J>();
        self.ensure_interface(from.clone());
        self.ensure_interface(to.clone());
        let caster: Caster = Arc::new(move |erased: Erased| {
            let from = erased.downcast::<Arc<I>>().ok()?;
            Some(Box::new(cast(*from)) as Erased)
        });
        self.add_supertype(from, to, SupertypeKind::InterfaceExtends, Some(caster));
        self
    }

    /// Declares that `Derived` specializes `Base`.
    ///
    /// `Derived` inherits every parent `Base` declares, and counts as one
    /// hop further from `Base`'s interfaces when ranking candidates.
    pub fn extends<Derived: ?Sized + 'static, Base: ?Sized + 'static>(mut self) -> Self {
        self.add_supertype(
            TypeDescriptor::of::<Derived>(),
            TypeDescriptor::of::<Base>(),
            SupertypeKind::Extends,
            None,
        );
        self
    }

    /// Declares `C` a child of `P`.
    pub fn child_of<C: PageObject + Default, P: PageObject + Default>(mut self) -> Self {
        self.ensure_page::<C>();
        self.ensure_page::<P>();
        self.declarations.push(Declaration {
            child: TypePattern::exact::<C>(),
            parent: TypePattern::exact::<P>(),
        });
        self
    }

    /// Declares every instantiation of the generic type `W` a child of `P`.
    ///
    /// `W` is a witness instantiation such as `Item<()>`; its arguments are
    /// ignored.
    pub fn open_child_of<W: PageObject + Default, P: PageObject + Default>(mut self) -> Self {
        self.ensure_page::<P>();
        self.declarations.push(Declaration {
            child: TypePattern::open::<W>(),
            parent: TypePattern::exact::<P>(),
        });
        self
    }

    /// Declares `C` a child of every concrete page implementing `I`.
    pub fn child_of_interface<C: PageObject + Default, I: ?Sized + 'static>(mut self) -> Self {
        self.ensure_page::<C>();
        self.ensure_interface(TypeDescriptor::of::<I>());
        self.declarations.push(Declaration {
            child: TypePattern::exact::<C>(),
            parent: TypePattern::exact::<I>(),
        });
        self
    }

    /// Declares a relationship between arbitrary patterns.
    ///
    /// Edges whose parent is an open pattern are recorded but never
    /// traversed during resolution.
    pub fn child_of_pattern(mut self, child: TypePattern, parent: TypePattern) -> Self {
        self.declarations.push(Declaration { child, parent });
        self
    }

    /// Validates the registrations and expands declarations into edges.
    pub fn build(self) -> Result<Catalog> {
        let mut problems = self.conflicts;
        for draft in &self.drafts {
            if draft.kind.is_none() {
                problems.push(format!(
                    "'{}' is referenced but never registered",
                    draft.descriptor
                ));
            }
        }

        let kind_of = |d: &TypeDescriptor| self.index.get(d).and_then(|&i| self.drafts[i].kind);
        for declaration in &self.declarations {
            if let TypePattern::Exact(child) = &declaration.child {
                if child.is_trait_object()
                    || matches!(kind_of(child), Some(TypeKind::Abstract | TypeKind::Interface))
                {
                    problems.push(format!(
                        "'{}' declares a parent but must not be abstract nor an interface",
                        child
                    ));
                }
            }
            if let TypePattern::Exact(parent) = &declaration.parent {
                if kind_of(parent) == Some(TypeKind::Abstract) {
                    problems.push(format!("'{}' is abstract and cannot be a parent", parent));
                }
            }
        }
        if !problems.is_empty() {
            return Err(Error::InvalidOperation(problems.join("; ")));
        }

        let entries = self
            .drafts
            .into_iter()
            .enumerate()
            .map(|(order, draft)| TypeEntry {
                descriptor: draft.descriptor,
                kind: draft.kind.unwrap_or(TypeKind::Abstract),
                order,
                supertypes: draft.supertypes,
                factory: draft.factory,
                self_caster: draft.self_caster,
            })
            .collect();

        let mut catalog = Catalog {
            entries,
            index: self.index,
            edges: Vec::new(),
        };
        catalog.edges = catalog.expand(&self.declarations);
        tracing::debug!(
            types = catalog.entries.len(),
            edges = catalog.edges.len(),
            "Built page object catalog"
        );
        Ok(catalog)
    }

    fn draft_index(&mut self, descriptor: TypeDescriptor) -> usize {
        if let Some(&i) = self.index.get(&descriptor) {
            return i;
        }
        let i = self.drafts.len();
        self.index.insert(descriptor.clone(), i);
        self.drafts.push(Draft {
            descriptor,
            kind: None,
            supertypes: Vec::new(),
            factory: None,
            self_caster: None,
        });
        i
    }

    fn set_kind(&mut self, descriptor: TypeDescriptor, kind: TypeKind) -> usize {
        let i = self.draft_index(descriptor);
        let draft = &mut self.drafts[i];
        match draft.kind {
            None => draft.kind = Some(kind),
            Some(existing) if existing == kind => {}
            // a page promoted to root keeps its edges
            Some(TypeKind::Page) if kind == TypeKind::Root => draft.kind = Some(kind),
            Some(TypeKind::Root) if kind == TypeKind::Page => {}
            Some(existing) => self.conflicts.push(format!(
                "'{}' is registered both as {:?} and {:?}",
                draft.descriptor, existing, kind
            )),
        }
        i
    }

    fn ensure_page<P: PageObject + Default>(&mut self) {
        let i = self.draft_index(TypeDescriptor::of::<P>());
        if self.drafts[i].kind.is_none() {
            self.drafts[i].kind = Some(TypeKind::Page);
        }
        if self.drafts[i].kind == Some(TypeKind::Page) {
            self.attach_page_factory::<P>(i);
        }
    }

    fn attach_page_factory<P: PageObject + Default>(&mut self, i: usize) {
        let draft = &mut self.drafts[i];
        if draft.factory.is_none() {
            draft.factory = Some(Factory::Page(page_factory_of::<P>()));
            draft.self_caster = Some(self_caster::<P>());
        }
    }

    fn ensure_interface(&mut self, descriptor: TypeDescriptor) {
        let i = self.draft_index(descriptor);
        if self.drafts[i].kind.is_none() {
            self.drafts[i].kind = Some(TypeKind::Interface);
        }
    }

    fn add_supertype(
        &mut self,
        from: TypeDescriptor,
        to: TypeDescriptor,
        kind: SupertypeKind,
        caster: Option<Caster>,
    ) {
        let i = self.draft_index(from);
        let supertypes = &mut self.drafts[i].supertypes;
        if let Some(existing) = supertypes.iter_mut().find(|s| s.descriptor == to) {
            existing.caster = caster.or(existing.caster.take());
            return;
        }
        supertypes.push(Supertype {
            descriptor: to,
            kind,
            caster,
        });
    }
}

pub(crate) fn page_factory_of<P: PageObject + Default>() -> PageFactory {
    Arc::new(|| Arc::new(P::default()) as Arc<dyn PageObject>)
}

fn self_caster<T: Send + Sync + 'static>() -> Caster {
    Arc::new(|erased: Erased| {
        let any = erased.downcast::<Arc<dyn Any + Send + Sync>>().ok()?;
        let typed = (*any).downcast::<T>().ok()?;
        Some(Box::new(typed) as Erased)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Node, UiObject};

    #[derive(Default)]
    struct Home {
        node: Node,
    }
    #[derive(Default)]
    struct Menu {
        node: Node,
    }
    #[derive(Default)]
    struct Base {
        node: Node,
    }

    crate::impl_ui_object!(Home, Menu, Base);
    impl PageObject for Home {}
    impl TabObject for Home {}
    impl PageObject for Menu {}
    impl PageObject for Base {}

    trait Navigation: PageObject {}
    impl Navigation for Menu {}

    #[test]
    fn test_build_collects_edges_in_declaration_order() {
        let catalog = Catalog::builder()
            .root::<Home>()
            .child_of::<Menu, Home>()
            .build()
            .expect("catalog");

        assert_eq!(catalog.kind_of(&TypeDescriptor::of::<Home>()), Some(TypeKind::Root));
        assert_eq!(catalog.kind_of(&TypeDescriptor::of::<Menu>()), Some(TypeKind::Page));
        assert_eq!(catalog.static_edges().len(), 1);
        assert_eq!(catalog.static_edges()[0].origin, Origin::Static);
    }

    #[test]
    fn test_child_marker_on_abstract_type_is_rejected() {
        let result = Catalog::builder()
            .root::<Home>()
            .abstract_type::<Base>()
            .child_of::<Base, Home>()
            .build();
        match result {
            Err(Error::InvalidOperation(message)) => assert!(message.contains("Base")),
            other => panic!("expected invalid operation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_child_marker_on_interface_is_rejected() {
        let result = Catalog::builder()
            .root::<Home>()
            .child_of_pattern(
                TypePattern::exact::<dyn Navigation>(),
                TypePattern::exact::<Home>(),
            )
            .build();
        assert!(matches!(result, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_unregistered_reference_is_rejected() {
        let result = Catalog::builder().extends::<Menu, Base>().build();
        assert!(matches!(result, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_cast_through_interface() {
        let catalog = Catalog::builder()
            .page::<Menu>()
            .implements::<Menu, dyn Navigation, _>(|m| m)
            .build()
            .expect("catalog");

        let menu: Arc<dyn Any + Send + Sync> = Arc::new(Menu::default());
        let cast = catalog.cast::<dyn Navigation>(&TypeDescriptor::of::<Menu>(), menu);
        assert!(cast.is_some());
        assert_eq!(
            catalog.distance(&TypeDescriptor::of::<Menu>(), &TypeDescriptor::of::<dyn Navigation>()),
            Some(1)
        );
    }
}
