// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Resolution engine
//
// `on::<T>()` turns a request into a cached, parented instance:
// 1. Candidates: T itself when concrete, otherwise the ranked concrete
//    implementers reachable from the root (InterfaceResolver)
// 2. Paths: every simple path root -> candidate over static + dynamic edges,
//    shortest first
// 3. Each path is materialized hop by hop through the instance cache and
//    the target's condition is evaluated; the first accepted path wins
// 4. Nothing accepted: PageObjectNotFound for T
//
// Resolution never suspends. Controls bypass the graph: `find` constructs a
// fresh instance under its caller on every call.

use super::root_scope::RootScope;
use crate::error::{Error, Result};
use crate::graph::{
    page_factory_of, DynamicOverlay, InterfaceResolver, Origin, PageFactory, Relationship,
    RelationshipGraph, ResolutionPath, TypeDescriptor, TypeKind, TypePattern,
};
use crate::object::{Binding, By, ControlObject, PageObject, UiObject};
use std::sync::Arc;

impl RootScope {
    // ========================================================================
    // Page resolution
    // ========================================================================

    /// Resolves page `T`, using its own `on_condition` to pick a path.
    pub fn on<T: PageObject + Default>(&self) -> Result<Arc<T>> {
        self.resolve_page::<T, fn(&T) -> bool>(None)
    }

    /// Resolves page `T` on the first path whose instance satisfies `condition`.
    pub fn on_where<T, F>(&self, condition: F) -> Result<Arc<T>>
    where
        T: PageObject + Default,
        F: Fn(&T) -> bool,
    {
        self.resolve_page::<T, F>(Some(condition))
    }

    /// Resolves interface `I` to the closest reachable implementer.
    pub fn on_interface<I>(&self) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve_interface::<I, fn(&I) -> bool>(None)
            .map(|(object, _)| object)
    }

    pub fn on_interface_where<I, F>(&self, condition: F) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&I) -> bool,
    {
        self.resolve_interface::<I, F>(Some(condition))
            .map(|(object, _)| object)
    }

    /// Opens the scope if needed, resolves `T` and runs its navigation hook.
    pub async fn goto<T: PageObject + Default>(&self) -> Result<Arc<T>> {
        self.open().await?;
        let page = self.on::<T>()?;
        self.navigate(&*page).await?;
        Ok(page)
    }

    pub async fn goto_where<T, F>(&self, condition: F) -> Result<Arc<T>>
    where
        T: PageObject + Default,
        F: Fn(&T) -> bool + Send,
    {
        self.open().await?;
        let page = self.on_where::<T, F>(condition)?;
        self.navigate(&*page).await?;
        Ok(page)
    }

    pub async fn goto_interface<I>(&self) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.open().await?;
        let (object, page) = self.resolve_interface::<I, fn(&I) -> bool>(None)?;
        self.navigate(&*page).await?;
        Ok(object)
    }

    async fn navigate(&self, page: &dyn PageObject) -> Result<()> {
        self.inner.statistics.record_navigation();
        tracing::debug!(page = ?page.node().descriptor(), "Running navigation hook");
        page.navigate().await
    }

    fn resolve_page<T, F>(&self, condition: Option<F>) -> Result<Arc<T>>
    where
        T: PageObject + Default,
        F: Fn(&T) -> bool,
    {
        let requested = TypeDescriptor::of::<T>();
        let factory = page_factory_of::<T>();
        self.resolve_with(&requested, Some(factory), &|_, object| {
            let typed = Arc::clone(object).into_any_arc().downcast::<T>().ok()?;
            let accepted = match &condition {
                Some(condition) => condition(&*typed),
                None => typed.on_condition(),
            };
            accepted.then_some(typed)
        })
    }

    fn resolve_interface<I, F>(&self, condition: Option<F>) -> Result<(Arc<I>, Arc<dyn PageObject>)>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&I) -> bool,
    {
        let requested = TypeDescriptor::of::<I>();
        let catalog = Arc::clone(&self.inner.catalog);
        self.resolve_with(&requested, None, &|candidate, object| {
            let cast = catalog.cast::<I>(candidate, Arc::clone(object).into_any_arc())?;
            let accepted = match &condition {
                Some(condition) => condition(&*cast),
                None => object.on_condition(),
            };
            accepted.then(|| (cast, Arc::clone(object)))
        })
    }

    /// Core loop shared by typed and interface requests.
    ///
    /// `own_factory` marks a concrete request: the requested type is the only
    /// candidate and is built with its own constructor. `select` casts the
    /// materialized object and evaluates the condition.
    fn resolve_with<O>(
        &self,
        requested: &TypeDescriptor,
        own_factory: Option<PageFactory>,
        select: &dyn Fn(&TypeDescriptor, &Arc<dyn PageObject>) -> Option<O>,
    ) -> Result<O> {
        self.ensure_not_closed()?;
        self.inner.statistics.record_resolution();

        let overlay = self.inner.overlay.read().clone();
        let graph = RelationshipGraph::new(self.inner.catalog.static_edges(), overlay.edges());
        let root = &self.inner.root_descriptor;

        let candidates: Vec<TypeDescriptor> = if own_factory.is_some() {
            vec![requested.clone()]
        } else {
            let reachable = graph.reachable(root);
            InterfaceResolver::new(&self.inner.catalog)
                .candidates(requested, &[TypeKind::Root, TypeKind::Page], |d| {
                    reachable.contains(d)
                })
                .into_iter()
                .map(|c| c.descriptor)
                .collect()
        };

        for candidate in &candidates {
            for path in graph.paths(root, candidate) {
                let object = match self.materialize(&path, &overlay, own_factory.as_ref()) {
                    Ok(object) => object,
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "Skipping unmaterializable path");
                        continue;
                    }
                };
                match select(candidate, &object) {
                    Some(selected) => {
                        self.inner.cache.mark_resolved(&path);
                        tracing::debug!(requested = %requested, path = %path, "Resolved page object");
                        return Ok(selected);
                    }
                    None => {
                        tracing::debug!(requested = %requested, path = %path, "Condition rejected path");
                    }
                }
            }
        }

        self.inner.statistics.record_not_found();
        tracing::debug!(requested = %requested, root = %root, "Page object not found");
        Err(Error::PageObjectNotFound {
            requested: requested.clone(),
        })
    }

    /// Materializes `path` hop by hop, reusing cached prefixes.
    fn materialize(
        &self,
        path: &ResolutionPath,
        overlay: &DynamicOverlay,
        target_factory: Option<&PageFactory>,
    ) -> Result<Arc<dyn PageObject>> {
        let descriptors = path.descriptors();
        let cache = &self.inner.cache;
        if descriptors.len() == 1 {
            let (root, _) = cache.get_or_insert_with(path, || Ok(Arc::clone(&self.inner.root)))?;
            return Ok(root);
        }

        let mut parent = Arc::clone(&self.inner.root);
        for depth in 2..=descriptors.len() {
            let prefix = path.prefix(depth);
            let descriptor = &descriptors[depth - 1];
            let is_target = depth == descriptors.len();
            let (object, created) = cache.get_or_insert_with(&prefix, || {
                let factory = match target_factory {
                    Some(factory) if is_target => Arc::clone(factory),
                    _ => self.page_factory(descriptor, overlay)?,
                };
                let object = factory();
                let search = object.search_pattern();
                let frame = object.is_frame();
                let ui: Arc<dyn UiObject> = object.clone();
                let parent: Arc<dyn UiObject> = parent.clone();
                self.bind(&ui, Some(parent), search, 0, frame, descriptor)?;
                Ok(object)
            })?;
            if created {
                self.inner.statistics.record_materialization();
                tracing::debug!(path = %prefix, "Materialized page object");
            } else {
                self.inner.statistics.record_cache_hit();
            }
            parent = object;
        }
        Ok(parent)
    }

    fn page_factory(&self, descriptor: &TypeDescriptor, overlay: &DynamicOverlay) -> Result<PageFactory> {
        overlay
            .factory(descriptor)
            .or_else(|| self.inner.catalog.page_factory(descriptor))
            .ok_or_else(|| {
                Error::InvalidOperation(format!("no constructor registered for '{}'", descriptor))
            })
    }

    fn bind(
        &self,
        object: &Arc<dyn UiObject>,
        parent: Option<Arc<dyn UiObject>>,
        search: Option<By>,
        index: usize,
        frame: bool,
        descriptor: &TypeDescriptor,
    ) -> Result<()> {
        object.node().bind(Binding {
            scope: Arc::downgrade(&self.inner),
            parent,
            this: Arc::downgrade(object),
            search,
            index,
            frame,
            descriptor: descriptor.clone(),
        })
    }

    // ========================================================================
    // Dynamic registration
    // ========================================================================

    /// Declares `C` a child of `P` in this scope only.
    ///
    /// Returns false if the exact link already exists, statically or
    /// dynamically. Abstract and interface types are rejected.
    pub fn register_child<C, P>(&self) -> Result<bool>
    where
        C: PageObject + Default,
        P: PageObject + Default,
    {
        let child = TypeDescriptor::of::<C>();
        let parent = TypeDescriptor::of::<P>();
        self.check_relatable(&child)?;
        self.check_relatable(&parent)?;
        self.add_dynamic_edge(
            child.clone(),
            parent.clone(),
            vec![(child, page_factory_of::<C>()), (parent, page_factory_of::<P>())],
        )
    }

    /// Declares a link between types named by descriptor.
    ///
    /// Both types must be constructible: registered page types in the
    /// catalog, or types already registered in this scope.
    pub fn register_child_types(&self, child: &TypeDescriptor, parent: &TypeDescriptor) -> Result<bool> {
        self.check_relatable(child)?;
        self.check_relatable(parent)?;
        let overlay = self.inner.overlay.read().clone();
        for descriptor in [child, parent] {
            let known = *descriptor == self.inner.root_descriptor
                || overlay.factory(descriptor).is_some()
                || self.inner.catalog.page_factory(descriptor).is_some();
            if !known {
                return Err(Error::InvalidOperation(format!(
                    "'{}' is not a registered page type",
                    descriptor
                )));
            }
        }
        self.add_dynamic_edge(child.clone(), parent.clone(), Vec::new())
    }

    fn check_relatable(&self, descriptor: &TypeDescriptor) -> Result<()> {
        if self.inner.catalog.is_relatable(descriptor) {
            Ok(())
        } else {
            Err(Error::InvalidOperation(format!(
                "'{}' must not be abstract nor an interface",
                descriptor
            )))
        }
    }

    fn add_dynamic_edge(
        &self,
        child: TypeDescriptor,
        parent: TypeDescriptor,
        factories: Vec<(TypeDescriptor, PageFactory)>,
    ) -> Result<bool> {
        self.ensure_not_closed()?;
        let child_pattern = TypePattern::Exact(child);
        let parent_pattern = TypePattern::Exact(parent);

        let mut overlay = self.inner.overlay.write();
        for (descriptor, factory) in factories {
            overlay.add_factory(descriptor, factory);
        }
        let exists = RelationshipGraph::new(self.inner.catalog.static_edges(), overlay.edges())
            .contains(&child_pattern, &parent_pattern);
        if !exists {
            tracing::debug!(child = %child_pattern, parent = %parent_pattern, "Registered child relationship");
            overlay.push_edge(Relationship::new(child_pattern, parent_pattern, Origin::Dynamic));
        }
        Ok(!exists)
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// A fresh control `C` under `parent`, never cached.
    pub(crate) fn find_control<C: ControlObject + Default>(
        &self,
        parent: Arc<dyn UiObject>,
        pattern: Option<By>,
        index: usize,
    ) -> Result<Arc<C>> {
        self.ensure_not_closed()?;
        let control = Arc::new(C::default());
        let search = pattern.unwrap_or_else(|| control.search_pattern());
        let ui: Arc<dyn UiObject> = control.clone();
        let descriptor = TypeDescriptor::of::<C>();
        self.bind(&ui, Some(parent), Some(search), index, control.is_frame(), &descriptor)?;
        self.inner.statistics.record_find();
        Ok(control)
    }

    /// A fresh control resolved through interface `I` over every registered control.
    pub(crate) fn find_interface_control<I>(
        &self,
        parent: Arc<dyn UiObject>,
        pattern: Option<By>,
    ) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.ensure_not_closed()?;
        let requested = TypeDescriptor::of::<I>();
        let catalog = &self.inner.catalog;
        let candidates =
            InterfaceResolver::new(catalog).candidates(&requested, &[TypeKind::Control], |_| true);

        for candidate in candidates {
            let Some(factory) = catalog.control_factory(&candidate.descriptor) else {
                continue;
            };
            let control = factory();
            let search = pattern.clone().unwrap_or_else(|| control.search_pattern());
            let frame = control.is_frame();
            let ui: Arc<dyn UiObject> = control.clone();
            self.bind(&ui, Some(Arc::clone(&parent)), Some(search), 0, frame, &candidate.descriptor)?;
            if let Some(cast) = catalog.cast::<I>(&candidate.descriptor, control.into_any_arc()) {
                self.inner.statistics.record_find();
                tracing::debug!(requested = %requested, found = %candidate.descriptor, "Found control");
                return Ok(cast);
            }
        }

        self.inner.statistics.record_not_found();
        Err(Error::PageObjectNotFound { requested })
    }
}
