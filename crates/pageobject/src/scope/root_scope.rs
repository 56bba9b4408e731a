// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Root scope - one browser tab, one dynamic overlay, one instance cache
//
// Lifecycle: Unopened -> Opening -> Open -> Closed.
//
// - Resolution (`on`) is pure and allowed before the scope opens
// - Anything reaching the browser needs the session, created lazily by
//   `open()` (or implicitly by `goto`)
// - After `close()` every operation fails with ScopeNotReady
//
// Casting produces a sibling scope of another root type sharing the same
// session handle, with its own overlay, cache and statistics.

use super::cache::InstanceCache;
use super::session::{Session, SessionFactory, SessionHandle};
use crate::api::{Configuration, Statistics, StatisticsSnapshot};
use crate::error::{Error, Result};
use crate::graph::{
    Catalog, DynamicOverlay, InterfaceResolver, PageObjectTree, RelationshipGraph,
    ResolutionPath, TypeDescriptor, TypeKind,
};
use crate::object::{Binding, PageObject, TabObject, UiObject};
use futures_util::future::BoxFuture;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lifecycle state of a root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeState {
    Unopened,
    Opening,
    Open,
    Closed,
}

impl fmt::Display for ScopeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeState::Unopened => "unopened",
            ScopeState::Opening => "opening",
            ScopeState::Open => "open",
            ScopeState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// How a root scope obtains its session, plus its configuration.
#[derive(Clone, Default)]
pub struct ScopeOptions {
    session_factory: Option<SessionFactory>,
    session: Option<Arc<dyn Session>>,
    configuration: Configuration,
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Async factory creating the session on first open.
    pub fn session_factory<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn Session>>> + Send + 'static,
    {
        self.session_factory = Some(Arc::new(move || {
            Box::pin(factory()) as BoxFuture<'static, Result<Arc<dyn Session>>>
        }));
        self
    }

    /// An already created session; the scope starts out open.
    pub fn session(mut self, session: Arc<dyn Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }
}

impl fmt::Debug for ScopeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeOptions")
            .field("session_factory", &self.session_factory.is_some())
            .field("session", &self.session.is_some())
            .field("configuration", &self.configuration)
            .finish()
    }
}

pub(crate) struct ScopeInner {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) root: Arc<dyn PageObject>,
    pub(crate) root_descriptor: TypeDescriptor,
    url: Option<String>,
    pub(crate) session: Arc<SessionHandle>,
    opened: OnceCell<()>,
    state: Mutex<ScopeState>,
    pub(crate) overlay: RwLock<DynamicOverlay>,
    pub(crate) cache: InstanceCache,
    pub(crate) statistics: Statistics,
    configuration: Configuration,
}

/// Handle to a root scope. Clones share the same scope.
#[derive(Clone)]
pub struct RootScope {
    pub(crate) inner: Arc<ScopeInner>,
}

impl RootScope {
    pub(crate) fn from_inner(inner: Arc<ScopeInner>) -> Self {
        Self { inner }
    }

    /// Creates a scope around an existing root object and binds the root's node.
    fn attach(
        catalog: Arc<Catalog>,
        root: Arc<dyn PageObject>,
        root_descriptor: TypeDescriptor,
        url: Option<String>,
        session: Arc<SessionHandle>,
        configuration: Configuration,
    ) -> Result<Self> {
        let url = configuration.url.clone().or(url);
        let opened = if session.get().is_some() {
            OnceCell::new_with(Some(()))
        } else {
            OnceCell::new()
        };
        let state = if opened.initialized() {
            ScopeState::Open
        } else {
            ScopeState::Unopened
        };

        let inner = Arc::new(ScopeInner {
            catalog,
            root: Arc::clone(&root),
            root_descriptor: root_descriptor.clone(),
            url,
            session,
            opened,
            state: Mutex::new(state),
            overlay: RwLock::new(DynamicOverlay::default()),
            cache: InstanceCache::new(),
            statistics: Statistics::default(),
            configuration,
        });

        let this: Arc<dyn UiObject> = root.clone();
        root.node().bind(Binding {
            scope: Arc::downgrade(&inner),
            parent: None,
            this: Arc::downgrade(&this),
            search: None,
            index: 0,
            frame: false,
            descriptor: root_descriptor.clone(),
        })?;
        tracing::debug!(root = %root_descriptor, state = %state, "Created root scope");
        Ok(Self { inner })
    }

    fn from_options(
        catalog: Arc<Catalog>,
        root: Arc<dyn PageObject>,
        root_descriptor: TypeDescriptor,
        url: Option<String>,
        options: ScopeOptions,
    ) -> Result<Self> {
        let session = Arc::new(SessionHandle::new(options.session_factory, options.session));
        Self::attach(catalog, root, root_descriptor, url, session, options.configuration)
    }

    /// Creates a scope for the first root type assignable to `I`.
    ///
    /// `I` may be a concrete root type or an interface implemented by
    /// registered roots.
    pub fn resolve<I: ?Sized + 'static>(catalog: Arc<Catalog>, options: ScopeOptions) -> Result<Self> {
        let requested = TypeDescriptor::of::<I>();
        let descriptor = InterfaceResolver::new(&catalog)
            .resolve(&requested, &[TypeKind::Root], |_| true)
            .ok_or_else(|| Error::TabObjectNotFound {
                requested: requested.clone(),
            })?;
        let factory = catalog
            .root_factory(&descriptor)
            .ok_or(Error::TabObjectNotFound { requested })?;
        let (root, url) = factory();
        Self::from_options(catalog, root, descriptor, url, options)
    }

    pub fn state(&self) -> ScopeState {
        if self.inner.session.is_closed() {
            return ScopeState::Closed;
        }
        *self.inner.state.lock()
    }

    pub fn is_open(&self) -> bool {
        self.state() == ScopeState::Open
    }

    pub(crate) fn ensure_not_closed(&self) -> Result<()> {
        match self.state() {
            ScopeState::Closed => Err(Error::ScopeNotReady {
                state: ScopeState::Closed,
            }),
            _ => Ok(()),
        }
    }

    /// Opens the scope: creates the session at most once and navigates to the url.
    ///
    /// Idempotent once open. Concurrent callers share one in-flight opening.
    pub async fn open(&self) -> Result<()> {
        self.ensure_not_closed()?;
        {
            let mut state = self.inner.state.lock();
            if *state == ScopeState::Unopened {
                *state = ScopeState::Opening;
            }
        }

        let result = self
            .inner
            .opened
            .get_or_try_init(|| async {
                let session = self.inner.session.get_or_create().await?;
                if let Some(url) = &self.inner.url {
                    tracing::debug!(url = %url, "Navigating root scope");
                    session.goto(url).await?;
                }
                Ok::<(), Error>(())
            })
            .await;

        let mut state = self.inner.state.lock();
        match result {
            Ok(_) => {
                if *state != ScopeState::Closed {
                    *state = ScopeState::Open;
                }
                Ok(())
            }
            Err(e) => {
                if *state == ScopeState::Opening {
                    *state = ScopeState::Unopened;
                }
                tracing::warn!(error = %e, "Failed to open root scope");
                Err(e)
            }
        }
    }

    /// Closes the scope and releases the session shared with any casts.
    pub async fn close(&self) -> Result<()> {
        *self.inner.state.lock() = ScopeState::Closed;
        self.inner.cache.clear();
        self.inner.session.close().await
    }

    /// The session, if the scope is open.
    pub fn session(&self) -> Result<Arc<dyn Session>> {
        self.ensure_not_closed()?;
        self.inner.session.get().ok_or(Error::ScopeNotReady {
            state: self.state(),
        })
    }

    /// Number of times the shared session factory ran.
    pub fn session_creations(&self) -> usize {
        self.inner.session.creations()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.inner.configuration
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.inner.catalog
    }

    pub fn root_descriptor(&self) -> &TypeDescriptor {
        &self.inner.root_descriptor
    }

    /// The root object.
    pub fn root(&self) -> Arc<dyn PageObject> {
        Arc::clone(&self.inner.root)
    }

    /// The root object cast to `I` along catalog supertypes.
    pub fn root_as<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<I>> {
        self.inner
            .catalog
            .cast::<I>(&self.inner.root_descriptor, self.root().into_any_arc())
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        self.inner.statistics.snapshot()
    }

    // ========================================================================
    // Casting
    // ========================================================================

    /// A sibling scope rooted at `R2`, sharing this scope's session.
    pub fn cast<R2: TabObject + Default>(&self) -> Result<Tab<R2>> {
        self.ensure_not_closed()?;
        let root = Arc::new(R2::default());
        let url = root.url();
        let scope = Self::attach(
            Arc::clone(&self.inner.catalog),
            root.clone(),
            TypeDescriptor::of::<R2>(),
            url,
            Arc::clone(&self.inner.session),
            self.inner.configuration.clone(),
        )?;
        tracing::debug!(from = %self.inner.root_descriptor, to = %scope.inner.root_descriptor, "Cast root scope");
        Ok(Tab { scope, root })
    }

    /// A sibling scope rooted at a registered root type named by descriptor.
    pub fn cast_to(&self, descriptor: &TypeDescriptor) -> Result<RootScope> {
        self.ensure_not_closed()?;
        let factory = self
            .inner
            .catalog
            .root_factory(descriptor)
            .ok_or_else(|| Error::TabObjectNotFound {
                requested: descriptor.clone(),
            })?;
        let (root, url) = factory();
        Self::attach(
            Arc::clone(&self.inner.catalog),
            root,
            descriptor.clone(),
            url,
            Arc::clone(&self.inner.session),
            self.inner.configuration.clone(),
        )
    }

    // ========================================================================
    // Cache introspection
    // ========================================================================

    /// Distinct cached objects resolved in this scope.
    pub fn cache_object_count(&self) -> usize {
        self.inner.cache.object_count()
    }

    /// Distinct types among cached objects.
    pub fn cache_type_count(&self) -> usize {
        self.inner.cache.type_count()
    }

    pub fn cached_paths(&self) -> Vec<ResolutionPath> {
        self.inner.cache.resolved_paths()
    }

    /// Drops every cached object whose path passes through `T`.
    pub fn unregister<T: ?Sized + 'static>(&self) -> usize {
        self.unregister_type(&TypeDescriptor::of::<T>())
    }

    pub fn unregister_type(&self, descriptor: &TypeDescriptor) -> usize {
        let removed = self.inner.cache.unregister(descriptor);
        tracing::debug!(descriptor = %descriptor, removed, "Unregistered cached objects");
        removed
    }

    pub fn clear(&self) {
        self.inner.cache.clear();
    }

    /// The graph reachable from this scope's root.
    pub fn tree(&self) -> PageObjectTree {
        let overlay = self.inner.overlay.read().clone();
        let graph = RelationshipGraph::new(self.inner.catalog.static_edges(), overlay.edges());
        PageObjectTree::from_graph(&graph, &self.inner.root_descriptor)
    }
}

impl fmt::Debug for RootScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootScope")
            .field("root", &self.inner.root_descriptor)
            .field("state", &self.state())
            .finish()
    }
}

/// A root scope with its typed root object.
///
/// Dereferences to [`RootScope`], so resolution reads `tab.on::<Page>()`.
pub struct Tab<R> {
    scope: RootScope,
    root: Arc<R>,
}

impl<R: TabObject + Default> Tab<R> {
    pub fn new(catalog: Arc<Catalog>, options: ScopeOptions) -> Result<Self> {
        let root = Arc::new(R::default());
        let url = root.url();
        let scope = RootScope::from_options(
            catalog,
            root.clone(),
            TypeDescriptor::of::<R>(),
            url,
            options,
        )?;
        Ok(Self { scope, root })
    }

    /// A tab on the installed global catalog.
    pub fn with_global_catalog(options: ScopeOptions) -> Result<Self> {
        let catalog = Catalog::global().ok_or_else(|| {
            Error::InvalidOperation("no global catalog is installed".to_string())
        })?;
        Self::new(catalog, options)
    }

    /// Opens the scope and runs the root's navigation hook.
    pub async fn goto_root(&self) -> Result<Arc<R>> {
        self.scope.open().await?;
        self.scope.inner.statistics.record_navigation();
        self.root.navigate().await?;
        Ok(Arc::clone(&self.root))
    }
}

impl<R> Tab<R> {
    pub fn root(&self) -> &Arc<R> {
        &self.root
    }

    pub fn scope(&self) -> &RootScope {
        &self.scope
    }

    pub fn into_scope(self) -> RootScope {
        self.scope
    }
}

impl<R> Clone for Tab<R> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            root: Arc::clone(&self.root),
        }
    }
}

impl<R> Deref for Tab<R> {
    type Target = RootScope;

    fn deref(&self) -> &RootScope {
        &self.scope
    }
}

impl<R> fmt::Debug for Tab<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab").field("scope", &self.scope).finish()
    }
}
