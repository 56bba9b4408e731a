// Navigation from any object in a tree
//
// Blanket extension over every UiObject: resolve pages through the owning
// root scope, find controls positioned under this object, and wait on it.

use super::by::By;
use super::locator::Locator;
use super::traits::{ControlObject, PageObject, UiObject};
use crate::assertions::Expectation;
use crate::error::{Error, Result};
use crate::scope::RootScope;
use futures_util::future::BoxFuture;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;

pub trait UiObjectExt: UiObject {
    /// The root scope owning this object.
    fn scope(&self) -> Result<RootScope> {
        self.node().scope()
    }

    fn parent(&self) -> Option<Arc<dyn UiObject>> {
        self.node().parent()
    }

    fn parent_as<T: UiObject>(&self) -> Option<Arc<T>> {
        self.node().parent_as::<T>()
    }

    fn locator(&self) -> Result<Locator> {
        self.node().locator()
    }

    /// The iframe element of a frame page or control.
    fn frame_element(&self) -> Result<Locator> {
        self.node().frame_element()
    }

    /// Resolves page `P` from this object's root scope.
    fn on<P: PageObject + Default>(&self) -> Result<Arc<P>> {
        self.scope()?.on::<P>()
    }

    fn on_where<P, F>(&self, condition: F) -> Result<Arc<P>>
    where
        P: PageObject + Default,
        F: Fn(&P) -> bool,
    {
        self.scope()?.on_where::<P, F>(condition)
    }

    fn on_interface<I>(&self) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.scope()?.on_interface::<I>()
    }

    fn on_interface_where<I, F>(&self, condition: F) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&I) -> bool,
    {
        self.scope()?.on_interface_where::<I, F>(condition)
    }

    /// Resolves page `P` and runs its navigation hook.
    fn goto<P: PageObject + Default>(&self) -> BoxFuture<'static, Result<Arc<P>>> {
        let scope = self.scope();
        Box::pin(async move { scope?.goto::<P>().await })
    }

    fn goto_where<P, F>(&self, condition: F) -> BoxFuture<'static, Result<Arc<P>>>
    where
        P: PageObject + Default,
        F: Fn(&P) -> bool + Send + 'static,
    {
        let scope = self.scope();
        Box::pin(async move { scope?.goto_where::<P, F>(condition).await })
    }

    /// A fresh control `C` under this object, using its default search pattern.
    fn find<C: ControlObject + Default>(&self) -> Result<Arc<C>> {
        let parent = self.node().this()?;
        self.scope()?.find_control::<C>(parent, None, 0)
    }

    /// A fresh control `C` under this object matching `pattern`.
    fn find_by<C: ControlObject + Default>(&self, pattern: impl Into<By>) -> Result<Arc<C>> {
        let parent = self.node().this()?;
        self.scope()?
            .find_control::<C>(parent, Some(pattern.into()), 0)
    }

    /// A fresh control resolved through interface `I`.
    fn find_interface<I>(&self) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let parent = self.node().this()?;
        self.scope()?.find_interface_control::<I>(parent, None)
    }

    fn find_interface_by<I>(&self, pattern: impl Into<By>) -> Result<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let parent = self.node().this()?;
        self.scope()?
            .find_interface_control::<I>(parent, Some(pattern.into()))
    }

    /// Every match of `C` under this object, by increasing index.
    ///
    /// The stream ends at the first index with no match. Each call starts
    /// over from index 0.
    fn find_all<C: ControlObject + Default>(&self) -> BoxStream<'static, Result<Arc<C>>> {
        find_all_under::<C>(self.node().this(), self.scope(), None)
    }

    fn find_all_by<C: ControlObject + Default>(
        &self,
        pattern: impl Into<By>,
    ) -> BoxStream<'static, Result<Arc<C>>> {
        find_all_under::<C>(self.node().this(), self.scope(), Some(pattern.into()))
    }

    /// Auto-retrying expectation on this object, using the scope's wait settings.
    fn expect(&self) -> Result<Expectation> {
        let scope = self.scope()?;
        let configuration = scope.configuration();
        Ok(Expectation::new(self.locator()?)
            .with_timeout(configuration.wait_timeout())
            .with_poll_interval(configuration.poll_interval()))
    }
}

impl<T: UiObject + ?Sized> UiObjectExt for T {}

fn find_all_under<C: ControlObject + Default>(
    parent: Result<Arc<dyn UiObject>>,
    scope: Result<RootScope>,
    pattern: Option<By>,
) -> BoxStream<'static, Result<Arc<C>>> {
    let (parent, scope) = match (parent, scope) {
        (Ok(parent), Ok(scope)) => (parent, scope),
        (Err(e), _) | (_, Err(e)) => return stream::once(async move { Err::<Arc<C>, Error>(e) }).boxed(),
    };

    stream::unfold(Some(0usize), move |next| {
        let parent = Arc::clone(&parent);
        let scope = scope.clone();
        let pattern = pattern.clone();
        async move {
            let index = next?;
            let control = match scope.find_control::<C>(parent, pattern, index) {
                Ok(control) => control,
                Err(e) => return Some((Err(e), None)),
            };
            let count = match control.node().locator() {
                Ok(locator) => locator.count().await,
                Err(e) => Err(e),
            };
            match count {
                Ok(0) => None,
                Ok(_) => Some((Ok(control), Some(index + 1))),
                Err(e) => Some((Err(e), None)),
            }
        }
    })
    .boxed()
}
