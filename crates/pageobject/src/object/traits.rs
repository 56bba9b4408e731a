// Object traits - what pages, tabs and controls provide to the engine

use super::by::By;
use super::node::Node;
use crate::error::Result;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Downcasting support, implemented for every `Send + Sync` type.
///
/// Lets the engine recover concrete types from `Arc<dyn PageObject>` and
/// `Arc<dyn UiObject>`.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Anything placed in an object tree.
///
/// Implementors own a [`Node`] and hand it out; the engine binds it when
/// the object is resolved or found.
pub trait UiObject: AsAny {
    fn node(&self) -> &Node;
}

/// A page object: a singleton node of the relationship graph.
#[async_trait]
pub trait PageObject: UiObject {
    /// Search pattern scoping this page under its parent.
    ///
    /// `None` makes the page share its parent's locator.
    fn search_pattern(&self) -> Option<By> {
        None
    }

    /// Marks a page living inside an iframe matched by its search pattern.
    ///
    /// Children of a frame page locate inside the iframe's document.
    fn is_frame(&self) -> bool {
        false
    }

    /// Default condition used to pick among several paths to this type.
    ///
    /// Evaluated after the object is bound, so it may inspect its parents.
    fn on_condition(&self) -> bool {
        true
    }

    /// Navigation hook run by `goto`, e.g. clicking a menu entry.
    async fn navigate(&self) -> Result<()> {
        Ok(())
    }
}

/// A root page owning a browser tab.
pub trait TabObject: PageObject {
    /// Url opened when the scope opens.
    fn url(&self) -> Option<String> {
        None
    }
}

/// A positional leaf object; found fresh on every lookup, never cached.
pub trait ControlObject: UiObject {
    fn search_pattern(&self) -> By;

    /// Marks a control wrapping an iframe; see [`PageObject::is_frame`].
    fn is_frame(&self) -> bool {
        false
    }
}
