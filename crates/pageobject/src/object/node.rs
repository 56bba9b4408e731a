// Node - an object's place in its tree
//
// Every page and control owns a Node. The engine binds it exactly once,
// when the object is materialized: scope, parent, search pattern, index
// and descriptor never change afterwards. Parents are strong references
// (children keep their ancestry alive); the scope is weak so cached
// objects never keep a dropped scope alive.

use super::by::By;
use super::locator::Locator;
use super::traits::UiObject;
use crate::error::{Error, Result};
use crate::graph::TypeDescriptor;
use crate::scope::{RootScope, ScopeInner};
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

pub(crate) struct Binding {
    pub(crate) scope: Weak<ScopeInner>,
    pub(crate) parent: Option<Arc<dyn UiObject>>,
    pub(crate) this: Weak<dyn UiObject>,
    pub(crate) search: Option<By>,
    pub(crate) index: usize,
    pub(crate) frame: bool,
    pub(crate) descriptor: TypeDescriptor,
}

impl Binding {
    fn frame_search(&self) -> Result<&By> {
        if !self.frame {
            return Err(Error::InvalidOperation(format!(
                "'{}' is not a frame object",
                self.descriptor
            )));
        }
        self.search.as_ref().ok_or_else(|| {
            Error::InvalidOperation(format!(
                "frame object '{}' needs a search pattern",
                self.descriptor
            ))
        })
    }
}

#[derive(Default)]
pub struct Node {
    binding: OnceLock<Binding>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&self, binding: Binding) -> Result<()> {
        self.binding.set(binding).map_err(|rejected| {
            Error::InvalidOperation(format!(
                "'{}' is already attached to an object tree",
                rejected.descriptor
            ))
        })
    }

    fn binding(&self) -> Result<&Binding> {
        self.binding.get().ok_or_else(|| {
            Error::InvalidOperation(
                "object is not attached to an object tree; resolve it through a root scope"
                    .to_string(),
            )
        })
    }

    pub fn is_attached(&self) -> bool {
        self.binding.get().is_some()
    }

    /// Descriptor the object was resolved as.
    pub fn descriptor(&self) -> Option<&TypeDescriptor> {
        self.binding.get().map(|b| &b.descriptor)
    }

    pub fn parent(&self) -> Option<Arc<dyn UiObject>> {
        self.binding.get().and_then(|b| b.parent.clone())
    }

    /// The parent downcast to `T`.
    pub fn parent_as<T: UiObject>(&self) -> Option<Arc<T>> {
        self.parent()?.into_any_arc().downcast::<T>().ok()
    }

    pub fn parent_is<T: UiObject>(&self) -> bool {
        self.parent()
            .map(|p| (*p).as_any().is::<T>())
            .unwrap_or(false)
    }

    /// Position among the parent's matches; 0 for pages.
    pub fn index(&self) -> usize {
        self.binding.get().map(|b| b.index).unwrap_or(0)
    }

    pub fn search_pattern(&self) -> Option<&By> {
        self.binding.get().and_then(|b| b.search.as_ref())
    }

    /// Whether the object stands for an iframe's document.
    pub fn is_frame(&self) -> bool {
        self.binding.get().is_some_and(|b| b.frame)
    }

    /// The root scope this object belongs to.
    pub fn scope(&self) -> Result<RootScope> {
        let binding = self.binding()?;
        binding
            .scope
            .upgrade()
            .map(RootScope::from_inner)
            .ok_or_else(|| {
                Error::InvalidOperation("the root scope of this object was dropped".to_string())
            })
    }

    /// The object owning this node.
    pub(crate) fn this(&self) -> Result<Arc<dyn UiObject>> {
        let binding = self.binding()?;
        binding.this.upgrade().ok_or_else(|| {
            Error::InvalidOperation(format!("'{}' was dropped", binding.descriptor))
        })
    }

    /// Locator scoped under the parent's locator.
    ///
    /// The root resolves to the configured root selector; other nodes chain
    /// their search pattern and index onto the parent's locator. A frame
    /// node resolves to the root element of its iframe's document. Requires
    /// an open session.
    pub fn locator(&self) -> Result<Locator> {
        let binding = self.binding()?;
        let Some(parent) = &binding.parent else {
            let scope = self.scope()?;
            let session = scope.session()?;
            return Ok(Locator::new(
                session,
                scope.configuration().root_selector.clone(),
            ));
        };
        let parent = parent.node().locator()?;
        if binding.frame {
            let frame = binding.frame_search()?;
            return Ok(parent
                .locator(&frame.to_selector())
                .enter_frame()
                .locator(":root")
                .nth(binding.index));
        }
        Ok(match &binding.search {
            Some(search) => parent.locator(&search.to_selector()).nth(binding.index),
            None if binding.index > 0 => parent.nth(binding.index),
            None => parent,
        })
    }

    /// The iframe element itself, located in the parent's document.
    pub fn frame_element(&self) -> Result<Locator> {
        let binding = self.binding()?;
        let search = binding.frame_search()?;
        let parent = binding.parent.as_ref().ok_or_else(|| {
            Error::InvalidOperation(format!("'{}' has no parent frame host", binding.descriptor))
        })?;
        Ok(parent.node().locator()?.locator(&search.to_selector()))
    }

}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.binding.get() {
            Some(binding) => f
                .debug_struct("Node")
                .field("descriptor", &binding.descriptor)
                .field("search", &binding.search)
                .field("index", &binding.index)
                .field("frame", &binding.frame)
                .finish(),
            None => f.write_str("Node(unattached)"),
        }
    }
}
