// Locator - lazy element selector bound to a session
//
// Key characteristics:
// - Lazy: nothing runs until a query or action is awaited
// - Chainable: sub-locators via first(), last(), nth(), locator()
// - Scoped: a node's locator is its parent's locator chained with the
//   node's own search pattern and index
//
// Architecture:
// - Stores the selector string and the session it runs against
// - Delegates every query and action to the Session

use crate::error::Result;
use crate::scope::Session;
use std::fmt;
use std::sync::Arc;

/// Selector step entering an iframe's content document.
pub const FRAME_ENTRY: &str = "internal:control=enter-frame";

/// Locator represents a way to find element(s) on the page at any given moment.
#[derive(Clone)]
pub struct Locator {
    session: Arc<dyn Session>,
    selector: String,
}

impl Locator {
    pub fn new(session: Arc<dyn Session>, selector: impl Into<String>) -> Self {
        Self {
            session,
            selector: selector.into(),
        }
    }

    /// Returns the selector string for this locator
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Creates a locator for the first matching element.
    pub fn first(&self) -> Locator {
        Locator::new(
            Arc::clone(&self.session),
            format!("{} >> nth=0", self.selector),
        )
    }

    /// Creates a locator for the last matching element.
    pub fn last(&self) -> Locator {
        Locator::new(
            Arc::clone(&self.session),
            format!("{} >> nth=-1", self.selector),
        )
    }

    /// Creates a locator for the nth matching element (0-indexed).
    pub fn nth(&self, index: usize) -> Locator {
        Locator::new(
            Arc::clone(&self.session),
            format!("{} >> nth={}", self.selector, index),
        )
    }

    /// Creates a sub-locator within this locator's subtree.
    pub fn locator(&self, selector: &str) -> Locator {
        Locator::new(
            Arc::clone(&self.session),
            format!("{} >> {}", self.selector, selector),
        )
    }

    /// Continues the chain inside the document of the matched iframe.
    pub fn enter_frame(&self) -> Locator {
        Locator::new(
            Arc::clone(&self.session),
            format!("{} >> {}", self.selector, FRAME_ENTRY),
        )
    }

    /// Returns the number of elements matching this locator.
    pub async fn count(&self) -> Result<usize> {
        self.session.locator_count(&self.selector).await
    }

    /// Returns true if at least one element matches.
    pub async fn exists(&self) -> Result<bool> {
        Ok(self.count().await? > 0)
    }

    pub async fn is_visible(&self) -> Result<bool> {
        self.session.locator_is_visible(&self.selector).await
    }

    pub async fn is_hidden(&self) -> Result<bool> {
        Ok(!self.is_visible().await?)
    }

    pub async fn click(&self) -> Result<()> {
        self.session.locator_click(&self.selector).await
    }

    /// Fills an input with text, replacing its current value.
    pub async fn fill(&self, text: &str) -> Result<()> {
        self.session.locator_fill(&self.selector, text).await
    }

    pub async fn input_value(&self) -> Result<String> {
        self.session.locator_input_value(&self.selector).await
    }

    pub async fn text_content(&self) -> Result<Option<String>> {
        self.session.locator_text_content(&self.selector).await
    }

    pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        self.session.locator_get_attribute(&self.selector, name).await
    }

    pub async fn is_checked(&self) -> Result<bool> {
        self.session.locator_is_checked(&self.selector).await
    }

    pub async fn set_checked(&self, checked: bool) -> Result<()> {
        self.session.locator_set_checked(&self.selector, checked).await
    }

    /// Whether a matched `<option>` is selected.
    pub async fn is_selected(&self) -> Result<bool> {
        self.session.locator_is_selected(&self.selector).await
    }

    /// Selects the option with `value` in a matched `<select>`.
    pub async fn select_option(&self, value: &str) -> Result<()> {
        self.session.locator_select_option(&self.selector, value).await
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("selector", &self.selector)
            .finish()
    }
}
