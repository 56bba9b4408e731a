// Fake Session - in-memory browser for integration tests
//
// Elements are keyed by the exact selector a locator renders, e.g.
// "html >> table >> nth=0 >> tr >> nth=1". Unknown selectors match nothing.

// Note: Items appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use pageobject_rs::{Error, Result, ScopeOptions, Session};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub count: usize,
    pub visible: bool,
    pub text: Option<String>,
    pub value: String,
    pub checked: bool,
    pub selected: bool,
    pub attributes: HashMap<String, String>,
}

impl Default for FakeElement {
    fn default() -> Self {
        Self {
            count: 1,
            visible: true,
            text: None,
            value: String::new(),
            checked: false,
            selected: false,
            attributes: HashMap::new(),
        }
    }
}

impl FakeElement {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

#[derive(Default)]
pub struct FakeSession {
    elements: Mutex<HashMap<String, FakeElement>>,
    visited: Mutex<Vec<String>>,
    clicks: Mutex<Vec<String>>,
    selections: Mutex<Vec<(String, String)>>,
    checked_writes: AtomicUsize,
    closed: AtomicBool,
}

impl FakeSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, selector: &str, element: FakeElement) {
        self.elements.lock().insert(selector.to_string(), element);
    }

    pub fn update(&self, selector: &str, change: impl FnOnce(&mut FakeElement)) {
        if let Some(element) = self.elements.lock().get_mut(selector) {
            change(element);
        }
    }

    pub fn element(&self, selector: &str) -> Option<FakeElement> {
        self.elements.lock().get(selector).cloned()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().clone()
    }

    /// `(select selector, value)` pairs passed to `select_option`.
    pub fn selections(&self) -> Vec<(String, String)> {
        self.selections.lock().clone()
    }

    /// Number of `set_checked` calls that reached the browser.
    pub fn checked_writes(&self) -> usize {
        self.checked_writes.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn with_element<T>(&self, selector: &str, read: impl FnOnce(&mut FakeElement) -> T) -> Result<T> {
        let mut elements = self.elements.lock();
        let element = elements
            .get_mut(selector)
            .ok_or_else(|| Error::Driver(format!("no element matches '{}'", selector)))?;
        Ok(read(element))
    }
}

#[pageobject_rs::async_trait]
impl Session for FakeSession {
    async fn goto(&self, url: &str) -> Result<()> {
        self.visited.lock().push(url.to_string());
        Ok(())
    }

    async fn locator_count(&self, selector: &str) -> Result<usize> {
        Ok(self.elements.lock().get(selector).map(|e| e.count).unwrap_or(0))
    }

    async fn locator_is_visible(&self, selector: &str) -> Result<bool> {
        Ok(self
            .elements
            .lock()
            .get(selector)
            .map(|e| e.visible)
            .unwrap_or(false))
    }

    async fn locator_click(&self, selector: &str) -> Result<()> {
        self.with_element(selector, |_| ())?;
        self.clicks.lock().push(selector.to_string());
        Ok(())
    }

    async fn locator_fill(&self, selector: &str, text: &str) -> Result<()> {
        self.with_element(selector, |e| e.value = text.to_string())
    }

    async fn locator_input_value(&self, selector: &str) -> Result<String> {
        self.with_element(selector, |e| e.value.clone())
    }

    async fn locator_text_content(&self, selector: &str) -> Result<Option<String>> {
        self.with_element(selector, |e| e.text.clone())
    }

    async fn locator_get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        self.with_element(selector, |e| e.attributes.get(name).cloned())
    }

    async fn locator_is_checked(&self, selector: &str) -> Result<bool> {
        self.with_element(selector, |e| e.checked)
    }

    async fn locator_set_checked(&self, selector: &str, checked: bool) -> Result<()> {
        self.with_element(selector, |e| e.checked = checked)?;
        self.checked_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn locator_is_selected(&self, selector: &str) -> Result<bool> {
        self.with_element(selector, |e| e.selected)
    }

    async fn locator_select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.with_element(selector, |_| ())?;
        let options = format!("{} >> option >> nth=", selector);
        for (key, element) in self.elements.lock().iter_mut() {
            if key.starts_with(&options) && !key[options.len()..].contains(' ') {
                element.selected = element.attributes.get("value").map(String::as_str) == Some(value);
            }
        }
        self.selections
            .lock()
            .push((selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Options with a factory handing out `session`, counting invocations.
pub fn options_with(session: Arc<FakeSession>, created: Arc<AtomicUsize>) -> ScopeOptions {
    ScopeOptions::new().session_factory(move || {
        let session = Arc::clone(&session);
        let created = Arc::clone(&created);
        async move {
            created.fetch_add(1, Ordering::SeqCst);
            // Widen the window in which concurrent openers overlap
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(session as Arc<dyn Session>)
        }
    })
}

/// Options with a factory for a fresh fake session.
pub fn fake_options() -> ScopeOptions {
    options_with(FakeSession::new(), Arc::new(AtomicUsize::new(0)))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
