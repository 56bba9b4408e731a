// Session - the browser collaborator
//
// The engine never talks to a browser directly. A Session exposes the few
// selector-based queries and actions locators need, and a SessionFactory
// creates one lazily when a root scope opens. Any driver can back it.

use crate::error::{Error, Result};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::OnceCell;

/// Browser session driven through selectors.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates the tab to `url`.
    async fn goto(&self, url: &str) -> Result<()>;

    async fn locator_count(&self, selector: &str) -> Result<usize>;

    async fn locator_is_visible(&self, selector: &str) -> Result<bool>;

    async fn locator_click(&self, selector: &str) -> Result<()>;

    async fn locator_fill(&self, selector: &str, text: &str) -> Result<()>;

    async fn locator_input_value(&self, selector: &str) -> Result<String>;

    async fn locator_text_content(&self, selector: &str) -> Result<Option<String>>;

    async fn locator_get_attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    async fn locator_is_checked(&self, selector: &str) -> Result<bool>;

    async fn locator_set_checked(&self, selector: &str, checked: bool) -> Result<()>;

    async fn locator_is_selected(&self, selector: &str) -> Result<bool>;

    /// Selects the option with `value` in the matched `<select>`.
    async fn locator_select_option(&self, selector: &str, value: &str) -> Result<()>;

    /// Releases the session.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Creates a session; invoked at most once per session handle.
pub type SessionFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn Session>>> + Send + Sync>;

/// Memoized session shared by a root scope and its casts.
///
/// Concurrent callers of `get_or_create` before completion wait for the
/// same in-flight creation.
pub(crate) struct SessionHandle {
    session: OnceCell<Arc<dyn Session>>,
    factory: Option<SessionFactory>,
    creations: AtomicUsize,
    closed: AtomicBool,
}

impl SessionHandle {
    pub(crate) fn new(factory: Option<SessionFactory>, session: Option<Arc<dyn Session>>) -> Self {
        Self {
            session: OnceCell::new_with(session),
            factory,
            creations: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub(crate) async fn get_or_create(&self) -> Result<Arc<dyn Session>> {
        let session = self
            .session
            .get_or_try_init(|| async {
                let factory = self.factory.as_ref().ok_or_else(|| {
                    Error::SessionCreation("no session factory configured".to_string())
                })?;
                self.creations.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("Creating browser session");
                factory().await.map_err(|e| match e {
                    Error::SessionCreation(_) => e,
                    other => Error::SessionCreation(other.to_string()),
                })
            })
            .await?;
        Ok(Arc::clone(session))
    }

    pub(crate) fn get(&self) -> Option<Arc<dyn Session>> {
        self.session.get().cloned()
    }

    /// Number of factory invocations so far.
    pub(crate) fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Closes the session once; later calls are no-ops.
    pub(crate) async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        match self.get() {
            Some(session) => {
                tracing::debug!("Closing browser session");
                session.close().await
            }
            None => Ok(()),
        }
    }
}
