// Assertions - Auto-retry expectations on UI objects
//
// expect() wraps a locator; every assertion polls it until the condition
// holds or the timeout elapses. UI objects build expectations through
// `UiObjectExt::expect`, which applies the scope's wait configuration.

use crate::error::{Error, Result};
use crate::object::Locator;
use regex::Regex;
use std::time::{Duration, Instant};

/// Default timeout for assertions (5 seconds)
const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for assertions (100ms)
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Creates an expectation for a locator with auto-retry behavior.
///
/// # Example
///
/// ```ignore
/// use pageobject_rs::{expect, UiObjectExt};
/// use std::time::Duration;
///
/// let login = tab.goto::<LoginPage>().await?;
/// expect(login.locator()?).to_be_visible().await?;
///
/// login
///     .expect()?
///     .with_timeout(Duration::from_secs(10))
///     .not()
///     .to_have_text("Signed out")
///     .await?;
/// ```
pub fn expect(locator: Locator) -> Expectation {
    Expectation::new(locator)
}

/// What an assertion observes on each poll.
enum Check {
    Visible,
    Attached,
    Count(usize),
    Text(String),
    TextMatches(Regex),
    Checked,
}

impl Check {
    fn describe(&self) -> String {
        match self {
            Check::Visible => "be visible".to_string(),
            Check::Attached => "be attached".to_string(),
            Check::Count(n) => format!("have count {}", n),
            Check::Text(text) => format!("have text '{}'", text),
            Check::TextMatches(re) => format!("have text matching '{}'", re.as_str()),
            Check::Checked => "be checked".to_string(),
        }
    }
}

/// Expectation wraps a locator and provides assertion methods with auto-retry.
pub struct Expectation {
    locator: Locator,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

// to_* assertions consume the expectation, matching the chained expect API
#[allow(clippy::wrong_self_convention)]
impl Expectation {
    pub(crate) fn new(locator: Locator) -> Self {
        Self {
            locator,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    ///
    /// Default is 100ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub async fn to_be_visible(self) -> Result<()> {
        self.poll(Check::Visible).await
    }

    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().poll(Check::Visible).await
    }

    /// Asserts that at least one element matches.
    pub async fn to_be_attached(self) -> Result<()> {
        self.poll(Check::Attached).await
    }

    pub async fn to_be_detached(self) -> Result<()> {
        self.not().poll(Check::Attached).await
    }

    pub async fn to_have_count(self, count: usize) -> Result<()> {
        self.poll(Check::Count(count)).await
    }

    /// Asserts the element's text content, trimmed, equals `expected` trimmed.
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        self.poll(Check::Text(expected.trim().to_string())).await
    }

    pub async fn to_have_text_regex(self, pattern: &str) -> Result<()> {
        let re = Regex::new(pattern)
            .map_err(|e| Error::InvalidArgument(format!("Invalid regex: {}", e)))?;
        self.poll(Check::TextMatches(re)).await
    }

    pub async fn to_be_checked(self) -> Result<()> {
        self.poll(Check::Checked).await
    }

    /// Evaluates `check` once: whether it holds, and what was seen.
    async fn observe(&self, check: &Check) -> Result<(bool, String)> {
        Ok(match check {
            Check::Visible => {
                let visible = self.locator.is_visible().await?;
                (visible, if visible { "visible" } else { "not visible" }.to_string())
            }
            Check::Attached => {
                let count = self.locator.count().await?;
                (count > 0, format!("{} matching elements", count))
            }
            Check::Count(expected) => {
                let count = self.locator.count().await?;
                (count == *expected, format!("count {}", count))
            }
            Check::Text(expected) => {
                let text = self.locator.text_content().await?.unwrap_or_default();
                let actual = text.trim();
                (actual == expected, format!("text '{}'", actual))
            }
            Check::TextMatches(re) => {
                let text = self.locator.text_content().await?.unwrap_or_default();
                (re.is_match(&text), format!("text '{}'", text.trim()))
            }
            Check::Checked => {
                let checked = self.locator.is_checked().await?;
                (checked, if checked { "checked" } else { "unchecked" }.to_string())
            }
        })
    }

    async fn poll(self, check: Check) -> Result<()> {
        let start = Instant::now();

        loop {
            let (holds, actual) = self.observe(&check).await?;
            if holds != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = if self.negate {
                    format!(
                        "Expected element '{}' NOT to {}, but it did after {:?}",
                        self.locator.selector(),
                        check.describe(),
                        self.timeout
                    )
                } else {
                    format!(
                        "Expected element '{}' to {}, but had {} after {:?}",
                        self.locator.selector(),
                        check.describe(),
                        actual,
                        self.timeout
                    )
                };
                tracing::debug!(selector = self.locator.selector(), "Assertion timed out");
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
