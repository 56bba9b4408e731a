// Error types for pageobject-rs

use crate::graph::TypeDescriptor;
use crate::scope::ScopeState;
use thiserror::Error;

/// Result type alias for page-object operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when resolving, registering or driving page objects
#[derive(Debug, Error)]
pub enum Error {
    /// No path from the scope's root reaches a concrete type satisfying the
    /// request and its condition.
    ///
    /// Recoverable by the caller, e.g. by registering the missing
    /// relationship with [`RootScope::register_child`](crate::RootScope::register_child).
    #[error("Page object not found: no reachable page object satisfies '{requested}'")]
    PageObjectNotFound { requested: TypeDescriptor },

    /// No root type in the catalog is assignable to the requested root type
    #[error("Tab object not found: no registered root type is assignable to '{requested}'")]
    TabObjectNotFound { requested: TypeDescriptor },

    /// Invalid registration or misuse of the object tree
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The scope cannot serve the request in its current lifecycle state
    ///
    /// Raised when the browser is touched before the session exists, and for
    /// every operation after the scope was closed.
    #[error("Scope not ready: operation requires an open scope, but the scope is {state}")]
    ScopeNotReady { state: ScopeState },

    /// The session could not be created
    #[error("Session creation failed: {0}")]
    SessionCreation(String),

    /// Failure reported by the browser driver
    #[error("Driver error: {0}")]
    Driver(String),

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Assertion timeout (expect API)
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true if this is a not-found error for exactly `T`.
    ///
    /// Context wrappers are looked through.
    pub fn is_page_object_not_found_for<T: ?Sized + 'static>(&self) -> bool {
        match self {
            Error::PageObjectNotFound { requested } => *requested == TypeDescriptor::of::<T>(),
            Error::Context(_, inner) => inner.is_page_object_not_found_for::<T>(),
            _ => false,
        }
    }

    /// Returns true for any not-found error.
    pub fn is_page_object_not_found(&self) -> bool {
        match self {
            Error::PageObjectNotFound { .. } => true,
            Error::Context(_, inner) => inner.is_page_object_not_found(),
            _ => false,
        }
    }
}
