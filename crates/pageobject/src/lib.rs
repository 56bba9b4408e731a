//! pageobject-rs: Page object relationship graph and resolution engine
//!
//! Page objects declare where they live in a UI (a page is a child of a
//! root tab, a panel is a child of a page) and the engine resolves a
//! requested type to a cached, correctly parented instance by searching
//! the relationship graph from the tab's root.
//!
//! # Examples
//!
//! ## Declaring and resolving pages
//!
//! ```ignore
//! use pageobject_rs::{
//!     impl_ui_object, Catalog, Node, PageObject, ScopeOptions, Tab, TabObject,
//! };
//!
//! #[derive(Default)]
//! struct Shop { node: Node }
//! #[derive(Default)]
//! struct Cart { node: Node }
//! impl_ui_object!(Shop, Cart);
//! impl PageObject for Shop {}
//! impl TabObject for Shop {
//!     fn url(&self) -> Option<String> {
//!         Some("https://shop.example".to_string())
//!     }
//! }
//! impl PageObject for Cart {}
//!
//! #[tokio::main]
//! async fn main() -> pageobject_rs::Result<()> {
//!     let catalog = Catalog::builder()
//!         .root::<Shop>()
//!         .page::<Cart>()
//!         .child_of::<Cart, Shop>()
//!         .build()?;
//!
//!     let tab = Tab::<Shop>::new(catalog.into(), ScopeOptions::new().session_factory(connect))?;
//!     let cart = tab.goto::<Cart>().await?;
//!     assert!(cart.node().parent_is::<Shop>());
//!     tab.close().await
//! }
//! ```
//!
//! ## Controls and assertions
//!
//! ```ignore
//! use pageobject_rs::controls::Button;
//! use pageobject_rs::UiObjectExt;
//!
//! let checkout = cart.find_by::<Button>("#checkout")?;
//! checkout.click().await?;
//! cart.expect()?.to_be_hidden().await?;
//! ```

pub mod api;
mod assertions;
pub mod controls;
mod error;
pub mod graph;
pub mod object;
pub mod scope;

/// Default root selector used when a configuration does not name one.
pub const DEFAULT_ROOT_SELECTOR: &str = api::configuration::DEFAULT_ROOT_SELECTOR;

// Re-export error types
pub use error::{Error, Result};

// Re-export assertions API
pub use assertions::{expect, Expectation};

// Re-export configuration and statistics
pub use api::{Configuration, Statistics, StatisticsSnapshot};

// Re-export graph types
pub use graph::{
    Catalog, CatalogBuilder, InterfaceResolver, Origin, PageObjectTree, Relationship,
    RelationshipGraph, ResolutionPath, TypeDescriptor, TypeKind, TypePattern,
};

// Re-export object model
pub use object::{
    AsAny, By, ControlObject, Locator, Node, PageObject, TabObject, UiObject, UiObjectExt,
};

// Re-export scopes
pub use scope::{InstanceCache, RootScope, ScopeOptions, ScopeState, Session, SessionFactory, Tab};

// Page objects implement `PageObject::navigate` with this attribute
pub use async_trait::async_trait;
