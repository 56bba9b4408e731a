// Integration tests for conditional resolution
//
// Tests cover:
// - A page's own on_condition choosing among paths
// - Explicit conditions overriding it
// - Conditions that reject every path
// - Rejected paths staying materialized without being counted

mod fake_session;

use fake_session::fake_options;
use pageobject_rs::{impl_ui_object, AsAny, Catalog, Node, PageObject, Tab, TabObject, UiObject};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Portal {
    node: Node,
}

#[derive(Default)]
struct X {
    node: Node,
}

#[derive(Default)]
struct C {
    node: Node,
}

/// Only valid under C.
#[derive(Default)]
struct Details {
    node: Node,
}

/// Valid anywhere.
#[derive(Default)]
struct Summary {
    node: Node,
}

impl_ui_object!(Portal, X, C, Details, Summary);

impl TabObject for Portal {}
impl PageObject for Portal {}
impl PageObject for X {}
impl PageObject for C {}
impl PageObject for Summary {}

impl PageObject for Details {
    fn on_condition(&self) -> bool {
        self.node().parent_is::<C>()
    }
}

fn tab() -> Tab<Portal> {
    let catalog = Catalog::builder()
        .root::<Portal>()
        .child_of::<X, Portal>()
        .child_of::<C, Portal>()
        .child_of::<Details, X>()
        .child_of::<Details, C>()
        .child_of::<Summary, X>()
        .child_of::<Summary, C>()
        .build()
        .expect("Failed to build catalog");
    Tab::<Portal>::new(Arc::new(catalog), fake_options()).expect("Failed to create tab")
}

#[tokio::test]
async fn test_implicit_condition_selects_path() {
    let tab = tab();

    let details = tab.on::<Details>().expect("Failed to resolve Details");

    assert!(details.node().parent_is::<C>());
    // the path through X was materialized and rejected first
    assert_eq!(tab.cache_object_count(), 1);
    assert_eq!(tab.statistics().materializations, 4);
}

#[tokio::test]
async fn test_explicit_condition_overrides_implicit() {
    let tab = tab();

    let summary = tab
        .on_where::<Summary, _>(|s| s.node().parent_is::<C>())
        .expect("Failed to resolve Summary under C");
    assert!(summary.node().parent_is::<C>());

    let default = tab.on::<Summary>().expect("Failed to resolve Summary");
    assert!(default.node().parent_is::<X>());
    assert!(!Arc::ptr_eq(&summary, &default));
}

#[tokio::test]
async fn test_condition_rejecting_every_path_is_not_found() {
    let tab = tab();
    let evaluated = AtomicUsize::new(0);

    let err = tab
        .on_where::<Summary, _>(|_| {
            evaluated.fetch_add(1, Ordering::SeqCst);
            false
        })
        .err()
        .expect("Summary must not resolve");

    assert!(err.is_page_object_not_found_for::<Summary>());
    assert_eq!(evaluated.load(Ordering::SeqCst), 2);
    assert_eq!(tab.cache_object_count(), 0);
}

#[tokio::test]
async fn test_condition_sees_bound_parent_chain() {
    let tab = tab();

    let details = tab
        .on_where::<Details, _>(|d| {
            d.node()
                .parent()
                .and_then(|p| p.node().parent())
                .map(|grand| (*grand).as_any().is::<Portal>())
                .unwrap_or(false)
        })
        .expect("Failed to resolve Details");

    assert!(details.node().parent_is::<X>());
}
