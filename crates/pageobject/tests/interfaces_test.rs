// Integration tests for interface resolution
//
// Tests cover:
// - Resolving an interface to the closest reachable implementer
// - Distance ranking across interface hierarchies
// - Children declared under an interface
// - Generic interfaces with closed instantiations
// - Interface-typed roots

mod fake_session;

use fake_session::fake_options;
use pageobject_rs::{
    impl_ui_object, Catalog, Error, Node, PageObject, RootScope, Tab, TabObject, UiObject,
    UiObjectExt,
};
use std::marker::PhantomData;
use std::sync::Arc;

trait Named: PageObject {
    fn name(&self) -> &'static str;
}

trait Navigation: Named {}

trait Lonely: PageObject {}

trait Listing<T>: PageObject {
    fn kind(&self) -> &'static str;
}

trait Storefront: TabObject {}

#[derive(Default)]
struct Shop {
    node: Node,
}

#[derive(Default)]
struct Menu {
    node: Node,
}

#[derive(Default)]
struct SideBar {
    node: Node,
}

#[derive(Default)]
struct Banner {
    node: Node,
}

#[derive(Default)]
struct Footer {
    node: Node,
}

#[derive(Default)]
struct Orphan {
    node: Node,
}

impl_ui_object!(Shop, Menu, SideBar, Banner, Footer, Orphan);

impl TabObject for Shop {}
impl PageObject for Shop {}
impl Storefront for Shop {}
impl PageObject for Menu {}
impl PageObject for SideBar {}
impl PageObject for Banner {}
impl PageObject for Footer {}
impl PageObject for Orphan {}

impl Named for Menu {
    fn name(&self) -> &'static str {
        "menu"
    }
}
impl Navigation for Menu {}

impl Named for SideBar {
    fn name(&self) -> &'static str {
        "sidebar"
    }
}
impl Navigation for SideBar {}

impl Named for Banner {
    fn name(&self) -> &'static str {
        "banner"
    }
}

impl Lonely for Orphan {}

struct Book;
struct Film;

struct Shelf<T> {
    node: Node,
    _marker: PhantomData<T>,
}

impl<T> Default for Shelf<T> {
    fn default() -> Self {
        Self {
            node: Node::default(),
            _marker: PhantomData,
        }
    }
}

impl_ui_object!(impl<T> Shelf<T>);
impl<T: Send + Sync + 'static> PageObject for Shelf<T> {}

impl Listing<Book> for Shelf<Book> {
    fn kind(&self) -> &'static str {
        "books"
    }
}

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::builder()
            .root::<Shop>()
            .implements::<Shop, dyn Storefront, _>(|s| s)
            .child_of::<Menu, Shop>()
            .child_of::<SideBar, Shop>()
            .child_of::<Banner, Shop>()
            .page::<Orphan>()
            .page::<Shelf<Book>>()
            .child_of::<Shelf<Book>, Shop>()
            .implements::<Menu, dyn Navigation, _>(|m| m)
            .implements::<SideBar, dyn Navigation, _>(|s| s)
            .implements::<Banner, dyn Named, _>(|b| b)
            .interface_extends::<dyn Navigation, dyn Named, _>(|n| n)
            .implements::<Orphan, dyn Lonely, _>(|o| o)
            .implements::<Shelf<Book>, dyn Listing<Book>, _>(|s| s)
            .child_of_interface::<Footer, dyn Navigation>()
            .build()
            .expect("Failed to build catalog"),
    )
}

fn tab() -> Tab<Shop> {
    Tab::<Shop>::new(catalog(), fake_options()).expect("Failed to create tab")
}

#[tokio::test]
async fn test_interface_resolves_to_first_registered_implementer() {
    let tab = tab();

    let navigation = tab
        .on_interface::<dyn Navigation>()
        .expect("Failed to resolve Navigation");

    assert_eq!(navigation.name(), "menu");
    assert!(navigation.node().parent_is::<Shop>());

    // the concrete type resolves to the same cached instance
    let menu = tab.on::<Menu>().expect("Failed to resolve Menu");
    assert_eq!(
        Arc::as_ptr(&menu) as *const (),
        Arc::as_ptr(&navigation) as *const ()
    );
}

#[tokio::test]
async fn test_closer_implementer_wins() {
    let tab = tab();

    // Banner implements Named directly; Menu only through Navigation
    let named = tab.on_interface::<dyn Named>().expect("Failed to resolve Named");

    assert_eq!(named.name(), "banner");
}

#[tokio::test]
async fn test_interface_condition_picks_among_implementers() {
    let tab = tab();

    let sidebar = tab
        .on_interface_where::<dyn Navigation, _>(|n| n.name() == "sidebar")
        .expect("Failed to resolve SideBar");

    assert_eq!(sidebar.name(), "sidebar");
}

#[tokio::test]
async fn test_child_of_interface_follows_every_implementer() {
    let tab = tab();

    let under_menu = tab.on::<Footer>().expect("Failed to resolve Footer");
    let under_sidebar = tab
        .on_where::<Footer, _>(|f| f.node().parent_is::<SideBar>())
        .expect("Failed to resolve Footer under SideBar");

    assert!(under_menu.node().parent_is::<Menu>());
    assert!(under_sidebar.parent_as::<SideBar>().is_some());
    assert_eq!(tab.cache_type_count(), 1);
}

#[tokio::test]
async fn test_unreachable_implementer_is_not_found() {
    let tab = tab();

    let err = tab
        .on_interface::<dyn Lonely>()
        .err()
        .expect("Lonely must not resolve");

    assert!(err.is_page_object_not_found_for::<dyn Lonely>());
}

#[tokio::test]
async fn test_generic_interface_resolves_closed_instantiation() {
    let tab = tab();

    let books = tab
        .on_interface::<dyn Listing<Book>>()
        .expect("Failed to resolve Listing<Book>");
    assert_eq!(books.kind(), "books");

    let films = tab.on_interface::<dyn Listing<Film>>();
    assert!(matches!(films, Err(Error::PageObjectNotFound { .. })));
}

#[tokio::test]
async fn test_interface_typed_root() {
    let scope = RootScope::resolve::<dyn Storefront>(catalog(), fake_options())
        .expect("Failed to resolve Storefront root");

    assert!(scope.root_as::<Shop>().is_some());
    assert!(scope.root_as::<dyn Storefront>().is_some());

    let missing = RootScope::resolve::<dyn Lonely>(catalog(), fake_options());
    assert!(matches!(missing, Err(Error::TabObjectNotFound { .. })));
}

#[tokio::test]
async fn test_interfaces_resolve_from_objects() {
    let tab = tab();
    let banner = tab.on::<Banner>().expect("Failed to resolve Banner");

    let navigation = banner
        .on_interface::<dyn Navigation>()
        .expect("Failed to resolve Navigation from Banner");

    assert_eq!(navigation.name(), "menu");
}
