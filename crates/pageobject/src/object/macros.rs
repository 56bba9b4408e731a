// Boilerplate for types that keep their Node in a field named `node`

/// Implements [`UiObject`](crate::UiObject) for types storing their
/// [`Node`](crate::Node) in a `node` field.
///
/// ```ignore
/// #[derive(Default)]
/// struct Login { node: Node }
/// impl_ui_object!(Login);
///
/// struct Item<T> { node: Node, _marker: PhantomData<T> }
/// impl_ui_object!(impl<T> Item<T>);
/// ```
#[macro_export]
macro_rules! impl_ui_object {
    (impl<$($param:ident),+> $ty:ty) => {
        impl<$($param: Send + Sync + 'static),+> $crate::UiObject for $ty {
            fn node(&self) -> &$crate::Node {
                &self.node
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::UiObject for $ty {
                fn node(&self) -> &$crate::Node {
                    &self.node
                }
            }
        )+
    };
}
