// Page objects, controls and their place in the tree

pub mod by;
pub mod ext;
pub mod locator;
mod macros;
pub mod node;
pub mod traits;

pub use by::By;
pub use ext::UiObjectExt;
pub use locator::Locator;
pub use node::Node;
pub use traits::{AsAny, ControlObject, PageObject, TabObject, UiObject};

pub(crate) use node::Binding;
