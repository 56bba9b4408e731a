// Root scopes: lifecycle, session, instance cache and the resolution engine

mod cache;
mod resolution;
mod root_scope;
mod session;

pub use cache::InstanceCache;
pub use root_scope::{RootScope, ScopeOptions, ScopeState, Tab};
pub use session::{Session, SessionFactory};

pub(crate) use root_scope::ScopeInner;
