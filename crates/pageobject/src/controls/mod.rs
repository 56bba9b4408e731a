// Stock controls
//
// Positional leaf objects for common elements. Controls are found fresh
// under a page or another control with `find`/`find_all` and never cached.

mod button;
mod checkbox;
mod link;
mod select;
mod table;
mod text_input;

pub use button::Button;
pub use checkbox::Checkbox;
pub use link::Link;
pub use select::{Select, SelectOption};
pub use table::{Cell, Row, Table};
pub use text_input::TextInput;
