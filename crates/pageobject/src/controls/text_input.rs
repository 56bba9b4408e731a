use crate::error::Result;
use crate::object::{By, ControlObject, Node, UiObjectExt};

/// An `input` element holding text.
#[derive(Debug, Default)]
pub struct TextInput {
    node: Node,
}

crate::impl_ui_object!(TextInput);

impl ControlObject for TextInput {
    fn search_pattern(&self) -> By {
        By::tag_name("input")
    }
}

impl TextInput {
    pub async fn name(&self) -> Result<Option<String>> {
        self.locator()?.get_attribute("name").await
    }

    /// Current value of the input.
    pub async fn value(&self) -> Result<String> {
        self.locator()?.input_value().await
    }

    /// Replaces the input's content with `text`.
    pub async fn set_text(&self, text: &str) -> Result<()> {
        tracing::debug!(text, "Filling text input");
        self.locator()?.fill(text).await
    }
}
