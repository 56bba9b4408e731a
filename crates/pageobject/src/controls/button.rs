use crate::error::Result;
use crate::object::{By, ControlObject, Node, UiObjectExt};

/// A `button` element.
#[derive(Debug, Default)]
pub struct Button {
    node: Node,
}

crate::impl_ui_object!(Button);

impl ControlObject for Button {
    fn search_pattern(&self) -> By {
        By::tag_name("button")
    }
}

impl Button {
    pub async fn click(&self) -> Result<()> {
        self.locator()?.click().await
    }

    /// Text content, trimmed; empty if the button has none.
    pub async fn text(&self) -> Result<String> {
        let text = self.locator()?.text_content().await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }
}
