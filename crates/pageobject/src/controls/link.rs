use crate::error::Result;
use crate::object::{By, ControlObject, Node, UiObjectExt};

/// An anchor element.
#[derive(Debug, Default)]
pub struct Link {
    node: Node,
}

crate::impl_ui_object!(Link);

impl ControlObject for Link {
    fn search_pattern(&self) -> By {
        By::tag_name("a")
    }
}

impl Link {
    pub async fn text(&self) -> Result<String> {
        let text = self.locator()?.text_content().await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    /// The `href` attribute, if present.
    pub async fn url(&self) -> Result<Option<String>> {
        self.locator()?.get_attribute("href").await
    }

    pub async fn click(&self) -> Result<()> {
        self.locator()?.click().await
    }
}
