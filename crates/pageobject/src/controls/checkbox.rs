use crate::error::Result;
use crate::object::{By, ControlObject, Node, UiObjectExt};

/// A checkbox `input`.
///
/// `check` and `uncheck` only act when the state differs, so toggling
/// handlers do not fire for a no-op.
#[derive(Debug, Default)]
pub struct Checkbox {
    node: Node,
}

crate::impl_ui_object!(Checkbox);

impl ControlObject for Checkbox {
    fn search_pattern(&self) -> By {
        By::css("input[type=checkbox]")
    }
}

impl Checkbox {
    pub async fn is_checked(&self) -> Result<bool> {
        self.locator()?.is_checked().await
    }

    pub async fn check(&self) -> Result<()> {
        self.set(true).await
    }

    pub async fn uncheck(&self) -> Result<()> {
        self.set(false).await
    }

    pub async fn value(&self) -> Result<Option<String>> {
        self.locator()?.get_attribute("value").await
    }

    pub async fn name(&self) -> Result<Option<String>> {
        self.locator()?.get_attribute("name").await
    }

    async fn set(&self, checked: bool) -> Result<()> {
        let locator = self.locator()?;
        if locator.is_checked().await? != checked {
            locator.set_checked(checked).await?;
        }
        Ok(())
    }
}
