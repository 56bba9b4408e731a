// Drop-down lists and their options
//
// An option selects itself through its parent's locator, so it is usually
// found under a `Select`.

use crate::error::{Error, Result};
use crate::object::{By, ControlObject, Node, UiObjectExt};
use futures_util::stream::BoxStream;
use std::sync::Arc;

/// A `select` element.
#[derive(Debug, Default)]
pub struct Select {
    node: Node,
}

/// An `option` of a drop-down list.
#[derive(Debug, Default)]
pub struct SelectOption {
    node: Node,
}

crate::impl_ui_object!(Select, SelectOption);

impl ControlObject for Select {
    fn search_pattern(&self) -> By {
        By::tag_name("select")
    }
}

impl ControlObject for SelectOption {
    fn search_pattern(&self) -> By {
        By::tag_name("option")
    }
}

impl Select {
    pub fn options(&self) -> BoxStream<'static, Result<Arc<SelectOption>>> {
        self.find_all::<SelectOption>()
    }

    pub async fn select_value(&self, value: &str) -> Result<()> {
        self.locator()?.select_option(value).await
    }
}

impl SelectOption {
    pub async fn value(&self) -> Result<Option<String>> {
        self.locator()?.get_attribute("value").await
    }

    pub async fn text(&self) -> Result<String> {
        Ok(self.locator()?.text_content().await?.unwrap_or_default())
    }

    pub async fn is_selected(&self) -> Result<bool> {
        self.locator()?.is_selected().await
    }

    /// Selects this option in its parent list unless it is already selected.
    pub async fn select(&self) -> Result<()> {
        if self.is_selected().await? {
            return Ok(());
        }
        let value = self.value().await?.ok_or_else(|| {
            Error::InvalidOperation("option has no value attribute".to_string())
        })?;
        let parent = self.parent().ok_or_else(|| {
            Error::InvalidOperation("option is not attached to a list".to_string())
        })?;
        parent.node().locator()?.select_option(&value).await
    }
}
