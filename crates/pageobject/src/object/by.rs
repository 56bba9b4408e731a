// Search patterns
//
// A `By` names how a node is located under its parent. Rendering to a
// driver selector is the only place selector syntax is produced.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum By {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element id
    Id(String),
    /// `name` attribute
    Name(String),
    /// Single class name
    ClassName(String),
    /// Tag name
    TagName(String),
    /// `data-testid` attribute
    TestId(String),
    /// Driver selector passed through unchanged
    Selector(String),
}

impl By {
    pub fn css(selector: impl Into<String>) -> Self {
        By::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        By::XPath(expression.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        By::Id(id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        By::Name(name.into())
    }

    pub fn class_name(class: impl Into<String>) -> Self {
        By::ClassName(class.into())
    }

    pub fn tag_name(tag: impl Into<String>) -> Self {
        By::TagName(tag.into())
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        By::TestId(id.into())
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        By::Selector(selector.into())
    }

    /// Renders the pattern as a driver selector.
    pub fn to_selector(&self) -> String {
        match self {
            By::Css(selector) | By::TagName(selector) | By::Selector(selector) => selector.clone(),
            By::XPath(expression) => format!("xpath={}", expression),
            By::Id(id) => format!("#{}", escape_identifier(id)),
            By::ClassName(class) => format!(".{}", escape_identifier(class)),
            By::Name(name) => format!("[name=\"{}\"]", escape_attribute(name)),
            By::TestId(id) => format!("[data-testid=\"{}\"]", escape_attribute(id)),
        }
    }
}

impl From<&str> for By {
    fn from(selector: &str) -> Self {
        By::Selector(selector.to_string())
    }
}

impl From<String> for By {
    fn from(selector: String) -> Self {
        By::Selector(selector)
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector())
    }
}

/// CSS identifier escaping for ids and class names.
fn escape_identifier(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            escaped.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            escaped.push(c);
        } else {
            escaped.push('\\');
            escaped.push(c);
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
