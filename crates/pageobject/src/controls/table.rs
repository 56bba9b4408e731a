// Table, rows and cells
//
// Rows and cells are positional: the nth row is `table >> tr >> nth=n`,
// so a stream of rows re-queries the table on every step.

use crate::error::{Error, Result};
use crate::object::{By, ControlObject, Node, UiObjectExt};
use futures_util::stream::{BoxStream, StreamExt};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Table {
    node: Node,
}

#[derive(Debug, Default)]
pub struct Row {
    node: Node,
}

#[derive(Debug, Default)]
pub struct Cell {
    node: Node,
}

crate::impl_ui_object!(Table, Row, Cell);

impl ControlObject for Table {
    fn search_pattern(&self) -> By {
        By::tag_name("table")
    }
}

impl ControlObject for Row {
    fn search_pattern(&self) -> By {
        By::tag_name("tr")
    }
}

impl ControlObject for Cell {
    fn search_pattern(&self) -> By {
        By::css("th, td")
    }
}

impl Table {
    /// Every row of the table, header rows included.
    pub fn rows(&self) -> BoxStream<'static, Result<Arc<Row>>> {
        self.find_all::<Row>()
    }
}

impl Row {
    pub fn cells(&self) -> BoxStream<'static, Result<Arc<Cell>>> {
        self.find_all::<Cell>()
    }

    /// The cell at `index` (0-based).
    pub async fn cell_at(&self, index: usize) -> Result<Arc<Cell>> {
        self.cells()
            .skip(index)
            .next()
            .await
            .unwrap_or_else(|| {
                Err(Error::InvalidArgument(format!(
                    "row has no cell at index {}",
                    index
                )))
            })
    }
}

impl Cell {
    pub async fn text(&self) -> Result<String> {
        let text = self.locator()?.text_content().await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    pub async fn is_header_cell(&self) -> Result<bool> {
        self.locator()?.locator("xpath=self::th").exists().await
    }

    pub async fn is_data_cell(&self) -> Result<bool> {
        self.locator()?.locator("xpath=self::td").exists().await
    }
}
