//! Rendering surfaces. Elements place plain views onto a surface; a line
//! break starts a new row. [`RowLayout`] keeps a vertical stack of rows, each
//! a horizontal run of views, and serializes for the HTTP service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementView {
    Label { text: String },
    TextField { slot: usize, text: String, visible_length: usize, pattern: String, interactive: bool },
    Dropdown { slot: usize, fact_type: String, field: String, choices: Vec<Choice>, selected: Option<usize>, interactive: bool },
    Toggle { slot: usize, checked: bool, interactive: bool },
    DateControl { slot: usize, text: String, format: String, interactive: bool },
}

pub trait Surface {
    fn new_row(&mut self);
    fn place(&mut self, view: ElementView);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowLayout {
    rows: Vec<Vec<ElementView>>,
}

impl RowLayout {
    pub fn new() -> Self {
        Self { rows: vec![Vec::new()] }
    }
    pub fn rows(&self) -> &[Vec<ElementView>] {
        &self.rows
    }
    pub fn into_rows(self) -> Vec<Vec<ElementView>> {
        self.rows
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RowLayout {
    fn new_row(&mut self) {
        self.rows.push(Vec::new());
    }
    fn place(&mut self, view: ElementView) {
        // rows is never empty
        if let Some(row) = self.rows.last_mut() {
            row.push(view);
        }
    }
}
