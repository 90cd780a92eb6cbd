//! Paper catalogue model and loading.

mod loader;
mod row;

pub use loader::{LoadReport, sort_by_category_priority};
pub use row::{Column, Row, Value, first_tag, split_tags};

/// The loaded catalogue in its base order. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Wrap rows that are already in base order.
    pub const fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
