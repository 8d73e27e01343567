//! Screen model
//!
//! The rows of one physical display, top to bottom.

use alloc::vec::Vec;

use embassy_time::Duration;

use crate::node::{ContentNode, RowNode};

/// Ordered fixed-width rows of one display
pub struct Screen {
    rows: Vec<RowNode>,
    row_length: usize,
}

impl Screen {
    /// `rows` empty rows of `row_length` cells each
    pub fn new(rows: usize, row_length: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| RowNode::new(row_length)).collect(),
            row_length,
        }
    }

    /// Row at zero-based `index`
    pub fn row(&self, index: usize) -> Option<&RowNode> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[RowNode] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_length(&self) -> usize {
        self.row_length
    }

    /// Advance every row by `delta`
    pub fn update(&self, delta: Duration) {
        for row in &self.rows {
            row.update(delta);
        }
    }
}
