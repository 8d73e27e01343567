//! Fixed-width row

use alloc::string::String;

use embassy_time::Duration;

use super::{guard, window, ContentNode, Guard, NodeRef};

/// Clamps one child to exactly `length` cells
pub struct RowNode {
    length: usize,
    child: Guard<Option<NodeRef>>,
}

impl RowNode {
    /// Empty row of `length` cells
    pub fn new(length: usize) -> Self {
        Self {
            length,
            child: guard(None),
        }
    }

    pub fn with_child(length: usize, child: NodeRef) -> Self {
        Self {
            length,
            child: guard(Some(child)),
        }
    }

    pub fn set_child(&self, child: Option<NodeRef>) {
        self.child.lock(|c| *c.borrow_mut() = child);
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn child(&self) -> Option<NodeRef> {
        self.child.lock(|c| c.borrow().clone())
    }
}

impl ContentNode for RowNode {
    fn content(&self) -> String {
        let text = self.child().map(|c| c.content()).unwrap_or_default();
        window(&text, 0, self.length)
    }

    fn update(&self, delta: Duration) {
        if let Some(child) = self.child() {
            child.update(delta);
        }
    }
}
