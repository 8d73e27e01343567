//! Static text

use alloc::string::String;

use embassy_time::Duration;

use super::{guard, ContentNode, Guard};

/// Verbatim text, replaced by its owner
pub struct TextNode {
    text: Guard<String>,
}

impl TextNode {
    pub fn new(text: &str) -> Self {
        Self {
            text: guard(String::from(text)),
        }
    }

    /// Replace the text
    pub fn set_text(&self, text: &str) {
        self.text.lock(|t| {
            let mut t = t.borrow_mut();
            t.clear();
            t.push_str(text);
        });
    }
}

impl Default for TextNode {
    fn default() -> Self {
        Self::new("")
    }
}

impl ContentNode for TextNode {
    fn content(&self) -> String {
        self.text.lock(|t| t.borrow().clone())
    }

    fn update(&self, _delta: Duration) {}
}
