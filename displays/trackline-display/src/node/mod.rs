//! Content nodes
//!
//! A node produces the text it currently shows and advances its own state
//! when time passes. Nodes are shared as [`NodeRef`] trait objects; a node
//! must have exactly one parent, otherwise it is advanced twice per tick.

use alloc::string::String;
use alloc::sync::Arc;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Duration;

pub mod list;
pub mod row;
pub mod scroll;
pub mod text;

pub use list::ListNode;
pub use row::RowNode;
pub use scroll::ScrollNode;
pub use text::TextNode;

/// Something that renders text and may change over time
pub trait ContentNode: Send + Sync {
    /// Current text of the node
    fn content(&self) -> String;

    /// Advance time-dependent state by `delta`
    fn update(&self, delta: Duration);
}

/// Shared reference to a node in the tree
pub type NodeRef = Arc<dyn ContentNode>;

/// Per-node exclusive-access guard
///
/// Every read-modify-copy of node state happens inside one `lock` call.
/// Guards never nest: a node copies its child reference out of its own
/// guard before calling into the child.
pub(crate) type Guard<T> = Mutex<CriticalSectionRawMutex, RefCell<T>>;

pub(crate) fn guard<T>(value: T) -> Guard<T> {
    Mutex::new(RefCell::new(value))
}

/// Number of display cells a string occupies
pub(crate) fn cell_count(text: &str) -> usize {
    text.chars().count()
}

/// Exactly `length` cells of `text` starting at cell `start`, space padded
pub(crate) fn window(text: &str, start: usize, length: usize) -> String {
    let mut out = String::with_capacity(length);
    out.extend(text.chars().skip(start).take(length));
    let missing = length - cell_count(&out);
    out.extend(core::iter::repeat(' ').take(missing));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_pads_and_truncates() {
        assert_eq!(window("abc", 0, 5), "abc  ");
        assert_eq!(window("abcdef", 2, 3), "cde");
        assert_eq!(window("abc", 5, 2), "  ");
        assert_eq!(window("", 0, 0), "");
    }

    #[test]
    fn test_window_counts_chars_not_bytes() {
        assert_eq!(window("héllo", 1, 3), "éll");
        assert_eq!(cell_count("héllo"), 5);
    }
}
