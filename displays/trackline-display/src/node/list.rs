//! Horizontal concatenation

use alloc::string::String;
use alloc::vec::Vec;

use embassy_time::Duration;

use super::{guard, ContentNode, Guard, NodeRef};

/// Children rendered side by side, in order
///
/// `update` is forwarded to every child, the same as rows and scroll
/// windows forward it, so a scroll window inside a list keeps moving.
pub struct ListNode {
    children: Guard<Vec<NodeRef>>,
}

impl ListNode {
    pub fn new(children: Vec<NodeRef>) -> Self {
        Self {
            children: guard(children),
        }
    }

    /// Replace all children
    pub fn set_children(&self, children: Vec<NodeRef>) {
        self.children.lock(|c| *c.borrow_mut() = children);
    }

    /// Append a child at the end
    pub fn push(&self, child: NodeRef) {
        self.children.lock(|c| c.borrow_mut().push(child));
    }

    pub fn len(&self) -> usize {
        self.children.lock(|c| c.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<NodeRef> {
        self.children.lock(|c| c.borrow().clone())
    }
}

impl Default for ListNode {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ContentNode for ListNode {
    fn content(&self) -> String {
        let mut out = String::new();
        for child in self.snapshot() {
            out.push_str(&child.content());
        }
        out
    }

    fn update(&self, delta: Duration) {
        for child in self.snapshot() {
            child.update(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ScrollNode, TextNode};
    use alloc::sync::Arc;
    use alloc::vec;

    #[test]
    fn test_concatenates_in_order() {
        let list = ListNode::new(vec![
            Arc::new(TextNode::new("Now: ")) as NodeRef,
            Arc::new(TextNode::new("Song")) as NodeRef,
        ]);
        assert_eq!(list.content(), "Now: Song");
    }

    #[test]
    fn test_empty_list() {
        let list = ListNode::default();
        assert!(list.is_empty());
        assert_eq!(list.content(), "");
    }

    #[test]
    fn test_children_see_text_changes() {
        let title = Arc::new(TextNode::new("A"));
        let list = ListNode::new(vec![title.clone() as NodeRef]);
        title.set_text("B");
        assert_eq!(list.content(), "B");
    }

    #[test]
    fn test_set_children_and_push() {
        let list = ListNode::default();
        list.set_children(vec![Arc::new(TextNode::new("x")) as NodeRef]);
        list.push(Arc::new(TextNode::new("y")));
        assert_eq!(list.len(), 2);
        assert_eq!(list.content(), "xy");
    }

    #[test]
    fn test_update_reaches_nested_scroll() {
        let text = Arc::new(TextNode::new("abcdef"));
        let scroll = Arc::new(ScrollNode::new(text, 3, 1.0));
        let list = ListNode::new(vec![scroll.clone() as NodeRef]);

        assert_eq!(list.content(), "abc");
        list.update(Duration::from_secs(1));
        assert_eq!(list.content(), "bcd");
    }
}
