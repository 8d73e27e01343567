//! Screen model and content node tree for character displays
//!
//! This crate provides:
//! - [`ContentNode`] trait and its variants (text, list, scroll window)
//! - [`RowNode`] clamping one node to a physical line
//! - [`Screen`] holding the rows of one physical display
//! - [`LineDisplay`] trait for the hardware that shows finished lines
//!
//! # Architecture
//!
//! A screen is a strict tree of nodes. The refresh loop advances the tree
//! with [`Screen::update`] and then pulls each row's text; nothing in the
//! tree pushes. Every node guards its own state, so the owner may replace
//! text or children from another task while the refresh loop is running.
//!
//! ```text
//! Screen
//! ├── RowNode(16) ── TextNode("Artist")
//! └── RowNode(16) ── ScrollNode(16, 4 ch/s) ── TextNode("A Title Longer Than The Line")
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod node;
pub mod screen;

// Re-export key types
pub use backend::LineDisplay;
pub use node::{ContentNode, ListNode, NodeRef, RowNode, ScrollNode, TextNode};
pub use screen::Screen;
