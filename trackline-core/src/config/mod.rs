//! Configuration types
//!
//! Explicit configuration handed to each component at construction.

pub mod types;

pub use types::*;
