//! Async loops
//!
//! Each loop runs independently and returns when its stop signal fires.
//! They are plain async functions so the caller picks the executor.

pub mod poll;
pub mod refresh;

pub use poll::{poll_loop, poll_once, PollOutcome};
pub use refresh::refresh_loop;
