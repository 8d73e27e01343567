//! Media player state
//!
//! What the display needs to know about the player: whether it is playing,
//! and what.

pub mod player;

pub use player::{PlaybackStatus, PlayerState};
