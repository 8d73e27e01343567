//! Player state source
//!
//! Implemented by whatever talks to the media player (for example an HTTP
//! client against the player's status endpoint). The display side only
//! needs pull-style snapshots and tolerates failures.

use crate::state::PlayerState;

/// Pull-style source of player state
#[allow(async_fn_in_trait)]
pub trait StateSource {
    /// Error type for a failed fetch
    type Error: core::fmt::Debug;

    /// Fetch the current player state
    ///
    /// Failures are logged by the caller and never stop the display.
    async fn fetch_state(&mut self) -> Result<PlayerState, Self::Error>;
}
