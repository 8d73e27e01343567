//! Display backend trait
//!
//! Defines the interface the refresh loop pushes finished lines through.

/// A character display addressed by 1-based line
///
/// Implementations serialise their own bus access, so every method takes
/// `&self` and may be called from several tasks.
#[allow(async_fn_in_trait)]
pub trait LineDisplay {
    /// Error type for display operations
    type Error: core::fmt::Debug;

    /// Write text starting at `offset` on a 1-based `line`
    async fn show(&self, text: &str, line: u8, offset: u8) -> Result<(), Self::Error>;

    /// Blank the entire display
    async fn clear(&self) -> Result<(), Self::Error>;

    /// Switch the backlight on or off
    async fn set_backlight(&self, on: bool) -> Result<(), Self::Error>;

    /// Clear, switch the backlight off and release the hardware
    async fn close(self) -> Result<(), Self::Error>
    where
        Self: Sized;
}
