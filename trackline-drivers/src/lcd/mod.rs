//! Character LCD drivers

mod hd44780;

pub use hd44780::{Hd44780, Status};

use trackline_protocol::AddressError;

/// LCD driver errors
///
/// Generic over the error type of the underlying bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError<E> {
    /// The bus handle could not be acquired
    BusOpenFailed(E),
    /// A write transaction was not acknowledged
    BusWriteFailed(E),
    /// A read transaction failed
    BusReadFailed(E),
    /// Line number outside 1-4
    InvalidLine(u8),
}

impl<E> From<AddressError> for LcdError<E> {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::InvalidLine(line) => LcdError::InvalidLine(line),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for LcdError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LcdError::BusOpenFailed(e) => write!(f, "failed to open bus: {:?}", e),
            LcdError::BusWriteFailed(e) => write!(f, "bus write failed: {:?}", e),
            LcdError::BusReadFailed(e) => write!(f, "bus read failed: {:?}", e),
            LcdError::InvalidLine(line) => write!(f, "line {} is not valid", line),
        }
    }
}
