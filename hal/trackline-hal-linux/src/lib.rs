//! Linux HAL for trackline
//!
//! Implements the [`trackline_hal`] traits on top of the kernel's i2c-dev
//! interface (`/dev/i2c-N`), as found on a Raspberry Pi.

#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{LinuxBusError, LinuxI2c};
