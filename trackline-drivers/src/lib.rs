//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in trackline-display on top of the trackline-hal bus traits:
//!
//! - Character LCDs (HD44780 behind a PCF8574 I2C backpack)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;

pub use lcd::{Hd44780, LcdError, Status};
