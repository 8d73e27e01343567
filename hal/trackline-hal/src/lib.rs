//! Trackline Hardware Abstraction Layer
//!
//! This crate defines the bus traits the LCD driver is written against, so
//! the same driver runs on a Linux single-board computer or a bare-metal
//! target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  trackline-drivers (HD44780 driver)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trackline-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ trackline-hal-│       │  test / other │
//! │     linux     │       │     buses     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`i2c::OpenI2cBus`] - Acquiring a bus by its line number

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{I2cBus, OpenI2cBus};
