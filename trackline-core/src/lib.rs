//! Board-agnostic shared types for trackline
//!
//! This crate contains everything that neither touches the bus nor renders
//! text:
//!
//! - Configuration type definitions and validation
//! - Player state as reported by the media player
//! - The [`traits::StateSource`] collaborator interface

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod state;
pub mod traits;
