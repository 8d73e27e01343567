//! Collaborator interfaces
//!
//! These traits define what trackline expects from the world around it.

pub mod source;

pub use source::StateSource;
