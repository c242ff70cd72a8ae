//! Shared foundation types: clock, color, errors.

pub mod core;
pub mod error;
