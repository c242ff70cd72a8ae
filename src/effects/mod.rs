//! Pointer-driven effects: the layered glitch compositor and small hover
//! lifts.

pub mod glitch;
pub mod hover;
