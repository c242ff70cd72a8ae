//! Event triggers that promote elements out of their resting state.

pub mod viewport;
