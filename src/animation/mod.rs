//! Animation core: easing curves, keyframed value tracks, and one-shot
//! reveal transitions.

pub mod anim;
pub mod ease;
pub mod reveal;
