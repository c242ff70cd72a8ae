//! Declarative page model and the built-in profile page.

pub mod assembly;
pub mod model;
