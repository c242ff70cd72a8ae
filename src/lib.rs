//! glint is a deterministic animation orchestration engine for a marketing
//! profile page.
//!
//! The page is described declaratively ([`Page`]): elements carry reveal,
//! hover, and pulse bindings next to the static content they present. The
//! host mounts the page into a [`PageEngine`], forwards timestamped
//! [`HostEvent`]s (viewport intersections, pointer enter/leave), and samples
//! the engine whenever it wants to paint. The engine never reads a clock and
//! never spawns a thread, so identical inputs always produce identical
//! [`PageSnapshot`]s.
//!
//! ```
//! use glint::{profile_page, HostCaps, HostEvent, Millis, PageEngine};
//!
//! # fn main() -> glint::GlintResult<()> {
//! let mut engine = PageEngine::mount(profile_page(), HostCaps::default(), Millis(0))?;
//! engine.dispatch(
//!     Millis(450),
//!     HostEvent::Intersection { id: "deployments".into(), visible_fraction: 0.4 },
//! )?;
//! let snapshot = engine.sample(Millis(900))?;
//! assert_eq!(snapshot.elements.len(), engine.page().elements.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod animation;
pub mod effects;
pub mod engine;
pub mod foundation;
pub mod scene;
pub mod trigger;

pub use animation::{
    anim::{Anim, InterpMode, Keyframe, Keyframes, LoopMode},
    ease::{Ease, TimingCurve},
    reveal::{Reveal, RevealSample, RevealState, RevealStyle, StaggerSpec},
};
pub use effects::{
    glitch::{BlendMode, ClipBand, GlitchRig, GlitchSample, GlitchSpec},
    hover::{HoverLift, HoverState, LiftSample},
};
pub use engine::{ElementVisual, HostCaps, HostEvent, PageEngine, PageSnapshot};
pub use foundation::{
    core::{Millis, Rgba8, Vec2},
    error::{GlintError, GlintResult},
};
pub use scene::{assembly::profile_page, model::Page};
pub use trigger::viewport::ViewportWatch;
