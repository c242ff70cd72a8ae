use crate::foundation::{
    core::Millis,
    error::{GlintError, GlintResult},
};

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Arbitrary cubic-bezier curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`,
    /// `(1,1)`. The x control values are clamped to `[0, 1]` so the curve
    /// stays a function of time.
    CubicBezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Evaluate a CSS-style cubic-bezier easing at time fraction `t`.
///
/// The spline parameter is recovered from `t` by bisection on the x axis,
/// which is monotonic once the x controls are clamped to `[0, 1]`.
fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    for _ in 0..48 {
        let mid = 0.5 * (lo + hi);
        if bezier_axis(mid, x1, x2) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let s = 0.5 * (lo + hi);
    bezier_axis(s, y1, y2)
}

/// One axis of a cubic bezier with endpoints pinned to 0 and 1.
fn bezier_axis(s: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * c1 + 3.0 * inv * s * s * c2 + s * s * s
}

/// Duration plus easing curve, shared by value across many elements.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingCurve {
    /// Transition length in milliseconds, must be > 0.
    pub duration_ms: u64,
    /// Easing applied over the duration.
    pub ease: Ease,
}

/// The entrance bezier used by every reveal on the page.
const ENTRANCE_BEZIER: Ease = Ease::CubicBezier {
    x1: 0.22,
    y1: 1.0,
    x2: 0.36,
    y2: 1.0,
};

impl TimingCurve {
    /// Create a validated curve with a non-zero duration.
    pub fn new(duration_ms: u64, ease: Ease) -> GlintResult<Self> {
        if duration_ms == 0 {
            return Err(GlintError::validation("TimingCurve duration_ms must be > 0"));
        }
        Ok(Self { duration_ms, ease })
    }

    /// Entrance preset: 600 ms fade/translate reveal.
    pub fn entrance() -> Self {
        Self {
            duration_ms: 600,
            ease: ENTRANCE_BEZIER,
        }
    }

    /// Entrance preset for scale reveals: 500 ms.
    pub fn entrance_scale() -> Self {
        Self {
            duration_ms: 500,
            ease: ENTRANCE_BEZIER,
        }
    }

    /// Hover preset: 300 ms, symmetric in/out.
    pub fn hover() -> Self {
        Self {
            duration_ms: 300,
            ease: Ease::InOutQuad,
        }
    }

    /// Validate static invariants.
    pub fn validate(&self) -> GlintResult<()> {
        if self.duration_ms == 0 {
            return Err(GlintError::validation("TimingCurve duration_ms must be > 0"));
        }
        Ok(())
    }

    /// Eased progress in `[0, 1]` for a transition started at `since`,
    /// sampled at `now`. Instants before `since` yield 0.
    pub fn progress(&self, since: Millis, now: Millis) -> f64 {
        let elapsed = now.since(since);
        if elapsed >= self.duration_ms {
            return 1.0;
        }
        self.ease.apply(elapsed as f64 / self.duration_ms as f64)
    }
}
