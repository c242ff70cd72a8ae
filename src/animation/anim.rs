use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{GlintError, GlintResult},
};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Generic animation node: keyframed values plus composable time remapping.
///
/// Time is local to the owning effect, in milliseconds; 0 is the effect's
/// activation instant.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim<T> {
    /// Piecewise animation defined by explicit keyframes.
    Keyframes(Keyframes<T>),
    /// Animation expression wrapping another animation.
    Expr(Expr<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    /// Loop `inner` over `period_ms` with the given mode.
    pub fn looping(inner: Anim<T>, period_ms: u64, mode: LoopMode) -> Self {
        Self::Expr(Expr::Loop {
            inner: Box::new(inner),
            period_ms,
            mode,
        })
    }

    /// Sample the animation at local time `local_ms`.
    pub fn sample(&self, local_ms: u64) -> GlintResult<T> {
        match self {
            Self::Keyframes(kf) => kf.sample(local_ms),
            Self::Expr(expr) => expr.sample(local_ms),
        }
    }

    /// Validate static invariants for this animation tree.
    pub fn validate(&self) -> GlintResult<()> {
        match self {
            Self::Keyframes(kf) => kf.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }
}

/// Keyframed animation with optional default value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keyframes sorted by `at_ms`.
    pub keys: Vec<Keyframe<T>>,
    /// Interpolation mode between adjacent keyframes.
    pub mode: InterpMode,
    /// Value used when `keys` is empty.
    pub default: Option<T>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Validate keyframe ordering and default/fallback requirements.
    pub fn validate(&self) -> GlintResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(GlintError::animation(
                "Keyframes must have at least one key or a default value",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].at_ms <= w[1].at_ms) {
            return Err(GlintError::animation("Keyframes keys must be sorted by at_ms"));
        }
        Ok(())
    }

    /// Sample the keyframed value at local time `local_ms`.
    pub fn sample(&self, local_ms: u64) -> GlintResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| GlintError::animation("Keyframes has no keys and no default"));
        }

        let idx = self.keys.partition_point(|k| k.at_ms <= local_ms);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.at_ms.saturating_sub(a.at_ms);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        let t = ((local_ms - a.at_ms) as f64) / (denom as f64);
        let te = a.ease.apply(t);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, te)),
        }
    }
}

/// One keyframe in a keyframed animation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Local millisecond offset of this key.
    pub at_ms: u64,
    /// Value at `at_ms`.
    pub value: T,
    /// Easing function applied toward the next keyframe.
    pub ease: Ease,
}

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    /// Hold the previous key value until the next keyframe.
    Hold,
    /// Interpolate between keyframes using [`Ease`].
    Linear,
}

/// Composable animation expression operators.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr<T> {
    /// Delay an animation by `by_ms` milliseconds.
    Delay {
        /// Inner animation.
        inner: Box<Anim<T>>,
        /// Delay amount in milliseconds.
        by_ms: u64,
    },
    /// Loop local time over `period_ms` using a loop mode.
    Loop {
        /// Inner animation.
        inner: Box<Anim<T>>,
        /// Loop period in milliseconds (`> 0`).
        period_ms: u64,
        /// Loop mapping strategy.
        mode: LoopMode,
    },
}

/// Looping strategy used by the loop expression variant.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Wrap at the period boundary.
    Repeat,
    /// Bounce forward/backward across the period.
    PingPong,
}

impl<T> Expr<T>
where
    T: Lerp + Clone,
{
    /// Validate expression-specific invariants recursively.
    pub fn validate(&self) -> GlintResult<()> {
        match self {
            Self::Delay { inner, by_ms: _ } => inner.validate(),
            Self::Loop {
                inner,
                period_ms,
                mode: _,
            } => {
                if *period_ms == 0 {
                    return Err(GlintError::animation("Loop period_ms must be > 0"));
                }
                inner.validate()
            }
        }
    }

    /// Sample this expression by remapping local time.
    pub fn sample(&self, local_ms: u64) -> GlintResult<T> {
        match self {
            Self::Delay { inner, by_ms } => inner.sample(local_ms.saturating_sub(*by_ms)),
            Self::Loop {
                inner,
                period_ms,
                mode,
            } => {
                if *period_ms == 0 {
                    return Err(GlintError::animation("Loop period_ms must be > 0"));
                }
                let mapped = match mode {
                    LoopMode::Repeat => local_ms % period_ms,
                    LoopMode::PingPong => {
                        let cycle = 2 * period_ms;
                        let pos = local_ms % cycle;
                        if pos < *period_ms { pos } else { cycle - pos }
                    }
                };
                inner.sample(mapped)
            }
        }
    }
}
