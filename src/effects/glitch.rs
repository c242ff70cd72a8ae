use crate::{
    animation::anim::{Anim, InterpMode, Keyframe, Keyframes, Lerp, LoopMode},
    animation::ease::{Ease, TimingCurve},
    effects::hover::HoverState,
    foundation::core::{Millis, Rgba8, Vec2},
    foundation::error::{GlintError, GlintResult},
};

/// Pixel-compositing rule for an overlaid layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over.
    Normal,
    /// Darkening multiply.
    Multiply,
    /// Inverse multiply.
    Screen,
    /// Lighten by dividing through the inverted backdrop.
    ColorDodge,
    /// Per-channel maximum.
    Lighten,
    /// Absolute difference.
    Difference,
    /// Difference with reduced contrast.
    Exclusion,
}

/// Horizontal clip band expressed as fractions of the frame height.
///
/// `[from_frac, to_frac)` with `0 <= from < to <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipBand {
    /// Top edge of the band.
    pub from_frac: f64,
    /// Bottom edge of the band.
    pub to_frac: f64,
}

impl ClipBand {
    /// Band covering the top `fraction` of the frame.
    pub fn top(fraction: f64) -> Self {
        Self {
            from_frac: 0.0,
            to_frac: fraction,
        }
    }

    /// Band from `fraction` down to the bottom edge.
    pub fn below(fraction: f64) -> Self {
        Self {
            from_frac: fraction,
            to_frac: 1.0,
        }
    }

    fn validate(&self) -> GlintResult<()> {
        if !(0.0..=1.0).contains(&self.from_frac)
            || !(0.0..=1.0).contains(&self.to_frac)
            || self.from_frac >= self.to_frac
        {
            return Err(GlintError::validation(
                "clip band must satisfy 0 <= from < to <= 1",
            ));
        }
        Ok(())
    }
}

/// One colored halo of the frame decoration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Glow {
    /// Shadow offset in pixels.
    pub offset: Vec2,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Glow color at full hover strength.
    pub color: Rgba8,
}

/// Border and glow decoration around the media element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameDecor {
    /// Outline color while idle.
    pub idle_border: Rgba8,
    /// Outline color at full hover strength.
    pub active_border: Rgba8,
    /// Offset colored glows simulating chromatic aberration, drawn at
    /// hover strength.
    pub glows: Vec<Glow>,
}

/// One duplicated, clipped, color-shifted copy of the base media.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GlitchLayerSpec {
    /// Clip region of this copy.
    pub band: ClipBand,
    /// Compositing rule against the base image.
    pub blend: BlendMode,
    /// Layer opacity while mounted.
    pub opacity: f64,
    /// Loop period of the jitter cycle in milliseconds.
    pub period_ms: u64,
    /// Looping positional jitter, local clock zeroed at activation.
    pub jitter: Anim<Vec2>,
    /// Optional looping hue-rotation sweep in degrees.
    pub hue_deg: Option<Anim<f64>>,
}

impl GlitchLayerSpec {
    fn validate(&self) -> GlintResult<()> {
        self.band.validate()?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(GlintError::validation(
                "glitch layer opacity must be in [0, 1]",
            ));
        }
        if self.period_ms == 0 {
            return Err(GlintError::validation("glitch layer period_ms must be > 0"));
        }
        self.jitter.validate()?;
        if let Some(hue) = &self.hue_deg {
            hue.validate()?;
        }
        Ok(())
    }
}

/// Full configuration of the hover glitch compositor for one media element.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GlitchSpec {
    /// Transition curve shared by zoom and decoration blends.
    pub curve: TimingCurve,
    /// Base media scale at full hover strength.
    pub zoom_to: f64,
    /// Constant decorative scanline overlay opacity.
    pub scanline_opacity: f64,
    /// Border/glow decoration.
    pub decor: FrameDecor,
    /// Glitch layers mounted while hovered.
    pub layers: Vec<GlitchLayerSpec>,
}

impl GlitchSpec {
    /// The portrait rig: two offset copies on independent loop cycles.
    ///
    /// Layer A covers the top 45 % on a fast 300 ms jitter loop, layer B
    /// the remaining 55 % on a slower 500 ms loop that also sweeps hue in
    /// quarter turns.
    pub fn portrait() -> Self {
        let accent = Rgba8::new(168, 85, 247, 255);

        Self {
            curve: TimingCurve::hover(),
            zoom_to: 1.05,
            scanline_opacity: 0.1,
            decor: FrameDecor {
                idle_border: Rgba8::new(255, 255, 255, 26),
                active_border: accent,
                glows: vec![
                    Glow {
                        offset: Vec2::ZERO,
                        blur_px: 20.0,
                        color: Rgba8::new(168, 85, 247, 102),
                    },
                    Glow {
                        offset: Vec2::new(-2.0, 0.0),
                        blur_px: 0.0,
                        color: Rgba8::new(59, 130, 246, 128),
                    },
                    Glow {
                        offset: Vec2::new(2.0, 0.0),
                        blur_px: 0.0,
                        color: Rgba8::new(236, 72, 153, 128),
                    },
                ],
            },
            layers: vec![
                GlitchLayerSpec {
                    band: ClipBand::top(0.45),
                    blend: BlendMode::ColorDodge,
                    opacity: 0.7,
                    period_ms: 300,
                    jitter: looped_jitter(
                        300,
                        &[
                            (0, Vec2::ZERO),
                            (60, Vec2::new(-3.0, 3.0)),
                            (120, Vec2::new(-3.0, -3.0)),
                            (180, Vec2::new(3.0, 3.0)),
                            (240, Vec2::new(3.0, -3.0)),
                        ],
                    ),
                    hue_deg: None,
                },
                GlitchLayerSpec {
                    band: ClipBand::below(0.45),
                    blend: BlendMode::Exclusion,
                    opacity: 0.7,
                    period_ms: 500,
                    jitter: looped_jitter(
                        500,
                        &[
                            (0, Vec2::ZERO),
                            (125, Vec2::new(3.0, -3.0)),
                            (250, Vec2::new(-3.0, 3.0)),
                            (375, Vec2::new(3.0, 3.0)),
                        ],
                    ),
                    hue_deg: Some(looped_steps(
                        500,
                        &[(0, 0.0), (125, 90.0), (250, 180.0), (375, 270.0)],
                    )),
                },
            ],
        }
    }

    /// Validate static invariants, including that the layer clip bands tile
    /// the full frame with no gap and no overlap.
    pub fn validate(&self) -> GlintResult<()> {
        self.curve.validate()?;
        if !self.zoom_to.is_finite() || self.zoom_to <= 0.0 {
            return Err(GlintError::validation("glitch zoom_to must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.scanline_opacity) {
            return Err(GlintError::validation(
                "glitch scanline_opacity must be in [0, 1]",
            ));
        }
        if self.layers.is_empty() {
            return Err(GlintError::validation("glitch spec needs at least one layer"));
        }
        for layer in &self.layers {
            layer.validate()?;
        }

        let mut bands: Vec<ClipBand> = self.layers.iter().map(|l| l.band).collect();
        bands.sort_by(|a, b| a.from_frac.total_cmp(&b.from_frac));
        const EPS: f64 = 1e-9;
        if bands[0].from_frac.abs() > EPS || (bands[bands.len() - 1].to_frac - 1.0).abs() > EPS {
            return Err(GlintError::validation(
                "glitch clip bands must cover the full frame",
            ));
        }
        if !bands
            .windows(2)
            .all(|w| (w[0].to_frac - w[1].from_frac).abs() <= EPS)
        {
            return Err(GlintError::validation(
                "glitch clip bands must be disjoint and contiguous",
            ));
        }
        Ok(())
    }
}

/// Hold-mode jitter keyframes wrapped in a repeat loop.
fn looped_jitter(period_ms: u64, keys: &[(u64, Vec2)]) -> Anim<Vec2> {
    Anim::looping(step_track(keys), period_ms, LoopMode::Repeat)
}

/// Hold-mode scalar keyframes wrapped in a repeat loop.
fn looped_steps(period_ms: u64, keys: &[(u64, f64)]) -> Anim<f64> {
    Anim::looping(step_track(keys), period_ms, LoopMode::Repeat)
}

fn step_track<T: Lerp + Clone>(keys: &[(u64, T)]) -> Anim<T> {
    Anim::Keyframes(Keyframes {
        keys: keys
            .iter()
            .map(|(at_ms, value)| Keyframe {
                at_ms: *at_ms,
                value: value.clone(),
                ease: Ease::Linear,
            })
            .collect(),
        mode: InterpMode::Hold,
        default: None,
    })
}

/// One mounted glitch layer at one instant.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct GlitchLayerFrame {
    /// Clip region of the copy.
    pub band: ClipBand,
    /// Compositing rule.
    pub blend: BlendMode,
    /// Current jitter offset in pixels.
    pub translate: Vec2,
    /// Current hue rotation in degrees.
    pub hue_rotate_deg: f64,
    /// Layer opacity.
    pub opacity: f64,
}

/// Computed compositor output for the media element at one instant.
#[derive(Clone, Debug, serde::Serialize)]
pub struct GlitchSample {
    /// Base media scale.
    pub zoom: f64,
    /// Current outline color.
    pub border: Rgba8,
    /// Halo strength in `[0, 1]`, scaling `glows`.
    pub glow_strength: f64,
    /// Halo descriptors at full strength.
    pub glows: Vec<Glow>,
    /// Mounted glitch layers; empty while idle.
    pub layers: Vec<GlitchLayerFrame>,
    /// Constant scanline overlay opacity.
    pub scanline_opacity: f64,
}

/// Runtime glitch compositor bound to one media element.
///
/// Layers exist only while the pointer is over the element: they mount on
/// the Idle → Active edge with their loop clocks zeroed, and unmount
/// synchronously on leave. Mount/unmount (rather than opacity toggling)
/// guarantees every activation restarts the loops from keyframe zero, so
/// repeated hovers never desync.
#[derive(Clone, Debug)]
pub struct GlitchRig {
    spec: GlitchSpec,
    state: HoverState,
}

impl GlitchRig {
    /// Create an idle rig from a validated spec.
    pub fn new(spec: GlitchSpec) -> GlintResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            state: HoverState::idle(),
        })
    }

    /// Pointer entered the media element.
    pub fn pointer_enter(&mut self, now: Millis) {
        if self.state.enter(self.spec.curve, now) {
            tracing::debug!(at = now.0, "glitch rig activated");
        }
    }

    /// Pointer left the media element. Cancels all hover-spawned loops
    /// unconditionally.
    pub fn pointer_leave(&mut self, now: Millis) {
        if self.state.leave(self.spec.curve, now) {
            tracing::debug!(at = now.0, "glitch rig deactivated");
        }
    }

    /// Whether the rig is in the Active state.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Sample the compositor at `now`.
    ///
    /// When the host lacks blend-mode support the glitch copies are
    /// suppressed while zoom and decoration still function.
    pub fn sample(&self, now: Millis, blend_modes_supported: bool) -> GlintResult<GlitchSample> {
        let t = self.state.blend(self.spec.curve, now);

        let mut layers = Vec::new();
        if blend_modes_supported && let Some(since) = self.state.active_since() {
            let local = now.since(since);
            layers.reserve(self.spec.layers.len());
            for layer in &self.spec.layers {
                let translate = layer.jitter.sample(local)?;
                let hue_rotate_deg = match &layer.hue_deg {
                    Some(hue) => hue.sample(local)?,
                    None => 0.0,
                };
                layers.push(GlitchLayerFrame {
                    band: layer.band,
                    blend: layer.blend,
                    translate,
                    hue_rotate_deg,
                    opacity: layer.opacity,
                });
            }
        }

        Ok(GlitchSample {
            zoom: 1.0 + (self.spec.zoom_to - 1.0) * t,
            border: Rgba8::lerp(&self.spec.decor.idle_border, &self.spec.decor.active_border, t),
            glow_strength: t,
            glows: self.spec.decor.glows.clone(),
            layers,
            scanline_opacity: self.spec.scanline_opacity,
        })
    }
}
