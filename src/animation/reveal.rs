use crate::{animation::ease::TimingCurve, foundation::core::Millis};

/// Visibility state of a revealable element.
///
/// The transition is monotonic: once `Visible`, an element never returns to
/// `Hidden`, whatever sequence of mount or viewport events follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Resting state before any trigger fired.
    Hidden,
    /// Activated at `since`. `since` may lie in the future for staggered
    /// children, which hold their hidden pose until the clock reaches it.
    Visible {
        /// Scheduled activation instant.
        since: Millis,
    },
}

impl RevealState {
    /// Whether the element has been activated (possibly scheduled ahead).
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }
}

/// Visual shape of the hidden-to-visible transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealStyle {
    /// Fade in while translating up from `offset_px` below the resting
    /// position.
    FadeUp {
        /// Initial downward offset in pixels.
        offset_px: f64,
    },
    /// Fade in while scaling up from `from_scale`.
    ScaleIn {
        /// Initial scale factor.
        from_scale: f64,
    },
}

impl RevealStyle {
    /// Standard fade/translate entrance (40 px rise).
    pub fn fade_up() -> Self {
        Self::FadeUp { offset_px: 40.0 }
    }

    /// Standard scale entrance (0.9 → 1.0).
    pub fn scale_in() -> Self {
        Self::ScaleIn { from_scale: 0.9 }
    }
}

/// Computed visual values for a revealable element at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealSample {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels (positive is down).
    pub translate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

/// One-shot hidden-to-visible animator for a single element.
#[derive(Clone, Debug)]
pub struct Reveal {
    curve: TimingCurve,
    style: RevealStyle,
    state: RevealState,
}

impl Reveal {
    /// Create a hidden reveal with the given curve and style.
    pub fn new(curve: TimingCurve, style: RevealStyle) -> Self {
        Self {
            curve,
            style,
            state: RevealState::Hidden,
        }
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Transition Hidden → Visible with activation instant `at`. Calling
    /// this on an already-visible element is a no-op; the first activation
    /// wins. Returns whether the state changed.
    pub fn activate(&mut self, at: Millis) -> bool {
        match self.state {
            RevealState::Hidden => {
                self.state = RevealState::Visible { since: at };
                true
            }
            RevealState::Visible { .. } => false,
        }
    }

    /// Sample the reveal at `now`.
    pub fn sample(&self, now: Millis) -> RevealSample {
        let progress = match self.state {
            RevealState::Hidden => 0.0,
            RevealState::Visible { since } => self.curve.progress(since, now),
        };

        match self.style {
            RevealStyle::FadeUp { offset_px } => RevealSample {
                opacity: progress,
                translate_y: offset_px * (1.0 - progress),
                scale: 1.0,
            },
            RevealStyle::ScaleIn { from_scale } => RevealSample {
                opacity: progress,
                translate_y: 0.0,
                scale: from_scale + (1.0 - from_scale) * progress,
            },
        }
    }
}

/// Scheduling offsets for an ordered group of child reveals sharing one
/// activation event.
///
/// Offsets are pure scheduling: children animate independently and are never
/// blocked on a sibling's completion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaggerSpec {
    /// Delay before the first child, in milliseconds.
    pub start_delay_ms: u64,
    /// Additional delay per child index, in milliseconds.
    pub inter_child_ms: u64,
    /// Ordered ids of the child elements.
    pub children: Vec<String>,
}

impl StaggerSpec {
    /// Activation offset of the child at `index`, relative to the group's
    /// activation instant: `start_delay + index * inter_child`.
    pub fn child_offset_ms(&self, index: usize) -> u64 {
        self.start_delay_ms
            .saturating_add((index as u64).saturating_mul(self.inter_child_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> Reveal {
        Reveal::new(TimingCurve::entrance(), RevealStyle::fade_up())
    }

    #[test]
    fn activate_is_idempotent_and_monotonic() {
        let mut r = fade();
        assert!(!r.state().is_visible());
        assert!(r.activate(Millis(100)));
        assert!(!r.activate(Millis(999)));
        assert_eq!(r.state(), RevealState::Visible { since: Millis(100) });
    }

    #[test]
    fn hidden_sample_is_resting_offset() {
        let r = fade();
        let s = r.sample(Millis(1_000));
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.translate_y, 40.0);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn sample_reaches_final_pose() {
        let mut r = fade();
        r.activate(Millis(0));
        let s = r.sample(Millis(600));
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.translate_y, 0.0);
    }

    #[test]
    fn scheduled_future_activation_holds_hidden_pose() {
        let mut r = fade();
        r.activate(Millis(500));
        let s = r.sample(Millis(200));
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.translate_y, 40.0);
        assert!(r.state().is_visible());
    }

    #[test]
    fn scale_in_interpolates_scale() {
        let mut r = Reveal::new(TimingCurve::entrance_scale(), RevealStyle::scale_in());
        assert_eq!(r.sample(Millis(0)).scale, 0.9);
        r.activate(Millis(0));
        assert_eq!(r.sample(Millis(500)).scale, 1.0);
    }

    #[test]
    fn stagger_offsets_follow_index() {
        let s = StaggerSpec {
            start_delay_ms: 200,
            inter_child_ms: 100,
            children: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(s.child_offset_ms(0), 200);
        assert_eq!(s.child_offset_ms(1), 300);
        assert_eq!(s.child_offset_ms(2), 400);
    }
}
