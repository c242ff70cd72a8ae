use crate::{animation::ease::TimingCurve, foundation::core::Millis};

/// Pointer-hover state machine for a single element.
///
/// Exactly two states, no intermediates; enter and leave for the same
/// element are totally ordered, so a leave always cancels everything the
/// most recent enter started. Each transition records the blend value it
/// departed from, so a leave in the middle of an enter ramp eases back from
/// the current pose instead of jumping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverState {
    /// Not hovered. `since` is the instant of the last leave, if any.
    Idle {
        /// Instant of the transition into Idle, None before any hover.
        since: Option<Millis>,
        /// Blend value at that instant.
        from: f64,
    },
    /// Hovered since `since`.
    Active {
        /// Instant of the pointer-enter.
        since: Millis,
        /// Blend value at that instant.
        from: f64,
    },
}

impl HoverState {
    /// Initial state: never hovered.
    pub fn idle() -> Self {
        Self::Idle {
            since: None,
            from: 0.0,
        }
    }

    /// Whether the pointer is currently over the element.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Handle a pointer-enter at `now`. Repeated enters are a no-op, so the
    /// activation instant (and any loop clock derived from it) is only
    /// reset on a real Idle → Active edge. Returns whether the state
    /// changed.
    pub fn enter(&mut self, curve: TimingCurve, now: Millis) -> bool {
        match *self {
            Self::Idle { .. } => {
                let from = self.blend(curve, now);
                *self = Self::Active { since: now, from };
                true
            }
            Self::Active { .. } => false,
        }
    }

    /// Handle a pointer-leave at `now`. Idempotent. Returns whether the
    /// state changed.
    pub fn leave(&mut self, curve: TimingCurve, now: Millis) -> bool {
        match *self {
            Self::Active { .. } => {
                let from = self.blend(curve, now);
                *self = Self::Idle {
                    since: Some(now),
                    from,
                };
                true
            }
            Self::Idle { .. } => false,
        }
    }

    /// Eased hover blend in `[0, 1]`: 0 fully idle, 1 fully hovered.
    pub fn blend(&self, curve: TimingCurve, now: Millis) -> f64 {
        match *self {
            Self::Idle { since: None, .. } => 0.0,
            Self::Idle {
                since: Some(since),
                from,
            } => from * (1.0 - curve.progress(since, now)),
            Self::Active { since, from } => {
                from + (1.0 - from) * curve.progress(since, now)
            }
        }
    }

    /// Activation instant of the current hover, if active.
    pub fn active_since(&self) -> Option<Millis> {
        match *self {
            Self::Active { since, .. } => Some(since),
            Self::Idle { .. } => None,
        }
    }
}

/// Computed visual values for a lifted element at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LiftSample {
    /// Vertical offset in pixels (negative is up).
    pub translate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

/// Small reversible hover response used by cards and call-to-action
/// buttons: rise by `lift_px` and/or scale toward `to_scale`.
#[derive(Clone, Debug)]
pub struct HoverLift {
    curve: TimingCurve,
    lift_px: f64,
    to_scale: f64,
    state: HoverState,
}

impl HoverLift {
    /// Create an idle lift effect.
    pub fn new(curve: TimingCurve, lift_px: f64, to_scale: f64) -> Self {
        Self {
            curve,
            lift_px,
            to_scale,
            state: HoverState::idle(),
        }
    }

    /// Pointer entered the element.
    pub fn pointer_enter(&mut self, now: Millis) {
        self.state.enter(self.curve, now);
    }

    /// Pointer left the element.
    pub fn pointer_leave(&mut self, now: Millis) {
        self.state.leave(self.curve, now);
    }

    /// Whether the element is currently hovered.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Sample the lift at `now`.
    pub fn sample(&self, now: Millis) -> LiftSample {
        let t = self.state.blend(self.curve, now);
        LiftSample {
            translate_y: -self.lift_px * t,
            scale: 1.0 + (self.to_scale - 1.0) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> TimingCurve {
        TimingCurve::hover()
    }

    #[test]
    fn enter_then_leave_cycles() {
        let mut s = HoverState::idle();
        assert!(s.enter(curve(), Millis(0)));
        assert!(!s.enter(curve(), Millis(10)));
        assert_eq!(s.active_since(), Some(Millis(0)));
        assert!(s.leave(curve(), Millis(400)));
        assert!(!s.leave(curve(), Millis(401)));
        assert!(!s.is_active());
    }

    #[test]
    fn blend_ramps_up_and_back_down() {
        let mut s = HoverState::idle();
        assert_eq!(s.blend(curve(), Millis(500)), 0.0);
        s.enter(curve(), Millis(0));
        assert_eq!(s.blend(curve(), Millis(0)), 0.0);
        assert_eq!(s.blend(curve(), Millis(300)), 1.0);
        s.leave(curve(), Millis(1_000));
        assert_eq!(s.blend(curve(), Millis(1_000)), 1.0);
        assert_eq!(s.blend(curve(), Millis(1_300)), 0.0);
    }

    #[test]
    fn leave_mid_ramp_does_not_jump() {
        let mut s = HoverState::idle();
        s.enter(curve(), Millis(0));
        let mid = s.blend(curve(), Millis(150));
        assert!(mid > 0.0 && mid < 1.0);
        s.leave(curve(), Millis(150));
        // Continuous at the transition instant, then decays.
        assert_eq!(s.blend(curve(), Millis(150)), mid);
        assert!(s.blend(curve(), Millis(200)) < mid);
        assert_eq!(s.blend(curve(), Millis(450)), 0.0);
    }

    #[test]
    fn lift_moves_up_and_reverts() {
        let mut l = HoverLift::new(curve(), 4.0, 1.0);
        assert_eq!(l.sample(Millis(0)).translate_y, 0.0);
        l.pointer_enter(Millis(0));
        assert_eq!(l.sample(Millis(300)).translate_y, -4.0);
        l.pointer_leave(Millis(500));
        assert_eq!(l.sample(Millis(800)).translate_y, 0.0);
        assert_eq!(l.sample(Millis(800)).scale, 1.0);
    }

    #[test]
    fn lift_scale_variant() {
        let mut l = HoverLift::new(curve(), 0.0, 1.02);
        l.pointer_enter(Millis(0));
        let s = l.sample(Millis(300));
        assert_eq!(s.translate_y, 0.0);
        assert!((s.scale - 1.02).abs() < 1e-12);
    }
}
