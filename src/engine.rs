//! The sampled orchestration engine.
//!
//! [`PageEngine`] owns the runtime state of every element binding. The host
//! feeds it timestamped [`HostEvent`]s and samples it at instants of its
//! choosing; the engine itself holds no clock, timer, or thread, so a given
//! event history and sampling schedule always produce the same snapshots.

use std::collections::BTreeMap;

use crate::{
    animation::{
        anim::{Anim, InterpMode, Keyframe, Keyframes, LoopMode},
        ease::Ease,
        reveal::{Reveal, RevealState},
    },
    effects::{
        glitch::{GlitchRig, GlitchSample},
        hover::HoverLift,
    },
    foundation::{
        core::Millis,
        error::{GlintError, GlintResult},
    },
    scene::model::{HoverSpec, Page, PulseSpec, Trigger},
    trigger::viewport::ViewportWatch,
};

/// Capabilities of the hosting environment, probed once before mount.
#[derive(Clone, Copy, Debug)]
pub struct HostCaps {
    /// Whether the host delivers viewport intersection events. When absent,
    /// viewport-triggered reveals fail open and activate at mount.
    pub intersection_events: bool,
    /// Whether the host can composite non-normal blend modes. When absent,
    /// glitch rigs degrade to zoom and decoration only.
    pub blend_modes: bool,
}

impl Default for HostCaps {
    fn default() -> Self {
        Self {
            intersection_events: true,
            blend_modes: true,
        }
    }
}

/// A timestamped input from the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Intersection observation for one element.
    Intersection {
        /// Observed element id.
        id: String,
        /// Fraction of the element currently visible, in `[0, 1]`.
        visible_fraction: f64,
    },
    /// Pointer entered an element's hover region.
    PointerEnter {
        /// Element id.
        id: String,
    },
    /// Pointer left an element's hover region.
    PointerLeave {
        /// Element id.
        id: String,
    },
}

/// Runtime hover binding of one element.
enum HoverRig {
    Glitch(GlitchRig),
    Lift(HoverLift),
}

impl HoverRig {
    fn pointer_enter(&mut self, now: Millis) {
        match self {
            Self::Glitch(rig) => rig.pointer_enter(now),
            Self::Lift(rig) => rig.pointer_enter(now),
        }
    }

    fn pointer_leave(&mut self, now: Millis) {
        match self {
            Self::Glitch(rig) => rig.pointer_leave(now),
            Self::Lift(rig) => rig.pointer_leave(now),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Glitch(rig) => rig.is_active(),
            Self::Lift(rig) => rig.is_active(),
        }
    }
}

/// Runtime state of one element.
struct ElementRig {
    reveal: Option<Reveal>,
    hover: Option<HoverRig>,
    pulse: Option<Anim<f64>>,
}

/// Computed visual values for one element at one instant.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ElementVisual {
    /// Element id.
    pub id: String,
    /// Composite opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels (positive is down).
    pub translate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Glitch compositor output, present only for elements carrying one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glitch: Option<GlitchSample>,
}

/// One full-page sample: every element's visual values at `now`, in
/// declaration order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PageSnapshot {
    /// Sampling instant.
    pub now: Millis,
    /// Per-element visuals, in the page's declaration order.
    pub elements: Vec<ElementVisual>,
}

/// Event-driven, clockless animation engine for one [`Page`].
pub struct PageEngine {
    page: Page,
    caps: HostCaps,
    mounted_at: Millis,
    rigs: Vec<ElementRig>,
    index: BTreeMap<String, usize>,
    watch: ViewportWatch,
}

impl PageEngine {
    /// Validate `page` and mount it at instant `now`.
    ///
    /// Mount-triggered reveals activate immediately (plus their configured
    /// delay) and schedule their stagger children. Viewport-triggered
    /// reveals register an intersection observation, or activate at mount
    /// when the host reports no intersection support.
    #[tracing::instrument(skip(page, caps), fields(at = now.0))]
    pub fn mount(page: Page, caps: HostCaps, now: Millis) -> GlintResult<Self> {
        page.validate()?;

        let mut rigs = Vec::with_capacity(page.elements.len());
        let mut index = BTreeMap::new();
        for (i, element) in page.elements.iter().enumerate() {
            index.insert(element.id.clone(), i);

            let hover = match &element.hover {
                Some(HoverSpec::Glitch(spec)) => Some(HoverRig::Glitch(GlitchRig::new(spec.clone())?)),
                Some(HoverSpec::Lift {
                    lift_px,
                    to_scale,
                    curve,
                }) => Some(HoverRig::Lift(HoverLift::new(*curve, *lift_px, *to_scale))),
                None => None,
            };

            rigs.push(ElementRig {
                reveal: element
                    .reveal
                    .as_ref()
                    .map(|spec| Reveal::new(spec.curve, spec.style)),
                hover,
                pulse: element.pulse.map(pulse_track),
            });
        }

        let mut engine = Self {
            page,
            caps,
            mounted_at: now,
            rigs,
            index,
            watch: ViewportWatch::new(),
        };

        for i in 0..engine.page.elements.len() {
            let Some(spec) = engine.page.elements[i].reveal.clone() else {
                continue;
            };
            match spec.trigger {
                Trigger::Mount => {
                    engine.activate(i, now.offset(spec.delay_ms));
                }
                Trigger::Viewport { threshold } => {
                    if engine.caps.intersection_events {
                        let id = engine.page.elements[i].id.clone();
                        engine.watch.observe(id, threshold)?;
                    } else {
                        // Fail open: without intersection events the content
                        // must still appear.
                        engine.activate(i, now.offset(spec.delay_ms));
                    }
                }
                Trigger::Group => {}
            }
        }

        tracing::debug!(elements = engine.rigs.len(), "page mounted");
        Ok(engine)
    }

    /// The mounted page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Apply one host event observed at instant `now`.
    ///
    /// Events referencing ids the page has no matching binding for are
    /// evaluation errors; the engine state is unchanged in that case.
    #[tracing::instrument(skip(self), fields(at = now.0))]
    pub fn dispatch(&mut self, now: Millis, event: HostEvent) -> GlintResult<()> {
        match event {
            HostEvent::Intersection {
                id,
                visible_fraction,
            } => {
                if !visible_fraction.is_finite() || !(0.0..=1.0).contains(&visible_fraction) {
                    return Err(GlintError::evaluation(format!(
                        "visible_fraction {visible_fraction} out of range for '{id}'"
                    )));
                }
                if self.watch.report(&id, visible_fraction)? {
                    let Some(&i) = self.index.get(&id) else {
                        return Err(GlintError::evaluation(format!(
                            "fired observation for '{id}' has no matching element"
                        )));
                    };
                    let delay_ms = self.page.elements[i]
                        .reveal
                        .as_ref()
                        .map_or(0, |spec| spec.delay_ms);
                    self.activate(i, now.offset(delay_ms));
                }
                Ok(())
            }
            HostEvent::PointerEnter { id } => {
                self.hover_rig(&id)?.pointer_enter(now);
                Ok(())
            }
            HostEvent::PointerLeave { id } => {
                self.hover_rig(&id)?.pointer_leave(now);
                Ok(())
            }
        }
    }

    /// Sample every element at instant `now`.
    pub fn sample(&self, now: Millis) -> GlintResult<PageSnapshot> {
        let mut elements = Vec::with_capacity(self.rigs.len());
        for (element, rig) in self.page.elements.iter().zip(&self.rigs) {
            let mut opacity = 1.0;
            let mut translate_y = 0.0;
            let mut scale = 1.0;

            if let Some(reveal) = &rig.reveal {
                let s = reveal.sample(now);
                opacity = s.opacity;
                translate_y = s.translate_y;
                scale = s.scale;
            }

            if let Some(pulse) = &rig.pulse {
                opacity *= pulse.sample(now.since(self.mounted_at))?;
            }

            let mut glitch = None;
            match &rig.hover {
                Some(HoverRig::Lift(lift)) => {
                    let s = lift.sample(now);
                    translate_y += s.translate_y;
                    scale *= s.scale;
                }
                Some(HoverRig::Glitch(g)) => {
                    glitch = Some(g.sample(now, self.caps.blend_modes)?);
                }
                None => {}
            }

            elements.push(ElementVisual {
                id: element.id.clone(),
                opacity,
                translate_y,
                scale,
                glitch,
            });
        }
        Ok(PageSnapshot { now, elements })
    }

    /// Reveal state of the element with `id`, if it has a reveal binding.
    pub fn reveal_state(&self, id: &str) -> Option<RevealState> {
        let i = *self.index.get(id)?;
        self.rigs[i].reveal.as_ref().map(|r| r.state())
    }

    /// Whether the element with `id` currently has an active hover rig.
    pub fn hover_active(&self, id: &str) -> bool {
        self.index
            .get(id)
            .and_then(|&i| self.rigs[i].hover.as_ref())
            .is_some_and(HoverRig::is_active)
    }

    /// Whether a viewport-triggered element is still awaiting its first
    /// qualifying intersection.
    pub fn viewport_pending(&self, id: &str) -> bool {
        self.watch.is_pending(id)
    }

    /// Activate the reveal at `index` with activation instant `at`, then
    /// schedule its stagger children. First activation wins.
    fn activate(&mut self, index: usize, at: Millis) {
        let Some(reveal) = &mut self.rigs[index].reveal else {
            return;
        };
        if !reveal.activate(at) {
            return;
        }
        tracing::debug!(id = %self.page.elements[index].id, at = at.0, "reveal activated");

        let Some(spec) = &self.page.elements[index].reveal else {
            return;
        };
        let Some(stagger) = spec.stagger.clone() else {
            return;
        };
        for (child_pos, child_id) in stagger.children.iter().enumerate() {
            if let Some(&child_index) = self.index.get(child_id) {
                let child_delay_ms = self.page.elements[child_index]
                    .reveal
                    .as_ref()
                    .map_or(0, |r| r.delay_ms);
                let child_at = at
                    .offset(stagger.child_offset_ms(child_pos))
                    .offset(child_delay_ms);
                self.activate(child_index, child_at);
            }
        }
    }

    fn hover_rig(&mut self, id: &str) -> GlintResult<&mut HoverRig> {
        let Some(&i) = self.index.get(id) else {
            return Err(GlintError::evaluation(format!(
                "pointer event for unknown element '{id}'"
            )));
        };
        self.rigs[i].hover.as_mut().ok_or_else(|| {
            GlintError::evaluation(format!("element '{id}' has no hover binding"))
        })
    }
}

/// Build the free-running opacity track for a pulse binding: one eased half
/// cycle from full opacity down to the floor, ping-ponged forever.
fn pulse_track(spec: PulseSpec) -> Anim<f64> {
    let half = Anim::Keyframes(Keyframes {
        keys: vec![
            Keyframe {
                at_ms: 0,
                value: 1.0,
                ease: Ease::InOutQuad,
            },
            Keyframe {
                at_ms: spec.period_ms,
                value: spec.min_opacity,
                ease: Ease::Linear,
            },
        ],
        mode: InterpMode::Linear,
        default: None,
    });
    Anim::looping(half, spec.period_ms, LoopMode::PingPong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::assembly::profile_page;

    fn mounted() -> PageEngine {
        PageEngine::mount(profile_page(), HostCaps::default(), Millis(0)).unwrap()
    }

    #[test]
    fn mount_activates_hero_and_schedules_children() {
        let engine = mounted();
        assert_eq!(
            engine.reveal_state("hero"),
            Some(RevealState::Visible { since: Millis(0) })
        );
        assert_eq!(
            engine.reveal_state("hero-portrait"),
            Some(RevealState::Visible { since: Millis(200) })
        );
        assert_eq!(
            engine.reveal_state("hero-bio"),
            Some(RevealState::Visible { since: Millis(300) })
        );
    }

    #[test]
    fn viewport_sections_start_pending() {
        let engine = mounted();
        assert_eq!(engine.reveal_state("deployments-header"), Some(RevealState::Hidden));
        assert!(engine.viewport_pending("deployments-header"));
    }

    #[test]
    fn intersection_fires_once_and_staggers_cards() {
        let mut engine = mounted();
        engine
            .dispatch(
                Millis(1_000),
                HostEvent::Intersection {
                    id: "deployments".into(),
                    visible_fraction: 0.3,
                },
            )
            .unwrap();
        assert_eq!(
            engine.reveal_state("deployment-0"),
            Some(RevealState::Visible { since: Millis(1_200) })
        );
        assert_eq!(
            engine.reveal_state("deployment-2"),
            Some(RevealState::Visible { since: Millis(1_400) })
        );

        // Later re-entry reports change nothing.
        engine
            .dispatch(
                Millis(9_000),
                HostEvent::Intersection {
                    id: "deployments".into(),
                    visible_fraction: 1.0,
                },
            )
            .unwrap();
        assert_eq!(
            engine.reveal_state("deployments"),
            Some(RevealState::Visible { since: Millis(1_000) })
        );
    }

    #[test]
    fn delay_shifts_viewport_activation() {
        let mut engine = mounted();
        engine
            .dispatch(
                Millis(500),
                HostEvent::Intersection {
                    id: "ecosystem-row".into(),
                    visible_fraction: 0.1,
                },
            )
            .unwrap();
        assert_eq!(
            engine.reveal_state("ecosystem-row"),
            Some(RevealState::Visible { since: Millis(700) })
        );
    }

    #[test]
    fn no_intersection_support_fails_open() {
        let caps = HostCaps {
            intersection_events: false,
            blend_modes: true,
        };
        let engine = PageEngine::mount(profile_page(), caps, Millis(0)).unwrap();
        assert_eq!(
            engine.reveal_state("closing"),
            Some(RevealState::Visible { since: Millis(0) })
        );
        assert_eq!(
            engine.reveal_state("ecosystem-row"),
            Some(RevealState::Visible { since: Millis(200) })
        );
    }

    #[test]
    fn unknown_ids_are_evaluation_errors() {
        let mut engine = mounted();
        assert!(engine
            .dispatch(
                Millis(0),
                HostEvent::Intersection {
                    id: "nope".into(),
                    visible_fraction: 1.0,
                },
            )
            .is_err());
        assert!(engine
            .dispatch(Millis(0), HostEvent::PointerEnter { id: "nope".into() })
            .is_err());
        // Bound id without a hover rig is an error too.
        assert!(engine
            .dispatch(Millis(0), HostEvent::PointerEnter { id: "hero".into() })
            .is_err());
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let mut engine = mounted();
        assert!(engine
            .dispatch(
                Millis(0),
                HostEvent::Intersection {
                    id: "closing".into(),
                    visible_fraction: 1.5,
                },
            )
            .is_err());
        assert!(engine.viewport_pending("closing"));
    }

    #[test]
    fn pulse_bottoms_out_at_floor() {
        let engine = mounted();
        let snap = engine.sample(Millis(1_000)).unwrap();
        let accent = snap.elements.iter().find(|e| e.id == "hero-accent").unwrap();
        assert!((accent.opacity - 0.4).abs() < 1e-9);

        // One full cycle later the dot is back at full opacity.
        let snap = engine.sample(Millis(2_000)).unwrap();
        let accent = snap.elements.iter().find(|e| e.id == "hero-accent").unwrap();
        assert!((accent.opacity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hover_lift_composes_into_snapshot() {
        let mut engine = mounted();
        engine
            .dispatch(Millis(0), HostEvent::PointerEnter { id: "ecosystem-0".into() })
            .unwrap();
        assert!(engine.hover_active("ecosystem-0"));

        let snap = engine.sample(Millis(300)).unwrap();
        let card = snap.elements.iter().find(|e| e.id == "ecosystem-0").unwrap();
        assert!((card.translate_y - (-4.0)).abs() < 1e-9);
    }

    #[test]
    fn snapshot_preserves_declaration_order() {
        let engine = mounted();
        let snap = engine.sample(Millis(0)).unwrap();
        let ids: Vec<_> = snap.elements.iter().map(|e| e.id.as_str()).collect();
        let declared: Vec<_> = engine.page().elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, declared);
    }
}
