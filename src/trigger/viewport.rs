use std::collections::BTreeMap;

use crate::foundation::error::{GlintError, GlintResult};

/// One-shot record of interest in an element entering the viewport.
#[derive(Clone, Copy, Debug)]
struct Observation {
    /// Minimum visible fraction required to fire; 0 means any visible part.
    threshold: f64,
    /// Set irreversibly on the first qualifying report.
    has_fired: bool,
}

/// Tracks per-element viewport observations and enforces the at-most-once
/// firing contract.
///
/// Entrance reveals are a one-time narrative beat: once an element has
/// fired, later reports for it are ignored even if it scrolls out and back
/// in. Hosts are expected to deliver the current intersection state once
/// when an observation is registered, so above-the-fold elements fire on the
/// first report after mount instead of waiting for a scroll.
#[derive(Clone, Debug, Default)]
pub struct ViewportWatch {
    observations: BTreeMap<String, Observation>,
}

impl ViewportWatch {
    /// Create an empty watch list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `id` entering the viewport.
    pub fn observe(&mut self, id: impl Into<String>, threshold: f64) -> GlintResult<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(GlintError::validation(
                "viewport threshold must be in [0, 1]",
            ));
        }
        let id = id.into();
        if self.observations.contains_key(&id) {
            return Err(GlintError::validation(format!(
                "element '{id}' is already observed"
            )));
        }
        self.observations.insert(
            id,
            Observation {
                threshold,
                has_fired: false,
            },
        );
        Ok(())
    }

    /// Process an intersection report for `id`. Returns `true` exactly once
    /// per element, on the first qualifying report; the observation is
    /// retired afterwards.
    pub fn report(&mut self, id: &str, visible_fraction: f64) -> GlintResult<bool> {
        let Some(obs) = self.observations.get_mut(id) else {
            return Err(GlintError::evaluation(format!(
                "intersection report for unobserved element '{id}'"
            )));
        };
        if obs.has_fired {
            return Ok(false);
        }

        let qualifies = visible_fraction > 0.0 && visible_fraction >= obs.threshold;
        if qualifies {
            obs.has_fired = true;
            tracing::debug!(id, visible_fraction, "viewport trigger fired");
        }
        Ok(qualifies)
    }

    /// Whether `id` has a live (not yet fired) observation.
    pub fn is_pending(&self, id: &str) -> bool {
        self.observations
            .get(id)
            .is_some_and(|obs| !obs.has_fired)
    }
}
