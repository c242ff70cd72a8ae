use std::collections::BTreeSet;

use crate::{
    animation::ease::TimingCurve,
    animation::reveal::{RevealStyle, StaggerSpec},
    effects::glitch::GlitchSpec,
    foundation::error::{GlintError, GlintResult},
};

/// Event source that promotes an element from hidden to visible.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Activate when the page mounts.
    Mount,
    /// Activate on first viewport intersection at `threshold` visible
    /// fraction (0 means any visible part).
    Viewport {
        /// Minimum visible fraction in `[0, 1]`.
        threshold: f64,
    },
    /// Activated only through the owning stagger group.
    Group,
}

/// Reveal binding for one element.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    /// What fires the activation.
    pub trigger: Trigger,
    /// Visual shape of the transition.
    pub style: RevealStyle,
    /// Duration and easing.
    pub curve: TimingCurve,
    /// Extra activation delay after the trigger fires, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
    /// Optional ordered child stagger driven by this element's activation.
    #[serde(default)]
    pub stagger: Option<StaggerSpec>,
}

/// Hover binding for one element.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverSpec {
    /// The layered glitch compositor (media elements).
    Glitch(GlitchSpec),
    /// A small reversible lift and/or scale (cards, buttons).
    Lift {
        /// Upward travel in pixels at full hover strength.
        #[serde(default)]
        lift_px: f64,
        /// Scale at full hover strength.
        to_scale: f64,
        /// Transition curve, both directions.
        curve: TimingCurve,
    },
}

/// Free-running opacity pulse (the tagline accent dot).
///
/// Opacity ping-pongs between 1 and `min_opacity`; `period_ms` is one half
/// cycle.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PulseSpec {
    /// Half-cycle length in milliseconds.
    pub period_ms: u64,
    /// Opacity floor in `[0, 1]`.
    pub min_opacity: f64,
}

/// One animatable element of the page.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Element {
    /// Stable unique id, referenced by host events and stagger groups.
    pub id: String,
    /// Optional one-shot reveal.
    #[serde(default)]
    pub reveal: Option<RevealSpec>,
    /// Optional pointer-hover effect.
    #[serde(default)]
    pub hover: Option<HoverSpec>,
    /// Optional free-running pulse.
    #[serde(default)]
    pub pulse: Option<PulseSpec>,
}

/// One statistic of the bio card.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Stat {
    /// Headline figure, e.g. "15+".
    pub value: String,
    /// Caption under the figure.
    pub label: String,
}

/// One deployment/strategy card of the impact grid.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DeploymentCard {
    /// Card title.
    pub title: String,
    /// Role and organization line.
    pub role_label: String,
    /// Ordered metric bullet lines.
    pub metrics: Vec<String>,
    /// Icon token resolved by the host theme.
    pub icon: String,
    /// Gradient token resolved by the host theme.
    pub gradient: String,
}

/// One card of the ecosystem leadership row.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EcosystemCard {
    /// Card title.
    pub title: String,
    /// Role line.
    pub role_label: String,
    /// Context sentence.
    pub context: String,
    /// Icon token resolved by the host theme.
    pub icon: String,
}

/// Outbound navigation target of a call-to-action.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// Same-origin file served as a direct download.
    Download {
        /// Document path.
        path: String,
        /// Suggested filename for the download.
        suggested_filename: String,
    },
    /// Cross-origin link opened in a new browsing context.
    External {
        /// Absolute URL.
        url: String,
    },
}

/// One call-to-action affordance.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Cta {
    /// Button label.
    pub label: String,
    /// Icon token resolved by the host theme.
    pub icon: String,
    /// Navigation action.
    pub target: LinkTarget,
}

/// Footer attribution line.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Attribution {
    /// Display name.
    pub label: String,
    /// Link target.
    pub url: String,
}

/// Static copy and card data consumed as opaque, pre-validated content.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProfileContent {
    /// Headline lines, rendered stacked.
    pub headline: Vec<String>,
    /// Sub-headline paragraph.
    pub subheadline: String,
    /// Tagline next to the pulse accent.
    pub tagline: String,
    /// Quick stats on the bio card.
    pub stats: Vec<Stat>,
    /// Impact grid cards, in order.
    pub deployments: Vec<DeploymentCard>,
    /// Ecosystem row cards, in order.
    pub ecosystem: Vec<EcosystemCard>,
    /// Closing call-to-action pair.
    pub ctas: Vec<Cta>,
    /// Footer attribution.
    pub attribution: Attribution,
}

/// Static asset references.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageAssets {
    /// Portrait image path.
    pub portrait_image: String,
    /// Portrait alt text.
    pub portrait_alt: String,
}

/// Complete declarative description of the page: animatable elements plus
/// the static content they present.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Page {
    /// Model version tag.
    pub version: String,
    /// Animatable elements in declaration (paint) order.
    pub elements: Vec<Element>,
    /// Static content records.
    pub content: ProfileContent,
    /// Static asset references.
    pub assets: PageAssets,
}

impl Page {
    /// Parse a page from JSON and validate it.
    pub fn from_json(s: &str) -> GlintResult<Self> {
        let page: Self = serde_json::from_str(s)?;
        page.validate()?;
        Ok(page)
    }

    /// Validate static invariants across the whole page.
    pub fn validate(&self) -> GlintResult<()> {
        if self.version.trim().is_empty() {
            return Err(GlintError::validation("page version must be non-empty"));
        }

        let mut ids = BTreeSet::new();
        for element in &self.elements {
            if element.id.trim().is_empty() {
                return Err(GlintError::validation("element id must be non-empty"));
            }
            if !ids.insert(element.id.as_str()) {
                return Err(GlintError::validation(format!(
                    "duplicate element id '{}'",
                    element.id
                )));
            }
            if element.reveal.is_none() && element.hover.is_none() && element.pulse.is_none() {
                return Err(GlintError::validation(format!(
                    "element '{}' has no bindings",
                    element.id
                )));
            }
        }

        let mut claimed = BTreeSet::new();
        for element in &self.elements {
            if let Some(reveal) = &element.reveal {
                self.validate_reveal(element, reveal, &mut claimed)?;
            }
            if let Some(hover) = &element.hover {
                validate_hover(&element.id, hover)?;
            }
            if let Some(pulse) = &element.pulse {
                if pulse.period_ms == 0 {
                    return Err(GlintError::validation(format!(
                        "element '{}' pulse period_ms must be > 0",
                        element.id
                    )));
                }
                if !(0.0..=1.0).contains(&pulse.min_opacity) {
                    return Err(GlintError::validation(format!(
                        "element '{}' pulse min_opacity must be in [0, 1]",
                        element.id
                    )));
                }
            }
        }

        // Every group-triggered element must be driven by exactly one
        // stagger; claimed is filled while walking the staggers above.
        for element in &self.elements {
            if let Some(reveal) = &element.reveal
                && reveal.trigger == Trigger::Group
                && !claimed.contains(element.id.as_str())
            {
                return Err(GlintError::validation(format!(
                    "group-triggered element '{}' is not referenced by any stagger",
                    element.id
                )));
            }
        }

        self.validate_content()
    }

    fn validate_reveal<'a>(
        &'a self,
        element: &Element,
        reveal: &'a RevealSpec,
        claimed: &mut BTreeSet<&'a str>,
    ) -> GlintResult<()> {
        reveal.curve.validate()?;
        if let Trigger::Viewport { threshold } = reveal.trigger
            && (!threshold.is_finite() || !(0.0..=1.0).contains(&threshold))
        {
            return Err(GlintError::validation(format!(
                "element '{}' viewport threshold must be in [0, 1]",
                element.id
            )));
        }

        let Some(stagger) = &reveal.stagger else {
            return Ok(());
        };
        if stagger.children.is_empty() {
            return Err(GlintError::validation(format!(
                "element '{}' stagger has no children",
                element.id
            )));
        }
        for child_id in &stagger.children {
            if child_id == &element.id {
                return Err(GlintError::validation(format!(
                    "element '{}' staggers itself",
                    element.id
                )));
            }
            let Some(child) = self.elements.iter().find(|e| &e.id == child_id) else {
                return Err(GlintError::validation(format!(
                    "stagger child '{child_id}' of '{}' does not exist",
                    element.id
                )));
            };
            let Some(child_reveal) = &child.reveal else {
                return Err(GlintError::validation(format!(
                    "stagger child '{child_id}' has no reveal binding"
                )));
            };
            if child_reveal.trigger != Trigger::Group {
                return Err(GlintError::validation(format!(
                    "stagger child '{child_id}' must use the group trigger"
                )));
            }
            if child_reveal.stagger.is_some() {
                return Err(GlintError::validation(format!(
                    "stagger child '{child_id}' must not own a nested stagger"
                )));
            }
            if !claimed.insert(child_id.as_str()) {
                return Err(GlintError::validation(format!(
                    "element '{child_id}' is claimed by more than one stagger"
                )));
            }
        }
        Ok(())
    }

    fn validate_content(&self) -> GlintResult<()> {
        // Content copy is opaque; only the external interfaces (asset paths
        // and outbound links) are checked.
        if self.assets.portrait_image.trim().is_empty() {
            return Err(GlintError::validation("portrait_image path must be non-empty"));
        }
        for cta in &self.content.ctas {
            if cta.label.trim().is_empty() {
                return Err(GlintError::validation("cta label must be non-empty"));
            }
            match &cta.target {
                LinkTarget::Download {
                    path,
                    suggested_filename,
                } => {
                    if path.trim().is_empty() || suggested_filename.trim().is_empty() {
                        return Err(GlintError::validation(
                            "download target needs a path and a suggested filename",
                        ));
                    }
                }
                LinkTarget::External { url } => {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        return Err(GlintError::validation(format!(
                            "external url '{url}' must be absolute"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Look up an element by id.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

fn validate_hover(id: &str, hover: &HoverSpec) -> GlintResult<()> {
    match hover {
        HoverSpec::Glitch(spec) => spec.validate(),
        HoverSpec::Lift {
            lift_px,
            to_scale,
            curve,
        } => {
            curve.validate()?;
            if !lift_px.is_finite() || *lift_px < 0.0 {
                return Err(GlintError::validation(format!(
                    "element '{id}' lift_px must be finite and >= 0"
                )));
            }
            if !to_scale.is_finite() || *to_scale <= 0.0 {
                return Err(GlintError::validation(format!(
                    "element '{id}' to_scale must be finite and > 0"
                )));
            }
            Ok(())
        }
    }
}
