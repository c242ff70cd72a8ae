//! Builds the concrete profile page: static content arrays wired to the
//! animation bindings the engine orchestrates.

use crate::{
    animation::ease::TimingCurve,
    animation::reveal::{RevealStyle, StaggerSpec},
    effects::glitch::GlitchSpec,
    scene::model::{
        Attribution, Cta, DeploymentCard, EcosystemCard, Element, HoverSpec, LinkTarget, Page,
        PageAssets, ProfileContent, PulseSpec, RevealSpec, Stat, Trigger,
    },
};

/// Standard stagger delays: 200 ms lead-in, 100 ms between children.
const GROUP_START_DELAY_MS: u64 = 200;
const INTER_CHILD_DELAY_MS: u64 = 100;

/// Section headers rise from a shallower offset than full reveals.
const HEADER_OFFSET_PX: f64 = 20.0;

/// Assemble the complete profile page.
///
/// The hero group reveals on mount with staggered children (glitched
/// portrait, then bio card); every later section reveals once on its first
/// viewport intersection. Cards and call-to-action buttons carry small
/// reversible hover lifts.
pub fn profile_page() -> Page {
    let content = profile_content();

    let mut elements = vec![
        Element {
            id: "hero".into(),
            reveal: Some(RevealSpec {
                trigger: Trigger::Mount,
                style: RevealStyle::FadeUp { offset_px: 0.0 },
                curve: TimingCurve::entrance(),
                delay_ms: 0,
                stagger: Some(StaggerSpec {
                    start_delay_ms: GROUP_START_DELAY_MS,
                    inter_child_ms: INTER_CHILD_DELAY_MS,
                    children: vec!["hero-portrait".into(), "hero-bio".into()],
                }),
            }),
            hover: None,
            pulse: None,
        },
        Element {
            id: "hero-portrait".into(),
            reveal: Some(group_fade_up()),
            hover: Some(HoverSpec::Glitch(GlitchSpec::portrait())),
            pulse: None,
        },
        Element {
            id: "hero-bio".into(),
            reveal: Some(group_fade_up()),
            hover: None,
            pulse: None,
        },
        Element {
            id: "hero-accent".into(),
            reveal: None,
            hover: None,
            pulse: Some(PulseSpec {
                period_ms: 1_000,
                min_opacity: 0.4,
            }),
        },
        Element {
            id: "deployments-header".into(),
            reveal: Some(viewport_header()),
            hover: None,
            pulse: None,
        },
        Element {
            id: "deployments".into(),
            reveal: Some(RevealSpec {
                trigger: Trigger::Viewport { threshold: 0.0 },
                style: RevealStyle::FadeUp { offset_px: 0.0 },
                curve: TimingCurve::entrance(),
                delay_ms: 0,
                stagger: Some(StaggerSpec {
                    start_delay_ms: GROUP_START_DELAY_MS,
                    inter_child_ms: INTER_CHILD_DELAY_MS,
                    children: (0..content.deployments.len())
                        .map(|i| format!("deployment-{i}"))
                        .collect(),
                }),
            }),
            hover: None,
            pulse: None,
        },
    ];

    for i in 0..content.deployments.len() {
        elements.push(Element {
            id: format!("deployment-{i}"),
            reveal: Some(RevealSpec {
                trigger: Trigger::Group,
                style: RevealStyle::scale_in(),
                curve: TimingCurve::entrance_scale(),
                delay_ms: 0,
                stagger: None,
            }),
            hover: None,
            pulse: None,
        });
    }

    elements.push(Element {
        id: "ecosystem-header".into(),
        reveal: Some(viewport_header()),
        hover: None,
        pulse: None,
    });
    elements.push(Element {
        id: "ecosystem-row".into(),
        reveal: Some(RevealSpec {
            trigger: Trigger::Viewport { threshold: 0.0 },
            style: RevealStyle::FadeUp { offset_px: 0.0 },
            curve: TimingCurve::entrance(),
            delay_ms: 200,
            stagger: None,
        }),
        hover: None,
        pulse: None,
    });
    for i in 0..content.ecosystem.len() {
        elements.push(Element {
            id: format!("ecosystem-{i}"),
            reveal: None,
            hover: Some(HoverSpec::Lift {
                lift_px: 4.0,
                to_scale: 1.0,
                curve: TimingCurve::hover(),
            }),
            pulse: None,
        });
    }

    elements.push(Element {
        id: "closing".into(),
        reveal: Some(RevealSpec {
            trigger: Trigger::Viewport { threshold: 0.0 },
            style: RevealStyle::ScaleIn { from_scale: 0.95 },
            curve: TimingCurve::entrance(),
            delay_ms: 0,
            stagger: None,
        }),
        hover: None,
        pulse: None,
    });
    elements.push(cta_element("cta-download"));
    elements.push(cta_element("cta-agency"));

    Page {
        version: "1".into(),
        elements,
        content,
        assets: PageAssets {
            portrait_image: "/portfolio/assets/robin-headshot.jpg".into(),
            portrait_alt: "Robin Gautam - Digital Strategist".into(),
        },
    }
}

fn group_fade_up() -> RevealSpec {
    RevealSpec {
        trigger: Trigger::Group,
        style: RevealStyle::fade_up(),
        curve: TimingCurve::entrance(),
        delay_ms: 0,
        stagger: None,
    }
}

fn viewport_header() -> RevealSpec {
    RevealSpec {
        trigger: Trigger::Viewport { threshold: 0.0 },
        style: RevealStyle::FadeUp {
            offset_px: HEADER_OFFSET_PX,
        },
        curve: TimingCurve::entrance(),
        delay_ms: 0,
        stagger: None,
    }
}

fn cta_element(id: &str) -> Element {
    Element {
        id: id.into(),
        reveal: None,
        hover: Some(HoverSpec::Lift {
            lift_px: 0.0,
            to_scale: 1.02,
            curve: TimingCurve::hover(),
        }),
        pulse: None,
    }
}

fn profile_content() -> ProfileContent {
    ProfileContent {
        headline: vec!["Marketing Brain.".into(), "Engineering Hands.".into()],
        subheadline: "MBA Candidate at IIM Rohtak. I bridge the gap between Business Strategy \
                      and Technical Execution."
            .into(),
        tagline: "Founder of robingautam.in (Digital Product Studio)".into(),
        stats: vec![
            Stat {
                value: "15+".into(),
                label: "Projects Shipped".into(),
            },
            Stat {
                value: "1.5K+".into(),
                label: "Users Impacted".into(),
            },
        ],
        deployments: vec![
            DeploymentCard {
                title: "Hyper-Local Growth Engine".into(),
                role_label: "Growth Strategist · StockGro".into(),
                metrics: vec![
                    "Onboarded 1,100+ users".into(),
                    "Partnered with DSEU".into(),
                    "Led 30-member team".into(),
                ],
                icon: "trending-up".into(),
                gradient: "emerald-teal".into(),
            },
            DeploymentCard {
                title: "Market Intelligence Analysis".into(),
                role_label: "Research Analyst · Finlatics".into(),
                metrics: vec![
                    "Improved STP by 15%".into(),
                    "Researched 20+ Firms".into(),
                    "Tested 3+ Growth Hypotheses".into(),
                ],
                icon: "pie-chart".into(),
                gradient: "blue-indigo".into(),
            },
            DeploymentCard {
                title: "Brand Narrative Design".into(),
                role_label: "Content Strategist · Corstone".into(),
                metrics: vec![
                    "Showcased at Leadership Level".into(),
                    "Boosted NPS Impact Metrics".into(),
                ],
                icon: "feather".into(),
                gradient: "purple-pink".into(),
            },
        ],
        ecosystem: vec![
            EcosystemCard {
                title: "IIM Rohtak IT Committee".into(),
                role_label: "Junior Coordinator".into(),
                context: "Organizing Tech Talks & Workshops for the B-School ecosystem.".into(),
                icon: "target".into(),
            },
            EcosystemCard {
                title: "E-Cell DSEU".into(),
                role_label: "President".into(),
                context: "Scaled flagship event 'Riwaaz' to 1,500+ attendees.".into(),
                icon: "sparkles".into(),
            },
            EcosystemCard {
                title: "Placement Coordinator".into(),
                role_label: "Lead".into(),
                context: "Managed placement drives for 2,000+ students.".into(),
                icon: "users".into(),
            },
        ],
        ctas: vec![
            Cta {
                label: "Download CV (MBA Focus)".into(),
                icon: "download".into(),
                target: LinkTarget::Download {
                    path: "/Robin_Gautam_CV.pdf".into(),
                    suggested_filename: "Robin_Gautam_CV.pdf".into(),
                },
            },
            Cta {
                label: "Hire My Agency".into(),
                icon: "arrow-right".into(),
                target: LinkTarget::External {
                    url: "https://robingautam.in".into(),
                },
            },
        ],
        attribution: Attribution {
            label: "Robin Gautam".into(),
            url: "https://robingautam.in".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_one_card_element_per_record() {
        let page = profile_page();
        for i in 0..page.content.deployments.len() {
            assert!(page.element(&format!("deployment-{i}")).is_some());
        }
        for i in 0..page.content.ecosystem.len() {
            assert!(page.element(&format!("ecosystem-{i}")).is_some());
        }
    }

    #[test]
    fn cta_pair_is_download_then_external() {
        let page = profile_page();
        assert_eq!(page.content.ctas.len(), 2);
        assert!(matches!(
            page.content.ctas[0].target,
            LinkTarget::Download { .. }
        ));
        assert!(matches!(
            page.content.ctas[1].target,
            LinkTarget::External { .. }
        ));
    }

    #[test]
    fn portrait_carries_the_glitch_rig() {
        let page = profile_page();
        let portrait = page.element("hero-portrait").unwrap();
        assert!(matches!(portrait.hover, Some(HoverSpec::Glitch(_))));
    }
}
