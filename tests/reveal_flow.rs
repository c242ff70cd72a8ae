use glint::{HostCaps, HostEvent, Millis, Page, PageEngine, RevealState};

fn fixture() -> Page {
    Page::from_json(include_str!("data/simple_page.json")).unwrap()
}

/// A page fold: independent viewport-triggered cards, one already visible at
/// mount.
fn card_fold() -> Page {
    let mut page = fixture();
    page.elements = (0..3)
        .map(|i| glint::scene::model::Element {
            id: format!("fold-card-{i}"),
            reveal: Some(glint::scene::model::RevealSpec {
                trigger: glint::scene::model::Trigger::Viewport { threshold: 0.0 },
                style: glint::RevealStyle::fade_up(),
                curve: glint::TimingCurve::entrance(),
                delay_ms: 0,
                stagger: None,
            }),
            hover: None,
            pulse: None,
        })
        .collect();
    page
}

#[test]
fn only_the_card_above_the_fold_reveals_at_mount() {
    let mut engine = PageEngine::mount(card_fold(), HostCaps::default(), Millis(0)).unwrap();

    // The host reports initial intersection state right after mount; only
    // the first card is above the fold.
    engine
        .dispatch(
            Millis(0),
            HostEvent::Intersection {
                id: "fold-card-0".into(),
                visible_fraction: 0.8,
            },
        )
        .unwrap();
    assert!(engine.reveal_state("fold-card-0").unwrap().is_visible());
    assert_eq!(engine.reveal_state("fold-card-1"), Some(RevealState::Hidden));
    assert_eq!(engine.reveal_state("fold-card-2"), Some(RevealState::Hidden));

    // Scrolling brings exactly the second card across the threshold.
    engine
        .dispatch(
            Millis(2_000),
            HostEvent::Intersection {
                id: "fold-card-1".into(),
                visible_fraction: 0.05,
            },
        )
        .unwrap();
    assert!(engine.reveal_state("fold-card-1").unwrap().is_visible());
    assert_eq!(engine.reveal_state("fold-card-2"), Some(RevealState::Hidden));
}

#[test]
fn mount_group_staggers_children() {
    let engine = PageEngine::mount(fixture(), HostCaps::default(), Millis(0)).unwrap();
    assert_eq!(
        engine.reveal_state("hero"),
        Some(RevealState::Visible { since: Millis(0) })
    );
    assert_eq!(
        engine.reveal_state("card-0"),
        Some(RevealState::Visible { since: Millis(200) })
    );
    assert_eq!(
        engine.reveal_state("card-1"),
        Some(RevealState::Visible { since: Millis(300) })
    );

    // The second card holds its hidden pose until its scheduled instant.
    let snap = engine.sample(Millis(250)).unwrap();
    let card1 = snap.elements.iter().find(|e| e.id == "card-1").unwrap();
    assert_eq!(card1.opacity, 0.0);
    assert_eq!(card1.scale, 0.9);
}

#[test]
fn below_threshold_does_not_fire() {
    let mut engine = PageEngine::mount(fixture(), HostCaps::default(), Millis(0)).unwrap();
    engine
        .dispatch(
            Millis(100),
            HostEvent::Intersection {
                id: "banner".into(),
                visible_fraction: 0.1,
            },
        )
        .unwrap();
    assert_eq!(engine.reveal_state("banner"), Some(RevealState::Hidden));
    assert!(engine.viewport_pending("banner"));
}

#[test]
fn first_qualifying_intersection_fires_once() {
    let mut engine = PageEngine::mount(fixture(), HostCaps::default(), Millis(0)).unwrap();
    engine
        .dispatch(
            Millis(400),
            HostEvent::Intersection {
                id: "banner".into(),
                visible_fraction: 0.5,
            },
        )
        .unwrap();
    // Activation honors the binding's 150 ms delay.
    assert_eq!(
        engine.reveal_state("banner"),
        Some(RevealState::Visible { since: Millis(550) })
    );
    assert!(!engine.viewport_pending("banner"));

    // Scrolling away and back does not restart the reveal.
    engine
        .dispatch(
            Millis(5_000),
            HostEvent::Intersection {
                id: "banner".into(),
                visible_fraction: 0.0,
            },
        )
        .unwrap();
    engine
        .dispatch(
            Millis(6_000),
            HostEvent::Intersection {
                id: "banner".into(),
                visible_fraction: 1.0,
            },
        )
        .unwrap();
    assert_eq!(
        engine.reveal_state("banner"),
        Some(RevealState::Visible { since: Millis(550) })
    );
}

#[test]
fn missing_intersection_support_reveals_everything_at_mount() {
    let caps = HostCaps {
        intersection_events: false,
        blend_modes: true,
    };
    let engine = PageEngine::mount(fixture(), caps, Millis(10)).unwrap();
    assert_eq!(
        engine.reveal_state("banner"),
        Some(RevealState::Visible { since: Millis(160) })
    );
}

#[test]
fn identical_histories_produce_identical_snapshots() {
    let drive = |mut engine: PageEngine| -> Vec<String> {
        let script = [
            (Millis(120), HostEvent::PointerEnter { id: "button".into() }),
            (
                Millis(300),
                HostEvent::Intersection {
                    id: "banner".into(),
                    visible_fraction: 0.4,
                },
            ),
            (Millis(340), HostEvent::PointerLeave { id: "button".into() }),
        ];
        let mut out = Vec::new();
        let mut next = 0;
        for step in 0..12u64 {
            let now = Millis(step * 90);
            while next < script.len() && script[next].0.0 <= now.0 {
                let (at, event) = script[next].clone();
                engine.dispatch(at, event).unwrap();
                next += 1;
            }
            let snap = engine.sample(now).unwrap();
            out.push(serde_json::to_string(&snap).unwrap());
        }
        out
    };

    let a = drive(PageEngine::mount(fixture(), HostCaps::default(), Millis(0)).unwrap());
    let b = drive(PageEngine::mount(fixture(), HostCaps::default(), Millis(0)).unwrap());
    assert_eq!(a, b);
}
