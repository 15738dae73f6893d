use super::*;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 1000.0).unwrap()
}

fn row() -> Rect {
    Rect::new(0.0, 2000.0, 1280.0, 2200.0)
}

#[test]
fn unmounted_element_reports_rest() {
    let mut t = ViewportTrigger::new(TriggerSpec::default()).unwrap();
    let s = t.evaluate(5000.0, 0.016);
    assert_eq!(s.progress, 0.0);
    assert!(!s.entered);
}

#[test]
fn scrub_progress_is_reversible() {
    let mut t = ViewportTrigger::new(TriggerSpec::default()).unwrap();
    t.layout(Some(row()), viewport()).unwrap();
    // Window is [1150, 1500].
    assert_eq!(t.evaluate(1150.0, 0.016).progress, 0.0);
    assert_eq!(t.evaluate(1325.0, 0.016).progress, 0.5);
    assert_eq!(t.evaluate(1600.0, 0.016).progress, 1.0);
    assert_eq!(t.evaluate(1325.0, 0.016).progress, 0.5);
    assert!(!t.entered());
}

#[test]
fn once_latches_on_first_positive_entry() {
    let spec = TriggerSpec {
        mode: TriggerMode::Once { threshold: 0.0 },
        ..TriggerSpec::default()
    };
    let mut t = ViewportTrigger::new(spec).unwrap();
    t.layout(Some(row()), viewport()).unwrap();

    let s = t.evaluate(1000.0, 0.016);
    assert!(!s.entered && !s.just_entered);

    let s = t.evaluate(1151.0, 0.016);
    assert!(s.entered && s.just_entered);

    let s = t.evaluate(1400.0, 0.016);
    assert!(s.entered && !s.just_entered);

    let s = t.evaluate(0.0, 0.016);
    assert!(s.entered, "once latch never reverts");
}

#[test]
fn once_threshold_is_respected() {
    let spec = TriggerSpec {
        mode: TriggerMode::Once { threshold: 0.5 },
        ..TriggerSpec::default()
    };
    let mut t = ViewportTrigger::new(spec).unwrap();
    t.layout(Some(row()), viewport()).unwrap();
    assert!(!t.evaluate(1300.0, 0.016).entered);
    assert!(t.evaluate(1330.0, 0.016).just_entered);
}

#[test]
fn relayout_bumps_generation_and_resets_lag() {
    let spec = TriggerSpec {
        lag: 1.0,
        ..TriggerSpec::default()
    };
    let mut t = ViewportTrigger::new(spec).unwrap();
    t.layout(Some(row()), viewport()).unwrap();
    t.evaluate(1150.0, 0.016);
    let lagging = t.evaluate(1500.0, 0.016);
    assert!(lagging.progress < 0.2);

    // Viewport shrinks: window moves, smoothing restarts from the raw value.
    t.layout(Some(row()), Viewport::new(1280.0, 500.0).unwrap())
        .unwrap();
    let s = t.evaluate(1500.0, 0.016);
    assert_eq!(s.generation, 2);
    assert_eq!(s.progress, s.raw);
}

#[test]
fn inverted_anchors_are_rejected_up_front() {
    let same_edge = TriggerSpec {
        start: Anchor::new(Edge::Top, 0.2),
        end: EndAnchor::At(Anchor::new(Edge::Top, 0.85)),
        ..TriggerSpec::default()
    };
    assert!(matches!(same_edge.validate(), Err(GlideError::Config(_))));
    assert!(ViewportTrigger::new(same_edge).is_err());

    let equal = TriggerSpec {
        start: Anchor::new(Edge::Center, 0.5),
        end: EndAnchor::At(Anchor::new(Edge::Center, 0.5)),
        ..TriggerSpec::default()
    };
    assert!(equal.validate().is_err());

    for d in [0.0, -100.0, f64::NAN] {
        let spec = TriggerSpec {
            end: EndAnchor::Distance(d),
            ..TriggerSpec::default()
        };
        assert!(spec.validate().is_err(), "distance {d}");
    }

    let negative_lag = TriggerSpec {
        lag: -1.0,
        ..TriggerSpec::default()
    };
    assert!(negative_lag.validate().is_err());

    let threshold = TriggerSpec {
        mode: TriggerMode::Once { threshold: 1.5 },
        ..TriggerSpec::default()
    };
    assert!(threshold.validate().is_err());
}

#[test]
fn cross_edge_anchors_pass_until_geometry_decides() {
    let spec = TriggerSpec {
        start: Anchor::new(Edge::Bottom, 1.0),
        end: EndAnchor::At(Anchor::new(Edge::Top, 0.0)),
        ..TriggerSpec::default()
    };
    spec.validate().unwrap();
    assert!(
        TriggerSpec {
            end: EndAnchor::Distance(400.0),
            ..TriggerSpec::default()
        }
        .validate()
        .is_ok()
    );

    let mut t = ViewportTrigger::new(spec).unwrap();
    let tall = Rect::new(0.0, 500.0, 1280.0, 1500.0);
    t.layout(Some(tall), Viewport::new(1280.0, 1200.0).unwrap())
        .unwrap();
    assert_eq!(t.window(), Some(TriggerWindow::new(300.0, 500.0).unwrap()));

    // Shorter than the element: the window would run backwards and is dropped instead.
    let err = t
        .layout(Some(tall), Viewport::new(1280.0, 800.0).unwrap())
        .unwrap_err();
    assert!(matches!(err, GlideError::Contract(_)));
    assert_eq!(t.window(), None);
    assert_eq!(t.generation(), 2);
    assert_eq!(t.evaluate(450.0, 0.016).progress, 0.0);
}
