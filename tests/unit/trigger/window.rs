use super::*;

#[test]
fn window_must_be_increasing() {
    assert!(TriggerWindow::new(10.0, 10.0).is_err());
    assert!(TriggerWindow::new(10.0, 5.0).is_err());
    assert!(TriggerWindow::new(f64::NEG_INFINITY, 5.0).is_err());
    assert!(TriggerWindow::new(0.0, 1000.0).is_ok());
}

#[test]
fn progress_is_linear_and_clamped() {
    let w = TriggerWindow::new(0.0, 1000.0).unwrap();
    assert_eq!(w.progress(250.0), 0.25);
    assert_eq!(w.progress(-50.0), 0.0);
    assert_eq!(w.progress(1500.0), 1.0);
    assert_eq!(w.progress(f64::NAN), 0.0);
}

#[test]
fn reveal_anchors_resolve_against_viewport() {
    // Row at document y = 2000, viewport 1000 tall.
    let row = Rect::new(0.0, 2000.0, 800.0, 2200.0);
    let w = TriggerWindow::from_anchors(
        row,
        1000.0,
        Anchor::new(Edge::Top, REVEAL_START),
        EndAnchor::At(Anchor::new(Edge::Top, REVEAL_END)),
    )
    .unwrap();
    assert_eq!(w.start(), 1150.0);
    assert_eq!(w.end(), 1500.0);
}

#[test]
fn distance_end_is_relative_to_start() {
    let section = Rect::new(0.0, 3000.0, 1000.0, 4000.0);
    let w = TriggerWindow::from_anchors(
        section,
        1000.0,
        Anchor::new(Edge::Top, 0.0),
        EndAnchor::Distance(2200.0),
    )
    .unwrap();
    assert_eq!((w.start(), w.end()), (3000.0, 5200.0));
}

#[test]
fn inverted_anchor_pair_is_rejected() {
    let row = Rect::new(0.0, 2000.0, 800.0, 2200.0);
    let res = TriggerWindow::from_anchors(
        row,
        1000.0,
        Anchor::new(Edge::Top, 0.5),
        EndAnchor::At(Anchor::new(Edge::Top, 0.85)),
    );
    assert!(res.is_err());
}

#[test]
fn mode_json_shape() {
    let m: TriggerMode = serde_json::from_str(r#"{"kind":"once","threshold":0.2}"#).unwrap();
    assert_eq!(m, TriggerMode::Once { threshold: 0.2 });
    let m: TriggerMode = serde_json::from_str(r#"{"kind":"scrub"}"#).unwrap();
    assert_eq!(m, TriggerMode::Scrub);
}
