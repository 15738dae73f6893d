use super::*;
use crate::scene::behaviors::testing::Harness;
use crate::scene::delegate::ElementInfo;

fn cursor() -> CursorFollower {
    CursorFollower::new(
        "cursor",
        &CursorConfig {
            dot: "dot".into(),
            follower: "ring".into(),
            smoothing: CURSOR_FOLLOW_SMOOTHING,
            selectors: INTERACTIVE_SELECTORS.to_owned(),
        },
    )
    .unwrap()
}

fn run(h: &mut Harness, c: &mut CursorFollower, frames: usize) {
    for _ in 0..frames {
        h.frame(c);
    }
}

#[test]
fn nothing_is_written_before_the_first_pointer_reading() {
    let mut h = Harness::new(1200.0, 800.0);
    let mut c = cursor();
    let (out, _) = h.frame(&mut c);
    assert!(out.is_empty());
}

#[test]
fn dot_tracks_exactly_and_follower_lags() {
    let mut h = Harness::new(1200.0, 800.0);
    let mut c = cursor();
    h.event(&mut c, InputEvent::PointerMove { x: 100.0, y: 100.0 });
    let (out, _) = h.frame(&mut c);
    let ring: TargetId = "ring".into();
    let dot: TargetId = "dot".into();
    assert_eq!(out.get(&ring, Property::X), Some(100.0));

    h.event(&mut c, InputEvent::PointerMove { x: 200.0, y: 100.0 });
    let (out, _) = h.frame(&mut c);
    assert_eq!(out.get(&dot, Property::X), Some(200.0));
    let x = out.get(&ring, Property::X).unwrap();
    assert!((x - 115.0).abs() < 1e-9, "follower x = {x}");
}

#[test]
fn interactive_hover_grows_the_follower_and_hides_the_dot() {
    let mut h = Harness::new(1200.0, 800.0);
    let mut c = cursor();
    let ring: TargetId = "ring".into();
    let dot: TargetId = "dot".into();

    h.event(
        &mut c,
        InputEvent::Hover {
            path: vec![ElementInfo::new("span"), ElementInfo::new("button")],
        },
    );
    assert!(c.is_hovering());
    run(&mut h, &mut c, 30);
    assert!((h.stage.value(&ring, Property::Scale) - HOVER_FOLLOWER_SCALE).abs() < 1e-9);
    assert!((h.stage.value(&ring, Property::Opacity) - FOLLOWER_OPACITY).abs() < 1e-9);
    assert!(h.stage.value(&dot, Property::Scale).abs() < 1e-9);

    h.event(
        &mut c,
        InputEvent::Hover {
            path: vec![ElementInfo::new("div")],
        },
    );
    assert!(!c.is_hovering());
    run(&mut h, &mut c, 30);
    assert!((h.stage.value(&ring, Property::Scale) - 1.0).abs() < 1e-9);
    assert!((h.stage.value(&dot, Property::Scale) - 1.0).abs() < 1e-9);
}

#[test]
fn repeated_hover_over_the_same_kind_does_not_restart() {
    let mut h = Harness::new(1200.0, 800.0);
    let mut c = cursor();
    let hover = || InputEvent::Hover {
        path: vec![ElementInfo::new("a")],
    };
    h.event(&mut c, hover());
    run(&mut h, &mut c, 10);
    let mid = h.stage.value(&"ring".into(), Property::Scale);
    h.event(&mut c, hover());
    let (out, _) = h.frame(&mut c);
    let next = out.get(&"ring".into(), Property::Scale).unwrap();
    assert!(next > mid);
}

#[test]
fn bad_selectors_fail_construction() {
    let err = CursorFollower::new(
        "cursor",
        &CursorConfig {
            dot: "dot".into(),
            follower: "ring".into(),
            smoothing: CURSOR_FOLLOW_SMOOTHING,
            selectors: "a > b".to_owned(),
        },
    );
    assert!(err.is_err());
}
