use super::*;
use crate::animation::property::Property;

const CURSOR_SCENE: &str = r#"{
    "viewport": {"width": 1200, "height": 800},
    "mounted": ["dot", "ring"],
    "behaviors": [
        {"name": "cursor", "kind": "cursor", "dot": "dot", "follower": "ring"}
    ],
    "script": [
        {"frame": 2, "type": "pointer_move", "x": 40, "y": 50}
    ]
}"#;

#[test]
fn parses_defaults_and_tagged_behaviors() {
    let def = SceneDef::from_json(CURSOR_SCENE).unwrap();
    assert_eq!(def.fps, DEFAULT_FPS);
    assert_eq!(def.behaviors.len(), 1);
    match &def.behaviors[0].kind {
        BehaviorKind::Cursor(c) => {
            assert_eq!(c.dot, TargetId::from("dot"));
            assert_eq!(c.smoothing, 0.15);
        }
        other => panic!("unexpected behavior {other:?}"),
    }
    assert_eq!(
        def.script[0].event,
        InputEvent::PointerMove { x: 40.0, y: 50.0 }
    );
}

#[test]
fn script_entries_land_right_before_their_frame() {
    let def = SceneDef::from_json(CURSOR_SCENE).unwrap();
    let log = simulate(&def, 4).unwrap();
    assert_eq!(log.frames.len(), 4);
    assert!(log.frames[1].props.is_empty());
    let dot_x = log.frames[2]
        .props
        .iter()
        .find(|w| w.target == TargetId::from("dot") && w.prop == Property::X)
        .map(|w| w.value);
    assert_eq!(dot_x, Some(40.0));
    assert_eq!(log.frames[2].frame, FrameIndex(2));
}

#[test]
fn orientation_events_flatten_into_script_entries() {
    let entry: ScriptEntry =
        serde_json::from_str(r#"{"frame": 1, "type": "orientation", "gamma": 10, "beta": 80}"#)
            .unwrap();
    match entry.event {
        InputEvent::Orientation(s) => {
            assert_eq!(s.gamma, Some(10.0));
            assert_eq!(s.beta, Some(80.0));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn duplicate_behavior_names_fail_validation() {
    let json = r#"{
        "viewport": {"width": 1200, "height": 800},
        "behaviors": [
            {"name": "c", "kind": "cursor", "dot": "a", "follower": "b"},
            {"name": "c", "kind": "cursor", "dot": "x", "follower": "y"}
        ]
    }"#;
    assert!(matches!(SceneDef::from_json(json), Err(GlideError::Config(_))));
}

#[test]
fn invalid_behavior_configs_name_the_behavior() {
    let json = r#"{
        "viewport": {"width": 1200, "height": 800},
        "behaviors": [
            {"name": "mask", "kind": "reveal_mask", "container": "a", "mask": "b", "smoothing": 2.0}
        ]
    }"#;
    let err = SceneDef::from_json(json).unwrap_err();
    assert!(err.to_string().contains("'mask'"), "{err}");
}

#[test]
fn backwards_trigger_anchors_fail_before_simulation() {
    let json = r#"{
        "viewport": {"width": 1200, "height": 800},
        "behaviors": [{
            "name": "rows", "kind": "scroll_reveal", "targets": ["row"],
            "trigger": {
                "start": {"edge": "top", "viewport": 0.2},
                "end": {"at": {"edge": "top", "viewport": 0.85}}
            }
        }]
    }"#;
    let err = SceneDef::from_json(json).unwrap_err();
    assert!(matches!(err, GlideError::Config(_)));
    assert!(err.to_string().contains("'rows'"), "{err}");
}

#[test]
fn unknown_behavior_kinds_are_serde_errors() {
    let json = r#"{
        "viewport": {"width": 1200, "height": 800},
        "behaviors": [{"name": "x", "kind": "confetti"}]
    }"#;
    assert!(matches!(SceneDef::from_json(json), Err(GlideError::Serde(_))));
}

#[test]
fn bad_geometry_and_rate_are_rejected() {
    let mut def = SceneDef::from_json(CURSOR_SCENE).unwrap();
    def.fps = 0.0;
    assert!(def.validate().is_err());

    let mut def = SceneDef::from_json(CURSOR_SCENE).unwrap();
    def.viewport.width = -5.0;
    assert!(def.validate().is_err());
}

#[test]
fn build_applies_initial_layout_and_scroll() {
    let json = r#"{
        "viewport": {"width": 1000, "height": 800},
        "scroll": 4100,
        "layout": {
            "certs": {"x0": 0, "y0": 3000, "x1": 1000, "y1": 3800},
            "track": {"x0": 0, "y0": 3100, "x1": 3000, "y1": 3600}
        },
        "mounted": ["certs", "track"],
        "behaviors": [
            {"name": "certs", "kind": "pinned_strip", "section": "certs", "strip": "track", "lag": 0}
        ]
    }"#;
    let def = SceneDef::from_json(json).unwrap();
    let mut orch = def.build().unwrap();
    assert_eq!(orch.scroll(), 4100.0);
    orch.tick(def.frame_dt());
    assert_eq!(
        orch.surface().latest(&"track".into(), Property::X),
        Some(-1100.0)
    );
}
