use super::*;

#[test]
fn events_parse_from_tagged_json() {
    let events: Vec<InputEvent> = serde_json::from_str(
        r#"[
            {"type": "pointer_move", "x": 10, "y": 20},
            {"type": "scroll", "y": 250},
            {"type": "orientation", "gamma": 22.5, "beta": null},
            {"type": "permission_resolved", "granted": true},
            {"type": "layout", "target": "strip", "rect": {"x0": 0, "y0": 0, "x1": 3000, "y1": 600}},
            {"type": "hover", "path": [{"tag": "span"}, {"tag": "a", "classes": ["nav"]}]},
            {"type": "row_enter", "row": "row-1"},
            {"type": "tap", "x": 5, "y": 6}
        ]"#,
    )
    .unwrap();

    assert_eq!(events[0].pointer(), Some(Point::new(10.0, 20.0)));
    assert_eq!(events[1].kind(), ListenerKind::Scroll);
    assert_eq!(
        events[2],
        InputEvent::Orientation(OrientationSample {
            gamma: Some(22.5),
            beta: None
        })
    );
    assert_eq!(events[3].kind(), ListenerKind::Orientation);
    assert_eq!(events[4].kind(), ListenerKind::Resize);
    assert_eq!(events[5].kind(), ListenerKind::Hover);
    assert_eq!(events[6].pointer(), None);
    assert_eq!(events[7].kind(), ListenerKind::PointerMove);
    assert_eq!(events[7].pointer(), None);
}

#[test]
fn unknown_event_type_is_an_error() {
    let r: Result<InputEvent, _> = serde_json::from_str(r#"{"type": "teleport"}"#);
    assert!(r.is_err());
}
