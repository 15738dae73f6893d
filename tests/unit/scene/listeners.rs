use super::*;

#[test]
fn subscribe_and_release_once() {
    let mut reg = ListenerRegistry::new();
    let a = reg.subscribe(ListenerKind::PointerMove, "cursor");
    let b = reg.subscribe(ListenerKind::Scroll, "cursor");
    let c = reg.subscribe(ListenerKind::PointerMove, "mask");
    assert_eq!(reg.live_count(), 3);
    assert_eq!(reg.count(ListenerKind::PointerMove), 2);
    assert_eq!(reg.owners(ListenerKind::PointerMove), vec!["cursor", "mask"]);
    assert_eq!(a.kind(), ListenerKind::PointerMove);

    reg.release(a);
    reg.release(b);
    assert_eq!(reg.live_count(), 1);
    reg.release(c);
    assert_eq!(reg.live_count(), 0);
}

#[test]
fn foreign_handles_leave_colliding_ids_alone() {
    let mut mine = ListenerRegistry::new();
    let mut other = ListenerRegistry::new();
    // Both registries count from zero, so these two handles carry the same id.
    let foreign = other.subscribe(ListenerKind::Resize, "pin");
    let keep = mine.subscribe(ListenerKind::Visibility, "scene");

    mine.release(foreign);
    assert_eq!(mine.live_count(), 1);
    assert_eq!(mine.owners(ListenerKind::Visibility), vec!["scene"]);
    assert_eq!(other.live_count(), 1);

    mine.release(keep);
    assert_eq!(mine.live_count(), 0);
}

#[test]
fn registries_are_distinct_even_when_defaulted() {
    let mut a = ListenerRegistry::default();
    let mut b = ListenerRegistry::default();
    let sub = a.subscribe(ListenerKind::Scroll, "strip");
    b.release(sub);
    assert_eq!(a.live_count(), 1);
    assert_eq!(a.count(ListenerKind::Scroll), 1);
}
