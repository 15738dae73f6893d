use super::*;
use crate::animation::property::{Property, PropertyMap};
use crate::sequence::player::PlayState;
use crate::sequence::step::Tween;

fn move_x(targets: &[&str], to: f64) -> Sequence {
    Sequence::new().then(Tween::to(
        targets.iter().copied(),
        PropertyMap::new().with(Property::X, to),
        1.0,
    ))
}

#[test]
fn parallel_lane_runs_alongside_foreground() {
    let mut d = Director::new();
    d.play(&move_x(&["title"], 10.0)).unwrap();
    d.play_parallel("float", &move_x(&["robot"], 20.0)).unwrap();

    let stage = Stage::new();
    let mut out = FrameWrites::new();
    d.advance(0.5, &stage, &mut out);
    assert_eq!(out.get(&TargetId::from("title"), Property::X), Some(5.0));
    assert_eq!(out.get(&TargetId::from("robot"), Property::X), Some(10.0));
}

#[test]
fn overlapping_parallel_lane_is_rejected() {
    let mut d = Director::new();
    d.play(&move_x(&["title", "robot"], 10.0)).unwrap();
    let err = d.play_parallel("float", &move_x(&["robot"], 20.0)).unwrap_err();
    assert!(matches!(err, GlideError::Contract(_)));

    d.play_parallel("a", &move_x(&["x"], 1.0)).unwrap();
    assert!(d.play_parallel("b", &move_x(&["x"], 1.0)).is_err());
    // restarting the same lane is allowed
    d.play_parallel("a", &move_x(&["x"], 2.0)).unwrap();
}

#[test]
fn foreground_play_interrupts_overlapping_lanes() {
    let mut d = Director::new();
    d.play_parallel("float", &move_x(&["robot"], 20.0)).unwrap();
    d.play_parallel("other", &move_x(&["cloud"], 20.0)).unwrap();
    d.play(&move_x(&["robot"], 0.0)).unwrap();
    assert_eq!(d.lane("float").unwrap().state(), PlayState::Interrupted);
    assert!(d.lane("other").unwrap().is_active());
}

#[test]
fn replaying_foreground_interrupts_previous() {
    let mut d = Director::new();
    let stage = Stage::new();
    d.play(&move_x(&["a"], 10.0)).unwrap();
    d.advance(0.5, &stage, &mut FrameWrites::new());
    d.play(&move_x(&["b"], 10.0)).unwrap();
    let mut out = FrameWrites::new();
    d.advance(0.5, &stage, &mut out);
    assert_eq!(out.get(&TargetId::from("a"), Property::X), None);
    assert!(out.get(&TargetId::from("b"), Property::X).is_some());
}

#[test]
fn finished_lanes_are_dropped() {
    let mut d = Director::new();
    let stage = Stage::new();
    d.play_parallel("once", &move_x(&["a"], 1.0)).unwrap();
    let events = d.advance(2.0, &stage, &mut FrameWrites::new());
    assert_eq!(events, vec![SequenceEvent::Finished]);
    assert!(d.lane("once").is_none());
    assert!(!d.is_active());
}
