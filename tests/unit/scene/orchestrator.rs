use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::property::Property;
use crate::foundation::core::Rect;
use crate::input::orientation::OrientationCapability;
use crate::scene::behaviors::cursor::{CursorConfig, CursorFollower};
use crate::scene::behaviors::parallax::{Parallax, ParallaxConfig, ParallaxGains};
use crate::animation::ease::Ease;
use crate::animation::property::PropertyMap;
use crate::scene::behaviors::pinned_strip::{PinnedStrip, PinnedStripConfig};
use crate::scene::behaviors::scroll_reveal::{ScrollReveal, ScrollRevealConfig};
use crate::scene::delegate::INTERACTIVE_SELECTORS;
use crate::scene::surface::RecordingSurface;
use crate::trigger::pin::PIN_PADDING;
use crate::trigger::viewport::TriggerSpec;
use crate::trigger::window::{Anchor, Edge, EndAnchor, TriggerMode};

const DT: f64 = 1.0 / 60.0;

type Log = Rc<RefCell<Vec<String>>>;

/// Records its phase calls and writes the frame time to each of its targets.
struct Recorder {
    name: &'static str,
    targets: Vec<TargetId>,
    log: Log,
    stray_write: bool,
}

impl Recorder {
    fn boxed(name: &'static str, targets: &[&str], log: &Log) -> Box<dyn Behavior> {
        Box::new(Self {
            name,
            targets: targets.iter().map(|t| TargetId::from(*t)).collect(),
            log: Rc::clone(log),
            stray_write: false,
        })
    }
}

impl Behavior for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::Scroll, ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        self.targets.clone()
    }

    fn on_event(
        &mut self,
        _event: &InputEvent,
        _env: &SceneEnv<'_>,
        notices: &mut Vec<NoticeKind>,
    ) -> GlideResult<()> {
        self.log.borrow_mut().push(format!("{}:event", self.name));
        notices.push(NoticeKind::Cue {
            name: "scrolled".to_owned(),
        });
        Ok(())
    }

    fn update_triggers(&mut self, _env: &SceneEnv<'_>) {
        self.log.borrow_mut().push(format!("{}:triggers", self.name));
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, _notices: &mut Vec<NoticeKind>) {
        self.log.borrow_mut().push(format!("{}:tick", self.name));
        for t in &self.targets {
            out.set(t, Property::X, env.tick.time);
        }
        if self.stray_write {
            out.set(&"ghost".into(), Property::X, 1.0);
        }
    }
}

fn orchestrator(mounted: &[&str]) -> Orchestrator<RecordingSurface> {
    let surface = RecordingSurface::with_mounted(mounted.iter().copied());
    let viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };
    Orchestrator::new(surface, viewport)
}

fn cursor() -> Box<dyn Behavior> {
    Box::new(
        CursorFollower::new(
            "cursor",
            &CursorConfig {
                dot: "dot".into(),
                follower: "ring".into(),
                smoothing: 0.15,
                selectors: INTERACTIVE_SELECTORS.to_owned(),
            },
        )
        .unwrap(),
    )
}

#[test]
fn mount_and_unmount_pair_every_listener() {
    let mut o = orchestrator(&["dot", "ring"]);
    o.mount(cursor()).unwrap();
    assert_eq!(o.listeners().live_count(), 3);
    assert_eq!(o.listeners().owners(ListenerKind::PointerMove), vec!["cursor"]);

    assert!(o.unmount("cursor"));
    assert_eq!(o.listeners().live_count(), 0);
    assert!(!o.unmount("cursor"));
}

#[test]
fn duplicate_names_are_rejected() {
    let mut o = orchestrator(&[]);
    o.mount(cursor()).unwrap();
    let err = o.mount(cursor()).unwrap_err();
    assert!(matches!(err, GlideError::Config(_)));
    assert_eq!(o.listeners().live_count(), 3);
}

#[test]
fn behaviors_wait_for_their_targets() {
    let mut o = orchestrator(&[]);
    o.mount(cursor()).unwrap();
    o.dispatch(InputEvent::PointerMove { x: 10.0, y: 20.0 }).unwrap();

    let report = o.tick(DT);
    assert_eq!(report.skipped, vec!["cursor".to_owned()]);
    assert_eq!(report.writes, 0);

    o.surface_mut().mount("dot");
    o.surface_mut().mount("ring");
    let report = o.tick(DT);
    assert!(report.skipped.is_empty());
    assert_eq!(o.surface().latest(&"dot".into(), Property::X), Some(10.0));
}

#[test]
fn triggers_run_for_everyone_before_any_tick() {
    let log = Log::default();
    let mut o = orchestrator(&["a", "b"]);
    o.mount(Recorder::boxed("first", &["a"], &log)).unwrap();
    o.mount(Recorder::boxed("second", &["b"], &log)).unwrap();
    o.tick(DT);
    assert_eq!(
        *log.borrow(),
        vec!["first:triggers", "second:triggers", "first:tick", "second:tick"]
    );
}

#[test]
fn events_reach_only_subscribers_and_notices_are_tagged() {
    let log = Log::default();
    let mut o = orchestrator(&["a"]);
    o.mount(Recorder::boxed("recorder", &["a"], &log)).unwrap();
    o.dispatch(InputEvent::PointerMove { x: 1.0, y: 1.0 }).unwrap();
    assert!(log.borrow().is_empty());

    o.dispatch(InputEvent::Scroll { y: 300.0 }).unwrap();
    assert_eq!(*log.borrow(), vec!["recorder:event"]);
    assert_eq!(o.scroll(), 300.0);

    let report = o.tick(DT);
    assert_eq!(
        report.notices,
        vec![Notice {
            behavior: "recorder".to_owned(),
            kind: NoticeKind::Cue {
                name: "scrolled".to_owned()
            },
        }]
    );
    assert!(o.tick(DT).notices.is_empty());
}

#[test]
fn writes_to_unmounted_targets_never_reach_the_surface() {
    let log = Log::default();
    let mut o = orchestrator(&["a"]);
    o.mount(Box::new(Recorder {
        name: "recorder",
        targets: vec!["a".into()],
        log,
        stray_write: true,
    }))
    .unwrap();
    let report = o.tick(DT);
    assert_eq!(report.writes, 1);
    assert_eq!(o.surface().latest(&"ghost".into(), Property::X), None);
    assert!(o.stage().target(&"ghost".into()).is_none());
}

#[test]
fn hidden_pages_do_not_tick_or_replay_time() {
    let log = Log::default();
    let mut o = orchestrator(&["a"]);
    o.mount(Recorder::boxed("recorder", &["a"], &log)).unwrap();
    o.tick(DT);

    o.dispatch(InputEvent::Visibility { visible: false }).unwrap();
    let report = o.tick(1.0);
    assert_eq!(report.frame, None);
    assert_eq!(o.frame(), Some(FrameIndex(0)));

    o.dispatch(InputEvent::Visibility { visible: true }).unwrap();
    let report = o.tick(5.0);
    assert_eq!(report.frame, Some(FrameIndex(1)));
    assert_eq!(report.time, DT);
    let report = o.tick(0.5);
    assert!((report.time - (DT + 0.5)).abs() < 1e-12);
}

#[test]
fn resize_recomputes_pin_geometry() {
    let mut o = orchestrator(&["certs", "track"]);
    o.dispatch(InputEvent::Resize {
        width: 1000.0,
        height: 800.0,
    })
    .unwrap();
    o.dispatch(InputEvent::Layout {
        target: "certs".into(),
        rect: Some(Rect::new(0.0, 3000.0, 1000.0, 3800.0)),
    })
    .unwrap();
    o.dispatch(InputEvent::Layout {
        target: "track".into(),
        rect: Some(Rect::new(0.0, 3100.0, 3000.0, 3600.0)),
    })
    .unwrap();
    let strip = PinnedStrip::new(
        "certs",
        &PinnedStripConfig {
            section: "certs".into(),
            strip: "track".into(),
            progress_bar: None,
            padding: PIN_PADDING,
            lag: 0.0,
        },
    )
    .unwrap();
    o.mount(Box::new(strip)).unwrap();

    o.dispatch(InputEvent::Scroll { y: 4500.0 }).unwrap();
    o.tick(DT);
    let track: TargetId = "track".into();
    let x = o.surface().latest(&track, Property::X).unwrap();
    assert!((x + 1500.0).abs() < 1e-9, "x = {x}");

    o.dispatch(InputEvent::Resize {
        width: 2000.0,
        height: 800.0,
    })
    .unwrap();
    o.tick(DT);
    assert_eq!(o.surface().latest(&track, Property::X), Some(-1200.0));
}

#[test]
fn failed_relayout_still_refreshes_later_behaviors() {
    let mut o = Orchestrator::new(
        RecordingSurface::with_mounted(["block", "certs", "track"]),
        Viewport {
            width: 1200.0,
            height: 1200.0,
        },
    );
    for (target, rect) in [
        ("block", Rect::new(0.0, 500.0, 1000.0, 1500.0)),
        ("certs", Rect::new(0.0, 3000.0, 1000.0, 3800.0)),
        ("track", Rect::new(0.0, 3100.0, 3000.0, 3600.0)),
    ] {
        o.dispatch(InputEvent::Layout {
            target: target.into(),
            rect: Some(rect),
        })
        .unwrap();
    }

    // Bottom meets the viewport bottom before top meets the viewport top only while the viewport
    // is taller than the block. At 1200px the window is [300, 500].
    let reveal = ScrollReveal::new(
        "tall",
        &ScrollRevealConfig {
            targets: vec!["block".into()],
            group: None,
            trigger: TriggerSpec {
                start: Anchor::new(Edge::Bottom, 1.0),
                end: EndAnchor::At(Anchor::new(Edge::Top, 0.0)),
                mode: TriggerMode::Scrub,
                lag: 0.0,
            },
            from: PropertyMap::new(),
            to: PropertyMap::new(),
            ease: Ease::Power3Out,
            duration: 1.0,
            stagger: 0.0,
        },
    )
    .unwrap();
    o.mount(Box::new(reveal)).unwrap();
    let strip = PinnedStrip::new(
        "certs",
        &PinnedStripConfig {
            section: "certs".into(),
            strip: "track".into(),
            progress_bar: None,
            padding: PIN_PADDING,
            lag: 0.0,
        },
    )
    .unwrap();
    o.mount(Box::new(strip)).unwrap();

    // 800px is shorter than the block, so the reveal window inverts.
    let err = o
        .dispatch(InputEvent::Resize {
            width: 1000.0,
            height: 800.0,
        })
        .unwrap_err();
    assert!(matches!(err, GlideError::Contract(_)));
    assert_eq!(o.viewport().height, 800.0);

    // The strip behind the failing reveal picked up the new width: D = 3000 - 1000 + 200.
    o.dispatch(InputEvent::Scroll { y: 5100.0 }).unwrap();
    o.tick(DT);
    let track: TargetId = "track".into();
    assert_eq!(o.surface().latest(&track, Property::X), Some(-2100.0));
}

#[test]
fn invalid_resize_is_a_config_error() {
    let mut o = orchestrator(&[]);
    let err = o
        .dispatch(InputEvent::Resize {
            width: 0.0,
            height: 800.0,
        })
        .unwrap_err();
    assert!(matches!(err, GlideError::Config(_)));
    assert_eq!(o.viewport().width, 1000.0);
}

#[test]
fn tap_raises_the_permission_prompt_as_a_notice() {
    let mut o = Orchestrator::new(
        RecordingSurface::with_mounted(["title"]),
        Viewport {
            width: 400.0,
            height: 800.0,
        },
    );
    let hero = Parallax::new(
        "hero",
        &ParallaxConfig {
            primary: vec!["title".into()],
            secondary: Vec::new(),
            orientation: OrientationCapability::ConsentRequired,
            pointer_gains: ParallaxGains::POINTER,
            tilt_gains: ParallaxGains::TILT,
        },
    )
    .unwrap();
    o.mount(Box::new(hero)).unwrap();
    assert!(o.tick(DT).notices.is_empty());

    o.dispatch(InputEvent::Tap { x: 200.0, y: 400.0 }).unwrap();
    let report = o.tick(DT);
    assert_eq!(
        report.notices,
        vec![Notice {
            behavior: "hero".to_owned(),
            kind: NoticeKind::PermissionRequested,
        }]
    );
}

#[test]
fn unmount_forgets_stage_state_and_into_surface_keeps_frames() {
    let log = Log::default();
    let mut o = orchestrator(&["a"]);
    o.mount(Recorder::boxed("recorder", &["a"], &log)).unwrap();
    o.tick(DT);
    o.tick(DT);
    assert!(o.stage().target(&"a".into()).is_some());

    o.unmount("recorder");
    assert!(o.stage().target(&"a".into()).is_none());

    o.mount(Recorder::boxed("recorder", &["a"], &log)).unwrap();
    let surface = o.into_surface();
    assert_eq!(surface.frames().len(), 2);
}
