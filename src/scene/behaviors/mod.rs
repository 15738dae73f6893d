//! Behaviors bind the motion components to concrete targets.
//!
//! Each behavior is ticked by the orchestrator in two phases: [`Behavior::update_triggers`]
//! for every behavior first, then [`Behavior::tick`]. A behavior never touches the surface;
//! it only fills the frame's write buffer.

use std::collections::BTreeMap;

use crate::animation::property::TargetId;
use crate::animation::stage::{FrameWrites, Stage};
use crate::foundation::core::{Point, Rect, TickCtx, Viewport};
use crate::foundation::error::GlideResult;
use crate::input::pointer::to_viewport_space;
use crate::scene::events::InputEvent;
use crate::scene::listeners::ListenerKind;
use crate::sequence::player::SequenceEvent;

pub(crate) mod cursor;
pub(crate) mod floating_card;
pub(crate) mod intro;
pub(crate) mod messenger;
pub(crate) mod parallax;
pub(crate) mod pinned_strip;
pub(crate) mod reveal_mask;
pub(crate) mod rotating_text;
pub(crate) mod scroll_reveal;

/// Things a behavior reports back to the host besides property writes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticeKind {
    Cue { name: String },
    TextSwapped { target: TargetId, text: String },
    SequenceFinished,
    ContentBound { row: TargetId },
    ContentCleared,
    CycleChanged { from: usize, to: usize },
    Entered { target: TargetId },
    /// The host should show its orientation consent prompt.
    PermissionRequested,
}

impl From<SequenceEvent> for NoticeKind {
    fn from(e: SequenceEvent) -> Self {
        match e {
            SequenceEvent::Cue(name) => Self::Cue { name },
            SequenceEvent::TextSwapped { target, text } => Self::TextSwapped { target, text },
            SequenceEvent::Finished => Self::SequenceFinished,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Notice {
    pub behavior: String,
    #[serde(flatten)]
    pub kind: NoticeKind,
}

/// Document-space rectangles of laid-out elements.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Layout(BTreeMap<TargetId, Rect>);

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &TargetId) -> Option<Rect> {
        self.0.get(target).copied()
    }

    pub fn set(&mut self, target: TargetId, rect: Option<Rect>) {
        match rect {
            Some(r) => {
                self.0.insert(target, r);
            }
            None => {
                self.0.remove(&target);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, Rect)> + '_ {
        self.0.iter().map(|(t, r)| (t, *r))
    }
}

impl FromIterator<(TargetId, Rect)> for Layout {
    fn from_iter<I: IntoIterator<Item = (TargetId, Rect)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Read-only snapshot of the scene handed to behaviors.
#[derive(Clone, Copy, Debug)]
pub struct SceneEnv<'a> {
    pub tick: TickCtx,
    pub viewport: Viewport,
    pub scroll: f64,
    /// Last known pointer position in viewport space.
    pub pointer: Option<Point>,
    pub layout: &'a Layout,
    pub stage: &'a Stage,
}

impl SceneEnv<'_> {
    /// Element rectangle in document space.
    pub fn rect(&self, target: &TargetId) -> Option<Rect> {
        self.layout.get(target)
    }

    /// Element rectangle in viewport space at the current scroll offset.
    pub fn viewport_rect(&self, target: &TargetId) -> Option<Rect> {
        self.rect(target).map(|r| to_viewport_space(r, self.scroll))
    }

    /// Whether any part of `target` is inside the viewport vertically.
    pub fn in_view(&self, target: &TargetId) -> bool {
        self.viewport_rect(target)
            .is_some_and(|r| r.y1 >= 0.0 && r.y0 <= self.viewport.height)
    }
}

pub trait Behavior {
    fn name(&self) -> &str;

    /// Global listeners this behavior needs while mounted.
    fn listens(&self) -> &'static [ListenerKind];

    /// Targets that must be mounted on the surface for the behavior to tick.
    fn targets(&self) -> Vec<TargetId>;

    fn on_mount(&mut self, _env: &SceneEnv<'_>, _notices: &mut Vec<NoticeKind>) -> GlideResult<()> {
        Ok(())
    }

    /// Geometry changed (resize or element layout); recompute anything derived from it.
    fn on_layout(&mut self, _env: &SceneEnv<'_>) -> GlideResult<()> {
        Ok(())
    }

    fn on_event(
        &mut self,
        _event: &InputEvent,
        _env: &SceneEnv<'_>,
        _notices: &mut Vec<NoticeKind>,
    ) -> GlideResult<()> {
        Ok(())
    }

    /// First phase of a frame: evaluate scroll triggers.
    fn update_triggers(&mut self, _env: &SceneEnv<'_>) {}

    /// Second phase of a frame: advance interpolation and sequences, write results.
    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>);
}

pub(crate) fn push_sequence_events(events: Vec<SequenceEvent>, notices: &mut Vec<NoticeKind>) {
    notices.extend(events.into_iter().map(NoticeKind::from));
}
