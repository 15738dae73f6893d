//! Custom cursor: a dot pinned to the pointer and a smoothed follower ring that grows over
//! interactive elements.

use crate::animation::ease::Ease;
use crate::animation::lerp::{Interpolator, SmoothingFactor};
use crate::animation::property::{Property, PropertyMap, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::core::Point;
use crate::foundation::error::GlideResult;
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv, push_sequence_events};
use crate::scene::delegate::{INTERACTIVE_SELECTORS, SelectorList};
use crate::scene::events::InputEvent;
use crate::scene::listeners::ListenerKind;
use crate::sequence::director::Director;
use crate::sequence::step::{Placement, StepAction, Tween};
use crate::sequence::timeline::Sequence;

pub const CURSOR_FOLLOW_SMOOTHING: f64 = 0.15;
pub const HOVER_FOLLOWER_SCALE: f64 = 2.0;
pub const FOLLOWER_OPACITY: f64 = 0.8;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CursorConfig {
    pub dot: TargetId,
    pub follower: TargetId,
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
    #[serde(default = "default_selectors")]
    pub selectors: String,
}

fn default_smoothing() -> f64 {
    CURSOR_FOLLOW_SMOOTHING
}

fn default_selectors() -> String {
    INTERACTIVE_SELECTORS.to_owned()
}

#[derive(Debug)]
pub struct CursorFollower {
    name: String,
    dot: TargetId,
    follower: TargetId,
    selectors: SelectorList,
    follow: Interpolator<Point>,
    pointer: Option<Point>,
    hovering: bool,
    director: Director,
}

impl CursorFollower {
    pub fn new(name: impl Into<String>, cfg: &CursorConfig) -> GlideResult<Self> {
        Ok(Self {
            name: name.into(),
            dot: cfg.dot.clone(),
            follower: cfg.follower.clone(),
            selectors: SelectorList::parse(&cfg.selectors)?,
            follow: Interpolator::new(Point::ZERO, SmoothingFactor::new(cfg.smoothing)?),
            pointer: None,
            hovering: false,
            director: Director::new(),
        })
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    fn hover_sequence(&self) -> Sequence {
        let (ring, dot) = if self.hovering {
            (HOVER_FOLLOWER_SCALE, 0.0)
        } else {
            (1.0, 1.0)
        };
        let mut seq = Sequence::new().then(
            Tween::to(
                [&self.follower],
                PropertyMap::new()
                    .with(Property::Scale, ring)
                    .with(Property::Opacity, FOLLOWER_OPACITY),
                0.3,
            )
            .ease(Ease::Power2Out),
        );
        seq.push(
            StepAction::Tween(Tween::to(
                [&self.dot],
                PropertyMap::new().with(Property::Scale, dot),
                0.2,
            )),
            Placement::WithPrevious,
        );
        seq
    }
}

impl Behavior for CursorFollower {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::PointerMove, ListenerKind::Hover, ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        vec![self.dot.clone(), self.follower.clone()]
    }

    fn on_event(
        &mut self,
        event: &InputEvent,
        _env: &SceneEnv<'_>,
        _notices: &mut Vec<NoticeKind>,
    ) -> GlideResult<()> {
        match event {
            InputEvent::PointerMove { x, y } => {
                let p = Point::new(*x, *y);
                if self.pointer.is_none() {
                    // First reading: no sweep in from the corner.
                    self.follow.snap_to(p);
                }
                self.pointer = Some(p);
                self.follow.set_target(p);
            }
            InputEvent::Hover { path } => {
                let hovering = self.selectors.closest(path).is_some();
                if hovering != self.hovering {
                    self.hovering = hovering;
                    tracing::trace!(hovering, "cursor hover changed");
                    let seq = self.hover_sequence();
                    self.director.play(&seq)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        if let Some(p) = self.pointer {
            out.set(&self.dot, Property::X, p.x);
            out.set(&self.dot, Property::Y, p.y);
            let f = *self.follow.step();
            out.set(&self.follower, Property::X, f.x);
            out.set(&self.follower, Property::Y, f.y);
        }
        let events = self.director.advance(env.tick.dt, env.stage, out);
        push_sequence_events(events, notices);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/cursor.rs"]
mod tests;
