//! Magnetic reveal: a circular mask over a highlighted copy of a text block follows the
//! pointer with smoothing, plus a glow that fades in while hovering.

use crate::animation::ease::Ease;
use crate::animation::lerp::{Interpolator, SmoothingFactor};
use crate::animation::property::{Property, PropertyMap, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::core::Point;
use crate::foundation::error::GlideResult;
use crate::input::pointer::{HitAxis, PointerTracker};
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv, push_sequence_events};
use crate::scene::events::InputEvent;
use crate::scene::listeners::ListenerKind;
use crate::sequence::player::SequencePlayer;
use crate::sequence::step::Tween;
use crate::sequence::timeline::Sequence;

pub const MASK_SMOOTHING: f64 = 0.12;
pub const MASK_RADIUS: f64 = 120.0;
pub const COMPACT_MASK_RADIUS: f64 = 90.0;
pub const GLOW_FADE_SECS: f64 = 0.3;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealMaskConfig {
    /// Text block whose box defines the local coordinate space.
    pub container: TargetId,
    pub mask: TargetId,
    #[serde(default)]
    pub glow: Option<TargetId>,
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_compact_radius")]
    pub compact_radius: f64,
}

fn default_smoothing() -> f64 {
    MASK_SMOOTHING
}

fn default_radius() -> f64 {
    MASK_RADIUS
}

fn default_compact_radius() -> f64 {
    COMPACT_MASK_RADIUS
}

#[derive(Debug)]
pub struct RevealMask {
    name: String,
    cfg: RevealMaskConfig,
    tracker: PointerTracker,
    center: Interpolator<Point>,
    glow: SequencePlayer,
    hovering: bool,
}

impl RevealMask {
    pub fn new(name: impl Into<String>, cfg: &RevealMaskConfig) -> GlideResult<Self> {
        Ok(Self {
            name: name.into(),
            center: Interpolator::new(Point::ZERO, SmoothingFactor::new(cfg.smoothing)?),
            cfg: cfg.clone(),
            tracker: PointerTracker::new(HitAxis::Both),
            glow: SequencePlayer::new(),
            hovering: false,
        })
    }

    pub fn center(&self) -> Point {
        *self.center.current()
    }

    fn set_hovering(&mut self, hovering: bool) -> GlideResult<()> {
        if hovering == self.hovering {
            return Ok(());
        }
        self.hovering = hovering;
        if let Some(glow) = &self.cfg.glow {
            let opacity = if hovering { 1.0 } else { 0.0 };
            let seq = Sequence::new().then(
                Tween::to(
                    [glow],
                    PropertyMap::new().with(Property::Opacity, opacity),
                    GLOW_FADE_SECS,
                )
                .ease(Ease::Power1Out),
            );
            self.glow.play(&seq)?;
        }
        Ok(())
    }
}

impl Behavior for RevealMask {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::PointerMove, ListenerKind::Scroll, ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        let mut t = vec![self.cfg.container.clone(), self.cfg.mask.clone()];
        t.extend(self.cfg.glow.clone());
        t
    }

    fn on_event(
        &mut self,
        event: &InputEvent,
        env: &SceneEnv<'_>,
        _notices: &mut Vec<NoticeKind>,
    ) -> GlideResult<()> {
        let pointer = match event {
            InputEvent::PointerMove { x, y } => Point::new(*x, *y),
            // The box moves under a still pointer while scrolling.
            InputEvent::Scroll { .. } => match env.pointer {
                Some(p) => p,
                None => return Ok(()),
            },
            _ => return Ok(()),
        };
        self.tracker.set_bounds(env.viewport_rect(&self.cfg.container));
        let reading = self.tracker.track(pointer);
        if let Some(local) = reading.local {
            self.center.set_target(local);
        }
        self.set_hovering(reading.inside)
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        let c = *self.center.step();
        let radius = if env.viewport.is_compact() {
            self.cfg.compact_radius
        } else {
            self.cfg.radius
        };
        out.set(&self.cfg.mask, Property::MaskX, c.x);
        out.set(&self.cfg.mask, Property::MaskY, c.y);
        out.set(&self.cfg.mask, Property::MaskRadius, radius);
        if let Some(glow) = &self.cfg.glow {
            out.set(glow, Property::X, c.x);
            out.set(glow, Property::Y, c.y);
        }
        push_sequence_events(self.glow.advance(env.tick.dt, env.stage, out), notices);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/reveal_mask.rs"]
mod tests;
