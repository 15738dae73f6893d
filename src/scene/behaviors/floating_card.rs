//! Project preview card: a dot that trails the pointer through a section and grows into a card
//! while a row is hovered.

use crate::animation::lerp::{Interpolator, SmoothingFactor};
use crate::animation::property::{Property, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::core::Point;
use crate::foundation::error::GlideResult;
use crate::input::pointer::{HitAxis, PointerTracker};
use crate::morph::controller::{MorphConfig, MorphEvent, MorphShape, ShapeMorphController};
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv};
use crate::scene::events::InputEvent;
use crate::scene::listeners::ListenerKind;

pub const CARD_SMOOTHING: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardRow {
    pub row: TargetId,
    /// Text bound into the card while this row is shown.
    #[serde(default)]
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FloatingCardConfig {
    pub section: TargetId,
    pub card: TargetId,
    /// Text node inside the card that receives the row content.
    #[serde(default)]
    pub content: Option<TargetId>,
    pub rows: Vec<CardRow>,
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
    #[serde(default)]
    pub morph: MorphConfig,
}

fn default_smoothing() -> f64 {
    CARD_SMOOTHING
}

#[derive(Debug)]
pub struct FloatingCard {
    name: String,
    cfg: FloatingCardConfig,
    morph: ShapeMorphController<String>,
    tracker: PointerTracker,
    position: Interpolator<Point>,
    pointer: Option<Point>,
    compact: bool,
    last_shape: Option<MorphShape>,
}

impl FloatingCard {
    pub fn new(name: impl Into<String>, cfg: &FloatingCardConfig) -> GlideResult<Self> {
        Ok(Self {
            name: name.into(),
            morph: ShapeMorphController::new(cfg.morph.clone())?,
            position: Interpolator::new(Point::ZERO, SmoothingFactor::new(cfg.smoothing)?),
            cfg: cfg.clone(),
            tracker: PointerTracker::new(HitAxis::Both),
            pointer: None,
            compact: false,
            last_shape: None,
        })
    }

    pub fn morph(&self) -> &ShapeMorphController<String> {
        &self.morph
    }

    pub fn position(&self) -> Point {
        *self.position.current()
    }

    fn rehit(&mut self, env: &SceneEnv<'_>) {
        let Some(p) = self.pointer else {
            return;
        };
        self.tracker.set_bounds(env.viewport_rect(&self.cfg.section));
        let inside = self.tracker.track(p).inside;
        self.morph.set_in_section(inside && !self.compact);
    }

    fn content_for(&self, row: &TargetId) -> Option<&str> {
        self.cfg
            .rows
            .iter()
            .find(|r| &r.row == row)
            .map(|r| r.content.as_str())
    }
}

impl Behavior for FloatingCard {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[
            ListenerKind::PointerMove,
            ListenerKind::Scroll,
            ListenerKind::Resize,
            ListenerKind::Hover,
            ListenerKind::FrameTick,
        ]
    }

    fn targets(&self) -> Vec<TargetId> {
        let mut t = vec![self.cfg.section.clone(), self.cfg.card.clone()];
        t.extend(self.cfg.content.clone());
        t
    }

    fn on_mount(&mut self, env: &SceneEnv<'_>, _notices: &mut Vec<NoticeKind>) -> GlideResult<()> {
        self.compact = env.viewport.is_compact();
        Ok(())
    }

    fn on_layout(&mut self, env: &SceneEnv<'_>) -> GlideResult<()> {
        self.compact = env.viewport.is_compact();
        if self.compact {
            self.morph.set_in_section(false);
        } else {
            self.rehit(env);
        }
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &InputEvent,
        env: &SceneEnv<'_>,
        _notices: &mut Vec<NoticeKind>,
    ) -> GlideResult<()> {
        match event {
            InputEvent::PointerMove { x, y } => {
                let p = Point::new(*x, *y);
                if self.pointer.is_none() {
                    self.position.snap_to(p);
                }
                self.pointer = Some(p);
                self.position.set_target(p);
                self.rehit(env);
            }
            InputEvent::Scroll { .. } => {
                if env.in_view(&self.cfg.section) {
                    self.rehit(env);
                } else {
                    self.morph.set_in_section(false);
                }
            }
            InputEvent::RowEnter { row } => {
                if self.compact {
                    return Ok(());
                }
                let Some(content) = self.content_for(row) else {
                    tracing::debug!(behavior = %self.name, row = %row, "hover on unknown row");
                    return Ok(());
                };
                let content = content.to_owned();
                self.morph.hover_enter(row.clone(), content);
            }
            InputEvent::RowLeave { row } => self.morph.hover_leave(row),
            _ => {}
        }
        Ok(())
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        for event in self.morph.tick(env.tick.dt) {
            match event {
                MorphEvent::ContentBound { row, payload } => {
                    if let Some(content) = &self.cfg.content {
                        out.set_text(content, payload);
                    }
                    notices.push(NoticeKind::ContentBound { row });
                }
                MorphEvent::ContentCleared => {
                    if let Some(content) = &self.cfg.content {
                        out.set_text(content, "");
                    }
                    notices.push(NoticeKind::ContentCleared);
                }
                MorphEvent::StateChanged { .. } => {}
            }
        }

        if self.pointer.is_some() {
            let p = *self.position.step();
            out.set(&self.cfg.card, Property::X, p.x);
            out.set(&self.cfg.card, Property::Y, p.y);
        }

        let shape = self.morph.shape();
        if self.last_shape != Some(shape) {
            self.morph.write(&self.cfg.card, out);
            self.last_shape = Some(shape);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/floating_card.rs"]
mod tests;
