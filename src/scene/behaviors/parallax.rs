//! Tilt parallax for the hero: pointer-driven on wide viewports, device-orientation-driven on
//! compact ones once permission is granted. Where consent is required, the first tap on a
//! compact viewport raises the prompt.

use crate::animation::lerp::{Interpolator, SmoothingFactor};
use crate::animation::property::{Property, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::GlideResult;
use crate::input::orientation::{OrientationCapability, OrientationTracker, Permission};
use crate::input::pointer::normalize_in_viewport;
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv};
use crate::scene::events::InputEvent;
use crate::scene::listeners::ListenerKind;

pub const POINTER_SMOOTHING: f64 = 0.08;
pub const TILT_SMOOTHING: f64 = 0.15;

/// Degrees of rotation, and pixels of travel, at a full-scale reading.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxGains {
    pub rotate: f64,
    pub travel: f64,
    /// Counter-travel of the secondary elements.
    pub counter: f64,
}

impl ParallaxGains {
    pub const POINTER: Self = Self {
        rotate: 10.0,
        travel: 20.0,
        counter: 15.0,
    };

    pub const TILT: Self = Self {
        rotate: 15.0,
        travel: 30.0,
        counter: 20.0,
    };
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxConfig {
    /// Elements that rotate and travel with the reading.
    pub primary: Vec<TargetId>,
    /// Elements that travel against it.
    #[serde(default)]
    pub secondary: Vec<TargetId>,
    #[serde(default = "default_capability")]
    pub orientation: OrientationCapability,
    #[serde(default = "default_pointer_gains")]
    pub pointer_gains: ParallaxGains,
    #[serde(default = "default_tilt_gains")]
    pub tilt_gains: ParallaxGains,
}

fn default_capability() -> OrientationCapability {
    OrientationCapability::Absent
}

fn default_pointer_gains() -> ParallaxGains {
    ParallaxGains::POINTER
}

fn default_tilt_gains() -> ParallaxGains {
    ParallaxGains::TILT
}

#[derive(Debug)]
pub struct Parallax {
    name: String,
    cfg: ParallaxConfig,
    orientation: OrientationTracker,
    pointer: Interpolator<Vec2>,
    tilt: Interpolator<Vec2>,
    compact: bool,
    engaged: bool,
    last_written: Option<Vec2>,
}

impl Parallax {
    pub fn new(name: impl Into<String>, cfg: &ParallaxConfig) -> GlideResult<Self> {
        Ok(Self {
            name: name.into(),
            orientation: OrientationTracker::new(cfg.orientation),
            pointer: Interpolator::new(Vec2::ZERO, SmoothingFactor::new(POINTER_SMOOTHING)?),
            tilt: Interpolator::new(Vec2::ZERO, SmoothingFactor::new(TILT_SMOOTHING)?),
            cfg: cfg.clone(),
            compact: false,
            engaged: false,
            last_written: None,
        })
    }

    pub fn permission(&self) -> Permission {
        self.orientation.permission()
    }

    /// Smoothed reading currently applied, in `[-1, 1]` per axis.
    pub fn reading(&self) -> Vec2 {
        if self.compact {
            *self.tilt.current()
        } else {
            *self.pointer.current()
        }
    }
}

impl Behavior for Parallax {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[
            ListenerKind::PointerMove,
            ListenerKind::Orientation,
            ListenerKind::Resize,
            ListenerKind::FrameTick,
        ]
    }

    fn targets(&self) -> Vec<TargetId> {
        self.cfg
            .primary
            .iter()
            .chain(&self.cfg.secondary)
            .cloned()
            .collect()
    }

    fn on_mount(&mut self, env: &SceneEnv<'_>, _notices: &mut Vec<NoticeKind>) -> GlideResult<()> {
        self.compact = env.viewport.is_compact();
        Ok(())
    }

    fn on_layout(&mut self, env: &SceneEnv<'_>) -> GlideResult<()> {
        let compact = env.viewport.is_compact();
        if compact != self.compact {
            tracing::debug!(compact, "parallax input mode switched");
            self.compact = compact;
            self.pointer.set_target(Vec2::ZERO);
            self.tilt.set_target(Vec2::ZERO);
        }
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &InputEvent,
        env: &SceneEnv<'_>,
        notices: &mut Vec<NoticeKind>,
    ) -> GlideResult<()> {
        match event {
            InputEvent::Tap { .. } if self.compact => {
                if self.orientation.request_permission() {
                    notices.push(NoticeKind::PermissionRequested);
                }
            }
            InputEvent::PointerMove { x, y } if !self.compact => {
                let v = normalize_in_viewport(Point::new(*x, *y), env.viewport);
                self.pointer.set_target(v);
                self.engaged = true;
            }
            InputEvent::Orientation(sample) if self.compact => {
                if let Some(v) = self.orientation.on_sample(*sample) {
                    self.tilt.set_target(v);
                    self.engaged = true;
                }
            }
            InputEvent::PermissionResolved { granted } => {
                self.orientation.resolve_permission(*granted);
            }
            _ => {}
        }
        Ok(())
    }

    fn tick(&mut self, _env: &SceneEnv<'_>, out: &mut FrameWrites, _notices: &mut Vec<NoticeKind>) {
        if !self.engaged {
            return;
        }

        let (v, gains) = if self.compact {
            (*self.tilt.step(), self.cfg.tilt_gains)
        } else {
            (*self.pointer.step(), self.cfg.pointer_gains)
        };
        if self.last_written == Some(v) {
            return;
        }
        self.last_written = Some(v);

        for t in &self.cfg.primary {
            out.set(t, Property::RotationY, v.x * gains.rotate);
            out.set(t, Property::RotationX, -v.y * gains.rotate);
            out.set(t, Property::X, v.x * gains.travel);
            out.set(t, Property::Y, v.y * gains.travel);
        }
        for t in &self.cfg.secondary {
            out.set(t, Property::X, -v.x * gains.counter);
            out.set(t, Property::Y, -v.y * gains.counter);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/parallax.rs"]
mod tests;
