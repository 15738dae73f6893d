//! Horizontal strip scrubbed through a pinned section.

use crate::animation::property::{Property, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::error::GlideResult;
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv};
use crate::scene::listeners::ListenerKind;
use crate::trigger::pin::{PIN_PADDING, PinFrame, PinLayout, PinnedScrub};

pub const PIN_LAG_SECS: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinnedStripConfig {
    pub section: TargetId,
    pub strip: TargetId,
    /// Optional bar whose `scale_x` mirrors scrub progress.
    #[serde(default)]
    pub progress_bar: Option<TargetId>,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_lag")]
    pub lag: f64,
}

fn default_padding() -> f64 {
    PIN_PADDING
}

fn default_lag() -> f64 {
    PIN_LAG_SECS
}

#[derive(Debug)]
pub struct PinnedStrip {
    name: String,
    cfg: PinnedStripConfig,
    pin: PinnedScrub,
    frame: PinFrame,
    last: Option<PinFrame>,
}

impl PinnedStrip {
    pub fn new(name: impl Into<String>, cfg: &PinnedStripConfig) -> GlideResult<Self> {
        // Validates padding up front instead of on the first layout.
        PinLayout::new(0.0, 0.0, cfg.padding)?;
        Ok(Self {
            name: name.into(),
            pin: PinnedScrub::new(cfg.lag),
            cfg: cfg.clone(),
            frame: PinFrame::default(),
            last: None,
        })
    }

    pub fn frame(&self) -> PinFrame {
        self.frame
    }

    /// Scroll distance absorbed by the pin under the current layout.
    pub fn distance(&self) -> f64 {
        self.pin.mapping().map_or(0.0, |m| m.layout.distance())
    }
}

impl Behavior for PinnedStrip {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::Scroll, ListenerKind::Resize, ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        let mut t = vec![self.cfg.section.clone(), self.cfg.strip.clone()];
        t.extend(self.cfg.progress_bar.clone());
        t
    }

    fn on_layout(&mut self, env: &SceneEnv<'_>) -> GlideResult<()> {
        self.last = None;
        match (env.rect(&self.cfg.section), env.rect(&self.cfg.strip)) {
            (Some(section), Some(strip)) => {
                let recomputed = PinLayout::new(strip.width(), env.viewport.width, self.cfg.padding)
                    .and_then(|layout| self.pin.recompute(section.y0, layout));
                if recomputed.is_err() {
                    self.pin.invalidate();
                }
                recomputed
            }
            _ => {
                self.pin.invalidate();
                Ok(())
            }
        }
    }

    fn update_triggers(&mut self, env: &SceneEnv<'_>) {
        self.frame = self.pin.evaluate(env.scroll, env.tick.dt);
    }

    fn tick(&mut self, _env: &SceneEnv<'_>, out: &mut FrameWrites, _notices: &mut Vec<NoticeKind>) {
        if self.last == Some(self.frame) {
            return;
        }
        let f = self.frame;
        out.set(&self.cfg.section, Property::Y, f.hold);
        out.set(&self.cfg.strip, Property::X, f.translate);
        if let Some(bar) = &self.cfg.progress_bar {
            out.set(bar, Property::ScaleX, f.progress);
        }
        if self.last.is_some_and(|l| l.pinned != f.pinned) {
            tracing::trace!(behavior = %self.name, pinned = f.pinned, "pin state changed");
        }
        self.last = Some(f);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/pinned_strip.rs"]
mod tests;
