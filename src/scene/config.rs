//! JSON scene definitions and the deterministic frame-stepped simulation built on them.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::animation::property::TargetId;
use crate::foundation::core::{FrameIndex, Viewport};
use crate::foundation::error::{GlideError, GlideResult};
use crate::scene::behaviors::Behavior;
use crate::scene::behaviors::cursor::{CursorConfig, CursorFollower};
use crate::scene::behaviors::floating_card::{FloatingCard, FloatingCardConfig};
use crate::scene::behaviors::intro::{Intro, IntroConfig};
use crate::scene::behaviors::messenger::{Messenger, MessengerConfig};
use crate::scene::behaviors::parallax::{Parallax, ParallaxConfig};
use crate::scene::behaviors::pinned_strip::{PinnedStrip, PinnedStripConfig};
use crate::scene::behaviors::reveal_mask::{RevealMask, RevealMaskConfig};
use crate::scene::behaviors::rotating_text::{RotatingText, RotatingTextConfig};
use crate::scene::behaviors::scroll_reveal::{ScrollReveal, ScrollRevealConfig};
use crate::scene::behaviors::{Layout, Notice};
use crate::scene::events::InputEvent;
use crate::scene::orchestrator::Orchestrator;
use crate::scene::surface::{FrameRecord, RecordingSurface};

pub const DEFAULT_FPS: f64 = 60.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorKind {
    Cursor(CursorConfig),
    RevealMask(RevealMaskConfig),
    Parallax(ParallaxConfig),
    ScrollReveal(ScrollRevealConfig),
    PinnedStrip(PinnedStripConfig),
    FloatingCard(FloatingCardConfig),
    RotatingText(RotatingTextConfig),
    Intro(IntroConfig),
    Messenger(MessengerConfig),
}

impl BehaviorKind {
    pub fn instantiate(&self, name: &str) -> GlideResult<Box<dyn Behavior>> {
        Ok(match self {
            Self::Cursor(c) => Box::new(CursorFollower::new(name, c)?),
            Self::RevealMask(c) => Box::new(RevealMask::new(name, c)?),
            Self::Parallax(c) => Box::new(Parallax::new(name, c)?),
            Self::ScrollReveal(c) => Box::new(ScrollReveal::new(name, c)?),
            Self::PinnedStrip(c) => Box::new(PinnedStrip::new(name, c)?),
            Self::FloatingCard(c) => Box::new(FloatingCard::new(name, c)?),
            Self::RotatingText(c) => Box::new(RotatingText::new(name, c)?),
            Self::Intro(c) => Box::new(Intro::new(name, c)?),
            Self::Messenger(c) => Box::new(Messenger::new(name, c)?),
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BehaviorDef {
    pub name: String,
    #[serde(flatten)]
    pub kind: BehaviorKind,
}

/// An input event delivered before the frame with the given index runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEntry {
    pub frame: u64,
    #[serde(flatten)]
    pub event: InputEvent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    pub viewport: Viewport,
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Initial scroll offset.
    #[serde(default)]
    pub scroll: f64,
    /// Document-space rectangles known before the first frame.
    #[serde(default)]
    pub layout: Layout,
    /// Targets present on the surface from the start.
    #[serde(default)]
    pub mounted: Vec<TargetId>,
    pub behaviors: Vec<BehaviorDef>,
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
    /// Frame count used when the caller does not ask for one.
    #[serde(default)]
    pub frames: Option<u64>,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

impl SceneDef {
    pub fn from_json(json: &str) -> GlideResult<Self> {
        let def: Self = serde_json::from_str(json)?;
        def.validate()?;
        Ok(def)
    }

    pub fn from_path(path: &Path) -> GlideResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn frame_dt(&self) -> f64 {
        1.0 / self.fps
    }

    pub fn validate(&self) -> GlideResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(GlideError::config(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if !self.scroll.is_finite() {
            return Err(GlideError::config("initial scroll must be finite"));
        }
        for (target, rect) in self.layout.iter() {
            let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
                .iter()
                .all(|v| v.is_finite());
            if !finite || rect.x1 < rect.x0 || rect.y1 < rect.y0 {
                return Err(GlideError::config(format!(
                    "layout rect for '{target}' is malformed: {rect:?}"
                )));
            }
        }

        let mut names = BTreeSet::new();
        for def in &self.behaviors {
            if def.name.is_empty() {
                return Err(GlideError::config("behavior name must be non-empty"));
            }
            if !names.insert(def.name.as_str()) {
                return Err(GlideError::config(format!(
                    "duplicate behavior name '{}'",
                    def.name
                )));
            }
            def.kind
                .instantiate(&def.name)
                .map_err(|e| GlideError::config(format!("behavior '{}': {e}", def.name)))?;
        }
        Ok(())
    }

    /// Orchestrator over a [`RecordingSurface`] with the initial geometry applied and every
    /// behavior mounted in declaration order.
    pub fn build(&self) -> GlideResult<Orchestrator<RecordingSurface>> {
        let surface = RecordingSurface::with_mounted(self.mounted.iter());
        let viewport = Viewport::new(self.viewport.width, self.viewport.height)?;
        let mut orch = Orchestrator::new(surface, viewport);
        for (target, rect) in self.layout.iter() {
            orch.dispatch(InputEvent::Layout {
                target: target.clone(),
                rect: Some(rect),
            })?;
        }
        orch.dispatch(InputEvent::Scroll { y: self.scroll })?;
        for def in &self.behaviors {
            orch.mount(def.kind.instantiate(&def.name)?)?;
        }
        Ok(orch)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameNotice {
    pub frame: FrameIndex,
    #[serde(flatten)]
    pub notice: Notice,
}

/// Everything a simulation wrote, frame by frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SimulationLog {
    pub frames: Vec<FrameRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<FrameNotice>,
}

/// Run `frames` fixed-step frames of `def`, delivering each script entry right before its frame.
#[tracing::instrument(level = "debug", skip(def))]
pub fn simulate(def: &SceneDef, frames: u64) -> GlideResult<SimulationLog> {
    let mut orch = def.build()?;
    let mut script: Vec<&ScriptEntry> = def.script.iter().collect();
    script.sort_by_key(|e| e.frame);
    let mut script = script.into_iter().peekable();

    let dt = def.frame_dt();
    let mut notices = Vec::new();
    for frame in 0..frames {
        while let Some(entry) = script.next_if(|e| e.frame <= frame) {
            orch.dispatch(entry.event.clone())?;
        }
        let report = orch.tick(dt);
        let at = report.frame.unwrap_or(FrameIndex(frame));
        notices.extend(
            report
                .notices
                .into_iter()
                .map(|notice| FrameNotice { frame: at, notice }),
        );
    }
    if script.peek().is_some() {
        tracing::debug!("script entries past the last simulated frame were not delivered");
    }

    Ok(SimulationLog {
        frames: orch.into_surface().into_frames(),
        notices,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
