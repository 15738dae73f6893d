//! Rotating headline: cycles through text pairs and glitch-swaps each change.

use crate::animation::property::TargetId;
use crate::animation::stage::FrameWrites;
use crate::cycle::cyclic::{CycleDriver, CycleItem, CyclicText};
use crate::foundation::error::{GlideError, GlideResult};
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv, push_sequence_events};
use crate::scene::listeners::ListenerKind;
use crate::sequence::text_morph::{GlitchConfig, TextMorpher};
use crate::trigger::viewport::{TriggerSpec, TriggerState, ViewportTrigger};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RotatingTextConfig {
    pub primary: TargetId,
    #[serde(default)]
    pub secondary: Option<TargetId>,
    pub items: Vec<CycleItem>,
    #[serde(default)]
    pub driver: CycleDriver,
    /// Element whose scroll window drives a scroll rotation.
    #[serde(default)]
    pub section: Option<TargetId>,
    #[serde(default)]
    pub trigger: TriggerSpec,
    #[serde(default)]
    pub glitch: GlitchConfig,
}

#[derive(Debug)]
pub struct RotatingText {
    name: String,
    primary: TargetId,
    secondary: Option<TargetId>,
    section: Option<TargetId>,
    cycle: CyclicText,
    morpher: TextMorpher,
    trigger: ViewportTrigger,
    state: TriggerState,
    initialized: bool,
}

impl RotatingText {
    pub fn new(name: impl Into<String>, cfg: &RotatingTextConfig) -> GlideResult<Self> {
        let name = name.into();
        if matches!(cfg.driver, CycleDriver::Scroll { .. }) && cfg.section.is_none() {
            return Err(GlideError::config(format!(
                "rotating text '{name}' is scroll driven but names no section"
            )));
        }
        let mut targets = vec![cfg.primary.clone()];
        targets.extend(cfg.secondary.clone());
        Ok(Self {
            cycle: CyclicText::new(cfg.items.clone(), cfg.driver)?,
            morpher: TextMorpher::new(targets, cfg.glitch.clone())?,
            trigger: ViewportTrigger::new(cfg.trigger)?,
            state: TriggerState::default(),
            primary: cfg.primary.clone(),
            secondary: cfg.secondary.clone(),
            section: cfg.section.clone(),
            initialized: false,
            name,
        })
    }

    pub fn index(&self) -> usize {
        self.cycle.index()
    }

    pub fn is_morphing(&self) -> bool {
        self.morpher.is_active()
    }

    fn swaps(&self, item: &CycleItem) -> Vec<(TargetId, String)> {
        let mut swaps = vec![(self.primary.clone(), item.primary.clone())];
        if let Some(secondary) = &self.secondary {
            swaps.push((secondary.clone(), item.secondary.clone()));
        }
        swaps
    }
}

impl Behavior for RotatingText {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::Scroll, ListenerKind::Resize, ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        let mut t = vec![self.primary.clone()];
        t.extend(self.secondary.clone());
        t.extend(self.section.clone());
        t
    }

    fn on_layout(&mut self, env: &SceneEnv<'_>) -> GlideResult<()> {
        if let Some(section) = &self.section {
            self.trigger.layout(env.rect(section), env.viewport)?;
        }
        Ok(())
    }

    fn update_triggers(&mut self, env: &SceneEnv<'_>) {
        if self.section.is_some() {
            self.state = self.trigger.evaluate(env.scroll, env.tick.dt);
        }
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        if !self.initialized {
            for (target, text) in self.swaps(self.cycle.current()) {
                out.set_text(&target, text);
            }
            self.initialized = true;
        }

        let change = match self.cycle.driver() {
            CycleDriver::Timer { .. } => self.cycle.tick(env.tick.dt),
            CycleDriver::Scroll { .. } if self.trigger.window().is_some() => {
                self.cycle.on_progress(self.state.progress)
            }
            CycleDriver::Scroll { .. } => None,
        };
        if let Some(change) = change {
            notices.push(NoticeKind::CycleChanged {
                from: change.from,
                to: change.to,
            });
            let swaps = self.swaps(self.cycle.current());
            if let Err(err) = self.morpher.request(&swaps) {
                tracing::warn!(behavior = %self.name, %err, "text morph rejected");
            }
        }

        push_sequence_events(self.morpher.advance(env.tick.dt, env.stage, out), notices);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/rotating_text.rs"]
mod tests;
