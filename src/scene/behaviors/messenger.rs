//! Messenger tour: a character flies in, speaks a few lines through a bubble, and flies off,
//! bobbing on a separate wrapper the whole time it is on screen.

use crate::animation::property::TargetId;
use crate::animation::stage::FrameWrites;
use crate::foundation::error::{GlideError, GlideResult};
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv};
use crate::scene::listeners::ListenerKind;
use crate::sequence::director::Director;
use crate::sequence::player::SequenceEvent;
use crate::sequence::templates::{
    FLOAT_AMPLITUDE, FLOAT_HALF_PERIOD_SECS, TOUR_DONE_CUE, TourConfig, TourTargets, hover_float,
    messenger_tour,
};

const FLOAT_LANE: &str = "float";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessengerConfig {
    #[serde(flatten)]
    pub targets: TourTargets,
    /// Wrapper around the messenger that carries the idle bob.
    #[serde(default)]
    pub float: Option<TargetId>,
    pub messages: Vec<String>,
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default = "default_amplitude")]
    pub float_amplitude: f64,
    #[serde(default = "default_half_period")]
    pub float_half_period: f64,
}

fn default_amplitude() -> f64 {
    FLOAT_AMPLITUDE
}

fn default_half_period() -> f64 {
    FLOAT_HALF_PERIOD_SECS
}

#[derive(Debug)]
pub struct Messenger {
    name: String,
    cfg: MessengerConfig,
    director: Director,
    done: bool,
}

impl Messenger {
    pub fn new(name: impl Into<String>, cfg: &MessengerConfig) -> GlideResult<Self> {
        let name = name.into();
        if cfg.messages.is_empty() {
            return Err(GlideError::config(format!("messenger '{name}' has no messages")));
        }
        let t = &cfg.targets;
        if let Some(float) = &cfg.float {
            if [&t.messenger, &t.bubble, &t.text].contains(&float) {
                return Err(GlideError::config(format!(
                    "messenger '{name}' must float a separate wrapper, not '{float}'"
                )));
            }
        }
        Ok(Self {
            name,
            cfg: cfg.clone(),
            director: Director::new(),
            done: false,
        })
    }

    pub fn is_touring(&self) -> bool {
        self.director.foreground().is_active()
    }

    pub fn is_floating(&self) -> bool {
        self.director.lane(FLOAT_LANE).is_some_and(|p| p.is_active())
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Behavior for Messenger {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        let t = &self.cfg.targets;
        let mut targets = vec![t.messenger.clone(), t.bubble.clone(), t.text.clone()];
        targets.extend(self.cfg.float.clone());
        targets
    }

    fn on_mount(&mut self, _env: &SceneEnv<'_>, _notices: &mut Vec<NoticeKind>) -> GlideResult<()> {
        let tour = messenger_tour(&self.cfg.targets, &self.cfg.messages, &self.cfg.tour);
        self.director.play(&tour)?;
        if let Some(float) = &self.cfg.float {
            let bob = hover_float(float, self.cfg.float_amplitude, self.cfg.float_half_period);
            self.director.play_parallel(FLOAT_LANE, &bob)?;
        }
        self.done = false;
        Ok(())
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        for event in self.director.advance(env.tick.dt, env.stage, out) {
            if matches!(&event, SequenceEvent::Cue(name) if name == TOUR_DONE_CUE) {
                tracing::debug!(behavior = %self.name, "messenger tour finished");
                self.director.interrupt_lane(FLOAT_LANE);
                self.done = true;
            }
            notices.push(event.into());
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/messenger.rs"]
mod tests;
