//! Hero entrance, played once per mount.

use crate::animation::property::TargetId;
use crate::animation::stage::FrameWrites;
use crate::foundation::error::GlideResult;
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv, push_sequence_events};
use crate::scene::listeners::ListenerKind;
use crate::sequence::director::Director;
use crate::sequence::templates::{IntroTargets, intro_reveal};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroConfig {
    #[serde(flatten)]
    pub targets: IntroTargets,
}

#[derive(Debug)]
pub struct Intro {
    name: String,
    targets: IntroTargets,
    director: Director,
}

impl Intro {
    pub fn new(name: impl Into<String>, cfg: &IntroConfig) -> GlideResult<Self> {
        Ok(Self {
            name: name.into(),
            targets: cfg.targets.clone(),
            director: Director::new(),
        })
    }

    pub fn is_playing(&self) -> bool {
        self.director.is_active()
    }
}

impl Behavior for Intro {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        self.targets.all().cloned().collect()
    }

    fn on_mount(&mut self, _env: &SceneEnv<'_>, _notices: &mut Vec<NoticeKind>) -> GlideResult<()> {
        tracing::debug!(behavior = %self.name, "intro started");
        self.director.play(&intro_reveal(&self.targets))
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        push_sequence_events(self.director.advance(env.tick.dt, env.stage, out), notices);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/intro.rs"]
mod tests;
