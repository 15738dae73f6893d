//! Scroll-linked reveal of rows (or the words of one block).
//!
//! In scrub mode progress is mapped straight onto the `from → to` interpolation, so scrolling
//! back reverses it. In once mode the first entry plays the reveal as a timed tween and it
//! stays revealed for the rest of the mount.

use crate::animation::ease::Ease;
use crate::animation::property::{PropertyMap, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::core::clamp01;
use crate::foundation::error::{GlideError, GlideResult};
use crate::scene::behaviors::{Behavior, NoticeKind, SceneEnv, push_sequence_events};
use crate::scene::listeners::ListenerKind;
use crate::sequence::player::SequencePlayer;
use crate::sequence::step::Tween;
use crate::sequence::timeline::Sequence;
use crate::trigger::viewport::{TriggerSpec, TriggerState, ViewportTrigger};
use crate::trigger::window::TriggerMode;

/// Scrub catch-up used by the row reveals.
pub const REVEAL_LAG_SECS: f64 = 1.0;
pub const REVEAL_RISE: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRevealConfig {
    pub targets: Vec<TargetId>,
    /// Share one trigger on this element and stagger `targets` through it.
    #[serde(default)]
    pub group: Option<TargetId>,
    #[serde(default = "default_trigger")]
    pub trigger: TriggerSpec,
    #[serde(default = "default_from")]
    pub from: PropertyMap,
    #[serde(default = "default_to")]
    pub to: PropertyMap,
    #[serde(default = "default_ease")]
    pub ease: Ease,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub stagger: f64,
}

fn default_trigger() -> TriggerSpec {
    TriggerSpec {
        lag: REVEAL_LAG_SECS,
        ..TriggerSpec::default()
    }
}

fn default_from() -> PropertyMap {
    use crate::animation::property::Property;
    PropertyMap::new()
        .with(Property::Y, REVEAL_RISE)
        .with(Property::Opacity, 0.0)
}

fn default_to() -> PropertyMap {
    use crate::animation::property::Property;
    PropertyMap::new()
        .with(Property::Y, 0.0)
        .with(Property::Opacity, 1.0)
}

fn default_ease() -> Ease {
    Ease::Power3Out
}

fn default_duration() -> f64 {
    1.0
}

#[derive(Debug)]
struct Unit {
    anchor: TargetId,
    members: Vec<TargetId>,
    trigger: ViewportTrigger,
    state: TriggerState,
    last: Option<f64>,
    player: SequencePlayer,
}

#[derive(Debug)]
pub struct ScrollReveal {
    name: String,
    cfg: ScrollRevealConfig,
    units: Vec<Unit>,
    primed: bool,
}

impl ScrollReveal {
    pub fn new(name: impl Into<String>, cfg: &ScrollRevealConfig) -> GlideResult<Self> {
        if cfg.targets.is_empty() {
            return Err(GlideError::config("scroll reveal needs at least one target"));
        }
        if !(cfg.duration.is_finite() && cfg.duration > 0.0) {
            return Err(GlideError::config(format!(
                "scroll reveal duration must be positive, got {}",
                cfg.duration
            )));
        }
        if !(cfg.stagger.is_finite() && cfg.stagger >= 0.0) {
            return Err(GlideError::config(format!(
                "scroll reveal stagger must be non-negative, got {}",
                cfg.stagger
            )));
        }

        let unit = |anchor: &TargetId, members: Vec<TargetId>| -> GlideResult<Unit> {
            Ok(Unit {
                anchor: anchor.clone(),
                members,
                trigger: ViewportTrigger::new(cfg.trigger)?,
                state: TriggerState::default(),
                last: None,
                player: SequencePlayer::new(),
            })
        };
        let units = match &cfg.group {
            Some(group) => vec![unit(group, cfg.targets.clone())?],
            None => cfg
                .targets
                .iter()
                .map(|t| unit(t, vec![t.clone()]))
                .collect::<GlideResult<Vec<_>>>()?,
        };
        Ok(Self {
            name: name.into(),
            cfg: cfg.clone(),
            units,
            primed: false,
        })
    }

    /// Smoothed progress of each trigger, in target (or group) order.
    pub fn progress(&self) -> Vec<f64> {
        self.units.iter().map(|u| u.state.progress).collect()
    }

    fn write_scrub(&self, members: &[TargetId], p: f64, out: &mut FrameWrites) {
        let total = self.cfg.duration + self.cfg.stagger * members.len().saturating_sub(1) as f64;
        let t = p * total;
        for (i, m) in members.iter().enumerate() {
            let local = clamp01((t - i as f64 * self.cfg.stagger) / self.cfg.duration);
            let e = self.cfg.ease.apply(local);
            for (prop, to) in self.cfg.to.iter() {
                let from = self.cfg.from.get_or_rest(prop);
                out.set(m, prop, from + (to - from) * e);
            }
        }
    }
}

impl Behavior for ScrollReveal {
    fn name(&self) -> &str {
        &self.name
    }

    fn listens(&self) -> &'static [ListenerKind] {
        &[ListenerKind::Scroll, ListenerKind::Resize, ListenerKind::FrameTick]
    }

    fn targets(&self) -> Vec<TargetId> {
        let mut t = self.cfg.targets.clone();
        t.extend(self.cfg.group.clone());
        t
    }

    fn on_layout(&mut self, env: &SceneEnv<'_>) -> GlideResult<()> {
        // Every unit is relaid even when one fails, so none keeps a stale window.
        let mut first_err = None;
        for u in &mut self.units {
            if let Err(err) = u.trigger.layout(env.rect(&u.anchor), env.viewport) {
                first_err.get_or_insert(err);
            }
            u.last = None;
        }
        first_err.map_or(Ok(()), Err)
    }

    fn update_triggers(&mut self, env: &SceneEnv<'_>) {
        for u in &mut self.units {
            u.state = u.trigger.evaluate(env.scroll, env.tick.dt);
        }
    }

    fn tick(&mut self, env: &SceneEnv<'_>, out: &mut FrameWrites, notices: &mut Vec<NoticeKind>) {
        if !self.primed {
            for t in &self.cfg.targets {
                for (prop, v) in self.cfg.from.iter() {
                    out.set(t, prop, v);
                }
            }
            self.primed = true;
        }

        let once = matches!(self.cfg.trigger.mode, TriggerMode::Once { .. });
        let mut units = std::mem::take(&mut self.units);
        for u in &mut units {
            if u.trigger.window().is_none() {
                continue;
            }
            if once {
                if u.state.just_entered {
                    notices.push(NoticeKind::Entered {
                        target: u.anchor.clone(),
                    });
                    let seq = Sequence::new().then(
                        Tween::from_to(
                            u.members.iter(),
                            self.cfg.from.clone(),
                            self.cfg.to.clone(),
                            self.cfg.duration,
                        )
                        .stagger(self.cfg.stagger)
                        .ease(self.cfg.ease),
                    );
                    if let Err(err) = u.player.play(&seq) {
                        tracing::warn!(behavior = %self.name, %err, "reveal sequence rejected");
                    }
                }
                push_sequence_events(u.player.advance(env.tick.dt, env.stage, out), notices);
            } else if u.last != Some(u.state.progress) {
                u.last = Some(u.state.progress);
                self.write_scrub(&u.members, u.state.progress, out);
            }
        }
        self.units = units;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/behaviors/scroll_reveal.rs"]
mod tests;
