use crate::animation::property::{Property, TargetId};
use crate::animation::stage::{FrameWrites, Stage};
use crate::foundation::core::{clamp01, sanitize_dt};
use crate::foundation::error::GlideResult;
use crate::sequence::step::{Cue, StepAction, Tween};
use crate::sequence::timeline::{Schedule, Sequence};

/// More skipped passes than this are not rendered individually.
const MAX_CATCH_UP_PASSES: u64 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Interrupted,
    Finished,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum SequenceEvent {
    Cue(String),
    TextSwapped { target: TargetId, text: String },
    Finished,
}

/// Per-target tween state captured when the target's tween first starts.
#[derive(Clone, Debug)]
struct Track {
    channels: Vec<(Property, f64, f64)>,
    last_p: Option<f64>,
}

#[derive(Clone, Debug, Default)]
struct StepState {
    tracks: Vec<Option<Track>>,
    fired_pass: Option<u64>,
}

/// Plays one [`Sequence`] against the stage, one `advance` per frame.
///
/// Steps are rendered in declared order every frame, so a later step's write to the same
/// property wins. Nothing is written for a step before its scheduled start.
#[derive(Clone, Debug, Default)]
pub struct SequencePlayer {
    schedule: Option<Schedule>,
    steps: Vec<StepState>,
    state: PlayState,
    elapsed: f64,
    pass: u64,
}

impl SequencePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Start `sequence` from the targets' current values, interrupting any active playback.
    pub fn play(&mut self, sequence: &Sequence) -> GlideResult<()> {
        let schedule = sequence.compile()?;
        self.interrupt();
        self.steps = schedule
            .entries
            .iter()
            .map(|e| StepState {
                tracks: match &e.action {
                    StepAction::Tween(t) => vec![None; t.targets.len()],
                    _ => Vec::new(),
                },
                fired_pass: None,
            })
            .collect();
        tracing::debug!(
            steps = schedule.entries.len(),
            duration = schedule.duration,
            "sequence play"
        );
        self.schedule = Some(schedule);
        self.elapsed = 0.0;
        self.pass = 0;
        self.state = PlayState::Playing;
        Ok(())
    }

    /// Halt all steps. Targets keep whatever value they were last written.
    pub fn interrupt(&mut self) {
        if self.state == PlayState::Playing {
            tracing::debug!(elapsed = self.elapsed, "sequence interrupted");
            self.state = PlayState::Interrupted;
        }
    }

    pub fn advance(&mut self, dt: f64, stage: &Stage, out: &mut FrameWrites) -> Vec<SequenceEvent> {
        let mut events = Vec::new();
        if self.state != PlayState::Playing {
            return events;
        }
        let Some(schedule) = self.schedule.as_ref() else {
            return events;
        };

        self.elapsed += sanitize_dt(dt);
        let local = self.elapsed - schedule.delay;
        if local < 0.0 {
            return events;
        }

        let d = schedule.duration;
        let yoyo = schedule.repeat.yoyo;
        let (pass, t, finished) = if d <= 0.0 {
            (0, 0.0, true)
        } else {
            let raw_pass = (local / d).floor() as u64;
            match schedule.repeat.extra_passes() {
                Some(extra) if raw_pass > extra => (extra, d, true),
                _ => (raw_pass, local - raw_pass as f64 * d, false),
            }
        };

        if pass > self.pass + MAX_CATCH_UP_PASSES {
            self.pass = pass - 1;
        }
        while self.pass < pass {
            let end = if yoyo && self.pass % 2 == 1 { 0.0 } else { d };
            render(schedule, &mut self.steps, end, self.pass, yoyo && self.pass % 2 == 1, stage, out, &mut events);
            self.pass += 1;
        }

        let reversed = yoyo && pass % 2 == 1;
        let t = if reversed { d - t } else { t };
        render(schedule, &mut self.steps, t, pass, reversed, stage, out, &mut events);

        if finished {
            self.state = PlayState::Finished;
            events.push(SequenceEvent::Finished);
            tracing::debug!(elapsed = self.elapsed, "sequence finished");
        }
        events
    }
}

#[allow(clippy::too_many_arguments)]
fn render(
    schedule: &Schedule,
    steps: &mut [StepState],
    t: f64,
    pass: u64,
    reversed: bool,
    stage: &Stage,
    out: &mut FrameWrites,
    events: &mut Vec<SequenceEvent>,
) {
    for (entry, state) in schedule.entries.iter().zip(steps.iter_mut()) {
        match &entry.action {
            StepAction::Tween(tween) => {
                render_tween(tween, entry.start, state, t, stage, out);
            }
            StepAction::Set { targets, values } => {
                if !due(state, entry.start, t, pass, reversed) {
                    continue;
                }
                for target in targets {
                    for (p, v) in values.iter() {
                        out.set(target, p, v);
                    }
                }
            }
            StepAction::Call(cue) => {
                if !due(state, entry.start, t, pass, reversed) {
                    continue;
                }
                match cue {
                    Cue::SwapText { target, text } => {
                        out.set_text(target, text.clone());
                        events.push(SequenceEvent::TextSwapped {
                            target: target.clone(),
                            text: text.clone(),
                        });
                    }
                    Cue::Named(name) => events.push(SequenceEvent::Cue(name.clone())),
                }
            }
        }
    }
}

/// Instant steps fire once per pass, when the playhead crosses their start.
fn due(state: &mut StepState, start: f64, t: f64, pass: u64, reversed: bool) -> bool {
    if state.fired_pass == Some(pass) {
        return false;
    }
    let crossed = if reversed { t <= start } else { t >= start };
    if crossed {
        state.fired_pass = Some(pass);
    }
    crossed
}

fn render_tween(
    tween: &Tween,
    start: f64,
    state: &mut StepState,
    t: f64,
    stage: &Stage,
    out: &mut FrameWrites,
) {
    for (k, (target, slot)) in tween.targets.iter().zip(state.tracks.iter_mut()).enumerate() {
        let s = start + tween.target_offset(k);
        if slot.is_none() {
            if t < s {
                continue;
            }
            let channels = tween
                .to
                .iter()
                .map(|(&p, v)| {
                    let from = tween
                        .from
                        .as_ref()
                        .and_then(|f| f.get(p))
                        .unwrap_or_else(|| stage.value_with(out, target, p));
                    (p, from, v.resolve(from))
                })
                .collect();
            *slot = Some(Track {
                channels,
                last_p: None,
            });
        }
        let Some(track) = slot.as_mut() else {
            continue;
        };

        let p = if tween.duration <= 0.0 {
            if t >= s { 1.0 } else { 0.0 }
        } else {
            clamp01((t - s) / tween.duration)
        };
        if track.last_p == Some(p) {
            continue;
        }
        track.last_p = Some(p);

        let e = tween.ease.apply(p);
        for &(prop, from, to) in &track.channels {
            out.set(target, prop, from + (to - from) * e);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/player.rs"]
mod tests;
