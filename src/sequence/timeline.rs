//! Append-only step lists and their resolved schedules.

use std::collections::BTreeSet;

use crate::animation::property::{PropertyMap, TargetId};
use crate::foundation::error::{GlideError, GlideResult};
use crate::sequence::step::{Cue, Placement, Step, StepAction, Tween};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    #[default]
    Never,
    Finite(u32),
    Infinite,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Repeat {
    /// Extra passes after the first one.
    #[serde(default)]
    pub count: RepeatCount,
    /// Alternate direction on every other pass.
    #[serde(default)]
    pub yoyo: bool,
}

impl Repeat {
    pub fn extra_passes(self) -> Option<u64> {
        match self.count {
            RepeatCount::Never => Some(0),
            RepeatCount::Finite(n) => Some(u64::from(n)),
            RepeatCount::Infinite => None,
        }
    }
}

/// Ordered, append-only list of steps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn push(&mut self, action: StepAction, placement: Placement) {
        self.steps.push(Step { action, placement });
    }

    pub fn then(mut self, tween: Tween) -> Self {
        self.push(StepAction::Tween(tween), Placement::AfterPrevious);
        self
    }

    pub fn at(mut self, tween: Tween, time: f64) -> Self {
        self.push(StepAction::Tween(tween), Placement::At(time));
        self
    }

    pub fn offset(mut self, tween: Tween, offset: f64) -> Self {
        self.push(StepAction::Tween(tween), Placement::Offset(offset));
        self
    }

    pub fn with_previous(mut self, tween: Tween) -> Self {
        self.push(StepAction::Tween(tween), Placement::WithPrevious);
        self
    }

    pub fn set<T: Into<TargetId>>(
        mut self,
        targets: impl IntoIterator<Item = T>,
        values: PropertyMap,
        placement: Placement,
    ) -> Self {
        let targets = targets.into_iter().map(Into::into).collect();
        self.push(StepAction::Set { targets, values }, placement);
        self
    }

    pub fn call(mut self, cue: Cue, placement: Placement) -> Self {
        self.push(StepAction::Call(cue), placement);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every target any step writes to.
    pub fn footprint(&self) -> BTreeSet<TargetId> {
        self.steps
            .iter()
            .flat_map(|s| s.action.targets())
            .cloned()
            .collect()
    }

    /// Resolve placements into absolute start times.
    pub fn compile(&self) -> GlideResult<Schedule> {
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(GlideError::sequence(format!(
                "sequence delay must be finite and non-negative, got {}",
                self.delay
            )));
        }

        let mut entries = Vec::with_capacity(self.steps.len());
        let mut end = 0.0f64;
        let mut prev_start = 0.0f64;

        for (i, step) in self.steps.iter().enumerate() {
            validate_action(i, &step.action)?;
            let start = match step.placement {
                Placement::AfterPrevious => end,
                Placement::WithPrevious => prev_start,
                Placement::At(t) => finite(i, "at", t)?.max(0.0),
                Placement::Offset(d) => (end + finite(i, "offset", d)?).max(0.0),
            };
            end = end.max(start + step.action.span());
            prev_start = start;
            entries.push(ScheduledStep {
                action: step.action.clone(),
                start,
            });
        }

        Ok(Schedule {
            entries,
            duration: end,
            delay: self.delay,
            repeat: self.repeat,
        })
    }
}

fn finite(index: usize, what: &str, v: f64) -> GlideResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GlideError::sequence(format!(
            "step {index}: `{what}` placement must be finite, got {v}"
        )))
    }
}

fn validate_action(index: usize, action: &StepAction) -> GlideResult<()> {
    match action {
        StepAction::Tween(t) => {
            if t.targets.is_empty() {
                return Err(GlideError::sequence(format!("step {index}: tween has no targets")));
            }
            if !(t.duration.is_finite() && t.duration >= 0.0) {
                return Err(GlideError::sequence(format!(
                    "step {index}: duration must be finite and non-negative, got {}",
                    t.duration
                )));
            }
            if !(t.stagger.is_finite() && t.stagger >= 0.0) {
                return Err(GlideError::sequence(format!(
                    "step {index}: stagger must be finite and non-negative, got {}",
                    t.stagger
                )));
            }
        }
        StepAction::Set { targets, .. } if targets.is_empty() => {
            return Err(GlideError::sequence(format!("step {index}: set has no targets")));
        }
        _ => {}
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStep {
    pub action: StepAction,
    /// Seconds from the start of a pass (after `delay`).
    pub start: f64,
}

/// A compiled sequence: steps in declared order with absolute starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    pub entries: Vec<ScheduledStep>,
    /// Length of one pass.
    pub duration: f64,
    pub delay: f64,
    pub repeat: Repeat,
}

impl Schedule {
    /// Total playing time including delay and repeats; `None` when repeating forever.
    pub fn total_duration(&self) -> Option<f64> {
        self.repeat
            .extra_passes()
            .map(|extra| self.delay + self.duration * (extra + 1) as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/timeline.rs"]
mod tests;
