use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::property::{Property, PropertyMap, TargetId};

/// Where a step starts relative to the steps declared before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// At the current end of the timeline.
    #[default]
    AfterPrevious,
    /// Absolute offset in seconds from sequence start.
    At(f64),
    /// Relative to the current end of the timeline; negative values overlap (`"-=0.5"`).
    Offset(f64),
    /// Same start as the previously declared step (`"<"`).
    WithPrevious,
}

/// End value of a tweened property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TweenValue {
    Abs(f64),
    /// Relative to the value captured when the tween starts (`"+=20"`).
    By { by: f64 },
}

impl TweenValue {
    pub fn resolve(self, from: f64) -> f64 {
        match self {
            Self::Abs(v) => v,
            Self::By { by } => from + by,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub targets: Vec<TargetId>,
    /// Explicit start values; missing properties start from the target's current value.
    #[serde(default)]
    pub from: Option<PropertyMap>,
    pub to: BTreeMap<Property, TweenValue>,
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Delay between consecutive targets' starts.
    #[serde(default)]
    pub stagger: f64,
}

impl Tween {
    pub fn to<T: Into<TargetId>>(
        targets: impl IntoIterator<Item = T>,
        end: PropertyMap,
        duration: f64,
    ) -> Self {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            from: None,
            to: end.iter().map(|(p, v)| (p, TweenValue::Abs(v))).collect(),
            duration,
            ease: Ease::Linear,
            stagger: 0.0,
        }
    }

    pub fn from_to<T: Into<TargetId>>(
        targets: impl IntoIterator<Item = T>,
        start: PropertyMap,
        end: PropertyMap,
        duration: f64,
    ) -> Self {
        let mut t = Self::to(targets, end, duration);
        t.from = Some(start);
        t
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn by(mut self, prop: Property, delta: f64) -> Self {
        self.to.insert(prop, TweenValue::By { by: delta });
        self
    }

    /// Start offset of the `index`-th target relative to the tween start.
    pub fn target_offset(&self, index: usize) -> f64 {
        self.stagger * index as f64
    }

    /// Time from the first target's start to the last target's end.
    pub fn span(&self) -> f64 {
        let n = self.targets.len().max(1);
        self.duration + self.target_offset(n - 1)
    }
}

/// Instant side effects scheduled on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Replace the text content of a target.
    SwapText { target: TargetId, text: String },
    /// Opaque marker reported back to the caller.
    Named(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Tween(Tween),
    /// Instant property writes.
    Set {
        targets: Vec<TargetId>,
        values: PropertyMap,
    },
    Call(Cue),
}

impl StepAction {
    pub fn span(&self) -> f64 {
        match self {
            Self::Tween(t) => t.span(),
            Self::Set { .. } | Self::Call(_) => 0.0,
        }
    }

    pub fn targets(&self) -> Vec<&TargetId> {
        match self {
            Self::Tween(t) => t.targets.iter().collect(),
            Self::Set { targets, .. } => targets.iter().collect(),
            Self::Call(Cue::SwapText { target, .. }) => vec![target],
            Self::Call(Cue::Named(_)) => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    pub action: StepAction,
    #[serde(default)]
    pub placement: Placement,
}
