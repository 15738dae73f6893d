//! The host rendering surface seen from the animation core.

use std::collections::{BTreeMap, BTreeSet};

use crate::animation::property::{Property, TargetId};
use crate::foundation::core::FrameIndex;

/// Whatever actually displays the targets (DOM, canvas, native views).
///
/// The orchestrator only ever calls the write methods from its single per-frame flush.
pub trait Surface {
    fn is_mounted(&self, target: &TargetId) -> bool;

    fn write_property(&mut self, target: &TargetId, prop: Property, value: f64);

    fn write_text(&mut self, target: &TargetId, text: &str);

    /// Called once before the writes of each frame.
    fn begin_frame(&mut self, _frame: FrameIndex, _time: f64) {}
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyWrite {
    pub target: TargetId,
    pub prop: Property,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextWrite {
    pub target: TargetId,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRecord {
    pub frame: FrameIndex,
    pub time: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropertyWrite>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<TextWrite>,
}

/// In-memory surface that records every write, for tests and offline simulation.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    mounted: BTreeSet<TargetId>,
    frames: Vec<FrameRecord>,
    latest: BTreeMap<(TargetId, Property), f64>,
    texts: BTreeMap<TargetId, String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounted<T: Into<TargetId>>(targets: impl IntoIterator<Item = T>) -> Self {
        Self {
            mounted: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn mount(&mut self, target: impl Into<TargetId>) {
        self.mounted.insert(target.into());
    }

    pub fn unmount(&mut self, target: &TargetId) {
        self.mounted.remove(target);
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<FrameRecord> {
        self.frames
    }

    /// Most recent value written to `target.prop`, across all frames.
    pub fn latest(&self, target: &TargetId, prop: Property) -> Option<f64> {
        self.latest.get(&(target.clone(), prop)).copied()
    }

    pub fn text(&self, target: &TargetId) -> Option<&str> {
        self.texts.get(target).map(String::as_str)
    }

    /// Total number of property writes recorded.
    pub fn write_count(&self) -> usize {
        self.frames.iter().map(|f| f.props.len()).sum()
    }

    fn current(&mut self) -> &mut FrameRecord {
        if self.frames.is_empty() {
            self.frames.push(FrameRecord {
                frame: FrameIndex(0),
                time: 0.0,
                props: Vec::new(),
                texts: Vec::new(),
            });
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

impl Surface for RecordingSurface {
    fn is_mounted(&self, target: &TargetId) -> bool {
        self.mounted.contains(target)
    }

    fn write_property(&mut self, target: &TargetId, prop: Property, value: f64) {
        self.latest.insert((target.clone(), prop), value);
        self.current().props.push(PropertyWrite {
            target: target.clone(),
            prop,
            value,
        });
    }

    fn write_text(&mut self, target: &TargetId, text: &str) {
        self.texts.insert(target.clone(), text.to_owned());
        self.current().texts.push(TextWrite {
            target: target.clone(),
            text: text.to_owned(),
        });
    }

    fn begin_frame(&mut self, frame: FrameIndex, time: f64) {
        self.frames.push(FrameRecord {
            frame,
            time,
            props: Vec::new(),
            texts: Vec::new(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/surface.rs"]
mod tests;
