//! Current visual state and the per-frame write buffer.
//!
//! Components never write to a surface directly: they fill a [`FrameWrites`] buffer during the
//! tick (last writer wins per target property), and the orchestrator commits it to the
//! [`Stage`] and the host surface once per frame.

use std::collections::BTreeMap;

use crate::animation::property::{AnimatedTarget, Property, TargetId};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameWrites {
    props: BTreeMap<TargetId, BTreeMap<Property, f64>>,
    texts: BTreeMap<TargetId, String>,
}

impl FrameWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, target: &TargetId, prop: Property, value: f64) {
        if !value.is_finite() {
            tracing::warn!(id = %target, ?prop, value, "dropping non-finite property write");
            return;
        }
        self.props
            .entry(target.clone())
            .or_default()
            .insert(prop, value);
    }

    pub fn set_text(&mut self, target: &TargetId, text: impl Into<String>) {
        self.texts.insert(target.clone(), text.into());
    }

    pub fn get(&self, target: &TargetId, prop: Property) -> Option<f64> {
        self.props.get(target).and_then(|m| m.get(&prop)).copied()
    }

    pub fn text(&self, target: &TargetId) -> Option<&str> {
        self.texts.get(target).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.texts.is_empty()
    }

    pub fn props(&self) -> impl Iterator<Item = (&TargetId, Property, f64)> + '_ {
        self.props
            .iter()
            .flat_map(|(t, m)| m.iter().map(move |(p, v)| (t, *p, *v)))
    }

    pub fn texts(&self) -> impl Iterator<Item = (&TargetId, &str)> + '_ {
        self.texts.iter().map(|(t, s)| (t, s.as_str()))
    }

    /// Keep only writes to targets accepted by `keep`.
    pub fn retain_targets(&mut self, mut keep: impl FnMut(&TargetId) -> bool) {
        self.props.retain(|t, _| keep(t));
        self.texts.retain(|t, _| keep(t));
    }

    /// Apply `later` on top of `self`; `later` wins on conflicts.
    pub fn merge(&mut self, later: FrameWrites) {
        for (t, m) in later.props {
            self.props.entry(t).or_default().extend(m);
        }
        self.texts.extend(later.texts);
    }

    pub fn clear(&mut self) {
        self.props.clear();
        self.texts.clear();
    }
}

/// Last committed value of every written target property.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Stage {
    targets: BTreeMap<TargetId, AnimatedTarget>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self, id: &TargetId) -> Option<&AnimatedTarget> {
        self.targets.get(id)
    }

    /// Committed value, or the property's rest value when never written.
    pub fn value(&self, id: &TargetId, prop: Property) -> f64 {
        self.targets
            .get(id)
            .map(|t| t.props.get_or_rest(prop))
            .unwrap_or_else(|| prop.rest_value())
    }

    /// Value as of this frame: pending writes first, then committed state.
    pub fn value_with(&self, pending: &FrameWrites, id: &TargetId, prop: Property) -> f64 {
        pending
            .get(id, prop)
            .unwrap_or_else(|| self.value(id, prop))
    }

    pub fn text(&self, id: &TargetId) -> Option<&str> {
        self.targets.get(id).and_then(|t| t.text.as_deref())
    }

    pub fn commit(&mut self, writes: &FrameWrites) {
        for (t, p, v) in writes.props() {
            self.targets.entry(t.clone()).or_default().props.set(p, v);
        }
        for (t, s) in writes.texts() {
            self.targets.entry(t.clone()).or_default().text = Some(s.to_owned());
        }
    }

    pub fn forget(&mut self, id: &TargetId) {
        self.targets.remove(id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stage.rs"]
mod tests;
