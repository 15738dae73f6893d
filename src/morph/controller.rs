//! Dot ↔ card morph for a single floating element.
//!
//! The controller owns the element's shape animation and its content payload. Content is bound
//! only while the element is fully collapsed and cleared only once it is collapsed again, so a
//! partially visible card never shows mismatched content.

use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::animation::property::{Property, TargetId};
use crate::animation::stage::FrameWrites;
use crate::foundation::core::{clamp01, sanitize_dt};
use crate::foundation::error::{GlideError, GlideResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum MorphState {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphShape {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl MorphShape {
    pub const DOT: Self = Self {
        width: 20.0,
        height: 20.0,
        radius: 10.0,
        opacity: 0.0,
    };

    pub const CARD: Self = Self {
        width: 400.0,
        height: 500.0,
        radius: 12.0,
        opacity: 1.0,
    };

    pub fn write(&self, target: &TargetId, out: &mut FrameWrites) {
        out.set(target, Property::Width, self.width);
        out.set(target, Property::Height, self.height);
        out.set(target, Property::BorderRadius, self.radius);
        out.set(target, Property::Opacity, self.opacity);
    }
}

impl Lerp for MorphShape {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            width: f64::lerp(&a.width, &b.width, t),
            height: f64::lerp(&a.height, &b.height, t),
            radius: f64::lerp(&a.radius, &b.radius, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
        }
    }

    fn distance(a: &Self, b: &Self) -> f64 {
        [
            a.width - b.width,
            a.height - b.height,
            a.radius - b.radius,
            a.opacity - b.opacity,
        ]
        .into_iter()
        .fold(0.0, |m, d| m.max(d.abs()))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    pub collapsed: MorphShape,
    pub expanded: MorphShape,
    pub expand_secs: f64,
    pub expand_ease: Ease,
    pub collapse_secs: f64,
    pub collapse_ease: Ease,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            collapsed: MorphShape::DOT,
            expanded: MorphShape::CARD,
            expand_secs: 0.6,
            expand_ease: Ease::Power3Out,
            collapse_secs: 0.4,
            collapse_ease: Ease::Power2In,
        }
    }
}

impl MorphConfig {
    pub fn validate(&self) -> GlideResult<()> {
        for (name, v) in [("expand_secs", self.expand_secs), ("collapse_secs", self.collapse_secs)] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(GlideError::config(format!(
                    "morph {name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum MorphEvent<P> {
    StateChanged { from: MorphState, to: MorphState },
    ContentBound { row: TargetId, payload: P },
    ContentCleared,
}

#[derive(Clone, Debug)]
pub struct ShapeMorphController<P> {
    config: MorphConfig,
    state: MorphState,
    shape: MorphShape,
    from: MorphShape,
    elapsed: f64,
    in_section: bool,
    active: Option<(TargetId, P)>,
    pending: Option<(TargetId, P)>,
    events: Vec<MorphEvent<P>>,
}

impl<P: Clone> ShapeMorphController<P> {
    pub fn new(config: MorphConfig) -> GlideResult<Self> {
        config.validate()?;
        let shape = config.collapsed;
        Ok(Self {
            config,
            state: MorphState::Collapsed,
            shape,
            from: shape,
            elapsed: 0.0,
            in_section: false,
            active: None,
            pending: None,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn shape(&self) -> MorphShape {
        self.shape
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn active_row(&self) -> Option<&TargetId> {
        self.active.as_ref().map(|(row, _)| row)
    }

    pub fn payload(&self) -> Option<&P> {
        self.active.as_ref().map(|(_, p)| p)
    }

    pub fn pending_row(&self) -> Option<&TargetId> {
        self.pending.as_ref().map(|(row, _)| row)
    }

    pub fn in_section(&self) -> bool {
        self.in_section
    }

    /// Leaving the owning section forces a collapse.
    pub fn set_in_section(&mut self, inside: bool) {
        if self.in_section == inside {
            return;
        }
        self.in_section = inside;
        if !inside {
            self.force_collapse();
        }
    }

    /// Bind content for the next expansion. Only allowed while fully collapsed.
    pub fn bind_payload(&mut self, row: TargetId, payload: P) -> GlideResult<()> {
        if self.state != MorphState::Collapsed {
            return Err(GlideError::contract(format!(
                "payload can only be bound while collapsed (state: {:?})",
                self.state
            )));
        }
        self.events.push(MorphEvent::ContentBound {
            row: row.clone(),
            payload: payload.clone(),
        });
        self.active = Some((row, payload));
        Ok(())
    }

    /// Returns `false` when the hover is ignored (pointer outside the owning section).
    pub fn hover_enter(&mut self, row: TargetId, payload: P) -> bool {
        if !self.in_section {
            return false;
        }
        let same_row = self.active_row() == Some(&row);
        match self.state {
            MorphState::Collapsed => {
                self.pending = None;
                if self.bind_payload(row, payload).is_ok() {
                    self.transition(MorphState::Expanding);
                }
            }
            MorphState::Expanding | MorphState::Expanded if same_row => {
                self.pending = None;
            }
            MorphState::Collapsing if same_row && self.pending.is_none() => {
                self.transition(MorphState::Expanding);
            }
            MorphState::Expanding | MorphState::Expanded | MorphState::Collapsing => {
                tracing::trace!(row = %row, "queueing row until the card collapses");
                self.pending = Some((row, payload));
                if self.state != MorphState::Collapsing {
                    self.transition(MorphState::Collapsing);
                }
            }
        }
        true
    }

    pub fn hover_leave(&mut self, row: &TargetId) {
        if self.pending_row() == Some(row) {
            self.pending = None;
        }
        if self.active_row() == Some(row)
            && matches!(self.state, MorphState::Expanding | MorphState::Expanded)
        {
            self.transition(MorphState::Collapsing);
        }
    }

    /// Collapse now, dropping any queued expansion.
    pub fn force_collapse(&mut self) {
        self.pending = None;
        if matches!(self.state, MorphState::Expanding | MorphState::Expanded) {
            self.transition(MorphState::Collapsing);
        }
    }

    pub fn tick(&mut self, dt: f64) -> Vec<MorphEvent<P>> {
        let (to, secs, ease) = match self.state {
            MorphState::Expanding => (self.config.expanded, self.config.expand_secs, self.config.expand_ease),
            MorphState::Collapsing => (
                self.config.collapsed,
                self.config.collapse_secs,
                self.config.collapse_ease,
            ),
            MorphState::Collapsed | MorphState::Expanded => return std::mem::take(&mut self.events),
        };

        self.elapsed += sanitize_dt(dt);
        let p = if secs <= 0.0 { 1.0 } else { clamp01(self.elapsed / secs) };
        self.shape = MorphShape::lerp(&self.from, &to, ease.apply(p));

        if p >= 1.0 {
            self.shape = to;
            if self.state == MorphState::Expanding {
                self.transition(MorphState::Expanded);
            } else {
                self.transition(MorphState::Collapsed);
                self.active = None;
                self.events.push(MorphEvent::ContentCleared);
                if let Some((row, payload)) = self.pending.take() {
                    if self.bind_payload(row, payload).is_ok() {
                        self.transition(MorphState::Expanding);
                    }
                }
            }
        }
        std::mem::take(&mut self.events)
    }

    pub fn write(&self, target: &TargetId, out: &mut FrameWrites) {
        self.shape.write(target, out);
    }

    fn transition(&mut self, to: MorphState) {
        let from = self.state;
        if from == to {
            return;
        }
        tracing::debug!(?from, ?to, "morph transition");
        self.state = to;
        self.from = self.shape;
        self.elapsed = 0.0;
        self.events.push(MorphEvent::StateChanged { from, to });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/controller.rs"]
mod tests;
