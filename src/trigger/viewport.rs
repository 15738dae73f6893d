use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{GlideError, GlideResult};
use crate::trigger::scrub::ScrubSmoother;
use crate::trigger::window::{
    Anchor, Edge, EndAnchor, REVEAL_END, REVEAL_START, TriggerMode, TriggerWindow,
};

/// Anchors and mode of a trigger; geometry is supplied separately on every layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TriggerSpec {
    pub start: Anchor,
    pub end: EndAnchor,
    pub mode: TriggerMode,
    /// Scrub catch-up time in seconds; `0` binds progress directly.
    pub lag: f64,
}

impl Default for TriggerSpec {
    fn default() -> Self {
        Self {
            start: Anchor::new(Edge::Top, REVEAL_START),
            end: EndAnchor::At(Anchor::new(Edge::Top, REVEAL_END)),
            mode: TriggerMode::Scrub,
            lag: 0.0,
        }
    }
}

impl TriggerSpec {
    /// Reject anchors that cannot produce a forward window for any element geometry.
    ///
    /// Anchors on different edges depend on the element's height and are only checked at layout.
    pub fn validate(&self) -> GlideResult<()> {
        match self.end {
            EndAnchor::Distance(d) if !(d.is_finite() && d > 0.0) => {
                return Err(GlideError::config(format!(
                    "trigger end distance must be positive, got {d}"
                )));
            }
            EndAnchor::At(end) if end.edge == self.start.edge && end.viewport >= self.start.viewport => {
                return Err(GlideError::config(format!(
                    "trigger end anchor ({:?} at {}) does not come after its start ({:?} at {})",
                    end.edge, end.viewport, self.start.edge, self.start.viewport
                )));
            }
            _ => {}
        }
        if !self.start.viewport.is_finite() {
            return Err(GlideError::config("trigger start anchor must be finite"));
        }
        if !(self.lag.is_finite() && self.lag >= 0.0) {
            return Err(GlideError::config(format!(
                "trigger lag must be non-negative, got {}",
                self.lag
            )));
        }
        if let TriggerMode::Once { threshold } = self.mode {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(GlideError::config(format!(
                    "once threshold must be within [0, 1], got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TriggerState {
    /// Unsmoothed progress for the current scroll offset.
    pub raw: f64,
    /// Progress after scrub lag smoothing.
    pub progress: f64,
    /// `once` latch; always `false` in scrub mode.
    pub entered: bool,
    /// `true` only on the evaluation that flipped `entered`.
    pub just_entered: bool,
    /// Layout generation the progress was computed against.
    pub generation: u64,
}

/// Progress of one element's scroll-relative activation window.
#[derive(Clone, Debug)]
pub struct ViewportTrigger {
    spec: TriggerSpec,
    window: Option<TriggerWindow>,
    smoother: ScrubSmoother,
    entered: bool,
    generation: u64,
}

impl ViewportTrigger {
    pub fn new(spec: TriggerSpec) -> GlideResult<Self> {
        spec.validate()?;
        Ok(Self {
            smoother: ScrubSmoother::new(spec.lag),
            spec,
            window: None,
            entered: false,
            generation: 0,
        })
    }

    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    pub fn window(&self) -> Option<TriggerWindow> {
        self.window
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Recompute the window for new geometry. `None` element means not mounted yet.
    ///
    /// Any in-flight smoothing is dropped so the stale mapping can never leak into a frame. When
    /// the new geometry yields an inverted window the trigger is left without one (progress 0)
    /// until a later layout succeeds.
    pub fn layout(&mut self, element: Option<Rect>, viewport: Viewport) -> GlideResult<()> {
        let resolved = element
            .map(|el| TriggerWindow::from_anchors(el, viewport.height, self.spec.start, self.spec.end))
            .transpose();
        self.smoother.reset();
        self.generation += 1;
        match resolved {
            Ok(window) => {
                self.window = window;
                tracing::trace!(generation = self.generation, window = ?self.window, "trigger layout");
                Ok(())
            }
            Err(err) => {
                self.window = None;
                tracing::debug!(generation = self.generation, %err, "trigger window invalidated");
                Err(err)
            }
        }
    }

    pub fn evaluate(&mut self, scroll: f64, dt: f64) -> TriggerState {
        let Some(window) = self.window else {
            return TriggerState {
                entered: self.entered,
                generation: self.generation,
                ..TriggerState::default()
            };
        };
        let raw = window.progress(scroll);
        let progress = self.smoother.follow(raw, dt);

        let mut just_entered = false;
        if let TriggerMode::Once { threshold } = self.spec.mode {
            if !self.entered && raw > 0.0 && raw >= threshold {
                self.entered = true;
                just_entered = true;
            }
        }

        TriggerState {
            raw,
            progress,
            entered: self.entered,
            just_entered,
            generation: self.generation,
        }
    }

    pub fn entered(&self) -> bool {
        self.entered
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/viewport.rs"]
mod tests;
