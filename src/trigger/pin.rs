//! Pinned scrub: hold an element in place while extra scroll is absorbed.
//!
//! A pinned section stays fixed on screen for `D` pixels of scroll, where
//! `D = content - viewport + padding` (zero when the content already fits). Progress through
//! that distance maps linearly onto a `[0, -D]` translation of the pinned content strip.

use crate::foundation::core::clamp01;
use crate::foundation::error::{GlideError, GlideResult};
use crate::trigger::scrub::ScrubSmoother;
use crate::trigger::window::TriggerWindow;

/// Extra scroll added past the strip's end so the last card settles fully in view.
pub const PIN_PADDING: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinLayout {
    pub content_extent: f64,
    pub viewport_extent: f64,
    pub padding: f64,
}

impl PinLayout {
    pub fn new(content_extent: f64, viewport_extent: f64, padding: f64) -> GlideResult<Self> {
        for (name, v) in [
            ("content extent", content_extent),
            ("viewport extent", viewport_extent),
            ("padding", padding),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GlideError::contract(format!(
                    "pin {name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(Self {
            content_extent,
            viewport_extent,
            padding,
        })
    }

    /// Scroll distance absorbed while pinned.
    pub fn distance(&self) -> f64 {
        if self.content_extent <= self.viewport_extent {
            return 0.0;
        }
        self.content_extent - self.viewport_extent + self.padding
    }

    /// Strip translation at `progress`: exactly `-progress * D`.
    pub fn offset_at(&self, progress: f64) -> f64 {
        -clamp01(progress) * self.distance()
    }
}

/// Start offset, distance and window, always replaced together.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinMapping {
    pub start: f64,
    pub layout: PinLayout,
    pub window: Option<TriggerWindow>,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct PinFrame {
    pub pinned: bool,
    /// Counter-translation that keeps the section fixed: `clamp(scroll - start, 0, D)`.
    pub hold: f64,
    pub progress: f64,
    /// Strip translation along the pinned axis.
    pub translate: f64,
    pub generation: u64,
}

#[derive(Clone, Debug)]
pub struct PinnedScrub {
    mapping: Option<PinMapping>,
    smoother: ScrubSmoother,
    generation: u64,
}

impl PinnedScrub {
    pub fn new(lag: f64) -> Self {
        Self {
            mapping: None,
            smoother: ScrubSmoother::new(lag),
            generation: 0,
        }
    }

    pub fn mapping(&self) -> Option<&PinMapping> {
        self.mapping.as_ref()
    }

    /// Install a new mapping for `start` (section top in document space) and `layout`.
    pub fn recompute(&mut self, start: f64, layout: PinLayout) -> GlideResult<()> {
        let d = layout.distance();
        let window = if d > 0.0 {
            Some(TriggerWindow::new(start, start + d)?)
        } else {
            None
        };
        self.generation += 1;
        self.mapping = Some(PinMapping {
            start,
            layout,
            window,
            generation: self.generation,
        });
        self.smoother.reset();
        tracing::debug!(start, distance = d, generation = self.generation, "pin mapping recomputed");
        Ok(())
    }

    /// Forget geometry (section unmounted).
    pub fn invalidate(&mut self) {
        self.mapping = None;
        self.smoother.reset();
        self.generation += 1;
    }

    pub fn evaluate(&mut self, scroll: f64, dt: f64) -> PinFrame {
        let Some(m) = self.mapping else {
            return PinFrame {
                generation: self.generation,
                ..PinFrame::default()
            };
        };
        let Some(window) = m.window else {
            // Content fits: behaves as a normal in-flow block.
            return PinFrame {
                generation: m.generation,
                ..PinFrame::default()
            };
        };
        let d = window.length();
        let raw = window.progress(scroll);
        let progress = self.smoother.follow(raw, dt);
        PinFrame {
            pinned: window.contains(scroll),
            hold: (scroll - m.start).clamp(0.0, d),
            progress,
            translate: m.layout.offset_at(progress),
            generation: m.generation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/pin.rs"]
mod tests;
