use crate::foundation::core::{Rect, clamp01};
use crate::foundation::error::{GlideError, GlideResult};

/// Default reveal window: element top at 85% of the viewport height ...
pub const REVEAL_START: f64 = 0.85;
/// ... until the element top reaches 50%.
pub const REVEAL_END: f64 = 0.5;

/// Scroll-offset interval over which a trigger's progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TriggerWindow {
    start: f64,
    end: f64,
}

impl TriggerWindow {
    pub fn new(start: f64, end: f64) -> GlideResult<Self> {
        if !(start.is_finite() && end.is_finite()) || start >= end {
            return Err(GlideError::contract(format!(
                "trigger window must satisfy start < end, got [{start}, {end}]"
            )));
        }
        Ok(Self { start, end })
    }

    /// Resolve a window from element geometry (document space) and viewport height.
    pub fn from_anchors(
        element: Rect,
        viewport_height: f64,
        start: Anchor,
        end: EndAnchor,
    ) -> GlideResult<Self> {
        let s = start.scroll_offset(element, viewport_height);
        let e = match end {
            EndAnchor::At(anchor) => anchor.scroll_offset(element, viewport_height),
            EndAnchor::Distance(d) => s + d,
        };
        Self::new(s, e)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// `clamp((scroll - start) / (end - start), 0, 1)`.
    pub fn progress(&self, scroll: f64) -> f64 {
        clamp01((scroll - self.start) / (self.end - self.start))
    }

    pub fn contains(&self, scroll: f64) -> bool {
        scroll >= self.start && scroll <= self.end
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    #[default]
    Top,
    Center,
    Bottom,
}

/// "Element `edge` meets `viewport` (fraction of viewport height from the top)".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    #[serde(default)]
    pub edge: Edge,
    pub viewport: f64,
}

impl Anchor {
    pub const fn new(edge: Edge, viewport: f64) -> Self {
        Self { edge, viewport }
    }

    /// Scroll offset at which this anchor condition holds.
    pub fn scroll_offset(self, element: Rect, viewport_height: f64) -> f64 {
        let edge_y = match self.edge {
            Edge::Top => element.y0,
            Edge::Center => (element.y0 + element.y1) / 2.0,
            Edge::Bottom => element.y1,
        };
        edge_y - self.viewport * viewport_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndAnchor {
    At(Anchor),
    /// A fixed scroll distance after the start.
    Distance(f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TriggerMode {
    /// Progress drives properties directly and reversibly.
    #[default]
    Scrub,
    /// Latches `entered` the first time progress is positive and at least `threshold`.
    Once {
        #[serde(default)]
        threshold: f64,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/window.rs"]
mod tests;
