use crate::foundation::error::{GlideError, GlideResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Viewport width below which a layout counts as compact (touch-first, tilt instead of pointer).
pub const COMPACT_BREAKPOINT: f64 = 768.0;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Per-frame timing handed to every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickCtx {
    pub frame: FrameIndex,
    /// Seconds since the previous tick; never negative.
    pub dt: f64,
    /// Seconds since the orchestrator started ticking (sum of `dt`).
    pub time: f64,
}

impl TickCtx {
    pub fn first(dt: f64) -> Self {
        let dt = sanitize_dt(dt);
        Self {
            frame: FrameIndex(0),
            dt,
            time: dt,
        }
    }

    pub fn next(self, dt: f64) -> Self {
        let dt = sanitize_dt(dt);
        Self {
            frame: FrameIndex(self.frame.0 + 1),
            dt,
            time: self.time + dt,
        }
    }
}

/// Clock jitter can report zero, negative or NaN deltas; elapsed time must stay monotonic.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> GlideResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GlideError::config(format!(
                "viewport must have positive finite size, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn is_compact(self) -> bool {
        self.width < COMPACT_BREAKPOINT
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
