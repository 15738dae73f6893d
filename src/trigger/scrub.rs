use crate::foundation::core::sanitize_dt;

/// Residual fraction of the gap left after `lag` seconds.
const LAG_RESIDUAL: f64 = 0.01;

/// Time-based catch-up of scrubbed progress toward the raw scroll progress.
///
/// With `lag == 0` the output is the raw progress (direct binding).
#[derive(Clone, Debug, PartialEq)]
pub struct ScrubSmoother {
    lag: f64,
    value: Option<f64>,
}

impl ScrubSmoother {
    pub fn new(lag: f64) -> Self {
        Self {
            lag: if lag.is_finite() { lag.max(0.0) } else { 0.0 },
            value: None,
        }
    }

    pub fn lag(&self) -> f64 {
        self.lag
    }

    /// Drop in-flight smoothing; the next [`Self::follow`] starts at the raw value.
    pub fn reset(&mut self) {
        self.value = None;
    }

    pub fn follow(&mut self, raw: f64, dt: f64) -> f64 {
        let next = match self.value {
            None => raw,
            Some(_) if self.lag <= 0.0 => raw,
            Some(prev) => {
                let alpha = 1.0 - LAG_RESIDUAL.powf(sanitize_dt(dt) / self.lag);
                let v = prev + (raw - prev) * alpha;
                if (v - raw).abs() < 1e-6 { raw } else { v }
            }
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/scrub.rs"]
mod tests;
