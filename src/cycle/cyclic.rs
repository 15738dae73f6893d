//! Rotating content: an ordered list of text pairs with one current index.
//!
//! A rotation is driven either by a wall-clock timer or by scroll progress, never both.

use crate::foundation::core::sanitize_dt;
use crate::foundation::error::{GlideError, GlideResult};

pub const DEFAULT_CYCLE_INTERVAL_SECS: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CycleItem {
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
}

impl CycleItem {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// How the scroll-driven variant reacts when several buckets are crossed in one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketPolicy {
    /// Go straight to the destination bucket.
    #[default]
    Direct,
    /// Move at most one item per update.
    Stepwise,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CycleDriver {
    Timer {
        #[serde(default = "default_interval")]
        interval: f64,
    },
    Scroll {
        #[serde(default)]
        policy: BucketPolicy,
    },
}

fn default_interval() -> f64 {
    DEFAULT_CYCLE_INTERVAL_SECS
}

impl Default for CycleDriver {
    fn default() -> Self {
        Self::Timer {
            interval: DEFAULT_CYCLE_INTERVAL_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CycleChange {
    pub from: usize,
    pub to: usize,
}

/// `min(floor(p * n), n - 1)` with `p` clamped to `[0, 1]`.
pub fn bucket_for(progress: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    ((p * n as f64).floor() as usize).min(n - 1)
}

#[derive(Clone, Debug)]
pub struct CyclicText {
    items: Vec<CycleItem>,
    driver: CycleDriver,
    index: usize,
    clock: f64,
}

impl CyclicText {
    pub fn new(items: Vec<CycleItem>, driver: CycleDriver) -> GlideResult<Self> {
        if items.is_empty() {
            return Err(GlideError::contract("cyclic text needs at least one item"));
        }
        if let CycleDriver::Timer { interval } = driver {
            if !(interval.is_finite() && interval > 0.0) {
                return Err(GlideError::contract(format!(
                    "cycle interval must be positive, got {interval}"
                )));
            }
        }
        Ok(Self {
            items,
            driver,
            index: 0,
            clock: 0.0,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CycleItem] {
        &self.items
    }

    pub fn driver(&self) -> CycleDriver {
        self.driver
    }

    pub fn current(&self) -> &CycleItem {
        &self.items[self.index]
    }

    /// Advance the timer. At most one step per call, however large `dt` is.
    pub fn tick(&mut self, dt: f64) -> Option<CycleChange> {
        let CycleDriver::Timer { interval } = self.driver else {
            return None;
        };
        self.clock += sanitize_dt(dt);
        if self.clock < interval {
            return None;
        }
        self.clock %= interval;
        let from = self.index;
        self.index = (self.index + 1) % self.items.len();
        (self.index != from).then_some(CycleChange {
            from,
            to: self.index,
        })
    }

    /// Feed scroll progress. Ignored by timer-driven rotations.
    pub fn on_progress(&mut self, progress: f64) -> Option<CycleChange> {
        let CycleDriver::Scroll { policy } = self.driver else {
            return None;
        };
        let bucket = bucket_for(progress, self.items.len());
        let from = self.index;
        let to = match policy {
            BucketPolicy::Direct => bucket,
            BucketPolicy::Stepwise if bucket > from => from + 1,
            BucketPolicy::Stepwise if bucket < from => from - 1,
            BucketPolicy::Stepwise => from,
        };
        if to == from {
            return None;
        }
        self.index = to;
        Some(CycleChange { from, to })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cycle/cyclic.rs"]
mod tests;
