//! Exponential smoothing toward a moving target.
//!
//! One [`Interpolator::step`] per frame moves `current` a fixed fraction of the remaining
//! distance toward `target`. The error therefore shrinks geometrically by `1 - f` per tick and
//! the value never overshoots.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{GlideError, GlideResult};

/// Interpolation contract for smoothed value types.
pub trait Lerp: Sized + Clone + PartialEq {
    /// Interpolate from `a` to `b` with factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;

    /// Distance used for convergence checks.
    fn distance(a: &Self, b: &Self) -> f64;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }

    fn distance(a: &Self, b: &Self) -> f64 {
        (a - b).abs()
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }

    fn distance(a: &Self, b: &Self) -> f64 {
        (*a - *b).hypot()
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }

    fn distance(a: &Self, b: &Self) -> f64 {
        a.distance(*b)
    }
}

/// A smoothing factor in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SmoothingFactor(f64);

impl SmoothingFactor {
    pub fn new(f: f64) -> GlideResult<Self> {
        if !(f > 0.0 && f <= 1.0) {
            return Err(GlideError::contract(format!(
                "smoothing factor must be in (0, 1], got {f}"
            )));
        }
        Ok(Self(f))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Upper bound on ticks needed to shrink an initial error `distance` below `epsilon`.
    pub fn ticks_to_converge(self, distance: f64, epsilon: f64) -> u64 {
        if distance <= epsilon || self.0 >= 1.0 {
            return u64::from(distance > epsilon);
        }
        let n = (epsilon / distance).ln() / (1.0 - self.0).ln();
        n.ceil().max(0.0) as u64
    }
}

impl<'de> serde::Deserialize<'de> for SmoothingFactor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let f = f64::deserialize(deserializer)?;
        SmoothingFactor::new(f).map_err(serde::de::Error::custom)
    }
}

/// `{current, target, factor}` smoothing state. Created on mount, stepped once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolator<T> {
    current: T,
    target: T,
    factor: SmoothingFactor,
}

impl<T: Lerp> Interpolator<T> {
    pub fn new(initial: T, factor: SmoothingFactor) -> Self {
        Self {
            target: initial.clone(),
            current: initial,
            factor,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn factor(&self) -> SmoothingFactor {
        self.factor
    }

    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Jump straight to `value` (both current and target).
    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.target = value;
    }

    /// Advance one tick and return the new current value.
    pub fn step(&mut self) -> &T {
        if self.current == self.target {
            return &self.current;
        }
        let before = T::distance(&self.current, &self.target);
        let next = T::lerp(&self.current, &self.target, self.factor.0);
        // Rounding can stall progress near the target (or land past it for f == 1).
        if self.factor.0 >= 1.0 || T::distance(&next, &self.target) >= before {
            self.current = self.target.clone();
        } else {
            self.current = next;
        }
        &self.current
    }

    pub fn error(&self) -> f64 {
        T::distance(&self.current, &self.target)
    }

    pub fn is_settled(&self, epsilon: f64) -> bool {
        self.error() <= epsilon
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
