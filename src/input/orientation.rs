//! Device tilt normalized into a bounded `[-1, 1]` pair.
//!
//! Platforms that require explicit consent start in [`Permission::Unrequested`]; nothing is
//! emitted until the host resolves the request as granted. Absent hardware and denial are
//! regular states, downstream consumers simply stay at rest.

use crate::foundation::core::Vec2;

/// Degrees of tilt that map to a full-scale reading.
pub const TILT_RANGE_DEG: f64 = 45.0;
/// Front/back angle of a phone held upright; treated as the neutral pose.
pub const NEUTRAL_BETA_DEG: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationCapability {
    Absent,
    /// Readings flow without a consent prompt.
    Available,
    /// Readings require an explicit permission request/response pair.
    ConsentRequired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Permission {
    Unsupported,
    Unrequested,
    Pending,
    Granted,
    Denied,
}

/// One raw device-orientation event; platforms may omit either angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrientationSample {
    /// Left/right tilt in degrees, roughly `[-90, 90]`.
    pub gamma: Option<f64>,
    /// Front/back tilt in degrees, roughly `[-180, 180]`.
    pub beta: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct OrientationTracker {
    permission: Permission,
    last: Option<Vec2>,
}

impl OrientationTracker {
    pub fn new(capability: OrientationCapability) -> Self {
        let permission = match capability {
            OrientationCapability::Absent => Permission::Unsupported,
            OrientationCapability::Available => Permission::Granted,
            OrientationCapability::ConsentRequired => Permission::Unrequested,
        };
        Self {
            permission,
            last: None,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn is_enabled(&self) -> bool {
        self.permission == Permission::Granted
    }

    /// Start a consent request. Returns `true` when the host should actually prompt.
    pub fn request_permission(&mut self) -> bool {
        if self.permission == Permission::Unrequested {
            self.permission = Permission::Pending;
            tracing::debug!("orientation permission requested");
            return true;
        }
        false
    }

    /// Out-of-band answer to [`Self::request_permission`]. Denial is final, no retry.
    pub fn resolve_permission(&mut self, granted: bool) {
        if !matches!(self.permission, Permission::Pending | Permission::Unrequested) {
            return;
        }
        self.permission = if granted {
            Permission::Granted
        } else {
            Permission::Denied
        };
        tracing::debug!(permission = ?self.permission, "orientation permission resolved");
    }

    /// Normalized reading, or `None` while readings are not permitted.
    pub fn on_sample(&mut self, sample: OrientationSample) -> Option<Vec2> {
        if !self.is_enabled() {
            return None;
        }
        let v = normalize_tilt(sample);
        self.last = Some(v);
        Some(v)
    }

    pub fn last(&self) -> Option<Vec2> {
        if self.is_enabled() { self.last } else { None }
    }
}

/// `clamp(gamma / 45, -1, 1)` and `clamp((beta - 90) / 45, -1, 1)`; missing angles read as 0.
pub fn normalize_tilt(sample: OrientationSample) -> Vec2 {
    let gamma = finite_or_zero(sample.gamma);
    let beta = finite_or_zero(sample.beta);
    Vec2::new(
        (gamma / TILT_RANGE_DEG).clamp(-1.0, 1.0),
        ((beta - NEUTRAL_BETA_DEG) / TILT_RANGE_DEG).clamp(-1.0, 1.0),
    )
}

fn finite_or_zero(v: Option<f64>) -> f64 {
    v.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/input/orientation.rs"]
mod tests;
