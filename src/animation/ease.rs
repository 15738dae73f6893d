use std::f64::consts::PI;

/// Overshoot used by the `Back*` curves.
pub const BACK_OVERSHOOT: f64 = 1.70158;

/// Easing curves. `Power1` is quadratic, `Power4` quintic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4In,
    Power4Out,
    Power4InOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    SineIn,
    SineOut,
    SineInOut,
    BackIn,
    BackOut,
}

impl Ease {
    pub const ALL: [Ease; 21] = [
        Ease::Linear,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power1InOut,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3In,
        Ease::Power3Out,
        Ease::Power3InOut,
        Ease::Power4In,
        Ease::Power4Out,
        Ease::Power4InOut,
        Ease::ExpoIn,
        Ease::ExpoOut,
        Ease::ExpoInOut,
        Ease::SineIn,
        Ease::SineOut,
        Ease::SineInOut,
        Ease::BackIn,
        Ease::BackOut,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Power1In => pow_in(t, 2),
            Self::Power1Out => pow_out(t, 2),
            Self::Power1InOut => pow_in_out(t, 2),
            Self::Power2In => pow_in(t, 3),
            Self::Power2Out => pow_out(t, 3),
            Self::Power2InOut => pow_in_out(t, 3),
            Self::Power3In => pow_in(t, 4),
            Self::Power3Out => pow_out(t, 4),
            Self::Power3InOut => pow_in_out(t, 4),
            Self::Power4In => pow_in(t, 5),
            Self::Power4Out => pow_out(t, 5),
            Self::Power4InOut => pow_in_out(t, 5),
            Self::ExpoIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::SineIn => 1.0 - ((t * PI) / 2.0).cos(),
            Self::SineOut => ((t * PI) / 2.0).sin(),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Self::BackIn => {
                let c3 = BACK_OVERSHOOT + 1.0;
                c3 * t * t * t - BACK_OVERSHOOT * t * t
            }
            Self::BackOut => {
                let c3 = BACK_OVERSHOOT + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + BACK_OVERSHOOT * u * u
            }
        }
    }

    /// Curves whose output leaves `[0, 1]` between the endpoints.
    pub fn overshoots(self) -> bool {
        matches!(self, Self::BackIn | Self::BackOut)
    }
}

fn pow_in(t: f64, n: i32) -> f64 {
    t.powi(n)
}

fn pow_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

fn pow_in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
