//! Glitch-style content morph: flicker out, swap text while hidden, flicker back in.

use crate::animation::ease::Ease;
use crate::animation::property::{Property, PropertyMap, TargetId};
use crate::animation::stage::{FrameWrites, Stage};
use crate::foundation::error::{GlideError, GlideResult};
use crate::sequence::player::{PlayState, SequenceEvent, SequencePlayer};
use crate::sequence::step::{Cue, Placement, StepAction, Tween};
use crate::sequence::timeline::Sequence;

pub const GLITCH_PULSES: u32 = 2;
pub const GLITCH_PULSE_SECS: f64 = 0.06;
pub const GLITCH_LOW_OPACITY: f64 = 0.3;
pub const GLITCH_HIGH_OPACITY: f64 = 0.8;
pub const GLITCH_PEAK_BLUR: f64 = 8.0;
pub const GLITCH_HOLD_SECS: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    /// Low/high flicker pairs on each side of the swap.
    pub pulses: u32,
    pub pulse_secs: f64,
    pub low_opacity: f64,
    pub high_opacity: f64,
    pub peak_blur: f64,
    /// Fully hidden time around the swap.
    pub hold_secs: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            pulses: GLITCH_PULSES,
            pulse_secs: GLITCH_PULSE_SECS,
            low_opacity: GLITCH_LOW_OPACITY,
            high_opacity: GLITCH_HIGH_OPACITY,
            peak_blur: GLITCH_PEAK_BLUR,
            hold_secs: GLITCH_HOLD_SECS,
        }
    }
}

impl GlitchConfig {
    pub fn validate(&self) -> GlideResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(GlideError::config(format!("glitch {name} must be positive, got {v}")))
            }
        };
        positive("pulse_secs", self.pulse_secs)?;
        positive("hold_secs", self.hold_secs)?;
        for (name, v) in [("low_opacity", self.low_opacity), ("high_opacity", self.high_opacity)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(GlideError::config(format!("glitch {name} must be within [0, 1], got {v}")));
            }
        }
        if !(self.peak_blur.is_finite() && self.peak_blur >= 0.0) {
            return Err(GlideError::config(format!(
                "glitch peak_blur must be non-negative, got {}",
                self.peak_blur
            )));
        }
        Ok(())
    }

    /// Length of the flicker before the swap; the recovery mirrors it.
    pub fn half_span(&self) -> f64 {
        f64::from(2 * self.pulses + 1) * self.pulse_secs
    }

    /// Time from sequence start to the text swap.
    pub fn swap_time(&self) -> f64 {
        self.half_span() + self.hold_secs / 2.0
    }

    pub fn total(&self) -> f64 {
        2.0 * self.half_span() + self.hold_secs
    }
}

fn look(opacity: f64, blur: f64) -> PropertyMap {
    PropertyMap::new()
        .with(Property::Opacity, opacity)
        .with(Property::Blur, blur)
}

/// Build the glitch sequence that pulses `targets` and swaps each `(target, text)` while hidden.
///
/// The swap is scheduled at the exact midpoint, inside a window where every pulsed target is at
/// zero opacity.
pub fn glitch_morph(
    targets: &[TargetId],
    swaps: &[(TargetId, String)],
    cfg: &GlitchConfig,
) -> GlideResult<Sequence> {
    cfg.validate()?;
    if targets.is_empty() {
        return Err(GlideError::contract("glitch morph needs at least one target"));
    }

    let pulse = |seq: &mut Sequence, look: PropertyMap, placement: Placement| {
        let tween = Tween::to(targets.iter(), look, cfg.pulse_secs).ease(Ease::Power1InOut);
        seq.push(StepAction::Tween(tween), placement);
    };

    let low = look(cfg.low_opacity, cfg.peak_blur);
    let high = look(cfg.high_opacity, cfg.peak_blur / 2.0);

    let mut seq = Sequence::new();
    for _ in 0..cfg.pulses {
        pulse(&mut seq, low.clone(), Placement::AfterPrevious);
        pulse(&mut seq, high.clone(), Placement::AfterPrevious);
    }
    pulse(&mut seq, look(0.0, cfg.peak_blur), Placement::AfterPrevious);

    let half_hold = cfg.hold_secs / 2.0;
    for (i, (target, text)) in swaps.iter().enumerate() {
        let placement = if i == 0 {
            Placement::Offset(half_hold)
        } else {
            Placement::WithPrevious
        };
        seq.push(
            StepAction::Call(Cue::SwapText {
                target: target.clone(),
                text: text.clone(),
            }),
            placement,
        );
    }

    // The first recovery pulse starts one full hold after the hide ends.
    let mut next = if swaps.is_empty() {
        Placement::Offset(cfg.hold_secs)
    } else {
        Placement::Offset(half_hold)
    };
    for _ in 0..cfg.pulses {
        pulse(&mut seq, high.clone(), next);
        pulse(&mut seq, low.clone(), Placement::AfterPrevious);
        next = Placement::AfterPrevious;
    }
    pulse(&mut seq, look(1.0, 0.0), next);
    Ok(seq)
}

/// Runs glitch morphs for one text block. A new request interrupts the running morph, so a
/// swap that has not fired yet never fires.
#[derive(Clone, Debug)]
pub struct TextMorpher {
    targets: Vec<TargetId>,
    config: GlitchConfig,
    player: SequencePlayer,
}

impl TextMorpher {
    pub fn new(targets: Vec<TargetId>, config: GlitchConfig) -> GlideResult<Self> {
        config.validate()?;
        if targets.is_empty() {
            return Err(GlideError::contract("text morpher needs at least one target"));
        }
        Ok(Self {
            targets,
            config,
            player: SequencePlayer::new(),
        })
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.player.is_active()
    }

    pub fn state(&self) -> PlayState {
        self.player.state()
    }

    /// Start a morph from the current visual state.
    pub fn request(&mut self, swaps: &[(TargetId, String)]) -> GlideResult<()> {
        let seq = glitch_morph(&self.targets, swaps, &self.config)?;
        if self.player.is_active() {
            tracing::debug!("text morph restarted before completion");
        }
        self.player.play(&seq)
    }

    pub fn interrupt(&mut self) {
        self.player.interrupt();
    }

    pub fn advance(&mut self, dt: f64, stage: &Stage, out: &mut FrameWrites) -> Vec<SequenceEvent> {
        self.player.advance(dt, stage, out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/text_morph.rs"]
mod tests;
