//! Ready-made sequences for the site's recurring motions.

use crate::animation::ease::Ease;
use crate::animation::property::{Property, PropertyMap, TargetId};
use crate::sequence::step::{Cue, Placement, StepAction, Tween};
use crate::sequence::timeline::{Repeat, RepeatCount, Sequence};

pub const INTRO_DELAY_SECS: f64 = 0.2;
pub const TYPEWRITER_INTERVAL_SECS: f64 = 0.04;
pub const FLOAT_AMPLITUDE: f64 = 20.0;
pub const FLOAT_HALF_PERIOD_SECS: f64 = 2.0;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroTargets {
    pub line: TargetId,
    #[serde(default)]
    pub names: Vec<TargetId>,
    #[serde(default)]
    pub specs: Vec<TargetId>,
}

impl IntroTargets {
    pub fn all(&self) -> impl Iterator<Item = &TargetId> + '_ {
        std::iter::once(&self.line)
            .chain(&self.names)
            .chain(&self.specs)
    }
}

/// Hero entrance: the divider line grows, names rise with a stagger, specs fade in.
///
/// Every target is hidden at time zero so nothing flashes before its own step starts.
pub fn intro_reveal(t: &IntroTargets) -> Sequence {
    let mut seq = Sequence::new().set(
        [&t.line],
        PropertyMap::new()
            .with(Property::ScaleX, 0.0)
            .with(Property::Opacity, 0.0),
        Placement::At(0.0),
    );
    if !t.names.is_empty() {
        seq = seq.set(
            &t.names,
            PropertyMap::new()
                .with(Property::YPercent, 110.0)
                .with(Property::RotationX, -20.0)
                .with(Property::Opacity, 0.0),
            Placement::At(0.0),
        );
    }
    if !t.specs.is_empty() {
        seq = seq.set(
            &t.specs,
            PropertyMap::new()
                .with(Property::Opacity, 0.0)
                .with(Property::Y, 10.0),
            Placement::At(0.0),
        );
    }

    seq = seq.at(
        Tween::to(
            [&t.line],
            PropertyMap::new()
                .with(Property::ScaleX, 1.0)
                .with(Property::Opacity, 1.0),
            1.2,
        )
        .ease(Ease::ExpoInOut),
        INTRO_DELAY_SECS,
    );
    if !t.names.is_empty() {
        seq = seq.offset(
            Tween::to(
                &t.names,
                PropertyMap::new()
                    .with(Property::YPercent, 0.0)
                    .with(Property::RotationX, 0.0)
                    .with(Property::Opacity, 1.0),
                1.4,
            )
            .stagger(0.1)
            .ease(Ease::Power4Out),
            -0.5,
        );
    }
    if !t.specs.is_empty() {
        seq = seq.offset(
            Tween::to(
                &t.specs,
                PropertyMap::new()
                    .with(Property::Opacity, 1.0)
                    .with(Property::Y, 0.0),
                0.8,
            )
            .stagger(0.1)
            .ease(Ease::Power2Out),
            -1.0,
        );
    }
    seq
}

/// Append text swaps revealing `text` one character at a time, starting at `start`.
/// Returns the time of the last swap.
pub fn push_typewriter(
    seq: &mut Sequence,
    target: &TargetId,
    text: &str,
    start: f64,
    interval: f64,
) -> f64 {
    let swap = |seq: &mut Sequence, text: &str, at: f64| {
        seq.push(
            StepAction::Call(Cue::SwapText {
                target: target.clone(),
                text: text.to_owned(),
            }),
            Placement::At(at),
        );
    };

    swap(seq, "", start);
    let mut at = start;
    for (k, (i, c)) in text.char_indices().enumerate() {
        at = start + (k + 1) as f64 * interval;
        swap(seq, &text[..i + c.len_utf8()], at);
    }
    at
}

pub fn typewriter(target: &TargetId, text: &str, interval: f64) -> Sequence {
    let mut seq = Sequence::new();
    push_typewriter(&mut seq, target, text, 0.0, interval);
    seq
}

/// Endless vertical bob by `amplitude` around the current position.
pub fn hover_float(target: &TargetId, amplitude: f64, half_period: f64) -> Sequence {
    Sequence::new()
        .then(
            Tween::to([target], PropertyMap::new(), half_period)
                .by(Property::Y, amplitude)
                .ease(Ease::SineInOut),
        )
        .with_repeat(Repeat {
            count: RepeatCount::Infinite,
            yoyo: true,
        })
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TourTargets {
    /// The element that flies in and out.
    pub messenger: TargetId,
    /// Speech bubble that pops for each message.
    pub bubble: TargetId,
    /// Text node inside the bubble.
    pub text: TargetId,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub start_delay: f64,
    pub offscreen_x: f64,
    pub rest_x: f64,
    pub fly_secs: f64,
    pub pop_secs: f64,
    pub read_secs: f64,
    pub hide_secs: f64,
    pub gap_secs: f64,
    pub type_interval: f64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            start_delay: 1.0,
            offscreen_x: 400.0,
            rest_x: -220.0,
            fly_secs: 1.5,
            pop_secs: 0.5,
            read_secs: 2.0,
            hide_secs: 0.3,
            gap_secs: 0.5,
            type_interval: TYPEWRITER_INTERVAL_SECS,
        }
    }
}

pub const TOUR_DONE_CUE: &str = "tour_done";

/// Messenger flies in, shows each message in a popping bubble with a typewriter reveal, then
/// flies away and emits [`TOUR_DONE_CUE`].
pub fn messenger_tour(t: &TourTargets, messages: &[String], cfg: &TourConfig) -> Sequence {
    let x = |v: f64| PropertyMap::new().with(Property::X, v);
    let bubble = |v: f64| {
        PropertyMap::new()
            .with(Property::Scale, v)
            .with(Property::Opacity, v)
    };

    let mut seq = Sequence::new()
        .set(
            [&t.messenger],
            x(cfg.offscreen_x).with(Property::Opacity, 1.0),
            Placement::At(0.0),
        )
        .set([&t.bubble], bubble(0.0), Placement::At(0.0));

    let mut at = cfg.start_delay;
    seq = seq.at(
        Tween::to([&t.messenger], x(cfg.rest_x), cfg.fly_secs).ease(Ease::Power2Out),
        at,
    );
    at += cfg.fly_secs;

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            at += cfg.gap_secs;
        }
        push_typewriter(&mut seq, &t.text, message, at, cfg.type_interval);
        seq = seq.at(
            Tween::to([&t.bubble], bubble(1.0), cfg.pop_secs).ease(Ease::BackOut),
            at,
        );
        at += cfg.pop_secs + cfg.read_secs;
        seq = seq.at(
            Tween::to([&t.bubble], bubble(0.0), cfg.hide_secs).ease(Ease::BackIn),
            at,
        );
        at += cfg.hide_secs;
    }

    seq.at(
        Tween::to([&t.messenger], x(cfg.offscreen_x), cfg.fly_secs).ease(Ease::Power2In),
        at,
    )
    .call(Cue::Named(TOUR_DONE_CUE.to_owned()), Placement::AfterPrevious)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/templates.rs"]
mod tests;
