//! Glide is a rendering-agnostic core for interaction-driven animation.
//!
//! Behaviors such as a cursor follower, a pinned horizontal strip or a scroll-scrubbed reveal are
//! built from a handful of small motion components:
//!
//! - [`Interpolator`] for exponential smoothing toward a moving target
//! - [`ViewportTrigger`] and [`PinnedScrub`] for scroll-window progress
//! - [`Sequence`] and [`SequencePlayer`] for choreographed timelines
//! - [`ShapeMorphController`] and [`CyclicText`] for hover and rotation state machines
//!
//! An [`Orchestrator`] owns the behaviors, routes [`InputEvent`]s to them and flushes one batch
//! of writes per frame to a host [`Surface`]. Scenes can also be described in JSON ([`SceneDef`])
//! and stepped deterministically with [`simulate`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod cycle;
pub(crate) mod input;
pub(crate) mod morph;
pub(crate) mod scene;
pub(crate) mod sequence;
pub(crate) mod trigger;

pub use crate::foundation::core::{
    COMPACT_BREAKPOINT, FrameIndex, Point, Rect, Size, TickCtx, Vec2, Viewport, clamp01,
    sanitize_dt,
};
pub use crate::foundation::error::{GlideError, GlideResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::lerp::{Interpolator, Lerp, SmoothingFactor};
pub use crate::animation::property::{AnimatedTarget, Property, PropertyMap, TargetId};
pub use crate::animation::stage::{FrameWrites, Stage};

pub use crate::input::orientation::{
    OrientationCapability, OrientationSample, OrientationTracker, Permission, normalize_tilt,
};
pub use crate::input::pointer::{HitAxis, PointerReading, PointerTracker, normalize_in_viewport};

pub use crate::trigger::pin::{PIN_PADDING, PinFrame, PinLayout, PinMapping, PinnedScrub};
pub use crate::trigger::scrub::ScrubSmoother;
pub use crate::trigger::viewport::{TriggerSpec, TriggerState, ViewportTrigger};
pub use crate::trigger::window::{Anchor, Edge, EndAnchor, TriggerMode, TriggerWindow};

pub use crate::sequence::director::Director;
pub use crate::sequence::player::{PlayState, SequenceEvent, SequencePlayer};
pub use crate::sequence::step::{Cue, Placement, Step, StepAction, Tween, TweenValue};
pub use crate::sequence::text_morph::{GlitchConfig, TextMorpher, glitch_morph};
pub use crate::sequence::timeline::{Repeat, RepeatCount, Schedule, ScheduledStep, Sequence};

pub use crate::morph::controller::{
    MorphConfig, MorphEvent, MorphShape, MorphState, ShapeMorphController,
};

pub use crate::cycle::cyclic::{
    BucketPolicy, CycleChange, CycleDriver, CycleItem, CyclicText, bucket_for,
};

pub use crate::scene::behaviors::cursor::{CursorConfig, CursorFollower};
pub use crate::scene::behaviors::floating_card::{CardRow, FloatingCard, FloatingCardConfig};
pub use crate::scene::behaviors::intro::{Intro, IntroConfig};
pub use crate::scene::behaviors::messenger::{Messenger, MessengerConfig};
pub use crate::scene::behaviors::parallax::{Parallax, ParallaxConfig, ParallaxGains};
pub use crate::scene::behaviors::pinned_strip::{PinnedStrip, PinnedStripConfig};
pub use crate::scene::behaviors::reveal_mask::{RevealMask, RevealMaskConfig};
pub use crate::scene::behaviors::rotating_text::{RotatingText, RotatingTextConfig};
pub use crate::scene::behaviors::scroll_reveal::{ScrollReveal, ScrollRevealConfig};
pub use crate::scene::behaviors::{Behavior, Layout, Notice, NoticeKind, SceneEnv};
pub use crate::scene::config::{
    BehaviorDef, BehaviorKind, FrameNotice, SceneDef, ScriptEntry, SimulationLog, simulate,
};
pub use crate::scene::delegate::{ElementInfo, INTERACTIVE_SELECTORS, SelectorList};
pub use crate::scene::events::InputEvent;
pub use crate::scene::listeners::{ListenerKind, ListenerRegistry, Subscription};
pub use crate::scene::orchestrator::{FrameReport, Orchestrator};
pub use crate::scene::surface::{FrameRecord, PropertyWrite, RecordingSurface, Surface, TextWrite};
pub use crate::sequence::templates::{
    IntroTargets, TourConfig, TourTargets, hover_float, intro_reveal, messenger_tour, typewriter,
};
