//! Lifecycle owner for a set of behaviors.
//!
//! The orchestrator holds every listener registration, routes input events, runs the two-phase
//! frame (all triggers first, then all ticks) and performs the single write-back to the surface.
//! Behaviors whose targets are not mounted yet are skipped, and writes to unmounted targets are
//! dropped before they reach the surface.

use crate::animation::property::TargetId;
use crate::animation::stage::{FrameWrites, Stage};
use crate::foundation::core::{FrameIndex, Point, TickCtx, Viewport};
use crate::foundation::error::{GlideError, GlideResult};
use crate::scene::behaviors::{Behavior, Layout, Notice, NoticeKind, SceneEnv};
use crate::scene::events::InputEvent;
use crate::scene::listeners::{ListenerKind, ListenerRegistry, Subscription};
use crate::scene::surface::Surface;

/// Outcome of one [`Orchestrator::tick`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// `None` while the page is hidden and no frame ran.
    pub frame: Option<FrameIndex>,
    pub time: f64,
    /// Property and text writes flushed to the surface.
    pub writes: usize,
    /// Behaviors skipped because a target is not mounted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

struct Slot {
    behavior: Box<dyn Behavior>,
    subscriptions: Vec<Subscription>,
    ready: bool,
}

impl Slot {
    fn listens_to(&self, kind: ListenerKind) -> bool {
        self.subscriptions.iter().any(|s| s.kind() == kind)
    }
}

pub struct Orchestrator<S: Surface> {
    surface: S,
    stage: Stage,
    listeners: ListenerRegistry,
    slots: Vec<Slot>,
    viewport: Viewport,
    scroll: f64,
    pointer: Option<Point>,
    layout: Layout,
    visible: bool,
    resumed: bool,
    clock: Option<TickCtx>,
    pending: Vec<Notice>,
}

/// Borrow-split constructor: the env borrows `layout` and `stage` while `slots` is mutated.
fn scene_env<'a>(
    tick: TickCtx,
    viewport: Viewport,
    scroll: f64,
    pointer: Option<Point>,
    layout: &'a Layout,
    stage: &'a Stage,
) -> SceneEnv<'a> {
    SceneEnv {
        tick,
        viewport,
        scroll,
        pointer,
        layout,
        stage,
    }
}

fn tag(behavior: &str, notices: Vec<NoticeKind>) -> impl Iterator<Item = Notice> + '_ {
    notices.into_iter().map(move |kind| Notice {
        behavior: behavior.to_owned(),
        kind,
    })
}

impl<S: Surface> Orchestrator<S> {
    pub fn new(surface: S, viewport: Viewport) -> Self {
        Self {
            surface,
            stage: Stage::new(),
            listeners: ListenerRegistry::new(),
            slots: Vec::new(),
            viewport,
            scroll: 0.0,
            pointer: None,
            layout: Layout::new(),
            visible: true,
            resumed: false,
            clock: None,
            pending: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear everything down and hand the surface back.
    pub fn into_surface(mut self) -> S {
        self.unmount_all();
        self.surface
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Index of the last frame that ran.
    pub fn frame(&self) -> Option<FrameIndex> {
        self.clock.map(|c| c.frame)
    }

    pub fn behaviors(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|s| s.behavior.name())
    }

    fn current_tick(&self) -> TickCtx {
        self.clock.unwrap_or_else(|| TickCtx::first(0.0))
    }

    /// Register `behavior`'s listeners and run its mount and first layout pass.
    pub fn mount(&mut self, mut behavior: Box<dyn Behavior>) -> GlideResult<()> {
        let name = behavior.name().to_owned();
        if name.is_empty() {
            return Err(GlideError::config("behavior name must be non-empty"));
        }
        if self.slots.iter().any(|s| s.behavior.name() == name) {
            return Err(GlideError::config(format!(
                "behavior '{name}' is already mounted"
            )));
        }

        let subscriptions: Vec<Subscription> = behavior
            .listens()
            .iter()
            .map(|kind| self.listeners.subscribe(*kind, &name))
            .collect();

        let mut notices = Vec::new();
        let env = scene_env(
            self.current_tick(),
            self.viewport,
            self.scroll,
            self.pointer,
            &self.layout,
            &self.stage,
        );
        let started = behavior
            .on_mount(&env, &mut notices)
            .and_then(|()| behavior.on_layout(&env));
        if let Err(err) = started {
            for sub in subscriptions {
                self.listeners.release(sub);
            }
            return Err(err);
        }

        tracing::debug!(behavior = %name, listeners = subscriptions.len(), "behavior mounted");
        self.pending.extend(tag(&name, notices));
        self.slots.push(Slot {
            behavior,
            subscriptions,
            ready: false,
        });
        Ok(())
    }

    /// Release `name`'s listeners and forget the targets no other behavior drives.
    /// Returns `false` when nothing by that name is mounted.
    pub fn unmount(&mut self, name: &str) -> bool {
        let Some(pos) = self.slots.iter().position(|s| s.behavior.name() == name) else {
            return false;
        };
        let slot = self.slots.remove(pos);
        for sub in slot.subscriptions {
            self.listeners.release(sub);
        }
        let still_used: Vec<TargetId> = self
            .slots
            .iter()
            .flat_map(|s| s.behavior.targets())
            .collect();
        for target in slot.behavior.targets() {
            if !still_used.contains(&target) {
                self.stage.forget(&target);
            }
        }
        tracing::debug!(behavior = name, "behavior unmounted");
        true
    }

    pub fn unmount_all(&mut self) {
        let names: Vec<String> = self.behaviors().map(str::to_owned).collect();
        for name in names.iter().rev() {
            self.unmount(name);
        }
    }

    /// Apply an input event to the shared snapshot and route it to subscribed behaviors.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn dispatch(&mut self, event: InputEvent) -> GlideResult<()> {
        let mut relayout = false;
        match &event {
            InputEvent::PointerMove { x, y } => self.pointer = Some(Point::new(*x, *y)),
            InputEvent::Scroll { y } => self.scroll = *y,
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport::new(*width, *height)?;
                relayout = true;
            }
            InputEvent::Layout { target, rect } => {
                self.layout.set(target.clone(), *rect);
                relayout = true;
            }
            InputEvent::Visibility { visible } => {
                if *visible && !self.visible {
                    self.resumed = true;
                }
                self.visible = *visible;
                tracing::debug!(visible, "visibility changed");
            }
            _ => {}
        }

        let env = scene_env(
            self.current_tick(),
            self.viewport,
            self.scroll,
            self.pointer,
            &self.layout,
            &self.stage,
        );
        // A failing behavior must not leave the ones after it on stale geometry, so every slot
        // is relaid and the event is still routed. The first failure is reported.
        let mut first_err = None;
        if relayout {
            for slot in &mut self.slots {
                if let Err(err) = slot.behavior.on_layout(&env) {
                    tracing::warn!(behavior = slot.behavior.name(), %err, "layout rejected");
                    first_err.get_or_insert(err);
                }
            }
        }

        let kind = event.kind();
        for slot in self.slots.iter_mut().filter(|s| s.listens_to(kind)) {
            let mut notices = Vec::new();
            if let Err(err) = slot.behavior.on_event(&event, &env, &mut notices) {
                tracing::warn!(behavior = slot.behavior.name(), %err, "event rejected");
                first_err.get_or_insert(err);
            }
            self.pending.extend(tag(slot.behavior.name(), notices));
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Run one frame `dt` seconds after the previous one.
    ///
    /// Hidden pages do not tick, and the first frame after becoming visible again runs with a
    /// zero delta so skipped time is not replayed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, dt: f64) -> FrameReport {
        if !self.visible {
            return FrameReport {
                notices: std::mem::take(&mut self.pending),
                ..FrameReport::default()
            };
        }
        let dt = if std::mem::take(&mut self.resumed) { 0.0 } else { dt };
        let tick = match self.clock {
            Some(prev) => prev.next(dt),
            None => TickCtx::first(dt),
        };
        self.clock = Some(tick);

        let mut skipped = Vec::new();
        for slot in &mut self.slots {
            let ready = slot
                .behavior
                .targets()
                .iter()
                .all(|t| self.surface.is_mounted(t));
            if ready != slot.ready {
                tracing::debug!(behavior = slot.behavior.name(), ready, "behavior readiness changed");
                slot.ready = ready;
            }
            if !ready {
                skipped.push(slot.behavior.name().to_owned());
            }
        }

        let mut out = FrameWrites::new();
        let mut notices = std::mem::take(&mut self.pending);
        {
            let env = scene_env(
                tick,
                self.viewport,
                self.scroll,
                self.pointer,
                &self.layout,
                &self.stage,
            );
            for slot in self.slots.iter_mut().filter(|s| s.ready) {
                slot.behavior.update_triggers(&env);
            }
            for slot in self.slots.iter_mut().filter(|s| s.ready) {
                let mut emitted = Vec::new();
                slot.behavior.tick(&env, &mut out, &mut emitted);
                notices.extend(tag(slot.behavior.name(), emitted));
            }
        }

        let surface = &self.surface;
        out.retain_targets(|t| surface.is_mounted(t));
        self.stage.commit(&out);

        self.surface.begin_frame(tick.frame, tick.time);
        let mut writes = 0;
        for (target, prop, value) in out.props() {
            self.surface.write_property(target, prop, value);
            writes += 1;
        }
        for (target, text) in out.texts() {
            self.surface.write_text(target, text);
            writes += 1;
        }

        FrameReport {
            frame: Some(tick.frame),
            time: tick.time,
            writes,
            skipped,
            notices,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/orchestrator.rs"]
mod tests;
