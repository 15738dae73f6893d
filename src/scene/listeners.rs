//! Explicit, disposable listener registrations.
//!
//! Every global listener (pointer, scroll, resize, ...) a behavior needs is represented by a
//! [`Subscription`] handle. The handle is not `Clone` and [`ListenerRegistry::release`]
//! consumes it, so a registration is released at most once. Each handle is stamped with the
//! registry that issued it and is ignored by any other. Handles still live when the registry is
//! dropped are reported as leaks.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    PointerMove,
    Scroll,
    Resize,
    Orientation,
    Visibility,
    FrameTick,
    Hover,
}

#[derive(Debug, PartialEq, Eq)]
#[must_use = "a subscription must be released through its registry"]
pub struct Subscription {
    registry: u64,
    id: u64,
    kind: ListenerKind,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Registration {
    kind: ListenerKind,
    owner: String,
}

#[derive(Debug)]
pub struct ListenerRegistry {
    id: u64,
    next_id: u64,
    live: BTreeMap<u64, Registration>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            next_id: 0,
            live: BTreeMap::new(),
        }
    }

    pub fn subscribe(&mut self, kind: ListenerKind, owner: &str) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(
            id,
            Registration {
                kind,
                owner: owner.to_owned(),
            },
        );
        tracing::trace!(?kind, owner, id, "listener subscribed");
        Subscription {
            registry: self.id,
            id,
            kind,
        }
    }

    pub fn release(&mut self, sub: Subscription) {
        if sub.registry != self.id {
            tracing::warn!(
                id = sub.id,
                issued_by = sub.registry,
                registry = self.id,
                "released a subscription issued by another registry"
            );
            return;
        }
        match self.live.remove(&sub.id) {
            Some(reg) => tracing::trace!(kind = ?reg.kind, owner = %reg.owner, id = sub.id, "listener released"),
            None => tracing::warn!(id = sub.id, "released a subscription this registry does not own"),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of live registrations of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.live.values().filter(|r| r.kind == kind).count()
    }

    pub fn owners(&self, kind: ListenerKind) -> Vec<&str> {
        self.live
            .values()
            .filter(|r| r.kind == kind)
            .map(|r| r.owner.as_str())
            .collect()
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        for (id, reg) in &self.live {
            tracing::warn!(id, kind = ?reg.kind, owner = %reg.owner, "listener leaked: never released");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/listeners.rs"]
mod tests;
