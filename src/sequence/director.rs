//! Foreground sequence plus named parallel lanes.
//!
//! A component owns one [`Director`]. `play` replaces the foreground sequence (interrupting it
//! first). Additive effects run in parallel lanes, which must not share targets with anything
//! else that is still playing.

use std::collections::{BTreeMap, BTreeSet};

use crate::animation::property::TargetId;
use crate::animation::stage::{FrameWrites, Stage};
use crate::foundation::error::{GlideError, GlideResult};
use crate::sequence::player::{SequenceEvent, SequencePlayer};
use crate::sequence::timeline::Sequence;

#[derive(Clone, Debug, Default)]
struct Lane {
    footprint: BTreeSet<TargetId>,
    player: SequencePlayer,
}

impl Lane {
    fn overlaps(&self, footprint: &BTreeSet<TargetId>) -> bool {
        self.player.is_active() && !self.footprint.is_disjoint(footprint)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Director {
    foreground: Lane,
    lanes: BTreeMap<String, Lane>,
}

impl Director {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground(&self) -> &SequencePlayer {
        &self.foreground.player
    }

    pub fn lane(&self, name: &str) -> Option<&SequencePlayer> {
        self.lanes.get(name).map(|l| &l.player)
    }

    pub fn is_active(&self) -> bool {
        self.foreground.player.is_active() || self.lanes.values().any(|l| l.player.is_active())
    }

    /// Replace the foreground sequence. Parallel lanes touching the same targets are
    /// interrupted as well.
    pub fn play(&mut self, sequence: &Sequence) -> GlideResult<()> {
        let footprint = sequence.footprint();
        self.foreground.player.play(sequence)?;
        for (name, lane) in &mut self.lanes {
            if lane.overlaps(&footprint) {
                tracing::debug!(lane = %name, "parallel lane interrupted by foreground play");
                lane.player.interrupt();
            }
        }
        self.foreground.footprint = footprint;
        Ok(())
    }

    /// Start (or restart) the named parallel lane.
    pub fn play_parallel(&mut self, name: &str, sequence: &Sequence) -> GlideResult<()> {
        let footprint = sequence.footprint();
        if self.foreground.overlaps(&footprint) {
            return Err(GlideError::contract(format!(
                "parallel lane `{name}` shares targets with the foreground sequence"
            )));
        }
        if let Some((other, _)) = self
            .lanes
            .iter()
            .find(|(other, lane)| other.as_str() != name && lane.overlaps(&footprint))
        {
            return Err(GlideError::contract(format!(
                "parallel lane `{name}` shares targets with lane `{other}`"
            )));
        }

        let lane = self.lanes.entry(name.to_owned()).or_default();
        lane.player.play(sequence)?;
        lane.footprint = footprint;
        Ok(())
    }

    pub fn interrupt(&mut self) {
        self.foreground.player.interrupt();
    }

    pub fn interrupt_lane(&mut self, name: &str) {
        if let Some(lane) = self.lanes.get_mut(name) {
            lane.player.interrupt();
        }
    }

    pub fn interrupt_all(&mut self) {
        self.foreground.player.interrupt();
        for lane in self.lanes.values_mut() {
            lane.player.interrupt();
        }
    }

    /// Advance parallel lanes, then the foreground. Lanes that stopped playing are dropped.
    pub fn advance(&mut self, dt: f64, stage: &Stage, out: &mut FrameWrites) -> Vec<SequenceEvent> {
        let mut events = Vec::new();
        for lane in self.lanes.values_mut() {
            events.extend(lane.player.advance(dt, stage, out));
        }
        self.lanes.retain(|_, l| l.player.is_active());
        events.extend(self.foreground.player.advance(dt, stage, out));
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/director.rs"]
mod tests;
