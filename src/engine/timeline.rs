//! Presentation pacing for an event list.
//!
//! The engine applies every mutation immediately. This module only suggests
//! when a host should start animating each event so the playback reads
//! naturally: blasts first (bomb chains staggered by `chain_delay_secs`),
//! then falls, then refill drops staggered per column.

use std::collections::HashMap;

use serde::Serialize;

use super::events::MutationEvent;
use crate::board::TileKind;
use crate::core::config::AnimationTiming;

/// An event with a suggested start offset and duration, in seconds from the
/// moment the activation was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedEvent {
    pub event: MutationEvent,
    pub start_secs: f32,
    pub duration_secs: f32,
}

impl TimedEvent {
    pub fn end_secs(&self) -> f32 {
        self.start_secs + self.duration_secs
    }
}

/// Attach pacing hints to `events`, preserving their order.
pub fn plan_timeline(events: &[MutationEvent], timing: &AnimationTiming) -> Vec<TimedEvent> {
    let mut timed = Vec::with_capacity(events.len());
    let mut blast_clock = 0.0_f32;
    let mut spawns_per_column: HashMap<usize, usize> = HashMap::new();

    for event in events {
        let fall_start = blast_clock + timing.fall_delay_secs;
        let (start_secs, duration_secs) = match event {
            MutationEvent::Exploded { .. } => {
                let start = blast_clock;
                blast_clock += timing.chain_delay_secs;
                (start, timing.blast_secs)
            }
            MutationEvent::Destroyed { .. }
            | MutationEvent::ObstacleDamaged { .. }
            | MutationEvent::Spawned {
                kind: TileKind::Bomb,
                ..
            } => (blast_clock, timing.blast_secs),
            MutationEvent::Moved { .. } => (fall_start, timing.fall_secs),
            MutationEvent::Spawned { pos, .. } => {
                let index = spawns_per_column.entry(pos.col).or_insert(0);
                let start =
                    fall_start + timing.fall_secs + *index as f32 * timing.spawn_delay_secs;
                *index += 1;
                (start, timing.fall_secs)
            }
        };

        timed.push(TimedEvent {
            event: *event,
            start_secs,
            duration_secs,
        });
    }

    timed
}

/// Time until the last suggested animation has finished.
pub fn total_duration(timeline: &[TimedEvent]) -> f32 {
    timeline
        .iter()
        .map(TimedEvent::end_secs)
        .fold(0.0, f32::max)
}
