//! Per-frame simulation tick
//!
//! Builds the next snapshot from the previous one. Sub-passes run in a fixed
//! order, each over the whole object list: spawn, move, collide, evict,
//! jump trigger. Jump stepping is driven separately by `jump_frame`.

use rand::Rng;

use super::collision::{collide, evict};
use super::jump;
use super::movement::advance;
use super::spawn::spawn;
use super::state::{GameEvent, Snapshot};

/// Input sampled by the driver at frame time
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Host frame timestamp (ms)
    pub now_ms: f64,
    /// Latest tilt reading (degrees)
    pub tilt_deg: f32,
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

/// Advance the simulation by one tick
pub fn tick<R: Rng + ?Sized>(prev: &Snapshot, input: &TickInput, rng: &mut R) -> TickOutcome {
    let mut next = prev.clone();
    let mut events = Vec::new();

    if !next.playing {
        return TickOutcome {
            snapshot: next,
            events,
        };
    }

    next.time_ticks += 1;

    spawn(&mut next, input.now_ms, rng);
    advance(&mut next, input.tilt_deg);
    collide(&mut next, &mut events);
    evict(&mut next);
    if jump::trigger(&mut next) {
        events.push(GameEvent::JumpStarted);
    }

    TickOutcome {
        snapshot: next,
        events,
    }
}

/// Advance the jump arc by one animation frame
pub fn jump_frame(prev: &Snapshot) -> Snapshot {
    let mut next = prev.clone();
    next.hero.jump = jump::step(prev.hero.jump);
    next
}
