//! Timer-gated road object generation

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{LiveObject, ObjectKind, Snapshot};
use crate::consts::*;
use crate::lane_ground_x;

/// Spawn a wave into `state` if the interval has elapsed.
///
/// The first call after start only records the baseline timestamp.
/// Returns the number of objects appended.
pub fn spawn<R: Rng + ?Sized>(state: &mut Snapshot, now_ms: f64, rng: &mut R) -> usize {
    if !state.playing {
        return 0;
    }

    let Some(last) = state.last_spawn_ms else {
        state.last_spawn_ms = Some(now_ms);
        return 0;
    };
    if now_ms - last < SPAWN_INTERVAL_MS {
        return 0;
    }

    let before = state.objects.len();
    for lane in pick_lanes(rng) {
        spawn_lane(state, lane, rng);
    }
    state.last_spawn_ms = Some(now_ms);

    state.objects.len() - before
}

/// One or two distinct lanes, in random order
pub fn pick_lanes<R: Rng + ?Sized>(rng: &mut R) -> Vec<usize> {
    let count = if rng.random_bool(TWO_LANE_CHANCE) { 2 } else { 1 };
    let mut lanes: Vec<usize> = (0..LANE_COUNT).collect();
    lanes.shuffle(rng);
    lanes.truncate(count);
    lanes
}

fn spawn_lane<R: Rng + ?Sized>(state: &mut Snapshot, lane: usize, rng: &mut R) {
    let x = lane_ground_x(lane);
    let kind = if rng.random_bool(OBSTACLE_CHANCE) {
        ObjectKind::Obstacle
    } else {
        ObjectKind::Manhole
    };

    let id = state.next_entity_id();
    state
        .objects
        .push(LiveObject::new(id, kind, Vec2::new(x, GROUND_SPAWN_Y)));

    // Every manhole carries a star above it
    if kind == ObjectKind::Manhole {
        let id = state.next_entity_id();
        state.objects.push(LiveObject::new(
            id,
            ObjectKind::Star,
            Vec2::new(x + STAR_OFFSET_X, STAR_SPAWN_Y),
        ));
    }
}
