//! Hero/object collision, scoring and eviction
//!
//! Scoring counts flips of the `collected` flag during this pass, so an
//! object can contribute at most once over its lifetime.

use super::state::{GameEvent, ObjectKind, Snapshot};
use crate::consts::*;

/// Test the hero against every uncollected object and apply success rules.
///
/// Newly collected objects are reported through `events` in spawn order.
pub fn collide(state: &mut Snapshot, events: &mut Vec<GameEvent>) {
    let hero = state.hero.rect();
    let jump_height = state.hero.jump.height;

    let mut manholes = 0u64;
    let mut stars = 0u32;

    for obj in state.objects.iter_mut().filter(|o| !o.collected) {
        if !hero.overlaps(&obj.rect()) {
            continue;
        }
        let success = match obj.kind {
            ObjectKind::Manhole => jump_height > JUMP_MIN_SUCCESS,
            ObjectKind::Star => true,
            ObjectKind::Obstacle => false,
        };
        if !success {
            continue;
        }

        obj.collected = true;
        match obj.kind {
            ObjectKind::Manhole => manholes += 1,
            ObjectKind::Star => stars += 1,
            ObjectKind::Obstacle => {}
        }
        events.push(GameEvent::Collected {
            id: obj.id,
            kind: obj.kind,
        });
    }

    state.score += manholes * MANHOLE_SCORE;
    state.stars += stars;
}

/// Drop objects that scrolled past the bottom margin, collected or not.
/// Returns the number removed.
pub fn evict(state: &mut Snapshot) -> usize {
    let before = state.objects.len();
    state
        .objects
        .retain(|o| o.pos.y < GAME_HEIGHT + EVICT_MARGIN);
    before - state.objects.len()
}
