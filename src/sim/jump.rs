//! Jump controller
//!
//! Grounded -> Rising -> Falling -> Grounded. The trigger is a look-ahead on
//! upcoming manholes; stepping runs once per animation frame.

use super::state::{JumpPhase, JumpState, ObjectKind, Snapshot};
use crate::consts::*;

/// True if an uncollected manhole is lined up inside the look-ahead band
pub fn manhole_ahead(state: &Snapshot) -> bool {
    let far = GAME_HEIGHT - JUMP_TRIGGER_FAR;
    let near = GAME_HEIGHT - JUMP_TRIGGER_NEAR;
    state.objects.iter().any(|o| {
        o.kind == ObjectKind::Manhole
            && !o.collected
            && o.pos.y > far
            && o.pos.y < near
            && (o.pos.x - state.hero.x).abs() < JUMP_ALIGN_TOLERANCE
    })
}

/// Start a jump if grounded and a manhole is coming. Returns true on takeoff.
pub fn trigger(state: &mut Snapshot) -> bool {
    if !state.playing || state.hero.jump.is_jumping() || !manhole_ahead(state) {
        return false;
    }
    state.hero.jump = JumpState {
        phase: JumpPhase::Rising,
        height: 0.0,
    };
    true
}

/// Advance the arc by one animation frame
pub fn step(jump: JumpState) -> JumpState {
    match jump.phase {
        JumpPhase::Grounded => JumpState::default(),
        JumpPhase::Rising => {
            let height = (jump.height + JUMP_STEP).min(JUMP_PEAK);
            let phase = if height >= JUMP_PEAK {
                JumpPhase::Falling
            } else {
                JumpPhase::Rising
            };
            JumpState { phase, height }
        }
        JumpPhase::Falling => {
            let height = (jump.height - JUMP_STEP).max(0.0);
            if height <= 0.0 {
                JumpState::default()
            } else {
                JumpState {
                    phase: JumpPhase::Falling,
                    height,
                }
            }
        }
    }
}
