//! Road scrolling and hero steering

use super::state::Snapshot;
use crate::consts::*;
use crate::{lane_for_tilt, lane_target_x};

/// Scroll objects and background, steer the hero toward the tilt lane.
pub fn advance(state: &mut Snapshot, tilt_deg: f32) {
    if !state.playing {
        return;
    }

    for obj in &mut state.objects {
        obj.pos.y += GAME_SPEED;
    }
    state.road_offset = (state.road_offset + GAME_SPEED) % ROAD_TILE;

    let target = lane_target_x(lane_for_tilt(tilt_deg));
    state.hero.x = steer_toward(state.hero.x, target);
}

/// Exponential smoothing step; never overshoots the target
#[inline]
pub fn steer_toward(x: f32, target: f32) -> f32 {
    x + (target - x) * HERO_SMOOTHING
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{LiveObject, ObjectKind};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing() -> Snapshot {
        Snapshot::started(&Snapshot::default())
    }

    #[test]
    fn test_objects_scroll_by_game_speed() {
        let mut state = playing();
        let id = state.next_entity_id();
        state
            .objects
            .push(LiveObject::new(id, ObjectKind::Manhole, Vec2::new(10.0, -50.0)));
        advance(&mut state, 0.0);
        assert_eq!(state.objects[0].pos.y, -50.0 + GAME_SPEED);
        assert_eq!(state.objects[0].pos.x, 10.0);
    }

    #[test]
    fn test_road_offset_wraps() {
        let mut state = playing();
        state.road_offset = ROAD_TILE - 1.0;
        advance(&mut state, 0.0);
        assert!((state.road_offset - (GAME_SPEED - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_idle_ignores_tilt() {
        let mut state = Snapshot::default();
        let before = state.hero.x;
        advance(&mut state, 60.0);
        assert_eq!(state.hero.x, before);
        assert_eq!(state.road_offset, 0.0);
    }

    #[test]
    fn test_right_tilt_converges_on_right_lane() {
        let mut state = playing();
        let target = lane_target_x(LANE_COUNT - 1);
        for _ in 0..200 {
            advance(&mut state, 60.0);
            assert!(state.hero.x <= target + 1e-3);
            assert!(state.hero.x + HERO_SIZE <= GAME_WIDTH);
        }
        assert!((state.hero.x - target).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_hero_stays_in_bounds(tilts in prop::collection::vec(-90.0f32..90.0, 1..300)) {
            let mut state = playing();
            for tilt in tilts {
                advance(&mut state, tilt);
                prop_assert!(state.hero.x >= 0.0);
                prop_assert!(state.hero.x + HERO_SIZE <= GAME_WIDTH);
            }
        }

        #[test]
        fn prop_steering_never_overshoots(x in 0.0f32..310.0, lane in 0usize..LANE_COUNT) {
            let target = lane_target_x(lane);
            let next = steer_toward(x, target);
            prop_assert!((target - next).abs() <= (target - x).abs());
            prop_assert!((next - x).signum() == (target - x).signum() || next == x);
        }
    }
}
