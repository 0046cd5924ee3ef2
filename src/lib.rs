//! Jumping Hero - tilt-controlled road game for chat mini-apps
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, jump arc)
//! - `driver`: Frame loop that owns the snapshot and the scheduled callbacks
//! - `tilt`: Device orientation source with permission handling
//! - `puzzle`: Fifteen puzzle board model
//! - `platform`: Browser/native platform abstraction

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod feedback;
pub mod platform;
pub mod puzzle;
pub mod settings;
pub mod sim;
pub mod tilt;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::GameDriver;
pub use settings::Settings;
pub use tilt::{TiltError, TiltReader, TiltSource};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 350.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Road lanes
    pub const LANE_COUNT: usize = 3;
    pub const LANE_WIDTH: f32 = GAME_WIDTH / LANE_COUNT as f32;

    /// Hero sprite is square
    pub const HERO_SIZE: f32 = 40.0;
    /// Hero baseline row (top edge when grounded)
    pub const HERO_BASELINE_Y: f32 = GAME_HEIGHT - 100.0;
    /// Fraction of the remaining distance to the lane target covered per tick
    pub const HERO_SMOOTHING: f32 = 0.1;

    /// Scroll speed in units per tick (constant, no acceleration)
    pub const GAME_SPEED: f32 = 2.0;
    /// Road marking period for the background offset
    pub const ROAD_TILE: f32 = 100.0;

    /// Tilt angle that maps to the left edge of lane 0
    pub const TILT_OFFSET_DEG: f32 = 45.0;
    /// Degrees of tilt covered by each lane (3 lanes = 90 degree window)
    pub const TILT_DEG_PER_LANE: f32 = 30.0;
    /// Sensor range
    pub const TILT_LIMIT_DEG: f32 = 90.0;

    /// Minimum time between spawn waves
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Chance a wave fills two lanes instead of one
    pub const TWO_LANE_CHANCE: f64 = 0.5;
    /// Chance a lane gets a roadblock instead of a manhole
    pub const OBSTACLE_CHANCE: f64 = 0.3;

    /// Ground objects (manholes, roadblocks)
    pub const GROUND_WIDTH: f32 = 50.0;
    pub const GROUND_HEIGHT: f32 = 20.0;
    pub const GROUND_SPAWN_Y: f32 = -50.0;

    /// Stars float above manholes
    pub const STAR_SIZE: f32 = 20.0;
    pub const STAR_OFFSET_X: f32 = 15.0;
    pub const STAR_SPAWN_Y: f32 = -80.0;

    /// Objects are dropped once they are this far below the playfield
    pub const EVICT_MARGIN: f32 = 100.0;

    /// Jump arc
    pub const JUMP_STEP: f32 = 4.0;
    pub const JUMP_PEAK: f32 = 60.0;
    /// A manhole only counts if the hero is higher than this on contact
    pub const JUMP_MIN_SUCCESS: f32 = 20.0;
    /// Horizontal tolerance for the auto-jump look-ahead
    pub const JUMP_ALIGN_TOLERANCE: f32 = 30.0;
    /// Look-ahead band (distance above the playfield bottom)
    pub const JUMP_TRIGGER_FAR: f32 = 150.0;
    pub const JUMP_TRIGGER_NEAR: f32 = 100.0;

    /// Points per manhole landed
    pub const MANHOLE_SCORE: u64 = 10;
}

/// Lane index (0..LANE_COUNT) for a tilt reading in degrees
#[inline]
pub fn lane_for_tilt(tilt_deg: f32) -> usize {
    use consts::*;
    let bucket = ((tilt_deg + TILT_OFFSET_DEG) / TILT_DEG_PER_LANE).floor();
    bucket.clamp(0.0, (LANE_COUNT - 1) as f32) as usize
}

/// Hero x (left edge) that centers the hero in the given lane
#[inline]
pub fn lane_target_x(lane: usize) -> f32 {
    use consts::*;
    lane as f32 * LANE_WIDTH + LANE_WIDTH / 2.0 - HERO_SIZE / 2.0
}

/// Left edge of a ground object centered in the given lane
#[inline]
pub fn lane_ground_x(lane: usize) -> f32 {
    use consts::*;
    lane as f32 * LANE_WIDTH + LANE_WIDTH / 2.0 - GROUND_WIDTH / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_buckets() {
        assert_eq!(lane_for_tilt(-90.0), 0);
        assert_eq!(lane_for_tilt(-20.0), 0);
        assert_eq!(lane_for_tilt(0.0), 1);
        assert_eq!(lane_for_tilt(14.9), 1);
        assert_eq!(lane_for_tilt(15.0), 2);
        assert_eq!(lane_for_tilt(60.0), 2);
        assert_eq!(lane_for_tilt(90.0), 2);
    }

    #[test]
    fn test_lane_targets_fit_playfield() {
        for lane in 0..consts::LANE_COUNT {
            let x = lane_target_x(lane);
            assert!(x >= 0.0);
            assert!(x + consts::HERO_SIZE <= consts::GAME_WIDTH);
        }
    }
}
