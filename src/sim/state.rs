//! Simulation snapshot and core types
//!
//! A `Snapshot` is immutable once published by the driver. Every tick builds
//! the next one from the previous one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_target_x;

/// Road object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Roadblock - harmless, never collected
    Obstacle,
    /// Safe hazard - counts only when landed on mid-jump
    Manhole,
    /// Bonus - always collected on contact
    Star,
}

/// A road object scrolling toward the hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveObject {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObjectKind,
    /// Flips to true at most once
    pub collected: bool,
}

impl LiveObject {
    pub fn new(id: u32, kind: ObjectKind, pos: Vec2) -> Self {
        let size = match kind {
            ObjectKind::Obstacle | ObjectKind::Manhole => Vec2::new(GROUND_WIDTH, GROUND_HEIGHT),
            ObjectKind::Star => Vec2::splat(STAR_SIZE),
        };
        Self {
            id,
            pos,
            size,
            kind,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Jump controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Rising,
    Falling,
}

/// Vertical jump offset and its phase
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JumpState {
    pub phase: JumpPhase,
    /// Height above the baseline, in [0, JUMP_PEAK]
    pub height: f32,
}

impl JumpState {
    pub fn is_jumping(&self) -> bool {
        self.phase != JumpPhase::Grounded
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Left edge
    pub x: f32,
    /// Top edge when grounded
    pub y: f32,
    pub jump: JumpState,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            x: lane_target_x(LANE_COUNT / 2),
            y: HERO_BASELINE_Y,
            jump: JumpState::default(),
        }
    }
}

impl Hero {
    /// Bounding box, lifted by the current jump height
    pub fn rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.y - self.jump.height),
            Vec2::splat(HERO_SIZE),
        )
    }
}

/// Events emitted by a tick, consumed by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An object flipped to collected this tick
    Collected { id: u32, kind: ObjectKind },
    /// The hero left the ground
    JumpStarted,
}

/// Complete renderable simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hero: Hero,
    /// Live objects in spawn order
    pub objects: Vec<LiveObject>,
    pub score: u64,
    pub stars: u32,
    pub playing: bool,
    /// Background scroll offset in [0, ROAD_TILE)
    pub road_offset: f32,
    /// Timestamp of the last spawn wave (None until the first tick after start)
    pub last_spawn_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            hero: Hero::default(),
            objects: Vec::new(),
            score: 0,
            stars: 0,
            playing: false,
            road_offset: 0.0,
            last_spawn_ms: None,
            time_ticks: 0,
            next_id: 1,
        }
    }
}

impl Snapshot {
    /// Fresh playing state. Hero x is kept so a restart does not teleport.
    pub fn started(prev: &Snapshot) -> Self {
        Self {
            hero: Hero {
                x: prev.hero.x,
                ..Hero::default()
            },
            playing: true,
            next_id: prev.next_id,
            ..Self::default()
        }
    }

    /// Copy with ticking halted; everything else is preserved for display
    pub fn stopped(&self) -> Self {
        Self {
            playing: false,
            ..self.clone()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn find(&self, id: u32) -> Option<&LiveObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}
