//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, fixed speed per tick
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod jump;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collide, evict};
pub use movement::advance;
pub use spawn::spawn;
pub use state::{
    GameEvent, Hero, JumpPhase, JumpState, LiveObject, ObjectKind, Rect, Snapshot,
};
pub use tick::{TickInput, TickOutcome, jump_frame, tick};
