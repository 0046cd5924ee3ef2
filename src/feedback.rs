//! Success feedback (sound, haptics)
//!
//! Feedback is best-effort. Implementations swallow their own failures.

use crate::settings::Settings;
use crate::sim::ObjectKind;

/// Receives one call per object collected
pub trait Feedback {
    fn collected(&mut self, kind: ObjectKind);

    /// Pick up volume, mute and haptics changes
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Counts calls; handy for the native demo and tests
#[derive(Debug, Default, Clone)]
pub struct Tally {
    pub manholes: u32,
    pub stars: u32,
}

impl Feedback for Tally {
    fn collected(&mut self, kind: ObjectKind) {
        match kind {
            ObjectKind::Manhole => self.manholes += 1,
            ObjectKind::Star => self.stars += 1,
            ObjectKind::Obstacle => {}
        }
    }
}
