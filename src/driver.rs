//! Game driver
//!
//! Owns the published snapshot, the RNG and the two frame loops: the
//! simulation tick and the jump animation. Every scheduled callback carries
//! the generation it was issued under; `stop`, `start` and drop bump the
//! generation and cancel pending requests, so a callback the host already
//! queued cannot touch a newer session.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::feedback::Feedback;
use crate::platform::FrameScheduler;
use crate::settings::Settings;
use crate::sim::{GameEvent, Snapshot, TickInput, jump_frame, tick};
use crate::tilt::TiltReader;

struct Inner<S: FrameScheduler, F> {
    snapshot: Rc<Snapshot>,
    rng: Pcg32,
    tilt: TiltReader,
    scheduler: S,
    feedback: F,
    generation: u64,
    sim_frame: Option<S::Handle>,
    jump_frame: Option<S::Handle>,
}

impl<S: FrameScheduler, F> Inner<S, F> {
    /// Invalidate outstanding callbacks and cancel their frame requests
    fn invalidate(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.sim_frame.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.jump_frame.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// Runs the simulation against a host frame scheduler
pub struct GameDriver<S: FrameScheduler + 'static, F: Feedback + 'static> {
    inner: Rc<RefCell<Inner<S, F>>>,
}

impl<S: FrameScheduler + 'static, F: Feedback + 'static> GameDriver<S, F> {
    pub fn new(scheduler: S, tilt: TiltReader, feedback: F, seed: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                snapshot: Rc::new(Snapshot::default()),
                rng: Pcg32::seed_from_u64(seed),
                tilt,
                scheduler,
                feedback,
                generation: 0,
                sim_frame: None,
                jump_frame: None,
            })),
        }
    }

    /// Latest published snapshot. Holders keep a consistent view.
    pub fn snapshot(&self) -> Rc<Snapshot> {
        self.inner.borrow().snapshot.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().snapshot.playing
    }

    pub fn feedback(&self) -> Ref<'_, F> {
        Ref::map(self.inner.borrow(), |inner| &inner.feedback)
    }

    /// Forward changed preferences to the feedback sink
    pub fn apply_settings(&self, settings: &Settings) {
        self.inner.borrow_mut().feedback.apply_settings(settings);
    }

    /// Reset score, stars and objects, then begin ticking
    pub fn start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.invalidate();
            inner.snapshot = Rc::new(Snapshot::started(&inner.snapshot));
        }
        log::info!("Game started");
        schedule_tick(&self.inner);
    }

    /// Halt ticking; the last snapshot stays readable
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.snapshot.playing {
            return;
        }
        inner.invalidate();
        inner.snapshot = Rc::new(inner.snapshot.stopped());
        log::info!(
            "Game stopped (score {}, stars {})",
            inner.snapshot.score,
            inner.snapshot.stars
        );
    }
}

impl<S: FrameScheduler + 'static, F: Feedback + 'static> Drop for GameDriver<S, F> {
    fn drop(&mut self) {
        self.inner.borrow_mut().invalidate();
    }
}

fn schedule_tick<S: FrameScheduler + 'static, F: Feedback + 'static>(
    inner: &Rc<RefCell<Inner<S, F>>>,
) {
    let weak: Weak<RefCell<Inner<S, F>>> = Rc::downgrade(inner);
    let generation = inner.borrow().generation;
    let handle = inner.borrow().scheduler.request(Box::new(move |now_ms| {
        if let Some(inner) = weak.upgrade() {
            on_tick(&inner, generation, now_ms);
        }
    }));
    if handle.is_none() {
        log::warn!("Host refused frame request - simulation paused");
    }
    inner.borrow_mut().sim_frame = handle;
}

fn schedule_jump<S: FrameScheduler + 'static, F: Feedback + 'static>(
    inner: &Rc<RefCell<Inner<S, F>>>,
) {
    let weak: Weak<RefCell<Inner<S, F>>> = Rc::downgrade(inner);
    let generation = inner.borrow().generation;
    let handle = inner.borrow().scheduler.request(Box::new(move |_now_ms| {
        if let Some(inner) = weak.upgrade() {
            on_jump_frame(&inner, generation);
        }
    }));
    inner.borrow_mut().jump_frame = handle;
}

fn on_tick<S: FrameScheduler + 'static, F: Feedback + 'static>(
    inner: &Rc<RefCell<Inner<S, F>>>,
    generation: u64,
    now_ms: f64,
) {
    let needs_jump_frame = {
        let mut guard = inner.borrow_mut();
        let state = &mut *guard;
        if state.generation != generation || !state.snapshot.playing {
            return;
        }
        state.sim_frame = None;

        let input = TickInput {
            now_ms,
            tilt_deg: state.tilt.get(),
        };
        let outcome = tick(&state.snapshot, &input, &mut state.rng);
        state.snapshot = Rc::new(outcome.snapshot);

        let mut jump_started = false;
        for event in outcome.events {
            match event {
                GameEvent::Collected { kind, .. } => state.feedback.collected(kind),
                GameEvent::JumpStarted => jump_started = true,
            }
        }
        jump_started && state.jump_frame.is_none()
    };

    if needs_jump_frame {
        schedule_jump(inner);
    }
    schedule_tick(inner);
}

fn on_jump_frame<S: FrameScheduler + 'static, F: Feedback + 'static>(
    inner: &Rc<RefCell<Inner<S, F>>>,
    generation: u64,
) {
    let airborne = {
        let mut state = inner.borrow_mut();
        if state.generation != generation {
            return;
        }
        state.jump_frame = None;
        state.snapshot = Rc::new(jump_frame(&state.snapshot));
        state.snapshot.playing && state.snapshot.hero.jump.is_jumping()
    };

    if airborne {
        schedule_jump(inner);
    }
}
