//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, a manual queue elsewhere)
//! - Orientation sensor access
//! - Host shell calls (fullscreen expand, haptics)

#[cfg(target_arch = "wasm32")]
pub mod telegram;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked with the host frame timestamp (ms)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host per-frame callback source
pub trait FrameScheduler {
    /// Identifies a pending request for cancellation
    type Handle;

    /// Schedule `callback` for the next frame. None if the host refused.
    fn request(&self, callback: FrameCallback) -> Option<Self::Handle>;

    /// Drop a pending request; a no-op if it already fired
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Default)]
struct ManualQueue {
    next_id: u64,
    pending: Vec<(u64, FrameCallback)>,
}

/// Frame scheduler driven by explicit `fire` calls (tests, native demo)
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Run every callback requested before this frame began.
    ///
    /// Requests made while firing wait for the next call. Cancelling a
    /// callback that belongs to the current frame still prevents it.
    pub fn fire(&self, time_ms: f64) -> usize {
        let frame_end = self.queue.borrow().next_id;
        let mut fired = 0;
        loop {
            let callback = {
                let mut queue = self.queue.borrow_mut();
                match queue.pending.iter().position(|(id, _)| *id < frame_end) {
                    Some(i) => queue.pending.remove(i).1,
                    None => break,
                }
            };
            callback(time_ms);
            fired += 1;
        }
        fired
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request(&self, callback: FrameCallback) -> Option<u64> {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.pending.push((id, callback));
        Some(id)
    }

    fn cancel(&self, handle: u64) {
        self.queue.borrow_mut().pending.retain(|(id, _)| *id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_requests_made_while_firing_wait() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));

        let (s, h) = (scheduler.clone(), hits.clone());
        scheduler.request(Box::new(move |_| {
            h.set(h.get() + 1);
            let h2 = h.clone();
            s.request(Box::new(move |_| h2.set(h2.get() + 1)));
        }));

        assert_eq!(scheduler.fire(0.0), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.fire(16.0), 1);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_cancelled_callback_never_runs() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = scheduler.request(Box::new(move |_| h.set(1))).unwrap();
        scheduler.cancel(handle);
        assert_eq!(scheduler.fire(0.0), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_cancel_within_same_frame() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        let (s, v) = (scheduler.clone(), victim.clone());
        scheduler.request(Box::new(move |_| {
            if let Some(handle) = v.get() {
                s.cancel(handle);
            }
        }));
        let h = hits.clone();
        victim.set(scheduler.request(Box::new(move |_| h.set(1))));

        scheduler.fire(0.0);
        assert_eq!(hits.get(), 0);
    }
}
