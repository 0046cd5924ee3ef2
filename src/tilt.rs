//! Device tilt source
//!
//! Wraps a platform orientation sensor behind a permission flow and exposes
//! the left-right tilt (gamma axis) as a single scalar. The scalar lives in a
//! shared `Cell` so sensor callbacks replace it without coordinating with the
//! simulation, which samples it once per tick.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

use crate::consts::TILT_LIMIT_DEG;

/// Tilt source failures. All are non-fatal: the game stays playable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiltError {
    /// Platform has no orientation sensor
    #[error("orientation sensor is not supported on this device")]
    Unsupported,
    /// User declined the consent prompt
    #[error("permission to use the orientation sensor was denied")]
    PermissionDenied,
    /// Runtime failure while prompting or attaching the listener
    #[error("failed to start the orientation sensor: {0}")]
    ListenerFailure(String),
}

impl TiltError {
    /// Only a denied prompt is worth asking again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TiltError::PermissionDenied)
    }

    /// Listener failures are shown to the user as an unsupported sensor
    pub fn user_facing(&self) -> TiltError {
        match self {
            TiltError::ListenerFailure(_) => TiltError::Unsupported,
            other => other.clone(),
        }
    }
}

/// Outcome of a consent prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Raw orientation event; any axis may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationSample {
    /// Rotation around z (0..360)
    pub alpha: Option<f64>,
    /// Front-back tilt (-180..180)
    pub beta: Option<f64>,
    /// Left-right tilt (-90..90)
    pub gamma: Option<f64>,
}

impl OrientationSample {
    /// Horizontal tilt in degrees; missing reads as neutral
    pub fn tilt_deg(&self) -> f32 {
        normalize_tilt(self.gamma.unwrap_or(0.0) as f32)
    }
}

/// Clamp to the sensor range, mapping NaN to neutral
#[inline]
pub fn normalize_tilt(deg: f32) -> f32 {
    if deg.is_finite() {
        deg.clamp(-TILT_LIMIT_DEG, TILT_LIMIT_DEG)
    } else {
        0.0
    }
}

/// Platform sensor access
pub trait OrientationBackend {
    /// Listener registration; dropping it must remove the listener
    type Subscription;

    fn is_supported(&self) -> bool;

    /// Platform gates the sensor behind an explicit consent prompt
    fn requires_permission(&self) -> bool;

    fn request_permission(&self) -> impl Future<Output = Result<Permission, TiltError>>;

    fn subscribe(
        &self,
        on_sample: Box<dyn FnMut(OrientationSample)>,
    ) -> Result<Self::Subscription, TiltError>;
}

/// Shared handle to the latest tilt reading
#[derive(Debug, Clone, Default)]
pub struct TiltReader(Rc<Cell<f32>>);

impl TiltReader {
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, deg: f32) {
        self.0.set(normalize_tilt(deg));
    }
}

/// Status view for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TiltStatus {
    pub supported: bool,
    pub enabled: bool,
    pub error: Option<String>,
    pub reading: f32,
}

/// Orientation sensor with support/enabled/error tracking
pub struct TiltSource<B: OrientationBackend> {
    backend: B,
    reader: TiltReader,
    supported: bool,
    error: RefCell<Option<TiltError>>,
    subscription: RefCell<Option<B::Subscription>>,
}

impl<B: OrientationBackend> TiltSource<B> {
    pub fn new(backend: B) -> Self {
        let supported = backend.is_supported();
        let error = if supported {
            None
        } else {
            log::warn!("Orientation sensor unavailable - tilt steering disabled");
            Some(TiltError::Unsupported)
        };
        Self {
            backend,
            reader: TiltReader::default(),
            supported,
            error: RefCell::new(error),
            subscription: RefCell::new(None),
        }
    }

    /// Current tilt (0 until the first sensor event)
    pub fn reading(&self) -> f32 {
        self.reader.get()
    }

    /// Handle for the simulation to sample each tick
    pub fn reader(&self) -> TiltReader {
        self.reader.clone()
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    pub fn error(&self) -> Option<TiltError> {
        self.error.borrow().clone()
    }

    pub fn status(&self) -> TiltStatus {
        TiltStatus {
            supported: self.supported,
            enabled: self.is_enabled(),
            error: self.error().map(|e| e.user_facing().to_string()),
            reading: self.reading(),
        }
    }

    /// Prompt for consent where required, then start listening.
    ///
    /// A no-op once enabled. Failures land in the error slot and are returned.
    /// No borrow is held across the prompt, so status reads stay valid.
    pub async fn request_permission(&self) -> Result<(), TiltError> {
        if self.is_enabled() {
            return Ok(());
        }
        if !self.supported {
            return self.fail(TiltError::Unsupported);
        }

        if self.backend.requires_permission() {
            match self.backend.request_permission().await {
                Ok(Permission::Granted) => log::info!("Orientation permission granted"),
                Ok(Permission::Denied) => {
                    log::info!("Orientation permission denied");
                    return self.fail(TiltError::PermissionDenied);
                }
                Err(e) => {
                    log::error!("Orientation permission prompt failed: {e}");
                    return self.fail(e);
                }
            }
        }

        let reader = self.reader.clone();
        let on_sample = Box::new(move |sample: OrientationSample| {
            reader.0.set(sample.tilt_deg());
        });
        match self.backend.subscribe(on_sample) {
            Ok(subscription) => {
                *self.subscription.borrow_mut() = Some(subscription);
                *self.error.borrow_mut() = None;
                log::info!("Orientation listener attached");
                Ok(())
            }
            Err(e) => {
                log::error!("Orientation listener failed: {e}");
                self.fail(e)
            }
        }
    }

    /// Remove the listener; the reading freezes at its last value
    pub fn detach(&self) {
        // Take first so the subscription drops outside the borrow
        let subscription = self.subscription.borrow_mut().take();
        if subscription.is_some() {
            log::info!("Orientation listener detached");
        }
    }

    fn fail(&self, error: TiltError) -> Result<(), TiltError> {
        *self.error.borrow_mut() = Some(error.clone());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    type Listener = Rc<RefCell<Option<Box<dyn FnMut(OrientationSample)>>>>;

    struct FakeBackend {
        supported: bool,
        gate: Option<Result<Permission, TiltError>>,
        fail_subscribe: bool,
        listener: Listener,
        prompts: Rc<Cell<u32>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                supported: true,
                gate: None,
                fail_subscribe: false,
                listener: Rc::new(RefCell::new(None)),
                prompts: Rc::new(Cell::new(0)),
            }
        }

        fn gated(answer: Result<Permission, TiltError>) -> Self {
            Self {
                gate: Some(answer),
                ..Self::new()
            }
        }
    }

    struct FakeSubscription(Listener);

    impl Drop for FakeSubscription {
        fn drop(&mut self) {
            self.0.borrow_mut().take();
        }
    }

    impl OrientationBackend for FakeBackend {
        type Subscription = FakeSubscription;

        fn is_supported(&self) -> bool {
            self.supported
        }

        fn requires_permission(&self) -> bool {
            self.gate.is_some()
        }

        fn request_permission(&self) -> impl Future<Output = Result<Permission, TiltError>> {
            self.prompts.set(self.prompts.get() + 1);
            let answer = self.gate.clone().unwrap_or(Ok(Permission::Granted));
            async move { answer }
        }

        fn subscribe(
            &self,
            on_sample: Box<dyn FnMut(OrientationSample)>,
        ) -> Result<FakeSubscription, TiltError> {
            if self.fail_subscribe {
                return Err(TiltError::ListenerFailure("listener rejected".into()));
            }
            *self.listener.borrow_mut() = Some(on_sample);
            Ok(FakeSubscription(self.listener.clone()))
        }
    }

    fn emit(listener: &Listener, gamma: Option<f64>) {
        if let Some(cb) = listener.borrow_mut().as_mut() {
            cb(OrientationSample {
                alpha: Some(10.0),
                beta: Some(-5.0),
                gamma,
            });
        }
    }

    #[test]
    fn test_defaults_before_events() {
        let source = TiltSource::new(FakeBackend::new());
        assert_eq!(source.reading(), 0.0);
        assert!(source.is_supported());
        assert!(!source.is_enabled());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_unsupported_platform() {
        let backend = FakeBackend {
            supported: false,
            ..FakeBackend::new()
        };
        let source = TiltSource::new(backend);
        assert_eq!(source.error(), Some(TiltError::Unsupported));
        assert_eq!(
            block_on(source.request_permission()),
            Err(TiltError::Unsupported)
        );
        assert!(!source.is_enabled());
    }

    #[test]
    fn test_ungated_platform_listens_immediately() {
        let backend = FakeBackend::new();
        let listener = backend.listener.clone();
        let prompts = backend.prompts.clone();
        let source = TiltSource::new(backend);

        assert!(block_on(source.request_permission()).is_ok());
        assert!(source.is_enabled());
        assert_eq!(prompts.get(), 0);

        emit(&listener, Some(33.5));
        assert_eq!(source.reading(), 33.5);
        emit(&listener, None);
        assert_eq!(source.reading(), 0.0);
    }

    #[test]
    fn test_grant_enables_and_clears_error() {
        let backend = FakeBackend::gated(Ok(Permission::Granted));
        let prompts = backend.prompts.clone();
        let source = TiltSource::new(backend);
        *source.error.borrow_mut() = Some(TiltError::PermissionDenied);

        assert!(block_on(source.request_permission()).is_ok());
        assert!(source.is_enabled());
        assert!(source.error().is_none());
        assert_eq!(prompts.get(), 1);

        // Second request is a no-op
        assert!(block_on(source.request_permission()).is_ok());
        assert_eq!(prompts.get(), 1);
    }

    #[test]
    fn test_denial_is_recoverable() {
        let source = TiltSource::new(FakeBackend::gated(Ok(Permission::Denied)));
        let err = block_on(source.request_permission()).unwrap_err();
        assert_eq!(err, TiltError::PermissionDenied);
        assert!(err.is_recoverable());
        assert!(!source.is_enabled());
        assert_eq!(source.error(), Some(TiltError::PermissionDenied));
    }

    #[test]
    fn test_listener_failure_reads_as_unsupported() {
        let backend = FakeBackend {
            fail_subscribe: true,
            ..FakeBackend::new()
        };
        let source = TiltSource::new(backend);
        let err = block_on(source.request_permission()).unwrap_err();
        assert!(matches!(err, TiltError::ListenerFailure(_)));
        assert!(!err.is_recoverable());
        assert_eq!(err.user_facing(), TiltError::Unsupported);
        assert_eq!(
            source.status().error,
            Some(TiltError::Unsupported.to_string())
        );
    }

    #[test]
    fn test_detach_stops_updates() {
        let backend = FakeBackend::new();
        let listener = backend.listener.clone();
        let source = TiltSource::new(backend);
        block_on(source.request_permission()).unwrap();

        emit(&listener, Some(-20.0));
        source.detach();
        assert!(!source.is_enabled());
        assert!(listener.borrow().is_none());

        emit(&listener, Some(45.0));
        assert_eq!(source.reading(), -20.0);
    }

    #[test]
    fn test_drop_detaches() {
        let backend = FakeBackend::new();
        let listener = backend.listener.clone();
        let source = TiltSource::new(backend);
        block_on(source.request_permission()).unwrap();
        drop(source);
        assert!(listener.borrow().is_none());
    }

    #[test]
    fn test_out_of_range_tilt_is_clamped() {
        let reader = TiltReader::default();
        reader.set(170.0);
        assert_eq!(reader.get(), TILT_LIMIT_DEG);
        reader.set(f32::NAN);
        assert_eq!(reader.get(), 0.0);
    }
}
