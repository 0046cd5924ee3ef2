//! Browser implementations: requestAnimationFrame and deviceorientation

use std::future::Future;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DeviceOrientationEvent, Window};

use super::{FrameCallback, FrameScheduler};
use crate::tilt::{OrientationBackend, OrientationSample, Permission, TiltError};

/// Frame scheduler backed by `window.requestAnimationFrame`
#[derive(Clone, Default)]
pub struct RafScheduler;

/// A pending animation frame. Owns its closure so cancelling frees it.
pub struct RafFrame {
    id: i32,
    _closure: Closure<dyn FnMut(f64)>,
}

impl FrameScheduler for RafScheduler {
    type Handle = RafFrame;

    fn request(&self, callback: FrameCallback) -> Option<RafFrame> {
        let window = web_sys::window()?;
        let closure: Closure<dyn FnMut(f64)> = Closure::once(move |time: f64| callback(time));
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => Some(RafFrame {
                id,
                _closure: closure,
            }),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel(&self, frame: RafFrame) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(frame.id);
        }
    }
}

/// `DeviceOrientationEvent` constructor, if the browser has one
fn orientation_class() -> Option<JsValue> {
    let window = web_sys::window()?;
    let class = Reflect::get(&window, &"DeviceOrientationEvent".into()).ok()?;
    (!class.is_undefined()).then_some(class)
}

/// iOS 13+ style consent gate
fn permission_fn() -> Option<(JsValue, Function)> {
    let class = orientation_class()?;
    let method = Reflect::get(&class, &"requestPermission".into()).ok()?;
    let method = method.dyn_into::<Function>().ok()?;
    Some((class, method))
}

/// Orientation sensor via `deviceorientation` events
#[derive(Default)]
pub struct WebOrientation;

/// Attached listener; dropping it removes the listener
pub struct OrientationListener {
    window: Window,
    closure: Closure<dyn FnMut(DeviceOrientationEvent)>,
}

impl Drop for OrientationListener {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "deviceorientation",
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

impl OrientationBackend for WebOrientation {
    type Subscription = OrientationListener;

    fn is_supported(&self) -> bool {
        orientation_class().is_some()
    }

    fn requires_permission(&self) -> bool {
        permission_fn().is_some()
    }

    fn request_permission(&self) -> impl Future<Output = Result<Permission, TiltError>> {
        let prompt = permission_fn().map(|(class, method)| method.call0(&class));
        async move {
            let promise = match prompt {
                // No gate on this platform
                None => return Ok(Permission::Granted),
                Some(Ok(value)) => Promise::resolve(&value),
                Some(Err(e)) => return Err(TiltError::ListenerFailure(format!("{e:?}"))),
            };
            let answer = JsFuture::from(promise)
                .await
                .map_err(|e| TiltError::ListenerFailure(format!("{e:?}")))?;
            if answer.as_string().as_deref() == Some("granted") {
                Ok(Permission::Granted)
            } else {
                Ok(Permission::Denied)
            }
        }
    }

    fn subscribe(
        &self,
        mut on_sample: Box<dyn FnMut(OrientationSample)>,
    ) -> Result<OrientationListener, TiltError> {
        let window =
            web_sys::window().ok_or_else(|| TiltError::ListenerFailure("no window".into()))?;
        let closure = Closure::<dyn FnMut(DeviceOrientationEvent)>::new(
            move |event: DeviceOrientationEvent| {
                on_sample(OrientationSample {
                    alpha: event.alpha(),
                    beta: event.beta(),
                    gamma: event.gamma(),
                });
            },
        );
        window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref())
            .map_err(|e| TiltError::ListenerFailure(format!("{e:?}")))?;
        Ok(OrientationListener { window, closure })
    }
}
