//! Host shell calls (Telegram mini-app WebApp object)
//!
//! Every call is best-effort: a missing object or a throwing method is
//! logged at debug level and otherwise ignored.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Haptic notification kinds sent to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Success,
}

impl Notification {
    fn as_str(&self) -> &'static str {
        match self {
            Notification::Success => "success",
        }
    }
}

/// Haptic impact strengths sent to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Light,
}

impl Impact {
    fn as_str(&self) -> &'static str {
        match self {
            Impact::Light => "light",
        }
    }
}

/// `window.Telegram.WebApp`, if the page runs inside the host
fn web_app() -> Option<JsValue> {
    let window = web_sys::window()?;
    let telegram = Reflect::get(&window, &"Telegram".into()).ok()?;
    if telegram.is_undefined() || telegram.is_null() {
        return None;
    }
    let app = Reflect::get(&telegram, &"WebApp".into()).ok()?;
    (!app.is_undefined() && !app.is_null()).then_some(app)
}

/// Call `target[name](arg?)` if it is a function
fn call(target: &JsValue, name: &str, arg: Option<&str>) {
    let Ok(method) = Reflect::get(target, &name.into()) else {
        return;
    };
    let Some(method) = method.dyn_ref::<Function>() else {
        log::debug!("Host shell has no {name}()");
        return;
    };
    let result = match arg {
        Some(arg) => method.call1(target, &arg.into()),
        None => method.call0(target),
    };
    if let Err(e) = result {
        log::debug!("Host shell {name}() failed: {e:?}");
    }
}

/// Ask the host to give the app the full screen height
pub fn expand() {
    if let Some(app) = web_app() {
        call(&app, "expand", None);
    }
}

fn haptics() -> Option<JsValue> {
    let app = web_app()?;
    let haptics = Reflect::get(&app, &"HapticFeedback".into()).ok()?;
    (!haptics.is_undefined() && !haptics.is_null()).then_some(haptics)
}

pub fn notification_occurred(kind: Notification) {
    if let Some(haptics) = haptics() {
        call(&haptics, "notificationOccurred", Some(kind.as_str()));
    }
}

pub fn impact_occurred(style: Impact) {
    if let Some(haptics) = haptics() {
        call(&haptics, "impactOccurred", Some(style.as_str()));
    }
}
