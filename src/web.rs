//! JavaScript bindings for the host page
//!
//! The page owns rendering: it polls `snapshot()` each frame and draws it.

use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, SoundEffect};
use crate::driver::GameDriver;
use crate::feedback::Feedback;
use crate::platform::telegram::{self, Impact, Notification};
use crate::platform::web::{RafScheduler, WebOrientation};
use crate::puzzle::FifteenPuzzle as PuzzleModel;
use crate::settings::Settings;
use crate::sim::ObjectKind;
use crate::tilt::TiltSource;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Jumping Hero loaded");
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Chime plus host haptics for each collected object
struct WebFeedback {
    audio: AudioManager,
    haptics: bool,
}

impl Feedback for WebFeedback {
    fn collected(&mut self, kind: ObjectKind) {
        match kind {
            ObjectKind::Manhole => self.audio.play(SoundEffect::Success),
            ObjectKind::Star => self.audio.play(SoundEffect::Sparkle),
            ObjectKind::Obstacle => return,
        }
        if self.haptics {
            telegram::notification_occurred(Notification::Success);
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.audio.apply_settings(settings);
        self.haptics = settings.haptics;
    }
}

/// Jumping game session: tilt sensor plus simulation loop
#[wasm_bindgen]
pub struct JumpingGame {
    tilt: Rc<TiltSource<WebOrientation>>,
    driver: GameDriver<RafScheduler, WebFeedback>,
    settings: Settings,
}

#[wasm_bindgen]
impl JumpingGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JumpingGame {
        let settings = Settings::load();
        let tilt = Rc::new(TiltSource::new(WebOrientation));
        let feedback = WebFeedback {
            audio: AudioManager::new(&settings),
            haptics: settings.haptics,
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Jumping game created with seed: {}", seed);
        let driver = GameDriver::new(RafScheduler, tilt.reader(), feedback, seed);
        JumpingGame {
            tilt,
            driver,
            settings,
        }
    }

    /// Prompt for sensor access where required. Resolves to the status JSON.
    #[wasm_bindgen(js_name = requestPermission)]
    pub fn request_permission(&self) -> js_sys::Promise {
        let tilt = self.tilt.clone();
        let haptics = self.settings.haptics;
        wasm_bindgen_futures::future_to_promise(async move {
            if tilt.request_permission().await.is_ok() && haptics {
                telegram::impact_occurred(Impact::Light);
            }
            to_json(&tilt.status()).map(JsValue::from)
        })
    }

    /// Start (or restart) a run and expand the host shell
    pub fn start(&self) {
        self.driver.start();
        telegram::expand();
    }

    pub fn stop(&self) {
        self.driver.stop();
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.driver.is_playing()
    }

    /// Current simulation snapshot as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&*self.driver.snapshot())
    }

    /// Current preferences as JSON
    pub fn settings(&self) -> Result<String, JsValue> {
        to_json(&self.settings)
    }

    /// Replace, persist and apply preferences. Returns the applied JSON.
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<String, JsValue> {
        self.settings = Settings::replace_from_json(json);
        self.driver.apply_settings(&self.settings);
        to_json(&self.settings)
    }

    /// Sensor support/enabled/error/reading as JSON
    #[wasm_bindgen(js_name = tiltStatus)]
    pub fn tilt_status(&self) -> Result<String, JsValue> {
        to_json(&self.tilt.status())
    }
}

impl Default for JumpingGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JumpingGame {
    fn drop(&mut self) {
        // Driver drop cancels pending frames; the listener goes with the source
        self.driver.stop();
        self.tilt.detach();
    }
}

/// Fifteen puzzle session
#[wasm_bindgen]
pub struct FifteenPuzzle {
    game: PuzzleModel,
    rng: Pcg32,
}

#[wasm_bindgen]
impl FifteenPuzzle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FifteenPuzzle {
        FifteenPuzzle {
            game: PuzzleModel::default(),
            rng: Pcg32::seed_from_u64(js_sys::Date::now() as u64),
        }
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.game.new_game(&mut self.rng);
    }

    /// Returns true if a tile moved
    #[wasm_bindgen(js_name = clickTile)]
    pub fn click_tile(&mut self, row: usize, col: usize) -> bool {
        self.game.click(row, col)
    }

    #[wasm_bindgen(js_name = isTileMovable)]
    pub fn is_tile_movable(&self, row: usize, col: usize) -> bool {
        self.game.is_movable(row, col)
    }

    /// Rows of tile numbers, null for the blank
    pub fn board(&self) -> Result<String, JsValue> {
        to_json(&self.game.board.cells)
    }

    pub fn moves(&self) -> u32 {
        self.game.moves
    }

    #[wasm_bindgen(js_name = isWon)]
    pub fn is_won(&self) -> bool {
        self.game.won
    }

    #[wasm_bindgen(js_name = isStarted)]
    pub fn is_started(&self) -> bool {
        self.game.started
    }
}

impl Default for FifteenPuzzle {
    fn default() -> Self {
        Self::new()
    }
}
