//! Browser bridge
//!
//! The page owns sprites, sounds and the DOM. It forwards arrow keys, d-pad
//! buttons, rock clicks and resizes here, and reads back JSON directives
//! to render.

use wasm_bindgen::prelude::*;

use crate::catalog::ContentCatalog;
use crate::config::LevelConfig;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::journal::FieldJournal;
use crate::placement::Viewport;
use crate::presentation;
use crate::sim::{MovementIntent, Session};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Little Doug starting...");
}

/// One level, driven from JavaScript
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    journal: FieldJournal,
    keys: MovementIntent,
    touch: MovementIntent,
    accumulator: f32,
}

#[wasm_bindgen]
impl WebSession {
    /// `config_json` may be empty for the classic level
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, width: f32, height: f32) -> Result<WebSession, JsError> {
        let config = if config_json.trim().is_empty() {
            LevelConfig::classic()
        } else {
            LevelConfig::from_json(config_json)?
        };
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            config,
            ContentCatalog::stream_catalog(),
            Viewport::new(width, height),
            seed,
        )?;

        Ok(Self {
            session,
            journal: FieldJournal::new(),
            keys: MovementIntent::default(),
            touch: MovementIntent::default(),
            accumulator: 0.0,
        })
    }

    pub fn set_keys(&mut self, left: bool, right: bool, up: bool, down: bool) {
        self.keys = MovementIntent { left, right, up, down };
    }

    pub fn set_touch(&mut self, left: bool, right: bool, up: bool, down: bool) {
        self.touch = MovementIntent { left, right, up, down };
    }

    /// Advance movement by a frame's worth of seconds
    pub fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);
        let intent = self.keys.merge(self.touch);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.session.tick(&intent, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Rock clicked. Returns the interaction result as JSON.
    pub fn flip(&mut self, object_id: usize) -> Result<String, JsError> {
        let pos = self.session.player().position;
        let result = self.session.try_attempt_interaction(object_id, pos)?;
        Ok(serde_json::to_string(&result)?)
    }

    /// Directives since the last call, as a JSON array
    pub fn drain(&mut self) -> Result<String, JsError> {
        let directives = self.session.drain_directives();
        let json = serde_json::to_string(&directives)?;
        presentation::dispatch(directives, &mut self.journal);
        Ok(json)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(Viewport::new(width, height));
    }

    pub fn restart(&mut self) {
        let seed = js_sys::Date::now() as u64;
        self.session.reset(seed);
        self.journal = FieldJournal::new();
        self.accumulator = 0.0;
        log::info!("Started new level with seed: {}", seed);
    }

    pub fn objects_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.objects())?)
    }

    pub fn scenery_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.scenery())?)
    }

    pub fn journal_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.journal)?)
    }

    pub fn score_label(&self) -> String {
        self.journal.score_label()
    }

    pub fn summary_text(&self) -> Option<String> {
        self.journal.summary_text()
    }

    pub fn player_x(&self) -> f32 {
        self.session.player().position.x
    }

    pub fn player_y(&self) -> f32 {
        self.session.player().position.y
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }
}
