//! Browser binding.
//!
//! Page script owns the renderer and the DOM; it forwards menu clicks,
//! pointer events and loader callbacks here, and each animation frame reads
//! back a JSON [`FrameReport`](crate::FrameReport) to position the camera,
//! annotation overlays, cursor and loading screen.

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;
use web_time::Instant;

use crate::camera::core::Viewport;
use crate::input::{InputEvent, InputProcessor};
use crate::options::CampusOptions;
use crate::{CampusMap, MapCommand};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

/// A campus map driven from page script.
#[wasm_bindgen]
pub struct WebCampusMap {
    map: CampusMap,
    input: InputProcessor,
}

#[wasm_bindgen]
impl WebCampusMap {
    /// Build a map from TOML options (empty string for the default campus).
    ///
    /// # Errors
    ///
    /// Returns the error message if the options are invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(
        options_toml: &str,
        canvas_width: f32,
        canvas_height: f32,
        device_pixel_ratio: f32,
    ) -> Result<WebCampusMap, JsValue> {
        let options = if options_toml.trim().is_empty() {
            CampusOptions::default()
        } else {
            CampusOptions::from_toml(options_toml).map_err(to_js)?
        };
        let viewport =
            Viewport::new(canvas_width, canvas_height, device_pixel_ratio);
        let map =
            CampusMap::new(options, viewport, Instant::now()).map_err(to_js)?;
        Ok(Self {
            map,
            input: InputProcessor::new(),
        })
    }

    /// Building ids in menu order, as JSON.
    #[must_use]
    pub fn building_ids(&self) -> String {
        let ids: Vec<&str> = self.map.registry().ids().collect();
        serde_json::to_string(&ids).unwrap_or_default()
    }

    /// Apply a JSON-encoded [`MapCommand`], e.g.
    /// `{"type":"navigate_to","id":"lib"}`.
    ///
    /// # Errors
    ///
    /// Returns the error message for malformed JSON or an unknown building.
    pub fn execute(&mut self, command_json: &str) -> Result<(), JsValue> {
        let command: MapCommand =
            serde_json::from_str(command_json).map_err(to_js)?;
        let _ = self.map.execute(command, Instant::now()).map_err(to_js)?;
        Ok(())
    }

    /// Menu entry clicked.
    ///
    /// # Errors
    ///
    /// Returns the error message if the id is not a registered building.
    pub fn navigate_to(&mut self, id: &str) -> Result<(), JsValue> {
        let _ = self.map.navigate_to(id, Instant::now()).map_err(to_js)?;
        Ok(())
    }

    /// Raw pointer event (JSON-encoded [`InputEvent`]). Picking runs against
    /// the building proxies at the current pointer position.
    ///
    /// # Errors
    ///
    /// Returns the error message for malformed JSON. Per-command failures
    /// are logged and do not interrupt the remaining commands.
    pub fn pointer_event(&mut self, event_json: &str) -> Result<(), JsValue> {
        let event: InputEvent =
            serde_json::from_str(event_json).map_err(to_js)?;
        let pos = match event {
            InputEvent::CursorMoved { x, y } => glam::Vec2::new(x, y),
            _ => self.input.mouse_pos(),
        };
        let hit = self.map.pick(pos.x, pos.y);
        let now = Instant::now();
        for command in self.input.handle_event(event, hit) {
            if let Err(e) = self.map.execute(command, now) {
                log::warn!("pointer command failed: {e}");
            }
        }
        Ok(())
    }

    /// Window resized.
    pub fn resize(
        &mut self,
        canvas_width: f32,
        canvas_height: f32,
        device_pixel_ratio: f32,
    ) {
        self.map.resize(Viewport::new(
            canvas_width,
            canvas_height,
            device_pixel_ratio,
        ));
    }

    /// Loader started fetching a resource.
    pub fn load_started(&mut self, resource: &str) {
        self.map.loading_mut().begin(resource);
    }

    /// Loader progress for a resource. JS numbers arrive as `f64`.
    pub fn load_progress(&mut self, resource: &str, loaded: f64, total: f64) {
        self.map
            .loading_mut()
            .progress(resource, loaded.max(0.0) as u64, total.max(0.0) as u64);
    }

    /// Loader finished a resource.
    pub fn load_complete(&mut self, resource: &str) {
        self.map.loading_mut().complete(resource);
    }

    /// Loader failed a resource.
    pub fn load_failed(&mut self, resource: &str, reason: &str) {
        self.map.loading_mut().fail(resource, reason);
    }

    /// The loading screen's fade-out transition ended.
    pub fn loading_transition_end(&mut self) {
        self.map.loading_mut().transition_end();
    }

    /// Run one frame and return the JSON [`FrameReport`](crate::FrameReport).
    #[must_use]
    pub fn frame(&mut self) -> String {
        let report = self.map.frame(Instant::now());
        serde_json::to_string(&report).unwrap_or_else(|e| {
            log::error!("frame report serialization failed: {e}");
            String::new()
        })
    }

    /// Column-major view-projection matrix as of the last frame.
    #[must_use]
    pub fn view_proj(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.map.view_proj().to_cols_array()[..])
    }
}
