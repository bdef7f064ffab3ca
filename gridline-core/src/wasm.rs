//! WebAssembly bindings for gridline-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Pointer methods return the resulting gesture effects as a JSON array.

use wasm_bindgen::prelude::*;

use crate::{
    Edge, EditorState, GestureEffect, GridConfig, GridModel, GridPoint, InteractionMode,
    PointerEvent, StateDocument, StateSnapshot, ViewportRect,
};

/// Initialize the gridline WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    state: EditorState,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor with the default grid for a canvas of the given size.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut state = EditorState::default();
        state.resize(width, height);
        Self { state }
    }

    /// Create an editor from a JSON [`GridConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error string if the configuration is unreadable or invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str, width: f64, height: f64) -> Result<WasmEditor, String> {
        let config = GridConfig::from_json(config_json).map_err(|e| e.to_string())?;
        let state = EditorState::new(config, width, height).map_err(|e| e.to_string())?;
        Ok(Self { state })
    }

    /// Feed a pointer press.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, pointer_id: u32, x: f64, y: f64, time_ms: f64) -> String {
        self.dispatch(&PointerEvent::down(pointer_id, x, y, millis(time_ms)))
    }

    /// Feed a pointer move.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, pointer_id: u32, x: f64, y: f64, time_ms: f64) -> String {
        self.dispatch(&PointerEvent::moved(pointer_id, x, y, millis(time_ms)))
    }

    /// Feed a pointer release.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, pointer_id: u32, x: f64, y: f64, time_ms: f64) -> String {
        self.dispatch(&PointerEvent::up(pointer_id, x, y, millis(time_ms)))
    }

    /// Feed a platform cancel.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, pointer_id: u32, time_ms: f64) -> String {
        self.dispatch(&PointerEvent::cancel(pointer_id, millis(time_ms)))
    }

    /// Adopt a new canvas size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.state.resize(width, height);
    }

    /// Switch between `"navigate"` and `"draw"`.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown mode name.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), String> {
        let mode: InteractionMode =
            serde_json::from_value(serde_json::Value::String(mode.to_string()))
                .map_err(|e| e.to_string())?;
        self.state.set_mode(mode);
        Ok(())
    }

    /// Toggle the edge between two adjacent dots.
    ///
    /// Returns the toggle outcome as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the dots are not adjacent.
    #[wasm_bindgen(js_name = toggleEdge)]
    pub fn toggle_edge(&mut self, c1: i32, r1: i32, c2: i32, r2: i32) -> Result<String, String> {
        let edge = Edge::between(GridPoint::new(c1, r1), GridPoint::new(c2, r2))
            .map_err(|e| e.to_string())?;
        let outcome = self.state.toggle(edge);
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }

    /// Erase every edge.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Replace the edges and viewport from a saved JSON document.
    ///
    /// Returns the load report as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the text is not a JSON document.
    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, json: &str) -> Result<String, String> {
        let report = self.state.load_json(json).map_err(|e| e.to_string())?;
        serde_json::to_string(&report).map_err(|e| e.to_string())
    }

    /// Current edges and viewport as a JSON document.
    #[wasm_bindgen(js_name = exportJson)]
    #[must_use]
    pub fn export_json(&self) -> String {
        self.state.export_json().unwrap_or_default()
    }

    /// Visible world rectangle as JSON.
    #[wasm_bindgen(js_name = viewportRect)]
    #[must_use]
    pub fn viewport_rect(&self) -> String {
        serde_json::to_string(&self.state.viewport().rect()).unwrap_or_default()
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.state.viewport().zoom()
    }

    /// Number of drawn edges.
    #[wasm_bindgen(js_name = edgeCount)]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.state.model().edge_count()
    }

    /// Call `callback(documentJson)` after every change worth saving.
    #[wasm_bindgen(js_name = setStateCallback)]
    pub fn set_state_callback(&mut self, callback: js_sys::Function) {
        self.state.set_state_sink(move |snapshot: &StateSnapshot| {
            match StateDocument::from_snapshot(snapshot).to_json() {
                Ok(json) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        tracing::warn!("State callback threw: {e:?}");
                    }
                }
                Err(e) => tracing::warn!("Failed to serialize state: {e}"),
            }
        });
    }

    /// Call `callback(edges, rectJson, zoom)` from [`frame`] when a redraw
    /// is due. `edges` is a flat `Int32Array` of `c1, r1, c2, r2` quads.
    ///
    /// [`frame`]: WasmEditor::frame
    #[wasm_bindgen(js_name = setRenderCallback)]
    pub fn set_render_callback(&mut self, callback: js_sys::Function) {
        self.state
            .set_render_sink(move |model: &GridModel, rect: ViewportRect, zoom: f64| {
                let flat: Vec<i32> = model.snapshot().iter().flat_map(Edge::to_flat).collect();
                let edges = js_sys::Int32Array::from(flat.as_slice());
                let rect = serde_json::to_string(&rect).unwrap_or_default();
                if let Err(e) = callback.call3(
                    &JsValue::NULL,
                    &edges,
                    &JsValue::from_str(&rect),
                    &JsValue::from_f64(zoom),
                ) {
                    tracing::warn!("Render callback threw: {e:?}");
                }
            });
    }

    /// Render if anything changed; call once per animation frame.
    pub fn frame(&mut self) -> bool {
        self.state.frame()
    }

    fn dispatch(&mut self, event: &PointerEvent) -> String {
        let effects: Vec<GestureEffect> = self.state.handle_pointer(event);
        serde_json::to_string(&effects).unwrap_or_default()
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Browser timestamps are fractional milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn millis(time_ms: f64) -> u64 {
    time_ms.max(0.0) as u64
}
