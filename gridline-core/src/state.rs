//! Editor state: the aggregate the host application talks to.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Edge, EdgeHit, EdgeLocator, GestureEffect, GestureInterpreter, GesturePhase, GestureSettings,
    GestureTarget, GridConfig, GridGeometry, GridModel, GridResult, LoadReport, PointerEvent,
    RenderSink, StateDocument, StateSink, StateSnapshot, ToggleOutcome, Vec2, Viewport,
    ViewportSnapshot,
};

/// What a single-pointer drag does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Drags pan the view.
    #[default]
    Navigate,
    /// Drags that start on an edge draw an axis-following stroke; other drags pan.
    Draw,
}

/// The complete editor state.
///
/// Owns the grid model, the viewport and the gesture interpreter. Every
/// mutation marks the view dirty and notifies the state sink; [`frame`]
/// hands the state to the render sink at most once per dirty period.
///
/// [`frame`]: EditorState::frame
pub struct EditorState {
    config: GridConfig,
    model: GridModel,
    viewport: Viewport,
    locator: EdgeLocator,
    gestures: GestureInterpreter,
    mode: InteractionMode,
    dirty: bool,
    state_sink: Option<Box<dyn StateSink>>,
    render_sink: Option<Box<dyn RenderSink>>,
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("config", &self.config)
            .field("edges", &self.model.edge_count())
            .field("viewport", &self.viewport)
            .field("mode", &self.mode)
            .field("phase", &self.gestures.phase())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl EditorState {
    /// Create an editor for a canvas of the given pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GridConfig, canvas_width: f64, canvas_height: f64) -> GridResult<Self> {
        config.validate()?;
        Ok(Self::build(config, canvas_width, canvas_height))
    }

    fn build(config: GridConfig, canvas_width: f64, canvas_height: f64) -> Self {
        tracing::debug!(
            "Editor created for {}x{} grid on {canvas_width}x{canvas_height} canvas",
            config.cols,
            config.rows
        );
        Self {
            model: GridModel::new(config.cols, config.rows),
            viewport: Viewport::new(&config, canvas_width, canvas_height),
            locator: EdgeLocator::new(GridGeometry::from_config(&config)),
            gestures: GestureInterpreter::new(GestureSettings::from(&config)),
            mode: InteractionMode::default(),
            dirty: true,
            state_sink: None,
            render_sink: None,
            config,
        }
    }

    /// Configuration the editor was built with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Read-only view of the drawn edges.
    #[must_use]
    pub const fn model(&self) -> &GridModel {
        &self.model
    }

    /// Read-only view of the viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current drag mode.
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Change what single-pointer drags do.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// Coarse gesture state.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    /// Install the persistence hook.
    pub fn set_state_sink(&mut self, sink: impl StateSink + 'static) {
        self.state_sink = Some(Box::new(sink));
    }

    /// Install the render hook.
    pub fn set_render_sink(&mut self, sink: impl RenderSink + 'static) {
        self.render_sink = Some(Box::new(sink));
        self.dirty = true;
    }

    /// Process a pointer event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Vec<GestureEffect> {
        let mut target = GestureTarget {
            model: &mut self.model,
            viewport: &mut self.viewport,
            locator: &self.locator,
            mode: self.mode,
        };
        let effects = self.gestures.handle(event, &mut target);
        if effects
            .iter()
            .any(|e| e.changed_edges() || e.changed_view())
        {
            self.changed();
        }
        effects
    }

    /// Toggle an edge directly (keyboard, scripting).
    pub fn toggle(&mut self, edge: Edge) -> ToggleOutcome {
        let outcome = self.model.toggle(edge);
        if outcome.is_mutation() {
            self.changed();
        }
        outcome
    }

    /// Erase every edge.
    pub fn clear(&mut self) {
        if !self.model.is_empty() {
            self.model.clear();
            self.changed();
        }
    }

    /// Pan by a canvas-pixel delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.viewport.pan(dx, dy) {
            self.changed();
        }
    }

    /// Zoom, optionally recentering on a world point.
    pub fn zoom_to(&mut self, zoom: f64, anchor: Option<Vec2>) {
        if self.viewport.zoom_to(zoom, anchor) {
            self.changed();
        }
    }

    /// Adopt a new canvas size.
    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.viewport.resize(canvas_width, canvas_height);
        self.dirty = true;
    }

    /// Edge within the hit radius of a canvas pixel, for hover feedback.
    #[must_use]
    pub fn edge_at_screen(&self, x: f64, y: f64) -> Option<EdgeHit> {
        let transform = self.viewport.transform();
        let radius = transform.screen_len_to_world(self.config.hit_radius_px);
        self.locator
            .locate_within(transform.screen_to_world(Vec2::new(x, y)), radius)
    }

    /// Immutable copy of the edges and viewport.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            edges: self.model.snapshot(),
            viewport: self.viewport.snapshot(),
            revision: self.model.revision(),
        }
    }

    /// Replace the edge set wholesale and optionally restore the viewport.
    ///
    /// Entries that are malformed, out of bounds, duplicated or would break
    /// the degree limit are skipped individually.
    pub fn load_state(
        &mut self,
        entries: &[Value],
        viewport: Option<ViewportSnapshot>,
    ) -> LoadReport {
        let document = StateDocument {
            version: crate::schema::DOCUMENT_VERSION,
            edges: entries.to_vec(),
            viewport: viewport.map(Into::into),
        };
        self.load_document(&document)
    }

    /// Load a parsed [`StateDocument`].
    pub fn load_document(&mut self, document: &StateDocument) -> LoadReport {
        let (edges, malformed) = document.parsed_edges();
        let mut report = self.model.load(edges);
        report.skipped += malformed;
        if let Some(viewport) = document.viewport {
            self.viewport.restore(viewport.into());
        }
        self.gestures.reset();
        tracing::info!(
            "Loaded {} edges ({} skipped)",
            report.loaded,
            report.skipped
        );
        self.changed();
        report
    }

    /// Load state from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error only if the text is not a JSON document object.
    pub fn load_json(&mut self, json: &str) -> GridResult<LoadReport> {
        let document = StateDocument::from_json(json)?;
        Ok(self.load_document(&document))
    }

    /// Current state as a document.
    #[must_use]
    pub fn export_document(&self) -> StateDocument {
        StateDocument::from_snapshot(&self.snapshot())
    }

    /// Current state as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> GridResult<String> {
        self.export_document().to_json()
    }

    /// Whether a redraw is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Render if anything changed since the last frame.
    ///
    /// Returns whether the render sink was called.
    pub fn frame(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        let Some(sink) = self.render_sink.as_mut() else {
            return false;
        };
        sink.render_frame(&self.model, self.viewport.rect(), self.viewport.zoom());
        self.dirty = false;
        true
    }

    fn changed(&mut self) {
        self.dirty = true;
        if self.state_sink.is_some() {
            let snapshot = self.snapshot();
            if let Some(sink) = self.state_sink.as_mut() {
                sink.on_state_changed(&snapshot);
            }
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::build(GridConfig::default(), 800.0, 600.0)
    }
}
