//! Outbound hooks for rendering and persistence.
//!
//! The core never draws or saves anything itself. A host installs a
//! [`RenderSink`] to paint frames and a [`StateSink`] to hear about changes;
//! both only ever see read-only state.

use serde::{Deserialize, Serialize};

use crate::{Edge, GridModel, ViewportRect, ViewportSnapshot};

/// Immutable copy of everything worth persisting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Drawn edges, sorted.
    pub edges: Vec<Edge>,
    /// Viewport center and zoom.
    pub viewport: ViewportSnapshot,
    /// Model revision the snapshot was taken at.
    pub revision: u64,
}

/// Receives a snapshot after every successful mutation.
///
/// Called synchronously from the input path; implementations decide whether
/// and when to serialize, and own any debouncing.
pub trait StateSink {
    /// The edge set or viewport changed.
    fn on_state_changed(&mut self, snapshot: &StateSnapshot);
}

impl<F> StateSink for F
where
    F: FnMut(&StateSnapshot),
{
    fn on_state_changed(&mut self, snapshot: &StateSnapshot) {
        self(snapshot);
    }
}

/// Paints one frame from the current state.
///
/// Must be a pure function of its arguments so redraws can be coalesced.
pub trait RenderSink {
    /// Draw `model`'s edges as seen through `rect` at `zoom`.
    fn render_frame(&mut self, model: &GridModel, rect: ViewportRect, zoom: f64);
}

impl<F> RenderSink for F
where
    F: FnMut(&GridModel, ViewportRect, f64),
{
    fn render_frame(&mut self, model: &GridModel, rect: ViewportRect, zoom: f64) {
        self(model, rect, zoom);
    }
}
