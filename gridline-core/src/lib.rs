//! # Gridline Core
//!
//! Interaction core for a dot-grid line editor. Users toggle the unit edges
//! between adjacent dots by tapping or by drawing axis-following strokes,
//! and navigate with pan, pinch and double-tap zoom.
//! Compiles to WASM so any canvas host can drive it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             gridline-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Editor State    │  Gesture Interpreter     │
//! │  - Grid model    │  - Tap / double tap      │
//! │  - Viewport      │  - Pan / pinch           │
//! │  - Sinks         │  - Axis strokes          │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Import / Export         │
//! │  - Transforms    │  - State documents       │
//! │  - Edge lookup   │  - Lenient edge parsing  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering and persistence live outside the core: hosts plug in a
//! [`RenderSink`] and a [`StateSink`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod locate;
pub mod model;
pub mod schema;
pub mod sink;
pub mod state;
pub mod stroke;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::GridConfig;
pub use error::{GridError, GridResult};
pub use event::{PointerEvent, PointerPhase};
pub use geometry::{CoordinateTransform, GridGeometry, Vec2, ViewportRect};
pub use gesture::{GestureEffect, GestureInterpreter, GesturePhase, GestureSettings, GestureTarget};
pub use grid::{Edge, GridPoint, Orientation};
pub use locate::{EdgeHit, EdgeLocator};
pub use model::{GridModel, LoadReport, RejectReason, ToggleOutcome, MAX_DEGREE};
pub use schema::{parse_edge_entry, StateDocument, ViewportDocument, DOCUMENT_VERSION};
pub use sink::{RenderSink, StateSink, StateSnapshot};
pub use state::{EditorState, InteractionMode};
pub use stroke::Stroke;
pub use viewport::{Viewport, ViewportSnapshot};

/// Gridline core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
