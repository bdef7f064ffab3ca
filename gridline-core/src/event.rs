//! Raw pointer input fed to the gesture interpreter.

use serde::{Deserialize, Serialize};

use crate::Vec2;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer pressed (finger down, button down).
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released.
    Up,
    /// Pointer cancelled by the platform (e.g., palm rejection, lost capture).
    Cancel,
}

/// A single pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer identifier (for multi-touch).
    pub pointer_id: u32,
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in canvas pixels.
    pub x: f64,
    /// Y position in canvas pixels.
    pub y: f64,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(
        pointer_id: u32,
        phase: PointerPhase,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            pointer_id,
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Pointer pressed.
    #[must_use]
    pub const fn down(pointer_id: u32, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Down, x, y, timestamp_ms)
    }

    /// Pointer moved.
    #[must_use]
    pub const fn moved(pointer_id: u32, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Move, x, y, timestamp_ms)
    }

    /// Pointer released.
    #[must_use]
    pub const fn up(pointer_id: u32, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Up, x, y, timestamp_ms)
    }

    /// Pointer cancelled.
    #[must_use]
    pub const fn cancel(pointer_id: u32, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Cancel, 0.0, 0.0, timestamp_ms)
    }

    /// Position in canvas pixels.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
