//! Editor configuration.
//!
//! Grid dimensions, spacing, zoom bounds and gesture tuning all live here so
//! that the geometry and gesture code carry no magic numbers of their own.

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// Configuration constants the editor needs from its environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of dot columns.
    pub cols: i32,
    /// Number of dot rows.
    pub rows: i32,
    /// Distance between adjacent dots in world pixels.
    pub spacing: f64,
    /// Margin around the outermost dots in world pixels.
    pub border: f64,
    /// Smallest allowed zoom.
    pub zoom_min: f64,
    /// Largest allowed zoom.
    pub zoom_max: f64,
    /// Zoom used when the editor starts and when a double tap zooms back out.
    pub initial_zoom: f64,
    /// Zoom a double tap zooms in to.
    pub double_tap_zoom: f64,
    /// Maximum time between a completed tap and the next press for a double tap.
    pub double_tap_delay_ms: u64,
    /// Maximum screen distance between the two taps of a double tap.
    pub double_tap_radius_px: f64,
    /// Screen displacement after which a press becomes a drag.
    pub drag_threshold_px: f64,
    /// Screen radius within which a tap acts on the nearest edge.
    pub hit_radius_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 100,
            rows: 100,
            spacing: 20.0,
            border: 12.0,
            zoom_min: 0.25,
            zoom_max: 8.0,
            initial_zoom: 1.0,
            double_tap_zoom: 3.0,
            double_tap_delay_ms: 300,
            double_tap_radius_px: 40.0,
            drag_threshold_px: 4.0,
            hit_radius_px: 14.0,
        }
    }
}

impl GridConfig {
    /// Create a default configuration for a grid of the given size.
    #[must_use]
    pub fn with_size(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a usable grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> GridResult<()> {
        let problem = if self.cols < 2 || self.rows < 2 {
            Some(format!(
                "grid needs at least 2x2 dots, got {}x{}",
                self.cols, self.rows
            ))
        } else if !self.spacing.is_finite() || self.spacing <= 0.0 {
            Some(format!("spacing must be positive, got {}", self.spacing))
        } else if !self.border.is_finite() || self.border < 0.0 {
            Some(format!("border must not be negative, got {}", self.border))
        } else if !self.zoom_min.is_finite()
            || self.zoom_min <= 0.0
            || !self.zoom_max.is_finite()
            || self.zoom_max < self.zoom_min
        {
            Some(format!(
                "zoom bounds [{}, {}] are empty or not positive",
                self.zoom_min, self.zoom_max
            ))
        } else if !(self.zoom_min..=self.zoom_max).contains(&self.initial_zoom) {
            Some(format!(
                "initial zoom {} outside [{}, {}]",
                self.initial_zoom, self.zoom_min, self.zoom_max
            ))
        } else if !(self.zoom_min..=self.zoom_max).contains(&self.double_tap_zoom)
            || self.double_tap_zoom <= self.initial_zoom
        {
            Some(format!(
                "double-tap zoom {} must lie in ({}, {}]",
                self.double_tap_zoom, self.initial_zoom, self.zoom_max
            ))
        } else if [
            self.hit_radius_px,
            self.drag_threshold_px,
            self.double_tap_radius_px,
        ]
        .iter()
        .any(|r| !r.is_finite() || *r < 0.0)
        {
            Some("gesture radii must be finite and not negative".to_string())
        } else {
            None
        };

        match problem {
            Some(message) => {
                tracing::warn!("Rejected grid configuration: {message}");
                Err(GridError::InvalidConfig(message))
            }
            None => Ok(()),
        }
    }

    /// Parse and validate a configuration from JSON. Missing fields take
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamp a zoom value into the configured bounds.
    ///
    /// Never panics, even on a configuration that would fail [`validate`];
    /// with inverted bounds the upper bound wins.
    ///
    /// [`validate`]: GridConfig::validate
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.initial_zoom;
        }
        zoom.max(self.zoom_min).min(self.zoom_max)
    }
}
