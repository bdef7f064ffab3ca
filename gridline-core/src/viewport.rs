//! Pan and zoom state of the visible window onto the grid.

use serde::{Deserialize, Serialize};

use crate::{CoordinateTransform, GridConfig, GridGeometry, Vec2, ViewportRect};

/// Persistable part of the viewport: where it looks and how far in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    /// World x of the center.
    pub cx: f64,
    /// World y of the center.
    pub cy: f64,
    /// Zoom level (canvas pixels per world pixel).
    pub zoom: f64,
}

/// The visible world rectangle, described by a center and a zoom.
///
/// Every update re-clamps the center so the rectangle stays inside the grid's
/// world bounds. An axis on which the rectangle is wider than the grid is
/// centered instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: Vec2,
    zoom: f64,
    canvas_width: f64,
    canvas_height: f64,
    full_width: f64,
    full_height: f64,
    zoom_min: f64,
    zoom_max: f64,
}

impl Viewport {
    /// Create a viewport showing the top-left corner of the grid at the
    /// configured initial zoom.
    ///
    /// The config should already pass [`GridConfig::validate`]. Inverted
    /// zoom bounds are reordered rather than trusted.
    #[must_use]
    pub fn new(config: &GridConfig, canvas_width: f64, canvas_height: f64) -> Self {
        let geometry = GridGeometry::from_config(config);
        let mut viewport = Self {
            center: Vec2::default(),
            zoom: config.clamp_zoom(config.initial_zoom),
            canvas_width: sanitize_extent(canvas_width),
            canvas_height: sanitize_extent(canvas_height),
            full_width: geometry.full_width(),
            full_height: geometry.full_height(),
            zoom_min: config.zoom_min.min(config.zoom_max),
            zoom_max: config.zoom_max.max(config.zoom_min),
        };
        viewport.center = Vec2::new(viewport.width() / 2.0, viewport.height() / 2.0);
        viewport.clamp();
        viewport
    }

    /// World-space center.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Current zoom.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Smallest and largest zoom the viewport accepts.
    #[must_use]
    pub const fn zoom_bounds(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    /// Canvas size in pixels.
    #[must_use]
    pub const fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// World width of the visible rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.canvas_width / self.zoom
    }

    /// World height of the visible rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.canvas_height / self.zoom
    }

    /// The visible world rectangle.
    #[must_use]
    pub fn rect(&self) -> ViewportRect {
        let width = self.width();
        let height = self.height();
        ViewportRect {
            left: self.center.x - width / 2.0,
            top: self.center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Transform between world and canvas pixels for the current state.
    #[must_use]
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.rect(), self.canvas_width, self.canvas_height, self.zoom)
    }

    /// World point under a canvas pixel.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.transform().screen_to_world(screen)
    }

    /// Canvas pixel showing a world point.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.transform().world_to_screen(world)
    }

    /// Persistable center and zoom.
    #[must_use]
    pub const fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            cx: self.center.x,
            cy: self.center.y,
            zoom: self.zoom,
        }
    }

    /// Restore a saved center and zoom, clamping both.
    pub fn restore(&mut self, snapshot: ViewportSnapshot) {
        self.zoom = self.clamp_zoom(snapshot.zoom);
        if snapshot.cx.is_finite() && snapshot.cy.is_finite() {
            self.center = Vec2::new(snapshot.cx, snapshot.cy);
        }
        self.clamp();
    }

    /// Move the view by a canvas-pixel delta, as if dragging the grid.
    ///
    /// Returns whether the center moved.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        let start = self.center;
        self.pan_from(start, dx, dy)
    }

    /// Place the view as if dragged by `(dx, dy)` canvas pixels starting from
    /// `start_center`.
    ///
    /// Returns whether the center moved.
    pub fn pan_from(&mut self, start_center: Vec2, dx: f64, dy: f64) -> bool {
        let before = self.center;
        let per_pixel_x = self.world_per_pixel(self.canvas_width, self.width());
        let per_pixel_y = self.world_per_pixel(self.canvas_height, self.height());
        self.center = Vec2::new(
            start_center.x - dx * per_pixel_x,
            start_center.y - dy * per_pixel_y,
        );
        self.clamp();
        tracing::trace!("Pan to ({:.1}, {:.1})", self.center.x, self.center.y);
        self.center != before
    }

    /// Change the zoom, optionally recentering on a world point.
    ///
    /// Returns whether the zoom or center changed.
    pub fn zoom_to(&mut self, zoom: f64, anchor: Option<Vec2>) -> bool {
        let before = (self.center, self.zoom);
        self.zoom = self.clamp_zoom(zoom);
        if let Some(anchor) = anchor.filter(|a| a.x.is_finite() && a.y.is_finite()) {
            self.center = anchor;
        }
        self.clamp();
        (self.center, self.zoom) != before
    }

    /// Change the zoom so that `world` ends up displayed at canvas pixel
    /// `screen`.
    ///
    /// Returns whether the zoom or center changed.
    pub fn zoom_about(&mut self, zoom: f64, world: Vec2, screen: Vec2) -> bool {
        let before = (self.center, self.zoom);
        self.zoom = self.clamp_zoom(zoom);
        if world.x.is_finite() && world.y.is_finite() {
            let per_pixel_x = self.world_per_pixel(self.canvas_width, self.width());
            let per_pixel_y = self.world_per_pixel(self.canvas_height, self.height());
            self.center = Vec2::new(
                world.x - (screen.x - self.canvas_width / 2.0) * per_pixel_x,
                world.y - (screen.y - self.canvas_height / 2.0) * per_pixel_y,
            );
        }
        self.clamp();
        (self.center, self.zoom) != before
    }

    /// Recenter on a world point without changing zoom.
    pub fn center_on(&mut self, world: Vec2) -> bool {
        self.zoom_to(self.zoom, Some(world))
    }

    /// Adopt a new canvas size, keeping zoom and re-clamping the center.
    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.canvas_width = sanitize_extent(canvas_width);
        self.canvas_height = sanitize_extent(canvas_height);
        self.clamp();
        tracing::debug!(
            "Viewport resized to {}x{}",
            self.canvas_width,
            self.canvas_height
        );
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.zoom;
        }
        zoom.max(self.zoom_min).min(self.zoom_max)
    }

    fn world_per_pixel(&self, canvas: f64, extent: f64) -> f64 {
        if canvas > 0.0 && extent > 0.0 {
            extent / canvas
        } else {
            1.0 / self.zoom
        }
    }

    fn clamp(&mut self) {
        self.center.x = clamp_axis(self.center.x, self.width(), self.full_width);
        self.center.y = clamp_axis(self.center.y, self.height(), self.full_height);
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_axis(center: f64, extent: f64, full: f64) -> f64 {
    if extent >= full || !center.is_finite() {
        return full / 2.0;
    }
    center.max(extent / 2.0).min(full - extent / 2.0)
}
