//! World-space layout of the grid and the world ↔ screen transform.
//!
//! ```text
//!   grid (col, row) ──grid_to_world──▶ world px ──world_to_screen──▶ canvas px
//!                                       ▲                                │
//!                                       └────────screen_to_world─────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{Edge, GridConfig, GridPoint};

/// A point in world or screen pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Placement of the dot lattice in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of dot columns.
    pub cols: i32,
    /// Number of dot rows.
    pub rows: i32,
    /// Distance between adjacent dots.
    pub spacing: f64,
    /// Margin around the outermost dots.
    pub border: f64,
}

impl GridGeometry {
    /// Geometry described by a configuration.
    #[must_use]
    pub const fn from_config(config: &GridConfig) -> Self {
        Self {
            cols: config.cols,
            rows: config.rows,
            spacing: config.spacing,
            border: config.border,
        }
    }

    /// World position of a dot.
    #[must_use]
    pub fn grid_to_world(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(
            self.border + f64::from(col) * self.spacing,
            self.border + f64::from(row) * self.spacing,
        )
    }

    /// World position of a grid point.
    #[must_use]
    pub fn point_to_world(&self, point: GridPoint) -> Vec2 {
        self.grid_to_world(point.col, point.row)
    }

    /// World position of an edge's midpoint.
    #[must_use]
    pub fn edge_midpoint(&self, edge: &Edge) -> Vec2 {
        self.point_to_world(edge.start())
            .midpoint(self.point_to_world(edge.end()))
    }

    /// Fractional column index of a world x coordinate.
    #[must_use]
    pub fn world_to_col(&self, wx: f64) -> f64 {
        (wx - self.border) / self.spacing
    }

    /// Fractional row index of a world y coordinate.
    #[must_use]
    pub fn world_to_row(&self, wy: f64) -> f64 {
        (wy - self.border) / self.spacing
    }

    /// Total world width including both borders.
    #[must_use]
    pub fn full_width(&self) -> f64 {
        2.0 * self.border + f64::from((self.cols - 1).max(0)) * self.spacing
    }

    /// Total world height including both borders.
    #[must_use]
    pub fn full_height(&self) -> f64 {
        2.0 * self.border + f64::from((self.rows - 1).max(0)) * self.spacing
    }
}

/// The world-space rectangle currently shown on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportRect {
    /// World x of the left edge.
    pub left: f64,
    /// World y of the top edge.
    pub top: f64,
    /// World width.
    pub width: f64,
    /// World height.
    pub height: f64,
}

impl ViewportRect {
    /// World x of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// World y of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether a world point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Maps between world pixels and canvas pixels for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    rect: ViewportRect,
    scale_x: f64,
    scale_y: f64,
}

impl CoordinateTransform {
    /// Transform for `rect` drawn onto a canvas of the given pixel size.
    ///
    /// `zoom` is only consulted when the rectangle is degenerate.
    #[must_use]
    pub fn new(rect: ViewportRect, canvas_width: f64, canvas_height: f64, zoom: f64) -> Self {
        let fallback = if zoom > 0.0 { zoom } else { 1.0 };
        let scale = |canvas: f64, extent: f64| {
            if extent > 0.0 && canvas > 0.0 {
                canvas / extent
            } else {
                fallback
            }
        };
        Self {
            rect,
            scale_x: scale(canvas_width, rect.width),
            scale_y: scale(canvas_height, rect.height),
        }
    }

    /// The viewport rectangle this transform maps.
    #[must_use]
    pub const fn rect(&self) -> ViewportRect {
        self.rect
    }

    /// Canvas pixels per world pixel, horizontally.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale_x
    }

    /// Convert a world point to canvas pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            (world.x - self.rect.left) * self.scale_x,
            (world.y - self.rect.top) * self.scale_y,
        )
    }

    /// Convert canvas pixels to a world point.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            self.rect.left + screen.x / self.scale_x,
            self.rect.top + screen.y / self.scale_y,
        )
    }

    /// Convert a screen distance to world units.
    #[must_use]
    pub fn screen_len_to_world(&self, len: f64) -> f64 {
        len / self.scale_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn grid_to_world_applies_border_and_spacing() {
        let geometry = GridGeometry::from_config(&GridConfig::default());
        let w = geometry.grid_to_world(3, 5);
        assert!(approx(w.x, 12.0 + 60.0));
        assert!(approx(w.y, 12.0 + 100.0));
        assert!(approx(geometry.full_width(), 24.0 + 99.0 * 20.0));
    }

    #[test]
    fn edge_midpoint_sits_between_dots() {
        let geometry = GridGeometry::from_config(&GridConfig::default());
        let mid = geometry.edge_midpoint(&Edge::vertical(0, 0));
        assert!(approx(mid.x, 12.0));
        assert!(approx(mid.y, 22.0));
    }

    #[test]
    fn viewport_corners_map_to_canvas_corners() {
        // canvas 800 wide at zoom 2 shows 400 world pixels
        let rect = ViewportRect {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 300.0,
        };
        let t = CoordinateTransform::new(rect, 800.0, 600.0, 2.0);
        let origin = t.world_to_screen(Vec2::new(100.0, 50.0));
        assert!(approx(origin.x, 0.0) && approx(origin.y, 0.0));
        let right = t.world_to_screen(Vec2::new(500.0, 50.0));
        assert!(approx(right.x, 800.0) && approx(right.y, 0.0));
    }

    #[test]
    fn degenerate_rect_falls_back_to_zoom() {
        let rect = ViewportRect {
            left: 10.0,
            top: 10.0,
            width: 0.0,
            height: 0.0,
        };
        let t = CoordinateTransform::new(rect, 0.0, 0.0, 2.0);
        let s = t.world_to_screen(Vec2::new(20.0, 20.0));
        assert!(s.x.is_finite() && s.y.is_finite());
        let back = t.screen_to_world(s);
        assert!(approx(back.x, 20.0) && approx(back.y, 20.0));
    }

    #[test]
    fn rect_contains_its_corners() {
        let rect = ViewportRect {
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 5.0,
        };
        assert!(rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.5, 5.0)));
    }
}
