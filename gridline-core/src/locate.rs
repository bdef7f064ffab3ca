//! Nearest-edge hit testing in world space.

use serde::{Deserialize, Serialize};

use crate::{Edge, GridGeometry, Vec2};

/// An edge found near a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeHit {
    /// The located edge.
    pub edge: Edge,
    /// World distance from the query point to the edge midpoint.
    pub distance: f64,
}

/// Finds the grid edge whose midpoint is nearest to a world point.
///
/// Only two candidates are considered: the horizontal edge on the nearest row
/// line and the vertical edge on the nearest column line. Candidates with an
/// endpoint off the grid are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLocator {
    geometry: GridGeometry,
}

impl EdgeLocator {
    /// Create a locator for the given grid layout.
    #[must_use]
    pub const fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// Grid layout this locator searches.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Nearest edge to a world point, regardless of distance.
    #[must_use]
    pub fn locate(&self, world: Vec2) -> Option<EdgeHit> {
        let col_f = self.geometry.world_to_col(world.x);
        let row_f = self.geometry.world_to_row(world.y);
        if !col_f.is_finite() || !row_f.is_finite() {
            return None;
        }

        let horizontal = self.candidate(
            Edge::horizontal(index_of(col_f.floor()), index_of(row_f.round())),
            world,
        );
        let vertical = self.candidate(
            Edge::vertical(index_of(col_f.round()), index_of(row_f.floor())),
            world,
        );

        match (horizontal, vertical) {
            (Some(h), Some(v)) => Some(if v.distance < h.distance { v } else { h }),
            (h, v) => h.or(v),
        }
    }

    /// Nearest edge to a world point if it lies within `radius` world units.
    #[must_use]
    pub fn locate_within(&self, world: Vec2, radius: f64) -> Option<EdgeHit> {
        self.locate(world).filter(|hit| hit.distance <= radius)
    }

    fn candidate(&self, edge: Edge, world: Vec2) -> Option<EdgeHit> {
        if !edge.in_bounds(self.geometry.cols, self.geometry.rows) {
            return None;
        }
        Some(EdgeHit {
            edge,
            distance: self.geometry.edge_midpoint(&edge).distance(world),
        })
    }
}

/// Convert an already-rounded float index to `i32`, saturating far-off values
/// so that they fail the bounds check instead of wrapping.
#[allow(clippy::cast_possible_truncation)]
fn index_of(value: f64) -> i32 {
    value.clamp(f64::from(i32::MIN + 1), f64::from(i32::MAX - 1)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridConfig;

    fn locator(cols: i32, rows: i32) -> EdgeLocator {
        EdgeLocator::new(GridGeometry::from_config(&GridConfig::with_size(cols, rows)))
    }

    #[test]
    fn point_on_horizontal_midpoint_finds_it() {
        let locator = locator(10, 10);
        let mid = locator.geometry().edge_midpoint(&Edge::horizontal(3, 5));
        let hit = locator.locate(mid).expect("edge in bounds");
        assert_eq!(hit.edge, Edge::horizontal(3, 5));
        assert!(hit.distance < 1e-9);
    }

    #[test]
    fn point_near_vertical_line_prefers_vertical() {
        let locator = locator(10, 10);
        let mid = locator.geometry().edge_midpoint(&Edge::vertical(4, 2));
        let hit = locator
            .locate(Vec2::new(mid.x + 2.0, mid.y - 3.0))
            .expect("edge in bounds");
        assert_eq!(hit.edge, Edge::vertical(4, 2));
    }

    #[test]
    fn candidates_off_the_grid_are_excluded() {
        let locator = locator(4, 4);
        // right of the last column: only the vertical edge on col 3 remains
        let g = *locator.geometry();
        let hit = locator
            .locate(Vec2::new(g.grid_to_world(3, 0).x + 8.0, g.grid_to_world(0, 1).y + 1.0))
            .expect("vertical edge");
        assert_eq!(hit.edge, Edge::vertical(3, 1));

        assert!(locator.locate(Vec2::new(-500.0, -500.0)).is_none());
        assert!(locator.locate(Vec2::new(f64::NAN, 0.0)).is_none());
    }

    #[test]
    fn locate_within_applies_radius() {
        let locator = locator(10, 10);
        let dot = locator.geometry().grid_to_world(2, 2);
        // a dot is half a spacing away from its four edge midpoints
        assert!(locator.locate_within(dot, 5.0).is_none());
        assert!(locator.locate_within(dot, 10.0).is_some());
    }
}
