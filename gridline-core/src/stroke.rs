//! Axis-following drag strokes.
//!
//! A stroke starts on an anchor edge and then walks the grid one whole cell at
//! a time along the dominant drag axis. When the axis changes, the stroke
//! pivots around a grid point and keeps walking along the new axis.
//!
//! ```text
//!   anchor ──▶ step 1 ──▶ step 2 ──▶ step 3
//!                                      │  axis flip: pivot at the head
//!                                      ▼
//!                                   step 1
//! ```

use std::collections::HashSet;

use crate::{CoordinateTransform, Edge, GridGeometry, GridPoint, Orientation, Vec2};

/// What a segment of the stroke is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// An edge lying along the segment axis; step `n` is that edge shifted by `n`.
    Edge(Edge),
    /// A grid point; step `n` is the `n`-th edge leaving it along the axis.
    Point(GridPoint),
}

/// One straight run of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    axis: Orientation,
    /// Screen position that step zero is measured from.
    anchor: Vec2,
    origin: Origin,
}

/// State of one axis-following stroke.
#[derive(Debug, Clone)]
pub struct Stroke {
    segment: Segment,
    step: i32,
    visited: HashSet<Edge>,
    transform: CoordinateTransform,
    geometry: GridGeometry,
    /// Screen pixels per grid cell.
    cell: f64,
    /// Perpendicular screen distance below which the axis never flips.
    flip_threshold: f64,
}

impl Stroke {
    /// Begin a stroke on `anchor_edge`, pressed at screen position `down`,
    /// heading along `axis`.
    ///
    /// The anchor edge itself is marked as visited and is never toggled by
    /// the stroke.
    #[must_use]
    pub fn begin(
        anchor_edge: Edge,
        down: Vec2,
        axis: Orientation,
        transform: CoordinateTransform,
        geometry: GridGeometry,
        flip_threshold: f64,
    ) -> Self {
        let mut visited = HashSet::new();
        visited.insert(anchor_edge);
        let mut stroke = Self {
            segment: Segment {
                axis: anchor_edge.orientation(),
                anchor: down,
                origin: Origin::Edge(anchor_edge),
            },
            step: 0,
            visited,
            transform,
            geometry,
            cell: geometry.spacing * transform.scale(),
            flip_threshold,
        };
        if axis != stroke.segment.axis {
            stroke.reanchor(axis);
        }
        tracing::debug!("Stroke started on {anchor_edge} heading {axis:?}");
        stroke
    }

    /// Axis the stroke is currently walking along.
    #[must_use]
    pub const fn axis(&self) -> Orientation {
        self.segment.axis
    }

    /// Follow the pointer to screen position `pos`.
    ///
    /// Returns the edges newly entered by this move, in walking order. Each
    /// edge is returned at most once over the lifetime of the stroke, and
    /// edges off the grid are never returned.
    pub fn advance(&mut self, pos: Vec2) -> Vec<Edge> {
        if self.cell.is_nan() || self.cell <= 0.0 || !pos.x.is_finite() || !pos.y.is_finite() {
            return Vec::new();
        }

        let axis = self.segment.axis;
        let head = self.head();
        let along_d = (along(pos, axis) - along(head, axis)).abs();
        let across_d = (across(pos, axis) - across(head, axis)).abs();
        if across_d > along_d && across_d > self.flip_threshold {
            let axis = self.segment.axis.flipped();
            self.reanchor(axis);
            tracing::trace!("Stroke axis flipped to {axis:?}");
        }

        let target = self.step_at(pos);
        let mut entered = Vec::new();
        let direction = (target - self.step).signum();
        while self.step != target {
            self.step += direction;
            if let Some(edge) = self.edge_at(self.step) {
                if edge.in_bounds(self.geometry.cols, self.geometry.rows)
                    && self.visited.insert(edge)
                {
                    entered.push(edge);
                }
            }
        }
        entered
    }

    /// Whole cells between the segment anchor and `pos`, truncated towards zero
    /// and limited to one step past either end of the grid.
    #[allow(clippy::cast_possible_truncation)]
    fn step_at(&self, pos: Vec2) -> i32 {
        let axis = self.segment.axis;
        let cells = (along(pos, axis) - along(self.segment.anchor, axis)) / self.cell;
        let (lo, hi) = self.step_range();
        cells.trunc().max(lo).min(hi) as i32
    }

    /// Steps outside this range only reach edges off the grid.
    fn step_range(&self) -> (f64, f64) {
        let origin = match self.segment.origin {
            Origin::Edge(edge) => edge.start(),
            Origin::Point(point) => point,
        };
        let (at, extent) = match self.segment.axis {
            Orientation::Horizontal => (origin.col, self.geometry.cols),
            Orientation::Vertical => (origin.row, self.geometry.rows),
        };
        let (at, extent) = (f64::from(at), f64::from(extent));
        (-at - 1.0, extent - at)
    }

    /// Screen position of the segment anchor advanced by the completed steps.
    fn head(&self) -> Vec2 {
        let offset = f64::from(self.step) * self.cell;
        let anchor = self.segment.anchor;
        match self.segment.axis {
            Orientation::Horizontal => Vec2::new(anchor.x + offset, anchor.y),
            Orientation::Vertical => Vec2::new(anchor.x, anchor.y + offset),
        }
    }

    fn edge_at(&self, step: i32) -> Option<Edge> {
        let axis = self.segment.axis;
        match self.segment.origin {
            Origin::Edge(edge) => Some(Edge::from_origin(shift(edge.start(), axis, step), axis)),
            Origin::Point(point) => match step {
                0 => None,
                s if s > 0 => Some(Edge::from_origin(shift(point, axis, s - 1), axis)),
                s => Some(Edge::from_origin(shift(point, axis, s), axis)),
            },
        }
    }

    /// Start a new segment along `axis`, pivoting at the grid point nearest
    /// to the current head.
    fn reanchor(&mut self, axis: Orientation) {
        let old_axis = self.segment.axis;
        let head = self.head();
        let pivot = match self.segment.origin {
            Origin::Point(point) => shift(point, old_axis, self.step),
            Origin::Edge(edge) => {
                let near = shift(edge.start(), old_axis, self.step);
                let far = shift(near, old_axis, 1);
                let target = along(head, old_axis);
                let near_d = (along(self.screen_of(near), old_axis) - target).abs();
                let far_d = (along(self.screen_of(far), old_axis) - target).abs();
                if far_d < near_d {
                    far
                } else {
                    near
                }
            }
        };

        let pivot_screen = self.screen_of(pivot);
        let anchor = match old_axis {
            Orientation::Horizontal => Vec2::new(pivot_screen.x, self.segment.anchor.y),
            Orientation::Vertical => Vec2::new(self.segment.anchor.x, pivot_screen.y),
        };
        self.segment = Segment {
            axis,
            anchor,
            origin: Origin::Point(pivot),
        };
        self.step = 0;
    }

    fn screen_of(&self, point: GridPoint) -> Vec2 {
        self.transform.world_to_screen(self.geometry.point_to_world(point))
    }
}

fn shift(point: GridPoint, axis: Orientation, by: i32) -> GridPoint {
    match axis {
        Orientation::Horizontal => GridPoint::new(point.col.saturating_add(by), point.row),
        Orientation::Vertical => GridPoint::new(point.col, point.row.saturating_add(by)),
    }
}

fn along(v: Vec2, axis: Orientation) -> f64 {
    match axis {
        Orientation::Horizontal => v.x,
        Orientation::Vertical => v.y,
    }
}

fn across(v: Vec2, axis: Orientation) -> f64 {
    along(v, axis.flipped())
}
