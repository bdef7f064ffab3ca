//! Grid points and edges - the values the model is built from.

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// A lattice point, addressed by column and row.
///
/// Coordinates are signed so that out-of-range neighbours such as `(0, -1)`
/// can be expressed and then rejected by bounds checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPoint {
    /// Column index.
    pub col: i32,
    /// Row index.
    pub row: i32,
}

impl GridPoint {
    /// Create a point.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Whether the point lies on a grid of `cols` x `rows` dots.
    #[must_use]
    pub const fn in_bounds(self, cols: i32, rows: i32) -> bool {
        self.col >= 0 && self.col < cols && self.row >= 0 && self.row < rows
    }

    /// Whether `other` differs by exactly one in a single axis.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        let dc = (i64::from(self.col) - i64::from(other.col)).abs();
        let dr = (i64::from(self.row) - i64::from(other.row)).abs();
        dc + dr == 1
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Direction an edge (or a stroke) runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Same row, adjacent columns.
    Horizontal,
    /// Same column, adjacent rows.
    Vertical,
}

impl Orientation {
    /// The perpendicular orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A segment joining two grid-adjacent points.
///
/// Stored canonically with the lexicographically smaller endpoint first, so
/// `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[GridPoint; 2]", into = "[GridPoint; 2]")]
pub struct Edge {
    a: GridPoint,
    b: GridPoint,
}

impl Edge {
    /// Create the edge between two points, or `None` if they are not adjacent.
    #[must_use]
    pub fn new(p: GridPoint, q: GridPoint) -> Option<Self> {
        if !p.is_adjacent(q) {
            return None;
        }
        let (a, b) = if p <= q { (p, q) } else { (q, p) };
        Some(Self { a, b })
    }

    /// Create the edge between two points.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NotAdjacent`] if the points are not neighbours.
    pub fn between(p: GridPoint, q: GridPoint) -> GridResult<Self> {
        Self::new(p, q).ok_or_else(|| GridError::NotAdjacent(p.to_string(), q.to_string()))
    }

    /// The horizontal edge from `(col, row)` to `(col + 1, row)`.
    #[must_use]
    pub const fn horizontal(col: i32, row: i32) -> Self {
        Self {
            a: GridPoint::new(col, row),
            b: GridPoint::new(col + 1, row),
        }
    }

    /// The vertical edge from `(col, row)` to `(col, row + 1)`.
    #[must_use]
    pub const fn vertical(col: i32, row: i32) -> Self {
        Self {
            a: GridPoint::new(col, row),
            b: GridPoint::new(col, row + 1),
        }
    }

    /// The edge leaving `origin` one step forward along `orientation`.
    #[must_use]
    pub const fn from_origin(origin: GridPoint, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::horizontal(origin.col, origin.row),
            Orientation::Vertical => Self::vertical(origin.col, origin.row),
        }
    }

    /// Smaller endpoint.
    #[must_use]
    pub const fn start(&self) -> GridPoint {
        self.a
    }

    /// Larger endpoint.
    #[must_use]
    pub const fn end(&self) -> GridPoint {
        self.b
    }

    /// Both endpoints, smaller first.
    #[must_use]
    pub const fn endpoints(&self) -> [GridPoint; 2] {
        [self.a, self.b]
    }

    /// Which way the edge runs.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        if self.a.row == self.b.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Whether `point` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, point: GridPoint) -> bool {
        self.a == point || self.b == point
    }

    /// Whether both endpoints lie on a grid of `cols` x `rows` dots.
    #[must_use]
    pub const fn in_bounds(&self, cols: i32, rows: i32) -> bool {
        self.a.in_bounds(cols, rows) && self.b.in_bounds(cols, rows)
    }

    /// Flat `[c1, r1, c2, r2]` form used by state documents.
    #[must_use]
    pub const fn to_flat(&self) -> [i32; 4] {
        [self.a.col, self.a.row, self.b.col, self.b.row]
    }
}

impl TryFrom<[GridPoint; 2]> for Edge {
    type Error = GridError;

    fn try_from([p, q]: [GridPoint; 2]) -> Result<Self, Self::Error> {
        Self::between(p, q)
    }
}

impl From<Edge> for [GridPoint; 2] {
    fn from(edge: Edge) -> Self {
        edge.endpoints()
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})-({})", self.a, self.b)
    }
}
