//! The edge set and per-point degree counters.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Edge, GridPoint};

/// Maximum number of drawn edges that may touch one point.
pub const MAX_DEGREE: u8 = 2;

/// Why an edge addition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The edge is already drawn.
    Duplicate,
    /// An endpoint already touches two drawn edges.
    DegreeLimit,
    /// An endpoint lies outside the grid.
    OutOfBounds,
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The edge was drawn.
    Added,
    /// The edge was erased.
    Removed,
    /// The edge could not be drawn; nothing changed.
    Rejected(RejectReason),
}

impl ToggleOutcome {
    /// Whether the model changed.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Counts reported by a wholesale load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Entries that became drawn edges.
    pub loaded: usize,
    /// Entries that were malformed, out of bounds, duplicated or over the degree limit.
    pub skipped: usize,
}

/// All drawn edges of a grid together with the degree of every point.
///
/// Invariants: every point's degree equals the number of drawn edges touching
/// it, and never exceeds [`MAX_DEGREE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    cols: i32,
    rows: i32,
    edges: HashSet<Edge>,
    /// Only points with a non-zero degree are stored.
    degree: HashMap<GridPoint, u8>,
    revision: u64,
}

impl GridModel {
    /// Create an empty model for a grid of `cols` x `rows` dots.
    #[must_use]
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            edges: HashSet::new(),
            degree: HashMap::new(),
            revision: 0,
        }
    }

    /// Number of dot columns.
    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of dot rows.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether both endpoints of `edge` lie on this grid.
    #[must_use]
    pub const fn edge_in_bounds(&self, edge: &Edge) -> bool {
        edge.in_bounds(self.cols, self.rows)
    }

    /// Check whether `edge` could be drawn right now.
    ///
    /// # Errors
    ///
    /// Returns the reason the addition would be refused.
    pub fn check_add(&self, edge: &Edge) -> Result<(), RejectReason> {
        if !self.edge_in_bounds(edge) {
            return Err(RejectReason::OutOfBounds);
        }
        if self.edges.contains(edge) {
            return Err(RejectReason::Duplicate);
        }
        if edge
            .endpoints()
            .iter()
            .any(|p| self.degree_of(*p) >= MAX_DEGREE)
        {
            return Err(RejectReason::DegreeLimit);
        }
        Ok(())
    }

    /// Draw `edge` if the degree constraint allows it.
    ///
    /// Returns `false` without changing anything if the edge is already drawn,
    /// out of bounds, or either endpoint already has degree two.
    pub fn try_add(&mut self, edge: Edge) -> bool {
        if self.check_add(&edge).is_err() {
            return false;
        }
        self.insert_unchecked(edge);
        self.revision += 1;
        true
    }

    /// Erase `edge`. Removal is never blocked by the degree constraint.
    ///
    /// Returns `false` if the edge was not drawn.
    pub fn remove(&mut self, edge: &Edge) -> bool {
        if !self.edges.remove(edge) {
            return false;
        }
        for point in edge.endpoints() {
            if let Some(d) = self.degree.get_mut(&point) {
                *d -= 1;
                if *d == 0 {
                    self.degree.remove(&point);
                }
            }
        }
        self.revision += 1;
        true
    }

    /// Erase `edge` if drawn, otherwise try to draw it.
    pub fn toggle(&mut self, edge: Edge) -> ToggleOutcome {
        if self.remove(&edge) {
            tracing::debug!("Removed edge {edge}");
            return ToggleOutcome::Removed;
        }
        match self.check_add(&edge) {
            Ok(()) => {
                self.insert_unchecked(edge);
                self.revision += 1;
                tracing::debug!("Added edge {edge}");
                ToggleOutcome::Added
            }
            Err(reason) => {
                tracing::debug!("Rejected edge {edge}: {reason:?}");
                ToggleOutcome::Rejected(reason)
            }
        }
    }

    fn insert_unchecked(&mut self, edge: Edge) {
        for point in edge.endpoints() {
            *self.degree.entry(point).or_insert(0) += 1;
        }
        self.edges.insert(edge);
    }

    /// Number of drawn edges touching `point`.
    #[must_use]
    pub fn degree_of(&self, point: GridPoint) -> u8 {
        self.degree.get(&point).copied().unwrap_or(0)
    }

    /// Whether `edge` is drawn.
    #[must_use]
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// All drawn edges, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of drawn edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether no edges are drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Counter bumped by every successful mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Sorted copy of the drawn edges.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges.iter().copied().collect();
        edges.sort_unstable();
        edges
    }

    /// Erase every edge.
    pub fn clear(&mut self) {
        if self.edges.is_empty() {
            return;
        }
        self.edges.clear();
        self.degree.clear();
        self.revision += 1;
    }

    /// Replace the drawn edges wholesale, rebuilding the degree counters.
    ///
    /// Entries are applied in order; any that would be out of bounds,
    /// duplicated or over the degree limit are skipped individually.
    pub fn load<I>(&mut self, edges: I) -> LoadReport
    where
        I: IntoIterator<Item = Edge>,
    {
        self.edges.clear();
        self.degree.clear();
        let mut report = LoadReport::default();
        for edge in edges {
            if self.check_add(&edge).is_ok() {
                self.insert_unchecked(edge);
                report.loaded += 1;
            } else {
                report.skipped += 1;
            }
        }
        self.revision += 1;
        report
    }
}
