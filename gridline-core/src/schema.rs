//! Import/export document for edge sets and the viewport.
//!
//! Edges are written as flat `[c1, r1, c2, r2]` arrays. On import the
//! document is read leniently: each edge entry is checked on its own and a
//! malformed one is skipped without affecting the rest.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Edge, GridPoint, GridResult, StateSnapshot, ViewportSnapshot};

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

/// Viewport information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportDocument {
    /// World x of the center.
    pub cx: f64,
    /// World y of the center.
    pub cy: f64,
    /// Zoom level.
    #[serde(default = "ViewportDocument::default_zoom")]
    pub zoom: f64,
}

impl ViewportDocument {
    const fn default_zoom() -> f64 {
        1.0
    }
}

impl From<ViewportSnapshot> for ViewportDocument {
    fn from(snapshot: ViewportSnapshot) -> Self {
        Self {
            cx: snapshot.cx,
            cy: snapshot.cy,
            zoom: snapshot.zoom,
        }
    }
}

impl From<ViewportDocument> for ViewportSnapshot {
    fn from(doc: ViewportDocument) -> Self {
        Self {
            cx: doc.cx,
            cy: doc.cy,
            zoom: doc.zoom,
        }
    }
}

/// Saved editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Format version.
    #[serde(default = "StateDocument::default_version")]
    pub version: u32,
    /// Edge entries; see [`parse_edge_entry`] for the accepted shapes.
    #[serde(default)]
    pub edges: Vec<Value>,
    /// Viewport to restore, if any. An unreadable viewport is dropped.
    #[serde(
        default,
        deserialize_with = "lenient_viewport",
        skip_serializing_if = "Option::is_none"
    )]
    pub viewport: Option<ViewportDocument>,
}

impl StateDocument {
    const fn default_version() -> u32 {
        DOCUMENT_VERSION
    }

    /// Build a document from a state snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            edges: snapshot
                .edges
                .iter()
                .map(|edge| Value::from(edge.to_flat().to_vec()))
                .collect(),
            viewport: Some(snapshot.viewport.into()),
        }
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> GridResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a document from JSON.
    ///
    /// Only syntactically invalid JSON (or a non-object document) is an
    /// error; bad edge entries survive parsing and are skipped on load.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON document object.
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Edges that parse, paired with the number of entries that did not.
    #[must_use]
    pub fn parsed_edges(&self) -> (Vec<Edge>, usize) {
        let mut edges = Vec::with_capacity(self.edges.len());
        let mut malformed = 0;
        for entry in &self.edges {
            match parse_edge_entry(entry) {
                Some(edge) => edges.push(edge),
                None => malformed += 1,
            }
        }
        (edges, malformed)
    }
}

/// Read one edge entry.
///
/// Accepts `[c1, r1, c2, r2]` and `[[c1, r1], [c2, r2]]`. Returns `None`
/// for wrong-length tuples, non-integer coordinates and non-adjacent points.
#[must_use]
pub fn parse_edge_entry(entry: &Value) -> Option<Edge> {
    let items = entry.as_array()?;
    let (p, q) = match items.as_slice() {
        [c1, r1, c2, r2] => (point(c1, r1)?, point(c2, r2)?),
        [a, b] => (pair(a)?, pair(b)?),
        _ => return None,
    };
    Edge::new(p, q)
}

fn pair(value: &Value) -> Option<GridPoint> {
    match value.as_array()?.as_slice() {
        [c, r] => point(c, r),
        _ => None,
    }
}

fn point(col: &Value, row: &Value) -> Option<GridPoint> {
    let col = i32::try_from(col.as_i64()?).ok()?;
    let row = i32::try_from(row.as_i64()?).ok()?;
    Some(GridPoint::new(col, row))
}

fn lenient_viewport<'de, D>(deserializer: D) -> Result<Option<ViewportDocument>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!("Ignoring unreadable viewport in state document: {e}");
            None
        }
    }))
}
