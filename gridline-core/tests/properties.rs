//! Property Tests
//!
//! Randomized checks of the invariants every operation must preserve:
//! - Degree bound and degree bookkeeping under arbitrary toggles
//! - World/screen transforms are inverses
//! - Edge identity does not depend on endpoint order
//! - The viewport never leaves the grid

use std::collections::HashMap;

use gridline_core::{
    CoordinateTransform, Edge, GridConfig, GridModel, GridPoint, Vec2, Viewport, ViewportRect,
    MAX_DEGREE,
};
use proptest::prelude::*;

const COLS: i32 = 6;
const ROWS: i32 = 6;

#[derive(Debug, Clone, Copy)]
enum Op {
    Toggle(Edge),
    Clear,
}

fn edge_strategy() -> impl Strategy<Value = Edge> {
    // one column and row beyond the grid so out-of-bounds edges show up too
    (-1..=COLS, -1..=ROWS, any::<bool>()).prop_map(|(col, row, horizontal)| {
        if horizontal {
            Edge::horizontal(col, row)
        } else {
            Edge::vertical(col, row)
        }
    })
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        20 => edge_strategy().prop_map(Op::Toggle),
        1 => Just(Op::Clear),
    ]
}

fn assert_invariants(model: &GridModel) {
    let mut counted: HashMap<GridPoint, u8> = HashMap::new();
    for edge in model.edges() {
        assert!(edge.in_bounds(COLS, ROWS), "{edge} is off the grid");
        for point in edge.endpoints() {
            *counted.entry(point).or_insert(0) += 1;
        }
    }
    for col in -1..=COLS {
        for row in -1..=ROWS {
            let point = GridPoint::new(col, row);
            let expected = counted.get(&point).copied().unwrap_or(0);
            assert!(expected <= MAX_DEGREE, "{point} has degree {expected}");
            assert_eq!(model.degree_of(point), expected, "degree of {point}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]

    #[test]
    fn toggles_preserve_degree_invariants(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut model = GridModel::new(COLS, ROWS);
        for op in ops {
            let before = model.revision();
            match op {
                Op::Toggle(edge) => {
                    let outcome = model.toggle(edge);
                    prop_assert_eq!(outcome.is_mutation(), model.revision() != before);
                }
                Op::Clear => {
                    model.clear();
                    prop_assert!(model.is_empty());
                }
            }
            assert_invariants(&model);
        }
    }

    #[test]
    fn load_never_breaks_degree_invariants(edges in prop::collection::vec(edge_strategy(), 0..60)) {
        let mut model = GridModel::new(COLS, ROWS);
        let total = edges.len();
        let report = model.load(edges);
        prop_assert_eq!(report.loaded + report.skipped, total);
        prop_assert_eq!(report.loaded, model.edge_count());
        assert_invariants(&model);
    }

    #[test]
    fn toggling_twice_restores_the_model(
        setup in prop::collection::vec(edge_strategy(), 0..30),
        edge in edge_strategy(),
    ) {
        let mut model = GridModel::new(COLS, ROWS);
        model.load(setup);
        let before = model.snapshot();
        if model.toggle(edge).is_mutation() {
            model.toggle(edge);
        }
        prop_assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn edge_identity_ignores_endpoint_order(
        col in -50..50_i32,
        row in -50..50_i32,
        horizontal in any::<bool>(),
    ) {
        let p = GridPoint::new(col, row);
        let q = if horizontal {
            GridPoint::new(col + 1, row)
        } else {
            GridPoint::new(col, row + 1)
        };
        let forward = Edge::new(p, q);
        let backward = Edge::new(q, p);
        prop_assert!(forward.is_some());
        prop_assert_eq!(forward, backward);
        let edge = forward.expect("adjacent");
        prop_assert!(edge.start() < edge.end());
    }

    #[test]
    fn screen_world_round_trip(
        left in -500.0..2000.0_f64,
        top in -500.0..2000.0_f64,
        canvas_w in 100.0..2000.0_f64,
        canvas_h in 100.0..2000.0_f64,
        zoom in 0.25..8.0_f64,
        x in -100.0..2100.0_f64,
        y in -100.0..2100.0_f64,
    ) {
        let rect = ViewportRect { left, top, width: canvas_w / zoom, height: canvas_h / zoom };
        let transform = CoordinateTransform::new(rect, canvas_w, canvas_h, zoom);
        let world = Vec2::new(x, y);
        let back = transform.screen_to_world(transform.world_to_screen(world));
        prop_assert!((back.x - world.x).abs() < 1e-6);
        prop_assert!((back.y - world.y).abs() < 1e-6);
    }

    #[test]
    fn viewport_stays_inside_the_grid(
        zoom in 0.25..8.0_f64,
        pans in prop::collection::vec((-3000.0..3000.0_f64, -3000.0..3000.0_f64), 1..10),
    ) {
        let config = GridConfig::with_size(40, 30);
        let full_w = 2.0 * config.border + 39.0 * config.spacing;
        let full_h = 2.0 * config.border + 29.0 * config.spacing;
        let mut viewport = Viewport::new(&config, 800.0, 600.0);
        viewport.zoom_to(zoom, None);
        for (dx, dy) in pans {
            viewport.pan(dx, dy);
            let rect = viewport.rect();
            if rect.width <= full_w {
                prop_assert!(rect.left >= -1e-6 && rect.right() <= full_w + 1e-6);
            } else {
                prop_assert!((viewport.center().x - full_w / 2.0).abs() < 1e-6);
            }
            if rect.height <= full_h {
                prop_assert!(rect.top >= -1e-6 && rect.bottom() <= full_h + 1e-6);
            } else {
                prop_assert!((viewport.center().y - full_h / 2.0).abs() < 1e-6);
            }
        }
    }
}
