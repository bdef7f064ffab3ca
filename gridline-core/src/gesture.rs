//! Gesture recognition for pointer input.
//!
//! Turns a timed stream of [`PointerEvent`]s into pans, edge toggles,
//! double-tap zooms, pinch zooms and axis-following strokes.
//!
//! ```text
//!            down                 move > threshold
//!   Idle ──────────▶ PointerDown ─────────────────▶ Panning / Stroking
//!    ▲                   │ up                              │ up
//!    │                   ▼                                 │
//!    └──────── tap (toggle) or double tap (zoom) ◀─────────┘
//!
//!   second pointer down ─▶ Pinching ─▶ (lift) ─▶ Draining ─▶ Idle
//!   cancel ─▶ Idle
//! ```
//!
//! The double-tap window is judged against event timestamps only; nothing
//! here ever fires on its own.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Edge, EdgeLocator, GridConfig, GridModel, InteractionMode, Orientation, PointerEvent,
    PointerPhase, Stroke, ToggleOutcome, Vec2, Viewport,
};

/// Gesture tuning taken from [`GridConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Maximum time between a completed tap and the next press.
    pub double_tap_delay_ms: u64,
    /// Maximum screen distance between the two taps of a double tap.
    pub double_tap_radius_px: f64,
    /// Screen displacement after which a press becomes a drag.
    pub drag_threshold_px: f64,
    /// Screen radius within which a tap acts on the nearest edge.
    pub hit_radius_px: f64,
    /// Zoom a double tap zooms in to.
    pub double_tap_zoom: f64,
    /// Zoom a double tap zooms back out to.
    pub initial_zoom: f64,
}

impl From<&GridConfig> for GestureSettings {
    fn from(config: &GridConfig) -> Self {
        Self {
            double_tap_delay_ms: config.double_tap_delay_ms,
            double_tap_radius_px: config.double_tap_radius_px,
            drag_threshold_px: config.drag_threshold_px,
            hit_radius_px: config.hit_radius_px,
            double_tap_zoom: config.double_tap_zoom,
            initial_zoom: config.initial_zoom,
        }
    }
}

/// Coarse state of the interpreter, for display and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// No gesture in progress.
    Idle,
    /// A pointer is down; tap or drag not yet decided.
    PointerDown,
    /// Dragging the view.
    Panning,
    /// Dragging an axis-following stroke.
    Stroking,
    /// Two pointers are zooming the view.
    Pinching,
    /// A pinch ended or a pointer was cancelled; the pointers still down
    /// are ignored until they lift.
    Draining,
}

/// Something a pointer event caused.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GestureEffect {
    /// The view moved.
    Panned,
    /// A tap or stroke toggled an edge (or tried to).
    Toggled {
        /// The edge acted on.
        edge: Edge,
        /// What the model did.
        outcome: ToggleOutcome,
    },
    /// A tap landed too far from every edge.
    Missed {
        /// Canvas x of the tap.
        x: f64,
        /// Canvas y of the tap.
        y: f64,
    },
    /// A double tap zoomed the view.
    DoubleTapZoom {
        /// Zoom after the gesture.
        zoom: f64,
    },
    /// A pinch zoomed or moved the view.
    Pinched {
        /// Zoom after the move.
        zoom: f64,
    },
    /// The platform cancelled the gesture; all pending state was dropped.
    Cancelled,
}

impl GestureEffect {
    /// Whether the grid model changed.
    #[must_use]
    pub fn changed_edges(&self) -> bool {
        matches!(self, Self::Toggled { outcome, .. } if outcome.is_mutation())
    }

    /// Whether the viewport changed.
    #[must_use]
    pub const fn changed_view(&self) -> bool {
        matches!(
            self,
            Self::Panned | Self::DoubleTapZoom { .. } | Self::Pinched { .. }
        )
    }
}

/// The state a gesture acts on.
#[derive(Debug)]
pub struct GestureTarget<'a> {
    /// Edges toggled by taps and strokes.
    pub model: &'a mut GridModel,
    /// View moved by pans and zooms.
    pub viewport: &'a mut Viewport,
    /// Hit testing for taps and stroke anchors.
    pub locator: &'a EdgeLocator,
    /// What a single-pointer drag does.
    pub mode: InteractionMode,
}

/// Per-press record, created on pointer-down and dropped on up or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Session {
    pointer_id: u32,
    down: Vec2,
    start_center: Vec2,
    /// World point to zoom on if this press completes a double tap.
    double_tap: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    ids: [u32; 2],
    start_distance: f64,
    start_zoom: f64,
    last_mid: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastTap {
    at_ms: u64,
    position: Vec2,
}

#[derive(Debug, Clone)]
enum GestureState {
    Idle,
    PointerDown(Session),
    Panning(Session),
    Stroking(Session, Box<Stroke>),
    Pinching(Pinch),
    /// A pinch ended while a finger is still down; ignore it until it lifts.
    Draining,
}

/// Classifies pointer events into gestures and applies them.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    settings: GestureSettings,
    state: GestureState,
    pointers: HashMap<u32, Vec2>,
    last_tap: Option<LastTap>,
}

impl GestureInterpreter {
    /// Create an idle interpreter.
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            state: GestureState::Idle,
            pointers: HashMap::new(),
            last_tap: None,
        }
    }

    /// Current tuning.
    #[must_use]
    pub const fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Coarse state for display.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.state {
            GestureState::Idle => GesturePhase::Idle,
            GestureState::Draining => GesturePhase::Draining,
            GestureState::PointerDown(_) => GesturePhase::PointerDown,
            GestureState::Panning(_) => GesturePhase::Panning,
            GestureState::Stroking(..) => GesturePhase::Stroking,
            GestureState::Pinching(_) => GesturePhase::Pinching,
        }
    }

    /// Whether a completed tap is remembered for double-tap detection.
    #[must_use]
    pub fn double_tap_armed(&self) -> bool {
        self.last_tap.is_some()
    }

    /// Drop every gesture in progress and the double-tap memory.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.pointers.clear();
        self.last_tap = None;
    }

    /// Process one pointer event.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        target: &mut GestureTarget<'_>,
    ) -> Vec<GestureEffect> {
        match event.phase {
            PointerPhase::Down => self.on_down(event, target),
            PointerPhase::Move => self.on_move(event, target),
            PointerPhase::Up => self.on_up(event, target),
            PointerPhase::Cancel => self.on_cancel(event),
        }
    }

    fn on_down(
        &mut self,
        event: &PointerEvent,
        target: &mut GestureTarget<'_>,
    ) -> Vec<GestureEffect> {
        let pos = event.position();
        self.pointers.insert(event.pointer_id, pos);

        let idle = matches!(self.state, GestureState::Idle);
        let single = matches!(
            self.state,
            GestureState::PointerDown(_)
                | GestureState::Panning(_)
                | GestureState::Stroking(..)
                | GestureState::Draining
        );
        match self.pointers.len() {
            1 if idle => {
                let mut session = Session {
                    pointer_id: event.pointer_id,
                    down: pos,
                    start_center: target.viewport.center(),
                    double_tap: None,
                };
                if self.is_double_tap(event) {
                    session.double_tap = Some(target.viewport.screen_to_world(pos));
                    // a third quick tap must not chain onto this one
                    self.last_tap = None;
                    tracing::debug!("Double tap detected at ({:.1}, {:.1})", pos.x, pos.y);
                }
                self.state = GestureState::PointerDown(session);
            }
            2 if single => self.start_pinch(target.viewport),
            _ => {}
        }
        Vec::new()
    }

    fn on_move(
        &mut self,
        event: &PointerEvent,
        target: &mut GestureTarget<'_>,
    ) -> Vec<GestureEffect> {
        let pos = event.position();
        match self.pointers.get_mut(&event.pointer_id) {
            Some(tracked) => *tracked = pos,
            None => return Vec::new(),
        }

        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        let (state, effects) = match state {
            GestureState::PointerDown(session) if session.pointer_id == event.pointer_id => {
                let (dx, dy) = (pos.x - session.down.x, pos.y - session.down.y);
                if dx.hypot(dy) > self.settings.drag_threshold_px {
                    self.begin_drag(session, pos, target)
                } else {
                    (GestureState::PointerDown(session), Vec::new())
                }
            }
            GestureState::Panning(session) if session.pointer_id == event.pointer_id => {
                let effects = pan(&session, pos, target.viewport);
                (GestureState::Panning(session), effects)
            }
            GestureState::Stroking(session, mut stroke)
                if session.pointer_id == event.pointer_id =>
            {
                let effects = toggle_all(stroke.advance(pos), target.model);
                (GestureState::Stroking(session, stroke), effects)
            }
            GestureState::Pinching(mut pinch) if pinch.ids.contains(&event.pointer_id) => {
                let effects = self.pinch_move(&mut pinch, target.viewport);
                (GestureState::Pinching(pinch), effects)
            }
            other => (other, Vec::new()),
        };
        self.state = state;
        effects
    }

    fn on_up(
        &mut self,
        event: &PointerEvent,
        target: &mut GestureTarget<'_>,
    ) -> Vec<GestureEffect> {
        if self.pointers.remove(&event.pointer_id).is_none() {
            return Vec::new();
        }
        let pos = event.position();

        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::PointerDown(session) if session.pointer_id == event.pointer_id => {
                if let Some(world) = session.double_tap {
                    return vec![self.double_tap_zoom(world, target.viewport)];
                }
                let effect = tap(pos, &self.settings, target);
                self.last_tap = Some(LastTap {
                    at_ms: event.timestamp_ms,
                    position: pos,
                });
                vec![effect]
            }
            GestureState::Panning(session) | GestureState::Stroking(session, _)
                if session.pointer_id == event.pointer_id =>
            {
                Vec::new()
            }
            GestureState::Pinching(pinch) if pinch.ids.contains(&event.pointer_id) => {
                self.state = self.after_release();
                Vec::new()
            }
            GestureState::Draining => {
                self.state = self.after_release();
                Vec::new()
            }
            other => {
                self.state = other;
                Vec::new()
            }
        }
    }

    fn on_cancel(&mut self, event: &PointerEvent) -> Vec<GestureEffect> {
        self.pointers.remove(&event.pointer_id);
        self.last_tap = None;
        self.state = self.after_release();
        tracing::debug!("Pointer {} cancelled, gesture reset", event.pointer_id);
        vec![GestureEffect::Cancelled]
    }

    fn after_release(&self) -> GestureState {
        if self.pointers.is_empty() {
            GestureState::Idle
        } else {
            GestureState::Draining
        }
    }

    fn is_double_tap(&self, event: &PointerEvent) -> bool {
        self.last_tap.is_some_and(|last| {
            event.timestamp_ms.saturating_sub(last.at_ms) <= self.settings.double_tap_delay_ms
                && event.position().distance(last.position) < self.settings.double_tap_radius_px
        })
    }

    fn begin_drag(
        &self,
        session: Session,
        pos: Vec2,
        target: &mut GestureTarget<'_>,
    ) -> (GestureState, Vec<GestureEffect>) {
        let session = Session {
            double_tap: None,
            ..session
        };

        if target.mode == InteractionMode::Draw {
            let transform = target.viewport.transform();
            let radius = transform.screen_len_to_world(self.settings.hit_radius_px);
            let anchor = target
                .locator
                .locate_within(transform.screen_to_world(session.down), radius);
            if let Some(hit) = anchor {
                let (dx, dy) = (pos.x - session.down.x, pos.y - session.down.y);
                let axis = if dx.abs() >= dy.abs() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let mut stroke = Stroke::begin(
                    hit.edge,
                    session.down,
                    axis,
                    transform,
                    *target.locator.geometry(),
                    self.settings.drag_threshold_px,
                );
                let effects = toggle_all(stroke.advance(pos), target.model);
                return (GestureState::Stroking(session, Box::new(stroke)), effects);
            }
        }

        tracing::debug!("Drag classified as pan");
        let effects = pan(&session, pos, target.viewport);
        (GestureState::Panning(session), effects)
    }

    fn start_pinch(&mut self, viewport: &Viewport) {
        let mut ids: Vec<u32> = self.pointers.keys().copied().collect();
        ids.sort_unstable();
        let (Some(&a), Some(&b)) = (ids.first(), ids.get(1)) else {
            return;
        };
        let (pa, pb) = (self.pointers[&a], self.pointers[&b]);
        self.state = GestureState::Pinching(Pinch {
            ids: [a, b],
            start_distance: pa.distance(pb),
            start_zoom: viewport.zoom(),
            last_mid: pa.midpoint(pb),
        });
        tracing::debug!("Pinch started with pointers {a} and {b}");
    }

    fn pinch_move(&self, pinch: &mut Pinch, viewport: &mut Viewport) -> Vec<GestureEffect> {
        let (Some(&pa), Some(&pb)) = (
            self.pointers.get(&pinch.ids[0]),
            self.pointers.get(&pinch.ids[1]),
        ) else {
            return Vec::new();
        };
        let distance = pa.distance(pb);
        let mid = pa.midpoint(pb);
        let zoom = if pinch.start_distance > f64::EPSILON {
            pinch.start_zoom * distance / pinch.start_distance
        } else {
            viewport.zoom()
        };

        let world = viewport.screen_to_world(pinch.last_mid);
        let changed = viewport.zoom_about(zoom, world, mid);
        pinch.last_mid = mid;
        if changed {
            vec![GestureEffect::Pinched {
                zoom: viewport.zoom(),
            }]
        } else {
            Vec::new()
        }
    }

    /// Zoom in on `world`, or back out if already zoomed in.
    fn double_tap_zoom(&self, world: Vec2, viewport: &mut Viewport) -> GestureEffect {
        // both targets must be zooms the viewport can actually reach
        let (min, max) = viewport.zoom_bounds();
        let zoom_in = self.settings.double_tap_zoom.max(min).min(max);
        let zoom = if viewport.zoom() < zoom_in - f64::EPSILON {
            zoom_in
        } else {
            self.settings.initial_zoom.max(min).min(max)
        };
        viewport.zoom_to(zoom, Some(world));
        tracing::debug!("Double tap zoom to {:.2}", viewport.zoom());
        GestureEffect::DoubleTapZoom {
            zoom: viewport.zoom(),
        }
    }
}

fn pan(session: &Session, pos: Vec2, viewport: &mut Viewport) -> Vec<GestureEffect> {
    let (dx, dy) = (pos.x - session.down.x, pos.y - session.down.y);
    if viewport.pan_from(session.start_center, dx, dy) {
        vec![GestureEffect::Panned]
    } else {
        Vec::new()
    }
}

fn tap(pos: Vec2, settings: &GestureSettings, target: &mut GestureTarget<'_>) -> GestureEffect {
    let transform = target.viewport.transform();
    let radius = transform.screen_len_to_world(settings.hit_radius_px);
    match target
        .locator
        .locate_within(transform.screen_to_world(pos), radius)
    {
        Some(hit) => GestureEffect::Toggled {
            edge: hit.edge,
            outcome: target.model.toggle(hit.edge),
        },
        None => {
            tracing::debug!("Tap at ({:.1}, {:.1}) missed every edge", pos.x, pos.y);
            GestureEffect::Missed { x: pos.x, y: pos.y }
        }
    }
}

fn toggle_all(edges: Vec<Edge>, model: &mut GridModel) -> Vec<GestureEffect> {
    edges
        .into_iter()
        .map(|edge| GestureEffect::Toggled {
            edge,
            outcome: model.toggle(edge),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridGeometry;

    struct Rig {
        config: GridConfig,
        model: GridModel,
        viewport: Viewport,
        locator: EdgeLocator,
        gestures: GestureInterpreter,
        mode: InteractionMode,
    }

    impl Rig {
        fn new() -> Self {
            Self::with_config(GridConfig::default())
        }

        /// Hit radius small enough that a cell center misses every edge.
        fn narrow() -> Self {
            Self::with_config(GridConfig {
                hit_radius_px: 6.0,
                ..GridConfig::default()
            })
        }

        fn with_config(config: GridConfig) -> Self {
            Self {
                model: GridModel::new(config.cols, config.rows),
                viewport: Viewport::new(&config, 800.0, 600.0),
                locator: EdgeLocator::new(GridGeometry::from_config(&config)),
                gestures: GestureInterpreter::new(GestureSettings::from(&config)),
                mode: InteractionMode::Navigate,
                config,
            }
        }

        fn send(&mut self, event: PointerEvent) -> Vec<GestureEffect> {
            let mut target = GestureTarget {
                model: &mut self.model,
                viewport: &mut self.viewport,
                locator: &self.locator,
                mode: self.mode,
            };
            self.gestures.handle(&event, &mut target)
        }

        fn tap(&mut self, x: f64, y: f64, t: u64) -> Vec<GestureEffect> {
            self.send(PointerEvent::down(1, x, y, t));
            self.send(PointerEvent::up(1, x, y, t + 40))
        }
    }

    #[test]
    fn small_jitter_stays_a_tap() {
        let mut rig = Rig::new();
        rig.send(PointerEvent::down(1, 62.0, 52.0, 0));
        assert!(rig.send(PointerEvent::moved(1, 64.0, 53.0, 10)).is_empty());
        assert_eq!(rig.gestures.phase(), GesturePhase::PointerDown);
        let effects = rig.send(PointerEvent::up(1, 64.0, 53.0, 20));
        assert_eq!(
            effects,
            vec![GestureEffect::Toggled {
                edge: Edge::horizontal(2, 2),
                outcome: ToggleOutcome::Added,
            }]
        );
        assert!(rig.gestures.double_tap_armed());
    }

    #[test]
    fn tap_far_from_edges_misses() {
        let mut rig = Rig::narrow();
        // a cell center is half a spacing from the nearest edge midpoints
        let effects = rig.tap(62.0, 62.0, 0);
        assert_eq!(effects, vec![GestureEffect::Missed { x: 62.0, y: 62.0 }]);
        assert!(rig.model.is_empty());
    }

    #[test]
    fn drag_beyond_threshold_pans() {
        let mut rig = Rig::new();
        rig.viewport.center_on(Vec2::new(1000.0, 1000.0));
        rig.send(PointerEvent::down(1, 400.0, 300.0, 0));
        let effects = rig.send(PointerEvent::moved(1, 380.0, 290.0, 16));
        assert_eq!(effects, vec![GestureEffect::Panned]);
        assert_eq!(rig.gestures.phase(), GesturePhase::Panning);
        assert!((rig.viewport.center().x - 1020.0).abs() < 1e-9);
        assert!((rig.viewport.center().y - 1010.0).abs() < 1e-9);

        assert!(rig.send(PointerEvent::up(1, 380.0, 290.0, 32)).is_empty());
        assert!(rig.model.is_empty());
        assert!(!rig.gestures.double_tap_armed());
    }

    #[test]
    fn second_tap_zooms_instead_of_toggling() {
        let mut rig = Rig::new();
        rig.tap(62.0, 52.0, 0);
        assert_eq!(rig.model.edge_count(), 1);

        let effects = rig.tap(64.0, 54.0, 150);
        assert_eq!(effects, vec![GestureEffect::DoubleTapZoom { zoom: 3.0 }]);
        assert_eq!(rig.model.edge_count(), 1);
        assert!(!rig.gestures.double_tap_armed());
    }

    #[test]
    fn slow_or_distant_second_tap_is_single() {
        let mut rig = Rig::new();
        rig.tap(62.0, 52.0, 0);
        let effects = rig.tap(62.0, 52.0, 1000);
        assert!(matches!(
            effects.as_slice(),
            [GestureEffect::Toggled {
                outcome: ToggleOutcome::Removed,
                ..
            }]
        ));

        let effects = rig.tap(202.0, 52.0, 1100);
        assert!(matches!(effects.as_slice(), [GestureEffect::Toggled { .. }]));
    }

    #[test]
    fn double_tap_toggles_zoom_back_out() {
        let mut rig = Rig::new();
        rig.tap(300.0, 300.0, 0);
        rig.tap(300.0, 300.0, 100);
        assert!((rig.viewport.zoom() - 3.0).abs() < 1e-9);
        rig.tap(300.0, 300.0, 1000);
        let effects = rig.tap(300.0, 300.0, 1100);
        assert_eq!(effects, vec![GestureEffect::DoubleTapZoom { zoom: 1.0 }]);
    }

    #[test]
    fn double_tap_target_above_zoom_bound_still_toggles() {
        // unvalidated config whose double-tap zoom the viewport cannot reach
        let mut rig = Rig::with_config(GridConfig {
            zoom_max: 2.0,
            ..GridConfig::default()
        });
        rig.tap(300.0, 300.0, 0);
        let effects = rig.tap(300.0, 300.0, 100);
        assert_eq!(effects, vec![GestureEffect::DoubleTapZoom { zoom: 2.0 }]);
        rig.tap(300.0, 300.0, 1000);
        let effects = rig.tap(300.0, 300.0, 1100);
        assert_eq!(effects, vec![GestureEffect::DoubleTapZoom { zoom: 1.0 }]);
    }

    #[test]
    fn cancel_discards_pending_double_tap() {
        let mut rig = Rig::new();
        rig.tap(62.0, 52.0, 0);
        rig.send(PointerEvent::down(1, 62.0, 52.0, 100));
        assert_eq!(
            rig.send(PointerEvent::cancel(1, 120)),
            vec![GestureEffect::Cancelled]
        );
        assert_eq!(rig.gestures.phase(), GesturePhase::Idle);
        assert!(!rig.gestures.double_tap_armed());
        // the up that follows a cancel is ignored
        assert!(rig.send(PointerEvent::up(1, 62.0, 52.0, 130)).is_empty());
        assert!((rig.viewport.zoom() - rig.config.initial_zoom).abs() < 1e-9);
    }

    #[test]
    fn pinch_zooms_about_midpoint() {
        let mut rig = Rig::new();
        rig.viewport.center_on(Vec2::new(1000.0, 1000.0));
        rig.send(PointerEvent::down(1, 300.0, 300.0, 0));
        rig.send(PointerEvent::down(2, 500.0, 300.0, 5));
        assert_eq!(rig.gestures.phase(), GesturePhase::Pinching);

        let world_mid = rig.viewport.screen_to_world(Vec2::new(400.0, 300.0));
        let effects = rig.send(PointerEvent::moved(2, 700.0, 300.0, 20));
        // fingers spread from 200 to 400 px apart
        assert!((rig.viewport.zoom() - 2.0).abs() < 1e-9);
        assert_eq!(effects, vec![GestureEffect::Pinched { zoom: 2.0 }]);
        let mid_now = rig.viewport.world_to_screen(world_mid);
        assert!((mid_now.x - 500.0).abs() < 1e-6);
        assert!((mid_now.y - 300.0).abs() < 1e-6);

        // lifting one finger ends the pinch; the other is ignored until it lifts
        rig.send(PointerEvent::up(2, 700.0, 300.0, 40));
        assert_eq!(rig.gestures.phase(), GesturePhase::Draining);
        assert!(rig.send(PointerEvent::moved(1, 100.0, 100.0, 50)).is_empty());
        assert!(rig.send(PointerEvent::up(1, 100.0, 100.0, 60)).is_empty());
        assert_eq!(rig.gestures.phase(), GesturePhase::Idle);
        assert!(rig.model.is_empty());
    }

    #[test]
    fn cancel_during_pinch_drains_remaining_pointer() {
        let mut rig = Rig::new();
        rig.viewport.center_on(Vec2::new(1000.0, 1000.0));
        rig.send(PointerEvent::down(1, 300.0, 300.0, 0));
        rig.send(PointerEvent::down(2, 500.0, 300.0, 5));
        assert_eq!(
            rig.send(PointerEvent::cancel(2, 10)),
            vec![GestureEffect::Cancelled]
        );
        assert_eq!(rig.gestures.phase(), GesturePhase::Draining);

        let center = rig.viewport.center();
        assert!(rig.send(PointerEvent::moved(1, 100.0, 100.0, 20)).is_empty());
        assert_eq!(rig.viewport.center(), center);
        assert!((rig.viewport.zoom() - 1.0).abs() < 1e-9);
        assert!(rig.send(PointerEvent::up(1, 100.0, 100.0, 30)).is_empty());
        assert_eq!(rig.gestures.phase(), GesturePhase::Idle);
        assert!(rig.model.is_empty());
    }

    #[test]
    fn cancel_during_stroke_stops_toggling() {
        let mut rig = Rig::new();
        rig.mode = InteractionMode::Draw;
        let (x, y) = (82.0, 112.0);
        rig.send(PointerEvent::down(1, x, y, 0));
        rig.send(PointerEvent::moved(1, x + 21.0, y, 10));
        assert_eq!(rig.gestures.phase(), GesturePhase::Stroking);
        assert_eq!(rig.model.edge_count(), 1);

        assert_eq!(
            rig.send(PointerEvent::cancel(1, 20)),
            vec![GestureEffect::Cancelled]
        );
        assert_eq!(rig.gestures.phase(), GesturePhase::Idle);
        // edges already drawn stay; nothing more is toggled
        assert!(rig.send(PointerEvent::moved(1, x + 81.0, y, 30)).is_empty());
        assert!(rig.send(PointerEvent::up(1, x + 81.0, y, 40)).is_empty());
        assert_eq!(rig.model.edge_count(), 1);
        assert!(rig.model.contains(&Edge::horizontal(4, 5)));
    }

    #[test]
    fn stroke_to_extreme_coordinates_stops_at_grid_edge() {
        let mut rig = Rig::new();
        rig.mode = InteractionMode::Draw;
        let (x, y) = (82.0, 112.0);
        rig.send(PointerEvent::down(1, x, y, 0));
        let effects = rig.send(PointerEvent::moved(1, 1.0e12, y, 10));
        // horizontal edges (4,5) through (98,5) on a 100-column grid
        assert_eq!(effects.len(), 95);
        assert!(rig.model.contains(&Edge::horizontal(98, 5)));
        assert_eq!(rig.model.edge_count(), 95);

        let effects = rig.send(PointerEvent::moved(1, -1.0e12, y, 20));
        // (0,5) through (2,5); everything between was already visited
        assert_eq!(effects.len(), 3);
        assert!(rig.model.contains(&Edge::horizontal(0, 5)));
        rig.send(PointerEvent::up(1, -1.0e12, y, 30));
        assert_eq!(rig.gestures.phase(), GesturePhase::Idle);
    }

    #[test]
    fn draw_mode_drag_strokes_along_row() {
        let mut rig = Rig::new();
        rig.mode = InteractionMode::Draw;
        // midpoint of the horizontal edge (3,5)-(4,5) at zoom 1
        let (x, y) = (82.0, 112.0);
        rig.send(PointerEvent::down(1, x, y, 0));
        let effects = rig.send(PointerEvent::moved(1, x + 21.0, y, 10));
        assert_eq!(rig.gestures.phase(), GesturePhase::Stroking);
        assert_eq!(
            effects,
            vec![GestureEffect::Toggled {
                edge: Edge::horizontal(4, 5),
                outcome: ToggleOutcome::Added,
            }]
        );
        assert!(!rig.model.contains(&Edge::horizontal(3, 5)));
    }

    #[test]
    fn draw_mode_drag_away_from_edges_pans() {
        let mut rig = Rig::narrow();
        rig.mode = InteractionMode::Draw;
        rig.viewport.center_on(Vec2::new(1000.0, 1000.0));
        let down = rig
            .viewport
            .world_to_screen(Vec2::new(12.0 + 40.0 * 20.0 + 10.0, 12.0 + 40.0 * 20.0 + 10.0));
        rig.send(PointerEvent::down(1, down.x, down.y, 0));
        let effects = rig.send(PointerEvent::moved(1, down.x + 30.0, down.y, 10));
        assert_eq!(effects, vec![GestureEffect::Panned]);
    }
}
