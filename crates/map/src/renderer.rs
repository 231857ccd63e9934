//! Map renderer - markers for every on-map entity plus the pulsing highlight.
//!
//! The pulse runs on a repeating [`FRAME_MS`] task in the renderer's own
//! [`Scheduler`]. It starts when an entity is presented and stops when the
//! answer is revealed or the entity changes; stopping draws one final static
//! frame right away so the surface never shows a half-updated state.

use tracing::trace;

use crate::animation::PulseAnimation;
use crate::core::{EntityStore, SessionEvent};
use crate::engine::{Scheduler, TaskId};
use crate::projection::Projection;
use crate::surface::{Surface, HIGHLIGHT, MARKER, OUTLINE};
use crate::types::{EntityIndex, FRAME_MS};

pub const MARKER_RADIUS: f64 = 6.0;
pub const MARKER_OUTLINE: f64 = 2.0;
pub const HIGHLIGHT_OUTLINE: f64 = 3.0;
pub const RIPPLE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameTick;

#[derive(Debug)]
pub struct MapRenderer {
    animation: PulseAnimation,
    frames: Scheduler<FrameTick>,
    frame_task: Option<TaskId>,
    fired: Vec<(TaskId, FrameTick)>,
    active: Option<EntityIndex>,
    frames_drawn: u64,
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            animation: PulseAnimation::new(),
            frames: Scheduler::new(),
            frame_task: None,
            fired: Vec::new(),
            active: None,
            frames_drawn: 0,
        }
    }

    pub fn active(&self) -> Option<EntityIndex> {
        self.active
    }

    pub fn animation(&self) -> &PulseAnimation {
        &self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.frame_task.is_some()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Highlight `active` and start the pulse from its initial state.
    pub fn start<S: Surface + ?Sized>(
        &mut self,
        active: EntityIndex,
        store: &EntityStore,
        surface: &mut S,
    ) {
        if let Some(id) = self.frame_task.take() {
            self.frames.cancel(id);
        }
        self.active = Some(active);
        self.animation.reset();
        self.frame_task = Some(self.frames.schedule_repeating(FRAME_MS, FrameTick));
        trace!(entity = active.0, "pulse started");
        self.draw(store, surface);
    }

    /// Cancel the pulse and draw the final static frame. No-op when idle.
    pub fn stop<S: Surface + ?Sized>(&mut self, store: &EntityStore, surface: &mut S) -> bool {
        let Some(id) = self.frame_task.take() else {
            return false;
        };
        self.frames.cancel(id);
        trace!("pulse stopped");
        self.draw(store, surface);
        true
    }

    /// React to a session transition.
    pub fn on_event<S: Surface + ?Sized>(
        &mut self,
        event: &SessionEvent,
        store: &EntityStore,
        surface: &mut S,
    ) {
        match *event {
            SessionEvent::EntityChanged { current, .. } => {
                self.stop(store, surface);
                self.start(current, store, surface);
            }
            SessionEvent::Revealed { .. } => {
                self.stop(store, surface);
            }
            SessionEvent::HintRevealed(_)
            | SessionEvent::CelebrationStarted
            | SessionEvent::CelebrationEnded { .. } => {}
        }
    }

    /// Advance the frame clock. Steps the pulse once per elapsed frame and
    /// redraws once if any frame fired. Returns the number of frames stepped.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        elapsed_ms: u32,
        store: &EntityStore,
        surface: &mut S,
    ) -> u32 {
        self.frames.advance_into(elapsed_ms, &mut self.fired);
        let fired = self.fired.len();
        if fired == 0 {
            return 0;
        }
        for _ in 0..fired {
            self.animation.step();
        }
        self.draw(store, surface);
        fired as u32
    }

    /// Redraw the whole map: static markers for every on-map entity, then the
    /// highlight for the active one. Off-map entities are never drawn.
    pub fn draw<S: Surface + ?Sized>(&mut self, store: &EntityStore, surface: &mut S) {
        let projection = Projection::new(store.reference(), surface.size());
        let scale = surface.marker_scale();
        surface.clear();

        for (index, entity) in store.iter() {
            if Some(index) == self.active {
                continue;
            }
            if let Some(p) = projection.project_position(entity.reference_position) {
                surface.fill_circle(p, MARKER_RADIUS * scale, MARKER);
                surface.stroke_circle(p, MARKER_RADIUS * scale, MARKER_OUTLINE * scale, OUTLINE);
            }
        }

        let highlighted = self
            .active
            .and_then(|i| store.get(i))
            .and_then(|e| projection.project_position(e.reference_position));
        if let Some(p) = highlighted {
            let a = &self.animation;
            let r = a.radius() * scale;
            surface.glow(p, r, a.glow() * scale, HIGHLIGHT);
            surface.fill_circle(p, r, HIGHLIGHT.with_alpha(a.opacity()));
            surface.stroke_circle(p, r, HIGHLIGHT_OUTLINE * scale, OUTLINE);
            surface.fill_circle(p, a.inner_radius() * scale, OUTLINE);
            surface.stroke_circle(
                p,
                a.ripple_radius() * scale,
                RIPPLE_WIDTH * scale,
                HIGHLIGHT.with_alpha(a.ripple_opacity()),
            );
        }

        self.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Point, SurfaceSize};
    use crate::surface::{DrawList, DrawOp};
    use crate::types::{
        Coordinates, Difficulty, GeoEntity, MapPosition, ReferenceDimensions,
    };

    fn entity(id: &str, position: MapPosition) -> GeoEntity {
        GeoEntity {
            id: id.into(),
            display_name: id.into(),
            container_name: id.into(),
            region: String::new(),
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            reference_position: position,
            population: 0,
            area: 0,
            icon: String::new(),
            alternate_names: Vec::new(),
            difficulty: Difficulty::Medium,
        }
    }

    fn store() -> EntityStore {
        EntityStore::new(
            vec![
                entity("A", MapPosition::OnMap { x: 50.0, y: 100.0 }),
                entity("B", MapPosition::OnMap { x: 0.0, y: 0.0 }),
                entity("C", MapPosition::OffMap),
            ],
            ReferenceDimensions::new(100.0, 200.0).unwrap(),
        )
        .unwrap()
    }

    fn fills(ops: &[DrawOp]) -> Vec<(Point, f64)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Fill { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_static_markers_skip_active_and_off_map() {
        let store = store();
        let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));
        let mut r = MapRenderer::new();
        r.start(EntityIndex(0), &store, &mut surface);

        let frame = surface.last_frame();
        let fills = fills(frame);
        // B static marker, A highlight disc and inner disc.
        assert_eq!(fills[0], (Point::new(0.0, 0.0), MARKER_RADIUS));
        assert_eq!(fills[1], (Point::new(25.0, 25.0), 12.0));
        assert_eq!(fills.len(), 3);
        assert!(matches!(frame.last(), Some(DrawOp::Stroke { radius, .. }) if *radius == 20.0));
    }

    #[test]
    fn test_off_map_active_draws_no_highlight() {
        let store = store();
        let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));
        let mut r = MapRenderer::new();
        r.start(EntityIndex(2), &store, &mut surface);
        assert!(r.is_animating());

        let frame = surface.last_frame();
        assert!(!frame.iter().any(|op| matches!(op, DrawOp::Glow { .. })));
        assert_eq!(fills(frame).len(), 2);
    }

    #[test]
    fn test_tick_steps_once_per_frame_and_draws_once() {
        let store = store();
        let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));
        let mut r = MapRenderer::new();
        r.start(EntityIndex(0), &store, &mut surface);
        surface.reset();

        assert_eq!(r.tick(FRAME_MS - 1, &store, &mut surface), 0);
        assert_eq!(surface.frames(), 0);
        assert_eq!(r.tick(FRAME_MS * 3, &store, &mut surface), 3);
        assert_eq!(surface.frames(), 1);
        assert_eq!(r.animation().ticks(), 6);
    }

    #[test]
    fn test_reveal_stops_and_draws_final_frame() {
        let store = store();
        let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));
        let mut r = MapRenderer::new();
        r.on_event(
            &SessionEvent::EntityChanged {
                previous: None,
                current: EntityIndex(0),
            },
            &store,
            &mut surface,
        );
        surface.reset();

        r.on_event(&SessionEvent::Revealed { correct: true }, &store, &mut surface);
        assert!(!r.is_animating());
        assert_eq!(surface.frames(), 1);

        // Stopped: time passing draws nothing.
        assert_eq!(r.tick(1000, &store, &mut surface), 0);
        assert_eq!(surface.frames(), 1);
        assert!(!r.stop(&store, &mut surface));
    }

    #[test]
    fn test_entity_change_restarts_animation() {
        let store = store();
        let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));
        let mut r = MapRenderer::new();
        r.start(EntityIndex(0), &store, &mut surface);
        r.tick(FRAME_MS * 10, &store, &mut surface);
        assert_ne!(r.animation().radius(), 12.0);

        r.on_event(
            &SessionEvent::EntityChanged {
                previous: Some(EntityIndex(0)),
                current: EntityIndex(1),
            },
            &store,
            &mut surface,
        );
        assert_eq!(r.active(), Some(EntityIndex(1)));
        assert_eq!(r.animation().radius(), 12.0);
        assert!(r.is_animating());
    }

    #[test]
    fn test_marker_scale_applies_to_radii() {
        let store = store();
        let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0)).with_marker_scale(0.5);
        let mut r = MapRenderer::new();
        r.start(EntityIndex(0), &store, &mut surface);
        assert_eq!(fills(surface.last_frame())[0].1, MARKER_RADIUS * 0.5);
    }
}
