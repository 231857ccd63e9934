use geoquiz::core::{Dictionary, EntityStore, QuizSession, SessionConfig};
use geoquiz::map::{DrawList, DrawOp, MapRenderer, Point, Projection, SurfaceSize};
use geoquiz::term::{Backdrop, MapCanvas, Rgb};
use geoquiz::types::{
    Coordinates, Difficulty, GeoEntity, MapPosition, ReferenceDimensions, FRAME_MS,
};

fn entity(id: &str, capital: &str, position: MapPosition) -> GeoEntity {
    GeoEntity {
        id: id.to_string(),
        display_name: capital.to_string(),
        container_name: format!("{capital}ia"),
        region: "Nowhere".to_string(),
        coordinates: Coordinates { lat: 0.0, lng: 0.0 },
        reference_position: position,
        population: 1,
        area: 1,
        icon: String::new(),
        alternate_names: vec![],
        difficulty: Difficulty::Medium,
    }
}

fn reference() -> ReferenceDimensions {
    ReferenceDimensions::new(100.0, 200.0).unwrap()
}

fn store() -> EntityStore {
    EntityStore::new(
        vec![
            entity("AA", "Alpha", MapPosition::OnMap { x: 50.0, y: 100.0 }),
            entity("BB", "Bravo", MapPosition::OnMap { x: 10.0, y: 20.0 }),
            entity("CC", "Charlie", MapPosition::OffMap),
        ],
        reference(),
    )
    .unwrap()
}

#[test]
fn projection_scales_each_axis_independently() {
    let p = Projection::new(reference(), SurfaceSize::new(50.0, 50.0));
    assert_eq!(p.project(50.0, 100.0), Point::new(25.0, 25.0));
    assert_eq!(p.project(100.0, 200.0), Point::new(50.0, 50.0));
    assert_eq!(p.project_position(MapPosition::OffMap), None);
}

#[test]
fn session_events_drive_the_pulse() {
    let store = store();
    let mut session = QuizSession::new(store.clone(), Dictionary::new(), SessionConfig::default());
    let mut renderer = MapRenderer::new();
    let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));

    for event in session.drain_events() {
        renderer.on_event(&event, session.store(), &mut surface);
    }
    assert!(renderer.is_animating());
    assert_eq!(renderer.active(), Some(session.active()));

    session.set_input("definitely wrong");
    session.submit().unwrap();
    for event in session.drain_events() {
        renderer.on_event(&event, session.store(), &mut surface);
    }
    assert!(!renderer.is_animating());
    assert_eq!(renderer.tick(FRAME_MS * 10, &store, &mut surface), 0);
}

#[test]
fn off_map_entities_are_never_drawn() {
    let store = store();
    let mut renderer = MapRenderer::new();
    let mut surface = DrawList::new(SurfaceSize::new(50.0, 50.0));
    let off_map = store.find_by_id("CC").unwrap();

    renderer.start(off_map, &store, &mut surface);
    let centers: Vec<Point> = surface
        .last_frame()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Fill { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    // Two on-map static markers, no highlight.
    assert_eq!(centers.len(), 2);
    assert!(centers.contains(&Point::new(25.0, 25.0)));
    assert!(centers.contains(&Point::new(5.0, 5.0)));
}

#[test]
fn canvas_shows_highlight_at_projected_position() {
    let store = store();
    let mut renderer = MapRenderer::new();
    // 50 columns × 25 rows = 50×50 pixels.
    let mut canvas = MapCanvas::new(50, 25);
    let alpha = store.find_by_id("AA").unwrap();

    renderer.start(alpha, &store, &mut canvas);
    renderer.stop(&store, &mut canvas);

    let center = canvas.pixel(25, 25).unwrap();
    assert_ne!(center, geoquiz::term::canvas::SEA);
    assert_eq!(canvas.pixel(45, 2), Some(geoquiz::term::canvas::SEA));
}

#[test]
fn canvas_frames_keep_the_map_image_under_markers() {
    let store = store();
    let mut renderer = MapRenderer::new();
    let mut canvas = MapCanvas::new(50, 25);
    canvas.set_backdrop(Backdrop::new(1, 1, vec![[120, 160, 90, 255]]));
    let alpha = store.find_by_id("AA").unwrap();

    renderer.start(alpha, &store, &mut canvas);
    assert_eq!(renderer.tick(FRAME_MS * 5, &store, &mut canvas), 5);

    assert_ne!(canvas.pixel(25, 25), Some(Rgb::new(120, 160, 90)));
    assert_eq!(canvas.pixel(45, 45), Some(Rgb::new(120, 160, 90)));
}
