//! Glue between the session, the map renderer and the terminal view.
//!
//! [`QuizApp`] owns the persistent map canvas. Session events are routed to
//! the renderer after every action and tick, so the canvas always shows the
//! frame matching the current phase.

use crossterm::event::KeyEvent;
use tracing::{debug, warn};

use crate::core::{QuizError, QuizSession, SessionSnapshot};
use crate::data::ReferenceImage;
use crate::input::{handle_key_event, should_quit, LineEditor};
use crate::map::MapRenderer;
use crate::term::{Backdrop, FrameBuffer, MapCanvas, QuizView, Viewport};
use crate::types::QuizAction;

#[derive(Debug)]
pub struct QuizApp {
    session: QuizSession,
    renderer: MapRenderer,
    canvas: MapCanvas,
    editor: LineEditor,
    view: QuizView,
    viewport: Viewport,
}

impl QuizApp {
    pub fn new(session: QuizSession, viewport: Viewport) -> Self {
        let mut app = Self {
            session,
            renderer: MapRenderer::new(),
            canvas: MapCanvas::new(0, 0),
            editor: LineEditor::new(),
            view: QuizView::default(),
            viewport,
        };
        app.resize(viewport);
        app.pump_events();
        app
    }

    /// Paint `image` under the markers from now on.
    pub fn set_map_image(&mut self, image: ReferenceImage) {
        let backdrop = Backdrop::new(image.sample_width, image.sample_height, image.pixels);
        if backdrop.is_none() {
            warn!(
                width = image.sample_width,
                height = image.sample_height,
                "map image samples do not fill the grid"
            );
        }
        self.canvas.set_backdrop(backdrop);
        self.renderer.draw(self.session.store(), &mut self.canvas);
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    pub fn canvas(&self) -> &MapCanvas {
        &self.canvas
    }

    pub fn input(&self) -> &str {
        self.editor.text()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Handle one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if should_quit(key, self.session.is_celebrating()) {
            return true;
        }
        if let Some(action) = handle_key_event(key) {
            self.apply(action);
        } else if self.editor.handle_key(key) && !self.session.set_input(self.editor.text()) {
            // Locked while revealing.
            self.editor.set(self.session.input());
        }
        false
    }

    pub fn apply(&mut self, action: QuizAction) {
        match action {
            QuizAction::Submit => log_rejected(self.session.submit().map(|_| ())),
            QuizAction::PickChoice(i) => {
                log_rejected(self.session.submit_choice(i as usize).map(|_| ()))
            }
            QuizAction::Skip => {
                self.session.skip();
            }
            QuizAction::RequestHint => {
                self.session.request_hint();
            }
            QuizAction::ToggleLanguage => self.session.toggle_language(),
            QuizAction::DismissCelebration => {
                self.session.dismiss_celebration();
            }
        }
        self.sync();
    }

    /// Advance the animation clock, then session timers.
    ///
    /// A pulse restarted by this tick's events shows its initial frame.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.renderer
            .tick(elapsed_ms, self.session.store(), &mut self.canvas);
        self.session.tick(elapsed_ms);
        self.sync();
    }

    /// Fit the canvas to a new terminal size and redraw it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (cols, rows) = self.view.map_area(viewport, self.session.store().reference());
        self.canvas.resize(cols, rows);
        self.renderer.draw(self.session.store(), &mut self.canvas);
    }

    pub fn render_into(&self, fb: &mut FrameBuffer) {
        self.view
            .render_into(&self.session.snapshot(), &self.canvas, self.viewport, fb);
    }

    /// Stop every timer and the animation. Idempotent.
    pub fn teardown(&mut self) {
        self.session.teardown();
        self.renderer.stop(self.session.store(), &mut self.canvas);
    }

    fn sync(&mut self) {
        self.pump_events();
        if self.editor.text() != self.session.input() {
            self.editor.set(self.session.input());
        }
    }

    fn pump_events(&mut self) {
        for event in self.session.drain_events() {
            self.renderer
                .on_event(&event, self.session.store(), &mut self.canvas);
        }
    }
}

fn log_rejected(result: Result<(), QuizError>) {
    if let Err(e) = result {
        debug!(error = %e, "submission rejected");
    }
}
