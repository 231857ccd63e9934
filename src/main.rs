//! Terminal capital quiz (default binary).
//!
//! Loads the dataset and dictionary on a current-thread tokio runtime, then
//! runs a synchronous crossterm poll loop at the animation frame rate.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use geoquiz::app::QuizApp;
use geoquiz::config::QuizConfig;
use geoquiz::core::QuizSession;
use geoquiz::data::load_all;
use geoquiz::logging;
use geoquiz::term::{snapshot_fingerprint, FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use geoquiz::types::FRAME_MS;

/// Keep-alive redraw interval while nothing animates.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let config = QuizConfig::parse();
    logging::init(config.log_path.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let data = runtime
        .block_on(load_all(&config.data_paths()))
        .inspect_err(|e| error!(error = %e, "quiz data unavailable"))
        .context("load quiz data")?;
    drop(runtime);

    let session = QuizSession::new(data.store, data.dictionary, config.session_config());
    let (w, h) = crossterm::terminal::size().unwrap_or((100, 30));
    let mut app = QuizApp::new(session, Viewport::new(w, h));
    if let Some(image) = data.image {
        app.set_map_image(image);
    }

    let mut term = TerminalRenderer::new();
    term.enter("GeoQuiz")?;

    let result = run(&mut term, &mut app);

    app.teardown();
    // Always try to restore terminal state.
    let _ = term.exit();
    let snap = app.snapshot();
    info!(
        answered = snap.stats.answered,
        correct = snap.stats.correct,
        score = snap.stats.score,
        "quiz ended"
    );
    result
}

fn run(term: &mut TerminalRenderer, app: &mut QuizApp) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);
    let started = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let snap = app.snapshot();
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, snapshot_fingerprint(&snap), snap.is_static()) {
            app.render_into(&mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Resize(w, h) => {
                    app.resize(Viewport::new(w, h));
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
