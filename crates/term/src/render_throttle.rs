//! Redraw throttling.
//!
//! While the map animates every frame is drawn. While the screen is static
//! (an answer is being revealed) a frame is drawn only when the visible state
//! changes, plus a slow keep-alive redraw.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::SessionSnapshot;

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - `is_static=false`: always render.
    /// - `is_static=true`: render on fingerprint change, otherwise at most once
    ///   per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let due = !self.has_rendered
            || !is_static
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if due {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }

    /// Forget the last frame so the next call renders (resize, language switch).
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}

/// Hash of everything visible in the panel.
pub fn snapshot_fingerprint(snap: &SessionSnapshot) -> u64 {
    let mut h = DefaultHasher::new();
    snap.question_id.hash(&mut h);
    snap.phase.hash(&mut h);
    snap.language.hash(&mut h);
    snap.input.hash(&mut h);
    snap.hint.hash(&mut h);
    snap.celebrating.hash(&mut h);
    snap.feedback.as_ref().map(|f| f.correct).hash(&mut h);
    snap.stats.score.to_bits().hash(&mut h);
    snap.stats.answered.hash(&mut h);
    snap.stats.streak.hash(&mut h);
    h.finish()
}
