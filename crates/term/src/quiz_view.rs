//! QuizView: maps a [`SessionSnapshot`] and the map canvas into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! ```text
//! ┌ header: title · score · accuracy · language ───────────────┐
//! │ map canvas (half-block pixels)   │ quiz panel               │
//! │                                  │  question, input, hints  │
//! │                                  │  feedback, statistics    │
//! └──────────────────────────────────┴──────────────────────────┘
//! ```

use crate::canvas::MapCanvas;
use crate::core::{Phase, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::labels::{format_coordinates, group_thousands, Labels};
use crate::types::{HintTier, ReferenceDimensions};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const HEADER_ROWS: u16 = 1;
const MIN_PANEL: u16 = 28;

const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const MUTED: CellStyle = CellStyle::fg(Rgb::new(140, 140, 150));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(230, 230, 240)).bold();
const ACCENT: CellStyle = CellStyle::fg(Rgb::new(96, 165, 250));
const GOOD: CellStyle = CellStyle::fg(Rgb::new(16, 185, 129));
const BAD: CellStyle = CellStyle::fg(Rgb::new(239, 68, 68));
const WARN: CellStyle = CellStyle::fg(Rgb::new(234, 88, 12));
const HEADER: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(37, 99, 235));
const GOLD: CellStyle = CellStyle::fg(Rgb::new(250, 204, 21)).bold();

/// A terminal layout for the quiz.
#[derive(Debug, Clone, Copy)]
pub struct QuizView {
    panel_width: u16,
}

impl Default for QuizView {
    fn default() -> Self {
        Self { panel_width: 44 }
    }
}

impl QuizView {
    pub fn new(panel_width: u16) -> Self {
        Self {
            panel_width: panel_width.max(MIN_PANEL),
        }
    }

    /// Canvas size in cells for `viewport`, keeping the reference aspect ratio
    /// (one cell is two square pixels tall). Zero width when the terminal is
    /// too narrow for a map next to the panel.
    pub fn map_area(&self, viewport: Viewport, reference: ReferenceDimensions) -> (u16, u16) {
        let rows = viewport.height.saturating_sub(HEADER_ROWS);
        let available = viewport.width.saturating_sub(self.panel_width + 2);
        let wanted = (rows as f64 * 2.0 * reference.width / reference.height).round();
        let cols = (wanted.max(0.0) as u16).min(available);
        if cols < 8 {
            (0, rows)
        } else {
            (cols, rows)
        }
    }

    /// Render the snapshot into an existing framebuffer.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        canvas: &MapCanvas,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());
        let labels = Labels::for_language(snap.language);

        self.draw_header(fb, snap, labels, viewport);

        let panel_x = if canvas.cols() > 0 {
            canvas.blit(fb, 0, HEADER_ROWS);
            canvas.cols() + 2
        } else {
            1
        };
        let panel_w = viewport.width.saturating_sub(panel_x + 1);
        if panel_w >= 8 {
            self.draw_panel(fb, snap, labels, panel_x, panel_w, viewport.height);
        }

        if snap.celebrating {
            let area_w = if canvas.cols() > 0 { canvas.cols() } else { viewport.width };
            self.draw_celebration(fb, labels, area_w, viewport.height);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, canvas: &MapCanvas, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, canvas, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, labels: &Labels, viewport: Viewport) {
        fb.fill_rect(0, 0, viewport.width, HEADER_ROWS, ' ', HEADER);
        let mut x = fb.put_str(1, 0, labels.title, HEADER.bold()) + 3;

        let score = format!(
            "{}: {} / {}",
            labels.score,
            format_score(snap.stats.score),
            snap.stats.answered
        );
        x = fb.put_str(x, 0, &score, HEADER) + 3;
        let accuracy = format!("{}: {}%", labels.accuracy, snap.stats.accuracy);
        x = fb.put_str(x, 0, &accuracy, HEADER) + 3;
        let streak = format!("{}: {}", labels.streak, snap.stats.streak);
        fb.put_str(x, 0, &streak, HEADER);

        let lang = match snap.language {
            crate::types::Language::English => "[EN]",
            crate::types::Language::Dutch => "[NL]",
        };
        fb.put_str(viewport.width.saturating_sub(5), 0, lang, HEADER.bold());
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        labels: &Labels,
        x: u16,
        w: u16,
        max_y: u16,
    ) {
        let Some(active) = &snap.active else {
            return;
        };
        let mut y = HEADER_ROWS + 1;

        // Question
        let tag = format!("[{}]", active.id);
        fb.put_str(x, y, &tag, ACCENT.bold());
        y += 1;
        let question = format!("{} {}?", labels.question, active.country);
        y = fb.put_wrapped(x, y, w, max_y, &question, LABEL);
        if !active.on_map {
            fb.put_str_max(x, y, labels.not_on_map, w, WARN);
            y += 1;
        }
        let population = if active.population > 0 {
            group_thousands(active.population, labels.thousands)
        } else {
            labels.not_available.to_string()
        };
        fb.put_str_max(x, y, &format!("{}: {population}", labels.population), w, MUTED);
        y += 2;

        match (snap.phase, &snap.feedback) {
            (Phase::Revealing, Some(feedback)) => {
                let (style, message) = if feedback.correct {
                    (
                        GOOD.bold(),
                        format!(
                            "{} {} {} {}.",
                            labels.correct, feedback.capital, labels.is_capital_of, feedback.country
                        ),
                    )
                } else {
                    (
                        BAD.bold(),
                        format!(
                            "{} {} {} is {}.",
                            labels.incorrect, labels.capital_of, feedback.country, feedback.capital
                        ),
                    )
                };
                y = fb.put_wrapped(x, y, w, max_y, &message, style);
                if !feedback.correct {
                    let answered = format!("{}: {}", labels.you_answered, feedback.submitted);
                    y = fb.put_wrapped(x, y, w, max_y, &answered, MUTED);
                } else if feedback.credit < 1.0 {
                    let credit = format!("+{} {}", format_score(feedback.credit), labels.points);
                    fb.put_str_max(x, y, &credit, w, MUTED);
                    y += 1;
                }
                y += 1;

                let area = if active.area > 0 {
                    format!("{} km²", group_thousands(active.area, labels.thousands))
                } else {
                    labels.not_available.to_string()
                };
                for line in [
                    format!("{}: {}", labels.region, active.region),
                    format!("{}: {area}", labels.area),
                    format!(
                        "{}: {}",
                        labels.coordinates,
                        format_coordinates(active.coordinates.lat, active.coordinates.lng)
                    ),
                ] {
                    fb.put_str_max(x, y, &line, w, TEXT);
                    y += 1;
                }
                fb.put_str_max(x, y, labels.next_question, w, MUTED);
                y += 2;
            }
            _ => {
                y = self.draw_input(fb, snap, labels, x, w, y);
                y = self.draw_hints(fb, snap, labels, x, w, y, max_y);
                y += 1;
            }
        }

        y = self.draw_history(fb, snap, labels, x, w, y);

        let help_y = max_y.saturating_sub(1);
        if y < help_y {
            fb.put_str_max(x, help_y, labels.keys, w, MUTED.dim());
        }
    }

    fn draw_input(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        labels: &Labels,
        x: u16,
        w: u16,
        y: u16,
    ) -> u16 {
        let end = fb.put_str(x, y, "› ", ACCENT.bold());
        let room = w.saturating_sub(3);
        if snap.input.is_empty() {
            fb.put_char(end, y, '▏', ACCENT);
            fb.put_str_max(end + 1, y, labels.placeholder, room.saturating_sub(1), MUTED.dim());
        } else {
            // Keep the tail visible when the answer is wider than the panel.
            let len = snap.input.chars().count();
            let skip = len.saturating_sub(room.saturating_sub(1) as usize);
            let visible: String = snap.input.chars().skip(skip).collect();
            let cursor = fb.put_str_max(end, y, &visible, room, TEXT.bold());
            fb.put_char(cursor, y, '▏', ACCENT);
        }
        y + 2
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_hints(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        labels: &Labels,
        x: u16,
        w: u16,
        mut y: u16,
        max_y: u16,
    ) -> u16 {
        let hint = &snap.hint;
        if hint.tier == HintTier::None {
            return y;
        }
        let hint_style = CellStyle::fg(Rgb::new(250, 204, 21));

        if let Some(c) = hint.first_letter {
            fb.put_str_max(x, y, &format!("{}: {c}", labels.first_letter), w, hint_style);
            y += 1;
        }
        if let Some(c) = hint.last_letter {
            fb.put_str_max(x, y, &format!("{}: {c}", labels.last_letter), w, hint_style);
            y += 1;
        }
        if let Some(clue) = &hint.clue {
            y = fb.put_wrapped(x, y, w, max_y, &format!("{}: {clue}", labels.clue), hint_style);
        }
        if !hint.choices.is_empty() {
            fb.put_str_max(x, y, labels.choices, w, LABEL);
            y += 1;
            for (i, choice) in hint.choices.iter().enumerate() {
                let key = format!("F{} ", i + 5);
                let after = fb.put_str(x + 1, y, &key, ACCENT.bold());
                fb.put_str_max(after, y, choice, w.saturating_sub(after - x), TEXT);
                y += 1;
            }
        }
        y
    }

    fn draw_history(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        labels: &Labels,
        x: u16,
        w: u16,
        mut y: u16,
    ) -> u16 {
        let history = &snap.stats.history;
        if history.is_empty() {
            return y;
        }
        let title = format!(
            "{}: {}% ({} {} {})",
            labels.rolling_score,
            snap.stats.rolling_score,
            labels.last,
            history.len(),
            labels.questions
        );
        fb.put_str_max(x, y, &title, w, LABEL);
        y += 1;

        let mut cx = x;
        for entry in history {
            let (ch, style) = match (entry.was_correct, entry.is_skip()) {
                (true, _) => ('■', GOOD),
                (false, false) => ('■', BAD),
                (false, true) => ('□', BAD),
            };
            fb.put_char(cx, y, ch, style);
            cx += 1;
        }
        y += 1;

        let first = snap.stats.first_number;
        let last = first + history.len() as u32 - 1;
        let end = put_question_number(fb, x, y, first, MUTED);
        if history.len() > 1 {
            let label_w = digits(last) + 1;
            let last_x = (x + history.len() as u16).saturating_sub(label_w).max(end + 1);
            put_question_number(fb, last_x, y, last, MUTED);
        }
        y + 1
    }

    fn draw_celebration(&self, fb: &mut FrameBuffer, labels: &Labels, area_w: u16, height: u16) {
        let text_w = labels
            .celebration
            .chars()
            .count()
            .max(labels.celebration_close.chars().count()) as u16;
        let box_w = (text_w + 4).min(area_w);
        let box_h = 5;
        if box_w < 6 || height < box_h {
            return;
        }
        let bx = area_w.saturating_sub(box_w) / 2;
        let by = (height.saturating_sub(box_h) / 2).max(HEADER_ROWS);
        let frame = GOLD.on(Rgb::new(20, 20, 30));

        fb.fill_rect(bx, by, box_w, box_h, ' ', frame);
        fb.put_char(bx, by, '╔', frame);
        fb.put_char(bx + box_w - 1, by, '╗', frame);
        fb.put_char(bx, by + box_h - 1, '╚', frame);
        fb.put_char(bx + box_w - 1, by + box_h - 1, '╝', frame);
        for dx in 1..box_w - 1 {
            fb.put_char(bx + dx, by, '═', frame);
            fb.put_char(bx + dx, by + box_h - 1, '═', frame);
        }
        for dy in 1..box_h - 1 {
            fb.put_char(bx, by + dy, '║', frame);
            fb.put_char(bx + box_w - 1, by + dy, '║', frame);
        }
        fb.put_str_max(bx + 2, by + 1, labels.celebration, box_w.saturating_sub(4), frame);
        fb.put_str_max(
            bx + 2,
            by + 3,
            labels.celebration_close,
            box_w.saturating_sub(4),
            CellStyle { bold: false, ..frame },
        );
    }
}

/// `#12`
fn put_question_number(fb: &mut FrameBuffer, x: u16, y: u16, n: u32, style: CellStyle) -> u16 {
    fb.put_char(x, y, '#', style);
    fb.put_u32(x + 1, y, n, style)
}

fn digits(n: u32) -> u16 {
    n.checked_ilog10().map_or(1, |d| d as u16 + 1)
}

/// Cumulative scores are fractional: `3`, `3.5`, `3.75`.
pub fn format_score(score: f64) -> String {
    let s = format!("{score:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
