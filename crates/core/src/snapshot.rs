//! Display snapshot of a session, resolved into the current display language.

use crate::hints::HintView;
use crate::history::HistoryEntry;
use crate::session::Phase;
use crate::types::{Coordinates, Difficulty, EntityIndex, Language};

/// The entity being asked about.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveView {
    pub index: EntityIndex,
    pub id: String,
    /// Capital name in the display language
    pub capital: String,
    /// Country name in the display language
    pub country: String,
    pub region: String,
    pub icon: String,
    pub on_map: bool,
    pub population: u64,
    pub area: u64,
    pub coordinates: Coordinates,
    pub difficulty: Difficulty,
}

/// Feedback for the answer currently being revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackView {
    pub correct: bool,
    pub credit: f64,
    pub submitted: String,
    pub capital: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    /// Cumulative (fractional) score
    pub score: f64,
    pub answered: u32,
    pub correct: u32,
    /// Percent, rounded
    pub accuracy: u32,
    pub streak: u32,
    /// Percent over the rolling window, rounded
    pub rolling_score: u32,
    /// Rolling window, oldest first
    pub history: Vec<HistoryEntry>,
    /// 1-based question number of `history[0]`
    pub first_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub question_id: u32,
    pub language: Language,
    pub active: Option<ActiveView>,
    pub input: String,
    pub hint: HintView,
    pub feedback: Option<FeedbackView>,
    pub stats: StatsView,
    pub celebrating: bool,
}

impl SessionSnapshot {
    /// Whether the screen only changes on input (nothing animates).
    pub fn is_static(&self) -> bool {
        self.phase != Phase::Presenting
    }
}
