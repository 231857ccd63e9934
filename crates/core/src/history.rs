//! Rolling answer history, bounded to the last [`HISTORY_CAPACITY`] answers.

use arrayvec::ArrayVec;

use crate::types::{HintTier, HISTORY_CAPACITY};

/// What the player typed next to what was expected, kept for wrong answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub submitted: String,
    pub expected: String,
}

/// One answered (or skipped) question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub was_correct: bool,
    /// `None` for skipped questions.
    pub hint_tier_used: Option<HintTier>,
    /// Present only for incorrect submissions.
    pub review: Option<Review>,
}

impl HistoryEntry {
    pub fn answered(was_correct: bool, tier: HintTier, submitted: &str, expected: &str) -> Self {
        let review = (!was_correct).then(|| Review {
            submitted: submitted.to_string(),
            expected: expected.to_string(),
        });
        Self {
            was_correct,
            hint_tier_used: Some(tier),
            review,
        }
    }

    pub fn skipped() -> Self {
        Self {
            was_correct: false,
            hint_tier_used: None,
            review: None,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.hint_tier_used.is_none()
    }
}

/// FIFO window over the most recent answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingHistory {
    entries: ArrayVec<HistoryEntry, HISTORY_CAPACITY>,
    /// Answers ever recorded, including evicted ones.
    total: u32,
}

impl RollingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest one when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(entry);
        self.total = self.total.saturating_add(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn total_recorded(&self) -> u32 {
        self.total
    }

    /// 1-based question number of the oldest entry in the window.
    pub fn first_number(&self) -> u32 {
        self.total - self.entries.len() as u32 + 1
    }

    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.was_correct).count()
    }

    /// Percentage of correct entries in the window, rounded; 0 when empty.
    pub fn rolling_score(&self) -> u32 {
        rolling_score(self.entries.iter().map(|e| e.was_correct))
    }
}

/// `round(100 × correct / len)` over an outcome sequence, 0 when empty.
pub fn rolling_score(outcomes: impl IntoIterator<Item = bool>) -> u32 {
    let (correct, len) = outcomes
        .into_iter()
        .fold((0u32, 0u32), |(c, n), ok| (c + ok as u32, n + 1));
    if len == 0 {
        return 0;
    }
    ((correct as f64 / len as f64) * 100.0).round() as u32
}
