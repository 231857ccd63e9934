//! Scoring module - partial credit, accuracy and the hint-free streak.

use crate::types::{HintTier, STREAK_CELEBRATION};

/// Credit earned by one submission.
pub fn credit(correct: bool, tier: HintTier) -> f64 {
    if correct {
        tier.multiplier()
    } else {
        0.0
    }
}

/// `round(100 × cumulative / answered)`, 0 before the first answer.
pub fn accuracy_percent(cumulative: f64, answered: u32) -> u32 {
    if answered == 0 {
        return 0;
    }
    ((cumulative / answered as f64) * 100.0).round().max(0.0) as u32
}

/// Outcome fed into the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    Correct(HintTier),
    Incorrect,
    Skipped,
}

/// Consecutive hint-free correct answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streak {
    count: u32,
}

impl Streak {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record an outcome. Returns `true` exactly when this outcome brings the
    /// streak to [`STREAK_CELEBRATION`].
    pub fn record(&mut self, outcome: StreakOutcome) -> bool {
        match outcome {
            StreakOutcome::Correct(HintTier::None) => {
                self.count = self.count.saturating_add(1);
                self.count == STREAK_CELEBRATION
            }
            StreakOutcome::Correct(_) | StreakOutcome::Incorrect | StreakOutcome::Skipped => {
                self.count = 0;
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_by_tier() {
        assert_eq!(credit(true, HintTier::None), 1.0);
        assert_eq!(credit(true, HintTier::FirstLetterAndClue), 0.5);
        assert_eq!(credit(false, HintTier::None), 0.0);
        assert_eq!(credit(false, HintTier::MultipleChoice), 0.0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy_percent(0.0, 0), 0);
        assert_eq!(accuracy_percent(2.75, 4), 69);
        assert_eq!(accuracy_percent(3.0, 3), 100);
    }

    #[test]
    fn test_hinted_answer_breaks_streak() {
        let mut s = Streak::default();
        for _ in 0..14 {
            assert!(!s.record(StreakOutcome::Correct(HintTier::None)));
        }
        assert!(!s.record(StreakOutcome::Correct(HintTier::LastLetter)));
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_celebration_fires_once_at_threshold() {
        let mut s = Streak::default();
        let fired: Vec<bool> = (0..20)
            .map(|_| s.record(StreakOutcome::Correct(HintTier::None)))
            .collect();
        assert_eq!(fired.iter().filter(|&&f| f).count(), 1);
        assert!(fired[14]);
    }

    #[test]
    fn test_skip_and_miss_reset() {
        let mut s = Streak::default();
        s.record(StreakOutcome::Correct(HintTier::None));
        s.record(StreakOutcome::Skipped);
        assert_eq!(s.count(), 0);
        s.record(StreakOutcome::Correct(HintTier::None));
        s.record(StreakOutcome::Incorrect);
        assert_eq!(s.count(), 0);
    }
}
