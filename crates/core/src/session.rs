//! Session state machine - the question lifecycle.
//!
//! ```text
//!            submit                 (evaluation)            REVEAL_DELAY_MS
//! Presenting ──────▶ Evaluating ─────────────────▶ Revealing ──────────────▶ Presenting
//!     │                                                                         ▲
//!     └────────────────────────────── skip ─────────────────────────────────────┘
//! ```
//!
//! `Evaluating` only exists for the duration of [`QuizSession::submit`]; callers
//! observe `Presenting` or `Revealing`. The reveal delay is the one suspension
//! point: a one-shot task on the session's own [`Scheduler`], fired from
//! [`QuizSession::tick`]. Only [`QuizSession::teardown`] cancels it.
//!
//! Every transition also queues a [`SessionEvent`] so observers (the map
//! renderer) can react in order; drain them with [`QuizSession::drain_events`].

use tracing::{debug, info};

use crate::engine::{Scheduler, TaskId};
use crate::error::{QuizError, QuizResult};
use crate::evaluator::{evaluate, MatchKind};
use crate::hints::HintState;
use crate::history::{HistoryEntry, RollingHistory};
use crate::rng::QuizRng;
use crate::scoring::{accuracy_percent, credit, Streak, StreakOutcome};
use crate::snapshot::{ActiveView, FeedbackView, SessionSnapshot, StatsView};
use crate::store::EntityStore;
use crate::translate::{Dictionary, Translator};
use crate::types::{
    EntityIndex, HintTier, Language, CELEBRATION_MS, MAX_INPUT_LEN, REVEAL_DELAY_MS,
};

/// Lifecycle phase of the active question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Entity chosen, input open
    Presenting,
    /// Submission being judged
    Evaluating,
    /// Feedback shown, input locked
    Revealing,
}

/// Notifications queued by session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new entity is being presented.
    EntityChanged {
        previous: Option<EntityIndex>,
        current: EntityIndex,
    },
    /// A submission was judged and the answer is on screen.
    Revealed { correct: bool },
    /// A hint tier was unlocked.
    HintRevealed(HintTier),
    /// The streak reached the celebration threshold.
    CelebrationStarted,
    /// The celebration finished or was dismissed; the streak is back at 0.
    CelebrationEnded { dismissed: bool },
}

/// Result of judging one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub entity: EntityIndex,
    pub correct: bool,
    pub kind: MatchKind,
    pub tier: HintTier,
    pub credit: f64,
    pub submitted: String,
}

/// Session tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u32,
    pub language: Language,
    /// Never present the same entity twice in a row.
    pub avoid_repeats: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            language: Language::default(),
            avoid_repeats: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    AutoAdvance,
    CelebrationEnd,
}

/// One quiz run over a loaded store.
#[derive(Debug)]
pub struct QuizSession<T: Translator = Dictionary> {
    store: EntityStore,
    translator: T,
    rng: QuizRng,
    scheduler: Scheduler<SessionTimer>,
    phase: Phase,
    active: EntityIndex,
    /// Increments every time a new entity is presented.
    question_id: u32,
    input: String,
    language: Language,
    hints: HintState,
    feedback: Option<Feedback>,
    cumulative_score: f64,
    questions_answered: u32,
    correct_answers: u32,
    streak: Streak,
    history: RollingHistory,
    celebrating: bool,
    advance_task: Option<TaskId>,
    celebration_task: Option<TaskId>,
    avoid_repeats: bool,
    torn_down: bool,
    events: Vec<SessionEvent>,
}

impl<T: Translator> QuizSession<T> {
    /// Start a session and present the first entity.
    pub fn new(store: EntityStore, translator: T, config: SessionConfig) -> Self {
        let mut rng = QuizRng::new(config.seed);
        let active = store.select_random(&mut rng, None);
        info!(
            entities = store.len(),
            on_map = store.on_map_count(),
            seed = config.seed,
            language = config.language.as_str(),
            "quiz session started"
        );

        Self {
            store,
            translator,
            rng,
            scheduler: Scheduler::new(),
            phase: Phase::Presenting,
            active,
            question_id: 1,
            input: String::new(),
            language: config.language,
            hints: HintState::new(),
            feedback: None,
            cumulative_score: 0.0,
            questions_answered: 0,
            correct_answers: 0,
            streak: Streak::default(),
            history: RollingHistory::new(),
            celebrating: false,
            advance_task: None,
            celebration_task: None,
            avoid_repeats: config.avoid_repeats,
            torn_down: false,
            events: vec![SessionEvent::EntityChanged {
                previous: None,
                current: active,
            }],
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> EntityIndex {
        self.active
    }

    pub fn question_id(&self) -> u32 {
        self.question_id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn hint_tier(&self) -> HintTier {
        self.hints.tier()
    }

    pub fn hints(&self) -> &HintState {
        &self.hints
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn cumulative_score(&self) -> f64 {
        self.cumulative_score
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn streak(&self) -> u32 {
        self.streak.count()
    }

    pub fn history(&self) -> &RollingHistory {
        &self.history
    }

    pub fn rolling_score(&self) -> u32 {
        self.history.rolling_score()
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.cumulative_score, self.questions_answered)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether a submit would be evaluated right now.
    pub fn can_submit(&self) -> bool {
        self.accepts_input() && !self.input.trim().is_empty()
    }

    /// Live timers (auto-advance, celebration).
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Take the queued transition events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the raw answer text. Ignored while input is locked.
    pub fn set_input(&mut self, text: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.input.clear();
        self.input.extend(text.chars().take(MAX_INPUT_LEN));
        true
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            debug!(language = language.as_str(), "display language changed");
            self.language = language;
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggle());
    }

    /// Judge the current input.
    ///
    /// Empty or whitespace-only input is rejected without evaluation, as is
    /// any submit outside `Presenting`.
    pub fn submit(&mut self) -> QuizResult<Feedback> {
        if !self.accepts_input() {
            return Err(QuizError::InputLocked);
        }
        if self.input.trim().is_empty() {
            return Err(QuizError::EmptySubmission);
        }

        let tier = self.hints.tier();
        let (verdict, expected) = {
            let entity = self
                .store
                .get(self.active)
                .ok_or(QuizError::EmptyCollection)?;
            let translated = self
                .translator
                .capital_name(self.language, &entity.display_name);
            (
                evaluate(&self.input, entity, translated),
                translated.to_string(),
            )
        };

        self.phase = Phase::Evaluating;
        let correct = verdict.is_correct();
        let earned = credit(correct, tier);
        self.cumulative_score += earned;
        self.questions_answered += 1;
        if correct {
            self.correct_answers += 1;
        }
        let submitted = self.input.trim().to_string();
        self.history
            .push(HistoryEntry::answered(correct, tier, &submitted, &expected));

        let outcome = if correct {
            StreakOutcome::Correct(tier)
        } else {
            StreakOutcome::Incorrect
        };
        if self.streak.record(outcome) {
            self.start_celebration();
        }

        let feedback = Feedback {
            entity: self.active,
            correct,
            kind: verdict.kind,
            tier,
            credit: earned,
            submitted,
        };
        debug!(
            question = self.question_id,
            correct,
            tier = tier.as_u8(),
            credit = earned,
            "answer evaluated"
        );

        self.feedback = Some(feedback.clone());
        self.phase = Phase::Revealing;
        self.advance_task = Some(
            self.scheduler
                .schedule_once(REVEAL_DELAY_MS, SessionTimer::AutoAdvance),
        );
        self.events.push(SessionEvent::Revealed { correct });
        Ok(feedback)
    }

    /// Answer with the multiple-choice option at `index`.
    ///
    /// Only available once the multiple-choice hint is unlocked.
    pub fn submit_choice(&mut self, index: usize) -> QuizResult<Feedback> {
        if !self.accepts_input() {
            return Err(QuizError::InputLocked);
        }
        let label = self
            .hints
            .choices()
            .get(index)
            .and_then(|&i| self.store.get(i))
            .map(|e| {
                self.translator
                    .capital_name(self.language, &e.display_name)
                    .to_string()
            })
            .ok_or(QuizError::EmptySubmission)?;
        self.set_input(&label);
        self.submit()
    }

    /// Skip the current question. Only available while `Presenting`.
    pub fn skip(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.history.push(HistoryEntry::skipped());
        self.questions_answered += 1;
        self.streak.record(StreakOutcome::Skipped);
        debug!(question = self.question_id, "question skipped");
        self.next_question();
        true
    }

    /// Unlock the next hint tier. Silently ignored at the last tier or when
    /// input is locked.
    pub fn request_hint(&mut self) -> Option<HintTier> {
        if !self.accepts_input() {
            return None;
        }
        let tier = self.hints.request(
            &self.store,
            self.active,
            &self.translator,
            self.language,
            &mut self.rng,
        )?;
        debug!(question = self.question_id, tier = tier.as_u8(), "hint revealed");
        self.events.push(SessionEvent::HintRevealed(tier));
        Some(tier)
    }

    /// Close the celebration early. Returns `false` when none is running.
    pub fn dismiss_celebration(&mut self) -> bool {
        if !self.celebrating {
            return false;
        }
        if let Some(id) = self.celebration_task.take() {
            self.scheduler.cancel(id);
        }
        self.end_celebration(true);
        true
    }

    /// Advance session timers by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.torn_down {
            return;
        }
        for (id, timer) in self.scheduler.advance(elapsed_ms) {
            match timer {
                SessionTimer::AutoAdvance => {
                    if self.advance_task == Some(id) {
                        self.advance_task = None;
                        if self.phase == Phase::Revealing {
                            self.next_question();
                        }
                    }
                }
                SessionTimer::CelebrationEnd => {
                    if self.celebration_task == Some(id) {
                        self.celebration_task = None;
                        self.end_celebration(false);
                    }
                }
            }
        }
    }

    /// Cancel every pending timer and lock the session. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler.cancel_all();
        self.advance_task = None;
        self.celebration_task = None;
        self.torn_down = true;
        debug!("quiz session torn down");
    }

    /// Everything the presentation shell displays.
    pub fn snapshot(&self) -> SessionSnapshot {
        let lang = self.language;
        let active = self.store.get(self.active).map(|e| ActiveView {
            index: self.active,
            id: e.id.clone(),
            capital: self.translator.capital_name(lang, &e.display_name).to_string(),
            country: self.translator.country_name(lang, &e.container_name).to_string(),
            region: e.region.clone(),
            icon: e.icon.clone(),
            on_map: e.is_on_map(),
            population: e.population,
            area: e.area,
            coordinates: e.coordinates,
            difficulty: e.difficulty,
        });

        let feedback = self.feedback.as_ref().and_then(|f| {
            let e = self.store.get(f.entity)?;
            Some(FeedbackView {
                correct: f.correct,
                credit: f.credit,
                submitted: f.submitted.clone(),
                capital: self.translator.capital_name(lang, &e.display_name).to_string(),
                country: self.translator.country_name(lang, &e.container_name).to_string(),
            })
        });

        SessionSnapshot {
            phase: self.phase,
            question_id: self.question_id,
            language: lang,
            active,
            input: self.input.clone(),
            hint: self
                .hints
                .view(&self.store, self.active, &self.translator, lang),
            feedback,
            stats: StatsView {
                score: self.cumulative_score,
                answered: self.questions_answered,
                correct: self.correct_answers,
                accuracy: self.accuracy(),
                streak: self.streak.count(),
                rolling_score: self.history.rolling_score(),
                history: self.history.entries().to_vec(),
                first_number: self.history.first_number(),
            },
            celebrating: self.celebrating,
        }
    }

    fn accepts_input(&self) -> bool {
        !self.torn_down && self.phase == Phase::Presenting
    }

    fn next_question(&mut self) {
        let previous = self.active;
        let exclude = self.avoid_repeats.then_some(previous);
        self.active = self.store.select_random(&mut self.rng, exclude);
        self.question_id = self.question_id.wrapping_add(1);
        self.hints.reset();
        self.input.clear();
        self.feedback = None;
        self.phase = Phase::Presenting;
        debug!(
            question = self.question_id,
            entity = self.active.0,
            "presenting entity"
        );
        self.events.push(SessionEvent::EntityChanged {
            previous: Some(previous),
            current: self.active,
        });
    }

    fn start_celebration(&mut self) {
        self.celebrating = true;
        if let Some(id) = self.celebration_task.take() {
            self.scheduler.cancel(id);
        }
        self.celebration_task = Some(
            self.scheduler
                .schedule_once(CELEBRATION_MS, SessionTimer::CelebrationEnd),
        );
        info!(streak = self.streak.count(), "streak celebration");
        self.events.push(SessionEvent::CelebrationStarted);
    }

    fn end_celebration(&mut self, dismissed: bool) {
        self.celebrating = false;
        self.streak.reset();
        self.events.push(SessionEvent::CelebrationEnded { dismissed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::entity;
    use crate::types::ReferenceDimensions;

    fn session() -> QuizSession {
        let store = EntityStore::new(
            vec![entity("FR", "Paris", "France")],
            ReferenceDimensions::new(100.0, 100.0).unwrap(),
        )
        .unwrap();
        let mut dict = Dictionary::with_builtin_clues();
        dict.insert_capital(Language::Dutch, "Paris", "Parijs");
        QuizSession::new(store, dict, SessionConfig::default())
    }

    #[test]
    fn test_first_entity_is_presented() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::Presenting);
        assert_eq!(
            s.drain_events(),
            vec![SessionEvent::EntityChanged {
                previous: None,
                current: EntityIndex(0)
            }]
        );
    }

    #[test]
    fn test_empty_submission_is_rejected() {
        let mut s = session();
        s.set_input("   ");
        assert_eq!(s.submit().unwrap_err(), QuizError::EmptySubmission);
        assert_eq!(s.questions_answered(), 0);
        assert_eq!(s.phase(), Phase::Presenting);
    }

    #[test]
    fn test_submit_reveals_then_auto_advances() {
        let mut s = session();
        s.set_input("parijs");
        let fb = s.submit().unwrap();
        assert!(fb.correct);
        assert_eq!(s.phase(), Phase::Revealing);
        assert!(!s.set_input("locked"));
        assert_eq!(s.submit().unwrap_err(), QuizError::InputLocked);

        s.tick(REVEAL_DELAY_MS - 1);
        assert_eq!(s.phase(), Phase::Revealing);
        s.tick(1);
        assert_eq!(s.phase(), Phase::Presenting);
        assert_eq!(s.question_id(), 2);
        assert!(s.input().is_empty());
    }

    #[test]
    fn test_hint_tier_resets_on_new_entity() {
        let mut s = session();
        s.request_hint();
        s.request_hint();
        assert_eq!(s.hint_tier(), HintTier::FirstLetterAndClue);
        assert!(s.skip());
        assert_eq!(s.hint_tier(), HintTier::None);
    }

    #[test]
    fn test_teardown_cancels_auto_advance() {
        let mut s = session();
        s.set_input("paris");
        s.submit().unwrap();
        assert_eq!(s.pending_timers(), 1);

        s.teardown();
        s.teardown();
        assert_eq!(s.pending_timers(), 0);
        s.tick(10_000);
        assert_eq!(s.phase(), Phase::Revealing);
        assert!(!s.skip());
    }

    #[test]
    fn test_submit_choice_requires_multiple_choice_tier() {
        let mut s = session();
        assert_eq!(s.submit_choice(0).unwrap_err(), QuizError::EmptySubmission);
        for _ in 0..3 {
            s.request_hint();
        }
        let fb = s.submit_choice(0).unwrap();
        assert!(fb.correct);
        assert_eq!(fb.credit, 0.25);
    }
}
