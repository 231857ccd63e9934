//! Integration tests for the quiz rules and the session lifecycle.

use geoquiz::core::{
    evaluate, rolling_score, Dictionary, EntityStore, MatchKind, Phase, QuizError, QuizSession,
    SessionConfig, SessionEvent,
};
use geoquiz::types::{
    Coordinates, Difficulty, GeoEntity, HintTier, Language, MapPosition, ReferenceDimensions,
    CELEBRATION_MS, REVEAL_DELAY_MS, STREAK_CELEBRATION,
};

fn entity(id: &str, capital: &str, country: &str) -> GeoEntity {
    GeoEntity {
        id: id.to_string(),
        display_name: capital.to_string(),
        container_name: country.to_string(),
        region: "Europe".to_string(),
        coordinates: Coordinates { lat: 50.0, lng: 5.0 },
        reference_position: MapPosition::OnMap { x: 40.0, y: 80.0 },
        population: 500_000,
        area: 30_000,
        icon: String::new(),
        alternate_names: vec![],
        difficulty: Difficulty::Easy,
    }
}

fn store() -> EntityStore {
    EntityStore::new(
        vec![
            entity("FR", "Paris", "France"),
            entity("BE", "Brussels", "Belgium"),
            entity("AT", "Vienna", "Austria"),
            entity("PL", "Warsaw", "Poland"),
        ],
        ReferenceDimensions::new(100.0, 200.0).unwrap(),
    )
    .unwrap()
}

fn session() -> QuizSession {
    let mut dict = Dictionary::with_builtin_clues();
    dict.insert_capital(Language::Dutch, "Brussels", "Brussel");
    dict.insert_capital(Language::Dutch, "Vienna", "Wenen");
    dict.insert_capital(Language::Dutch, "Warsaw", "Warschau");
    dict.insert_capital(Language::Dutch, "Paris", "Parijs");
    QuizSession::new(
        store(),
        dict,
        SessionConfig {
            seed: 7,
            language: Language::Dutch,
            avoid_repeats: true,
        },
    )
}

/// Answer the current question correctly and wait out the reveal.
fn answer_correctly(s: &mut QuizSession) {
    let capital = s.snapshot().active.unwrap().capital;
    s.set_input(&capital);
    assert!(s.submit().unwrap().correct);
    s.tick(REVEAL_DELAY_MS);
    assert_eq!(s.phase(), Phase::Presenting);
}

#[test]
fn exact_names_match_in_any_case() {
    let paris = entity("FR", "Paris", "France");
    assert_eq!(evaluate("  PARIS ", &paris, "Parijs").kind, MatchKind::Canonical);
    assert_eq!(evaluate("parijs", &paris, "Parijs").kind, MatchKind::Translated);
}

#[test]
fn substrings_and_superstrings_are_accepted() {
    let paris = entity("FR", "Paris", "France");
    assert!(evaluate("par", &paris, "Parijs").is_correct());
    assert!(evaluate("parijs centrum", &paris, "Parijs").is_correct());
    assert_eq!(evaluate("ari", &paris, "Parijs").kind, MatchKind::Partial);
    assert!(!evaluate("lyon", &paris, "Parijs").is_correct());
}

#[test]
fn rolling_score_over_mixed_outcomes() {
    assert_eq!(rolling_score([true, true, false, true]), 75);
    assert_eq!(rolling_score(std::iter::empty::<bool>()), 0);
}

#[test]
fn hint_tiers_advance_then_stop() {
    let mut s = session();
    assert_eq!(s.request_hint(), Some(HintTier::LastLetter));
    assert_eq!(s.request_hint(), Some(HintTier::FirstLetterAndClue));
    assert_eq!(s.request_hint(), Some(HintTier::MultipleChoice));
    assert_eq!(s.request_hint(), None);
    assert_eq!(s.hint_tier(), HintTier::MultipleChoice);

    let hint = s.snapshot().hint;
    assert_eq!(hint.choices.len(), 3);
    let capital = s.snapshot().active.unwrap().capital;
    assert!(hint.choices.contains(&capital));
    assert!(hint.clue.is_some());
}

#[test]
fn correct_answer_at_tier_two_earns_half_a_point() {
    let mut s = session();
    s.request_hint();
    s.request_hint();
    let capital = s.snapshot().active.unwrap().capital;
    s.set_input(&capital);
    let feedback = s.submit().unwrap();
    assert_eq!(feedback.tier, HintTier::FirstLetterAndClue);
    assert_eq!(s.cumulative_score(), 0.5);
    assert_eq!(s.accuracy(), 50);
}

#[test]
fn hinted_answer_breaks_the_streak() {
    let mut s = session();
    for _ in 0..STREAK_CELEBRATION - 1 {
        answer_correctly(&mut s);
    }
    assert_eq!(s.streak(), STREAK_CELEBRATION - 1);

    s.request_hint();
    answer_correctly(&mut s);
    assert_eq!(s.streak(), 0);
    assert!(!s.is_celebrating());
}

#[test]
fn fifteen_clean_answers_celebrate_once() {
    let mut s = session();
    s.drain_events();
    for _ in 0..STREAK_CELEBRATION {
        answer_correctly(&mut s);
    }
    let started = s
        .drain_events()
        .iter()
        .filter(|e| matches!(e, SessionEvent::CelebrationStarted))
        .count();
    assert_eq!(started, 1);
    assert!(s.is_celebrating());

    s.tick(CELEBRATION_MS);
    assert!(!s.is_celebrating());
    assert_eq!(s.streak(), 0);
    assert!(s
        .drain_events()
        .contains(&SessionEvent::CelebrationEnded { dismissed: false }));
}

#[test]
fn skip_records_a_miss_and_moves_on() {
    let mut s = session();
    let before = (s.active(), s.question_id());
    assert!(s.skip());

    let last = s.history().entries().last().unwrap();
    assert!(!last.was_correct);
    assert_eq!(last.hint_tier_used, None);
    assert!(last.is_skip());
    assert_ne!(s.active(), before.0);
    assert_eq!(s.question_id(), before.1 + 1);
    assert_eq!(s.questions_answered(), 1);
    assert_eq!(s.cumulative_score(), 0.0);
}

#[test]
fn input_is_locked_while_revealing() {
    let mut s = session();
    s.set_input("nowhere");
    assert!(!s.submit().unwrap().correct);
    assert_eq!(s.phase(), Phase::Revealing);
    assert!(!s.set_input("again"));
    assert!(!s.skip());
    assert_eq!(s.request_hint(), None);
    assert!(matches!(s.submit(), Err(QuizError::InputLocked)));

    let review = s.history().entries().last().and_then(|e| e.review.clone());
    assert_eq!(review.map(|r| r.submitted), Some("nowhere".to_string()));
}

#[test]
fn teardown_cancels_the_reveal() {
    let mut s = session();
    s.set_input("x");
    s.submit().unwrap();
    let question = s.question_id();
    s.teardown();
    s.tick(REVEAL_DELAY_MS * 2);
    assert_eq!(s.question_id(), question);
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn blank_translation_does_not_accept_wrong_answers() {
    let mut dict = Dictionary::new();
    for capital in ["Paris", "Brussels", "Vienna", "Warsaw"] {
        dict.insert_capital(Language::Dutch, capital, "");
    }
    let mut s = QuizSession::new(
        store(),
        dict,
        SessionConfig {
            seed: 7,
            language: Language::Dutch,
            avoid_repeats: true,
        },
    );
    let capital = s.snapshot().active.unwrap().capital;
    assert!(!capital.is_empty());

    s.set_input("totally wrong");
    assert!(!s.submit().unwrap().correct);
}
