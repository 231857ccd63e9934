//! Core quiz logic module - pure, deterministic, and testable
//!
//! This module contains the quiz rules, session state and bookkeeping.
//! It has **no dependencies** on terminal I/O, rendering or file loading, making it:
//!
//! - **Deterministic**: Same seed and inputs produce the same question sequence
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Can back a terminal shell, a GUI or a headless driver
//!
//! # Module Structure
//!
//! - [`store`]: Immutable entity collection with uniform random selection
//! - [`translate`]: Bilingual name lookup with canonical fallback
//! - [`evaluator`]: Lenient answer matching across both languages
//! - [`hints`]: Letter, clue and multiple-choice hints
//! - [`scoring`]: Partial credit, accuracy and the hint-free streak
//! - [`history`]: Rolling window over the last 20 answers
//! - [`session`]: The question lifecycle state machine
//! - [`snapshot`]: Display-ready view of a session
//!
//! # Example
//!
//! ```
//! use geoquiz_core::{Dictionary, EntityStore, QuizSession, SessionConfig};
//! use geoquiz_core::types::{
//!     Coordinates, Difficulty, GeoEntity, Language, MapPosition, ReferenceDimensions,
//! };
//!
//! let paris = GeoEntity {
//!     id: "FR".into(),
//!     display_name: "Paris".into(),
//!     container_name: "France".into(),
//!     region: "Western Europe".into(),
//!     coordinates: Coordinates { lat: 48.85, lng: 2.35 },
//!     reference_position: MapPosition::OnMap { x: 2900.0, y: 6500.0 },
//!     population: 2_161_000,
//!     area: 643_801,
//!     icon: "🇫🇷".into(),
//!     alternate_names: vec!["Paris".into()],
//!     difficulty: Difficulty::Easy,
//! };
//! let store = EntityStore::new(vec![paris], ReferenceDimensions::new(8505.0, 10206.0).unwrap())
//!     .unwrap();
//!
//! let mut dict = Dictionary::with_builtin_clues();
//! dict.insert_capital(Language::Dutch, "Paris", "Parijs");
//!
//! let mut session = QuizSession::new(store, dict, SessionConfig::default());
//! session.set_input("parijs");
//! let feedback = session.submit().unwrap();
//! assert!(feedback.correct);
//! assert_eq!(session.cumulative_score(), 1.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod hints;
pub mod history;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod translate;

pub use geoquiz_engine as engine;
pub use geoquiz_types as types;

// Re-export commonly used types for convenience
pub use error::{QuizError, QuizResult};
pub use evaluator::{evaluate, normalize, MatchKind, Verdict};
pub use hints::{build_choices, HintState, HintView};
pub use history::{rolling_score, HistoryEntry, Review, RollingHistory};
pub use rng::QuizRng;
pub use scoring::{accuracy_percent, credit, Streak, StreakOutcome};
pub use session::{Feedback, Phase, QuizSession, SessionConfig, SessionEvent};
pub use snapshot::{ActiveView, FeedbackView, SessionSnapshot, StatsView};
pub use store::EntityStore;
pub use translate::{generic_clue, Dictionary, Translator};
