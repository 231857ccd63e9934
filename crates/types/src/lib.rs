//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the quiz.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, map rendering, data loading, terminal UI).
//!
//! # Session Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `HISTORY_CAPACITY` | 20 | Rolling history window |
//! | `STREAK_CELEBRATION` | 15 | Hint-free streak that triggers the celebration |
//! | `REVEAL_DELAY_MS` | 2000 | Time feedback stays on screen before auto-advance |
//! | `CELEBRATION_MS` | 6000 | Celebration length when not dismissed manually |
//! | `FRAME_MS` | 16 | Animation frame interval (~60 FPS) |
//! | `MAX_INPUT_LEN` | 64 | Maximum characters in the answer field |
//!
//! # Hint Multipliers
//!
//! | Tier | Multiplier |
//! |------|------------|
//! | 0 (no hint) | 1.00 |
//! | 1 (last letter) | 0.75 |
//! | 2 (first letter + clue) | 0.50 |
//! | 3 (multiple choice) | 0.25 |
//!
//! # Examples
//!
//! ```
//! use geoquiz_types::{HintTier, Language, Difficulty};
//!
//! assert_eq!(Language::from_str("NL"), Some(Language::Dutch));
//! assert_eq!(Language::Dutch.toggle(), Language::English);
//!
//! let tier = HintTier::None.next();
//! assert_eq!(tier, HintTier::LastLetter);
//! assert_eq!(tier.multiplier(), 0.75);
//!
//! assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
//! ```

/// Number of answers kept in the rolling history.
pub const HISTORY_CAPACITY: usize = 20;

/// Consecutive hint-free correct answers that trigger the celebration.
pub const STREAK_CELEBRATION: u32 = 15;

/// Delay between revealing feedback and presenting the next entity.
pub const REVEAL_DELAY_MS: u32 = 2000;

/// Celebration length when it is not dismissed manually.
pub const CELEBRATION_MS: u32 = 6000;

/// Animation frame interval in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Maximum number of characters accepted in the answer field.
pub const MAX_INPUT_LEN: usize = 64;

/// Number of options offered by the multiple-choice hint.
pub const CHOICE_COUNT: usize = 3;

/// Score multiplier per hint tier, indexed by [`HintTier::as_u8`].
pub const HINT_MULTIPLIERS: [f64; 4] = [1.0, 0.75, 0.5, 0.25];


/// Display language of the quiz.
///
/// Canonical entity names in the dataset are English, so [`Language::English`]
/// is the primary language and [`Language::Dutch`] the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    English,
    #[default]
    Dutch,
}

impl Language {
    /// Parse a language code (case-insensitive): "en" | "english", "nl" | "dutch".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "nl" | "dutch" | "nederlands" => Some(Language::Dutch),
            _ => None,
        }
    }

    /// Two-letter language code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Dutch => "nl",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Language::English => Language::Dutch,
            Language::Dutch => Language::English,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Language::English)
    }
}

/// Difficulty tier assigned by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Hint tier reached for the current question.
///
/// Tiers only move forward (`None → LastLetter → FirstLetterAndClue →
/// MultipleChoice`) and reset when a new entity is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum HintTier {
    /// No hint requested
    #[default]
    None,
    /// Last letter of the answer revealed
    LastLetter,
    /// First letter plus a cultural clue revealed
    FirstLetterAndClue,
    /// Three-option multiple choice offered
    MultipleChoice,
}

impl HintTier {
    pub fn as_u8(&self) -> u8 {
        match self {
            HintTier::None => 0,
            HintTier::LastLetter => 1,
            HintTier::FirstLetterAndClue => 2,
            HintTier::MultipleChoice => 3,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(HintTier::None),
            1 => Some(HintTier::LastLetter),
            2 => Some(HintTier::FirstLetterAndClue),
            3 => Some(HintTier::MultipleChoice),
            _ => None,
        }
    }

    /// Next tier; the last tier maps onto itself.
    pub fn next(&self) -> Self {
        match self {
            HintTier::None => HintTier::LastLetter,
            HintTier::LastLetter => HintTier::FirstLetterAndClue,
            HintTier::FirstLetterAndClue | HintTier::MultipleChoice => HintTier::MultipleChoice,
        }
    }

    pub fn is_max(&self) -> bool {
        matches!(self, HintTier::MultipleChoice)
    }

    /// Fraction of a full point earned by a correct answer at this tier.
    pub fn multiplier(&self) -> f64 {
        HINT_MULTIPLIERS[self.as_u8() as usize]
    }
}

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Position of an entity on the reference image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapPosition {
    /// Pixel position in reference-image space.
    OnMap { x: f64, y: f64 },
    /// The entity lies outside the reference image and is never drawn.
    OffMap,
}

impl MapPosition {
    pub fn is_on_map(&self) -> bool {
        matches!(self, MapPosition::OnMap { .. })
    }

    pub fn point(&self) -> Option<(f64, f64)> {
        match *self {
            MapPosition::OnMap { x, y } => Some((x, y)),
            MapPosition::OffMap => None,
        }
    }
}

/// Pixel dimensions of the reference map image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDimensions {
    pub width: f64,
    pub height: f64,
}

impl ReferenceDimensions {
    /// Both dimensions must be finite and positive.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Some(Self { width, height })
        } else {
            None
        }
    }
}

/// Index of an entity inside the store's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(pub usize);

/// One quizzable capital.
///
/// Constructed once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoEntity {
    /// Unique key (ISO-like country code in the shipped dataset)
    pub id: String,
    /// Canonical (English) capital name
    pub display_name: String,
    /// Country or region the capital belongs to
    pub container_name: String,
    /// Macro region label, e.g. "Western Europe"
    pub region: String,
    pub coordinates: Coordinates,
    pub reference_position: MapPosition,
    pub population: u64,
    /// Area of the container in km²
    pub area: u64,
    /// Flag glyph
    pub icon: String,
    /// Every accepted spelling, in dataset order
    pub alternate_names: Vec<String>,
    pub difficulty: Difficulty,
}

impl GeoEntity {
    pub fn is_on_map(&self) -> bool {
        self.reference_position.is_on_map()
    }
}

/// Actions the presentation shell can apply to a running quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Submit the current input
    Submit,
    /// Skip the current question
    Skip,
    /// Ask for the next hint tier
    RequestHint,
    /// Switch the display language
    ToggleLanguage,
    /// Close the celebration overlay
    DismissCelebration,
    /// Answer with the multiple-choice option at this index
    PickChoice(u8),
}
