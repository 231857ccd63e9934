//! Answer evaluator - decides whether a typed answer names the target capital.
//!
//! Matching is deliberately lenient. After lower-casing and trimming the
//! input, it is accepted when it equals the canonical name, equals the
//! translated name, is one of the alternate spellings, or when it contains or
//! is contained in either name. Partial typing therefore counts: "par" and
//! "parisian" are both accepted for "Paris".
//!
//! The evaluator never rejects input itself; empty answers are filtered out by
//! the session before they get here (an empty string is a substring of every
//! name and would match).

use crate::types::GeoEntity;

/// Which rule accepted (or rejected) an answer. Rules are checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Equals the canonical name
    Canonical,
    /// Equals the name in the display language
    Translated,
    /// Equals one of the alternate spellings
    Alternate,
    /// Substring or superstring of either name
    Partial,
    /// No rule matched
    Miss,
}

/// Outcome of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Verdict {
    pub kind: MatchKind,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        self.kind != MatchKind::Miss
    }
}

/// Lower-case and trim surrounding whitespace. Interior whitespace is kept.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Evaluate `raw` against `target`, where `translated` is the target's
/// capital name in the current display language.
pub fn evaluate(raw: &str, target: &GeoEntity, translated: &str) -> Verdict {
    let answer = normalize(raw);
    let canonical = target.display_name.to_lowercase();
    // A blank translation names nothing; fall back to the canonical name.
    let translated = match normalize(translated) {
        t if t.is_empty() => canonical.clone(),
        t => t,
    };

    let kind = if answer == canonical {
        MatchKind::Canonical
    } else if answer == translated {
        MatchKind::Translated
    } else if target
        .alternate_names
        .iter()
        .any(|alt| alt.to_lowercase() == answer)
    {
        MatchKind::Alternate
    } else if canonical.contains(answer.as_str())
        || translated.contains(answer.as_str())
        || answer.contains(canonical.as_str())
        || answer.contains(translated.as_str())
    {
        MatchKind::Partial
    } else {
        MatchKind::Miss
    };

    Verdict { kind }
}
