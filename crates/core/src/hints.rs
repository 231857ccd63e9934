//! Hint engine - progressively stronger hints for the active question.
//!
//! Tiers are cumulative: a player at tier 3 still sees the letters and the
//! clue revealed at tiers 1 and 2. Letters, clue and option labels are derived
//! from the current display language whenever a view is built, so switching
//! language mid-question re-labels the hints instead of mixing languages. The
//! multiple-choice options themselves are picked and shuffled once per
//! question and stay put.

use arrayvec::ArrayVec;

use crate::rng::QuizRng;
use crate::store::EntityStore;
use crate::translate::{generic_clue, Translator};
use crate::types::{EntityIndex, HintTier, Language, CHOICE_COUNT};

/// Hint progress for the active question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintState {
    tier: HintTier,
    choices: ArrayVec<EntityIndex, CHOICE_COUNT>,
}

/// Display-ready hint content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HintView {
    pub tier: HintTier,
    pub last_letter: Option<char>,
    pub first_letter: Option<char>,
    pub clue: Option<String>,
    /// Translated option labels in display order.
    pub choices: Vec<String>,
}

impl HintState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self) -> HintTier {
        self.tier
    }

    pub fn choices(&self) -> &[EntityIndex] {
        &self.choices
    }

    /// Back to tier 0 for a new question.
    pub fn reset(&mut self) {
        self.tier = HintTier::None;
        self.choices.clear();
    }

    /// Advance one tier. Returns the new tier, or `None` when already at the
    /// last tier (the request is ignored).
    pub fn request<T: Translator + ?Sized>(
        &mut self,
        store: &EntityStore,
        target: EntityIndex,
        translator: &T,
        lang: Language,
        rng: &mut QuizRng,
    ) -> Option<HintTier> {
        if self.tier.is_max() {
            return None;
        }
        self.tier = self.tier.next();
        if self.tier == HintTier::MultipleChoice {
            self.choices = build_choices(store, target, translator, lang, rng);
        }
        Some(self.tier)
    }

    /// Build the display view for `target` in `lang`.
    pub fn view<T: Translator + ?Sized>(
        &self,
        store: &EntityStore,
        target: EntityIndex,
        translator: &T,
        lang: Language,
    ) -> HintView {
        let mut view = HintView {
            tier: self.tier,
            ..HintView::default()
        };
        let Some(entity) = store.get(target) else {
            return view;
        };
        let name = translator.capital_name(lang, &entity.display_name);

        if self.tier >= HintTier::LastLetter {
            view.last_letter = name.chars().last();
        }
        if self.tier >= HintTier::FirstLetterAndClue {
            view.first_letter = name.chars().next();
            let clue = translator
                .clue(lang, &entity.container_name)
                .unwrap_or_else(|| generic_clue(lang));
            view.clue = Some(clue.to_string());
        }
        if self.tier >= HintTier::MultipleChoice {
            view.choices = self
                .choices
                .iter()
                .filter_map(|&i| store.get(i))
                .map(|e| translator.capital_name(lang, &e.display_name).to_string())
                .collect();
        }
        view
    }
}

/// Pick up to [`CHOICE_COUNT`] options for `target`: the target itself, a
/// same-container alternative, an alternative sharing the first letter, then
/// random fillers. Option labels are pairwise distinct. The result is shuffled.
pub fn build_choices<T: Translator + ?Sized>(
    store: &EntityStore,
    target: EntityIndex,
    translator: &T,
    lang: Language,
    rng: &mut QuizRng,
) -> ArrayVec<EntityIndex, CHOICE_COUNT> {
    let mut out: ArrayVec<EntityIndex, CHOICE_COUNT> = ArrayVec::new();
    let Some(entity) = store.get(target) else {
        return out;
    };

    let label = |i: EntityIndex| -> String {
        store
            .get(i)
            .map(|e| translator.capital_name(lang, &e.display_name).to_lowercase())
            .unwrap_or_default()
    };
    let mut labels: ArrayVec<String, CHOICE_COUNT> = ArrayVec::new();

    out.push(target);
    labels.push(label(target));

    // Same container.
    let same: Vec<EntityIndex> = store
        .same_container(target)
        .into_iter()
        .filter(|&i| !labels.contains(&label(i)))
        .collect();
    if let Some(&pick) = rng.choose(&same) {
        out.push(pick);
        labels.push(label(pick));
    }

    // Shared first letter.
    let first = translator
        .capital_name(lang, &entity.display_name)
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect::<String>());
    if let (Some(first), false) = (first, out.is_full()) {
        let shared: Vec<EntityIndex> = store
            .iter()
            .map(|(i, _)| i)
            .filter(|i| !out.contains(i))
            .filter(|&i| {
                let l = label(i);
                l.starts_with(first.as_str()) && !labels.contains(&l)
            })
            .collect();
        if let Some(&pick) = rng.choose(&shared) {
            out.push(pick);
            labels.push(label(pick));
        }
    }

    // Random fillers.
    if !out.is_full() {
        let mut pool: Vec<EntityIndex> = store.iter().map(|(i, _)| i).collect();
        rng.shuffle(&mut pool);
        for i in pool {
            if out.is_full() {
                break;
            }
            let l = label(i);
            if !out.contains(&i) && !labels.contains(&l) {
                out.push(i);
                labels.push(l);
            }
        }
    }

    rng.shuffle(&mut out);
    out
}
