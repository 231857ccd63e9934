//! Bilingual dictionary document.
//!
//! Keyed by language code, each section maps canonical (English) names to
//! display names. Clues are keyed by canonical country name and extend the
//! built-in clue book.
//!
//! ```text
//! { "nl": { "capitals": { "Paris": "Parijs" },
//!           "countries": { "France": "Frankrijk" },
//!           "clues": { "France": "Hier staat de Eiffeltoren." } },
//!   "en": { "clues": { "France": "Home of the Eiffel Tower." } } }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use crate::core::translate::is_blank;
use crate::core::{Dictionary, QuizError, QuizResult};
use crate::types::Language;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageSection {
    #[serde(default)]
    pub capitals: BTreeMap<String, String>,
    #[serde(default)]
    pub countries: BTreeMap<String, String>,
    #[serde(default)]
    pub clues: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DictionaryDocument {
    pub sections: BTreeMap<String, LanguageSection>,
}

impl DictionaryDocument {
    pub fn parse(text: &str) -> QuizResult<Self> {
        serde_json::from_str(text).map_err(|e| QuizError::data_unavailable("dictionary", e))
    }

    /// Merge into a dictionary seeded with the built-in clues. Sections for
    /// unsupported languages are skipped with a warning.
    pub fn into_dictionary(self) -> Dictionary {
        let mut dict = Dictionary::with_builtin_clues();
        for (code, section) in self.sections {
            let Some(lang) = Language::from_str(&code) else {
                warn!(language = %code, "skipping unsupported dictionary section");
                continue;
            };
            for (canonical, name) in &section.capitals {
                if is_blank(name) {
                    warn!(language = %code, capital = %canonical, "skipping blank capital name");
                    continue;
                }
                dict.insert_capital(lang, canonical, name);
            }
            for (canonical, name) in &section.countries {
                if is_blank(name) {
                    warn!(language = %code, country = %canonical, "skipping blank country name");
                    continue;
                }
                dict.insert_country(lang, canonical, name);
            }
            for (country, clue) in section.clues.iter().filter(|(_, c)| !is_blank(c)) {
                dict.insert_clue(lang, country, clue);
            }
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Translator;

    #[test]
    fn test_sections_merge_into_dictionary() {
        let doc = r#"{
            "nl": { "capitals": { "Paris": "Parijs" },
                    "countries": { "France": "Frankrijk" },
                    "clues": { "Atlantis": "Onder water." } },
            "fr": { "capitals": { "London": "Londres" } }
        }"#;
        let dict = DictionaryDocument::parse(doc).unwrap().into_dictionary();

        assert_eq!(dict.capital_name(Language::Dutch, "Paris"), "Parijs");
        assert_eq!(dict.country_name(Language::Dutch, "France"), "Frankrijk");
        assert_eq!(dict.clue(Language::Dutch, "Atlantis"), Some("Onder water."));
        // Unknown names fall back to canonical.
        assert_eq!(dict.capital_name(Language::Dutch, "London"), "London");
        // Built-in clues survive the merge.
        assert!(dict.clue(Language::English, "France").is_some());
    }

    #[test]
    fn test_blank_entries_keep_canonical_names() {
        let doc = r#"{ "nl": { "capitals": { "Paris": "", "Vienna": "Wenen" },
                               "countries": { "France": " " } } }"#;
        let dict = DictionaryDocument::parse(doc).unwrap().into_dictionary();

        assert_eq!(dict.capital_name(Language::Dutch, "Paris"), "Paris");
        assert_eq!(dict.capital_name(Language::Dutch, "Vienna"), "Wenen");
        assert_eq!(dict.country_name(Language::Dutch, "France"), "France");
        assert_eq!(dict.capital_count(Language::Dutch), 1);
    }

    #[test]
    fn test_non_object_is_data_unavailable() {
        let err = DictionaryDocument::parse("[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            QuizError::DataUnavailable { ref what, .. } if what == "dictionary"
        ));
    }
}
