//! Translation service - bilingual name lookup with canonical fallback.
//!
//! Canonical names (the dataset's English names) are the lookup keys. A
//! missing translation falls back to the canonical name, so English needs no
//! table at all.

use std::collections::HashMap;

use crate::types::Language;

/// Name lookup consumed by the evaluator, hint engine and views.
pub trait Translator {
    /// Capital name in `lang`, or `canonical` when untranslated.
    fn capital_name<'a>(&'a self, lang: Language, canonical: &'a str) -> &'a str;

    /// Country/region name in `lang`, or `canonical` when untranslated.
    fn country_name<'a>(&'a self, lang: Language, canonical: &'a str) -> &'a str;

    /// Registered cultural clue for a container, if any.
    fn clue(&self, lang: Language, container: &str) -> Option<&str>;
}

/// Clue used when no clue is registered for a container.
pub fn generic_clue(lang: Language) -> &'static str {
    match lang {
        Language::English => "It is the seat of the national government.",
        Language::Dutch => "Hier zetelt de nationale regering.",
    }
}

const BUILTIN_CLUES: &[(&str, &str, &str)] = &[
    ("France", "Home of the Eiffel Tower.", "Hier staat de Eiffeltoren."),
    ("Germany", "The Brandenburg Gate stands here.", "Hier staat de Brandenburger Tor."),
    ("Italy", "The Colosseum stands here.", "Hier staat het Colosseum."),
    ("Spain", "Home of the Prado museum.", "Thuisbasis van het Pradomuseum."),
    ("United Kingdom", "Big Ben chimes here.", "Hier luidt de Big Ben."),
    ("Netherlands", "Famous for its canal rings.", "Beroemd om de grachtengordel."),
    ("Belgium", "The Atomium towers over it.", "Het Atomium torent erboven uit."),
    ("Austria", "City of waltzes and coffee houses.", "Stad van walsen en koffiehuizen."),
    ("Czech Republic", "Charles Bridge spans its river.", "De Karelsbrug overspant de rivier."),
    ("Hungary", "The Danube splits it in two.", "De Donau deelt de stad in tweeën."),
    ("Greece", "The Acropolis overlooks it.", "De Akropolis kijkt erover uit."),
    ("Portugal", "Trams climb its seven hills.", "Trams beklimmen de zeven heuvels."),
    ("Russia", "The Kremlin faces Red Square.", "Het Kremlin kijkt uit op het Rode Plein."),
    ("Denmark", "The Little Mermaid sits in its harbour.", "De Kleine Zeemeermin zit in de haven."),
    ("Sweden", "Built on fourteen islands.", "Gebouwd op veertien eilanden."),
    ("Norway", "The Nobel Peace Prize is awarded here.", "Hier wordt de Nobelprijs voor de Vrede uitgereikt."),
    ("Ireland", "Famous for its colourful Georgian doors.", "Beroemd om de kleurrijke Georgiaanse deuren."),
    ("Poland", "Its old town was rebuilt brick by brick.", "De oude stad werd steen voor steen herbouwd."),
];

#[derive(Debug, Clone, Default)]
struct LanguageTable {
    capitals: HashMap<String, String>,
    countries: HashMap<String, String>,
    clues: HashMap<String, String>,
}

/// In-memory bilingual dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    tables: HashMap<Language, LanguageTable>,
}

impl Dictionary {
    /// Empty dictionary: every lookup falls back to the canonical name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary preloaded with the built-in clue book.
    pub fn with_builtin_clues() -> Self {
        let mut dict = Self::new();
        for &(country, en, nl) in BUILTIN_CLUES {
            dict.insert_clue(Language::English, country, en);
            dict.insert_clue(Language::Dutch, country, nl);
        }
        dict
    }

    /// Blank names are ignored so lookups keep falling back to `canonical`.
    pub fn insert_capital(&mut self, lang: Language, canonical: &str, translated: &str) {
        if is_blank(translated) {
            return;
        }
        self.table_mut(lang)
            .capitals
            .insert(canonical.to_string(), translated.trim().to_string());
    }

    pub fn insert_country(&mut self, lang: Language, canonical: &str, translated: &str) {
        if is_blank(translated) {
            return;
        }
        self.table_mut(lang)
            .countries
            .insert(canonical.to_string(), translated.trim().to_string());
    }

    /// Register (or replace) the clue for a container.
    pub fn insert_clue(&mut self, lang: Language, container: &str, clue: &str) {
        if is_blank(clue) {
            return;
        }
        self.table_mut(lang)
            .clues
            .insert(container.to_string(), clue.to_string());
    }

    /// Number of translated capital names for `lang`.
    pub fn capital_count(&self, lang: Language) -> usize {
        self.tables.get(&lang).map_or(0, |t| t.capitals.len())
    }

    fn table_mut(&mut self, lang: Language) -> &mut LanguageTable {
        self.tables.entry(lang).or_default()
    }
}

/// Whether a dictionary value carries no name at all.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Translator for Dictionary {
    fn capital_name<'a>(&'a self, lang: Language, canonical: &'a str) -> &'a str {
        self.tables
            .get(&lang)
            .and_then(|t| t.capitals.get(canonical))
            .map_or(canonical, String::as_str)
    }

    fn country_name<'a>(&'a self, lang: Language, canonical: &'a str) -> &'a str {
        self.tables
            .get(&lang)
            .and_then(|t| t.countries.get(canonical))
            .map_or(canonical, String::as_str)
    }

    fn clue(&self, lang: Language, container: &str) -> Option<&str> {
        self.tables
            .get(&lang)
            .and_then(|t| t.clues.get(container))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_canonical() {
        let dict = Dictionary::new();
        assert_eq!(dict.capital_name(Language::Dutch, "Paris"), "Paris");
        assert_eq!(dict.country_name(Language::English, "France"), "France");
    }

    #[test]
    fn test_translated_lookup() {
        let mut dict = Dictionary::new();
        dict.insert_capital(Language::Dutch, "Paris", "Parijs");
        dict.insert_country(Language::Dutch, "France", "Frankrijk");

        assert_eq!(dict.capital_name(Language::Dutch, "Paris"), "Parijs");
        assert_eq!(dict.capital_name(Language::English, "Paris"), "Paris");
        assert_eq!(dict.country_name(Language::Dutch, "France"), "Frankrijk");
        assert_eq!(dict.capital_count(Language::Dutch), 1);
    }

    #[test]
    fn test_blank_names_fall_back_to_canonical() {
        let mut dict = Dictionary::new();
        dict.insert_capital(Language::Dutch, "Paris", "Parijs");
        dict.insert_capital(Language::Dutch, "Paris", "");
        dict.insert_capital(Language::Dutch, "Vienna", "   ");
        dict.insert_country(Language::Dutch, "France", "");
        dict.insert_clue(Language::Dutch, "France", " ");

        assert_eq!(dict.capital_name(Language::Dutch, "Paris"), "Parijs");
        assert_eq!(dict.capital_name(Language::Dutch, "Vienna"), "Vienna");
        assert_eq!(dict.country_name(Language::Dutch, "France"), "France");
        assert_eq!(dict.clue(Language::Dutch, "France"), None);
        assert_eq!(dict.capital_count(Language::Dutch), 1);
    }

    #[test]
    fn test_builtin_clues_are_bilingual() {
        let dict = Dictionary::with_builtin_clues();
        assert_eq!(
            dict.clue(Language::English, "France"),
            Some("Home of the Eiffel Tower.")
        );
        assert!(dict.clue(Language::Dutch, "France").is_some());
        assert!(dict.clue(Language::English, "Atlantis").is_none());
    }
}
