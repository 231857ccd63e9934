//! Interface text in both display languages.

use crate::types::Language;

/// Every fixed string the quiz panel shows.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub score: &'static str,
    pub accuracy: &'static str,
    pub streak: &'static str,
    pub question: &'static str,
    pub not_on_map: &'static str,
    pub population: &'static str,
    pub placeholder: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
    pub is_capital_of: &'static str,
    pub capital_of: &'static str,
    pub you_answered: &'static str,
    pub points: &'static str,
    pub region: &'static str,
    pub area: &'static str,
    pub coordinates: &'static str,
    pub next_question: &'static str,
    pub rolling_score: &'static str,
    pub last: &'static str,
    pub questions: &'static str,
    pub last_letter: &'static str,
    pub first_letter: &'static str,
    pub clue: &'static str,
    pub choices: &'static str,
    pub keys: &'static str,
    pub celebration: &'static str,
    pub celebration_close: &'static str,
    pub not_available: &'static str,
    pub thousands: char,
}

const ENGLISH: Labels = Labels {
    title: "European Capitals Quiz",
    score: "Score",
    accuracy: "Accuracy",
    streak: "Streak",
    question: "What is the capital of",
    not_on_map: "(not shown on the map)",
    population: "Population",
    placeholder: "Type the capital...",
    correct: "Correct!",
    incorrect: "Incorrect.",
    is_capital_of: "is the capital of",
    capital_of: "The capital of",
    you_answered: "You answered",
    points: "points",
    region: "Region",
    area: "Area",
    coordinates: "Coordinates",
    next_question: "Next question coming up...",
    rolling_score: "Rolling Score",
    last: "Last",
    questions: "questions",
    last_letter: "Last letter",
    first_letter: "First letter",
    clue: "Clue",
    choices: "Choices",
    keys: "Enter answer  F2 hint  F3 skip  F4 NL/EN  Esc quit",
    celebration: "15 in a row without hints! Fantastic!",
    celebration_close: "Press Esc to continue",
    not_available: "N/A",
    thousands: ',',
};

const DUTCH: Labels = Labels {
    title: "Europese Hoofdsteden Quiz",
    score: "Score",
    accuracy: "Nauwkeurigheid",
    streak: "Reeks",
    question: "Wat is de hoofdstad van",
    not_on_map: "(niet op de kaart)",
    population: "Inwoners",
    placeholder: "Typ de hoofdstad...",
    correct: "Goed!",
    incorrect: "Fout.",
    is_capital_of: "is de hoofdstad van",
    capital_of: "De hoofdstad van",
    you_answered: "Jouw antwoord",
    points: "punten",
    region: "Regio",
    area: "Oppervlakte",
    coordinates: "Coördinaten",
    next_question: "Volgende vraag komt eraan...",
    rolling_score: "Lopende Score",
    last: "Laatste",
    questions: "vragen",
    last_letter: "Laatste letter",
    first_letter: "Eerste letter",
    clue: "Aanwijzing",
    choices: "Keuzes",
    keys: "Enter antwoord  F2 hint  F3 overslaan  F4 NL/EN  Esc stop",
    celebration: "15 op rij zonder hints! Fantastisch!",
    celebration_close: "Druk op Esc om verder te gaan",
    not_available: "n.v.t.",
    thousands: '.',
};

impl Labels {
    pub fn for_language(lang: Language) -> &'static Labels {
        match lang {
            Language::English => &ENGLISH,
            Language::Dutch => &DUTCH,
        }
    }
}

/// `2161000` → `"2,161,000"` with the given separator.
pub fn group_thousands(n: u64, sep: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// `48.85°N, 2.35°E`
pub fn format_coordinates(lat: f64, lng: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lng >= 0.0 { 'E' } else { 'W' };
    format!("{:.2}°{ns}, {:.2}°{ew}", lat.abs(), lng.abs())
}
