//! Loading the shipped sample data end to end.

use std::path::PathBuf;

use geoquiz::core::{QuizError, Translator};
use geoquiz::data::{load_all, load_dataset, DataPaths};
use geoquiz::types::Language;

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn sample_paths() -> DataPaths {
    DataPaths::new(sample("quizCapitals.json"), sample("translations.json"))
}

#[tokio::test]
async fn sample_data_loads() {
    let data = load_all(&sample_paths()).await.unwrap();
    assert_eq!(data.store.len(), 16);
    assert_eq!(data.store.on_map_count(), 14);
    assert!(data.image.is_none());

    let reference = data.store.reference();
    assert_eq!((reference.width, reference.height), (8505.0, 10206.0));
    assert_eq!(data.dictionary.capital_name(Language::Dutch, "Vienna"), "Wenen");
    assert_eq!(data.dictionary.capital_name(Language::English, "Vienna"), "Vienna");
    // Untranslated names fall back to the canonical name.
    assert_eq!(data.dictionary.capital_name(Language::Dutch, "Berlin"), "Berlin");
}

#[tokio::test]
async fn sample_off_map_entries_stay_quizzable() {
    let store = load_dataset(sample("quizCapitals.json")).await.unwrap();
    let malta = store.find_by_id("MT").and_then(|i| store.get(i)).unwrap();
    assert!(!malta.is_on_map());
    assert_eq!(malta.display_name, "Valletta");
}

#[test]
fn missing_dictionary_is_fatal() {
    let paths = DataPaths::new(sample("quizCapitals.json"), sample("missing.json"));
    let err = tokio_test::block_on(load_all(&paths)).unwrap_err();
    assert!(matches!(err, QuizError::DataUnavailable { ref what, .. } if what == "dictionary"));
}
