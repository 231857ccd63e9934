//! Data loading - dataset, dictionary and reference image.
//!
//! All loads are one-shot async reads through `tokio::fs`. Every failure maps
//! to [`QuizError::DataUnavailable`], which is fatal: there is no retry and
//! no partial session.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> geoquiz_core::QuizResult<()> {
//! let paths = geoquiz_data::DataPaths::new("data/quizCapitals.json", "data/translations.json");
//! let data = geoquiz_data::load_all(&paths).await?;
//! assert!(!data.store.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod dictionary;
pub mod image;

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

pub use geoquiz_core as core;
pub use geoquiz_core::types;

pub use dataset::DatasetDocument;
pub use dictionary::DictionaryDocument;
pub use image::ReferenceImage;

use crate::core::{Dictionary, EntityStore, QuizError, QuizResult};
use crate::types::{Language, ReferenceDimensions};

/// Where to load from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub dataset: PathBuf,
    pub dictionary: PathBuf,
    pub map_image: Option<PathBuf>,
}

impl DataPaths {
    pub fn new(dataset: impl Into<PathBuf>, dictionary: impl Into<PathBuf>) -> Self {
        Self {
            dataset: dataset.into(),
            dictionary: dictionary.into(),
            map_image: None,
        }
    }

    pub fn with_map_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.map_image = Some(path.into());
        self
    }
}

/// Everything a session needs.
#[derive(Debug)]
pub struct QuizData {
    pub store: EntityStore,
    pub dictionary: Dictionary,
    pub image: Option<ReferenceImage>,
}

async fn read_text(what: &str, path: &Path) -> QuizResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        error!(what, path = %path.display(), error = %e, "load failed");
        QuizError::data_unavailable(what, format!("{}: {e}", path.display()))
    })
}

fn logged<T>(what: &str, path: &Path, result: QuizResult<T>) -> QuizResult<T> {
    if let Err(e) = &result {
        error!(what, path = %path.display(), error = %e, "load failed");
    }
    result
}

pub async fn load_dataset(path: impl AsRef<Path>) -> QuizResult<EntityStore> {
    let path = path.as_ref();
    let text = read_text("dataset", path).await?;
    let store = logged(
        "dataset",
        path,
        DatasetDocument::parse(&text).and_then(DatasetDocument::into_store),
    )?;
    info!(
        path = %path.display(),
        entities = store.len(),
        on_map = store.on_map_count(),
        "dataset loaded"
    );
    Ok(store)
}

pub async fn load_dictionary(path: impl AsRef<Path>) -> QuizResult<Dictionary> {
    let path = path.as_ref();
    let text = read_text("dictionary", path).await?;
    let dict = logged("dictionary", path, DictionaryDocument::parse(&text))?.into_dictionary();
    info!(
        path = %path.display(),
        nl_capitals = dict.capital_count(Language::Dutch),
        "dictionary loaded"
    );
    Ok(dict)
}

/// Read and decode the reference image. A size mismatch with `expected` is only a warning:
/// markers will be misplaced, but the quiz still works.
pub async fn load_reference_image(
    path: impl AsRef<Path>,
    expected: ReferenceDimensions,
) -> QuizResult<ReferenceImage> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        error!(what = "map image", path = %path.display(), error = %e, "load failed");
        QuizError::data_unavailable("map image", format!("{}: {e}", path.display()))
    })?;
    let decoded = tokio::task::spawn_blocking(move || ReferenceImage::from_png(&bytes))
        .await
        .map_err(|e| QuizError::data_unavailable("map image", e))?;
    let image = logged("map image", path, decoded)?;
    if !image.matches(expected.width, expected.height) {
        warn!(
            image_width = image.width,
            image_height = image.height,
            reference_width = expected.width,
            reference_height = expected.height,
            "map image size differs from dataset mapDimensions"
        );
    }
    info!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        samples = image.pixels.len(),
        "map image loaded"
    );
    Ok(image)
}

/// Load dataset and dictionary concurrently, then the optional image.
pub async fn load_all(paths: &DataPaths) -> QuizResult<QuizData> {
    let (store, dictionary) = tokio::try_join!(
        load_dataset(&paths.dataset),
        load_dictionary(&paths.dictionary)
    )?;
    let image = match &paths.map_image {
        Some(p) => Some(load_reference_image(p, store.reference()).await?),
        None => None,
    };
    Ok(QuizData {
        store,
        dictionary,
        image,
    })
}
