//! Dataset document - the entity collection plus reference-image dimensions.
//!
//! ```text
//! {
//!   "mapDimensions": { "width": 8505, "height": 10206 },
//!   "capitals": [
//!     { "id": "FR", "country": "France", "capital": "Paris",
//!       "coordinates": { "lat": 48.85, "lng": 2.35 },
//!       "region": "Western Europe", "population": 2161000, "area": 643801,
//!       "flag": "🇫🇷", "alternativeSpellings": ["Paris"],
//!       "mapPosition": { "x": 2900, "y": 6500, "confidence": "high" },
//!       "difficulty": "easy", "offMap": false }
//!   ],
//!   "metadata": { "totalCapitals": 1, ... }
//! }
//! ```
//!
//! Entries flagged `offMap` (or with no `mapPosition`) stay quizzable but are
//! never drawn.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::{EntityStore, QuizError, QuizResult};
use crate::types::{
    Coordinates, Difficulty, GeoEntity, MapPosition, ReferenceDimensions,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDocument {
    pub map_dimensions: DimensionsRecord,
    pub capitals: Vec<CapitalRecord>,
    #[serde(default)]
    pub metadata: Option<MetadataRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DimensionsRecord {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinatesRecord {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapPositionRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalRecord {
    pub id: String,
    pub country: String,
    pub capital: String,
    pub coordinates: CoordinatesRecord,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub population: f64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub alternative_spellings: Vec<String>,
    #[serde(default)]
    pub map_position: Option<MapPositionRecord>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub off_map: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(default)]
    pub total_capitals: Option<u32>,
    #[serde(default)]
    pub calibrated_points: Option<u32>,
    #[serde(default)]
    pub excluded_capitals: Vec<String>,
    #[serde(default)]
    pub bounds: Option<BoundsRecord>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// Extent of the calibrated map positions, in reference pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsRecord {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundsRecord {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl CapitalRecord {
    fn into_entity(self) -> GeoEntity {
        let reference_position = match (&self.map_position, self.off_map) {
            (Some(p), false) if p.x.is_finite() && p.y.is_finite() => {
                MapPosition::OnMap { x: p.x, y: p.y }
            }
            _ => MapPosition::OffMap,
        };
        let difficulty = match self.difficulty.as_deref() {
            Some(raw) => Difficulty::from_str(raw).unwrap_or_else(|| {
                warn!(id = %self.id, difficulty = raw, "unknown difficulty, using medium");
                Difficulty::default()
            }),
            None => Difficulty::default(),
        };

        GeoEntity {
            id: self.id,
            display_name: self.capital,
            container_name: self.country,
            region: self.region,
            coordinates: Coordinates {
                lat: self.coordinates.lat,
                lng: self.coordinates.lng,
            },
            reference_position,
            population: whole(self.population),
            area: whole(self.area),
            icon: self.flag,
            alternate_names: self.alternative_spellings,
            difficulty,
        }
    }
}

fn whole(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.round() as u64
    } else {
        0
    }
}

impl DatasetDocument {
    pub fn parse(text: &str) -> QuizResult<Self> {
        serde_json::from_str(text).map_err(|e| QuizError::data_unavailable("dataset", e))
    }

    pub fn reference(&self) -> QuizResult<ReferenceDimensions> {
        ReferenceDimensions::new(self.map_dimensions.width, self.map_dimensions.height).ok_or_else(
            || {
                QuizError::data_unavailable(
                    "dataset",
                    format!(
                        "invalid mapDimensions {}x{}",
                        self.map_dimensions.width, self.map_dimensions.height
                    ),
                )
            },
        )
    }

    /// Build the entity store. An empty `capitals` array is `EmptyCollection`.
    pub fn into_store(self) -> QuizResult<EntityStore> {
        let reference = self.reference()?;
        if let Some(meta) = &self.metadata {
            let declared = meta.total_capitals.map(|n| n as usize);
            if declared.is_some_and(|n| n != self.capitals.len()) {
                warn!(
                    declared = ?declared,
                    actual = self.capitals.len(),
                    "dataset metadata count mismatch"
                );
            }
            debug!(
                calibrated = ?meta.calibrated_points,
                excluded = meta.excluded_capitals.len(),
                generated_at = meta.generated_at.as_deref().unwrap_or("-"),
                "dataset metadata"
            );
            if let Some(bounds) = meta.bounds {
                let outside = self
                    .capitals
                    .iter()
                    .filter(|c| !c.off_map)
                    .filter_map(|c| c.map_position.as_ref())
                    .filter(|p| !bounds.contains(p.x, p.y))
                    .count();
                if outside > 0 {
                    warn!(outside, "map positions outside metadata bounds");
                }
            }
        }
        let entities = self
            .capitals
            .into_iter()
            .map(CapitalRecord::into_entity)
            .collect();
        EntityStore::new(entities, reference)
    }
}
