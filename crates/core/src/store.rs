//! Entity store - the immutable collection every question is drawn from.

use crate::error::{QuizError, QuizResult};
use crate::rng::QuizRng;
use crate::types::{EntityIndex, GeoEntity, ReferenceDimensions};

/// Read-only collection of loaded entities plus the reference image size.
#[derive(Debug, Clone)]
pub struct EntityStore {
    entities: Vec<GeoEntity>,
    reference: ReferenceDimensions,
}

impl EntityStore {
    /// Build a store. Fails with [`QuizError::EmptyCollection`] when `entities` is empty.
    pub fn new(entities: Vec<GeoEntity>, reference: ReferenceDimensions) -> QuizResult<Self> {
        if entities.is_empty() {
            return Err(QuizError::EmptyCollection);
        }
        Ok(Self {
            entities,
            reference,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always false for a constructed store; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn reference(&self) -> ReferenceDimensions {
        self.reference
    }

    pub fn get(&self, index: EntityIndex) -> Option<&GeoEntity> {
        self.entities.get(index.0)
    }

    pub fn entities(&self) -> &[GeoEntity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityIndex, &GeoEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityIndex(i), e))
    }

    pub fn find_by_id(&self, id: &str) -> Option<EntityIndex> {
        self.entities
            .iter()
            .position(|e| e.id == id)
            .map(EntityIndex)
    }

    /// Number of entities that can be drawn on the map.
    pub fn on_map_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_on_map()).count()
    }

    /// Other entities sharing the container (country/region) of `index`.
    pub fn same_container(&self, index: EntityIndex) -> Vec<EntityIndex> {
        let Some(target) = self.get(index) else {
            return Vec::new();
        };
        self.iter()
            .filter(|(i, e)| *i != index && e.container_name == target.container_name)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pick an entity uniformly at random.
    ///
    /// With `exclude` set, that index is skipped unless it is the only entity.
    pub fn select_random(&self, rng: &mut QuizRng, exclude: Option<EntityIndex>) -> EntityIndex {
        let len = self.entities.len();
        match exclude {
            Some(skip) if len > 1 && skip.0 < len => {
                // Draw from the other len-1 slots and step over the excluded one.
                let i = rng.next_index(len - 1);
                EntityIndex(if i >= skip.0 { i + 1 } else { i })
            }
            _ => EntityIndex(rng.next_index(len)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{Coordinates, Difficulty, GeoEntity, MapPosition};

    pub fn entity(id: &str, capital: &str, country: &str) -> GeoEntity {
        GeoEntity {
            id: id.to_string(),
            display_name: capital.to_string(),
            container_name: country.to_string(),
            region: "Europe".to_string(),
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            reference_position: MapPosition::OnMap { x: 10.0, y: 20.0 },
            population: 1_000_000,
            area: 1000,
            icon: String::new(),
            alternate_names: vec![capital.to_string()],
            difficulty: Difficulty::Easy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::entity;
    use super::*;
    use crate::types::MapPosition;

    fn dims() -> ReferenceDimensions {
        ReferenceDimensions::new(100.0, 200.0).unwrap()
    }

    fn store() -> EntityStore {
        let mut off = entity("IS", "Reykjavik", "Iceland");
        off.reference_position = MapPosition::OffMap;
        EntityStore::new(
            vec![
                entity("FR", "Paris", "France"),
                entity("DE", "Berlin", "Germany"),
                off,
                entity("GB-SCT", "Edinburgh", "United Kingdom"),
                entity("GB", "London", "United Kingdom"),
            ],
            dims(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store_is_rejected() {
        assert_eq!(
            EntityStore::new(Vec::new(), dims()).unwrap_err(),
            QuizError::EmptyCollection
        );
    }

    #[test]
    fn test_select_random_covers_every_entity() {
        let store = store();
        let mut rng = QuizRng::new(5);
        let mut seen = vec![false; store.len()];
        for _ in 0..500 {
            seen[store.select_random(&mut rng, None).0] = true;
        }
        // Off-map entities are still quizzed.
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_select_random_honours_exclude() {
        let store = store();
        let mut rng = QuizRng::new(5);
        for _ in 0..500 {
            assert_ne!(
                store.select_random(&mut rng, Some(EntityIndex(2))),
                EntityIndex(2)
            );
        }
    }

    #[test]
    fn test_exclude_with_single_entity_returns_it() {
        let store = EntityStore::new(vec![entity("FR", "Paris", "France")], dims()).unwrap();
        let mut rng = QuizRng::new(5);
        assert_eq!(
            store.select_random(&mut rng, Some(EntityIndex(0))),
            EntityIndex(0)
        );
    }

    #[test]
    fn test_lookup_helpers() {
        let store = store();
        assert_eq!(store.find_by_id("DE"), Some(EntityIndex(1)));
        assert_eq!(store.find_by_id("XX"), None);
        assert_eq!(store.on_map_count(), 4);
        assert_eq!(store.same_container(EntityIndex(4)), vec![EntityIndex(3)]);
        assert!(store.same_container(EntityIndex(0)).is_empty());
    }
}
