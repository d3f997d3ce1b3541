//! GameObject entity - a real-world object players are asked to photograph.

use serde::{Deserialize, Serialize};

use crate::ids::ObjectId;
use crate::value_objects::Difficulty;

/// A catalog object. Immutable once created; challenges reference catalog
/// entries by value but never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    id: ObjectId,
    name: String,
    category: String,
    difficulty: Difficulty,
}

impl GameObject {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            category: category.into(),
            difficulty,
        }
    }

    /// Set the object ID (used when loading from storage).
    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Points awarded for finding this object, derived from its tier.
    pub fn points(&self) -> u32 {
        self.difficulty.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_follow_difficulty() {
        let cone = GameObject::new("Traffic Cone", "Road", Difficulty::Easy);
        let church = GameObject::new("Church", "Urban", Difficulty::Hard);
        assert_eq!(cone.points(), 10);
        assert_eq!(church.points(), 50);
    }

    #[test]
    fn test_serde_roundtrip() {
        let object = GameObject::new("Cow", "Nature", Difficulty::Medium);
        let json = serde_json::to_string(&object).expect("serialize");
        let back: GameObject = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, object);
    }
}
