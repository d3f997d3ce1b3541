//! Object catalog - the static registry of objects challenges draw from.
//!
//! Loaded once at startup and read-only afterwards. Sampling draws without
//! replacement per difficulty tier; the RNG is injected as a closure so the
//! domain stays free of randomness (the engine supplies one from its
//! `RandomPort`, tests supply deterministic pickers).

use crate::error::DomainError;
use crate::value_objects::{Difficulty, TargetCounts};
use crate::GameObject;

#[derive(Debug, Clone)]
pub struct ObjectCatalog {
    objects: Vec<GameObject>,
}

impl ObjectCatalog {
    pub fn new(objects: Vec<GameObject>) -> Self {
        Self { objects }
    }

    /// The built-in road-trip catalog.
    pub fn seeded() -> Self {
        let easy = Difficulty::Easy;
        let medium = Difficulty::Medium;
        let hard = Difficulty::Hard;
        Self::new(vec![
            GameObject::new("Traffic Cone", "Road", easy),
            GameObject::new("Traffic Light", "Road", easy),
            GameObject::new("Stop Sign", "Road", easy),
            GameObject::new("Wind Turbine", "Energy", medium),
            GameObject::new("Electric Tower", "Infrastructure", medium),
            GameObject::new("Road Sign", "Road", medium),
            GameObject::new("Construction Crane", "Construction", medium),
            GameObject::new("Cow", "Nature", medium),
            GameObject::new("Gas Station", "Urban", medium),
            GameObject::new("Police Car", "Emergency", hard),
            GameObject::new("Ambulance", "Emergency", hard),
            GameObject::new("Tractor", "Farm", hard),
            GameObject::new("Church", "Urban", hard),
        ])
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects of one tier, in catalog order.
    pub fn tier(&self, difficulty: Difficulty) -> Vec<&GameObject> {
        self.objects
            .iter()
            .filter(|o| o.difficulty() == difficulty)
            .collect()
    }

    /// Draw a challenge target set: `counts` objects per tier, uniformly at
    /// random without replacement, easy tier first.
    ///
    /// `pick` must return an index in `0..n` for the given `n`; it is called
    /// once per drawn object against the shrinking pool.
    ///
    /// Fails with `InsufficientCatalog` when any tier has fewer members than
    /// requested - no partial target set is ever produced.
    pub fn sample(
        &self,
        counts: &TargetCounts,
        pick: &mut dyn FnMut(usize) -> usize,
    ) -> Result<Vec<GameObject>, DomainError> {
        // Validate every tier before drawing anything
        for difficulty in Difficulty::all() {
            let requested = counts.for_difficulty(difficulty);
            let available = self.tier(difficulty).len();
            if requested > available {
                return Err(DomainError::insufficient_catalog(
                    difficulty, requested, available,
                ));
            }
        }

        let mut drawn = Vec::with_capacity(counts.total());
        for difficulty in Difficulty::all() {
            let mut pool = self.tier(difficulty);
            for _ in 0..counts.for_difficulty(difficulty) {
                let index = pick(pool.len()).min(pool.len() - 1);
                drawn.push(pool.swap_remove(index).clone());
            }
        }
        Ok(drawn)
    }
}

impl Default for ObjectCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_pick(_n: usize) -> usize {
        0
    }

    #[test]
    fn test_seeded_catalog_covers_all_tiers() {
        let catalog = ObjectCatalog::seeded();
        assert_eq!(catalog.tier(Difficulty::Easy).len(), 3);
        assert_eq!(catalog.tier(Difficulty::Medium).len(), 6);
        assert_eq!(catalog.tier(Difficulty::Hard).len(), 4);
    }

    #[test]
    fn test_sample_draws_requested_counts() {
        let catalog = ObjectCatalog::seeded();
        let counts = TargetCounts::default();
        let mut pick = first_pick;

        let drawn = catalog.sample(&counts, &mut pick).expect("sampled");
        assert_eq!(drawn.len(), 6);
        assert_eq!(
            drawn
                .iter()
                .filter(|o| o.difficulty() == Difficulty::Easy)
                .count(),
            3
        );
        assert_eq!(
            drawn
                .iter()
                .filter(|o| o.difficulty() == Difficulty::Medium)
                .count(),
            2
        );
        assert_eq!(
            drawn
                .iter()
                .filter(|o| o.difficulty() == Difficulty::Hard)
                .count(),
            1
        );
    }

    #[test]
    fn test_sample_is_without_replacement() {
        let catalog = ObjectCatalog::seeded();
        let counts = TargetCounts::new(3, 0, 0);
        let mut pick = first_pick;

        let drawn = catalog.sample(&counts, &mut pick).expect("sampled");
        let mut ids: Vec<_> = drawn.iter().map(|o| o.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    // Scenario D: under-supplied tier fails outright, no partial set.
    #[test]
    fn test_sample_insufficient_tier_fails() {
        let catalog = ObjectCatalog::new(vec![
            GameObject::new("Traffic Cone", "Road", Difficulty::Easy),
            GameObject::new("Stop Sign", "Road", Difficulty::Easy),
        ]);
        let counts = TargetCounts::new(3, 0, 0);
        let mut pick = first_pick;

        let err = catalog.sample(&counts, &mut pick).expect_err("must fail");
        assert_eq!(
            err,
            DomainError::insufficient_catalog(Difficulty::Easy, 3, 2)
        );
    }

    #[test]
    fn test_sample_zero_counts_yields_empty() {
        let catalog = ObjectCatalog::seeded();
        let counts = TargetCounts::new(0, 0, 0);
        let mut pick = first_pick;
        let drawn = catalog.sample(&counts, &mut pick).expect("sampled");
        assert!(drawn.is_empty());
    }
}
