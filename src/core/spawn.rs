//! Spawn candidates - picking which collectible to force-spawn.

use crate::{
    core::catalog::Catalog,
    entities::ball,
    errors::{Error, Result},
};
use rand::{Rng, distributions::WeightedIndex, prelude::Distribution};

/// A collectible about to be spawned in a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnCandidate {
    pub ball: ball::Model,
}

impl SpawnCandidate {
    /// Spawns exactly the given collectible.
    #[must_use]
    pub const fn new(ball: ball::Model) -> Self {
        Self { ball }
    }

    /// Picks an enabled collectible at random, weighted by its rarity value.
    ///
    /// # Errors
    /// `Error::EmptyCatalog` when no enabled collectible has a usable weight.
    pub fn random<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Self> {
        let candidates: Vec<&ball::Model> = catalog.balls().filter(|b| b.enabled).collect();
        let weights = WeightedIndex::new(candidates.iter().map(|b| b.rarity))
            .map_err(|_| Error::EmptyCatalog)?;

        Ok(Self::new(candidates[weights.sample(rng)].clone()))
    }

    /// Display name of the collectible
    #[must_use]
    pub fn name(&self) -> &str {
        &self.ball.country
    }
}

/// Reply when staff try to spawn or give a collectible that is not tradeable.
#[must_use]
pub fn not_tradeable_message(action: &str, collectible_name: &str) -> String {
    format!("You do not have permission to {action} this {collectible_name}")
}

/// Audit line recorded after a forced spawn.
#[must_use]
pub fn spawn_audit_line(
    invoker: &str,
    collectible_name: &str,
    candidate: &SpawnCandidate,
    channel: &str,
) -> String {
    format!(
        "{invoker} spawned {collectible_name} {} in {channel}.",
        candidate.name()
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::test_ball;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_random_only_picks_enabled() {
        let mut disabled = test_ball(2, "Atlantis", 1000.0);
        disabled.enabled = false;
        let catalog = Catalog::new(vec![test_ball(1, "France", 1.0), disabled], Vec::new());
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let candidate = SpawnCandidate::random(&catalog, &mut rng).unwrap();
            assert_eq!(candidate.name(), "France");
        }
    }

    #[test]
    fn test_random_follows_weights() {
        let catalog = Catalog::new(
            vec![test_ball(1, "Common", 9.0), test_ball(2, "Rare", 1.0)],
            Vec::new(),
        );
        let mut rng = StdRng::seed_from_u64(5);

        let common = (0..10_000)
            .filter(|_| SpawnCandidate::random(&catalog, &mut rng).unwrap().ball.id == 1)
            .count();
        assert!((8_500..=9_500).contains(&common), "got {common}");
    }

    #[test]
    fn test_random_on_empty_catalog_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = SpawnCandidate::random(&Catalog::default(), &mut rng);
        assert!(matches!(result, Err(Error::EmptyCatalog)));

        let zero = Catalog::new(vec![test_ball(1, "Zero", 0.0)], Vec::new());
        assert!(matches!(
            SpawnCandidate::random(&zero, &mut rng),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn test_messages() {
        let candidate = SpawnCandidate::new(test_ball(1, "France", 1.0));
        assert_eq!(
            spawn_audit_line("bob", "countryball", &candidate, "general"),
            "bob spawned countryball France in general."
        );
        assert_eq!(
            not_tradeable_message("give", "countryball"),
            "You do not have permission to give this countryball"
        );
    }
}
