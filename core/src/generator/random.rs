use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform generation: picks distinct symbols from the catalog, pairs them up and shuffles the whole deck.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator<'a> {
    seed: u64,
    catalog: &'a [Symbol],
}

impl RandomDeckGenerator<'static> {
    pub fn new(seed: u64) -> Self {
        Self::with_catalog(seed, CATALOG)
    }
}

impl<'a> RandomDeckGenerator<'a> {
    pub fn with_catalog(seed: u64, catalog: &'a [Symbol]) -> Self {
        Self { seed, catalog }
    }
}

impl DeckGenerator for RandomDeckGenerator<'_> {
    fn generate(self, tier: Tier) -> Result<Deck> {
        let pairs = usize::from(tier.pairs());

        let mut picks: Vec<SymbolId> = self.catalog.iter().map(|symbol| symbol.id).collect();
        picks.sort_unstable();
        picks.dedup();
        if picks.len() < pairs {
            log::error!(
                "Catalog holds {} distinct symbols, {:?} needs {}",
                picks.len(),
                tier,
                pairs
            );
            return Err(GameError::CatalogTooSmall {
                required: pairs,
                available: picks.len(),
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);

        // partial shuffle, the first `pairs` entries end up a uniform sample without replacement
        for i in 0..pairs {
            let j = rng.random_range(i..picks.len());
            picks.swap(i, j);
        }
        picks.truncate(pairs);

        let mut cards: Vec<Card> = picks
            .into_iter()
            .flat_map(|pair_id| {
                [Instance::A, Instance::B].map(|instance| Card {
                    pair_id,
                    instance,
                    position: 0,
                })
            })
            .collect();

        for i in (1..cards.len()).rev() {
            let j = rng.random_range(0..=i);
            cards.swap(i, j);
        }

        for (index, card) in cards.iter_mut().enumerate() {
            card.position = index as Position;
        }

        log::debug!("Generated {:?} deck with seed {}", tier, self.seed);
        Ok(Deck::from_cards_unchecked(cards))
    }
}
