#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scheduler::*;
pub use score::*;
pub use session::*;
pub use storage::*;
pub use types::*;

mod catalog;
mod clock;
mod engine;
mod error;
mod generator;
mod scheduler;
mod score;
mod session;
mod storage;
mod types;

/// The cards of one game in board order. Composition never changes during a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Caller guarantees every pair id appears exactly twice, once per instance, and positions match indices.
    pub(crate) fn from_cards_unchecked(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Builds a deck from pair ids in board order. The first occurrence of an id becomes [`Instance::A`].
    pub fn from_pair_ids(pair_ids: &[SymbolId]) -> Result<Self> {
        if pair_ids.is_empty() || pair_ids.len() > usize::from(Position::MAX) {
            return Err(GameError::InvalidDeck);
        }

        let mut cards = Vec::with_capacity(pair_ids.len());
        for (index, &pair_id) in pair_ids.iter().enumerate() {
            if pair_ids.iter().filter(|&&id| id == pair_id).count() != 2 {
                return Err(GameError::InvalidDeck);
            }
            let instance = if pair_ids[..index].contains(&pair_id) {
                Instance::B
            } else {
                Instance::A
            };
            cards.push(Card {
                pair_id,
                instance,
                position: index as Position,
            });
        }

        Ok(Self::from_cards_unchecked(cards))
    }

    pub fn len(&self) -> CardCount {
        self.cards.len() as CardCount
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> CardCount {
        self.len() / 2
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if position < self.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }
}

impl Index<Position> for Deck {
    type Output = Card;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cards[usize::from(position)]
    }
}

/// Result of flipping a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Accepted,
    IgnoredNotPlaying,
    IgnoredLocked,
    IgnoredAlreadyFaceUp,
    IgnoredAlreadyMatched,
    ResolvedMatch,
    ResolvedMismatch,
}

impl TurnOutcome {
    pub const fn has_update(self) -> bool {
        use TurnOutcome::*;
        match self {
            IgnoredNotPlaying | IgnoredLocked | IgnoredAlreadyFaceUp | IgnoredAlreadyMatched => {
                false
            }
            Accepted | ResolvedMatch | ResolvedMismatch => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u8]) -> Vec<SymbolId> {
        raw.iter().copied().map(SymbolId).collect()
    }

    #[test]
    fn deck_from_pair_ids_assigns_instances_and_positions() {
        let deck = Deck::from_pair_ids(&ids(&[4, 7, 7, 4])).unwrap();

        assert_eq!(deck.len(), 4);
        assert_eq!(deck.pair_count(), 2);
        assert_eq!(deck[0].instance, Instance::A);
        assert_eq!(deck[3].instance, Instance::B);
        assert_eq!(deck[2].position, 2);
        assert!(deck[0].matches(&deck[3]));
        assert!(!deck[0].matches(&deck[1]));
    }

    #[test]
    fn deck_rejects_unpaired_or_tripled_ids() {
        assert_eq!(
            Deck::from_pair_ids(&ids(&[1, 1, 2])),
            Err(GameError::InvalidDeck)
        );
        assert_eq!(
            Deck::from_pair_ids(&ids(&[1, 1, 1, 2, 2, 1])),
            Err(GameError::InvalidDeck)
        );
        assert_eq!(Deck::from_pair_ids(&[]), Err(GameError::InvalidDeck));
    }

    #[test]
    fn validate_position_rejects_out_of_range() {
        let deck = Deck::from_pair_ids(&ids(&[0, 0])).unwrap();

        assert_eq!(deck.validate_position(1), Ok(1));
        assert_eq!(deck.validate_position(2), Err(GameError::InvalidPosition));
    }
}
