use alloc::vec;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Turn controller: owns the board of one game and enforces the flip/compare/resolve cycle.
///
/// A mismatch leaves the engine locked until [`PlayEngine::settle_mismatch`] is called, which the
/// session does once the revert delay has elapsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    deck: Deck,
    faces: Vec<CardFace>,
    face_up: SmallVec<[Position; 2]>,
    locked: bool,
    moves: Saturating<u32>,
    matched_pairs: CardCount,
}

impl PlayEngine {
    pub fn new(deck: Deck) -> Self {
        let faces = vec![CardFace::Down; deck.cards().len()];
        Self {
            deck,
            faces,
            face_up: SmallVec::new(),
            locked: false,
            moves: Saturating(0),
            matched_pairs: 0,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn len(&self) -> CardCount {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn card_at(&self, position: Position) -> &Card {
        &self.deck[position]
    }

    pub fn face_at(&self, position: Position) -> CardFace {
        self.faces[usize::from(position)]
    }

    pub fn face_up(&self) -> &[Position] {
        &self.face_up
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn matched_pairs(&self) -> CardCount {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> CardCount {
        self.deck.pair_count()
    }

    pub fn is_won(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    pub fn flip(&mut self, position: Position) -> Result<TurnOutcome> {
        use TurnOutcome::*;

        let position = self.deck.validate_position(position)?;

        if self.locked {
            return Ok(IgnoredLocked);
        }

        match self.face_at(position) {
            CardFace::Up => return Ok(IgnoredAlreadyFaceUp),
            CardFace::Matched => return Ok(IgnoredAlreadyMatched),
            CardFace::Down => {}
        }

        self.faces[usize::from(position)] = CardFace::Up;
        self.face_up.push(position);

        let &[first, second] = self.face_up.as_slice() else {
            return Ok(Accepted);
        };

        self.moves += 1;

        if self.deck[first].matches(&self.deck[second]) {
            self.faces[usize::from(first)] = CardFace::Matched;
            self.faces[usize::from(second)] = CardFace::Matched;
            self.face_up.clear();
            self.matched_pairs += 1;
            log::trace!("matched {} and {}", first, second);
            Ok(ResolvedMatch)
        } else {
            self.locked = true;
            log::trace!("mismatch {} and {}, locked", first, second);
            Ok(ResolvedMismatch)
        }
    }

    /// Turns a mismatched pair back face down and unlocks the board. No-op unless locked.
    pub fn settle_mismatch(&mut self) -> bool {
        if !self.locked {
            return false;
        }

        for position in self.face_up.drain(..) {
            self.faces[usize::from(position)] = CardFace::Down;
        }
        self.locked = false;
        true
    }
}
