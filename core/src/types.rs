use serde::{Deserialize, Serialize};

/// Index of a card slot on the board, counted row by row.
pub type Position = u8;

/// Count type used for card and pair counts.
pub type CardCount = u8;

/// Identifier of a [`Symbol`](crate::Symbol) in the catalog, shared by both cards of a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u8);

/// Distinguishes the two physical cards of one pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instance {
    A,
    B,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub pair_id: SymbolId,
    pub instance: Instance,
    pub position: Position,
}

impl Card {
    /// Two cards match when they share a symbol but are different physical cards.
    pub fn matches(&self, other: &Card) -> bool {
        self.pair_id == other.pair_id && self.instance != other.instance
    }
}

/// Player-visible state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

impl CardFace {
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Down
    }
}

/// Difficulty tier, the only configuration axis of a game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Easy, Tier::Hard];

    pub const fn pairs(self) -> CardCount {
        match self {
            Self::Easy => 6,
            Self::Hard => 12,
        }
    }

    pub const fn card_count(self) -> CardCount {
        self.pairs() * 2
    }

    /// Grid width used when laying the cards out.
    pub const fn columns(self) -> CardCount {
        match self {
            Self::Easy => 4,
            Self::Hard => 6,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
        }
    }
}
