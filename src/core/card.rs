//! Card kinds and physical cards.
//!
//! ## CardKind
//!
//! The closed set of ten card types in the Chancellor edition.
//! Variant order follows card value (Spy = 0 up to Princess = 9),
//! so `Ord` on `CardKind` matches strength comparison.
//!
//! ## Card
//!
//! One physical copy in a round's deck. Copies of the same kind share
//! a value but carry distinct `CardId`s so the discard pile stays an
//! unambiguous audit trail.

use serde::{Deserialize, Serialize};

/// The ten card types, in value order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    Spy,
    Guard,
    Priest,
    Baron,
    Handmaid,
    Prince,
    Chancellor,
    King,
    Countess,
    Princess,
}

/// Number of cards in a freshly built deck.
pub const DECK_SIZE: usize = 21;

impl CardKind {
    /// All ten kinds, in value order.
    pub const ALL: [CardKind; 10] = [
        CardKind::Spy,
        CardKind::Guard,
        CardKind::Priest,
        CardKind::Baron,
        CardKind::Handmaid,
        CardKind::Prince,
        CardKind::Chancellor,
        CardKind::King,
        CardKind::Countess,
        CardKind::Princess,
    ];

    /// Card strength, 0-9.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            CardKind::Spy => 0,
            CardKind::Guard => 1,
            CardKind::Priest => 2,
            CardKind::Baron => 3,
            CardKind::Handmaid => 4,
            CardKind::Prince => 5,
            CardKind::Chancellor => 6,
            CardKind::King => 7,
            CardKind::Countess => 8,
            CardKind::Princess => 9,
        }
    }

    /// Number of copies of this kind in the deck.
    #[must_use]
    pub const fn copies(self) -> u8 {
        match self {
            CardKind::Spy => 2,
            CardKind::Guard => 6,
            CardKind::Priest => 2,
            CardKind::Baron => 2,
            CardKind::Handmaid => 2,
            CardKind::Prince => 2,
            CardKind::Chancellor => 2,
            CardKind::King => 1,
            CardKind::Countess => 1,
            CardKind::Princess => 1,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Spy => "Spy",
            CardKind::Guard => "Guard",
            CardKind::Priest => "Priest",
            CardKind::Baron => "Baron",
            CardKind::Handmaid => "Handmaid",
            CardKind::Prince => "Prince",
            CardKind::Chancellor => "Chancellor",
            CardKind::King => "King",
            CardKind::Countess => "Countess",
            CardKind::Princess => "Princess",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identifier of one physical card within a round's deck build.
///
/// Ids are assigned sequentially when the deck is built and are unique
/// within that round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One physical card. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Physical copy identity within the round.
    pub id: CardId,

    /// Which of the ten types this copy is.
    pub kind: CardKind,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }

    /// Card strength, 0-9. Delegates to the kind.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.kind.value()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind.name(), self.kind.value())
    }
}
