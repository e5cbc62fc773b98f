//! Play records and client-supplied resolution data.
//!
//! Every successful `play_card` call appends a `PlayRecord` to the
//! match log (a Chancellor play appends twice: the initial play and the
//! resolution). The log is append-only for the whole match; the
//! transport layer turns it into history panels and event feeds.

use serde::{Deserialize, Serialize};

use super::card::CardKind;
use super::player::PlayerId;

/// Client decision resolving a pending Chancellor action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChancellorChoice {
    /// Index into the drawn pool of the card to keep.
    pub selected: usize,

    /// When two cards return to the deck: which of the remaining pool
    /// cards (0 or 1, in pool order after the kept card is removed)
    /// ends bottom-most, i.e. is drawn last. Required exactly in that
    /// case.
    pub top: Option<usize>,
}

impl ChancellorChoice {
    /// Keep one card; a single leftover returns to the deck unordered.
    #[must_use]
    pub const fn keep(selected: usize) -> Self {
        Self {
            selected,
            top: None,
        }
    }

    /// Keep one card and order the two leftovers.
    #[must_use]
    pub const fn keep_with_top(selected: usize, top: usize) -> Self {
        Self {
            selected,
            top: Some(top),
        }
    }
}

/// A resolved play, as recorded in the match log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Position in the match log (0-based, monotonically increasing).
    pub sequence: u32,

    /// Seat that played.
    pub player: PlayerId,

    /// Card kind played.
    pub kind: CardKind,

    /// Target seat, for targeted plays.
    pub target: Option<PlayerId>,

    /// Guessed kind, for targeted Guard plays.
    pub guess: Option<CardKind>,

    /// Guard only: whether the guess eliminated the target.
    pub success: Option<bool>,
}

impl PlayRecord {
    /// Create a new play record.
    #[must_use]
    pub fn new(
        sequence: u32,
        player: PlayerId,
        kind: CardKind,
        target: Option<PlayerId>,
        guess: Option<CardKind>,
        success: Option<bool>,
    ) -> Self {
        Self {
            sequence,
            player,
            kind,
            target,
            guess,
            success,
        }
    }
}
