//! Card effects.
//!
//! What happens when a card hits the table:
//! - `CardEffect`: behavior seam, one implementation per card kind
//! - `PlayContext` / `PlayOutcome`: what an effect receives and reports
//! - `effect_for`: dispatch from `CardKind` to its behavior
//!
//! ## Design Philosophy
//!
//! Effects mutate `GameState` directly and own only the rules printed
//! on their card. Turn order, the forced-Countess rule and the play
//! log live in the engine; target legality lives in `targeting` and is
//! shared by every kind that aims at a seat.

mod cards;
mod effect;
mod targeting;

pub use cards::{
    effect_for, BaronEffect, ChancellorEffect, CountessEffect, GuardEffect, HandmaidEffect,
    KingEffect, PriestEffect, PrinceEffect, PrincessEffect, SpyEffect,
};
pub use effect::{CardEffect, PlayContext, PlayOutcome, Reveal};
pub use targeting::{engaged_target, validate_target};
