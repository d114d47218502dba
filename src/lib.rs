//! Welcome to the tier ladder core. This crate holds the datastructures and
//! algorithms behind a game's tiered currency (Copper -> Silver -> Gold): an
//! ordered list of tiers, each knowing how many of itself make one of the next
//! tier up, and an engine that converts an amount in any tier into every
//! other tier.
//!
//! Everything here is pure and in-memory. Storing tiers and drawing them on a
//! screen are somebody else's job: mutations on the [TierLadder] hand back a
//! list of [Modifications] for the caller to persist, and conversions are
//! plain functions over a slice of tiers.
//!
//! ```
//! use tier_ladder::{TierLadder, TierForm};
//!
//! let mut ladder = TierLadder::new();
//! let copper = TierForm::new("Copper", 100.0).into_tier().unwrap();
//! let copper_id = copper.id().clone();
//! ladder.add(copper).unwrap();
//! ladder.add(TierForm::new("Silver", 50.0).into_tier().unwrap()).unwrap();
//! ladder.add(TierForm::new("Gold", 1.0).into_tier().unwrap()).unwrap();
//!
//! let gold = ladder.convert_all(&copper_id, 250.0)
//!     .into_iter()
//!     .find(|(tier, _)| tier.name() == "Gold")
//!     .map(|(_, amount)| amount);
//! assert_eq!(gold, Some(0.05));
//! ```
//!
//! [TierLadder]: ladder/struct.TierLadder.html
//! [Modifications]: models/struct.Modifications.html

pub mod error;
mod util;
pub mod models;
pub mod convert;
pub mod ladder;
pub mod validation;

pub use convert::{convert, convert_all, Conversion};
pub use ladder::{LadderIssue, LadderOptions, TierLadder};
pub use models::{
    Modification,
    Modifications,
    Op,
    tier::{CurrencyTier, TierID, TierPatch},
};
pub use util::number::round_display;
pub use validation::{TierField, TierForm, ValidationErrors};
