//! The tier module holds the `CurrencyTier` model: one denomination in a
//! game's monetary ladder (Copper, Silver, Gold, ...).
//!
//! Tiers are ranked by `order`, where 0 is the lowest-value tier. Each tier
//! knows how many of itself make up one unit of the tier directly above it.

#[cfg(feature = "with_serde")]
use serde_derive::{Serialize, Deserialize};

/// A stable, opaque identifier for a tier. Assigned once and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with_serde", serde(transparent))]
pub struct TierID(String);

impl TierID {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self(id.into())
    }

    /// Create a new random ID
    pub fn create() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Return a string ref for this ID
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for TierID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TierID> for String {
    fn from(id: TierID) -> Self {
        let TierID(val) = id;
        val
    }
}

impl From<String> for TierID {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TierID {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One denomination in the currency ladder.
#[derive(Clone, Debug, PartialEq, getset::Getters, getset::Setters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub", set = "pub(crate)")]
pub struct CurrencyTier {
    id: TierID,
    /// Display label, ie "Gold"
    name: String,
    /// Zero-based rank of this tier. Assigned by the ladder, so callers
    /// generally leave it unset.
    #[builder(default)]
    order: u32,
    /// How many units of this tier equal one unit of the next tier up. Unused
    /// on the highest tier.
    #[builder(default = "1.0")]
    conversion_to_next: f64,
}

impl CurrencyTier {
    pub fn builder() -> CurrencyTierBuilder {
        CurrencyTierBuilder::default()
    }

    /// Merge a patch into this tier. Returns whether anything actually
    /// changed.
    pub(crate) fn apply(&mut self, patch: TierPatch) -> bool {
        let before = self.clone();
        if let Some(name) = patch.name {
            self.set_name(name);
        }
        if let Some(rate) = patch.conversion_to_next {
            self.set_conversion_to_next(rate);
        }
        if let Some(order) = patch.order {
            self.set_order(order);
        }
        &before != self
    }
}

/// A partial tier, used for updates. Any field left `None` is untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TierPatch {
    pub name: Option<String>,
    pub conversion_to_next: Option<f64>,
    /// Setting this directly bypasses the ladder's ordering guarantees. Use
    /// `TierLadder::reorder` unless you know what you're doing.
    pub order: Option<u32>,
}

impl TierPatch {
    pub fn name<T: Into<String>>(name: T) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn conversion_to_next(rate: f64) -> Self {
        Self { conversion_to_next: Some(rate), ..Self::default() }
    }
}
