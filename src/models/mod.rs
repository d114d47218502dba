//! Models are the data types that make up a currency ladder. Mutations on the
//! ladder don't hand back models directly, but rather a list of
//! [Modifications] (ie "create Copper", "update Silver") which the caller can
//! apply to whatever storage medium they keep tiers in.

pub mod tier;

#[cfg(feature = "with_serde")]
use serde_derive::{Serialize, Deserialize};
use tier::CurrencyTier;

/// The type of change a [Modification] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub enum Op {
    Create,
    Update,
    Delete,
}

/// A single change made to the ladder, along with the tier as it looked after
/// the change (or right before removal, for deletes).
#[derive(Clone, Debug, PartialEq, getset::Getters)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
#[getset(get = "pub")]
pub struct Modification {
    op: Op,
    tier: CurrencyTier,
}

impl Modification {
    pub fn new(op: Op, tier: CurrencyTier) -> Self {
        Self { op, tier }
    }

    /// Consume this modification, returning the op/tier pair
    pub fn into_pair(self) -> (Op, CurrencyTier) {
        (self.op, self.tier)
    }

    /// Grab the tier out of this modification if the op matches, otherwise
    /// `None`. Mostly handy in tests.
    pub fn expect_op(self, op: Op) -> Option<CurrencyTier> {
        if self.op == op {
            Some(self.tier)
        } else {
            None
        }
    }
}

/// An ordered list of changes. An empty list means the operation was a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub struct Modifications {
    modifications: Vec<Modification>,
}

impl Modifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_single(op: Op, tier: CurrencyTier) -> Self {
        let mut mods = Self::new();
        mods.push(op, tier);
        mods
    }

    pub fn push(&mut self, op: Op, tier: CurrencyTier) {
        self.modifications.push(Modification::new(op, tier));
    }

    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Modification> {
        self.modifications.iter()
    }

    pub fn into_vec(self) -> Vec<Modification> {
        self.modifications
    }
}

impl IntoIterator for Modifications {
    type Item = Modification;
    type IntoIter = std::vec::IntoIter<Modification>;

    fn into_iter(self) -> Self::IntoIter {
        self.modifications.into_iter()
    }
}
