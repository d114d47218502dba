//! The ladder is the ordered collection of currency tiers, and the only thing
//! allowed to hand out or rewrite a tier's `order`.
//!
//! After any run of `add`/`reorder`/`move_up`/`move_down`, the sorted view
//! holds orders exactly `0..N-1`. By default `delete` keeps that guarantee by
//! closing the gap it leaves behind (see [LadderOptions]). An `update` that
//! explicitly sets `order` does not, and [TierLadder::renumber] is there to
//! repair things afterwards.
//!
//! Every mutation returns the [Modifications] it made. An empty set means
//! nothing happened, which is also how unknown ids are reported: we fail
//! quiet here and leave existence checks to the caller.

use crate::{
    convert::{self, Conversion},
    error::{Error, Result},
    models::{
        Modifications,
        Op,
        tier::{CurrencyTier, TierID, TierPatch},
    },
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Knobs for how the ladder behaves.
#[derive(Clone, Debug, PartialEq, getset::Getters, derive_builder::Builder)]
#[builder(pattern = "owned", setter(into))]
#[getset(get = "pub")]
pub struct LadderOptions {
    /// When a tier is deleted, renumber everything above it so the orders
    /// stay contiguous. When off, the gap stays put and conversions step
    /// over it.
    #[builder(default = "true")]
    renumber_on_delete: bool,
}

impl LadderOptions {
    pub fn builder() -> LadderOptionsBuilder {
        LadderOptionsBuilder::default()
    }
}

impl Default for LadderOptions {
    fn default() -> Self {
        Self { renumber_on_delete: true }
    }
}

/// Something wrong with the ladder as a whole, as reported by
/// [TierLadder::issues].
#[derive(Clone, Debug, PartialEq)]
pub enum LadderIssue {
    /// Two (or more) tiers share an id
    DuplicateId(TierID),
    /// Two (or more) tiers share an order
    DuplicateOrder(u32),
    /// Nothing occupies this order, but something above it does
    MissingOrder(u32),
    /// This tier has a blank name
    BlankName(TierID),
    /// This tier converts to the next one at a rate below 1 (or not a number)
    InvalidRate(TierID),
}

/// An ordered list of currency tiers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TierLadder {
    tiers: Vec<CurrencyTier>,
    options: LadderOptions,
}

impl TierLadder {
    /// Create an empty ladder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LadderOptions) -> Self {
        Self { tiers: Vec::new(), options }
    }

    /// Load a ladder from tiers that already exist (ie, pulled out of
    /// storage). Orders are trusted as-is: run [TierLadder::issues] or
    /// [TierLadder::renumber] if they might be off.
    pub fn from_tiers(tiers: Vec<CurrencyTier>, options: LadderOptions) -> Self {
        Self { tiers, options }
    }

    pub fn options(&self) -> &LadderOptions {
        &self.options
    }

    /// The tiers in storage order (which is not necessarily sorted).
    pub fn tiers(&self) -> &[CurrencyTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, id: &TierID) -> Option<&CurrencyTier> {
        self.tiers.iter().find(|t| t.id() == id)
    }

    /// The tiers sorted ascending by order. Computed fresh on each call.
    pub fn sorted_view(&self) -> Vec<&CurrencyTier> {
        let mut sorted = self.tiers.iter().collect::<Vec<_>>();
        // stable, so tiers with duplicate orders keep their storage order
        sorted.sort_by_key(|t| *t.order());
        sorted
    }

    /// Sorted, owned copies of the tiers.
    pub fn sorted_tiers(&self) -> Vec<CurrencyTier> {
        self.sorted_view().into_iter().cloned().collect()
    }

    /// Append a tier to the top of the ladder. Whatever order the tier came
    /// in with is replaced by the next free order: the tier count on a
    /// contiguous ladder, or one past the highest order if gaps were left by
    /// a delete.
    pub fn add(&mut self, mut tier: CurrencyTier) -> Result<Modifications> {
        if self.get(tier.id()).is_some() {
            return Err(Error::DuplicateTier(tier.id().to_string()));
        }
        let next = self.tiers.iter()
            .map(|t| t.order().saturating_add(1))
            .max()
            .unwrap_or(0);
        tier.set_order(next);
        debug!(id = %tier.id(), order = tier.order(), "ladder: add tier");
        self.tiers.push(tier.clone());
        Ok(Modifications::new_single(Op::Create, tier))
    }

    /// Merge `patch` into the tier with the given id.
    pub fn update(&mut self, id: &TierID, patch: TierPatch) -> Modifications {
        let tier = match self.tiers.iter_mut().find(|t| t.id() == id) {
            Some(tier) => tier,
            None => {
                trace!(id = %id, "ladder: update on unknown tier");
                return Modifications::new();
            }
        };
        if !tier.apply(patch) {
            return Modifications::new();
        }
        debug!(id = %id, "ladder: update tier");
        Modifications::new_single(Op::Update, tier.clone())
    }

    /// Remove the tier with the given id. If `renumber_on_delete` is set, the
    /// tiers above it each drop down one order to fill the hole.
    pub fn delete(&mut self, id: &TierID) -> Modifications {
        let idx = match self.tiers.iter().position(|t| t.id() == id) {
            Some(idx) => idx,
            None => {
                trace!(id = %id, "ladder: delete on unknown tier");
                return Modifications::new();
            }
        };
        let removed = self.tiers.remove(idx);
        debug!(id = %id, order = removed.order(), "ladder: delete tier");
        let mut mods = Modifications::new_single(Op::Delete, removed);
        if *self.options.renumber_on_delete() {
            for tier in self.renumber() {
                mods.push(Op::Update, tier.into_pair().1);
            }
        }
        mods
    }

    /// Move the tier at sorted position `from` so it ends up at sorted
    /// position `to`, then reassign every tier's order to its new position.
    ///
    /// This is splice semantics: the tier is pulled out first, then inserted
    /// at `to` in what's left. An out-of-range `from` does nothing, and `to`
    /// is clamped to the last position.
    pub fn reorder(&mut self, from: usize, to: usize) -> Modifications {
        let len = self.tiers.len();
        if from >= len {
            trace!(from, len, "ladder: reorder from out of range");
            return Modifications::new();
        }
        let to = to.min(len - 1);
        if from == to {
            return Modifications::new();
        }
        let mut ids = self.sorted_view()
            .into_iter()
            .map(|t| t.id().clone())
            .collect::<Vec<_>>();
        let moved = ids.remove(from);
        ids.insert(to, moved);
        debug!(from, to, "ladder: reorder");
        self.assign_orders(&ids)
    }

    /// Move the tier at sorted position `index` one step toward the bottom
    /// (order 0). Does nothing for the first tier.
    pub fn move_up(&mut self, index: usize) -> Modifications {
        if index == 0 || index >= self.tiers.len() {
            return Modifications::new();
        }
        self.reorder(index, index - 1)
    }

    /// Move the tier at sorted position `index` one step toward the top.
    /// Does nothing for the last tier.
    pub fn move_down(&mut self, index: usize) -> Modifications {
        if index >= self.tiers.len().saturating_sub(1) {
            return Modifications::new();
        }
        self.reorder(index, index + 1)
    }

    /// Rewrite every order to `0..N-1`, keeping the current sorted sequence.
    /// Closes gaps and splits up duplicate orders.
    pub fn renumber(&mut self) -> Modifications {
        let ids = self.sorted_view()
            .into_iter()
            .map(|t| t.id().clone())
            .collect::<Vec<_>>();
        self.assign_orders(&ids)
    }

    /// Give each tier the order matching its position in `ids`, reporting
    /// the tiers that actually moved.
    fn assign_orders(&mut self, ids: &[TierID]) -> Modifications {
        let positions = ids.iter()
            .enumerate()
            .map(|(i, id)| (id, i as u32))
            .collect::<HashMap<_, _>>();
        let mut mods = Modifications::new();
        for tier in self.tiers.iter_mut() {
            let order = match positions.get(tier.id()) {
                Some(order) => *order,
                None => continue,
            };
            if *tier.order() != order {
                tier.set_order(order);
                mods.push(Op::Update, tier.clone());
            }
        }
        mods
    }

    /// Convert `amount` of the tier `from` into every tier, lowest first.
    /// Empty if `from` isn't in the ladder.
    pub fn convert_all(&self, from: &TierID, amount: f64) -> Vec<(CurrencyTier, f64)> {
        let sorted = self.sorted_tiers();
        convert::convert_all(&sorted, from, amount)
            .into_iter()
            .map(|Conversion { tier, amount }| (tier.clone(), amount))
            .collect()
    }

    /// Look over the whole ladder for anything that breaks its invariants or
    /// would make for a nonsensical conversion.
    pub fn issues(&self) -> Vec<LadderIssue> {
        let mut issues = Vec::new();

        let mut seen_ids = HashSet::new();
        for tier in &self.tiers {
            if !seen_ids.insert(tier.id()) {
                issues.push(LadderIssue::DuplicateId(tier.id().clone()));
            }
        }

        let sorted = self.sorted_view();
        let mut expected = 0u32;
        let mut last = None;
        for tier in &sorted {
            let order = *tier.order();
            if last == Some(order) {
                issues.push(LadderIssue::DuplicateOrder(order));
                continue;
            }
            while expected < order {
                issues.push(LadderIssue::MissingOrder(expected));
                expected += 1;
            }
            expected = order + 1;
            last = Some(order);
        }

        let top = sorted.last().map(|t| t.id().clone());
        for tier in &sorted {
            if tier.name().trim().is_empty() {
                issues.push(LadderIssue::BlankName(tier.id().clone()));
            }
            let rate = *tier.conversion_to_next();
            if Some(tier.id()) != top.as_ref() && !(rate >= 1.0 && rate.is_finite()) {
                issues.push(LadderIssue::InvalidRate(tier.id().clone()));
            }
        }
        issues
    }
}
