//! The conversion module turns an amount expressed in one tier into its
//! equivalent in every other tier of the ladder.
//!
//! Converting *up* the ladder (toward higher `order`) divides by each rung's
//! `conversion_to_next`, converting *down* multiplies. So with
//! `Copper(100) -> Silver(50) -> Gold`, 250 copper is `250 / 100 / 50 = 0.05`
//! gold and 1 gold is `1 * 50 * 100 = 5000` copper.
//!
//! Everything here is a pure function of its inputs. No rounding happens in
//! the engine: use [Conversion::rounded] (or your own formatting) for display.

use crate::{
    models::tier::{CurrencyTier, TierID},
    util::number,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::trace;

/// One entry in the result of [convert_all]: a tier and the amount of it that
/// is equivalent to the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion<'a> {
    pub tier: &'a CurrencyTier,
    pub amount: f64,
}

impl<'a> Conversion<'a> {
    /// The converted amount, rounded to `places` decimals for display.
    pub fn rounded(&self, places: u32) -> Option<Decimal> {
        number::round_display(self.amount, places)
    }
}

/// Maps order -> tier so each rung is found without rescanning the list. If
/// two tiers somehow share an order, the first one wins.
fn index_by_order(tiers: &[CurrencyTier]) -> HashMap<u32, &CurrencyTier> {
    let mut index = HashMap::with_capacity(tiers.len());
    for tier in tiers {
        index.entry(*tier.order()).or_insert(tier);
    }
    index
}

/// Walk the rungs between two orders, dividing (upward) or multiplying
/// (downward) by each rung's rate. A missing rung is skipped.
fn walk(index: &HashMap<u32, &CurrencyTier>, from: u32, to: u32, amount: f64) -> f64 {
    let mut running = amount;
    if to > from {
        for order in from..to {
            match index.get(&order) {
                Some(rung) => running /= rung.conversion_to_next(),
                None => trace!(order, "convert: skipping missing rung"),
            }
        }
    } else if to < from {
        for order in to..from {
            match index.get(&order) {
                Some(rung) => running *= rung.conversion_to_next(),
                None => trace!(order, "convert: skipping missing rung"),
            }
        }
    }
    running
}

/// Convert `amount` of the tier `from` into every tier in `tiers`.
///
/// The result follows the order of `tiers` as given (it is not re-sorted). If
/// `from` isn't in the list, the result is empty.
pub fn convert_all<'a>(tiers: &'a [CurrencyTier], from: &TierID, amount: f64) -> Vec<Conversion<'a>> {
    let source = match tiers.iter().find(|t| t.id() == from) {
        Some(tier) => tier,
        None => {
            trace!(from = %from, "convert: unknown source tier");
            return Vec::new();
        }
    };
    let index = index_by_order(tiers);
    tiers.iter()
        .map(|tier| {
            let amount = if tier.id() == source.id() {
                amount
            } else {
                walk(&index, *source.order(), *tier.order(), amount)
            };
            Conversion { tier, amount }
        })
        .collect()
}

/// Convert `amount` of the tier `from` into the tier `to`. Returns `None` if
/// either tier is missing.
pub fn convert(tiers: &[CurrencyTier], from: &TierID, to: &TierID, amount: f64) -> Option<f64> {
    let source = tiers.iter().find(|t| t.id() == from)?;
    let target = tiers.iter().find(|t| t.id() == to)?;
    if source.id() == target.id() {
        return Some(amount);
    }
    Some(walk(&index_by_order(tiers), *source.order(), *target.order(), amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::*;

    fn make_tier(id: &str, order: u32, rate: f64) -> CurrencyTier {
        CurrencyTier::builder()
            .id(id)
            .name(id.to_uppercase())
            .order(order)
            .conversion_to_next(rate)
            .build().unwrap()
    }

    fn standard_tiers() -> Vec<CurrencyTier> {
        vec![
            make_tier("copper", 0, 100.0),
            make_tier("silver", 1, 50.0),
            make_tier("gold", 2, 1.0),
        ]
    }

    fn amounts(conversions: &[Conversion]) -> Vec<(String, f64)> {
        conversions.iter()
            .map(|c| (c.tier.id().as_str().to_string(), c.amount))
            .collect()
    }

    #[test]
    fn converts_up_and_down_the_chain() {
        let tiers = standard_tiers();
        let copper = TierID::new("copper");
        let silver = TierID::new("silver");
        let gold = TierID::new("gold");

        assert_eq!(convert(&tiers, &copper, &silver, 100.0), Some(1.0));
        assert_eq!(convert(&tiers, &silver, &gold, 1.0), Some(0.02));
        assert_eq!(convert(&tiers, &gold, &copper, 1.0), Some(5000.0));
        assert_eq!(convert(&tiers, &copper, &gold, 250.0), Some(0.05));
        assert_eq!(convert(&tiers, &gold, &silver, 3.0), Some(150.0));

        let res = convert_all(&tiers, &copper, 250.0);
        assert_eq!(amounts(&res), vec![
            ("copper".to_string(), 250.0),
            ("silver".to_string(), 2.5),
            ("gold".to_string(), 0.05),
        ]);

        let res = convert_all(&tiers, &gold, 1.0);
        assert_eq!(amounts(&res), vec![
            ("copper".to_string(), 5000.0),
            ("silver".to_string(), 50.0),
            ("gold".to_string(), 1.0),
        ]);
    }

    #[test]
    fn identity_is_untouched() {
        let tiers = standard_tiers();
        for tier in &tiers {
            for amount in &[0.0, 1.0, -7.25, 0.1 + 0.2, 1e12] {
                let res = convert_all(&tiers, tier.id(), *amount);
                let me = res.iter().find(|c| c.tier.id() == tier.id()).unwrap();
                assert_eq!(me.amount, *amount);
            }
        }
    }

    #[test]
    fn unknown_source_is_empty() {
        let tiers = standard_tiers();
        assert!(convert_all(&tiers, &TierID::new("platinum"), 10.0).is_empty());
        assert!(convert_all(&[], &TierID::new("copper"), 10.0).is_empty());
        assert_eq!(convert(&tiers, &TierID::new("platinum"), &TierID::new("gold"), 1.0), None);
        assert_eq!(convert(&tiers, &TierID::new("gold"), &TierID::new("platinum"), 1.0), None);
    }

    #[test]
    fn single_tier() {
        // the lone tier's rate is never applied, no matter how silly it is
        let tiers = vec![make_tier("shell", 0, 0.0)];
        let res = convert_all(&tiers, &TierID::new("shell"), 42.0);
        assert_eq!(amounts(&res), vec![("shell".to_string(), 42.0)]);
    }

    #[test]
    fn keeps_caller_ordering() {
        let mut tiers = standard_tiers();
        tiers.reverse();
        let res = convert_all(&tiers, &TierID::new("silver"), 1.0);
        assert_eq!(amounts(&res), vec![
            ("gold".to_string(), 0.02),
            ("silver".to_string(), 1.0),
            ("copper".to_string(), 100.0),
        ]);
    }

    #[test]
    fn skips_missing_rungs() {
        // order 1 was deleted without renumbering
        let tiers = vec![
            make_tier("copper", 0, 10.0),
            make_tier("gold", 2, 4.0),
            make_tier("platinum", 3, 1.0),
        ];
        let copper = TierID::new("copper");
        let gold = TierID::new("gold");
        let platinum = TierID::new("platinum");
        assert_eq!(convert(&tiers, &copper, &gold, 100.0), Some(10.0));
        assert_eq!(convert(&tiers, &copper, &platinum, 100.0), Some(2.5));
        assert_eq!(convert(&tiers, &platinum, &copper, 1.0), Some(40.0));
    }

    #[test]
    fn bad_rates_are_not_rejected() {
        let tiers = vec![
            make_tier("dust", 0, 0.0),
            make_tier("rock", 1, 1.0),
        ];
        let res = convert(&tiers, &TierID::new("dust"), &TierID::new("rock"), 5.0).unwrap();
        assert!(res.is_infinite());
        let res = convert(&tiers, &TierID::new("rock"), &TierID::new("dust"), 5.0).unwrap();
        assert_eq!(res, 0.0);
    }

    #[test]
    fn rounds_for_display() {
        let tiers = vec![
            make_tier("copper", 0, 3.0),
            make_tier("silver", 1, 1.0),
        ];
        let res = convert_all(&tiers, &TierID::new("copper"), 1.0);
        assert_eq!(res[1].rounded(2), Some(dec!(0.33)));
        assert_eq!(res[0].rounded(2), Some(dec!(1)));
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_consistent(
            rates in prop::collection::vec(1.0..1000.0f64, 2..8),
            amount in -1e6..1e6f64,
            a in 0usize..8,
            b in 0usize..8,
        ) {
            let tiers: Vec<CurrencyTier> = rates.iter()
                .enumerate()
                .map(|(i, rate)| make_tier(&format!("t{}", i), i as u32, *rate))
                .collect();
            let a = tiers[a % tiers.len()].id().clone();
            let b = tiers[b % tiers.len()].id().clone();
            let there = convert(&tiers, &a, &b, amount).unwrap();
            let back = convert(&tiers, &b, &a, there).unwrap();
            let tolerance = 1e-9 * amount.abs().max(1.0);
            prop_assert!((back - amount).abs() <= tolerance, "{} -> {} -> {}", amount, there, back);
        }

        #[test]
        fn prop_is_deterministic(
            rates in prop::collection::vec(1.0..1000.0f64, 1..8),
            amount in -1e6..1e6f64,
        ) {
            let tiers: Vec<CurrencyTier> = rates.iter()
                .enumerate()
                .map(|(i, rate)| make_tier(&format!("t{}", i), i as u32, *rate))
                .collect();
            let from = tiers[0].id().clone();
            let res1 = convert_all(&tiers, &from, amount);
            let res2 = convert_all(&tiers, &from, amount);
            prop_assert_eq!(res1, res2);
        }
    }
}
