//! A set of utilities for working with amounts once they leave the engine.

use rust_decimal::prelude::*;

/// Round a raw conversion amount to a fixed number of decimal places for
/// display.
///
/// Conversions are done in plain `f64` and never rounded internally. This is
/// the one spot where we snap them to something a human wants to read. Returns
/// `None` for amounts `Decimal` can't represent (NaN, infinity, or something
/// absurdly large).
pub fn round_display(amount: f64, places: u32) -> Option<Decimal> {
    Decimal::from_f64(amount).map(|x| x.round_dp(places))
}
