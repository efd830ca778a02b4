use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::types::{Money, Percent};

/// Default "what would it be worth at X%" comparison rates.
pub const DEFAULT_SCENARIO_CAP_RATES: [Percent; 3] = [dec!(6), dec!(8), dec!(10)];

/// Invert the cap-rate formula against a set of target rates:
/// implied value = NOI / (rate / 100).
///
/// A zero rate has no defined implied value and is left out of the map
/// rather than mapped to a sentinel.
pub fn valuations_at_cap_rates(noi: Money, target_rates_pct: &[Percent]) -> BTreeMap<Percent, Money> {
    let mut valuations = BTreeMap::new();
    for &rate_pct in target_rates_pct {
        if rate_pct.is_zero() {
            continue;
        }
        valuations.insert(rate_pct, noi / (rate_pct / dec!(100)));
    }
    valuations
}
