use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Money, Percent};
use crate::validate::PropertyInputs;

/// Full metric record for one pipeline run.
///
/// A `None` field is a metric whose formula divided by zero for these
/// inputs. It serializes as JSON `null` (never omitted) so the widget layer
/// renders "N/A" — defaulting to zero would turn "undefined" into a
/// materially different, misleading statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Gross income after vacancy loss
    pub effective_gross_income: Money,
    /// Effective income minus operating expenses; negative means an
    /// unprofitable property, not an error
    pub net_operating_income: Money,
    /// NOI / property value
    pub cap_rate_pct: Option<Percent>,
    /// Effective income / (value + acquisition costs)
    pub gross_yield_pct: Option<Percent>,
    /// NOI / (value + acquisition costs)
    pub net_yield_pct: Option<Percent>,
    /// Property value / unadjusted annual income
    pub gross_rent_multiplier: Option<Decimal>,
    /// Operating expenses / effective income
    pub expense_ratio_pct: Option<Percent>,
    /// NOI minus annual debt service; absent without a financing assumption
    pub cash_flow_annual: Option<Money>,
    /// Annual cash flow / cash invested; absent without financing
    pub cash_on_cash_return_pct: Option<Percent>,
    /// Implied value at each target cap rate
    pub valuation_at_cap_rate: BTreeMap<Percent, Money>,
}

/// Derive the income and yield metrics from a validated snapshot.
///
/// Financing-dependent fields and the scenario map are left empty here and
/// filled in by the later pipeline stages.
pub fn compute_metrics(inputs: &PropertyInputs) -> DerivedMetrics {
    let occupancy = Decimal::ONE - inputs.vacancy_rate / dec!(100);
    let effective_gross_income = inputs.gross_annual_income * occupancy;

    let net_operating_income = effective_gross_income - inputs.operating_expenses;

    // Cap rate against property value alone
    let cap_rate_pct = ratio_pct(net_operating_income, inputs.property_value);

    let expense_ratio_pct = ratio_pct(inputs.operating_expenses, effective_gross_income);

    // Yields use the full cash basis (value + acquisition costs), not the
    // bare property value the cap rate uses. The denominators differ on
    // purpose.
    let investment_basis = inputs.property_value + inputs.purchase_costs;
    let gross_yield_pct = ratio_pct(effective_gross_income, investment_basis);
    let net_yield_pct = ratio_pct(net_operating_income, investment_basis);

    let gross_rent_multiplier = guarded_div(inputs.property_value, inputs.gross_annual_income);

    DerivedMetrics {
        effective_gross_income,
        net_operating_income,
        cap_rate_pct,
        gross_yield_pct,
        net_yield_pct,
        gross_rent_multiplier,
        expense_ratio_pct,
        cash_flow_annual: None,
        cash_on_cash_return_pct: None,
        valuation_at_cap_rate: BTreeMap::new(),
    }
}

/// numerator / denominator as a percentage, or None on a zero denominator.
fn ratio_pct(numerator: Decimal, denominator: Decimal) -> Option<Percent> {
    guarded_div(numerator, denominator).map(|r| r * dec!(100))
}

fn guarded_div(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}
