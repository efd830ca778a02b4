use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::cash_flow;
use crate::error::RealtyMetricsError;
use crate::metrics::{self, DerivedMetrics};
use crate::scenario::{self, DEFAULT_SCENARIO_CAP_RATES};
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::validate::{self, PropertyInputs, RawInputs};
use crate::RealtyMetricsResult;

/// Run the one-shot pipeline over a raw input snapshot:
/// validate → derive income metrics → apply financing → invert against
/// target cap rates.
///
/// Validation failure stops the run before any metric is derived (no
/// partial results). Past validation every stage is total: degenerate
/// formulas surface as `null` fields in the result, never as errors.
/// The engine holds no state; the caller re-invokes on every input change.
pub fn compute_property_metrics(
    raw: &RawInputs,
    scenario_rates_pct: Option<&[Percent]>,
) -> RealtyMetricsResult<ComputationOutput<DerivedMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let inputs = validate::validate(raw).map_err(RealtyMetricsError::Validation)?;

    let mut derived = metrics::compute_metrics(&inputs);

    if let Some(financing) = &inputs.financing {
        let cf = cash_flow::compute_cash_flow(
            derived.net_operating_income,
            financing,
            inputs.property_value,
            inputs.purchase_costs,
        )?;
        derived.cash_flow_annual = Some(cf.cash_flow_annual);
        derived.cash_on_cash_return_pct = cf.cash_on_cash_return_pct;
    }

    let rates = scenario_rates_pct.unwrap_or(&DEFAULT_SCENARIO_CAP_RATES);
    derived.valuation_at_cap_rate =
        scenario::valuations_at_cap_rates(derived.net_operating_income, rates);

    collect_warnings(&inputs, &derived, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Real Estate Investment Metrics (Income Approach)",
        &inputs,
        warnings,
        elapsed,
        derived,
    ))
}

fn collect_warnings(inputs: &PropertyInputs, derived: &DerivedMetrics, warnings: &mut Vec<String>) {
    if inputs.vacancy_rate > dec!(15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            inputs.vacancy_rate
        ));
    }

    if derived.net_operating_income < Decimal::ZERO {
        warnings.push("NOI is negative — operating expenses exceed effective income".into());
    }

    if let Some(ratio) = derived.expense_ratio_pct {
        if ratio > dec!(100) {
            warnings.push(format!(
                "Expense ratio {ratio:.1}% exceeds 100% of effective income"
            ));
        }
    }

    if let Some(cap) = derived.cap_rate_pct {
        if cap > Decimal::ZERO && cap < dec!(3) {
            warnings.push(format!(
                "Cap rate {cap:.2}% is below 3% — unusually low, verify market data"
            ));
        }
        if cap > dec!(12) {
            warnings.push(format!(
                "Cap rate {cap:.2}% exceeds 12% — unusually high, may indicate elevated risk"
            ));
        }
    }

    if let Some(cf) = derived.cash_flow_annual {
        if cf < Decimal::ZERO {
            warnings.push("Annual cash flow is negative after debt service".into());
        }
    }
}
