use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::MAX_LOAN_TERM_YEARS;
use crate::error::ValidationError;
use crate::types::{Money, Percent};

/// Untrusted input snapshot exactly as the widget layer supplies it.
///
/// Fields are f64 because the UI boundary produces JS numbers (parse
/// failures arrive as 0). [`validate`] is the single point where they are
/// converted into `Decimal`; non-finite values fail that conversion and
/// become validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInputs {
    pub property_value: f64,
    /// One-time acquisition costs (stamp duty, legal, agent fees)
    #[serde(default)]
    pub purchase_costs: f64,
    /// Annual rent/income before vacancy
    pub gross_annual_income: f64,
    /// Expected income lost to unoccupied periods, in percent
    #[serde(default)]
    pub vacancy_rate: f64,
    /// Annual operating expenses (taxes, insurance, maintenance, management)
    #[serde(default)]
    pub operating_expenses: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing: Option<RawFinancing>,
}

/// Optional fixed-rate financing assumption, untrusted form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFinancing {
    pub down_payment_pct: f64,
    pub annual_rate_pct: f64,
    pub term_years: u32,
}

impl RawInputs {
    /// Rental-yield widget shape: income entered as monthly rent.
    pub fn from_monthly_rent(
        property_value: f64,
        purchase_costs: f64,
        monthly_rent: f64,
        vacancy_rate: f64,
        operating_expenses: f64,
        financing: Option<RawFinancing>,
    ) -> Self {
        RawInputs {
            property_value,
            purchase_costs,
            gross_annual_income: monthly_rent * 12.0,
            vacancy_rate,
            operating_expenses,
            financing,
        }
    }
}

/// Validated, immutable snapshot. Consumed once per pipeline run and
/// discarded; nothing persists across calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInputs {
    pub property_value: Money,
    pub purchase_costs: Money,
    pub gross_annual_income: Money,
    pub vacancy_rate: Percent,
    pub operating_expenses: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingAssumption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingAssumption {
    pub down_payment_pct: Percent,
    pub annual_rate_pct: Percent,
    pub term_years: u32,
}

/// Normalize and range-check a raw snapshot.
///
/// Hard errors are collected, not short-circuited: non-finite numbers,
/// negative values where forbidden, and a vacancy rate outside [0, 100]
/// (out-of-range vacancy is reported, never silently clamped — clamping
/// would hide user mistakes).
///
/// A zero or negative `property_value` or `gross_annual_income` passes
/// through: those produce undefined downstream metrics, not failures.
pub fn validate(raw: &RawInputs) -> Result<PropertyInputs, Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = Vec::new();

    let property_value = finite(raw.property_value, "property_value", &mut errors);
    let purchase_costs = non_negative(raw.purchase_costs, "purchase_costs", &mut errors);
    let gross_annual_income = finite(raw.gross_annual_income, "gross_annual_income", &mut errors);
    let vacancy_rate = percent_range(raw.vacancy_rate, "vacancy_rate", &mut errors);
    let operating_expenses = non_negative(raw.operating_expenses, "operating_expenses", &mut errors);

    let financing = match raw.financing.as_ref() {
        Some(f) => validate_financing(f, &mut errors),
        None => None,
    };

    match (
        property_value,
        purchase_costs,
        gross_annual_income,
        vacancy_rate,
        operating_expenses,
    ) {
        (
            Some(property_value),
            Some(purchase_costs),
            Some(gross_annual_income),
            Some(vacancy_rate),
            Some(operating_expenses),
        ) if errors.is_empty() => Ok(PropertyInputs {
            property_value,
            purchase_costs,
            gross_annual_income,
            vacancy_rate,
            operating_expenses,
            financing,
        }),
        _ => Err(errors),
    }
}

fn validate_financing(
    raw: &RawFinancing,
    errors: &mut Vec<ValidationError>,
) -> Option<FinancingAssumption> {
    let down_payment_pct = percent_range(raw.down_payment_pct, "financing.down_payment_pct", errors);
    let annual_rate_pct = non_negative(raw.annual_rate_pct, "financing.annual_rate_pct", errors);

    if raw.term_years == 0 || raw.term_years > MAX_LOAN_TERM_YEARS {
        errors.push(ValidationError {
            field: "financing.term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_LOAN_TERM_YEARS} years"),
        });
        return None;
    }

    Some(FinancingAssumption {
        down_payment_pct: down_payment_pct?,
        annual_rate_pct: annual_rate_pct?,
        term_years: raw.term_years,
    })
}

fn finite(value: f64, field: &str, errors: &mut Vec<ValidationError>) -> Option<Decimal> {
    match Decimal::from_f64(value) {
        Some(d) => Some(d),
        None => {
            errors.push(ValidationError {
                field: field.into(),
                reason: format!("{value} is not a finite number"),
            });
            None
        }
    }
}

fn non_negative(value: f64, field: &str, errors: &mut Vec<ValidationError>) -> Option<Decimal> {
    let d = finite(value, field, errors)?;
    if d < Decimal::ZERO {
        errors.push(ValidationError {
            field: field.into(),
            reason: "Must not be negative".into(),
        });
        return None;
    }
    Some(d)
}

fn percent_range(value: f64, field: &str, errors: &mut Vec<ValidationError>) -> Option<Decimal> {
    let d = finite(value, field, errors)?;
    if d < Decimal::ZERO || d > dec!(100) {
        errors.push(ValidationError {
            field: field.into(),
            reason: format!("{d} is outside the valid range [0, 100]"),
        });
        return None;
    }
    Some(d)
}
