use napi::Result as NapiResult;
use napi_derive::napi;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use realty_metrics_core::pipeline::compute_property_metrics;
use realty_metrics_core::types::Percent;
use realty_metrics_core::validate::{RawFinancing, RawInputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_scenario_rates(rates: Option<Vec<f64>>) -> NapiResult<Option<Vec<Percent>>> {
    match rates {
        None => Ok(None),
        Some(raw) => raw
            .into_iter()
            .map(|r| {
                Decimal::from_f64(r)
                    .ok_or_else(|| to_napi_error(format!("{r} is not a finite cap rate")))
            })
            .collect::<NapiResult<Vec<Percent>>>()
            .map(Some),
    }
}

// ---------------------------------------------------------------------------
// Cap-rate widget
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PropertyMetricsRequest {
    #[serde(flatten)]
    inputs: RawInputs,
    #[serde(default)]
    scenario_cap_rates: Option<Vec<f64>>,
}

#[napi]
pub fn property_metrics(input_json: String) -> NapiResult<String> {
    let request: PropertyMetricsRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rates = parse_scenario_rates(request.scenario_cap_rates)?;
    let output = compute_property_metrics(&request.inputs, rates.as_deref())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rental-yield widget
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RentalYieldRequest {
    property_value: f64,
    #[serde(default)]
    purchase_costs: f64,
    monthly_rent: f64,
    #[serde(default)]
    vacancy_rate: f64,
    #[serde(default)]
    operating_expenses: f64,
    #[serde(default)]
    financing: Option<RawFinancing>,
    #[serde(default)]
    scenario_cap_rates: Option<Vec<f64>>,
}

#[napi]
pub fn rental_yield_metrics(input_json: String) -> NapiResult<String> {
    let request: RentalYieldRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let raw = RawInputs::from_monthly_rent(
        request.property_value,
        request.purchase_costs,
        request.monthly_rent,
        request.vacancy_rate,
        request.operating_expenses,
        request.financing,
    );
    let rates = parse_scenario_rates(request.scenario_cap_rates)?;
    let output = compute_property_metrics(&raw, rates.as_deref()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan payment
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LoanPaymentRequest {
    principal: f64,
    annual_rate_pct: f64,
    term_years: u32,
}

#[derive(Serialize)]
struct LoanPaymentResponse {
    monthly_payment: Decimal,
    annual_debt_service: Decimal,
}

#[napi]
pub fn loan_payment(input_json: String) -> NapiResult<String> {
    let request: LoanPaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;

    let principal = Decimal::from_f64(request.principal)
        .ok_or_else(|| to_napi_error("principal is not a finite number"))?;
    let rate = Decimal::from_f64(request.annual_rate_pct)
        .ok_or_else(|| to_napi_error("annual_rate_pct is not a finite number"))?;

    let monthly =
        realty_metrics_core::amortization::monthly_payment(principal, rate, request.term_years)
            .map_err(to_napi_error)?;

    let response = LoanPaymentResponse {
        monthly_payment: monthly,
        annual_debt_service: monthly * Decimal::from(12),
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}
