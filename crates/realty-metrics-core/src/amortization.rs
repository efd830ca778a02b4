use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RealtyMetricsError;
use crate::types::{Money, Percent};
use crate::RealtyMetricsResult;

/// Longest accepted loan term. Also bounds the compounding loop below.
pub const MAX_LOAN_TERM_YEARS: u32 = 100;

/// Fixed-rate annuity payment: P * r(1+r)^n / ((1+r)^n - 1),
/// where r is the monthly rate and n the total number of payments.
///
/// A zero-interest loan amortizes straight-line (principal / n); the closed
/// form divides by zero there, so it is special-cased rather than allowed
/// to poison downstream cash-flow math.
pub fn monthly_payment(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> RealtyMetricsResult<Money> {
    if term_years > MAX_LOAN_TERM_YEARS {
        return Err(RealtyMetricsError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Loan term must be at most {MAX_LOAN_TERM_YEARS} years"),
        });
    }

    let total_months = term_years * 12;
    if total_months == 0 {
        return Err(RealtyMetricsError::DivisionByZero {
            context: "monthly payment over a zero-month term".into(),
        });
    }

    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    let numerator = principal * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(RealtyMetricsError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    Ok(numerator / denominator)
}

/// Annualized debt service: 12 monthly payments.
pub fn annual_debt_service(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> RealtyMetricsResult<Money> {
    Ok(monthly_payment(principal, annual_rate_pct, term_years)? * dec!(12))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_sanity() {
        // $750k at 6.5% over 30 years, expected ~$4,740/mo
        let payment = monthly_payment(dec!(750000), dec!(6.5), 30).unwrap();
        assert!(
            payment > dec!(4700) && payment < dec!(4800),
            "Monthly payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        // $360k over 30 years interest-free = exactly $1000/mo
        let payment = monthly_payment(dec!(360000), Decimal::ZERO, 30).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_zero_term_is_error() {
        let result = monthly_payment(dec!(100000), dec!(5), 0);
        assert!(matches!(
            result,
            Err(RealtyMetricsError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_term_beyond_maximum_is_rejected() {
        let result = monthly_payment(dec!(100000), dec!(5), MAX_LOAN_TERM_YEARS + 1);
        assert!(matches!(
            result,
            Err(RealtyMetricsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_total_interest_never_negative() {
        for rate in [dec!(0), dec!(0.1), dec!(3.5), dec!(6.5), dec!(12)] {
            let principal = dec!(250000);
            let payment = monthly_payment(principal, rate, 25).unwrap();
            let total_interest = payment * dec!(300) - principal;
            assert!(
                total_interest >= Decimal::ZERO,
                "Negative total interest {total_interest} at rate {rate}"
            );
        }
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let low = monthly_payment(dec!(500000), dec!(4), 30).unwrap();
        let high = monthly_payment(dec!(500000), dec!(7), 30).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_annual_debt_service_is_twelve_payments() {
        let monthly = monthly_payment(dec!(750000), dec!(6.5), 30).unwrap();
        let annual = annual_debt_service(dec!(750000), dec!(6.5), 30).unwrap();
        assert_eq!(annual, monthly * dec!(12));
    }
}
