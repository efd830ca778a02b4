use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::types::{Money, Percent};
use crate::validate::FinancingAssumption;
use crate::RealtyMetricsResult;

/// After-debt-service results for a financed purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowMetrics {
    pub loan_principal: Money,
    pub annual_debt_service: Money,
    pub cash_flow_annual: Money,
    /// Annual cash flow over cash actually invested (down payment plus
    /// acquisition costs); None when nothing was invested
    pub cash_on_cash_return_pct: Option<Percent>,
}

/// Combine NOI with the financing cost.
///
/// Only called when a financing assumption is present — without one the
/// cash-flow pair is simply absent from the output, not zero.
pub fn compute_cash_flow(
    noi: Money,
    financing: &FinancingAssumption,
    property_value: Money,
    purchase_costs: Money,
) -> RealtyMetricsResult<CashFlowMetrics> {
    let down_payment_fraction = financing.down_payment_pct / dec!(100);
    let loan_principal = property_value * (Decimal::ONE - down_payment_fraction);

    let annual_debt_service = amortization::annual_debt_service(
        loan_principal,
        financing.annual_rate_pct,
        financing.term_years,
    )?;

    let cash_flow_annual = noi - annual_debt_service;

    let cash_invested = property_value * down_payment_fraction + purchase_costs;
    let cash_on_cash_return_pct = if cash_invested.is_zero() {
        None
    } else {
        Some(cash_flow_annual / cash_invested * dec!(100))
    };

    Ok(CashFlowMetrics {
        loan_principal,
        annual_debt_service,
        cash_flow_annual,
        cash_on_cash_return_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn financing(down_payment_pct: Decimal, annual_rate_pct: Decimal, term_years: u32) -> FinancingAssumption {
        FinancingAssumption {
            down_payment_pct,
            annual_rate_pct,
            term_years,
        }
    }

    #[test]
    fn test_leveraged_purchase() {
        // $1M at 25% down, 6.5% over 30y against $74k NOI
        let fin = financing(dec!(25), dec!(6.5), 30);
        let cf = compute_cash_flow(dec!(74000), &fin, dec!(1000000), dec!(0)).unwrap();

        assert_eq!(cf.loan_principal, dec!(750000));

        // ~$4,740/mo -> ~$56,900/yr debt service
        assert!(cf.annual_debt_service > dec!(56400) && cf.annual_debt_service < dec!(57600));
        assert_eq!(cf.cash_flow_annual, dec!(74000) - cf.annual_debt_service);

        // Cash invested = $250k down, no costs
        let expected_coc = cf.cash_flow_annual / dec!(250000) * dec!(100);
        assert_eq!(cf.cash_on_cash_return_pct, Some(expected_coc));
    }

    #[test]
    fn test_purchase_costs_count_as_cash_invested() {
        let fin = financing(dec!(20), dec!(5), 25);
        let with_costs = compute_cash_flow(dec!(30000), &fin, dec!(400000), dec!(20000)).unwrap();
        let without_costs = compute_cash_flow(dec!(30000), &fin, dec!(400000), dec!(0)).unwrap();

        // Same cash flow, but more cash in the deal dilutes the return
        assert_eq!(with_costs.cash_flow_annual, without_costs.cash_flow_annual);
        assert!(
            with_costs.cash_on_cash_return_pct.unwrap()
                < without_costs.cash_on_cash_return_pct.unwrap()
        );
    }

    #[test]
    fn test_zero_interest_financing() {
        // $300k at 20% down interest-free over 30y: $240k / 360 * 12 = $8k/yr
        let fin = financing(dec!(20), Decimal::ZERO, 30);
        let cf = compute_cash_flow(dec!(17520), &fin, dec!(300000), dec!(0)).unwrap();

        assert_eq!(cf.loan_principal, dec!(240000));
        assert_eq!(cf.annual_debt_service, dec!(8000));
        assert_eq!(cf.cash_flow_annual, dec!(9520));
    }

    #[test]
    fn test_nothing_down_on_free_property_has_undefined_return() {
        // 0% down and zero property value: no cash invested at all
        let fin = financing(dec!(0), dec!(5), 30);
        let cf = compute_cash_flow(dec!(10000), &fin, dec!(0), dec!(0)).unwrap();
        assert_eq!(cf.cash_on_cash_return_pct, None);
    }

    #[test]
    fn test_negative_cash_flow_is_reported_not_errored() {
        // Thin NOI against heavy debt service
        let fin = financing(dec!(10), dec!(8), 30);
        let cf = compute_cash_flow(dec!(20000), &fin, dec!(1000000), dec!(0)).unwrap();
        assert!(cf.cash_flow_annual < Decimal::ZERO);
        assert!(cf.cash_on_cash_return_pct.unwrap() < Decimal::ZERO);
    }
}
