//! Return request fees

use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::value_objects::{normalize_amount, round_money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnFee {
    pub base_amount: Decimal,
    pub effective_fee: Decimal,
}

/// Fee charged for a return request. Customers who already paid shipping on
/// the original order are charged half of the configured base fee.
pub fn calculate_return_fee(base_fee: f64, shipping_amount: f64) -> ReturnFee {
    let base_amount = round_money(normalize_amount(base_fee));
    let effective_fee = if normalize_amount(shipping_amount) > Decimal::ZERO {
        tracing::debug!(%base_amount, "order carried shipping, halving return fee");
        round_money(base_amount / Decimal::from(2))
    } else {
        base_amount
    };
    ReturnFee { base_amount, effective_fee }
}

pub fn effective_return_fee(base_fee: f64, shipping_amount: f64) -> Decimal {
    calculate_return_fee(base_fee, shipping_amount).effective_fee
}
