//! Shipping charge including VAT

use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::value_objects::{add_money, mul_money, round_money, AmountLike};

/// 15% VAT applied to shipping when the source carries no tax figure.
pub const VAT_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingBreakdown {
    pub cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// Tax was computed from `VAT_RATE` rather than taken from the source.
    pub tax_derived: bool,
}

/// Resolves shipping cost and tax. A positive explicit tax is used as-is;
/// otherwise (an explicit zero included) VAT is derived from the cost.
pub fn shipping_breakdown(shipping_cost: &AmountLike, shipping_tax: Option<&AmountLike>) -> ShippingBreakdown {
    let cost = shipping_cost.resolve();
    let explicit_tax = shipping_tax.map(AmountLike::resolve).unwrap_or(Decimal::ZERO);
    let (tax, tax_derived) = if explicit_tax > Decimal::ZERO {
        (explicit_tax, false)
    } else if cost > Decimal::ZERO {
        let tax = round_money(mul_money(cost, VAT_RATE));
        tracing::debug!(%cost, %tax, "deriving shipping VAT");
        (tax, true)
    } else {
        (Decimal::ZERO, false)
    };
    ShippingBreakdown { cost, tax, total: round_money(add_money(cost, tax)), tax_derived }
}

pub fn shipping_total(shipping_cost: &AmountLike, shipping_tax: Option<&AmountLike>) -> Decimal {
    shipping_breakdown(shipping_cost, shipping_tax).total
}
