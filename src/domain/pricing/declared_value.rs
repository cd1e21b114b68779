//! Customs declared value for commercial invoices

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{add_money, mul_money, normalize_amount, round_money};

/// Share of the actual value deducted before declaring it on an invoice.
pub const DEDUCTION_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Declared value of `value`: 30% of it at full precision, zero for
/// non-finite or non-positive input.
pub fn adjust_declared_value(value: f64) -> Decimal {
    mul_money(normalize_amount(value), Decimal::ONE - DEDUCTION_RATE)
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredLine {
    pub sku: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_value: Decimal,
    pub declared_unit_value: Decimal,
    pub declared_total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialInvoice {
    lines: Vec<DeclaredLine>,
    declared_total: Decimal,
}

impl CommercialInvoice {
    pub fn from_lines(lines: impl IntoIterator<Item = InvoiceLine>) -> Self {
        let lines: Vec<DeclaredLine> = lines.into_iter().map(|l| {
            let declared_unit_value = adjust_declared_value(l.unit_value);
            DeclaredLine {
                declared_total: round_money(mul_money(declared_unit_value, Decimal::from(l.quantity))),
                unit_value: normalize_amount(l.unit_value),
                declared_unit_value,
                sku: l.sku,
                description: l.description,
                quantity: l.quantity,
            }
        }).collect();
        let declared_total = lines.iter().fold(Decimal::ZERO, |acc, l| add_money(acc, l.declared_total));
        Self { lines, declared_total }
    }

    pub fn lines(&self) -> &[DeclaredLine] { &self.lines }
    pub fn declared_total(&self) -> Decimal { self.declared_total }
}
