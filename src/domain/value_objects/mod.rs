//! Value Objects for monetary amounts

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use serde_json::Value;

/// Converts a raw upstream number into a monetary amount.
///
/// Non-finite, zero or negative input yields zero, as does anything outside
/// the range `Decimal` can hold.
pub fn normalize_amount(value: f64) -> Decimal {
    if !value.is_finite() || value <= 0.0 { return Decimal::ZERO; }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Sum of two amounts, zero when it falls outside `Decimal`'s range.
pub fn add_money(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

/// Product of two amounts, zero when it falls outside `Decimal`'s range.
pub fn mul_money(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

/// Rounds to the nearest cent, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// An amount as it arrives from Salla payloads and form input: a bare number,
/// a numeric string, or an object carrying an `amount` field.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum AmountLike {
    Number(f64),
    Text(String),
    Object { amount: Box<AmountLike>, taxable: Option<bool> },
    #[default]
    Empty,
}

impl AmountLike {
    pub fn resolve(&self) -> Decimal {
        match self {
            Self::Number(n) => normalize_amount(*n),
            Self::Text(s) => s.trim().parse::<f64>().map(normalize_amount).unwrap_or(Decimal::ZERO),
            Self::Object { amount, .. } => amount.resolve(),
            Self::Empty => Decimal::ZERO,
        }
    }

    pub fn taxable(&self) -> Option<bool> {
        match self { Self::Object { taxable, .. } => *taxable, _ => None }
    }
}

impl From<Value> for AmountLike {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or_default(),
            Value::String(s) => Self::Text(s),
            Value::Object(mut map) => match map.remove("amount") {
                Some(amount) => Self::Object {
                    amount: Box::new(Self::from(amount)),
                    taxable: map.get("taxable").and_then(Value::as_bool),
                },
                None => Self::Empty,
            },
            _ => Self::Empty,
        }
    }
}

impl From<f64> for AmountLike { fn from(value: f64) -> Self { Self::Number(value) } }
impl From<&str> for AmountLike { fn from(value: &str) -> Self { Self::Text(value.to_string()) } }
