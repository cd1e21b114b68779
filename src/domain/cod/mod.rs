//! Cash-on-delivery collection reconciliation
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use crate::domain::value_objects::{add_money, normalize_amount, round_money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodStatus { Matched, Short, Over }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodReconciliation {
    pub expected: Decimal,
    pub collected: Decimal,
    /// `collected - expected`; negative when the courier came up short.
    pub difference: Decimal,
    pub status: CodStatus,
}

pub fn reconcile_cod(expected: f64, collected: f64) -> CodReconciliation {
    let expected = round_money(normalize_amount(expected));
    let collected = round_money(normalize_amount(collected));
    let status = match collected.cmp(&expected) {
        Ordering::Equal => CodStatus::Matched,
        Ordering::Less => CodStatus::Short,
        Ordering::Greater => CodStatus::Over,
    };
    CodReconciliation { expected, collected, difference: collected - expected, status }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodSummary {
    pub expected_total: Decimal,
    pub collected_total: Decimal,
    pub difference: Decimal,
    pub matched: usize,
    pub short: usize,
    pub over: usize,
}

pub fn summarize_cod<'a>(items: impl IntoIterator<Item = &'a CodReconciliation>) -> CodSummary {
    let mut s = CodSummary::default();
    for r in items {
        s.expected_total = add_money(s.expected_total, r.expected);
        s.collected_total = add_money(s.collected_total, r.collected);
        match r.status { CodStatus::Matched => s.matched += 1, CodStatus::Short => s.short += 1, CodStatus::Over => s.over += 1 }
    }
    s.difference = s.collected_total - s.expected_total;
    s
}
