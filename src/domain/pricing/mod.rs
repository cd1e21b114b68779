//! Pricing rules: customs declared value, return fees, shipping VAT
pub mod declared_value;
pub mod return_fee;
pub mod shipping;

pub use declared_value::{adjust_declared_value, CommercialInvoice, InvoiceLine, DeclaredLine, DEDUCTION_RATE};
pub use return_fee::{calculate_return_fee, effective_return_fee, ReturnFee};
pub use shipping::{shipping_breakdown, shipping_total, ShippingBreakdown, VAT_RATE};
