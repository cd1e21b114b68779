//! Back-office commercial rules
//!
//! Calculation rules behind a Salla-integrated logistics back office.
//!
//! ## Features
//! - Customs declared value for commercial invoices
//! - Return request fees
//! - Shipping totals with VAT
//! - Cash-on-delivery reconciliation
//! - Order auto-assignment guard and warehouse-scoped visibility

pub mod config;
pub mod domain;
pub mod http;

pub use config::AppConfig;
pub use domain::pricing::{adjust_declared_value, calculate_return_fee, effective_return_fee, shipping_total, ReturnFee};
pub use domain::value_objects::AmountLike;

use domain::access::Role;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum BackofficeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Order {order_id} already has an active assignment")]
    AlreadyAssigned { order_id: Uuid },

    #[error("Order {order_id} has no active assignment")]
    NoActiveAssignment { order_id: Uuid },

    #[error("Role {role} is not permitted")]
    Forbidden { role: Role },
}

pub type Result<T> = std::result::Result<T, BackofficeError>;
