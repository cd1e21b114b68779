//! Back-office domain rules
pub mod access;
pub mod aggregates;
pub mod cod;
pub mod pricing;
pub mod value_objects;
