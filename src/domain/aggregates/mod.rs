//! Aggregates module
pub mod order;

pub use order::{ensure_assignable, select_assignable, Assignment, AssignmentStatus, OrderAssignments, ACTIVE_ASSIGNMENT_STATUSES};
