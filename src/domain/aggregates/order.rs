//! Order assignment aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::{BackofficeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus { Assigned, InProgress, Completed, Cancelled, Removed }

/// Assignment states that hold an order; auto-assignment must skip any order
/// carrying one of them.
pub const ACTIVE_ASSIGNMENT_STATUSES: [AssignmentStatus; 2] = [AssignmentStatus::Assigned, AssignmentStatus::InProgress];

impl AssignmentStatus {
    pub fn is_active(&self) -> bool { ACTIVE_ASSIGNMENT_STATUSES.contains(self) }
}

pub fn ensure_assignable(order_id: Uuid, existing: &[AssignmentStatus]) -> Result<()> {
    if existing.iter().any(AssignmentStatus::is_active) {
        tracing::debug!(%order_id, "order already holds an active assignment");
        return Err(BackofficeError::AlreadyAssigned { order_id });
    }
    Ok(())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment { pub id: Uuid, pub staff_id: Uuid, pub status: AssignmentStatus, pub assigned_at: DateTime<Utc> }

#[derive(Clone, Debug)]
pub struct OrderAssignments {
    order_id: Uuid,
    assignments: Vec<Assignment>,
}

impl OrderAssignments {
    pub fn new(order_id: Uuid) -> Self { Self { order_id, assignments: vec![] } }
    pub fn with_assignments(order_id: Uuid, assignments: Vec<Assignment>) -> Self { Self { order_id, assignments } }

    pub fn order_id(&self) -> Uuid { self.order_id }
    pub fn assignments(&self) -> &[Assignment] { &self.assignments }
    pub fn statuses(&self) -> Vec<AssignmentStatus> { self.assignments.iter().map(|a| a.status).collect() }
    pub fn active(&self) -> Option<&Assignment> { self.assignments.iter().find(|a| a.status.is_active()) }

    pub fn assign(&mut self, staff_id: Uuid) -> Result<&Assignment> {
        ensure_assignable(self.order_id, &self.statuses())?;
        self.assignments.push(Assignment { id: Uuid::now_v7(), staff_id, status: AssignmentStatus::Assigned, assigned_at: Utc::now() });
        Ok(&self.assignments[self.assignments.len() - 1])
    }

    pub fn start(&mut self) -> Result<()> {
        let a = self.assignments.iter_mut().find(|a| a.status == AssignmentStatus::Assigned).ok_or(BackofficeError::NoActiveAssignment { order_id: self.order_id })?;
        a.status = AssignmentStatus::InProgress;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<()> { self.close(AssignmentStatus::Completed) }
    pub fn release(&mut self) -> Result<()> { self.close(AssignmentStatus::Cancelled) }

    fn close(&mut self, status: AssignmentStatus) -> Result<()> {
        let a = self.assignments.iter_mut().find(|a| a.status.is_active()).ok_or(BackofficeError::NoActiveAssignment { order_id: self.order_id })?;
        a.status = status;
        Ok(())
    }
}

/// Orders eligible for auto-assignment, in candidate order.
pub fn select_assignable<'a>(candidates: impl IntoIterator<Item = &'a OrderAssignments>) -> Vec<Uuid> {
    candidates.into_iter().filter(|o| o.active().is_none()).map(|o| o.order_id).collect()
}
