//! Staff roles and warehouse visibility
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use crate::{BackofficeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role { Admin, Manager, Accountant, Warehouse }

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self { Self::Admin => "admin", Self::Manager => "manager", Self::Accountant => "accountant", Self::Warehouse => "warehouse" };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub role: Role,
    #[serde(default)]
    pub warehouse_ids: Vec<Uuid>,
}

pub fn ensure_role(member: &StaffMember, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&member.role) { return Ok(()); }
    tracing::debug!(staff_id = %member.id, role = %member.role, "role not permitted");
    Err(BackofficeError::Forbidden { role: member.role })
}

/// Warehouses whose shipments, returns and COD rows a staff member may see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarehouseScope {
    All,
    Only(Vec<Uuid>),
}

impl WarehouseScope {
    pub fn for_member(member: &StaffMember) -> Self {
        match member.role {
            Role::Admin | Role::Manager => Self::All,
            Role::Accountant | Role::Warehouse => Self::Only(member.warehouse_ids.clone()),
        }
    }

    pub fn allows(&self, warehouse_id: Uuid) -> bool {
        match self { Self::All => true, Self::Only(ids) => ids.contains(&warehouse_id) }
    }

    /// Keeps rows whose warehouse is in scope. Rows with no warehouse are
    /// visible only to unrestricted members.
    pub fn filter<T>(&self, rows: impl IntoIterator<Item = T>, warehouse_of: impl Fn(&T) -> Option<Uuid>) -> Vec<T> {
        rows.into_iter().filter(|r| match warehouse_of(r) {
            Some(id) => self.allows(id),
            None => matches!(self, Self::All),
        }).collect()
    }
}
