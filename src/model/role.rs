use serde::{Deserialize, Serialize};

/// Closed role set. The role → route/label mapping is a fixed table; adding a
/// role means adding a variant and extending every match below.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Supervisor => "supervisor",
        }
    }

    /// Dashboard route owned by this role.
    pub fn route(&self) -> &'static str {
        match self {
            Role::Employee => "/employee",
            Role::Supervisor => "/supervisor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee Dashboard",
            Role::Supervisor => "Supervisor Dashboard",
        }
    }
}
