#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use serde::{Deserialize, Serialize};

use crate::net::types::Project;

/// A permission the billing UI gates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Usage reports. Granted by the `billing` project role.
    Report,
    /// Invoices. Granted by the `invoice` project role.
    Invoices,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Report, Role::Invoices];

    /// Project role name that grants this permission.
    #[must_use]
    pub fn project_role(self) -> &'static str {
        match self {
            Role::Report => "billing",
            Role::Invoices => "invoice",
        }
    }
}

/// Permissions held by the current user.
///
/// Persisted as JSON; keys missing from a stored value read as `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub report: bool,
    #[serde(default)]
    pub invoices: bool,
}

impl Roles {
    /// A role is held if any project grants it.
    #[must_use]
    pub fn from_projects(projects: &[Project]) -> Self {
        let granted = |role: Role| projects.iter().any(|p| p.has_role(role.project_role()));
        Self { report: granted(Role::Report), invoices: granted(Role::Invoices) }
    }

    #[must_use]
    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Report => self.report,
            Role::Invoices => self.invoices,
        }
    }

    /// True if at least one recognized role is held.
    #[must_use]
    pub fn any(&self) -> bool {
        Role::ALL.into_iter().any(|role| self.has(role))
    }
}
