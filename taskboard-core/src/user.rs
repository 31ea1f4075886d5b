// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// System-wide role of a user, independent of any per-team role.
///
/// `Admin` carries the system-admin override: it bypasses most, but not
/// all, team-scoped capability checks.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum SystemRole {
    Member,
    Manager,
    Admin,
}

impl SystemRole {
    /// System role is Admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, SystemRole::Admin)
    }

    /// System role is Manager.
    pub fn is_manager(&self) -> bool {
        matches!(self, SystemRole::Manager)
    }
}

impl Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SystemRole::Member => "member",
            SystemRole::Manager => "manager",
            SystemRole::Admin => "admin",
        };

        write!(f, "{}", s)
    }
}

/// Lifecycle status of a user account.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Deleted,
}

impl UserStatus {
    /// Only active accounts may perform operations.
    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, UserStatus::Deleted)
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Deleted => "deleted",
        };

        write!(f, "{}", s)
    }
}

/// A registered user.
///
/// At least one user with the `Admin` system role must exist at all
/// times; the user-management layer consults this as a precondition
/// before demoting or deactivating an admin account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub system_role: SystemRole,
    pub status: UserStatus,
}

impl User {
    pub fn new(id: UserId, system_role: SystemRole, status: UserStatus) -> Self {
        Self {
            id,
            system_role,
            status,
        }
    }

    /// The user holds the system-admin override.
    pub fn is_system_admin(&self) -> bool {
        self.system_role.is_admin()
    }

    /// The user's account status permits performing operations.
    pub fn can_act(&self) -> bool {
        self.status.is_active()
    }
}
