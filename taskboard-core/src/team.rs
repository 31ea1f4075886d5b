// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::identity::{TeamId, UserId};

/// Lifecycle status of a team.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TeamStatus {
    Active,
    Inactive,
    Deleted,
}

impl TeamStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TeamStatus::Active)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, TeamStatus::Deleted)
    }
}

impl Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TeamStatus::Active => "active",
            TeamStatus::Inactive => "inactive",
            TeamStatus::Deleted => "deleted",
        };

        write!(f, "{}", s)
    }
}

/// A team which owns projects and carries a roster of members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub owner_id: UserId,
    pub name: String,
    pub status: TeamStatus,
}

impl Team {
    pub fn new(id: TeamId, owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            status: TeamStatus::Active,
        }
    }
}

/// The three per-team roles. Greater roles are assumed to also contain
/// all lower ones.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum TeamRole {
    Member,
    Admin,
    Owner,
}

impl TeamRole {
    /// Role is Owner.
    pub fn is_owner(&self) -> bool {
        matches!(self, TeamRole::Owner)
    }

    /// Role may manage resources (tasks, comments, attachments) owned by
    /// the team.
    pub fn manages_resources(&self) -> bool {
        matches!(self, TeamRole::Owner | TeamRole::Admin)
    }
}

impl Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TeamRole::Member => "member",
            TeamRole::Admin => "admin",
            TeamRole::Owner => "owner",
        };

        write!(f, "{}", s)
    }
}

/// Status of a roster entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MembershipStatus {
    Active,
    Removed,
    Inactive,
}

impl MembershipStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }
}

/// A roster entry binding a user to a team with a per-team role.
///
/// The `(team_id, user_id)` pair is unique; every active team has exactly
/// one `Owner` among its active members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: TeamId,
    pub user_id: UserId,
    pub role: TeamRole,
    pub status: MembershipStatus,
}

impl TeamMember {
    pub fn new(team_id: TeamId, user_id: UserId, role: TeamRole) -> Self {
        Self {
            team_id,
            user_id,
            role,
            status: MembershipStatus::Active,
        }
    }
}
