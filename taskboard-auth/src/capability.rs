// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability checks.
//!
//! Each check is a pure function over the actor and the already-resolved
//! relationship facts, returning a [`Decision`]. Checks follow the same
//! admin-first shape: the system-admin override is evaluated before any
//! team-scoped clause, except for the roster-management and
//! project-creation family which deliberately has no override.
//!
//! Two enforcement styles coexist. Soft checks return a `Decision` the
//! caller must act on (`#[must_use]` makes an accidental drop visible in
//! review); the hard [`system_admin_check`] raises [`EngineError`]
//! directly and guards the admin-only surfaces.

use taskboard_core::{TeamRole, User, UserId};
use tracing::debug;

use crate::error::EngineError;

/// Outcome of a soft capability check.
///
/// A denial carries a human-readable reason naming the missing
/// capability.
#[must_use = "a permission decision changes nothing until acted on"]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    Allowed,
    Denied(&'static str),
}

impl Decision {
    /// `Allowed` when the condition holds, `Denied(reason)` otherwise.
    pub fn allowed_when(condition: bool, reason: &'static str) -> Self {
        if condition {
            Decision::Allowed
        } else {
            Decision::Denied(reason)
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// Turn the decision into a gate result, logging every denial with
    /// the actor and the attempted action.
    pub fn require(self, actor: UserId, action: &'static str) -> Result<(), EngineError> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(reason) => {
                debug!(actor = %actor, action, reason, "capability denied");
                Err(EngineError::AccessDenied {
                    actor,
                    action,
                    reason,
                })
            }
        }
    }
}

fn is_elevated(role: Option<TeamRole>) -> bool {
    role.is_some_and(|role| role.manages_resources())
}

/// Soft system-admin predicate.
pub fn system_admin(actor: &User) -> Decision {
    Decision::allowed_when(
        actor.is_system_admin(),
        "actor does not hold the system admin role",
    )
}

/// Hard system-admin gate guarding admin-only surfaces.
///
/// Raises instead of returning a decision so that the admin-only paths
/// cannot forget to enforce the result.
pub fn system_admin_check(actor: &User, action: &'static str) -> Result<(), EngineError> {
    system_admin(actor).require(actor.id, action)
}

/// Read access to a task and its annotations: system admin or any
/// member of the owning team.
pub fn can_access_task(actor: &User, is_team_member: bool) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    Decision::allowed_when(is_team_member, "actor is not a member of the task's team")
}

/// Creating a task (or annotating one) inside a project: system admin
/// or any member of the owning team.
pub fn can_create_task(actor: &User, is_team_member: bool) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    Decision::allowed_when(is_team_member, "actor is not a member of the project's team")
}

/// Modifying a task: system admin, an elevated team role, or the task's
/// current assignee.
pub fn can_modify_task(actor: &User, role: Option<TeamRole>, is_assignee: bool) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    Decision::allowed_when(
        is_elevated(role) || is_assignee,
        "actor is neither an owner or admin of the team nor the task's assignee",
    )
}

/// Deleting a task: system admin or an elevated team role. Assignees
/// hold no delete right over their own tasks.
pub fn can_delete_task(actor: &User, role: Option<TeamRole>) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    Decision::allowed_when(
        is_elevated(role),
        "only team owners and admins may delete tasks",
    )
}

/// Modifying or deleting a comment or attachment: system admin, an
/// elevated team role, or the annotation's author.
pub fn can_manage_annotation(actor: &User, role: Option<TeamRole>, is_author: bool) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    Decision::allowed_when(
        is_elevated(role) || is_author,
        "actor is neither an owner or admin of the team nor the author",
    )
}

/// Assigning a task: system admin, or the assignee is a team member and
/// the actor either holds an elevated role or assigns to themself.
pub fn can_assign_task(
    actor: &User,
    role: Option<TeamRole>,
    assignee_is_member: bool,
    is_self_assignment: bool,
) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    if !assignee_is_member {
        return Decision::Denied("assignee is not an active member of the task's team");
    }

    Decision::allowed_when(
        is_elevated(role) || is_self_assignment,
        "members may only assign tasks to themselves",
    )
}

/// Roster management (adding and removing members, changing roles):
/// the team's owner only. There is no system-admin override on this
/// family.
pub fn can_manage_roster(role: Option<TeamRole>) -> Decision {
    Decision::allowed_when(
        role.is_some_and(|role| role.is_owner()),
        "only the team owner may manage the roster",
    )
}

/// Creating a project under a team: the team's owner only, with no
/// system-admin override.
pub fn can_create_project(role: Option<TeamRole>) -> Decision {
    Decision::allowed_when(
        role.is_some_and(|role| role.is_owner()),
        "only the team owner may create projects",
    )
}

/// Changing a project's lifecycle or deleting it: system admin or an
/// elevated team role.
pub fn can_manage_project(actor: &User, role: Option<TeamRole>) -> Decision {
    if actor.is_system_admin() {
        return Decision::Allowed;
    }

    Decision::allowed_when(
        is_elevated(role),
        "only team owners and admins may manage projects",
    )
}

#[cfg(test)]
mod tests {
    use taskboard_core::{SystemRole, UserStatus};

    use super::*;

    fn user(id: u64, role: SystemRole) -> User {
        User::new(UserId::new(id), role, UserStatus::Active)
    }

    #[test]
    fn admin_override_covers_access_but_not_roster_management() {
        let admin = user(1, SystemRole::Admin);

        // The admin is on no roster at all.
        assert!(can_access_task(&admin, false).is_allowed());
        assert!(can_modify_task(&admin, None, false).is_allowed());
        assert!(can_delete_task(&admin, None).is_allowed());
        assert!(can_assign_task(&admin, None, false, false).is_allowed());

        assert!(!can_manage_roster(None).is_allowed());
        assert!(!can_create_project(None).is_allowed());
    }

    #[test]
    fn plain_members_access_but_do_not_manage() {
        let bob = user(2, SystemRole::Member);
        let role = Some(TeamRole::Member);

        assert!(can_access_task(&bob, true).is_allowed());
        assert!(can_create_task(&bob, true).is_allowed());
        assert!(!can_modify_task(&bob, role, false).is_allowed());
        assert!(!can_delete_task(&bob, role).is_allowed());
        assert!(!can_manage_roster(role).is_allowed());
    }

    #[test]
    fn assignees_modify_their_own_task_without_an_elevated_role() {
        let bob = user(2, SystemRole::Member);

        assert!(can_modify_task(&bob, Some(TeamRole::Member), true).is_allowed());
        // A manager system role grants nothing extra here.
        let carol = user(3, SystemRole::Manager);
        assert!(!can_modify_task(&carol, Some(TeamRole::Member), false).is_allowed());
    }

    #[test]
    fn self_assignment_needs_no_elevated_role() {
        let bob = user(2, SystemRole::Member);
        let role = Some(TeamRole::Member);

        assert!(can_assign_task(&bob, role, true, true).is_allowed());
        assert!(!can_assign_task(&bob, role, true, false).is_allowed());

        // Assignees outside the roster are rejected before the role
        // clause is consulted.
        assert_eq!(
            can_assign_task(&bob, Some(TeamRole::Owner), false, false),
            Decision::Denied("assignee is not an active member of the task's team"),
        );
    }

    #[test]
    fn authors_manage_their_own_annotations() {
        let bob = user(2, SystemRole::Member);
        let role = Some(TeamRole::Member);

        assert!(can_manage_annotation(&bob, role, true).is_allowed());
        assert!(!can_manage_annotation(&bob, role, false).is_allowed());
        assert!(can_manage_annotation(&bob, Some(TeamRole::Admin), false).is_allowed());
    }

    #[test]
    fn hard_gate_raises_access_denied() {
        let manager = user(3, SystemRole::Manager);

        let result = system_admin_check(&manager, "transfer project");
        assert!(matches!(result, Err(EngineError::AccessDenied { .. })));

        let admin = user(1, SystemRole::Admin);
        assert!(system_admin_check(&admin, "transfer project").is_ok());
    }
}
