// SPDX-License-Identifier: MIT OR Apache-2.0

//! Team and roster gates.
//!
//! The roster-management family is the one place without a system-admin
//! override: only the team's owner may change who is on the team and in
//! which role.

use taskboard_core::{
    MembershipStatus, TEAM_ROLE_TRANSITIONS, Team, TeamId, TeamMember, TeamRole, UserId,
};
use taskboard_store::{TeamStore, UserStore};

use crate::capability;
use crate::error::EngineError;
use crate::operations::{check_transition, resolve_active};
use crate::relationship::{Relationships, is_self};

/// Create a team owned by the actor.
///
/// Any active user may found a team; they become its single `Owner`
/// both on the team row and on the roster.
pub fn create_team<S>(
    store: &mut S,
    actor_id: UserId,
    team_id: TeamId,
    name: &str,
) -> Result<Team, EngineError>
where
    S: UserStore + TeamStore,
{
    let actor = resolve_active(store, actor_id)?;

    let team = Team::new(team_id, actor.id, name);
    store.insert_team(team.clone())?;
    store.insert_membership(TeamMember::new(team_id, actor.id, TeamRole::Owner))?;

    Ok(team)
}

/// Add a user to the team's roster.
pub fn add_team_member<S>(
    store: &mut S,
    actor_id: UserId,
    team_id: TeamId,
    user_id: UserId,
    role: TeamRole,
) -> Result<TeamMember, EngineError>
where
    S: UserStore + TeamStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(team) = store.active_team_by_id(team_id)? else {
        return Err(EngineError::ResourceNotFound(team_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let actor_role = relationships.membership_role(team.id, actor.id)?;
    capability::can_manage_roster(actor_role).require(actor.id, "add a team member")?;

    let Some(user) = store.user_by_id(user_id)? else {
        return Err(EngineError::ResourceNotFound(user_id.to_string()));
    };
    if !user.can_act() {
        return Err(EngineError::InvariantViolation(format!(
            "{user_id} is not active and cannot join a roster"
        )));
    }

    if role.is_owner() {
        return Err(EngineError::InvariantViolation(format!(
            "{team_id} already has an owner, a second one cannot be added"
        )));
    }

    let member = TeamMember::new(team_id, user_id, role);
    store.insert_membership(member.clone())?;

    Ok(member)
}

/// Remove a member from the team's roster.
///
/// The roster entry is kept and flipped to `Removed`, so the unique
/// `(team, user)` pair stays on record.
pub fn remove_team_member<S>(
    store: &mut S,
    actor_id: UserId,
    team_id: TeamId,
    user_id: UserId,
) -> Result<(), EngineError>
where
    S: UserStore + TeamStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(team) = store.active_team_by_id(team_id)? else {
        return Err(EngineError::ResourceNotFound(team_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let actor_role = relationships.membership_role(team.id, actor.id)?;
    capability::can_manage_roster(actor_role).require(actor.id, "remove a team member")?;

    let Some(mut member) = store
        .membership(team_id, user_id)?
        .filter(|member| member.status.is_active())
    else {
        return Err(EngineError::ResourceNotFound(format!(
            "{user_id} on {team_id}"
        )));
    };

    // The single owner is always the actor here; removal would orphan
    // the team.
    if member.role.is_owner() {
        return Err(EngineError::InvariantViolation(format!(
            "the owner of {team_id} cannot be removed from its roster"
        )));
    }

    member.status = MembershipStatus::Removed;
    store.update_membership(member)?;

    Ok(())
}

/// Change a member's role on the team.
///
/// The requested role is validated against the role-change table first,
/// so asking for the current role reports an invalid transition. The
/// roster invariants come after: the last owner cannot be demoted,
/// owners cannot change their own role, and promotion to `Owner` is not
/// available here.
pub fn update_member_role<S>(
    store: &mut S,
    actor_id: UserId,
    team_id: TeamId,
    user_id: UserId,
    new_role: TeamRole,
) -> Result<TeamMember, EngineError>
where
    S: UserStore + TeamStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(team) = store.active_team_by_id(team_id)? else {
        return Err(EngineError::ResourceNotFound(team_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let actor_role = relationships.membership_role(team.id, actor.id)?;
    capability::can_manage_roster(actor_role).require(actor.id, "change a member's role")?;

    let Some(mut member) = store
        .membership(team_id, user_id)?
        .filter(|member| member.status.is_active())
    else {
        return Err(EngineError::ResourceNotFound(format!(
            "{user_id} on {team_id}"
        )));
    };

    check_transition(&TEAM_ROLE_TRANSITIONS, member.role, new_role)?;

    if member.role.is_owner() && store.active_owner_count(team_id)? <= 1 {
        return Err(EngineError::InvariantViolation(format!(
            "the last owner of {team_id} cannot be demoted"
        )));
    }

    if is_self(actor.id, user_id) {
        return Err(EngineError::InvariantViolation(
            "owners may not change their own role".into(),
        ));
    }

    if new_role.is_owner() {
        return Err(EngineError::InvariantViolation(format!(
            "{team_id} already has an owner, ownership does not change through role updates"
        )));
    }

    member.role = new_role;
    store.update_membership(member.clone())?;

    Ok(member)
}

#[cfg(test)]
mod tests {
    use taskboard_core::{SystemRole, UserStatus};
    use taskboard_store::StoreError;

    use super::*;
    use crate::test_utils::TeamFixture;

    #[test]
    fn founding_a_team_makes_the_actor_its_owner() {
        let mut fx = TeamFixture::new();

        let team = create_team(&mut fx.store, fx.member, TeamId::new(9), "side project").unwrap();
        assert_eq!(team.owner_id, fx.member);

        let roster = store_role(&fx, team.id, fx.member);
        assert_eq!(roster, Some(TeamRole::Owner));
    }

    #[test]
    fn only_the_owner_manages_the_roster() {
        let mut fx = TeamFixture::new();
        let dave = fx.seed_user(60, SystemRole::Member, UserStatus::Active);

        // Neither a roster admin nor a system admin may add members.
        for actor in [fx.maintainer, fx.admin] {
            assert!(matches!(
                add_team_member(&mut fx.store, actor, fx.team, dave, TeamRole::Member),
                Err(EngineError::AccessDenied { .. })
            ));
        }

        let member = add_team_member(&mut fx.store, fx.owner, fx.team, dave, TeamRole::Member);
        assert!(member.is_ok());
    }

    #[test]
    fn inactive_users_cannot_join_a_roster() {
        let mut fx = TeamFixture::new();
        let dave = fx.seed_user(60, SystemRole::Member, UserStatus::Suspended);

        assert!(matches!(
            add_team_member(&mut fx.store, fx.owner, fx.team, dave, TeamRole::Member),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn the_roster_pair_stays_unique() {
        let mut fx = TeamFixture::new();

        assert!(matches!(
            add_team_member(&mut fx.store, fx.owner, fx.team, fx.member, TeamRole::Admin),
            Err(EngineError::Store(StoreError::MembershipExists { .. }))
        ));
    }

    #[test]
    fn a_second_owner_cannot_be_added() {
        let mut fx = TeamFixture::new();
        let dave = fx.seed_user(60, SystemRole::Member, UserStatus::Active);

        assert!(matches!(
            add_team_member(&mut fx.store, fx.owner, fx.team, dave, TeamRole::Owner),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn removal_flips_the_entry_instead_of_dropping_it() {
        let mut fx = TeamFixture::new();

        remove_team_member(&mut fx.store, fx.owner, fx.team, fx.member).unwrap();

        let entry = fx.store.membership(fx.team, fx.member).unwrap().unwrap();
        assert_eq!(entry.status, MembershipStatus::Removed);

        // A removed member no longer shows up as removable.
        assert!(matches!(
            remove_team_member(&mut fx.store, fx.owner, fx.team, fx.member),
            Err(EngineError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn the_owner_cannot_leave_their_own_roster() {
        let mut fx = TeamFixture::new();

        assert!(matches!(
            remove_team_member(&mut fx.store, fx.owner, fx.team, fx.owner),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn same_role_requests_report_an_invalid_transition() {
        let mut fx = TeamFixture::new();

        let result = update_member_role(&mut fx.store, fx.owner, fx.team, fx.member, TeamRole::Member);
        assert!(matches!(result, Err(EngineError::InvalidTransition(_))));
    }

    #[test]
    fn the_last_owner_demoting_themself_breaks_no_invariant_silently() {
        let mut fx = TeamFixture::new();

        let result =
            update_member_role(&mut fx.store, fx.owner, fx.team, fx.owner, TeamRole::Member);
        assert!(matches!(result, Err(EngineError::InvariantViolation(_))));

        // No write happened.
        let entry = fx.store.membership(fx.team, fx.owner).unwrap().unwrap();
        assert_eq!(entry.role, TeamRole::Owner);
    }

    #[test]
    fn promotion_between_member_and_admin_is_the_owners_call() {
        let mut fx = TeamFixture::new();

        let promoted =
            update_member_role(&mut fx.store, fx.owner, fx.team, fx.member, TeamRole::Admin)
                .unwrap();
        assert_eq!(promoted.role, TeamRole::Admin);

        // Promotion to owner is not available through this gate.
        assert!(matches!(
            update_member_role(&mut fx.store, fx.owner, fx.team, fx.member, TeamRole::Owner),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    fn store_role(fx: &TeamFixture, team: TeamId, user: UserId) -> Option<TeamRole> {
        fx.store
            .membership(team, user)
            .unwrap()
            .filter(|member| member.status.is_active())
            .map(|member| member.role)
    }
}
