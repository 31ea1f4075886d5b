// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project gates.
//!
//! Project creation is reserved to the owning team's `Owner`. Lifecycle
//! changes go through the project transition table; soft deletion and
//! the two admin-only surfaces (restore, transfer) bypass it through
//! their dedicated gates.

use taskboard_core::{PROJECT_TRANSITIONS, Project, ProjectId, ProjectStatus, TeamId, UserId};
use taskboard_store::{ProjectStore, TeamStore, UserStore};

use crate::capability;
use crate::error::EngineError;
use crate::operations::{check_transition, resolve_active};
use crate::relationship::Relationships;

/// Create a project under a team.
pub fn create_project<S>(
    store: &mut S,
    actor_id: UserId,
    project_id: ProjectId,
    team_id: TeamId,
    name: &str,
    start_date: u64,
    end_date: u64,
) -> Result<Project, EngineError>
where
    S: UserStore + TeamStore + ProjectStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(team) = store.active_team_by_id(team_id)? else {
        return Err(EngineError::ResourceNotFound(team_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let actor_role = relationships.membership_role(team.id, actor.id)?;
    capability::can_create_project(actor_role).require(actor.id, "create a project")?;

    let project = Project::new(project_id, team_id, name, start_date, end_date)?;
    store.insert_project(project.clone())?;

    Ok(project)
}

/// Move a project to another lifecycle status.
pub fn update_project_status<S>(
    store: &mut S,
    actor_id: UserId,
    project_id: ProjectId,
    to: ProjectStatus,
) -> Result<Project, EngineError>
where
    S: UserStore + TeamStore + ProjectStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut project) = store.project_not_deleted(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let actor_role = relationships.membership_role(project.team_id, actor.id)?;
    capability::can_manage_project(&actor, actor_role).require(actor.id, "update the project")?;

    check_transition(&PROJECT_TRANSITIONS, project.status, to)?;

    project.status = to;
    store.update_project(project.clone())?;

    Ok(project)
}

/// Soft-delete a project. This is the only path into the terminal
/// status.
pub fn delete_project<S>(
    store: &mut S,
    actor_id: UserId,
    project_id: ProjectId,
) -> Result<(), EngineError>
where
    S: UserStore + TeamStore + ProjectStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut project) = store.project_not_deleted(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let actor_role = relationships.membership_role(project.team_id, actor.id)?;
    capability::can_manage_project(&actor, actor_role).require(actor.id, "delete the project")?;

    project.status = ProjectStatus::Deleted;
    store.update_project(project)?;

    Ok(())
}

/// Return a deleted project to a live status.
///
/// Admin-only and outside the generic transition table; the target may
/// be any non-terminal status.
pub fn restore_project<S>(
    store: &mut S,
    actor_id: UserId,
    project_id: ProjectId,
    to: ProjectStatus,
) -> Result<Project, EngineError>
where
    S: UserStore + ProjectStore,
{
    let actor = resolve_active(store, actor_id)?;
    capability::system_admin_check(&actor, "restore a project")?;

    let Some(mut project) = store.project_by_id(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    if !project.status.is_deleted() {
        return Err(EngineError::InvalidTransition(format!(
            "{project_id} is not deleted, restore does not apply"
        )));
    }

    if to.is_deleted() {
        return Err(EngineError::InvalidTransition(
            "a project cannot be restored to deleted".into(),
        ));
    }

    project.status = to;
    store.update_project(project.clone())?;

    Ok(project)
}

/// Move a project to another team. Admin-only.
pub fn transfer_project<S>(
    store: &mut S,
    actor_id: UserId,
    project_id: ProjectId,
    to_team: TeamId,
) -> Result<Project, EngineError>
where
    S: UserStore + TeamStore + ProjectStore,
{
    let actor = resolve_active(store, actor_id)?;
    capability::system_admin_check(&actor, "transfer a project")?;

    let Some(mut project) = store.project_not_deleted(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    let Some(team) = store.active_team_by_id(to_team)? else {
        return Err(EngineError::ResourceNotFound(to_team.to_string()));
    };

    project.team_id = team.id;
    store.update_project(project.clone())?;

    Ok(project)
}
