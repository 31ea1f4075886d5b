// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relationship resolution between actors and resources.
//!
//! Every question is answered with a fresh store read; nothing is
//! cached between calls. Capability checks therefore always see the
//! membership state as it is at decision time.

use taskboard_core::{ProjectId, TaskId, TeamId, TeamRole, UserId};
use taskboard_store::{ProjectStore, TaskStore, TeamStore};

use crate::error::EngineError;

/// The actor refers to themself.
pub fn is_self(actor: UserId, subject: UserId) -> bool {
    actor == subject
}

/// Read-only facade over the store traits answering membership and
/// parent-chain questions.
pub struct Relationships<'a, S> {
    store: &'a S,
}

impl<'a, S> Relationships<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S> Relationships<'_, S>
where
    S: TeamStore,
{
    /// The user's role on the team, `None` unless the roster entry
    /// exists and is active.
    pub fn membership_role(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamRole>, EngineError> {
        Ok(self
            .store
            .membership(team_id, user_id)?
            .filter(|member| member.status.is_active())
            .map(|member| member.role))
    }

    /// The user is an active member of the team, in any role.
    pub fn is_active_member(&self, team_id: TeamId, user_id: UserId) -> Result<bool, EngineError> {
        Ok(self.membership_role(team_id, user_id)?.is_some())
    }

    /// The user actively holds one of the given roles on the team.
    pub fn holds_role(
        &self,
        team_id: TeamId,
        user_id: UserId,
        roles: &[TeamRole],
    ) -> Result<bool, EngineError> {
        Ok(self
            .membership_role(team_id, user_id)?
            .is_some_and(|role| roles.contains(&role)))
    }
}

impl<S> Relationships<'_, S>
where
    S: ProjectStore,
{
    /// The team owning the project.
    pub fn team_of_project(&self, project_id: ProjectId) -> Result<TeamId, EngineError> {
        let Some(project) = self.store.project_by_id(project_id)? else {
            return Err(EngineError::ResourceNotFound(project_id.to_string()));
        };

        Ok(project.team_id)
    }
}

impl<S> Relationships<'_, S>
where
    S: ProjectStore + TaskStore,
{
    /// The team owning the task, resolved through its project.
    pub fn team_of_task(&self, task_id: TaskId) -> Result<TeamId, EngineError> {
        let Some(task) = self.store.task_by_id(task_id)? else {
            return Err(EngineError::ResourceNotFound(task_id.to_string()));
        };

        self.team_of_project(task.project_id)
    }
}
