// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read- and write-traits for every entity family.

use taskboard_core::{
    Attachment, AttachmentId, Comment, CommentId, Project, ProjectId, Task, TaskId, Team,
    TeamId, TeamMember, User, UserId,
};
use thiserror::Error;

/// Failures surfaced by store backends.
///
/// Relational backstops live here; everything else in the stack treats
/// the store as infallible lookup.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("task title {title:?} is already used in {project}")]
    TitleTaken { project: ProjectId, title: String },

    #[error("{user} is already on the roster of {team}")]
    MembershipExists { user: UserId, team: TeamId },

    #[error("{0} has no stored row to update")]
    RowNotFound(String),
}

/// Persistence of user accounts and their system-wide roles.
pub trait UserStore {
    fn user_by_id(&self, user_id: UserId) -> Result<Option<User>, StoreError>;

    /// Number of active users holding the system administrator role.
    ///
    /// Deployments are provisioned with at least one administrator, so
    /// every admin-gated operation has a possible caller.
    fn system_admin_count(&self) -> Result<usize, StoreError>;

    fn insert_user(&mut self, user: User) -> Result<(), StoreError>;

    fn update_user(&mut self, user: User) -> Result<(), StoreError>;
}

/// Persistence of teams and their member rosters.
pub trait TeamStore {
    fn team_by_id(&self, team_id: TeamId) -> Result<Option<Team>, StoreError>;

    /// The team in `Active` status, `None` when missing, inactive or
    /// deleted.
    fn active_team_by_id(&self, team_id: TeamId) -> Result<Option<Team>, StoreError> {
        Ok(self.team_by_id(team_id)?.filter(|team| team.status.is_active()))
    }

    /// The roster entry binding `user_id` to `team_id`, regardless of
    /// its membership status.
    fn membership(&self, team_id: TeamId, user_id: UserId)
    -> Result<Option<TeamMember>, StoreError>;

    /// All roster entries for `team_id` in `Active` membership status,
    /// ordered by user id.
    fn active_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, StoreError>;

    /// Number of active members holding the `Owner` role on `team_id`.
    fn active_owner_count(&self, team_id: TeamId) -> Result<usize, StoreError>;

    fn insert_team(&mut self, team: Team) -> Result<(), StoreError>;

    fn update_team(&mut self, team: Team) -> Result<(), StoreError>;

    /// Insert a roster entry. Fails when the `(team, user)` pair already
    /// has a row, whatever its status.
    fn insert_membership(&mut self, member: TeamMember) -> Result<(), StoreError>;

    fn update_membership(&mut self, member: TeamMember) -> Result<(), StoreError>;
}

/// Persistence of projects.
pub trait ProjectStore {
    fn project_by_id(&self, project_id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// The project unless it has been soft-deleted.
    fn project_not_deleted(&self, project_id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self
            .project_by_id(project_id)?
            .filter(|project| !project.status.is_deleted()))
    }

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError>;

    fn update_project(&mut self, project: Project) -> Result<(), StoreError>;
}

/// Persistence of tasks.
pub trait TaskStore {
    fn task_by_id(&self, task_id: TaskId) -> Result<Option<Task>, StoreError>;

    /// The task unless it has been soft-deleted.
    fn task_not_deleted(&self, task_id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self
            .task_by_id(task_id)?
            .filter(|task| !task.status.is_deleted()))
    }

    /// A non-deleted task in `project_id` already uses `title`,
    /// compared case-insensitively.
    fn task_title_exists(&self, project_id: ProjectId, title: &str) -> Result<bool, StoreError>;

    /// All non-deleted tasks in `project_id`, ordered by task id.
    fn tasks_by_project(&self, project_id: ProjectId) -> Result<Vec<Task>, StoreError>;

    /// All soft-deleted tasks in `project_id`, ordered by task id.
    fn deleted_tasks(&self, project_id: ProjectId) -> Result<Vec<Task>, StoreError>;

    /// Insert a task. Fails when its title is already taken in the
    /// project.
    fn insert_task(&mut self, task: Task) -> Result<(), StoreError>;

    fn update_task(&mut self, task: Task) -> Result<(), StoreError>;
}

/// Persistence of comments.
pub trait CommentStore {
    fn comment_by_id(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// The comment unless it has been soft-deleted.
    fn comment_not_deleted(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self
            .comment_by_id(comment_id)?
            .filter(|comment| comment.status.is_active()))
    }

    /// All comments on `task_id`, deleted ones included, ordered by
    /// comment id.
    fn comments_by_task(&self, task_id: TaskId) -> Result<Vec<Comment>, StoreError>;

    fn insert_comment(&mut self, comment: Comment) -> Result<(), StoreError>;

    fn update_comment(&mut self, comment: Comment) -> Result<(), StoreError>;
}

/// Persistence of attachments.
pub trait AttachmentStore {
    fn attachment_by_id(
        &self,
        attachment_id: AttachmentId,
    ) -> Result<Option<Attachment>, StoreError>;

    /// The attachment unless it has been soft-deleted.
    fn attachment_not_deleted(
        &self,
        attachment_id: AttachmentId,
    ) -> Result<Option<Attachment>, StoreError> {
        Ok(self
            .attachment_by_id(attachment_id)?
            .filter(|attachment| attachment.status.is_active()))
    }

    /// All attachments on `task_id`, deleted ones included, ordered by
    /// attachment id.
    fn attachments_by_task(&self, task_id: TaskId) -> Result<Vec<Attachment>, StoreError>;

    fn insert_attachment(&mut self, attachment: Attachment) -> Result<(), StoreError>;

    fn update_attachment(&mut self, attachment: Attachment) -> Result<(), StoreError>;
}
