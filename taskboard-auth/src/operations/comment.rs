// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment gates.
//!
//! Comments carry self-authorship rights: the author may edit and
//! delete their own comment without an elevated role, elevated roles
//! and the system admin may manage anyone's.

use taskboard_core::{AnnotationStatus, Comment, CommentId, TaskId, UserId};
use taskboard_store::{CommentStore, ProjectStore, TaskStore, TeamStore, UserStore};

use crate::capability;
use crate::error::EngineError;
use crate::operations::resolve_active;
use crate::relationship::Relationships;

/// Leave a comment on a task.
pub fn add_comment<S>(
    store: &mut S,
    actor_id: UserId,
    comment_id: CommentId,
    task_id: TaskId,
    body: &str,
) -> Result<Comment, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + CommentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(task) = store.task_not_deleted(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let is_member = relationships.is_active_member(team_id, actor.id)?;
    capability::can_create_task(&actor, is_member).require(actor.id, "comment on the task")?;

    let comment = Comment::new(comment_id, task_id, actor.id, body);
    store.insert_comment(comment.clone())?;

    Ok(comment)
}

/// Edit a comment's body.
pub fn modify_comment<S>(
    store: &mut S,
    actor_id: UserId,
    comment_id: CommentId,
    body: &str,
) -> Result<Comment, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + CommentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut comment) = store.comment_not_deleted(comment_id)? else {
        return Err(EngineError::ResourceNotFound(comment_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_task(comment.task_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    capability::can_manage_annotation(&actor, actor_role, comment.is_authored_by(actor.id))
        .require(actor.id, "modify the comment")?;

    comment.body = body.into();
    store.update_comment(comment.clone())?;

    Ok(comment)
}

/// Soft-delete a comment.
pub fn delete_comment<S>(
    store: &mut S,
    actor_id: UserId,
    comment_id: CommentId,
) -> Result<(), EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + CommentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut comment) = store.comment_not_deleted(comment_id)? else {
        return Err(EngineError::ResourceNotFound(comment_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_task(comment.task_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    capability::can_manage_annotation(&actor, actor_role, comment.is_authored_by(actor.id))
        .require(actor.id, "delete the comment")?;

    comment.status = AnnotationStatus::Deleted;
    store.update_comment(comment)?;

    Ok(())
}

/// Fetch a single comment.
///
/// Deleted comments are visible to system administrators only.
pub fn get_comment<S>(
    store: &S,
    actor_id: UserId,
    comment_id: CommentId,
) -> Result<Comment, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + CommentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(comment) = store.comment_by_id(comment_id)? else {
        return Err(EngineError::ResourceNotFound(comment_id.to_string()));
    };
    if comment.status.is_deleted() && !actor.is_system_admin() {
        return Err(EngineError::ResourceNotFound(comment_id.to_string()));
    }

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_task(comment.task_id)?;
    let is_member = relationships.is_active_member(team_id, actor.id)?;
    capability::can_access_task(&actor, is_member).require(actor.id, "access the comment")?;

    Ok(comment)
}
