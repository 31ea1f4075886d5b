// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment gates. Same authorship rules as comments, minus editing:
//! an attachment is replaced, never modified in place.

use taskboard_core::{AnnotationStatus, Attachment, AttachmentId, TaskId, UserId};
use taskboard_store::{AttachmentStore, ProjectStore, TaskStore, TeamStore, UserStore};

use crate::capability;
use crate::error::EngineError;
use crate::operations::resolve_active;
use crate::relationship::Relationships;

/// Attach a file to a task.
pub fn add_attachment<S>(
    store: &mut S,
    actor_id: UserId,
    attachment_id: AttachmentId,
    task_id: TaskId,
    file_name: &str,
) -> Result<Attachment, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + AttachmentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(task) = store.task_not_deleted(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let is_member = relationships.is_active_member(team_id, actor.id)?;
    capability::can_create_task(&actor, is_member).require(actor.id, "attach a file")?;

    let attachment = Attachment::new(attachment_id, task_id, actor.id, file_name);
    store.insert_attachment(attachment.clone())?;

    Ok(attachment)
}

/// Soft-delete an attachment.
pub fn delete_attachment<S>(
    store: &mut S,
    actor_id: UserId,
    attachment_id: AttachmentId,
) -> Result<(), EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + AttachmentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut attachment) = store.attachment_not_deleted(attachment_id)? else {
        return Err(EngineError::ResourceNotFound(attachment_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_task(attachment.task_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    capability::can_manage_annotation(&actor, actor_role, attachment.is_authored_by(actor.id))
        .require(actor.id, "delete the attachment")?;

    attachment.status = AnnotationStatus::Deleted;
    store.update_attachment(attachment)?;

    Ok(())
}

/// Fetch a single attachment.
///
/// Deleted attachments are visible to system administrators only.
pub fn get_attachment<S>(
    store: &S,
    actor_id: UserId,
    attachment_id: AttachmentId,
) -> Result<Attachment, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore + AttachmentStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(attachment) = store.attachment_by_id(attachment_id)? else {
        return Err(EngineError::ResourceNotFound(attachment_id.to_string()));
    };
    if attachment.status.is_deleted() && !actor.is_system_admin() {
        return Err(EngineError::ResourceNotFound(attachment_id.to_string()));
    }

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_task(attachment.task_id)?;
    let is_member = relationships.is_active_member(team_id, actor.id)?;
    capability::can_access_task(&actor, is_member).require(actor.id, "access the attachment")?;

    Ok(attachment)
}
