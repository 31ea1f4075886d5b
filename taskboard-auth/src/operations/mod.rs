// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service-facing operation gates.
//!
//! Every gate runs the same fixed sequence: resolve the actor, run the
//! active-status gate, look up the touched resources (soft-deleted rows
//! count as missing on mutation paths), evaluate the capability check,
//! validate the lifecycle transition where one is requested, and only
//! then write to the store.
//!
//! Read gates (`get_*`) differ in one point: soft-deleted rows stay
//! visible to system administrators and are reported as not found to
//! everyone else.

use std::fmt::Display;

use taskboard_core::{TransitionTable, User, UserId, validate_transition};
use taskboard_store::UserStore;
use tracing::debug;

use crate::actor::{ActorResolver, StoreActorResolver, require_active};
use crate::error::EngineError;

mod attachment;
mod comment;
mod project;
mod task;
mod team;

pub use attachment::{add_attachment, delete_attachment, get_attachment};
pub use comment::{add_comment, delete_comment, get_comment, modify_comment};
pub use project::{
    create_project, delete_project, restore_project, transfer_project, update_project_status,
};
pub use task::{
    assign_task, create_task, delete_task, get_task, list_all_tasks, list_deleted_tasks,
    update_task, update_task_status,
};
pub use team::{add_team_member, create_team, remove_team_member, update_member_role};

/// Resolve the actor handle and run the active-status gate.
pub(crate) fn resolve_active<S>(store: &S, actor_id: UserId) -> Result<User, EngineError>
where
    S: UserStore,
{
    let actor = StoreActorResolver::new(store).resolve_actor(&actor_id)?;
    require_active(&actor)?;
    Ok(actor)
}

/// Validate a lifecycle change, logging the rejection before it is
/// surfaced.
pub(crate) fn check_transition<S>(
    table: &TransitionTable<S>,
    from: S,
    to: S,
) -> Result<(), EngineError>
where
    S: Copy + Eq + Display,
{
    validate_transition(table, from, to).map_err(|err| {
        debug!(%from, %to, "lifecycle change rejected");
        EngineError::from(err)
    })
}
