// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for taskboard entities.
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use taskboard_core::{
    Attachment, AttachmentId, Comment, CommentId, Project, ProjectId, Task, TaskId, Team,
    TeamId, TeamMember, User, UserId,
};

use crate::{
    AttachmentStore, CommentStore, ProjectStore, StoreError, TaskStore, TeamStore, UserStore,
};

/// An in-memory store holding one table per entity family.
#[derive(Clone, Debug, Default)]
pub struct InnerMemoryStore {
    users: BTreeMap<UserId, User>,
    teams: BTreeMap<TeamId, Team>,
    memberships: BTreeMap<(TeamId, UserId), TeamMember>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    comments: BTreeMap<CommentId, Comment>,
    attachments: BTreeMap<AttachmentId, Attachment>,
}

/// An in-memory store for every taskboard entity family.
///
/// `MemoryStore` supports usage in multi-threaded contexts by wrapping an
/// `InnerMemoryStore` with an `RwLock` and `Arc`. Convenience methods are
/// provided to obtain a read- or write-lock on the underlying store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<InnerMemoryStore>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain a read-lock on the store.
    pub fn read_store(&self) -> RwLockReadGuard<'_, InnerMemoryStore> {
        self.inner
            .read()
            .expect("acquire shared read access on store")
    }

    /// Obtain a write-lock on the store.
    pub fn write_store(&self) -> RwLockWriteGuard<'_, InnerMemoryStore> {
        self.inner
            .write()
            .expect("acquire exclusive write access on store")
    }
}

impl UserStore for MemoryStore {
    fn user_by_id(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read_store().users.get(&user_id).cloned())
    }

    fn system_admin_count(&self) -> Result<usize, StoreError> {
        let count = self
            .read_store()
            .users
            .values()
            .filter(|user| user.status.is_active() && user.system_role.is_admin())
            .count();
        Ok(count)
    }

    fn insert_user(&mut self, user: User) -> Result<(), StoreError> {
        self.write_store().users.insert(user.id, user);
        Ok(())
    }

    fn update_user(&mut self, user: User) -> Result<(), StoreError> {
        let mut store = self.write_store();
        if !store.users.contains_key(&user.id) {
            return Err(StoreError::RowNotFound(user.id.to_string()));
        }

        store.users.insert(user.id, user);
        Ok(())
    }
}

impl TeamStore for MemoryStore {
    fn team_by_id(&self, team_id: TeamId) -> Result<Option<Team>, StoreError> {
        Ok(self.read_store().teams.get(&team_id).cloned())
    }

    fn membership(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamMember>, StoreError> {
        Ok(self
            .read_store()
            .memberships
            .get(&(team_id, user_id))
            .cloned())
    }

    fn active_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, StoreError> {
        let members = self
            .read_store()
            .memberships
            .range((team_id, UserId::new(u64::MIN))..=(team_id, UserId::new(u64::MAX)))
            .map(|(_, member)| member)
            .filter(|member| member.status.is_active())
            .cloned()
            .collect();
        Ok(members)
    }

    fn active_owner_count(&self, team_id: TeamId) -> Result<usize, StoreError> {
        let count = self
            .active_members(team_id)?
            .iter()
            .filter(|member| member.role.is_owner())
            .count();
        Ok(count)
    }

    fn insert_team(&mut self, team: Team) -> Result<(), StoreError> {
        self.write_store().teams.insert(team.id, team);
        Ok(())
    }

    fn update_team(&mut self, team: Team) -> Result<(), StoreError> {
        let mut store = self.write_store();
        if !store.teams.contains_key(&team.id) {
            return Err(StoreError::RowNotFound(team.id.to_string()));
        }

        store.teams.insert(team.id, team);
        Ok(())
    }

    fn insert_membership(&mut self, member: TeamMember) -> Result<(), StoreError> {
        let mut store = self.write_store();
        let key = (member.team_id, member.user_id);

        // The roster pair is unique whatever the row's status; removed
        // members are re-activated through an update.
        if store.memberships.contains_key(&key) {
            return Err(StoreError::MembershipExists {
                user: member.user_id,
                team: member.team_id,
            });
        }

        store.memberships.insert(key, member);
        Ok(())
    }

    fn update_membership(&mut self, member: TeamMember) -> Result<(), StoreError> {
        let mut store = self.write_store();
        let key = (member.team_id, member.user_id);
        if !store.memberships.contains_key(&key) {
            return Err(StoreError::RowNotFound(format!(
                "{} on {}",
                member.user_id, member.team_id
            )));
        }

        store.memberships.insert(key, member);
        Ok(())
    }
}

impl ProjectStore for MemoryStore {
    fn project_by_id(&self, project_id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.read_store().projects.get(&project_id).cloned())
    }

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        self.write_store().projects.insert(project.id, project);
        Ok(())
    }

    fn update_project(&mut self, project: Project) -> Result<(), StoreError> {
        let mut store = self.write_store();
        if !store.projects.contains_key(&project.id) {
            return Err(StoreError::RowNotFound(project.id.to_string()));
        }

        store.projects.insert(project.id, project);
        Ok(())
    }
}

impl TaskStore for MemoryStore {
    fn task_by_id(&self, task_id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.read_store().tasks.get(&task_id).cloned())
    }

    fn task_title_exists(&self, project_id: ProjectId, title: &str) -> Result<bool, StoreError> {
        let needle = title.to_lowercase();
        let exists = self
            .read_store()
            .tasks
            .values()
            .filter(|task| task.project_id == project_id && !task.status.is_deleted())
            .any(|task| task.title.to_lowercase() == needle);
        Ok(exists)
    }

    fn tasks_by_project(&self, project_id: ProjectId) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .read_store()
            .tasks
            .values()
            .filter(|task| task.project_id == project_id && !task.status.is_deleted())
            .cloned()
            .collect();
        Ok(tasks)
    }

    fn deleted_tasks(&self, project_id: ProjectId) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .read_store()
            .tasks
            .values()
            .filter(|task| task.project_id == project_id && task.status.is_deleted())
            .cloned()
            .collect();
        Ok(tasks)
    }

    fn insert_task(&mut self, task: Task) -> Result<(), StoreError> {
        // Backstop behind the engine's own uniqueness check.
        if self.task_title_exists(task.project_id, &task.title)? {
            return Err(StoreError::TitleTaken {
                project: task.project_id,
                title: task.title,
            });
        }

        self.write_store().tasks.insert(task.id, task);
        Ok(())
    }

    fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
        let mut store = self.write_store();
        if !store.tasks.contains_key(&task.id) {
            return Err(StoreError::RowNotFound(task.id.to_string()));
        }

        store.tasks.insert(task.id, task);
        Ok(())
    }
}

impl CommentStore for MemoryStore {
    fn comment_by_id(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self.read_store().comments.get(&comment_id).cloned())
    }

    fn comments_by_task(&self, task_id: TaskId) -> Result<Vec<Comment>, StoreError> {
        let comments = self
            .read_store()
            .comments
            .values()
            .filter(|comment| comment.task_id == task_id)
            .cloned()
            .collect();
        Ok(comments)
    }

    fn insert_comment(&mut self, comment: Comment) -> Result<(), StoreError> {
        self.write_store().comments.insert(comment.id, comment);
        Ok(())
    }

    fn update_comment(&mut self, comment: Comment) -> Result<(), StoreError> {
        let mut store = self.write_store();
        if !store.comments.contains_key(&comment.id) {
            return Err(StoreError::RowNotFound(comment.id.to_string()));
        }

        store.comments.insert(comment.id, comment);
        Ok(())
    }
}

impl AttachmentStore for MemoryStore {
    fn attachment_by_id(
        &self,
        attachment_id: AttachmentId,
    ) -> Result<Option<Attachment>, StoreError> {
        Ok(self.read_store().attachments.get(&attachment_id).cloned())
    }

    fn attachments_by_task(&self, task_id: TaskId) -> Result<Vec<Attachment>, StoreError> {
        let attachments = self
            .read_store()
            .attachments
            .values()
            .filter(|attachment| attachment.task_id == task_id)
            .cloned()
            .collect();
        Ok(attachments)
    }

    fn insert_attachment(&mut self, attachment: Attachment) -> Result<(), StoreError> {
        self.write_store()
            .attachments
            .insert(attachment.id, attachment);
        Ok(())
    }

    fn update_attachment(&mut self, attachment: Attachment) -> Result<(), StoreError> {
        let mut store = self.write_store();
        if !store.attachments.contains_key(&attachment.id) {
            return Err(StoreError::RowNotFound(attachment.id.to_string()));
        }

        store.attachments.insert(attachment.id, attachment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use taskboard_core::{SystemRole, TaskStatus, TeamRole, UserStatus};

    use super::*;

    #[test]
    fn lookups_return_none_for_unknown_rows() {
        let store = MemoryStore::new();
        assert_eq!(store.user_by_id(UserId::new(1)), Ok(None));
        assert_eq!(store.task_by_id(TaskId::new(1)), Ok(None));
        assert_eq!(store.membership(TeamId::new(1), UserId::new(1)), Ok(None));
    }

    #[test]
    fn updates_require_an_existing_row() {
        let mut store = MemoryStore::new();
        let task = Task::new(TaskId::new(1), ProjectId::new(1), "write docs");

        assert!(matches!(
            store.update_task(task.clone()),
            Err(StoreError::RowNotFound(_))
        ));

        store.insert_task(task.clone()).unwrap();
        assert!(store.update_task(task).is_ok());
    }

    #[test]
    fn task_titles_are_unique_per_project_case_insensitively() {
        let mut store = MemoryStore::new();
        let project = ProjectId::new(1);

        store
            .insert_task(Task::new(TaskId::new(1), project, "Write docs"))
            .unwrap();

        assert_eq!(store.task_title_exists(project, "write DOCS"), Ok(true));
        assert!(matches!(
            store.insert_task(Task::new(TaskId::new(2), project, "WRITE DOCS")),
            Err(StoreError::TitleTaken { .. })
        ));

        // The same title is fine in a different project.
        assert!(
            store
                .insert_task(Task::new(TaskId::new(3), ProjectId::new(2), "write docs"))
                .is_ok()
        );
    }

    #[test]
    fn deleted_tasks_free_their_title_and_leave_the_live_listing() {
        let mut store = MemoryStore::new();
        let project = ProjectId::new(1);

        let mut task = Task::new(TaskId::new(1), project, "write docs");
        store.insert_task(task.clone()).unwrap();

        task.status = TaskStatus::Deleted;
        store.update_task(task).unwrap();

        assert_eq!(store.task_title_exists(project, "write docs"), Ok(false));
        assert!(store.tasks_by_project(project).unwrap().is_empty());

        let deleted = store.deleted_tasks(project).unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].id, TaskId::new(1));
    }

    #[test]
    fn roster_pairs_are_unique() {
        let mut store = MemoryStore::new();
        let member = TeamMember::new(TeamId::new(1), UserId::new(2), TeamRole::Member);

        store.insert_membership(member.clone()).unwrap();
        assert!(matches!(
            store.insert_membership(member),
            Err(StoreError::MembershipExists { .. })
        ));
    }

    #[test]
    fn active_members_are_scoped_to_the_team_and_ordered_by_user() {
        let mut store = MemoryStore::new();
        let team = TeamId::new(1);

        for user in [3, 1, 2] {
            store
                .insert_membership(TeamMember::new(team, UserId::new(user), TeamRole::Member))
                .unwrap();
        }
        store
            .insert_membership(TeamMember::new(
                TeamId::new(2),
                UserId::new(9),
                TeamRole::Owner,
            ))
            .unwrap();

        let mut removed = store.membership(team, UserId::new(2)).unwrap().unwrap();
        removed.status = taskboard_core::MembershipStatus::Removed;
        store.update_membership(removed).unwrap();

        let members: Vec<_> = store
            .active_members(team)
            .unwrap()
            .into_iter()
            .map(|member| member.user_id.as_u64())
            .collect();
        assert_eq!(members, vec![1, 3]);
    }

    #[test]
    fn owner_and_admin_counts_track_active_rows_only() {
        let mut store = MemoryStore::new();
        let team = TeamId::new(1);

        store
            .insert_membership(TeamMember::new(team, UserId::new(1), TeamRole::Owner))
            .unwrap();
        store
            .insert_membership(TeamMember::new(team, UserId::new(2), TeamRole::Member))
            .unwrap();
        assert_eq!(store.active_owner_count(team), Ok(1));

        let mut admins = 0;
        for (id, status) in [
            (10, UserStatus::Active),
            (11, UserStatus::Suspended),
            (12, UserStatus::Active),
        ] {
            store
                .insert_user(User::new(UserId::new(id), SystemRole::Admin, status))
                .unwrap();
            if status == UserStatus::Active {
                admins += 1;
            }
        }
        assert_eq!(store.system_admin_count(), Ok(admins));
    }
}
