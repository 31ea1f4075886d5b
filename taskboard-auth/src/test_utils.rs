// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seeded stores for exercising the engine in tests.

use taskboard_core::{
    Attachment, AttachmentId, Comment, CommentId, Project, ProjectId, ProjectStatus, SystemRole,
    Task, TaskId, Team, TeamId, TeamMember, TeamRole, User, UserId, UserStatus,
};
use taskboard_store::{
    AttachmentStore, CommentStore, MemoryStore, ProjectStore, TaskStore, TeamStore, UserStore,
};

/// A seeded [`MemoryStore`] with one team and the standard cast:
///
/// - `admin`: system administrator, on no roster at all
/// - `owner`: the team's owner (also the team row's `owner_id`)
/// - `maintainer`: roster entry with the `Admin` team role
/// - `member`: plain roster member
/// - `outsider`: active user without any membership
///
/// The fixture project belongs to the team and is `Active`.
pub struct TeamFixture {
    pub store: MemoryStore,
    pub admin: UserId,
    pub owner: UserId,
    pub maintainer: UserId,
    pub member: UserId,
    pub outsider: UserId,
    pub team: TeamId,
    pub project: ProjectId,
}

impl TeamFixture {
    pub fn new() -> Self {
        let mut store = MemoryStore::new();

        let admin = UserId::new(1);
        let owner = UserId::new(2);
        let maintainer = UserId::new(3);
        let member = UserId::new(4);
        let outsider = UserId::new(5);

        store
            .insert_user(User::new(admin, SystemRole::Admin, UserStatus::Active))
            .unwrap();
        for user in [owner, maintainer, member, outsider] {
            store
                .insert_user(User::new(user, SystemRole::Member, UserStatus::Active))
                .unwrap();
        }

        let team = TeamId::new(1);
        store.insert_team(Team::new(team, owner, "ants")).unwrap();
        for (user, role) in [
            (owner, TeamRole::Owner),
            (maintainer, TeamRole::Admin),
            (member, TeamRole::Member),
        ] {
            store
                .insert_membership(TeamMember::new(team, user, role))
                .unwrap();
        }

        let project = ProjectId::new(1);
        let mut row = Project::new(project, team, "research", 100, 200).unwrap();
        row.status = ProjectStatus::Active;
        store.insert_project(row).unwrap();

        Self {
            store,
            admin,
            owner,
            maintainer,
            member,
            outsider,
            team,
            project,
        }
    }

    /// Insert a user row directly.
    pub fn seed_user(&mut self, id: u64, system_role: SystemRole, status: UserStatus) -> UserId {
        let user_id = UserId::new(id);
        self.store
            .insert_user(User::new(user_id, system_role, status))
            .unwrap();
        user_id
    }

    /// Insert an active user and put them on the fixture team's roster
    /// as a plain member.
    pub fn seed_member(&mut self, id: u64) -> UserId {
        let user_id = self.seed_user(id, SystemRole::Member, UserStatus::Active);
        self.store
            .insert_membership(TeamMember::new(self.team, user_id, TeamRole::Member))
            .unwrap();
        user_id
    }

    /// Insert a task into the fixture project, bypassing the gates.
    pub fn seed_task(&mut self, id: u64, title: &str) -> TaskId {
        let task_id = TaskId::new(id);
        self.store
            .insert_task(Task::new(task_id, self.project, title))
            .unwrap();
        task_id
    }

    /// Set a task's assignee directly.
    pub fn assign(&mut self, task_id: TaskId, assignee: UserId) {
        let mut task = self.store.task_by_id(task_id).unwrap().unwrap();
        task.assigned_to = Some(assignee);
        self.store.update_task(task).unwrap();
    }

    /// Insert a comment directly.
    pub fn seed_comment(&mut self, id: u64, task: TaskId, author: UserId, body: &str) -> CommentId {
        let comment_id = CommentId::new(id);
        self.store
            .insert_comment(Comment::new(comment_id, task, author, body))
            .unwrap();
        comment_id
    }

    /// Insert an attachment directly.
    pub fn seed_attachment(
        &mut self,
        id: u64,
        task: TaskId,
        author: UserId,
        file_name: &str,
    ) -> AttachmentId {
        let attachment_id = AttachmentId::new(id);
        self.store
            .insert_attachment(Attachment::new(attachment_id, task, author, file_name))
            .unwrap();
        attachment_id
    }
}

impl Default for TeamFixture {
    fn default() -> Self {
        Self::new()
    }
}
