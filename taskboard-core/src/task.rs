// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::identity::{ProjectId, TaskId, UserId};

/// Lifecycle status of a task.
///
/// `Deleted` is terminal and reachable only through the dedicated delete
/// operation, never through the generic status-update path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    InReview,
    Done,
    Blocked,
    Deleted,
}

impl TaskStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, TaskStatus::Deleted)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::ToDo => "to-do",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::InReview => "in-review",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Deleted => "deleted",
        };

        write!(f, "{}", s)
    }
}

/// A task within a project, optionally assigned to a user.
///
/// Task titles are unique per project (case-insensitive) among
/// non-deleted tasks; the store enforces the constraint at write time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub status: TaskStatus,
    pub assigned_to: Option<UserId>,
}

impl Task {
    pub fn new(id: TaskId, project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id,
            project_id,
            title: title.into(),
            status: TaskStatus::ToDo,
            assigned_to: None,
        }
    }

    /// The given user is the task's current assignee.
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_to == Some(user_id)
    }
}
