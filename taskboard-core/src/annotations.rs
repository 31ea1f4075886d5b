// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comments and attachments annotating tasks.
//!
//! Both are owned existentially by the task they annotate and by their
//! authoring user for self-authorship checks.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::identity::{AttachmentId, CommentId, TaskId, UserId};

/// Lifecycle status shared by comments and attachments.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AnnotationStatus {
    Active,
    Deleted,
}

impl AnnotationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AnnotationStatus::Active)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, AnnotationStatus::Deleted)
    }
}

impl Display for AnnotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AnnotationStatus::Active => "active",
            AnnotationStatus::Deleted => "deleted",
        };

        write!(f, "{}", s)
    }
}

/// A comment left on a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub task_id: TaskId,
    pub author_id: UserId,
    pub body: String,
    pub status: AnnotationStatus,
}

impl Comment {
    pub fn new(id: CommentId, task_id: TaskId, author_id: UserId, body: impl Into<String>) -> Self {
        Self {
            id,
            task_id,
            author_id,
            body: body.into(),
            status: AnnotationStatus::Active,
        }
    }

    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// A file attachment on a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub task_id: TaskId,
    pub author_id: UserId,
    pub file_name: String,
    pub status: AnnotationStatus,
}

impl Attachment {
    pub fn new(
        id: AttachmentId,
        task_id: TaskId,
        author_id: UserId,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            task_id,
            author_id,
            file_name: file_name.into(),
            status: AnnotationStatus::Active,
        }
    }

    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}
