// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed entity identifiers.
//!
//! Entities refer to each other by id and never by owned object
//! references; relationships are resolved through explicit store lookups.
//! Each id is a thin newtype so that a `TaskId` can never be passed where
//! a `ProjectId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user.
    UserId,
    "user"
);

entity_id!(
    /// Identifier of a team.
    TeamId,
    "team"
);

entity_id!(
    /// Identifier of a project owned by a team.
    ProjectId,
    "project"
);

entity_id!(
    /// Identifier of a task within a project.
    TaskId,
    "task"
);

entity_id!(
    /// Identifier of a comment on a task.
    CommentId,
    "comment"
);

entity_id!(
    /// Identifier of a file attachment on a task.
    AttachmentId,
    "attachment"
);
