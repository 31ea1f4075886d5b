// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle state machines.
//!
//! A single generic primitive, [`validate_transition`], is instantiated
//! three times: for task statuses, project statuses and team-role
//! changes. Every instantiation shares the same strictness rules:
//!
//! - requesting the current value is an error, never an idempotent
//!   success;
//! - a terminal value (soft delete) rejects every further change;
//! - the terminal value is unreachable through the generic path, the
//!   dedicated delete operation is the only way in.

use std::fmt::Display;

use thiserror::Error;

use crate::project::ProjectStatus;
use crate::task::TaskStatus;
use crate::team::TeamRole;

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError<S>
where
    S: Display,
{
    #[error("invalid transition from {0} to {1}")]
    NotAllowed(S, S),

    #[error("already {0}, requested change is a no-op")]
    SameValue(S),

    #[error("{0} is terminal, no further changes are possible")]
    Terminal(S),

    #[error("cannot reach {0} through a status update, use the delete operation")]
    DeletePathOnly(S),
}

/// The authoritative mapping from a lifecycle value to its legal
/// successors, with an optional terminal (soft-delete) value.
#[derive(Clone, Copy, Debug)]
pub struct TransitionTable<S: 'static> {
    allowed: fn(S) -> &'static [S],
    terminal: Option<S>,
}

impl<S: Copy> TransitionTable<S> {
    pub const fn new(allowed: fn(S) -> &'static [S]) -> Self {
        Self {
            allowed,
            terminal: None,
        }
    }

    pub const fn with_terminal(mut self, terminal: S) -> Self {
        self.terminal = Some(terminal);
        self
    }
}

/// Validate a requested lifecycle change against a transition table.
///
/// Checks run in a fixed order: terminal current value, no-op request,
/// terminal requested value, then the allowed-next set.
pub fn validate_transition<S>(
    table: &TransitionTable<S>,
    from: S,
    to: S,
) -> Result<(), TransitionError<S>>
where
    S: Copy + Eq + Display,
{
    if let Some(terminal) = table.terminal {
        // A soft-deleted entity rejects every further change.
        if from == terminal {
            return Err(TransitionError::Terminal(from));
        }
    }

    if from == to {
        return Err(TransitionError::SameValue(from));
    }

    if let Some(terminal) = table.terminal {
        // Only the dedicated delete operation reaches the terminal value.
        if to == terminal {
            return Err(TransitionError::DeletePathOnly(to));
        }
    }

    if (table.allowed)(from).contains(&to) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed(from, to))
    }
}

fn task_allowed(from: TaskStatus) -> &'static [TaskStatus] {
    use TaskStatus::*;

    match from {
        ToDo => &[InProgress, Blocked],
        InProgress => &[InReview, Done, Blocked, ToDo],
        InReview => &[Done, InProgress, Blocked],
        // Reopen only.
        Done => &[ToDo, InProgress],
        // Unblock only.
        Blocked => &[ToDo, InProgress],
        Deleted => &[],
    }
}

/// Legal task status transitions.
pub const TASK_TRANSITIONS: TransitionTable<TaskStatus> =
    TransitionTable::new(task_allowed).with_terminal(TaskStatus::Deleted);

fn project_allowed(from: ProjectStatus) -> &'static [ProjectStatus] {
    use ProjectStatus::*;

    match from {
        Planned => &[Active],
        Active => &[Completed, Archived],
        Completed => &[Active, Archived],
        Archived => &[Active],
        Deleted => &[],
    }
}

/// Legal project status transitions.
///
/// Restoring a deleted project is a privileged operation outside this
/// table, the same way deletion is.
pub const PROJECT_TRANSITIONS: TransitionTable<ProjectStatus> =
    TransitionTable::new(project_allowed).with_terminal(ProjectStatus::Deleted);

fn team_role_allowed(from: TeamRole) -> &'static [TeamRole] {
    use TeamRole::*;

    match from {
        Member => &[Admin, Owner],
        Admin => &[Member, Owner],
        Owner => &[Member, Admin],
    }
}

/// Legal team-role changes: any role other than the current one.
///
/// Roster invariants (the last owner may never be demoted, owners may not
/// change their own role) are enforced on top of this table by the
/// permission layer.
pub const TEAM_ROLE_TRANSITIONS: TransitionTable<TeamRole> =
    TransitionTable::new(team_role_allowed);
