// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use taskboard_core::{ScheduleError, TransitionError, UserId};
use taskboard_store::StoreError;
use thiserror::Error;

/// Failures raised by the permission engine and its operation gates.
///
/// Every failure is raised at the point of detection and is
/// deterministic for a given store state; nothing here is retried.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The actor handle did not resolve to a known user.
    #[error("actor could not be authenticated")]
    AuthenticationRequired,

    /// The actor exists but its account status forbids acting.
    #[error("{0} is not active and may not perform operations")]
    ActorNotActive(UserId),

    /// The named resource does not exist, or is soft-deleted and the
    /// actor is not allowed to see deleted rows.
    #[error("{0} not found")]
    ResourceNotFound(String),

    /// A capability check denied the operation.
    #[error("{actor} may not {action}: {reason}")]
    AccessDenied {
        actor: UserId,
        action: &'static str,
        reason: &'static str,
    },

    /// A lifecycle change was rejected by its transition table.
    #[error("{0}")]
    InvalidTransition(String),

    /// The operation would break a structural invariant.
    #[error("{0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S> From<TransitionError<S>> for EngineError
where
    S: Display,
{
    fn from(err: TransitionError<S>) -> Self {
        EngineError::InvalidTransition(err.to_string())
    }
}
