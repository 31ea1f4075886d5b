// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization core for a multi-tenant task tracker.
//!
//! The crate decides who may do what. It is generic over the store
//! traits from `taskboard-store` and split along the decision pipeline:
//!
//! - [`actor`]: resolve an actor handle into a user and gate on the
//!   account being active;
//! - [`relationship`]: answer membership and parent-chain questions
//!   with fresh store reads;
//! - [`capability`]: pure checks over the actor and resolved facts,
//!   returning [`Decision`], plus the hard admin gate;
//! - [`operations`]: one gate per service operation running the fixed
//!   sequence (active gate, lookup, capability, lifecycle validation,
//!   write).
//!
//! All checks are synchronous and deterministic: a decision depends
//! only on the store state at the moment it is made. Denials and
//! rejected transitions are logged at debug level with the acting user
//! and the attempted action.

pub mod actor;
pub mod capability;
mod error;
pub mod operations;
pub mod relationship;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use actor::{ActorResolver, StoreActorResolver, require_active};
pub use capability::{Decision, system_admin_check};
pub use error::EngineError;
pub use relationship::Relationships;
