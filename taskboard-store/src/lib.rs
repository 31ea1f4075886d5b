// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces and implementations of persistence layers for taskboard
//! entities.
//!
//! The permission engine in `taskboard-auth` is written against the
//! read- and write-traits defined here, never against a concrete
//! backend. All trait methods are synchronous: authorization checks run
//! on already-loaded state and must never suspend.
//!
//! ## Read queries
//!
//! Lookup methods return `Ok(None)` for rows that were never written.
//! Soft-deleted rows are still returned by the plain `*_by_id` lookups;
//! callers that only want live rows filter on the entity's status or use
//! the dedicated listing methods.
//!
//! ## Write guarantees
//!
//! Two relational constraints are enforced at write time as a backstop
//! behind the engine's own checks:
//!
//! - task titles are unique per project, case-insensitively, among
//!   non-deleted tasks;
//! - the `(team, user)` roster pair is unique.
//!
//! ## Store implementations
//!
//! An in-memory storage solution is provided in the form of a
//! [`MemoryStore`] which implements every store trait. It is gated by
//! the `memory` feature flag and enabled by default.
#[cfg(feature = "memory")]
pub mod memory;
mod traits;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use traits::{
    AttachmentStore, CommentStore, ProjectStore, StoreError, TaskStore, TeamStore, UserStore,
};
