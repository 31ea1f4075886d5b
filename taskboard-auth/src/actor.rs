// SPDX-License-Identifier: MIT OR Apache-2.0

//! Actor resolution.
//!
//! The engine never trusts a bare id: every operation gate first
//! resolves its actor handle into a [`User`] row and then runs the
//! active-status gate before any capability is evaluated.

use taskboard_core::{User, UserId};
use taskboard_store::UserStore;
use tracing::debug;

use crate::error::EngineError;

/// Maps an opaque actor handle onto a user account.
///
/// Resolution failure is an authentication failure, never a not-found:
/// the caller learns nothing about which handles exist.
pub trait ActorResolver {
    type Handle;

    fn resolve_actor(&self, handle: &Self::Handle) -> Result<User, EngineError>;
}

/// Resolver backed by a [`UserStore`], with the user id as the handle.
pub struct StoreActorResolver<'a, S> {
    store: &'a S,
}

impl<'a, S> StoreActorResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S> ActorResolver for StoreActorResolver<'_, S>
where
    S: UserStore,
{
    type Handle = UserId;

    fn resolve_actor(&self, handle: &UserId) -> Result<User, EngineError> {
        let Some(user) = self.store.user_by_id(*handle)? else {
            return Err(EngineError::AuthenticationRequired);
        };

        Ok(user)
    }
}

/// The actor-active gate, run immediately after resolution.
pub fn require_active(actor: &User) -> Result<(), EngineError> {
    if !actor.can_act() {
        debug!(actor = %actor.id, status = %actor.status, "inactive actor rejected");
        return Err(EngineError::ActorNotActive(actor.id));
    }

    Ok(())
}
