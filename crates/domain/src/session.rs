//! Per-run session state.
//!
//! A session is created at runner start and discarded at process
//! exit; nothing is persisted. It holds the bearer token obtained
//! from login and the entity ids captured from create responses so
//! later checks can reference them.

use std::collections::HashMap;

use crate::auth::BearerToken;
use crate::resource::{EntityId, Resource};

/// Ephemeral state accumulated over a single run.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<BearerToken>,
    ids: HashMap<Resource, EntityId>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the bearer token obtained from login.
    pub fn set_token(&mut self, token: BearerToken) {
        self.token = Some(token);
    }

    /// Returns the bearer token, if login has succeeded.
    #[must_use]
    pub const fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Returns true once a token has been obtained.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Records the id captured from a create response.
    pub fn capture(&mut self, resource: Resource, id: EntityId) {
        self.ids.insert(resource, id);
    }

    /// Returns the captured id for a resource, if any.
    #[must_use]
    pub fn captured(&self, resource: Resource) -> Option<&EntityId> {
        self.ids.get(&resource)
    }
}
