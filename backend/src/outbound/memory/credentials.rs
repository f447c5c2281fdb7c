//! Token table held in memory.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{CredentialError, CredentialService};
use crate::domain::{AccessToken, Principal};

/// Credential store seeded explicitly at start-up or in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialService {
    tokens: HashMap<String, Principal>,
}

impl MemoryCredentialService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` as a token for `principal`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Principal;
    /// use backend::outbound::memory::MemoryCredentialService;
    ///
    /// let service = MemoryCredentialService::new()
    ///     .with_token("staff-key", Principal::new("admin", true));
    /// assert_eq!(service.len(), 1);
    /// ```
    #[must_use]
    pub fn with_token(mut self, key: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(key.into(), principal);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl CredentialService for MemoryCredentialService {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<Principal>, CredentialError> {
        Ok(self.tokens.get(token.expose()).cloned())
    }
}
