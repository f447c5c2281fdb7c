//! Port resolving access tokens to users.
//!
//! Token issuance lives elsewhere; this port only answers "who holds this
//! key, and are they staff?". Inbound adapters turn the answer into a
//! [`crate::domain::Caller`].

use async_trait::async_trait;

use crate::domain::{AccessToken, Principal};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialError {
        /// Credential store connection could not be established.
        Connection { message: String } => "credential store connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "credential lookup failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Resolve a token. `Ok(None)` means the key is unknown.
    async fn resolve(&self, token: &AccessToken) -> Result<Option<Principal>, CredentialError>;
}
