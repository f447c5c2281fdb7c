//! PostgreSQL-backed credential lookup.
//!
//! Tokens live in `auth_tokens`, one per user, joined to `users` for the
//! staff flag. Keys are compared exactly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::diesel_error_mapping::{map_credential_diesel_error, map_credential_pool_error};
use super::pool::DbPool;
use super::schema::{auth_tokens, users};
use crate::domain::ports::{CredentialError, CredentialService};
use crate::domain::{AccessToken, Principal};

/// Diesel-backed implementation of the `CredentialService` port.
#[derive(Clone)]
pub struct DieselCredentialService {
    pool: DbPool,
}

impl DieselCredentialService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialService for DieselCredentialService {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<Principal>, CredentialError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_credential_pool_error)?;
        let row: Option<(String, bool)> = auth_tokens::table
            .inner_join(users::table)
            .filter(auth_tokens::key.eq(token.expose()))
            .select((users::username, users::is_staff))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_credential_diesel_error)?;
        Ok(row.map(|(username, is_staff)| Principal::new(username, is_staff)))
    }
}
