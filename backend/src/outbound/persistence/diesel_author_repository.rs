//! PostgreSQL-backed author repository.
//!
//! Deleting an author relies on the `ON DELETE CASCADE` foreign key to remove
//! its books in the same statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AuthorRow, AuthorValues};
use super::pool::DbPool;
use super::record_filter::author_predicate;
use super::schema::authors;
use crate::domain::ports::{EntityRepository, RecordFilter, RepositoryError};
use crate::domain::{Author, AuthorFields, EntityKind, RecordId};

/// Diesel-backed implementation of `EntityRepository<Author>`.
#[derive(Clone)]
pub struct DieselAuthorRepository {
    pool: DbPool,
}

impl DieselAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Author> for DieselAuthorRepository {
    async fn create(&self, fields: AuthorFields) -> Result<Author, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(authors::table)
            .values(AuthorValues::from(&fields))
            .returning(AuthorRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(id = row.id, "author created");
        Ok(row.into())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Author>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = authors::table
            .find(id.get())
            .select(AuthorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Author::from))
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = authors::table
            .order(authors::id.asc())
            .select(AuthorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn update(&self, id: RecordId, fields: AuthorFields) -> Result<Author, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(authors::table.find(id.get()))
            .set(AuthorValues::from(&fields))
            .returning(AuthorRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Author::from)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Author, id))
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(authors::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        match deleted {
            0 => Err(RepositoryError::not_found(EntityKind::Author, id)),
            _ => Ok(()),
        }
    }

    async fn update_where(
        &self,
        filter: &RecordFilter,
        fields: AuthorFields,
    ) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(authors::table.filter(author_predicate(filter)))
            .set(AuthorValues::from(&fields))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_where(&self, filter: &RecordFilter) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(authors::table.filter(author_predicate(filter)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
