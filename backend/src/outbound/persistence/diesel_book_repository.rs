//! PostgreSQL-backed book repository.
//!
//! A dangling `author_id` trips the foreign key and is reported as
//! [`RepositoryError::MissingReference`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::diesel_error_mapping::{map_book_write_error, map_diesel_error, map_pool_error};
use super::models::{BookRow, BookValues};
use super::pool::DbPool;
use super::record_filter::book_predicate;
use super::schema::books;
use crate::domain::ports::{EntityRepository, RecordFilter, RepositoryError};
use crate::domain::{Book, BookFields, EntityKind, RecordId};

/// Diesel-backed implementation of `EntityRepository<Book>`.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Book> for DieselBookRepository {
    async fn create(&self, fields: BookFields) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(books::table)
            .values(BookValues::from(&fields))
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_book_write_error(err, fields.author))?;
        debug!(id = row.id, author = row.author_id, "book created");
        Ok(row.into())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = books::table
            .find(id.get())
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Book::from))
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = books::table
            .order(books::id.asc())
            .select(BookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn update(&self, id: RecordId, fields: BookFields) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(books::table.find(id.get()))
            .set(BookValues::from(&fields))
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_book_write_error(err, fields.author))?;
        row.map(Book::from)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Book, id))
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(books::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        match deleted {
            0 => Err(RepositoryError::not_found(EntityKind::Book, id)),
            _ => Ok(()),
        }
    }

    async fn update_where(
        &self,
        filter: &RecordFilter,
        fields: BookFields,
    ) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(books::table.filter(book_predicate(filter)))
            .set(BookValues::from(&fields))
            .execute(&mut conn)
            .await
            .map_err(|err| map_book_write_error(err, fields.author))
    }

    async fn delete_where(&self, filter: &RecordFilter) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(books::table.filter(book_predicate(filter)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
