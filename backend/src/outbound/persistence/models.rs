//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; adapters convert them into
//! domain records immediately.

use diesel::prelude::*;

use super::schema::{authors, books};
use crate::domain::{Author, AuthorFields, Book, BookFields, Entity, RecordId};

/// Row struct for reading from the authors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author::from_parts(
            RecordId::new(row.id),
            AuthorFields {
                name: row.name,
                surname: row.surname,
            },
        )
    }
}

/// Insertable and changeset struct for author writes.
///
/// Every column is always set, giving full-replace semantics on update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = authors)]
pub(crate) struct AuthorValues<'a> {
    pub name: &'a str,
    pub surname: &'a str,
}

impl<'a> From<&'a AuthorFields> for AuthorValues<'a> {
    fn from(fields: &'a AuthorFields) -> Self {
        Self {
            name: fields.name.as_str(),
            surname: fields.surname.as_str(),
        }
    }
}

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::from_parts(
            RecordId::new(row.id),
            BookFields {
                author: RecordId::new(row.author_id),
                name: row.name,
            },
        )
    }
}

/// Insertable and changeset struct for book writes.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = books)]
pub(crate) struct BookValues<'a> {
    pub author_id: i64,
    pub name: &'a str,
}

impl<'a> From<&'a BookFields> for BookValues<'a> {
    fn from(fields: &'a BookFields) -> Self {
        Self {
            author_id: fields.author.get(),
            name: fields.name.as_str(),
        }
    }
}
