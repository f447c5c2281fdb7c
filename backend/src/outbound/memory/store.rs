//! Shared in-memory tables for authors and books.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{EntityRepository, RecordFilter, RepositoryError};
use crate::domain::{Author, AuthorFields, Book, BookFields, Entity, EntityKind, RecordId};

/// Rows of one kind, ordered by identifier.
#[derive(Debug)]
struct Table<F> {
    rows: BTreeMap<RecordId, F>,
    last_id: i64,
}

impl<F> Default for Table<F> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<F: Clone> Table<F> {
    fn insert(&mut self, fields: F) -> RecordId {
        self.last_id += 1;
        let id = RecordId::new(self.last_id);
        self.rows.insert(id, fields);
        id
    }

    fn get(&self, id: RecordId) -> Option<F> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    fn matching(&self, filter: &RecordFilter) -> Vec<RecordId> {
        self.rows
            .keys()
            .copied()
            .filter(|id| filter.matches(*id))
            .collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    authors: Table<AuthorFields>,
    books: Table<BookFields>,
}

impl Tables {
    fn ensure_author(&self, id: RecordId) -> Result<(), RepositoryError> {
        if self.authors.contains(id) {
            Ok(())
        } else {
            Err(RepositoryError::missing_reference("author", id))
        }
    }

    /// Remove authors and every book that references one of them.
    fn remove_authors(&mut self, ids: &[RecordId]) -> usize {
        let removed = ids
            .iter()
            .filter(|id| self.authors.rows.remove(*id).is_some())
            .count();
        let before = self.books.rows.len();
        self.books.rows.retain(|_, book| !ids.contains(&book.author));
        let cascaded = before - self.books.rows.len();
        if cascaded > 0 {
            debug!(authors = removed, books = cascaded, "cascaded author deletion");
        }
        removed
    }
}

/// Catalogue store living in process memory.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory store lock poisoned"))?;
        op(&mut tables)
    }
}

#[async_trait]
impl EntityRepository<Author> for MemoryStore {
    async fn create(&self, fields: AuthorFields) -> Result<Author, RepositoryError> {
        self.with_tables(|tables| {
            let id = tables.authors.insert(fields.clone());
            Ok(Author::from_parts(id, fields))
        })
    }

    async fn get(&self, id: RecordId) -> Result<Option<Author>, RepositoryError> {
        self.with_tables(|tables| {
            Ok(tables
                .authors
                .get(id)
                .map(|fields| Author::from_parts(id, fields)))
        })
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        self.with_tables(|tables| {
            Ok(tables
                .authors
                .rows
                .iter()
                .map(|(id, fields)| Author::from_parts(*id, fields.clone()))
                .collect())
        })
    }

    async fn update(&self, id: RecordId, fields: AuthorFields) -> Result<Author, RepositoryError> {
        self.with_tables(|tables| {
            let row = tables
                .authors
                .rows
                .get_mut(&id)
                .ok_or_else(|| RepositoryError::not_found(EntityKind::Author, id))?;
            *row = fields.clone();
            Ok(Author::from_parts(id, fields))
        })
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.with_tables(|tables| match tables.remove_authors(&[id]) {
            0 => Err(RepositoryError::not_found(EntityKind::Author, id)),
            _ => Ok(()),
        })
    }

    async fn update_where(
        &self,
        filter: &RecordFilter,
        fields: AuthorFields,
    ) -> Result<usize, RepositoryError> {
        self.with_tables(|tables| {
            let ids = tables.authors.matching(filter);
            for id in &ids {
                tables.authors.rows.insert(*id, fields.clone());
            }
            Ok(ids.len())
        })
    }

    async fn delete_where(&self, filter: &RecordFilter) -> Result<usize, RepositoryError> {
        self.with_tables(|tables| {
            let ids = tables.authors.matching(filter);
            Ok(tables.remove_authors(&ids))
        })
    }
}

#[async_trait]
impl EntityRepository<Book> for MemoryStore {
    async fn create(&self, fields: BookFields) -> Result<Book, RepositoryError> {
        self.with_tables(|tables| {
            tables.ensure_author(fields.author)?;
            let id = tables.books.insert(fields.clone());
            Ok(Book::from_parts(id, fields))
        })
    }

    async fn get(&self, id: RecordId) -> Result<Option<Book>, RepositoryError> {
        self.with_tables(|tables| {
            Ok(tables
                .books
                .get(id)
                .map(|fields| Book::from_parts(id, fields)))
        })
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        self.with_tables(|tables| {
            Ok(tables
                .books
                .rows
                .iter()
                .map(|(id, fields)| Book::from_parts(*id, fields.clone()))
                .collect())
        })
    }

    async fn update(&self, id: RecordId, fields: BookFields) -> Result<Book, RepositoryError> {
        self.with_tables(|tables| {
            if !tables.books.contains(id) {
                return Err(RepositoryError::not_found(EntityKind::Book, id));
            }
            tables.ensure_author(fields.author)?;
            tables.books.rows.insert(id, fields.clone());
            Ok(Book::from_parts(id, fields))
        })
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.with_tables(|tables| {
            tables
                .books
                .rows
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found(EntityKind::Book, id))
        })
    }

    async fn update_where(
        &self,
        filter: &RecordFilter,
        fields: BookFields,
    ) -> Result<usize, RepositoryError> {
        self.with_tables(|tables| {
            let ids = tables.books.matching(filter);
            if !ids.is_empty() {
                tables.ensure_author(fields.author)?;
            }
            for id in &ids {
                tables.books.rows.insert(*id, fields.clone());
            }
            Ok(ids.len())
        })
    }

    async fn delete_where(&self, filter: &RecordFilter) -> Result<usize, RepositoryError> {
        self.with_tables(|tables| {
            let ids = tables.books.matching(filter);
            for id in &ids {
                tables.books.rows.remove(id);
            }
            Ok(ids.len())
        })
    }
}
