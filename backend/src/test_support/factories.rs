//! Fixture factories for catalogue records.
//!
//! Factories are explicit values: construct one per test from a config
//! struct, never share one through a global. Each build draws the next
//! number from the factory's own sequence, so successive builds differ and
//! an update can always be told apart from the original.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{EntityRepository, RepositoryError};
use crate::domain::{Author, AuthorFields, Book, BookFields, Entity, RecordId};
use crate::inbound::http::serializers::Mapping;

/// Builds unsaved and persisted instances of one entity type.
#[async_trait]
pub trait EntityFactory<E: Entity>: Send + Sync {
    /// The gateway persisted instances are written to.
    fn repository(&self) -> &dyn EntityRepository<E>;

    /// Field values for a new, unsaved instance. Parents are created as
    /// needed so the fields are valid as-is.
    async fn build(&self) -> Result<E::Fields, RepositoryError>;

    /// A valid external mapping for a new instance, without `id`.
    async fn parsable_mapping(&self) -> Result<Mapping, RepositoryError>;

    /// Build and persist one instance.
    async fn create(&self) -> Result<E, RepositoryError> {
        let fields = self.build().await?;
        self.repository().create(fields).await
    }

    /// Persist `count` instances in creation order.
    async fn create_many(&self, count: usize) -> Result<Vec<E>, RepositoryError> {
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.create().await?);
        }
        Ok(records)
    }
}

#[derive(Debug, Default)]
struct Sequence(AtomicU64);

impl Sequence {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Defaults for [`AuthorFactory`].
#[derive(Debug, Clone)]
pub struct AuthorFactoryConfig {
    pub name: String,
    pub surname: String,
}

impl Default for AuthorFactoryConfig {
    fn default() -> Self {
        Self {
            name: "test_name".to_owned(),
            surname: "test_surname".to_owned(),
        }
    }
}

/// Factory for [`Author`] records.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::outbound::memory::MemoryStore;
/// use backend::test_support::factories::{AuthorFactory, AuthorFactoryConfig, EntityFactory};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let factory = AuthorFactory::new(Arc::new(MemoryStore::new()), AuthorFactoryConfig::default());
/// let first = factory.build().await.expect("fields");
/// let second = factory.build().await.expect("fields");
/// assert_ne!(first, second);
/// # });
/// ```
pub struct AuthorFactory {
    config: AuthorFactoryConfig,
    repository: Arc<dyn EntityRepository<Author>>,
    sequence: Sequence,
}

impl AuthorFactory {
    pub fn new(repository: Arc<dyn EntityRepository<Author>>, config: AuthorFactoryConfig) -> Self {
        Self {
            config,
            repository,
            sequence: Sequence::default(),
        }
    }

    fn next_fields(&self) -> AuthorFields {
        let n = self.sequence.next();
        AuthorFields::new(
            format!("{} {n}", self.config.name),
            format!("{} {n}", self.config.surname),
        )
    }
}

#[async_trait]
impl EntityFactory<Author> for AuthorFactory {
    fn repository(&self) -> &dyn EntityRepository<Author> {
        self.repository.as_ref()
    }

    async fn build(&self) -> Result<AuthorFields, RepositoryError> {
        Ok(self.next_fields())
    }

    async fn parsable_mapping(&self) -> Result<Mapping, RepositoryError> {
        let AuthorFields { name, surname } = self.next_fields();
        let mut mapping = Mapping::new();
        mapping.insert("name".into(), Value::from(name));
        mapping.insert("surname".into(), Value::from(surname));
        Ok(mapping)
    }
}

/// Defaults for [`BookFactory`].
#[derive(Debug, Clone)]
pub struct BookFactoryConfig {
    pub name: String,
    /// Reuse this author instead of creating one per book.
    pub author: Option<RecordId>,
}

impl Default for BookFactoryConfig {
    fn default() -> Self {
        Self {
            name: "Test Book Name".to_owned(),
            author: None,
        }
    }
}

/// Factory for [`Book`] records; creates an author per book unless the
/// config pins one.
pub struct BookFactory {
    config: BookFactoryConfig,
    repository: Arc<dyn EntityRepository<Book>>,
    authors: AuthorFactory,
    sequence: Sequence,
}

impl BookFactory {
    pub fn new(
        repository: Arc<dyn EntityRepository<Book>>,
        authors: AuthorFactory,
        config: BookFactoryConfig,
    ) -> Self {
        Self {
            config,
            repository,
            authors,
            sequence: Sequence::default(),
        }
    }

    async fn author(&self) -> Result<RecordId, RepositoryError> {
        match self.config.author {
            Some(id) => Ok(id),
            None => Ok(self.authors.create().await?.id()),
        }
    }

    fn next_name(&self) -> String {
        format!("{} {}", self.config.name, self.sequence.next())
    }
}

#[async_trait]
impl EntityFactory<Book> for BookFactory {
    fn repository(&self) -> &dyn EntityRepository<Book> {
        self.repository.as_ref()
    }

    async fn build(&self) -> Result<BookFields, RepositoryError> {
        let author = self.author().await?;
        Ok(BookFields::new(author, self.next_name()))
    }

    async fn parsable_mapping(&self) -> Result<Mapping, RepositoryError> {
        let author = self.author().await?;
        let mut mapping = Mapping::new();
        mapping.insert("author".into(), Value::from(author.get()));
        mapping.insert("name".into(), Value::from(self.next_name()));
        Ok(mapping)
    }
}
