//! Persistence gateway for catalogue records.
//!
//! One trait covers both entity kinds. Adapters hold the canonical records;
//! every value returned here is a transient copy.
//!
//! Behaviour every adapter must honour:
//! - identifiers are assigned on create and never reused after deletion;
//! - `list` returns records in ascending identifier order;
//! - deleting an author also deletes the books that reference it;
//! - a book whose `author` does not exist is rejected with
//!   [`RepositoryError::MissingReference`] and nothing is written.

use async_trait::async_trait;

use crate::domain::{Entity, EntityKind, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by entity repository adapters.
    pub enum RepositoryError {
        /// No record with this identifier exists.
        NotFound { kind: EntityKind, id: RecordId } => "{kind} {id} not found",
        /// A foreign key points at a record that does not exist.
        MissingReference { field: String, id: RecordId } =>
            "{field} {id} does not exist",
        /// The operation needs a stored record but the handle was never saved.
        Unsaved { kind: EntityKind } => "{kind} has not been saved",
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}

/// Selects the records a bulk operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    All,
    Id(RecordId),
    Ids(Vec<RecordId>),
}

impl RecordFilter {
    /// Whether a record with `id` is selected.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RecordId;
    /// use backend::domain::ports::RecordFilter;
    ///
    /// let filter = RecordFilter::Ids(vec![RecordId::new(1), RecordId::new(3)]);
    /// assert!(filter.matches(RecordId::new(3)));
    /// assert!(!filter.matches(RecordId::new(2)));
    /// ```
    pub fn matches(&self, id: RecordId) -> bool {
        match self {
            Self::All => true,
            Self::Id(wanted) => *wanted == id,
            Self::Ids(wanted) => wanted.contains(&id),
        }
    }
}

/// CRUD access to one kind of catalogue record.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Store a new record and return it with its assigned identifier.
    async fn create(&self, fields: E::Fields) -> Result<E, RepositoryError>;

    /// Fetch a record by identifier. `None` when absent.
    async fn get(&self, id: RecordId) -> Result<Option<E>, RepositoryError>;

    /// All records, ascending by identifier.
    async fn list(&self) -> Result<Vec<E>, RepositoryError>;

    /// Replace every non-identifier field of an existing record.
    async fn update(&self, id: RecordId, fields: E::Fields) -> Result<E, RepositoryError>;

    /// Remove a record, cascading to dependants.
    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError>;

    /// Replace the fields of every selected record. Returns how many matched.
    async fn update_where(
        &self,
        filter: &RecordFilter,
        fields: E::Fields,
    ) -> Result<usize, RepositoryError>;

    /// Remove every selected record. Returns how many were removed.
    async fn delete_where(&self, filter: &RecordFilter) -> Result<usize, RepositoryError>;
}

/// Fetch a record, treating absence as [`RepositoryError::NotFound`].
pub async fn require<E, R>(repo: &R, id: RecordId) -> Result<E, RepositoryError>
where
    E: Entity,
    R: EntityRepository<E> + ?Sized,
{
    repo.get(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found(E::KIND, id))
}
