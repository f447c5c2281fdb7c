//! In-memory handle over a record that may not be stored yet.
//!
//! A handle starts either unsaved (fields only) or bound to a stored record.
//! `save` creates or full-replaces, `delete` removes the stored record and
//! clears the handle's identifier, and `refresh` reloads from the gateway.

use super::ports::{EntityRepository, RepositoryError, require};
use super::{Entity, RecordId};

/// A transient copy of a record plus its identifier, if it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHandle<E: Entity> {
    id: Option<RecordId>,
    fields: E::Fields,
}

impl<E: Entity> RecordHandle<E> {
    /// A handle that has never been saved.
    pub fn unsaved(fields: E::Fields) -> Self {
        Self { id: None, fields }
    }

    /// A handle bound to an already stored record.
    pub fn from_record(record: &E) -> Self {
        Self {
            id: Some(record.id()),
            fields: record.fields().clone(),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn fields(&self) -> &E::Fields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut E::Fields {
        &mut self.fields
    }

    /// Replace every non-identifier field at once.
    pub fn set_fields(&mut self, fields: E::Fields) {
        self.fields = fields;
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Create the record if unsaved, otherwise replace its stored fields.
    ///
    /// The identifier never changes once assigned.
    pub async fn save<R>(&mut self, repo: &R) -> Result<E, RepositoryError>
    where
        R: EntityRepository<E> + ?Sized,
    {
        let stored = match self.id {
            None => repo.create(self.fields.clone()).await?,
            Some(id) => repo.update(id, self.fields.clone()).await?,
        };
        self.id = Some(stored.id());
        self.fields = stored.fields().clone();
        Ok(stored)
    }

    /// Remove the stored record and clear the identifier.
    ///
    /// # Errors
    /// [`RepositoryError::Unsaved`] when the handle was never saved.
    pub async fn delete<R>(&mut self, repo: &R) -> Result<(), RepositoryError>
    where
        R: EntityRepository<E> + ?Sized,
    {
        let id = self.id.ok_or_else(|| RepositoryError::unsaved(E::KIND))?;
        repo.delete(id).await?;
        self.id = None;
        Ok(())
    }

    /// Reload fields from the gateway.
    pub async fn refresh<R>(&mut self, repo: &R) -> Result<E, RepositoryError>
    where
        R: EntityRepository<E> + ?Sized,
    {
        let id = self.id.ok_or_else(|| RepositoryError::unsaved(E::KIND))?;
        let stored: E = require(repo, id).await?;
        self.fields = stored.fields().clone();
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, AuthorFields, EntityKind};
    use crate::outbound::memory::MemoryStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn save_assigns_then_keeps_the_identifier(store: MemoryStore) {
        let mut handle = RecordHandle::<Author>::unsaved(AuthorFields::new("Jo", "March"));
        assert!(!handle.is_saved());

        let created = handle.save(&store).await.expect("create");
        handle.fields_mut().surname = "Bhaer".to_owned();
        let updated = handle.save(&store).await.expect("update");

        assert_eq!(handle.id(), Some(created.id()));
        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.surname(), "Bhaer");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_clears_the_identifier(store: MemoryStore) {
        let mut handle = RecordHandle::<Author>::unsaved(AuthorFields::new("Jo", "March"));
        let created = handle.save(&store).await.expect("create");

        handle.delete(&store).await.expect("delete");

        assert_eq!(handle.id(), None);
        let gone: Option<Author> = store.get(created.id()).await.expect("lookup");
        assert!(gone.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn unsaved_handles_cannot_be_deleted_or_refreshed(store: MemoryStore) {
        let mut handle = RecordHandle::<Author>::unsaved(AuthorFields::new("Jo", "March"));

        let delete = handle.delete(&store).await;
        let refresh = handle.refresh(&store).await;

        assert_eq!(delete, Err(RepositoryError::unsaved(EntityKind::Author)));
        assert_eq!(refresh, Err(RepositoryError::unsaved(EntityKind::Author)));
    }

    #[rstest]
    #[tokio::test]
    async fn refresh_discards_local_edits(store: MemoryStore) {
        let mut handle = RecordHandle::<Author>::unsaved(AuthorFields::new("Jo", "March"));
        handle.save(&store).await.expect("create");
        handle.fields_mut().name = "Amy".to_owned();

        handle.refresh(&store).await.expect("refresh");

        assert_eq!(handle.fields().name, "Jo");
    }
}
