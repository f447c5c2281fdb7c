//! Record lifecycle checks driven through [`RecordHandle`].

use crate::domain::ports::require;
use crate::domain::{Entity, RecordHandle};
use crate::test_support::factories::EntityFactory;

use super::{ContractFailure, ensure};

/// An unsaved instance gets an identifier on save and can be fetched back.
pub async fn saves_new_instance<E, F>(factory: &F) -> Result<(), ContractFailure>
where
    E: Entity,
    F: EntityFactory<E>,
{
    const CHECK: &str = "lifecycle::saves_new_instance";
    let repository = factory.repository();
    let fields = factory.build().await.map_err(ContractFailure::repository(CHECK))?;
    let mut handle = RecordHandle::<E>::unsaved(fields.clone());

    let saved = handle
        .save(repository)
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    ensure(CHECK, handle.id() == Some(saved.id()), || {
        format!("handle id {:?} differs from stored id {}", handle.id(), saved.id())
    })?;
    let fetched: E = require(repository, saved.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, fetched.fields() == &fields, || {
        format!("stored fields {:?} differ from input {fields:?}", fetched.fields())
    })
}

/// Overwriting every field of a saved instance keeps its identifier.
pub async fn saves_updates<E, F>(factory: &F) -> Result<(), ContractFailure>
where
    E: Entity,
    F: EntityFactory<E>,
{
    const CHECK: &str = "lifecycle::saves_updates";
    let repository = factory.repository();
    let existing = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    let replacement = factory.build().await.map_err(ContractFailure::repository(CHECK))?;
    let mut handle = RecordHandle::from_record(&existing);

    handle.set_fields(replacement.clone());
    handle
        .save(repository)
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    ensure(CHECK, handle.id() == Some(existing.id()), || {
        format!("identifier moved from {} to {:?}", existing.id(), handle.id())
    })?;
    let fetched: E = require(repository, existing.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, fetched.fields() == &replacement, || {
        format!("stored fields {:?} differ from {replacement:?}", fetched.fields())
    })
}

/// Deleting clears the handle's identifier and the record is gone.
pub async fn deletes_instance<E, F>(factory: &F) -> Result<(), ContractFailure>
where
    E: Entity,
    F: EntityFactory<E>,
{
    const CHECK: &str = "lifecycle::deletes_instance";
    let repository = factory.repository();
    let existing = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    let mut handle = RecordHandle::from_record(&existing);

    handle
        .delete(repository)
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    ensure(CHECK, handle.id().is_none(), || {
        format!("handle still carries {:?}", handle.id())
    })?;
    let after = repository
        .get(existing.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, after.is_none(), || {
        format!("{} {} still retrievable", E::KIND, existing.id())
    })
}
