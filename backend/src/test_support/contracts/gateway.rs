//! Persistence gateway checks, including the bulk filter operations.

use crate::domain::Entity;
use crate::domain::ports::{RecordFilter, require};
use crate::test_support::factories::EntityFactory;

use super::{ContractFailure, ensure};

/// `create` assigns an identifier and stores exactly the given fields.
pub async fn creates_from_fields<E, F>(factory: &F) -> Result<(), ContractFailure>
where
    E: Entity,
    F: EntityFactory<E>,
{
    const CHECK: &str = "gateway::creates_from_fields";
    let repository = factory.repository();
    let fields = factory.build().await.map_err(ContractFailure::repository(CHECK))?;

    let created = repository
        .create(fields.clone())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    let fetched: E = require(repository, created.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    ensure(CHECK, fetched == created, || {
        format!("fetched {fetched:?} differs from created {created:?}")
    })?;
    ensure(CHECK, created.fields() == &fields, || {
        format!("created {:?} from {fields:?}", created.fields())
    })
}

/// `update_where` on a single-record filter rewrites only that record.
pub async fn updates_filtered_records<E, F>(factory: &F) -> Result<(), ContractFailure>
where
    E: Entity,
    F: EntityFactory<E>,
{
    const CHECK: &str = "gateway::updates_filtered_records";
    let repository = factory.repository();
    let target = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    let bystander = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    let replacement = factory.build().await.map_err(ContractFailure::repository(CHECK))?;

    let updated = repository
        .update_where(&RecordFilter::Id(target.id()), replacement.clone())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, updated == 1, || format!("filter matched {updated} records"))?;

    let refetched: E = require(repository, target.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, refetched.fields() == &replacement, || {
        format!("stored {:?}, expected {replacement:?}", refetched.fields())
    })?;
    let untouched: E = require(repository, bystander.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, untouched == bystander, || {
        format!("unfiltered record changed to {untouched:?}")
    })
}

/// `delete_where` removes the filtered record for good.
pub async fn deletes_filtered_records<E, F>(factory: &F) -> Result<(), ContractFailure>
where
    E: Entity,
    F: EntityFactory<E>,
{
    const CHECK: &str = "gateway::deletes_filtered_records";
    let repository = factory.repository();
    let target = factory.create().await.map_err(ContractFailure::repository(CHECK))?;

    let deleted = repository
        .delete_where(&RecordFilter::Id(target.id()))
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, deleted == 1, || format!("filter matched {deleted} records"))?;

    let after = repository
        .get(target.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, after.is_none(), || {
        format!("{} {} still retrievable", E::KIND, target.id())
    })?;

    let replacement = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, replacement.id() != target.id(), || {
        format!("identifier {} was handed out again", target.id())
    })
}
