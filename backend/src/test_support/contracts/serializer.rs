//! Serialization contract checks.

use serde_json::Value;

use crate::domain::ports::require;
use crate::domain::{Entity, RecordHandle};
use crate::inbound::http::serializers::{Mapping, Serializer};
use crate::test_support::factories::EntityFactory;

use super::{ContractFailure, ExpectedValues, ensure};

/// Number of records rendered by [`renders_sequence`].
pub const SEQUENCE_LENGTH: usize = 4;

fn check_rendering<S>(
    check: &'static str,
    mapping: &Mapping,
    record: &S::Entity,
) -> Result<(), ContractFailure>
where
    S: Serializer,
    S::Entity: ExpectedValues,
{
    ensure(check, mapping.len() == S::FIELDS.len(), || {
        format!("rendered keys {:?}, declared {:?}", mapping.keys().collect::<Vec<_>>(), S::FIELDS)
    })?;
    for field in S::FIELDS {
        let rendered = mapping.get(*field);
        let expected = record.expected_value(field);
        ensure(check, rendered == expected.as_ref(), || {
            format!("field `{field}` rendered as {rendered:?}, record holds {expected:?}")
        })?;
    }
    Ok(())
}

/// A persisted record renders every declared field with its own value.
pub async fn renders_declared_fields<E, F, S>(factory: &F) -> Result<(), ContractFailure>
where
    E: ExpectedValues,
    F: EntityFactory<E>,
    S: Serializer<Entity = E>,
{
    const CHECK: &str = "serializer::renders_declared_fields";
    let record = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    check_rendering::<S>(CHECK, &S::render(&record), &record)
}

/// Rendering many records yields a plain ordered list, one mapping each.
pub async fn renders_sequence<E, F, S>(factory: &F) -> Result<(), ContractFailure>
where
    E: ExpectedValues,
    F: EntityFactory<E>,
    S: Serializer<Entity = E>,
{
    const CHECK: &str = "serializer::renders_sequence";
    let records = factory
        .create_many(SEQUENCE_LENGTH)
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    let rendered = S::render_many(&records);

    ensure(CHECK, rendered.len() == records.len(), || {
        format!("rendered {} of {} records", rendered.len(), records.len())
    })?;
    for (mapping, record) in rendered.iter().zip(&records) {
        check_rendering::<S>(CHECK, mapping, record)?;
    }
    Ok(())
}

/// A generated mapping parses into fields that save as a new record.
pub async fn parses_and_saves_new_instance<E, F, S>(factory: &F) -> Result<(), ContractFailure>
where
    E: ExpectedValues,
    F: EntityFactory<E>,
    S: Serializer<Entity = E>,
{
    const CHECK: &str = "serializer::parses_and_saves_new_instance";
    let repository = factory.repository();
    let mapping = factory
        .parsable_mapping()
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    let fields = S::parse(&mapping).map_err(ContractFailure::rejected(CHECK))?;
    let saved = RecordHandle::<E>::unsaved(fields)
        .save(repository)
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    let fetched: E = require(repository, saved.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    ensure(CHECK, fetched == saved, || {
        format!("fetched {fetched:?} differs from saved {saved:?}")
    })
}

/// A mapping carrying an existing identifier overwrites that record.
pub async fn parses_and_updates_existing_instance<E, F, S>(
    factory: &F,
) -> Result<(), ContractFailure>
where
    E: ExpectedValues,
    F: EntityFactory<E>,
    S: Serializer<Entity = E>,
{
    const CHECK: &str = "serializer::parses_and_updates_existing_instance";
    let repository = factory.repository();
    let existing = factory.create().await.map_err(ContractFailure::repository(CHECK))?;
    let mut mapping = factory
        .parsable_mapping()
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    mapping.insert("id".into(), Value::from(existing.id().get()));

    let fields = S::parse(&mapping).map_err(ContractFailure::rejected(CHECK))?;
    let mut handle = RecordHandle::from_record(&existing);
    handle.set_fields(fields);
    handle
        .save(repository)
        .await
        .map_err(ContractFailure::repository(CHECK))?;

    let stored: E = require(repository, existing.id())
        .await
        .map_err(ContractFailure::repository(CHECK))?;
    for (key, value) in &mapping {
        let held = stored.expected_value(key);
        ensure(CHECK, held.as_ref() == Some(value), || {
            format!("field `{key}` holds {held:?} after saving {value}")
        })?;
    }
    Ok(())
}
