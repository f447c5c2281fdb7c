//! Mapping between catalogue records and their flat JSON representation.
//!
//! A rendered mapping holds exactly the declared fields, `id` first. `id` is
//! read-only: it is always rendered and never parsed. Parsing validates every
//! declared field and either yields a complete field set or the full list of
//! failures; nothing is partially applied.

mod author;
mod book;

pub use author::AuthorSerializer;
pub use book::BookSerializer;

use serde_json::{Map, Value};

use super::validation::{FieldErrorCode, ValidationErrors};
use crate::domain::{Entity, Error};

/// The rendered, flat external representation of a record.
pub type Mapping = Map<String, Value>;

/// Serialization contract for one entity type.
pub trait Serializer: Send + Sync + 'static {
    type Entity: Entity;

    /// Every external field, `id` first.
    const FIELDS: &'static [&'static str];

    /// Render a record.
    fn render(record: &Self::Entity) -> Mapping;

    /// Render records in order, each with the single-record field contract.
    fn render_many(records: &[Self::Entity]) -> Vec<Mapping> {
        records.iter().map(Self::render).collect()
    }

    /// Validate a mapping into a complete field set.
    ///
    /// # Errors
    /// Every offending field, collected.
    fn parse(mapping: &Mapping) -> Result<<Self::Entity as Entity>::Fields, ValidationErrors>;
}

/// Decode a request body into a mapping.
///
/// The body must be a JSON object. Malformed JSON and any other JSON type are
/// reported against the pseudo-field `body`.
pub fn parse_body(body: &[u8]) -> Result<Mapping, Error> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        ValidationErrors::single(
            "body",
            FieldErrorCode::InvalidJson,
            format!("malformed JSON: {err}"),
        )
    })?;
    match value {
        Value::Object(mapping) => Ok(mapping),
        _ => Err(ValidationErrors::single(
            "body",
            FieldErrorCode::InvalidType,
            "expected a JSON object",
        )
        .into()),
    }
}
