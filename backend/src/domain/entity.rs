//! Shared vocabulary for catalogue records.
//!
//! Every persisted record is addressed by a store-assigned [`RecordId`] and
//! carries an explicit [`Entity::Fields`] struct holding everything except
//! the identifier. Copying "all fields but the id" is therefore a plain
//! struct clone rather than a runtime walk over attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of the catalogue's text columns.
pub const TEXT_FIELD_MAX_CHARS: usize = 200;

/// Store-assigned integer identifier.
///
/// Identifiers are assigned on creation, never change for the lifetime of a
/// record, and are never handed out again once the record is deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// The kinds of record held by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Book,
}

impl EntityKind {
    /// Singular lowercase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted catalogue record.
///
/// `Display` is a human-readable rendering for logs and diagnostics only; it
/// is not part of the wire contract.
pub trait Entity:
    Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync + 'static
{
    /// Every field except the identifier.
    type Fields: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Which kind of record this is.
    const KIND: EntityKind;

    /// Store-assigned identifier.
    fn id(&self) -> RecordId;

    /// Borrow the non-identifier fields.
    fn fields(&self) -> &Self::Fields;

    /// Reassemble a record from its identifier and fields.
    fn from_parts(id: RecordId, fields: Self::Fields) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn record_id_serialises_as_bare_integer() {
        let value = serde_json::to_value(RecordId::new(42)).expect("serialises");
        assert_eq!(value, serde_json::json!(42));
    }

    #[rstest]
    #[case(EntityKind::Author, "author")]
    #[case(EntityKind::Book, "book")]
    fn entity_kind_names(#[case] kind: EntityKind, #[case] singular: &str) {
        assert_eq!(kind.as_str(), singular);
        assert_eq!(kind.to_string(), singular);
    }

    #[rstest]
    fn record_ids_order_by_value() {
        assert!(RecordId::new(3) < RecordId::new(10));
    }
}
