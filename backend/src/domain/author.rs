//! Author record.

use std::fmt;

use super::entity::{Entity, EntityKind, RecordId};

/// Author fields other than the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFields {
    pub name: String,
    pub surname: String,
}

impl AuthorFields {
    /// Build the field set from owned or borrowed strings.
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

/// A persisted author.
///
/// # Examples
/// ```
/// use backend::domain::{Author, AuthorFields, Entity, RecordId};
///
/// let author = Author::from_parts(RecordId::new(1), AuthorFields::new("Ursula", "Le Guin"));
/// assert_eq!(author.to_string(), "Ursula Le Guin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: RecordId,
    fields: AuthorFields,
}

impl Author {
    /// Given name.
    pub fn name(&self) -> &str {
        &self.fields.name
    }

    /// Family name.
    pub fn surname(&self) -> &str {
        &self.fields.surname
    }
}

impl Entity for Author {
    type Fields = AuthorFields;

    const KIND: EntityKind = EntityKind::Author;

    fn id(&self) -> RecordId {
        self.id
    }

    fn fields(&self) -> &AuthorFields {
        &self.fields
    }

    fn from_parts(id: RecordId, fields: AuthorFields) -> Self {
        Self { id, fields }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fields.name, self.fields.surname)
    }
}
