//! Book record.
//!
//! A book references exactly one author by identifier. Deleting that author
//! deletes the book as well.

use std::fmt;

use super::entity::{Entity, EntityKind, RecordId};

/// Book fields other than the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    /// Identifier of the referenced author.
    pub author: RecordId,
    pub name: String,
}

impl BookFields {
    pub fn new(author: RecordId, name: impl Into<String>) -> Self {
        Self {
            author,
            name: name.into(),
        }
    }
}

/// A persisted book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: RecordId,
    fields: BookFields,
}

impl Book {
    /// Identifier of the author who wrote the book.
    pub fn author_id(&self) -> RecordId {
        self.fields.author
    }

    /// Title.
    pub fn name(&self) -> &str {
        &self.fields.name
    }
}

impl Entity for Book {
    type Fields = BookFields;

    const KIND: EntityKind = EntityKind::Book;

    fn id(&self) -> RecordId {
        self.id
    }

    fn fields(&self) -> &BookFields {
        &self.fields
    }

    fn from_parts(id: RecordId, fields: BookFields) -> Self {
        Self { id, fields }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn display_is_the_title() {
        let book = Book::from_parts(
            RecordId::new(1),
            BookFields::new(RecordId::new(4), "Test Book Name"),
        );
        assert_eq!(book.to_string(), "Test Book Name");
        assert_eq!(book.author_id(), RecordId::new(4));
    }
}
