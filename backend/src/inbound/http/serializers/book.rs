use serde_json::Value;

use super::{Mapping, Serializer};
use crate::domain::{Book, BookFields, Entity};
use crate::inbound::http::validation::{ValidationErrors, required_reference, required_text};

/// Renders books as `{id, author, name}`, with `author` as the referenced id.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookSerializer;

impl Serializer for BookSerializer {
    type Entity = Book;

    const FIELDS: &'static [&'static str] = &["id", "author", "name"];

    fn render(record: &Book) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert("id".into(), Value::from(record.id().get()));
        mapping.insert("author".into(), Value::from(record.author_id().get()));
        mapping.insert("name".into(), Value::from(record.name()));
        mapping
    }

    fn parse(mapping: &Mapping) -> Result<BookFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let author = required_reference(mapping, "author", &mut errors);
        let name = required_text(mapping, "name", &mut errors);
        match (author, name) {
            (Some(author), Some(name)) if errors.is_empty() => Ok(BookFields { author, name }),
            _ => Err(errors),
        }
    }
}
