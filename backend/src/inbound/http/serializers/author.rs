use serde_json::Value;

use super::{Mapping, Serializer};
use crate::domain::{Author, AuthorFields, Entity};
use crate::inbound::http::validation::{ValidationErrors, required_text};

/// Renders authors as `{id, name, surname}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorSerializer;

impl Serializer for AuthorSerializer {
    type Entity = Author;

    const FIELDS: &'static [&'static str] = &["id", "name", "surname"];

    fn render(record: &Author) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert("id".into(), Value::from(record.id().get()));
        mapping.insert("name".into(), Value::from(record.name()));
        mapping.insert("surname".into(), Value::from(record.surname()));
        mapping
    }

    fn parse(mapping: &Mapping) -> Result<AuthorFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(mapping, "name", &mut errors);
        let surname = required_text(mapping, "surname", &mut errors);
        match (name, surname) {
            (Some(name), Some(surname)) if errors.is_empty() => Ok(AuthorFields { name, surname }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use crate::inbound::http::validation::FieldErrorCode;
    use rstest::rstest;
    use serde_json::json;

    fn mapping(value: Value) -> Mapping {
        value.as_object().cloned().expect("object")
    }

    #[rstest]
    fn renders_exactly_the_declared_fields() {
        let author = Author::from_parts(RecordId::new(4), AuthorFields::new("A", "B"));
        let rendered = AuthorSerializer::render(&author);

        assert_eq!(rendered.len(), AuthorSerializer::FIELDS.len());
        assert!(AuthorSerializer::FIELDS.iter().all(|field| rendered.contains_key(*field)));
        assert_eq!(Value::Object(rendered), json!({"id": 4, "name": "A", "surname": "B"}));
    }

    #[rstest]
    fn parse_ignores_id_and_unknown_fields() {
        let fields = AuthorSerializer::parse(&mapping(
            json!({"id": 99, "name": "A", "surname": "B", "extra": true}),
        ))
        .expect("valid");
        assert_eq!(fields, AuthorFields::new("A", "B"));
    }

    #[rstest]
    fn parse_collects_every_failure() {
        let errors = AuthorSerializer::parse(&mapping(json!({"name": ""}))).expect_err("invalid");
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("name", FieldErrorCode::Blank));
        assert!(errors.contains("surname", FieldErrorCode::MissingField));
    }

    #[rstest]
    fn render_parse_render_is_stable() {
        let author = Author::from_parts(RecordId::new(2), AuthorFields::new("Ursula", "Le Guin"));
        let rendered = AuthorSerializer::render(&author);
        let parsed = AuthorSerializer::parse(&rendered).expect("valid");
        let again = AuthorSerializer::render(&Author::from_parts(author.id(), parsed));
        assert_eq!(again, rendered);
    }
}
