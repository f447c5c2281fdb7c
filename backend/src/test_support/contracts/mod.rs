//! Generic CRUD contract suites.
//!
//! Each check is an async function generic over the entity, its factory and
//! (for the serializer suite) its serializer. A check returns
//! `Err(ContractFailure)` naming itself and what went wrong; the
//! [`crud_contract_suite!`](crate::crud_contract_suite) macro turns every
//! check into a `#[tokio::test]` for one entity.

pub mod gateway;
pub mod lifecycle;
pub mod serializer;

use serde_json::Value;

use crate::domain::ports::RepositoryError;
use crate::domain::{Author, Book, Entity};
use crate::inbound::http::validation::ValidationErrors;

/// A violated contract check.
#[derive(Debug, thiserror::Error)]
pub enum ContractFailure {
    #[error("{check}: gateway call failed: {source}")]
    Repository {
        check: &'static str,
        #[source]
        source: RepositoryError,
    },
    #[error("{check}: mapping rejected: {errors:?}")]
    Rejected {
        check: &'static str,
        errors: ValidationErrors,
    },
    #[error("{check}: {message}")]
    Violated { check: &'static str, message: String },
}

impl ContractFailure {
    pub(crate) fn repository(check: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Repository { check, source }
    }

    pub(crate) fn rejected(check: &'static str) -> impl FnOnce(ValidationErrors) -> Self {
        move |errors| Self::Rejected { check, errors }
    }
}

/// Fail `check` with `message` unless `condition` holds.
pub(crate) fn ensure(
    check: &'static str,
    condition: bool,
    message: impl FnOnce() -> String,
) -> Result<(), ContractFailure> {
    if condition {
        Ok(())
    } else {
        Err(ContractFailure::Violated {
            check,
            message: message(),
        })
    }
}

/// The value a record is expected to expose for an external field.
///
/// Independent of any serializer so rendered output can be checked against
/// the record itself.
pub trait ExpectedValues: Entity {
    fn expected_value(&self, field: &str) -> Option<Value>;
}

impl ExpectedValues for Author {
    fn expected_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::from(self.id().get())),
            "name" => Some(Value::from(self.name())),
            "surname" => Some(Value::from(self.surname())),
            _ => None,
        }
    }
}

impl ExpectedValues for Book {
    fn expected_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::from(self.id().get())),
            "author" => Some(Value::from(self.author_id().get())),
            "name" => Some(Value::from(self.name())),
            _ => None,
        }
    }
}
