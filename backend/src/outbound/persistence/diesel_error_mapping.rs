//! Translation of pool and Diesel failures into port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::RecordId;
use crate::domain::ports::{CredentialError, RepositoryError};

pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    RepositoryError::connection(error.into_message())
}

pub(crate) fn map_credential_pool_error(error: PoolError) -> CredentialError {
    CredentialError::connection(error.into_message())
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }
}

/// Map a Diesel error into connection or query failures.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

/// Map a failed book write, reporting a dangling author as
/// [`RepositoryError::MissingReference`].
pub(crate) fn map_book_write_error(error: DieselError, author: RecordId) -> RepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info)
            if info
                .constraint_name()
                .is_none_or(|name| name.contains("author_id")) =>
        {
            debug!(%author, "book references a missing author");
            RepositoryError::missing_reference("author", author)
        }
        other => map_diesel_error(other),
    }
}

pub(crate) fn map_credential_diesel_error(error: DieselError) -> CredentialError {
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CredentialError::connection("database connection error")
        }
        _ => CredentialError::query("database error"),
    }
}
