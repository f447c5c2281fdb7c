//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type transport-agnostic while letting handlers
//! return it directly. Repository failures are translated here so handlers
//! only ever propagate [`Error`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

pub use crate::domain::ApiResult;
use crate::domain::ports::RepositoryError;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::validation::{FieldErrorCode, ValidationErrors};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(self.redacted())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { kind, id } => {
                Error::not_found(format!("{kind} {id} not found"))
            }
            RepositoryError::MissingReference { field, id } => {
                let message = format!("invalid pk \"{id}\": object does not exist");
                ValidationErrors::single(field, FieldErrorCode::DoesNotExist, message).into()
            }
            RepositoryError::Connection { message } => {
                warn!(%message, "repository unavailable");
                Error::service_unavailable("catalogue store unavailable")
            }
            err @ (RepositoryError::Unsaved { .. } | RepositoryError::Query { .. }) => {
                error!(error = %err, "repository failure");
                Error::internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests;
