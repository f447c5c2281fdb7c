//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the rendered JSON shapes and live in the inbound
//! adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Credentials are missing or invalid.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "request body failed validation")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level failures under `fields`, when validation failed.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for a rendered [`crate::domain::Author`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Author)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthorSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Ursula", max_length = 200)]
    name: String,
    #[schema(example = "Le Guin", max_length = 200)]
    surname: String,
}

/// Request body for creating or replacing an author.
#[derive(ToSchema)]
#[schema(as = AuthorInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthorInputSchema {
    #[schema(example = "Ursula", max_length = 200)]
    name: String,
    #[schema(example = "Le Guin", max_length = 200)]
    surname: String,
}

/// OpenAPI schema for a rendered [`crate::domain::Book`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Book)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Identifier of the author who wrote the book.
    #[schema(example = 1)]
    author: i64,
    #[schema(example = "The Dispossessed", max_length = 200)]
    name: String,
}

/// Request body for creating or replacing a book.
#[derive(ToSchema)]
#[schema(as = BookInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookInputSchema {
    /// Identifier of an existing author.
    #[schema(example = 1)]
    author: i64,
    #[schema(example = "The Dispossessed", max_length = 200)]
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_schema_uses_wire_names() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"), "traceId is camelCase");
        assert!(schema_json.contains("details"));
    }

    #[rstest]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    #[case(schema_to_json::<AuthorSchema>(), &["id", "name", "surname"])]
    #[case(schema_to_json::<BookSchema>(), &["id", "author", "name"])]
    fn record_schemas_list_rendered_fields(#[case] schema_json: String, #[case] fields: &[&str]) {
        for field in fields {
            assert!(schema_json.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }
}
