//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{EntityKind, RecordId};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("boom")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"fields": [{"field": "name", "code": "blank"}]}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no token"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("not staff"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_payloads(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());

    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "bad");
    assert_eq!(
        payload.details(),
        Some(&json!({"fields": [{"field": "name", "code": "blank"}]}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("author 3 not found");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[given("a repository that lost track of a book")]
fn a_repository_that_lost_track_of_a_book() -> RepositoryError {
    RepositoryError::not_found(EntityKind::Book, RecordId::new(12))
}

#[given("a book naming an author that does not exist")]
fn a_book_naming_an_author_that_does_not_exist() -> RepositoryError {
    RepositoryError::missing_reference("author", RecordId::new(99))
}

#[given("a repository whose connection dropped")]
fn a_repository_whose_connection_dropped() -> RepositoryError {
    RepositoryError::connection("connection reset")
}

#[when("the adapter translates the repository error")]
fn the_adapter_translates_the_repository_error(err: RepositoryError) -> Error {
    Error::from(err)
}

#[then("the client sees the expected status")]
fn the_client_sees_the_expected_status(error: Error, status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
fn missing_books_become_not_found() {
    let error = the_adapter_translates_the_repository_error(a_repository_that_lost_track_of_a_book());
    the_client_sees_the_expected_status(error.clone(), StatusCode::NOT_FOUND);
    assert_eq!(error.message(), "book 12 not found");
}

#[rstest]
fn dangling_authors_are_reported_against_the_field() {
    let error =
        the_adapter_translates_the_repository_error(a_book_naming_an_author_that_does_not_exist());
    the_client_sees_the_expected_status(error.clone(), StatusCode::BAD_REQUEST);

    let fields = error
        .details()
        .and_then(|details| details.get("fields"))
        .and_then(|fields| fields.as_array())
        .expect("field errors listed");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["field"], "author");
    assert_eq!(fields[0]["code"], "does_not_exist");
}

#[rstest]
fn dropped_connections_are_service_unavailable() {
    let error = the_adapter_translates_the_repository_error(a_repository_whose_connection_dropped());
    the_client_sees_the_expected_status(error.clone(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(!error.message().contains("connection reset"));
}

#[rstest]
#[case(RepositoryError::query("syntax error at or near"))]
#[case(RepositoryError::unsaved(EntityKind::Author))]
fn other_repository_failures_are_internal(#[case] err: RepositoryError) {
    let error = Error::from(err);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.redacted().message(), "Internal server error");
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
