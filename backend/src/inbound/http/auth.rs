//! Credential extraction for HTTP handlers.
//!
//! Turns the `Authorization` header into a [`Caller`]. Two schemes are
//! accepted: `Token <key>` and `Bearer <key>`. A missing header makes the
//! caller anonymous; anything else that fails to resolve rejects it.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use tracing::{debug, warn};

use crate::domain::ports::{CredentialError, CredentialService};
use crate::domain::{AccessToken, Caller, Error};

use super::ApiResult;

const SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// What the `Authorization` header carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentedCredential {
    Absent,
    Malformed,
    Token(AccessToken),
}

/// Parse a raw `Authorization` header value.
///
/// # Examples
/// ```
/// use backend::inbound::http::auth::{PresentedCredential, parse_authorization};
///
/// assert_eq!(parse_authorization(None), PresentedCredential::Absent);
/// assert_eq!(parse_authorization(Some("Token")), PresentedCredential::Malformed);
/// assert!(matches!(
///     parse_authorization(Some("Token abc123")),
///     PresentedCredential::Token(_)
/// ));
/// ```
pub fn parse_authorization(header: Option<&str>) -> PresentedCredential {
    let Some(header) = header else {
        return PresentedCredential::Absent;
    };
    let mut parts = header.split_whitespace();
    let (Some(scheme), Some(key), None) = (parts.next(), parts.next(), parts.next()) else {
        return PresentedCredential::Malformed;
    };
    if !SCHEMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(scheme))
    {
        return PresentedCredential::Malformed;
    }
    AccessToken::parse(key).map_or(PresentedCredential::Malformed, PresentedCredential::Token)
}

fn map_credential_error(error: CredentialError) -> Error {
    warn!(%error, "credential lookup failed");
    match error {
        CredentialError::Connection { .. } => {
            Error::service_unavailable("credential store unavailable")
        }
        CredentialError::Query { .. } => Error::internal("credential lookup failed"),
    }
}

/// Resolve the caller behind a request.
///
/// # Errors
/// Only credential store failures; unknown keys yield [`Caller::Rejected`].
pub async fn resolve_caller(
    request: &HttpRequest,
    credentials: &dyn CredentialService,
) -> ApiResult<Caller> {
    let header = match request.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => match value.to_str() {
            Ok(text) => Some(text),
            Err(_) => return Ok(Caller::Rejected),
        },
    };
    let token = match parse_authorization(header) {
        PresentedCredential::Absent => return Ok(Caller::Anonymous),
        PresentedCredential::Malformed => {
            debug!("malformed authorization header");
            return Ok(Caller::Rejected);
        }
        PresentedCredential::Token(token) => token,
    };
    let principal = credentials
        .resolve(&token)
        .await
        .map_err(map_credential_error)?;
    Ok(principal.map_or(Caller::Rejected, Caller::Authenticated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCredentialService;
    use crate::domain::{ErrorCode, Principal};
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[rstest]
    #[case(None, "absent")]
    #[case(Some("Token abc"), "token")]
    #[case(Some("token abc"), "token")]
    #[case(Some("Bearer abc"), "token")]
    #[case(Some("Basic abc"), "malformed")]
    #[case(Some("Token"), "malformed")]
    #[case(Some("Token a b"), "malformed")]
    #[case(Some(""), "malformed")]
    fn header_shapes(#[case] header: Option<&str>, #[case] expected: &str) {
        let kind = match parse_authorization(header) {
            PresentedCredential::Absent => "absent",
            PresentedCredential::Malformed => "malformed",
            PresentedCredential::Token(_) => "token",
        };
        assert_eq!(kind, expected);
    }

    #[given("a credential store that knows one staff key")]
    fn a_credential_store_that_knows_one_staff_key() -> MockCredentialService {
        let mut service = MockCredentialService::new();
        service.expect_resolve().returning(|token| {
            Ok((token.expose() == "staff-key").then(|| Principal::new("admin", true)))
        });
        service
    }

    #[when("a request presents the header")]
    fn a_request_presents_the_header(header: Option<String>) -> HttpRequest {
        let mut request = TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        request.to_http_request()
    }

    #[then("the caller is resolved as expected")]
    fn the_caller_is_resolved_as_expected(result: ApiResult<Caller>, expected: Caller) {
        assert_eq!(result.expect("resolution succeeds"), expected);
    }

    #[rstest]
    #[case(None, Caller::Anonymous)]
    #[case(Some("Token staff-key"), Caller::Authenticated(Principal::new("admin", true)))]
    #[case(Some("Token unknown"), Caller::Rejected)]
    #[case(Some("Digest staff-key"), Caller::Rejected)]
    #[actix_web::test]
    async fn callers_are_resolved_from_headers(
        #[case] header: Option<&str>,
        #[case] expected: Caller,
    ) {
        let service = a_credential_store_that_knows_one_staff_key();
        let request = a_request_presents_the_header(header.map(str::to_owned));
        let result = resolve_caller(&request, &service).await;
        the_caller_is_resolved_as_expected(result, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outages_surface_as_service_unavailable() {
        let mut service = MockCredentialService::new();
        service
            .expect_resolve()
            .returning(|_| Err(CredentialError::connection("refused")));

        let request = TestRequest::default()
            .insert_header((AUTHORIZATION, "Token any"))
            .to_http_request();
        let error = resolve_caller(&request, &service)
            .await
            .expect_err("outage");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
