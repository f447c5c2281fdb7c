//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::Principal;
use crate::outbound::memory::{MemoryCredentialService, MemoryStore};
use crate::test_support::memory_http_state;

pub const STAFF_TOKEN: &str = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";
pub const READER_TOKEN: &str = "c2a5b8a1c0f2431e9d1c3e3b0d07b6e0f1a2b3c4";

/// Credentials knowing one staff and one non-staff token.
pub fn test_credentials() -> MemoryCredentialService {
    MemoryCredentialService::new()
        .with_token(STAFF_TOKEN, Principal::new("admin", true))
        .with_token(READER_TOKEN, Principal::new("reader", false))
}

/// `Authorization` header value for a token.
pub fn token_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Token {token}"))
}

/// App serving every catalogue route over the given store.
pub fn catalogue_app(
    store: MemoryStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = memory_http_state(store, test_credentials());
    App::new()
        .app_data(web::Data::new(state))
        .configure(super::configure_catalogue)
}
