//! Port wiring for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use backend::domain::Principal;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{MemoryCredentialService, MemoryStore};
use backend::outbound::persistence::{
    DbPool, DieselAuthorRepository, DieselBookRepository, DieselCredentialService,
};

use super::ServerConfig;

const DEV_STAFF_USERNAME: &str = "dev-staff";

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::new(
        Arc::new(DieselAuthorRepository::new(pool.clone())),
        Arc::new(DieselBookRepository::new(pool.clone())),
        Arc::new(DieselCredentialService::new(pool.clone())),
    )
}

/// Both collections share one store so cascades and reference checks see
/// the same data.
fn memory_state(credentials: MemoryCredentialService) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::new(store.clone(), store, Arc::new(credentials))
}

fn memory_credentials(dev_staff_token: Option<&str>) -> MemoryCredentialService {
    match dev_staff_token {
        Some(token) => {
            warn!("seeding in-memory credentials with a development staff token");
            MemoryCredentialService::new()
                .with_token(token, Principal::new(DEV_STAFF_USERNAME, true))
        }
        None => MemoryCredentialService::new(),
    }
}

/// Choose Diesel adapters when a pool is configured, otherwise the in-memory
/// store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            if config.dev_staff_token.is_some() {
                warn!("ignoring development staff token; credentials come from the database");
            }
            diesel_state(pool)
        }
        None => {
            info!("no database configured; using the in-memory catalogue");
            memory_state(memory_credentials(config.dev_staff_token.as_deref()))
        }
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::domain::AccessToken;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn dev_token_resolves_to_staff() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("address"))
            .with_dev_staff_token(Some("letmein".to_owned()));
        let state = build_http_state(&config);

        let token = AccessToken::parse("letmein").expect("valid token");
        let principal = state
            .credentials
            .resolve(&token)
            .await
            .expect("lookup succeeds")
            .expect("token known");
        assert!(principal.is_staff());
        assert_eq!(principal.username(), DEV_STAFF_USERNAME);
    }

    #[rstest]
    #[tokio::test]
    async fn without_a_dev_token_nobody_can_write() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("address"));
        let state = build_http_state(&config);

        let token = AccessToken::parse("letmein").expect("valid token");
        let principal = state.credentials.resolve(&token).await.expect("lookup succeeds");
        assert!(principal.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_collections_share_one_store() {
        use backend::domain::{AuthorFields, BookFields, Entity};

        let state = build_http_state(&ServerConfig::new("127.0.0.1:0".parse().expect("address")));
        let author = state
            .authors
            .create(AuthorFields::new("Octavia", "Butler"))
            .await
            .expect("author stored");
        let book = state
            .books
            .create(BookFields::new(author.id(), "Kindred"))
            .await
            .expect("book sees the author");
        assert_eq!(book.author_id(), author.id());
    }
}
