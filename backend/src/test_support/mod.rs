//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`; only
//! compiled for tests or with the `test-support` feature.
//!
//! - [`factories`] build unsaved and persisted records from explicit configs.
//! - [`contracts`] holds the generic CRUD checks, and
//!   [`crud_contract_suite!`](crate::crud_contract_suite) stamps them out
//!   per entity.

pub mod contracts;
pub mod factories;

use std::sync::Arc;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{MemoryCredentialService, MemoryStore};
use factories::{AuthorFactory, AuthorFactoryConfig, BookFactory, BookFactoryConfig};

/// HTTP state with both collections backed by `store`.
///
/// # Examples
/// ```
/// use backend::domain::Principal;
/// use backend::outbound::memory::{MemoryCredentialService, MemoryStore};
/// use backend::test_support::memory_http_state;
///
/// let credentials = MemoryCredentialService::new()
///     .with_token("staff-key", Principal::new("admin", true));
/// let state = memory_http_state(MemoryStore::new(), credentials);
/// let _authors = state.authors.clone();
/// ```
pub fn memory_http_state(store: MemoryStore, credentials: MemoryCredentialService) -> HttpState {
    let store = Arc::new(store);
    HttpState::new(store.clone(), store, Arc::new(credentials))
}

/// Author factory over a fresh in-memory store.
pub fn memory_author_factory() -> AuthorFactory {
    AuthorFactory::new(Arc::new(MemoryStore::new()), AuthorFactoryConfig::default())
}

/// Book factory over a fresh in-memory store; authors land in the same store.
pub fn memory_book_factory() -> BookFactory {
    let store = Arc::new(MemoryStore::new());
    BookFactory::new(
        store.clone(),
        AuthorFactory::new(store, AuthorFactoryConfig::default()),
        BookFactoryConfig::default(),
    )
}

/// Generate one `#[tokio::test]` per contract check for an entity.
///
/// `factory` is an async expression evaluated inside each test yielding
/// `Option<F>`; `None` skips the test, which lets suites that need an
/// external database bow out when none is configured.
///
/// ```ignore
/// backend::crud_contract_suite! {
///     entity = backend::domain::Author,
///     serializer = backend::inbound::http::serializers::AuthorSerializer,
///     factory = async { Some(backend::test_support::memory_author_factory()) },
/// }
/// ```
#[macro_export]
macro_rules! crud_contract_suite {
    (
        entity = $entity:ty,
        serializer = $serializer:ty,
        factory = $factory:expr $(,)?
    ) => {
        $crate::crud_contract_suite!(@checks $entity, $serializer, $factory;
            lifecycle::saves_new_instance,
            lifecycle::saves_updates,
            lifecycle::deletes_instance,
            gateway::creates_from_fields,
            gateway::updates_filtered_records,
            gateway::deletes_filtered_records,
        );
        $crate::crud_contract_suite!(@serializer_checks $entity, $serializer, $factory;
            serializer::renders_declared_fields,
            serializer::renders_sequence,
            serializer::parses_and_saves_new_instance,
            serializer::parses_and_updates_existing_instance,
        );
    };
    (@checks $entity:ty, $serializer:ty, $factory:expr; $($suite:ident :: $check:ident),+ $(,)?) => {
        $(
            #[tokio::test]
            async fn $check() {
                let Some(factory) = $factory.await else {
                    return;
                };
                if let Err(failure) =
                    $crate::test_support::contracts::$suite::$check::<$entity, _>(&factory).await
                {
                    panic!("{failure}");
                }
            }
        )+
    };
    (@serializer_checks $entity:ty, $serializer:ty, $factory:expr; $($suite:ident :: $check:ident),+ $(,)?) => {
        $(
            #[tokio::test]
            async fn $check() {
                let Some(factory) = $factory.await else {
                    return;
                };
                if let Err(failure) = $crate::test_support::contracts::$suite::$check::<
                    $entity,
                    _,
                    $serializer,
                >(&factory)
                .await
                {
                    panic!("{failure}");
                }
            }
        )+
    };
}
