//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CredentialService, EntityRepository};
use crate::domain::{Author, Book};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authors: Arc<dyn EntityRepository<Author>>,
    pub books: Arc<dyn EntityRepository<Book>>,
    pub credentials: Arc<dyn CredentialService>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        authors: Arc<dyn EntityRepository<Author>>,
        books: Arc<dyn EntityRepository<Book>>,
        credentials: Arc<dyn CredentialService>,
    ) -> Self {
        Self {
            authors,
            books,
            credentials,
        }
    }
}
