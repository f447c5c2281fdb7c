//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_service;
mod entity_repository;

#[cfg(test)]
pub use credential_service::MockCredentialService;
pub use credential_service::{CredentialError, CredentialService};
pub use entity_repository::{EntityRepository, RecordFilter, RepositoryError, require};
