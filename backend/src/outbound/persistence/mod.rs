//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! records. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module, and every database failure is mapped to a
//! port error before it leaves.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselAuthorRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/library")).await?;
//! let authors = DieselAuthorRepository::new(pool);
//! ```

mod diesel_author_repository;
mod diesel_book_repository;
mod diesel_credential_service;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod record_filter;
mod schema;

pub use diesel_author_repository::DieselAuthorRepository;
pub use diesel_book_repository::DieselBookRepository;
pub use diesel_credential_service::DieselCredentialService;
pub use migrations::{MIGRATIONS, MigrationError, apply_pending_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
