//! In-process adapters backing the catalogue when no database is configured.
//!
//! [`MemoryStore`] keeps authors and books behind one lock so the foreign-key
//! check and the author-to-book cascade see a consistent view. Identifiers
//! come from per-table counters that only ever increase, so a deleted id is
//! never handed out again.

mod credentials;
mod store;

pub use credentials::MemoryCredentialService;
pub use store::MemoryStore;
