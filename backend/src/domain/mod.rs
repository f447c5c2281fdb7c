//! Domain primitives, records and ports.
//!
//! Public surface:
//! - `Author`, `Book` and their `*Fields` structs, sharing the [`Entity`]
//!   trait and the store-assigned [`RecordId`].
//! - [`RecordHandle`] for the save/delete/refresh lifecycle of a record.
//! - [`AccessPolicy`] mapping each [`Operation`] to its [`Capability`].
//! - [`Error`] and [`ErrorCode`], the transport-agnostic error payload.
//! - [`TraceId`] for request correlation.

pub mod access;
pub mod author;
pub mod book;
pub mod entity;
pub mod error;
pub mod ports;
pub mod record_handle;
pub mod trace_id;

pub use self::access::{AccessPolicy, AccessToken, Caller, Capability, Operation, Principal};
pub use self::author::{Author, AuthorFields};
pub use self::book::{Book, BookFields};
pub use self::entity::{Entity, EntityKind, RecordId, TEXT_FIELD_MAX_CHARS};
pub use self::error::{Error, ErrorCode};
pub use self::record_handle::RecordHandle;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error, ErrorCode};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::forbidden("nope"))
/// }
/// assert_eq!(lookup().map_err(|err| err.code()), Err(ErrorCode::Forbidden));
/// ```
pub type ApiResult<T> = Result<T, Error>;
