//! Generic CRUD handlers shared by every catalogue collection.
//!
//! Each request is processed in a fixed order: the path identifier is parsed
//! (a non-integer is a 404), the caller is authorised, the target record is
//! checked for existence on item writes, the body is validated, and only then
//! is the gateway mutated. Bodies arrive as raw bytes so malformed JSON never
//! pre-empts the authorisation decision.

use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use crate::domain::ports::{EntityRepository, require};
use crate::domain::{AccessPolicy, Capability, Entity, EntityKind, Error, Operation, RecordId};

use super::ApiResult;
use super::auth::resolve_caller;
use super::serializers::{Serializer, parse_body};
use super::state::HttpState;

/// A collection exposed over HTTP.
pub trait Resource: 'static {
    type Entity: Entity;
    type Serializer: Serializer<Entity = Self::Entity>;

    /// The gateway holding this collection.
    fn repository(state: &HttpState) -> &dyn EntityRepository<Self::Entity>;
}

/// Parse an item path segment.
///
/// Identifiers that are not integers can never match a record, so they are
/// reported as missing rather than malformed.
///
/// # Examples
/// ```
/// use backend::domain::{EntityKind, ErrorCode, RecordId};
/// use backend::inbound::http::resource::parse_record_id;
///
/// assert_eq!(parse_record_id(EntityKind::Author, "7").ok(), Some(RecordId::new(7)));
/// let err = parse_record_id(EntityKind::Author, "seven").expect_err("not an integer");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
pub fn parse_record_id(kind: EntityKind, raw: &str) -> ApiResult<RecordId> {
    raw.parse::<i64>()
        .map(RecordId::new)
        .map_err(|_| Error::not_found(format!("{kind} {raw} not found")))
}

async fn authorize(
    state: &HttpState,
    request: &HttpRequest,
    operation: Operation,
) -> ApiResult<()> {
    if AccessPolicy::required(operation) == Capability::Public {
        return Ok(());
    }
    let caller = resolve_caller(request, state.credentials.as_ref()).await?;
    AccessPolicy::authorize(operation, &caller)
}

/// `GET /{collection}`
pub async fn list<R: Resource>(state: &HttpState) -> ApiResult<HttpResponse> {
    let records = R::repository(state).list().await?;
    Ok(HttpResponse::Ok().json(R::Serializer::render_many(&records)))
}

/// `GET /{collection}/{id}`
pub async fn retrieve<R: Resource>(state: &HttpState, raw_id: &str) -> ApiResult<HttpResponse> {
    let id = parse_record_id(<R::Entity as Entity>::KIND, raw_id)?;
    let record: R::Entity = require(R::repository(state), id).await?;
    Ok(HttpResponse::Ok().json(R::Serializer::render(&record)))
}

/// `POST /{collection}`
pub async fn create<R: Resource>(
    state: &HttpState,
    request: &HttpRequest,
    body: &[u8],
) -> ApiResult<HttpResponse> {
    authorize(state, request, Operation::Create).await?;
    let fields = R::Serializer::parse(&parse_body(body)?)?;
    let record = R::repository(state).create(fields).await?;
    let kind = <R::Entity as Entity>::KIND;
    info!(%kind, id = %record.id(), %record, "record created");
    Ok(HttpResponse::Created().json(R::Serializer::render(&record)))
}

/// `PUT /{collection}/{id}`
pub async fn update<R: Resource>(
    state: &HttpState,
    request: &HttpRequest,
    raw_id: &str,
    body: &[u8],
) -> ApiResult<HttpResponse> {
    let kind = <R::Entity as Entity>::KIND;
    let id = parse_record_id(kind, raw_id)?;
    authorize(state, request, Operation::Update).await?;
    let repository = R::repository(state);
    require::<R::Entity, _>(repository, id).await?;
    let fields = R::Serializer::parse(&parse_body(body)?)?;
    let record = repository.update(id, fields).await?;
    info!(%kind, %id, %record, "record updated");
    Ok(HttpResponse::Ok().json(R::Serializer::render(&record)))
}

/// `DELETE /{collection}/{id}`
pub async fn destroy<R: Resource>(
    state: &HttpState,
    request: &HttpRequest,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let kind = <R::Entity as Entity>::KIND;
    let id = parse_record_id(kind, raw_id)?;
    authorize(state, request, Operation::Delete).await?;
    R::repository(state).delete(id).await?;
    info!(%kind, %id, "record deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
