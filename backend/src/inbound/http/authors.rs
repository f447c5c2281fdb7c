//! Author collection endpoints.
//!
//! ```text
//! GET    /authors
//! POST   /authors       {"name":"Ursula","surname":"Le Guin"}
//! GET    /authors/{id}
//! PUT    /authors/{id}  {"name":"Ursula K.","surname":"Le Guin"}
//! DELETE /authors/{id}
//! ```
//!
//! Deleting an author also deletes every book that references it.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::Author;
use crate::domain::ports::EntityRepository;
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, Resource};
use crate::inbound::http::schemas::{AuthorInputSchema, AuthorSchema, ErrorSchema};
use crate::inbound::http::serializers::AuthorSerializer;
use crate::inbound::http::state::HttpState;

/// The `/authors` collection.
pub struct Authors;

impl Resource for Authors {
    type Entity = Author;
    type Serializer = AuthorSerializer;

    fn repository(state: &HttpState) -> &dyn EntityRepository<Author> {
        state.authors.as_ref()
    }
}

/// List every author in creation order.
#[utoipa::path(
    get,
    path = "/authors",
    responses(
        (status = 200, description = "Authors", body = [AuthorSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "listAuthors",
    security([])
)]
#[get("/authors")]
pub async fn list_authors(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    resource::list::<Authors>(&state).await
}

/// Create an author. Staff only.
#[utoipa::path(
    post,
    path = "/authors",
    request_body = AuthorInputSchema,
    responses(
        (status = 201, description = "Author created", body = AuthorSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not staff", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "createAuthor"
)]
#[post("/authors")]
pub async fn create_author(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    resource::create::<Authors>(&state, &request, &body).await
}

/// Fetch one author.
#[utoipa::path(
    get,
    path = "/authors/{id}",
    params(("id" = i64, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Author", body = AuthorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "getAuthor",
    security([])
)]
#[get("/authors/{id}")]
pub async fn get_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resource::retrieve::<Authors>(&state, &path).await
}

/// Replace every field of an author. Staff only.
#[utoipa::path(
    put,
    path = "/authors/{id}",
    params(("id" = i64, Path, description = "Author identifier")),
    request_body = AuthorInputSchema,
    responses(
        (status = 200, description = "Author updated", body = AuthorSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not staff", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "updateAuthor"
)]
#[put("/authors/{id}")]
pub async fn update_author(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    resource::update::<Authors>(&state, &request, &path, &body).await
}

/// Delete an author and its books. Staff only.
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    params(("id" = i64, Path, description = "Author identifier")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not staff", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "deleteAuthor"
)]
#[delete("/authors/{id}")]
pub async fn delete_author(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resource::destroy::<Authors>(&state, &request, &path).await
}
