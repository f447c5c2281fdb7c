//! Book collection endpoints.
//!
//! ```text
//! GET    /books
//! POST   /books       {"author":1,"name":"The Dispossessed"}
//! GET    /books/{id}
//! PUT    /books/{id}  {"author":1,"name":"The Lathe of Heaven"}
//! DELETE /books/{id}
//! ```
//!
//! `author` must name an existing author; a dangling identifier is a 400
//! reported against the `author` field.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::Book;
use crate::domain::ports::EntityRepository;
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, Resource};
use crate::inbound::http::schemas::{BookInputSchema, BookSchema, ErrorSchema};
use crate::inbound::http::serializers::BookSerializer;
use crate::inbound::http::state::HttpState;

/// The `/books` collection.
pub struct Books;

impl Resource for Books {
    type Entity = Book;
    type Serializer = BookSerializer;

    fn repository(state: &HttpState) -> &dyn EntityRepository<Book> {
        state.books.as_ref()
    }
}

/// List every book in creation order.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "Books", body = [BookSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks",
    security([])
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    resource::list::<Books>(&state).await
}

/// Create a book. Staff only.
#[utoipa::path(
    post,
    path = "/books",
    request_body = BookInputSchema,
    responses(
        (status = 201, description = "Book created", body = BookSchema),
        (status = 400, description = "Invalid request or unknown author", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not staff", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    resource::create::<Books>(&state, &request, &body).await
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book", body = BookSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook",
    security([])
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resource::retrieve::<Books>(&state, &path).await
}

/// Replace every field of a book. Staff only.
#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book identifier")),
    request_body = BookInputSchema,
    responses(
        (status = 200, description = "Book updated", body = BookSchema),
        (status = 400, description = "Invalid request or unknown author", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not staff", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    resource::update::<Books>(&state, &request, &path, &body).await
}

/// Delete a book. Staff only.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not staff", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resource::destroy::<Books>(&state, &request, &path).await
}
