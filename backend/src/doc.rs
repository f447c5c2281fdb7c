//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the catalogue and health endpoints, the schema
//! wrappers from [`crate::inbound::http::schemas`], and the token security
//! scheme used by write operations. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{
    AuthorInputSchema, AuthorSchema, BookInputSchema, BookSchema, ErrorCodeSchema, ErrorSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the `Authorization: Token <key>` scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenAuth",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Staff access token sent as `Token <key>` or `Bearer <key>`.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Library catalogue API",
        description = "Authors and books. Reads are public; writes need a staff token."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenAuth" = [])),
    paths(
        crate::inbound::http::authors::list_authors,
        crate::inbound::http::authors::create_author,
        crate::inbound::http::authors::get_author,
        crate::inbound::http::authors::update_author,
        crate::inbound::http::authors::delete_author,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AuthorSchema,
        AuthorInputSchema,
        BookSchema,
        BookInputSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "authors", description = "Author records"),
        (name = "books", description = "Book records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
