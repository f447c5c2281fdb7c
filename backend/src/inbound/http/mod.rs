//! HTTP inbound adapter exposing the catalogue REST endpoints.

pub mod auth;
pub mod authors;
pub mod books;
pub mod error;
pub mod health;
pub mod resource;
pub mod schemas;
pub mod serializers;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the author and book routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure_catalogue;
///
/// let _app = App::new().configure(configure_catalogue);
/// ```
pub fn configure_catalogue(config: &mut web::ServiceConfig) {
    config
        .service(authors::list_authors)
        .service(authors::create_author)
        .service(authors::get_author)
        .service(authors::update_author)
        .service(authors::delete_author)
        .service(books::list_books)
        .service(books::create_book)
        .service(books::get_book)
        .service(books::update_book)
        .service(books::delete_book);
}
