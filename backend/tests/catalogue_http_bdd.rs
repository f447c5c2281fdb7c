//! Behavioural tests for the catalogue HTTP API.
//!
//! Each request runs on a fresh Actix system against an app wired to a
//! shared in-memory store, so steps can seed and inspect the store
//! directly between requests.

use std::cell::RefCell;

use actix_web::http::Method;
use actix_web::{App, test as actix_test, web};
use actix_web::test::TestRequest;
use backend::domain::ports::EntityRepository;
use backend::domain::{Author, AuthorFields, Book, BookFields, Entity, Principal, RecordId};
use backend::inbound::http::configure_catalogue;
use backend::outbound::memory::{MemoryCredentialService, MemoryStore};
use backend::test_support::memory_http_state;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const STAFF_TOKEN: &str = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";
const READER_TOKEN: &str = "4a1c7f0e5b2d46b8a3e9c6d1f0b7a2e5c8d3f6a9";
const UNKNOWN_TOKEN: &str = "0000000000000000000000000000000000000000";
const MISSING_AUTHOR_ID: i64 = 9_999;

struct CatalogueWorld {
    store: MemoryStore,
    token: RefCell<Option<&'static str>>,
    last_status: RefCell<Option<u16>>,
    last_body: RefCell<Value>,
    last_author: RefCell<Option<RecordId>>,
    last_book: RefCell<Option<RecordId>>,
    seeded_authors: RefCell<Vec<Author>>,
}

impl CatalogueWorld {
    fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            token: RefCell::new(None),
            last_status: RefCell::new(None),
            last_body: RefCell::new(Value::Null),
            last_author: RefCell::new(None),
            last_book: RefCell::new(None),
            seeded_authors: RefCell::new(Vec::new()),
        }
    }

    fn credentials() -> MemoryCredentialService {
        MemoryCredentialService::new()
            .with_token(STAFF_TOKEN, Principal::new("admin", true))
            .with_token(READER_TOKEN, Principal::new("reader", false))
    }

    fn send(&self, method: Method, path: &str, payload: Option<Value>) {
        let store = self.store.clone();
        let token = *self.token.borrow();
        let path = path.to_owned();
        let (status, body) = actix_rt::System::new().block_on(async move {
            let state = memory_http_state(store, Self::credentials());
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .configure(configure_catalogue),
            )
            .await;
            let mut request = TestRequest::default().method(method).uri(&path);
            if let Some(token) = token {
                request = request.insert_header(("Authorization", format!("Token {token}")));
            }
            if let Some(payload) = payload {
                request = request.set_json(payload);
            }
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let bytes = actix_test::read_body(response).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, body)
        });
        *self.last_status.borrow_mut() = Some(status);
        *self.last_body.borrow_mut() = body;
    }

    fn block_on<T>(&self, fut: impl Future<Output = T>) -> T {
        actix_rt::System::new().block_on(fut)
    }

    fn authors(&self) -> Vec<Author> {
        self.block_on(EntityRepository::<Author>::list(&self.store))
            .expect("list authors")
    }

    fn books(&self) -> Vec<Book> {
        self.block_on(EntityRepository::<Book>::list(&self.store))
            .expect("list books")
    }

    fn status(&self) -> u16 {
        self.last_status.borrow().expect("a request was sent")
    }
}

#[fixture]
fn world() -> CatalogueWorld {
    CatalogueWorld::new()
}

#[given("an empty catalogue")]
fn an_empty_catalogue(world: &CatalogueWorld) {
    assert!(world.authors().is_empty());
    assert!(world.books().is_empty());
}

#[given("the catalogue holds {count} authors")]
fn the_catalogue_holds_authors(world: &CatalogueWorld, count: usize) {
    for n in 0..count {
        let fields = AuthorFields::new(format!("test_name {n}"), format!("test_surname {n}"));
        let author = world
            .block_on(EntityRepository::<Author>::create(&world.store, fields))
            .expect("seed author");
        world.seeded_authors.borrow_mut().push(author);
    }
}

#[given("an author with one book")]
fn an_author_with_one_book(world: &CatalogueWorld) {
    let author = world
        .block_on(EntityRepository::<Author>::create(
            &world.store,
            AuthorFields::new("Octavia", "Butler"),
        ))
        .expect("seed author");
    let book = world
        .block_on(EntityRepository::<Book>::create(
            &world.store,
            BookFields::new(author.id(), "Kindred"),
        ))
        .expect("seed book");
    *world.last_author.borrow_mut() = Some(author.id());
    *world.last_book.borrow_mut() = Some(book.id());
}

#[given("the client presents the staff token")]
fn the_client_presents_the_staff_token(world: &CatalogueWorld) {
    *world.token.borrow_mut() = Some(STAFF_TOKEN);
}

#[given("the client presents the reader token")]
fn the_client_presents_the_reader_token(world: &CatalogueWorld) {
    *world.token.borrow_mut() = Some(READER_TOKEN);
}

#[given("the client presents an unknown token")]
fn the_client_presents_an_unknown_token(world: &CatalogueWorld) {
    *world.token.borrow_mut() = Some(UNKNOWN_TOKEN);
}

#[given("the client presents no token")]
fn the_client_presents_no_token(world: &CatalogueWorld) {
    *world.token.borrow_mut() = None;
}

#[when("the client creates the author {name} with surname {surname}")]
fn the_client_creates_the_author(world: &CatalogueWorld, name: String, surname: String) {
    world.send(
        Method::POST,
        "/authors",
        Some(json!({ "name": name, "surname": surname })),
    );
    let created = world.last_body.borrow().get("id").and_then(Value::as_i64);
    if let Some(id) = created {
        *world.last_author.borrow_mut() = Some(RecordId::new(id));
    }
}

#[when("the client fetches the last created author")]
fn the_client_fetches_the_last_created_author(world: &CatalogueWorld) {
    let id = world.last_author.borrow().expect("an author was created");
    world.send(Method::GET, &format!("/authors/{id}"), None);
}

#[when("the client lists authors")]
fn the_client_lists_authors(world: &CatalogueWorld) {
    world.send(Method::GET, "/authors", None);
}

#[when("the client creates a book for a missing author")]
fn the_client_creates_a_book_for_a_missing_author(world: &CatalogueWorld) {
    world.send(
        Method::POST,
        "/books",
        Some(json!({ "author": MISSING_AUTHOR_ID, "name": "Orphaned" })),
    );
}

#[when("the client deletes that author")]
fn the_client_deletes_that_author(world: &CatalogueWorld) {
    let id = world.last_author.borrow().expect("an author was seeded");
    world.send(Method::DELETE, &format!("/authors/{id}"), None);
}

#[when("the client fetches that book")]
fn the_client_fetches_that_book(world: &CatalogueWorld) {
    let id = world.last_book.borrow().expect("a book was seeded");
    world.send(Method::GET, &format!("/books/{id}"), None);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &CatalogueWorld, status: u16) {
    assert_eq!(world.status(), status, "body: {}", world.last_body.borrow());
}

#[then("the response names {name} {surname}")]
fn the_response_names(world: &CatalogueWorld, name: String, surname: String) {
    let body = world.last_body.borrow();
    assert_eq!(body["name"], name);
    assert_eq!(body["surname"], surname);
}

#[then("the listing shows the seeded authors in creation order")]
fn the_listing_shows_the_seeded_authors(world: &CatalogueWorld) {
    let body = world.last_body.borrow();
    let expected: Vec<Value> = world
        .seeded_authors
        .borrow()
        .iter()
        .map(|author| {
            json!({
                "id": author.id().get(),
                "name": author.name(),
                "surname": author.surname(),
            })
        })
        .collect();
    assert_eq!(*body, Value::Array(expected));
}

#[then("the response rejects {field} as {code}")]
fn the_response_rejects_field(world: &CatalogueWorld, field: String, code: String) {
    let body = world.last_body.borrow();
    assert_eq!(body["code"], "invalid_request");
    let fields = body["details"]["fields"]
        .as_array()
        .expect("field errors");
    assert!(
        fields
            .iter()
            .any(|entry| entry["field"] == field.as_str() && entry["code"] == code.as_str()),
        "expected {field}/{code} in {fields:?}"
    );
}

#[then("no books are stored")]
fn no_books_are_stored(world: &CatalogueWorld) {
    assert!(world.books().is_empty());
}

#[then("the catalogue holds no authors")]
fn the_catalogue_holds_no_authors(world: &CatalogueWorld) {
    assert!(world.authors().is_empty());
}

#[scenario(path = "tests/features/catalogue_http.feature")]
fn catalogue_http_scenarios(world: CatalogueWorld) {
    drop(world);
}
