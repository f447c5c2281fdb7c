//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Catalogue authors.
    authors (id) {
        /// Primary key from a `BIGSERIAL` sequence; values are never reused.
        id -> Int8,
        /// Given name (max 200 characters).
        name -> Varchar,
        /// Family name (max 200 characters).
        surname -> Varchar,
    }
}

diesel::table! {
    /// Catalogue books. Rows are removed with their author (`ON DELETE CASCADE`).
    books (id) {
        id -> Int8,
        /// Foreign key to `authors.id`.
        author_id -> Int8,
        /// Title (max 200 characters).
        name -> Varchar,
    }
}

diesel::table! {
    /// Accounts that may hold access tokens.
    users (id) {
        id -> Int8,
        username -> Varchar,
        /// Grants write access to the catalogue.
        is_staff -> Bool,
    }
}

diesel::table! {
    /// One opaque token per user, looked up by key.
    auth_tokens (key) {
        key -> Varchar,
        user_id -> Int8,
    }
}

diesel::joinable!(books -> authors (author_id));
diesel::joinable!(auth_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(authors, books, users, auth_tokens);
