//! Diesel table definitions for the SQLite schema.
//!
//! These must match `schema.sql` exactly; `init-db` creates the tables from
//! that script.

diesel::table! {
    /// Registered accounts.
    user (id) {
        id -> Integer,
        /// Unique login name.
        username -> Text,
        /// Encoded bcrypt hash; never the plaintext.
        password -> Text,
    }
}

diesel::table! {
    /// Blog posts, each owned by one user.
    post (id) {
        id -> Integer,
        author_id -> Integer,
        /// Set by the datastore on insert.
        created -> Timestamp,
        title -> Text,
        body -> Text,
    }
}

diesel::joinable!(post -> user (author_id));
diesel::allow_tables_to_appear_in_same_query!(post, user);
