//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{post, user};

/// Row struct for reading from the user table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the post table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PostRow {
    pub id: i32,
    pub author_id: i32,
    pub created: NaiveDateTime,
    pub title: String,
    pub body: String,
}

/// Insertable post; `created` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post)]
pub(crate) struct NewPostRow<'a> {
    pub author_id: i32,
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = post)]
pub(crate) struct PostChanges<'a> {
    pub title: &'a str,
    pub body: &'a str,
}
