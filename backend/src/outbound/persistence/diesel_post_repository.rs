//! SQLite-backed `PostRepository` implementation using Diesel ORM.
//!
//! Reads always join the author's username so the domain [`Post`] is complete.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{Post, PostDraft, PostId, PostParts, UserId, Username};

use super::connection::DbConnection;
use super::diesel_error_mapping::map_basic_diesel_error;
use super::models::{NewPostRow, PostChanges, PostRow};
use super::schema::{post, user};

/// Post repository borrowing the request's connection.
pub struct DieselPostRepository<'c> {
    conn: &'c mut DbConnection,
}

impl<'c> DieselPostRepository<'c> {
    pub fn new(conn: &'c mut DbConnection) -> Self {
        Self { conn }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    map_basic_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

fn row_to_post((row, author): (PostRow, String)) -> Option<Post> {
    let author_username = match Username::new(&author) {
        Ok(name) => name,
        Err(err) => {
            warn!(post_id = row.id, error = %err, "post author failed validation");
            return None;
        }
    };
    Some(Post::new(PostParts {
        id: PostId::new(row.id),
        title: row.title,
        body: row.body,
        created: row.created,
        author_id: UserId::new(row.author_id),
        author_username,
    }))
}

#[async_trait]
impl PostRepository for DieselPostRepository<'_> {
    async fn list(&mut self) -> Result<Vec<Post>, PostPersistenceError> {
        let rows: Vec<(PostRow, String)> = post::table
            .inner_join(user::table)
            .select((PostRow::as_select(), user::username))
            .order((post::created.desc(), post::id.desc()))
            .load(self.conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().filter_map(row_to_post).collect())
    }

    async fn find_by_id(&mut self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let row: Option<(PostRow, String)> = post::table
            .inner_join(user::table)
            .filter(post::id.eq(id.get()))
            .select((PostRow::as_select(), user::username))
            .first(self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.and_then(row_to_post))
    }

    async fn insert(
        &mut self,
        author: UserId,
        draft: &PostDraft,
    ) -> Result<(), PostPersistenceError> {
        let row = NewPostRow {
            author_id: author.get(),
            title: draft.title(),
            body: draft.body(),
        };
        diesel::insert_into(post::table)
            .values(&row)
            .execute(self.conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&mut self, id: PostId, draft: &PostDraft) -> Result<(), PostPersistenceError> {
        let changes = PostChanges {
            title: draft.title(),
            body: draft.body(),
        };
        diesel::update(post::table.find(id.get()))
            .set(&changes)
            .execute(self.conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&mut self, id: PostId) -> Result<(), PostPersistenceError> {
        diesel::delete(post::table.find(id.get()))
            .execute(self.conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
