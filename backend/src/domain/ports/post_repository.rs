//! Port abstraction for post persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be used.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Post storage. Every read joins the author's username.
#[async_trait]
pub trait PostRepository: Send {
    /// All posts, newest first (creation time descending, then id descending).
    async fn list(&mut self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch a single post.
    async fn find_by_id(&mut self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// Insert a post owned by `author`.
    async fn insert(&mut self, author: UserId, draft: &PostDraft)
    -> Result<(), PostPersistenceError>;

    /// Overwrite title and body in place.
    async fn update(&mut self, id: PostId, draft: &PostDraft) -> Result<(), PostPersistenceError>;

    /// Remove the post.
    async fn delete(&mut self, id: PostId) -> Result<(), PostPersistenceError>;
}
