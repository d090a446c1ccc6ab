//! Post use-cases: public listing and author-only mutation.

use tracing::info;

use super::ports::{PostPersistenceError, PostRepository};
use super::{Error, Post, PostDraft, PostId, UserId};

/// Map post persistence failures to domain errors.
pub fn map_post_persistence_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => Error::service_unavailable(message),
        PostPersistenceError::Query { message } => Error::internal(message),
    }
}

/// A post whose author has been checked against the acting user.
///
/// Only [`PostService::get_owned`] produces one, so update and delete cannot
/// be reached without the ownership check.
#[derive(Debug, Clone)]
pub struct OwnedPost(Post);

impl OwnedPost {
    /// Borrow the checked post.
    #[must_use]
    pub fn post(&self) -> &Post {
        &self.0
    }

    /// Give up the ownership proof and keep the post.
    #[must_use]
    pub fn into_post(self) -> Post {
        self.0
    }
}

/// Post use-cases over a request-scoped repository.
pub struct PostService<R> {
    posts: R,
}

impl<R: PostRepository> PostService<R> {
    /// Bind the service to a repository.
    pub fn new(posts: R) -> Self {
        Self { posts }
    }

    /// Every post with its author, newest first.
    pub async fn list(&mut self) -> Result<Vec<Post>, Error> {
        self.posts.list().await.map_err(map_post_persistence_error)
    }

    /// Store a new post by `author`, stamped with the current time.
    pub async fn create(&mut self, author: UserId, draft: &PostDraft) -> Result<(), Error> {
        self.posts
            .insert(author, draft)
            .await
            .map_err(map_post_persistence_error)?;
        info!(author = %author, title = draft.title(), "post created");
        Ok(())
    }

    /// Fetch a post, optionally insisting that `require_author` wrote it.
    ///
    /// # Errors
    /// [`ErrorCode::NotFound`](super::ErrorCode::NotFound) when no row has
    /// that id; [`ErrorCode::Forbidden`](super::ErrorCode::Forbidden) when the
    /// author check fails.
    pub async fn get(&mut self, id: PostId, require_author: Option<UserId>) -> Result<Post, Error> {
        let post = self
            .posts
            .find_by_id(id)
            .await
            .map_err(map_post_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("Post id {id} doesn't exist.")))?;
        match require_author {
            Some(user) if !post.is_authored_by(user) => Err(Error::forbidden(
                "You are not allowed to modify this post.",
            )),
            _ => Ok(post),
        }
    }

    /// Fetch a post that `user` is allowed to modify.
    pub async fn get_owned(&mut self, id: PostId, user: UserId) -> Result<OwnedPost, Error> {
        self.get(id, Some(user)).await.map(OwnedPost)
    }

    /// Overwrite title and body; author and timestamp are kept.
    pub async fn update(&mut self, post: &OwnedPost, draft: &PostDraft) -> Result<(), Error> {
        let id = post.post().id();
        self.posts
            .update(id, draft)
            .await
            .map_err(map_post_persistence_error)?;
        info!(post = %id, "post updated");
        Ok(())
    }

    /// Remove the post.
    pub async fn delete(&mut self, post: OwnedPost) -> Result<(), Error> {
        let id = post.post().id();
        self.posts
            .delete(id)
            .await
            .map_err(map_post_persistence_error)?;
        info!(post = %id, "post deleted");
        Ok(())
    }
}
