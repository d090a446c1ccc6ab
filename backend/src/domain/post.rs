//! Blog post data model.

use std::fmt;

use chrono::NaiveDateTime;

use super::user::{UserId, Username};

/// Validation errors returned by [`PostDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Title was missing or empty.
    #[error("Title is required.")]
    EmptyTitle,
}

/// Datastore-assigned numeric post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(i32);

impl PostId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw row identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated title and body used to create or overwrite a post.
///
/// ## Invariants
/// - `title` is non-empty; it is stored as supplied.
/// - `body` may be empty.
///
/// # Examples
/// ```
/// use blog::domain::PostDraft;
///
/// let draft = PostDraft::try_new("hi", "").expect("title present");
/// assert_eq!(draft.title(), "hi");
/// assert!(PostDraft::try_new("", "body").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
}

impl PostDraft {
    /// Validate raw form input.
    pub fn try_new(
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, PostValidationError> {
        let title = title.into();
        if title.is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        Ok(Self {
            title,
            body: body.into(),
        })
    }

    /// Post title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Post body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Persisted post joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: String,
    body: String,
    created: NaiveDateTime,
    author_id: UserId,
    author_username: Username,
}

/// Field bundle for [`Post::new`].
#[derive(Debug, Clone)]
pub struct PostParts {
    /// Row identifier.
    pub id: PostId,
    /// Title as stored.
    pub title: String,
    /// Body as stored.
    pub body: String,
    /// Creation timestamp assigned by the datastore (UTC).
    pub created: NaiveDateTime,
    /// Owning user.
    pub author_id: UserId,
    /// Owning user's name.
    pub author_username: Username,
}

impl Post {
    /// Assemble a post from persisted parts.
    #[must_use]
    pub fn new(parts: PostParts) -> Self {
        let PostParts {
            id,
            title,
            body,
            created,
            author_id,
            author_username,
        } = parts;
        Self {
            id,
            title,
            body,
            created,
            author_id,
            author_username,
        }
    }

    /// Row identifier.
    #[must_use]
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Creation timestamp (UTC).
    #[must_use]
    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    /// Owning user id.
    #[must_use]
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Owning user's name.
    #[must_use]
    pub fn author_username(&self) -> &Username {
        &self.author_username
    }

    /// Whether `user_id` is the owner of this post.
    #[must_use]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}
