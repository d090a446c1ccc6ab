//! In-memory port implementations shared by domain unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::ports::{
    PasswordHashError, PasswordHasher, PostPersistenceError, PostRepository, UserPersistenceError,
    UserRepository,
};
use super::{
    PasswordHash, Post, PostDraft, PostId, PostParts, User, UserAccount, UserId, Username,
};

/// Hasher double that prefixes the password instead of hashing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("plain:{password}")))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str() == format!("plain:{password}"))
    }
}

#[derive(Default)]
struct UserState {
    rows: Vec<(UserId, Username, PasswordHash)>,
    failure: Option<UserPersistenceError>,
}

/// Shared in-memory account table; clones observe the same rows.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    state: Arc<Mutex<UserState>>,
}

impl InMemoryUsers {
    pub fn fail_with(&self, error: UserPersistenceError) {
        self.state.lock().expect("state lock").failure = Some(error);
    }

    pub fn count(&self, username: &str) -> usize {
        self.state
            .lock()
            .expect("state lock")
            .rows
            .iter()
            .filter(|(_, name, _)| name.as_ref() == username)
            .count()
    }

    pub fn stored_hash(&self, username: &str) -> Option<PasswordHash> {
        self.state
            .lock()
            .expect("state lock")
            .rows
            .iter()
            .find(|(_, name, _)| name.as_ref() == username)
            .map(|(_, _, hash)| hash.clone())
    }

    fn check(&self) -> Result<(), UserPersistenceError> {
        match &self.state.lock().expect("state lock").failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(
        &mut self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        self.check()?;
        let mut state = self.state.lock().expect("state lock");
        if state.rows.iter().any(|(_, name, _)| name == username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let next = i32::try_from(state.rows.len()).expect("small table") + 1;
        state
            .rows
            .push((UserId::new(next), username.clone(), password_hash.clone()));
        Ok(())
    }

    async fn find_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        self.check()?;
        let state = self.state.lock().expect("state lock");
        Ok(state
            .rows
            .iter()
            .find(|(_, name, _)| name.as_ref() == username)
            .map(|(id, name, hash)| {
                UserAccount::new(User::new(*id, name.clone()), hash.clone())
            }))
    }

    async fn find_by_id(&mut self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        let state = self.state.lock().expect("state lock");
        Ok(state
            .rows
            .iter()
            .find(|(row_id, _, _)| *row_id == id)
            .map(|(id, name, _)| User::new(*id, name.clone())))
    }
}

#[derive(Default)]
struct PostState {
    rows: Vec<Post>,
    next_id: i32,
    authors: Vec<User>,
}

/// Shared in-memory post table. Timestamps advance one minute per insert.
#[derive(Clone, Default)]
pub struct InMemoryPosts {
    state: Arc<Mutex<PostState>>,
}

impl InMemoryPosts {
    /// Register a user so inserts can join the author's name.
    pub fn with_author(self, user: &User) -> Self {
        self.state
            .lock()
            .expect("state lock")
            .authors
            .push(user.clone());
        self
    }

    pub fn snapshot(&self) -> Vec<Post> {
        self.state.lock().expect("state lock").rows.clone()
    }
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid epoch")
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn list(&mut self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut rows = self.snapshot();
        rows.sort_by(|a, b| {
            b.created()
                .cmp(&a.created())
                .then_with(|| b.id().get().cmp(&a.id().get()))
        });
        Ok(rows)
    }

    async fn find_by_id(&mut self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self.snapshot().into_iter().find(|post| post.id() == id))
    }

    async fn insert(
        &mut self,
        author: UserId,
        draft: &PostDraft,
    ) -> Result<(), PostPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let author = state
            .authors
            .iter()
            .find(|user| user.id() == author)
            .cloned()
            .ok_or_else(|| PostPersistenceError::query("FOREIGN KEY constraint failed"))?;
        state.next_id += 1;
        let id = state.next_id;
        let post = Post::new(PostParts {
            id: PostId::new(id),
            title: draft.title().to_owned(),
            body: draft.body().to_owned(),
            created: epoch() + Duration::minutes(i64::from(id)),
            author_id: author.id(),
            author_username: author.username().clone(),
        });
        state.rows.push(post);
        Ok(())
    }

    async fn update(&mut self, id: PostId, draft: &PostDraft) -> Result<(), PostPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if let Some(slot) = state.rows.iter_mut().find(|post| post.id() == id) {
            *slot = Post::new(PostParts {
                id,
                title: draft.title().to_owned(),
                body: draft.body().to_owned(),
                created: slot.created(),
                author_id: slot.author_id(),
                author_username: slot.author_username().clone(),
            });
        }
        Ok(())
    }

    async fn delete(&mut self, id: PostId) -> Result<(), PostPersistenceError> {
        self.state
            .lock()
            .expect("state lock")
            .rows
            .retain(|post| post.id() != id);
        Ok(())
    }
}
