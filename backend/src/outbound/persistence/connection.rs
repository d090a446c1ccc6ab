//! Per-request SQLite connections.
//!
//! There is no pool: every request opens one connection, uses it for the
//! whole request and drops it on completion. `diesel-async`'s
//! `SyncConnectionWrapper` runs the blocking SQLite calls on tokio's blocking
//! pool so queries read the same as any other async Diesel adapter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use tracing::debug;

/// Async handle to a single SQLite connection.
pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

/// Errors raised while opening or preparing a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The database file could not be opened.
    #[error("failed to open database {path}: {message}")]
    Open { path: String, message: String },

    /// Connection-level setup statements failed.
    #[error("failed to configure database connection: {message}")]
    Configure { message: String },
}

impl ConnectionError {
    /// Build a [`ConnectionError::Open`] for `path`.
    pub fn open(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a [`ConnectionError::Configure`].
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure {
            message: message.into(),
        }
    }
}

/// Location of the SQLite file plus per-connection settings.
///
/// # Example
///
/// ```ignore
/// let database = Database::new("instance/blog.sqlite")
///     .with_busy_timeout(Duration::from_secs(10));
/// let mut conn = database.connect().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    /// Defaults to a five second busy timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// How long a writer waits on SQLite's lock before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// SQLite file this database points at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory that will hold the database file.
    ///
    /// # Errors
    ///
    /// Propagates the filesystem error when the directory cannot be created.
    pub fn ensure_parent_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }

    /// Open a connection with foreign keys enforced.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Open`] when SQLite cannot open the file and
    /// [`ConnectionError::Configure`] when the pragmas fail.
    pub async fn connect(&self) -> Result<DbConnection, ConnectionError> {
        let url = self.path.to_string_lossy().into_owned();
        let mut conn = DbConnection::establish(&url)
            .await
            .map_err(|err| ConnectionError::open(url.clone(), err.to_string()))?;

        let pragmas = format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        );
        conn.batch_execute(&pragmas)
            .await
            .map_err(|err| ConnectionError::configure(err.to_string()))?;

        debug!(path = %url, "database connection opened");
        Ok(conn)
    }
}
