//! Destructive schema (re)initialisation used by `init-db` and tests.

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::connection::{ConnectionError, Database, DbConnection};

/// Drops and recreates every table.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Errors raised while resetting the schema.
#[derive(Debug, thiserror::Error)]
pub enum InitSchemaError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("failed to apply schema: {0}")]
    Apply(#[from] diesel::result::Error),
}

/// Run the schema script on an open connection. All existing rows are lost.
pub async fn apply_schema(conn: &mut DbConnection) -> Result<(), InitSchemaError> {
    conn.batch_execute(SCHEMA_SQL).await?;
    Ok(())
}

/// Open `database` and reset its schema.
pub async fn init_schema(database: &Database) -> Result<(), InitSchemaError> {
    let mut conn = database.connect().await?;
    apply_schema(&mut conn).await?;
    info!(path = %database.path().display(), "database schema initialised");
    Ok(())
}
