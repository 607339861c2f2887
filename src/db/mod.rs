use std::str::FromStr;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::{NewPlayer, Player};

mod memory;
mod sqlite;

pub use memory::InMemoryPlayerRepository;
pub use sqlite::SqlitePlayerRepository;

pub static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The write would give two players the same email.
    #[error("email already belongs to another player")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage capabilities the player directory relies on.
///
/// Implementations must enforce email uniqueness atomically and report a
/// violation as [`StoreError::DuplicateEmail`].
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Player>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Player>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Player>>;

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Persist a new player and return it with its generated id.
    async fn insert(&self, player: NewPlayer) -> StoreResult<Player>;

    /// Overwrite the stored row with the same id. `None` if no such row.
    async fn update(&self, player: &Player) -> StoreResult<Option<Player>>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> StoreResult<bool>;
}

/// Open a pool for `database_url` and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Every connection to `:memory:` gets its own database, so keep exactly one alive
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
