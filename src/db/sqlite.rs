use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use super::{PlayerRepository, StoreError, StoreResult};
use crate::models::{NewPlayer, Player};

/// `players` table behind a SQLite pool
#[derive(Debug, Clone)]
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// The only unique column a caller can write is `email`
fn map_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn find_all(&self) -> StoreResult<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players ORDER BY id"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE id = ?"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE email = ?"#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM players WHERE email = ?"#
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn insert(&self, player: NewPlayer) -> StoreResult<Player> {
        sqlx::query_as::<_, Player>(
            r#"INSERT INTO players (first_name, last_name, email, phone_number, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.email)
        .bind(&player.phone_number)
        .bind(player.created_at)
        .bind(player.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, player: &Player) -> StoreResult<Option<Player>> {
        // created_at is write-once
        sqlx::query_as::<_, Player>(
            r#"UPDATE players
               SET first_name = ?, last_name = ?, email = ?, phone_number = ?, updated_at = ?
               WHERE id = ?
               RETURNING *"#
        )
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.email)
        .bind(&player.phone_number)
        .bind(player.updated_at)
        .bind(player.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
