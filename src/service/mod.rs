//! Player directory: the create/read/update/delete rules for roster entries.
//!
//! Timestamps are stamped here rather than in the store. Email uniqueness is
//! pre-checked here for a clean answer, but the store's constraint has the
//! final word since the pre-check can race with a concurrent write.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::db::PlayerRepository;
use crate::error::ApiError;
use crate::models::{CreatePlayerRequest, NewPlayer, Player, UpdatePlayerRequest};

#[derive(Clone)]
pub struct PlayerDirectory {
    repo: Arc<dyn PlayerRepository>,
    allow_email_update: bool,
}

impl PlayerDirectory {
    pub fn new(repo: Arc<dyn PlayerRepository>) -> Self {
        Self {
            repo,
            allow_email_update: false,
        }
    }

    /// Let `update` change a player's email (still subject to uniqueness).
    pub fn with_email_updates(mut self, allow: bool) -> Self {
        self.allow_email_update = allow;
        self
    }

    pub async fn list_all(&self) -> Result<Vec<Player>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Player, ApiError> {
        self.repo.find_by_id(id).await?.ok_or(ApiError::NotFound)
    }

    pub async fn create(&self, request: CreatePlayerRequest) -> Result<Player, ApiError> {
        let request = request.normalized();
        request.validate()?;

        if self.repo.exists_by_email(&request.email).await? {
            tracing::warn!("Create rejected, email {} already registered", request.email);
            return Err(ApiError::Conflict);
        }

        let player = self.repo.insert(NewPlayer::new(request, Utc::now())).await?;
        tracing::info!("Created player {}", player.id);

        Ok(player)
    }

    pub async fn update(&self, id: i64, request: UpdatePlayerRequest) -> Result<Player, ApiError> {
        let mut request = request.normalized();
        request.validate()?;

        let mut player = self.repo.find_by_id(id).await?.ok_or(ApiError::NotFound)?;

        if let Some(email) = request.email.take() {
            if email != player.email {
                if !self.allow_email_update {
                    return Err(ApiError::Validation("email cannot be changed".to_string()));
                }
                if let Some(owner) = self.repo.find_by_email(&email).await? {
                    if owner.id != id {
                        tracing::warn!("Update of player {} rejected, email {} belongs to player {}", id, email, owner.id);
                        return Err(ApiError::Conflict);
                    }
                }
                request.email = Some(email);
            }
        }

        player.apply_update(request, Utc::now());

        let player = self.repo.update(&player).await?.ok_or(ApiError::NotFound)?;
        tracing::info!("Updated player {}", player.id);

        Ok(player)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(ApiError::NotFound);
        }
        tracing::info!("Deleted player {}", id);

        Ok(())
    }
}
