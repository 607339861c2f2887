use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{PlayerRepository, StoreError, StoreResult};
use crate::models::{NewPlayer, Player};

/// Process-local store keyed by id. Ids count up from 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryPlayerRepository {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    players: BTreeMap<i64, Player>,
}

impl State {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.players
            .values()
            .any(|p| p.email == email && Some(p.id) != except_id)
    }
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn find_all(&self) -> StoreResult<Vec<Player>> {
        let state = self.state.lock().await;
        Ok(state.players.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Player>> {
        let state = self.state.lock().await;
        Ok(state.players.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Player>> {
        let state = self.state.lock().await;
        Ok(state.players.values().find(|p| p.email == email).cloned())
    }

    async fn insert(&self, player: NewPlayer) -> StoreResult<Player> {
        let mut state = self.state.lock().await;
        if state.email_taken(&player.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        state.last_id += 1;
        let stored = Player {
            id: state.last_id,
            first_name: player.first_name,
            last_name: player.last_name,
            email: player.email,
            phone_number: player.phone_number,
            created_at: player.created_at,
            updated_at: player.updated_at,
        };
        state.players.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, player: &Player) -> StoreResult<Option<Player>> {
        let mut state = self.state.lock().await;
        if !state.players.contains_key(&player.id) {
            return Ok(None);
        }
        if state.email_taken(&player.email, Some(player.id)) {
            return Err(StoreError::DuplicateEmail);
        }

        let Some(stored) = state.players.get_mut(&player.id) else {
            return Ok(None);
        };
        stored.first_name = player.first_name.clone();
        stored.last_name = player.last_name.clone();
        stored.email = player.email.clone();
        stored.phone_number = player.phone_number.clone();
        stored.updated_at = player.updated_at;

        Ok(Some(stored.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.players.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_player(email: &str) -> NewPlayer {
        let now = Utc::now();
        NewPlayer {
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: email.to_string(),
            phone_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn ids_keep_counting_after_delete() {
        let repo = InMemoryPlayerRepository::new();
        let ana = repo.insert(new_player("ana@example.com")).await.unwrap();
        assert_eq!(ana.id, 1);

        assert!(repo.delete_by_id(1).await.unwrap());
        let bia = repo.insert(new_player("bia@example.com")).await.unwrap();
        assert_eq!(bia.id, 2);
        assert_eq!(repo.find_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn uniqueness_holds_on_insert_and_update() {
        let repo = InMemoryPlayerRepository::new();
        repo.insert(new_player("ana@example.com")).await.unwrap();
        let mut bia = repo.insert(new_player("bia@example.com")).await.unwrap();

        assert!(matches!(
            repo.insert(new_player("ana@example.com")).await,
            Err(StoreError::DuplicateEmail)
        ));

        bia.email = "ana@example.com".to_string();
        assert!(matches!(repo.update(&bia).await, Err(StoreError::DuplicateEmail)));

        // Re-saving a player with its own email is fine
        bia.email = "bia@example.com".to_string();
        assert!(repo.update(&bia).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let repo = InMemoryPlayerRepository::new();
        let ghost = Player {
            id: 42,
            first_name: "Ghost".to_string(),
            last_name: "Player".to_string(),
            email: "ghost@example.com".to_string(),
            phone_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(repo.update(&ghost).await.unwrap(), None);
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
