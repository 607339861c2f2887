use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Roster entry as stored in the `players` table and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Overwrite the supplied fields and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does. A blank
    /// `phone_number` clears the stored number.
    pub fn apply_update(&mut self, changes: UpdatePlayerRequest, now: DateTime<Utc>) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone_number) = changes.phone_number {
            self.phone_number = (!phone_number.is_empty()).then_some(phone_number);
        }
        self.updated_at = now.max(self.updated_at);
    }
}

/// A player that has not been assigned an id yet
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPlayer {
    pub fn new(request: CreatePlayerRequest, now: DateTime<Utc>) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/players`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    #[validate(length(min = 1, message = "firstName must not be blank"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName must not be blank"))]
    pub last_name: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl CreatePlayerRequest {
    /// Trim every field; a blank phone number becomes absent.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self
                .phone_number
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        }
    }
}

/// Body of `PUT /api/players/{id}`. Only the fields present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "firstName must not be blank"))]
    pub first_name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "lastName must not be blank"))]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl UpdatePlayerRequest {
    pub fn normalized(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            first_name: trim(self.first_name),
            last_name: trim(self.last_name),
            email: trim(self.email),
            phone_number: trim(self.phone_number),
        }
    }
}
