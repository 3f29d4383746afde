// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Entity;

/// An account in the 'users' collection. The mobile number is the unique
/// login key.
///
/// Serialized in full (argon2 hash included) because the same shape is
/// the persistence format; handlers respond with `AuthResponse` instead
/// of this struct, so the hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub mobile: String,
    /// Argon2 password hash.
    pub password: String,
    /// 'student' or 'admin'.
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, mobile: String, password_hash: String, role: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            mobile,
            password: password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// DTO for registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name length must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(length(
        min = 10,
        max = 15,
        message = "Mobile number must be between 10 and 15 characters."
    ))]
    pub mobile: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
    /// Defaults to 'student' when omitted.
    pub role: Option<String>,
}

/// DTO for login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 15))]
    pub mobile: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// The authenticated-user payload returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub role: String,
    pub token: String,
}
