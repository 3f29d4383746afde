// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{AuthResponse, LoginRequest, RegisterRequest, User},
    state::AppState,
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

/// Registers a new user.
///
/// The mobile number is the unique login key; a duplicate yields 409.
/// Hashes the password with Argon2 before storing it and returns 201 with
/// the user payload and a fresh token.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let existing = state.users.find(|u| u.mobile == payload.mobile).await?;
    if !existing.is_empty() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;
    let role = payload.role.unwrap_or_else(|| "student".to_string());

    let user = state
        .users
        .save(User::new(payload.name, payload.mobile, hashed_password, role))
        .await?;

    let token = sign_jwt(
        &user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            mobile: user.mobile,
            role: user.role,
            token,
        }),
    ))
}

/// Authenticates a user by mobile number and password.
///
/// Returns the user payload and a signed token, or 401 when either the
/// account is unknown or the password does not verify.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = state
        .users
        .find(|u| u.mobile == payload.mobile)
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::AuthError("Invalid mobile or password".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;
    if !is_valid {
        return Err(AppError::AuthError("Invalid mobile or password".to_string()));
    }

    let token = sign_jwt(
        &user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        mobile: user.mobile,
        role: user.role,
        token,
    }))
}
