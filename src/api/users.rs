//! Admin login, registration and token validation.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{ApiError, AppState};
use crate::auth::{AdminStore, AuthenticatedUser, NewAdmin};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// `POST /api/user/admin-login`
pub async fn admin_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Ok(Json(body)) = payload else {
        return Err(ApiError::Credentials("Email and password required".to_string()));
    };

    let store = AdminStore::new(state.db.clone());
    let outcome = store
        .login(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
            &state.issuer,
        )
        .await?;

    Ok(Json(json!({
        "status": 200,
        "message": "Login successful",
        "token": outcome.token,
        "user": outcome.user,
    })))
}

/// `POST /api/user/admin-register`: only an authenticated admin can add another.
pub async fn admin_register(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Ok(Json(body)) = payload else {
        return Err(ApiError::Credentials(
            "Name, email and password required".to_string(),
        ));
    };

    let store = AdminStore::new(state.db.clone());
    let user = store
        .register(NewAdmin {
            email: body.email.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            name: body.name.unwrap_or_default(),
            phone: body.phone,
        })
        .await?;

    tracing::info!(by = %caller.email, new_admin = %user.email, "Admin account created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": 201,
            "message": "Admin registered successfully",
            "user": user,
        })),
    ))
}

/// `GET /api/user/auth/validate`: echoes the verified claims.
pub async fn validate(AuthenticatedUser(claims): AuthenticatedUser) -> Json<Value> {
    Json(json!({ "valid": true, "user": claims }))
}
