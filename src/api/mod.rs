// REST API endpoints for the website and the admin back office

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, get, post, put},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{TokenIssuer, TokenVerifier, require_auth};
use crate::db::Db;

pub mod careers;
pub mod error;
pub mod projects;
pub mod tenders;
pub mod users;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: Db, issuer: TokenIssuer, verifier: TokenVerifier) -> Self {
        Self {
            db,
            issuer: Arc::new(issuer),
            verifier: Arc::new(verifier),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/api/user/admin-login", post(users::admin_login))
        .route("/api/career/all-job", get(careers::list_jobs))
        .route("/api/career/apply/{id}", post(careers::apply))
        .route("/api/career/talent-pool", post(careers::talent_pool))
        .route("/api/project/all-project", get(projects::list_projects))
        .route("/api/tender/all-tender", get(tenders::list_tenders));

    let protected = Router::new()
        .route("/api/user/admin-register", post(users::admin_register))
        .route("/api/user/auth/validate", get(users::validate))
        .route("/api/career/create-job", post(careers::create_job))
        .route("/api/career/update-job/{id}", put(careers::update_job))
        .route("/api/career/delete-job/{id}", delete(careers::delete_job))
        .route("/api/career/applications", get(careers::list_applications))
        .route("/api/career/applications/{id}", put(careers::update_application))
        .route("/api/project/create-project", post(projects::create_project))
        .route("/api/project/{id}/update-status", post(projects::update_status))
        .route("/api/project/update/{id}", put(projects::update_project))
        .route(
            "/api/admin/tenders",
            get(tenders::list_tenders).post(tenders::create_tender),
        )
        .route(
            "/api/admin/tenders/{id}",
            put(tenders::update_tender).delete(tenders::delete_tender),
        )
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Trim a required field, failing with `"<field> is required"` when blank.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{} is required", field)))
}

/// Trim an optional field, treating blank as absent.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_optional_trim() {
        assert_eq!(required(Some("  Pune ".into()), "location").unwrap(), "Pune");
        assert!(matches!(
            required(Some("   ".into()), "location"),
            Err(ApiError::Validation(msg)) if msg == "location is required"
        ));
        assert!(required(None, "title").is_err());
        assert_eq!(optional(Some(" ".into())), None);
        assert_eq!(optional(Some(" x ".into())), Some("x".to_string()));
    }
}
