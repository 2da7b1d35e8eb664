// Core modules
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod model;
pub mod types;

// Re-export key types and functions
pub use api::{AppState, create_router};
pub use auth::{TokenIssuer, TokenVerifier};
pub use config::{AuthConfig, ConfigError};
pub use db::{DatabaseConfig, Db, create_connection, ensure_schema};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

/// Log directives used when `RUST_LOG` is unset or blank.
pub const DEFAULT_LOG_DIRECTIVES: &str = "zeba_api=info,tower_http=info";

/// Build the log filter from a `RUST_LOG` value, falling back to
/// [`DEFAULT_LOG_DIRECTIVES`].
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::builder().parse_lossy(directives),
        None => EnvFilter::new(DEFAULT_LOG_DIRECTIVES),
    }
}

/// Connect to the database, apply the schema and build the HTTP router.
///
/// Token configuration is validated before anything touches the database, so a
/// missing secret or an unparseable expiry fails here rather than on the first
/// login.
pub async fn create_app(db_config: DatabaseConfig, auth_config: &AuthConfig) -> Result<Router> {
    let (issuer, verifier) = auth::from_config(auth_config)?;
    tracing::info!("Admin tokens expire after {}s", issuer.expiry().as_secs());

    let db = create_connection(db_config).await?;
    ensure_schema(&db).await?;

    Ok(create_router(AppState::new(db, issuer, verifier)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(
            log_filter(Some("zeba_api=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(log_filter(Some("trace")).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
