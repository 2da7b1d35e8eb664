use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Expiry used when `JWT_EXPIRES_IN` is not set.
pub const DEFAULT_TOKEN_EXPIRY: &str = "1h";

/// Errors raised while validating process configuration.
///
/// All of these are fatal at startup; none can be triggered by a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `JWT_SECRET` is unset or blank.
    MissingSecret,
    /// The expiry string could not be parsed.
    InvalidExpiry(String),
    /// The expiry parsed to zero; tokens must expire in the future.
    ZeroExpiry,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecret => write!(f, "JWT secret is not configured"),
            Self::InvalidExpiry(raw) => write!(f, "Invalid token expiry: {:?}", raw),
            Self::ZeroExpiry => write!(f, "Token expiry must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared by the issuer and the gate
    pub jwt_secret: String,
    /// Token lifetime, e.g. "1h", "7d"
    #[serde(default = "default_expiry")]
    pub jwt_expires_in: String,
}

fn default_expiry() -> String {
    DEFAULT_TOKEN_EXPIRY.to_string()
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, jwt_expires_in: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_expires_in: jwt_expires_in.into(),
        }
    }

    /// Check the secret is present and the expiry is a finite, positive duration.
    pub fn validate(&self) -> Result<Duration, ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        parse_expiry(&self.jwt_expires_in)
    }
}

/// Parse an expiry string into a duration.
///
/// Accepts a bare number of seconds or a number followed by one of
/// `s`, `m`, `h`, `d`, `w`.
pub fn parse_expiry(raw: &str) -> Result<Duration, ConfigError> {
    let trimmed = raw.trim();
    let invalid = || ConfigError::InvalidExpiry(raw.to_string());

    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);
    if digits.is_empty() {
        return Err(invalid());
    }

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    let multiplier: u64 = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return Err(invalid()),
    };

    let seconds = value.checked_mul(multiplier).ok_or_else(invalid)?;
    if seconds == 0 {
        return Err(ConfigError::ZeroExpiry);
    }
    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expiry_units() {
        assert_eq!(parse_expiry("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_expiry("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_expiry("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_expiry("7d").unwrap(), Duration::from_secs(604_800));
        assert_eq!(parse_expiry("2w").unwrap(), Duration::from_secs(1_209_600));
        assert_eq!(parse_expiry("3600").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_expiry(" 1h ").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_expiry_rejects_bad_input() {
        assert_eq!(parse_expiry("0"), Err(ConfigError::ZeroExpiry));
        assert_eq!(parse_expiry("0h"), Err(ConfigError::ZeroExpiry));
        assert!(matches!(parse_expiry(""), Err(ConfigError::InvalidExpiry(_))));
        assert!(matches!(parse_expiry("h"), Err(ConfigError::InvalidExpiry(_))));
        assert!(matches!(parse_expiry("1y"), Err(ConfigError::InvalidExpiry(_))));
        assert!(matches!(parse_expiry("-5s"), Err(ConfigError::InvalidExpiry(_))));
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = AuthConfig::new("   ", "1h");
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));

        let config = AuthConfig::new("s3cret", "7d");
        assert_eq!(config.validate().unwrap(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_auth_config_default_expiry() {
        let config: AuthConfig = serde_json::from_str(r#"{"jwt_secret":"abc"}"#).unwrap();
        assert_eq!(config.jwt_expires_in, DEFAULT_TOKEN_EXPIRY);
    }
}
