//! Admin credential storage: registration and password login.

use std::fmt;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::auth::context::Identity;
use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::token::TokenIssuer;
use crate::db::Db;
use crate::db::schema::{AdminCreate, AdminRecord};
use crate::model::AdminProfile;
use crate::types::EmailAddress;

/// Registration and login failures.
#[derive(Debug, Clone)]
pub enum CredentialError {
    /// Required fields were blank; carries the client-facing message.
    MissingFields(&'static str),
    /// An admin with this email already exists
    AlreadyExists,
    /// Unknown email or wrong password
    InvalidCredentials,
    /// Storage, hashing or signing failed
    Internal(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(msg) => write!(f, "{}", msg),
            Self::AlreadyExists => write!(f, "User already exists"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialError {}

impl From<anyhow::Error> for CredentialError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Hash compared against when the email is unknown, so both login failures
/// cost one bcrypt verify.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> anyhow::Result<&'static str> {
    let hash = DUMMY_HASH
        .get_or_try_init(|| hash_password_blocking("zeba-unknown-account".to_string()))
        .await?;
    Ok(hash.as_str())
}

/// Input for creating an admin.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: AdminProfile,
}

/// Admin store for database operations.
pub struct AdminStore {
    db: Db,
}

impl AdminStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Register a new admin with a bcrypt-hashed password.
    pub async fn register(&self, new: NewAdmin) -> Result<AdminProfile, CredentialError> {
        const REQUIRED: &str = "Name, email and password required";

        let name = new.name.trim().to_string();
        let email = EmailAddress::parse(&new.email).ok_or(CredentialError::MissingFields(REQUIRED))?;
        if name.is_empty() || new.password.is_empty() {
            return Err(CredentialError::MissingFields(REQUIRED));
        }

        if self.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Registration rejected: email already registered");
            return Err(CredentialError::AlreadyExists);
        }

        let password_hash = hash_password_blocking(new.password).await?;

        let create = AdminCreate {
            email: email.as_str().to_string(),
            password_hash,
            name,
            phone: new
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        };

        let mut res = self
            .db
            .query("CREATE admin CONTENT $data")
            .bind(("data", create))
            .await
            .map_err(anyhow::Error::from)?;

        // A concurrent registration can win between the lookup above and this
        // insert; the unique email index then rejects ours.
        let created: Vec<AdminRecord> = match res.take(0) {
            Ok(created) => created,
            Err(e) => {
                if self.find_by_email(&email).await?.is_some() {
                    warn!(email = %email, "Registration rejected: email registered concurrently");
                    return Err(CredentialError::AlreadyExists);
                }
                return Err(CredentialError::Internal(e.to_string()));
            }
        };
        let admin = created
            .into_iter()
            .next()
            .ok_or_else(|| CredentialError::Internal("Failed to create admin".to_string()))?;

        info!(email = %admin.email, "Admin registered");
        Ok(AdminProfile::from(&admin))
    }

    /// Verify email and password, then issue a token for the admin.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        issuer: &TokenIssuer,
    ) -> Result<LoginOutcome, CredentialError> {
        const REQUIRED: &str = "Email and password required";

        let email = EmailAddress::parse(email).ok_or(CredentialError::MissingFields(REQUIRED))?;
        if password.is_empty() {
            return Err(CredentialError::MissingFields(REQUIRED));
        }

        let Some(admin) = self.find_by_email(&email).await? else {
            verify_password_blocking(password.to_string(), dummy_hash().await?.to_string()).await?;
            warn!(email = %email, "Login failed: unknown email");
            return Err(CredentialError::InvalidCredentials);
        };

        let matches =
            verify_password_blocking(password.to_string(), admin.password_hash.clone()).await?;
        if !matches {
            warn!(email = %email, "Login failed: wrong password");
            return Err(CredentialError::InvalidCredentials);
        }

        let user = AdminProfile::from(&admin);
        let token = issuer
            .issue(&Identity::from(&user))
            .map_err(|e| CredentialError::Internal(e.to_string()))?;

        info!(email = %email, "Admin logged in");
        Ok(LoginOutcome { token, user })
    }

    /// Get an admin by normalised email.
    pub async fn find_by_email(&self, email: &EmailAddress) -> anyhow::Result<Option<AdminRecord>> {
        let mut res = self
            .db
            .query("SELECT * FROM admin WHERE email = $email LIMIT 1")
            .bind(("email", email.as_str().to_string()))
            .await?;

        let admins: Vec<AdminRecord> = res.take(0)?;
        Ok(admins.into_iter().next())
    }

    /// Number of registered admins.
    pub async fn count(&self) -> anyhow::Result<usize> {
        let mut res = self
            .db
            .query("RETURN count(SELECT id FROM admin)")
            .await?;

        let total: Option<usize> = res.take(0)?;
        Ok(total.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::TokenVerifier;
    use crate::db::{DatabaseConfig, create_connection, ensure_schema};
    use std::time::Duration;

    async fn setup_store() -> AdminStore {
        let db = create_connection(DatabaseConfig::memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();
        AdminStore::new(db)
    }

    fn new_admin(email: &str) -> NewAdmin {
        NewAdmin {
            email: email.to_string(),
            password: "hunter22".to_string(),
            name: "Site Admin".to_string(),
            phone: Some("  ".to_string()),
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::from_secs(3600)).unwrap()
    }

    #[tokio::test]
    async fn test_register_normalises_email() {
        let store = setup_store().await;
        let profile = store.register(new_admin("  Admin@Zeba.com ")).await.unwrap();

        assert_eq!(profile.email, "admin@zeba.com");
        assert_eq!(profile.name, "Site Admin");

        let email = EmailAddress::parse("ADMIN@zeba.com").unwrap();
        let stored = store.find_by_email(&email).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "hunter22");
        assert!(stored.phone.is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_case_insensitive() {
        let store = setup_store().await;
        store.register(new_admin("admin@zeba.com")).await.unwrap();

        let result = store.register(new_admin("ADMIN@ZEBA.COM")).await;
        assert!(matches!(result, Err(CredentialError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration_reports_conflict() {
        let store = setup_store().await;

        let (first, second) = tokio::join!(
            store.register(new_admin("race@zeba.com")),
            store.register(new_admin("race@zeba.com")),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(CredentialError::AlreadyExists)))
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dummy_hash_is_stable_and_rejects_passwords() {
        let first = dummy_hash().await.unwrap();
        let second = dummy_hash().await.unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("$2"));
        assert!(!verify_password_blocking("hunter22".to_string(), first.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let store = setup_store().await;
        let mut admin = new_admin("admin@zeba.com");
        admin.name = "  ".to_string();

        let result = store.register(admin).await;
        assert!(matches!(result, Err(CredentialError::MissingFields(_))));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let store = setup_store().await;
        let profile = store.register(new_admin("admin@zeba.com")).await.unwrap();

        let outcome = store
            .login("Admin@Zeba.com", "hunter22", &issuer())
            .await
            .unwrap();
        assert_eq!(outcome.user.id, profile.id);

        let claims = TokenVerifier::new("test-secret")
            .unwrap()
            .verify(&outcome.token)
            .unwrap();
        assert_eq!(claims.id, profile.id);
        assert_eq!(claims.email, "admin@zeba.com");
        assert_eq!(claims.name.as_deref(), Some("Site Admin"));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = setup_store().await;
        store.register(new_admin("admin@zeba.com")).await.unwrap();

        let wrong_password = store.login("admin@zeba.com", "nope", &issuer()).await;
        let unknown_email = store.login("ghost@zeba.com", "hunter22", &issuer()).await;

        let a = wrong_password.unwrap_err();
        let b = unknown_email.unwrap_err();
        assert!(matches!(a, CredentialError::InvalidCredentials));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let store = setup_store().await;
        let result = store.login("", "pw", &issuer()).await;
        assert!(matches!(result, Err(CredentialError::MissingFields(_))));
    }
}
