//! Admin authentication.
//!
//! Admins sign in with email and password and receive an HS256 JSON Web Token.
//! Protected routes sit behind [`require_auth`], which checks the
//! `Authorization: Bearer <token>` header on every request:
//!
//! - no header, or a header without the `Bearer ` prefix: `401 Unauthorized`
//! - a token that fails signature or expiry checks: `403 Forbidden`
//! - a valid token: the decoded claims are attached to the request and
//!   handlers read them through the [`AuthenticatedUser`] extractor
//!
//! Tokens are stateless. There is no server-side session or revocation list;
//! a token stays valid until its `exp` claim passes.
//!
//! ## Usage
//!
//! ```ignore
//! let config = AuthConfig::new(jwt_secret, "7d");
//! let (issuer, verifier) = auth::from_config(&config)?;
//!
//! let token = issuer.issue(&Identity {
//!     id: "admin:1".into(),
//!     name: Some("Site Admin".into()),
//!     email: "admin@example.com".into(),
//! })?;
//!
//! let claims = verifier.verify(&token)?;
//! ```

pub mod context;
pub mod middleware;
pub mod password;
pub mod token;
mod user_store;

pub use context::{AuthenticatedUser, Identity, TokenClaims};
pub use middleware::{AuthRejection, bearer_token, require_auth};
pub use token::{TokenError, TokenIssuer, TokenVerifier, from_config};
pub use user_store::{AdminStore, CredentialError, LoginOutcome, NewAdmin};
