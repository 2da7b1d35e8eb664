//! SurrealDB connection settings and schema bootstrap.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use tracing::debug;

/// Handle shared by the stores and handlers. Clones are cheap.
pub type Db = Surreal<Any>;

const DEFAULT_URL: &str = "memory";
const DEFAULT_NAMESPACE: &str = "zeba";
const DEFAULT_DATABASE: &str = "site";

/// Where the site data lives.
///
/// `url` is anything `surrealdb::engine::any` understands: `memory` for an
/// in-process store, or `ws://`, `http://`, `rocksdb://` for a real one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root credentials; both must be set for a sign-in to happen.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    /// Reads `SURREALDB_URL`, `SURREALDB_NAMESPACE`, `SURREALDB_DATABASE`,
    /// `SURREALDB_USERNAME` and `SURREALDB_PASSWORD`.
    fn default() -> Self {
        let var_or = |key: &str, fallback: &str| env::var(key).unwrap_or_else(|_| fallback.to_string());
        Self {
            url: var_or("SURREALDB_URL", DEFAULT_URL),
            namespace: var_or("SURREALDB_NAMESPACE", DEFAULT_NAMESPACE),
            database: var_or("SURREALDB_DATABASE", DEFAULT_DATABASE),
            username: env::var("SURREALDB_USERNAME").ok(),
            password: env::var("SURREALDB_PASSWORD").ok(),
        }
    }
}

impl DatabaseConfig {
    /// A fresh in-process store, ignoring the environment.
    pub fn memory() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            username: None,
            password: None,
        }
    }
}

/// Open a connection and select the site namespace and database.
pub async fn create_connection(config: DatabaseConfig) -> Result<Db> {
    let DatabaseConfig {
        url,
        namespace,
        database,
        username,
        password,
    } = config;

    let db = surrealdb::engine::any::connect(url).await?;

    if let (Some(username), Some(password)) = (username, password) {
        db.signin(Root {
            username: &username,
            password: &password,
        })
        .await?;
    }

    db.use_ns(namespace).use_db(database).await?;
    Ok(db)
}

/// Define tables, fields and indexes. Safe to run on every start.
pub async fn ensure_schema(db: &Db) -> Result<()> {
    let schema_queries = [
        // Admin credentials
        "DEFINE TABLE IF NOT EXISTS admin SCHEMALESS;
         DEFINE FIELD IF NOT EXISTS email ON TABLE admin TYPE string;
         DEFINE FIELD IF NOT EXISTS password_hash ON TABLE admin TYPE string;
         DEFINE FIELD IF NOT EXISTS name ON TABLE admin TYPE string;
         DEFINE FIELD IF NOT EXISTS phone ON TABLE admin TYPE option<string>;
         DEFINE FIELD IF NOT EXISTS created_at ON TABLE admin TYPE datetime DEFAULT time::now();
         DEFINE FIELD IF NOT EXISTS updated_at ON TABLE admin TYPE datetime VALUE time::now();
         DEFINE INDEX IF NOT EXISTS admin_email ON TABLE admin COLUMNS email UNIQUE;",

        // Job openings
        "DEFINE TABLE IF NOT EXISTS career SCHEMALESS;
         DEFINE FIELD IF NOT EXISTS title ON TABLE career TYPE string;
         DEFINE FIELD IF NOT EXISTS location ON TABLE career TYPE string;
         DEFINE FIELD IF NOT EXISTS highlights ON TABLE career TYPE array<string> DEFAULT [];
         DEFINE FIELD IF NOT EXISTS posted_on ON TABLE career TYPE datetime DEFAULT time::now();
         DEFINE FIELD IF NOT EXISTS created_at ON TABLE career TYPE datetime DEFAULT time::now();
         DEFINE FIELD IF NOT EXISTS updated_at ON TABLE career TYPE datetime VALUE time::now();",

        // Applications
        "DEFINE TABLE IF NOT EXISTS applicant SCHEMALESS;
         DEFINE FIELD IF NOT EXISTS email ON TABLE applicant TYPE string;
         DEFINE FIELD IF NOT EXISTS resume ON TABLE applicant TYPE string;
         DEFINE FIELD IF NOT EXISTS job_id ON TABLE applicant TYPE option<record<career>>;
         DEFINE FIELD IF NOT EXISTS created_at ON TABLE applicant TYPE datetime DEFAULT time::now();
         DEFINE FIELD IF NOT EXISTS updated_at ON TABLE applicant TYPE datetime VALUE time::now();",

        // Portfolio projects
        "DEFINE TABLE IF NOT EXISTS project SCHEMALESS;
         DEFINE FIELD IF NOT EXISTS title ON TABLE project TYPE string;
         DEFINE FIELD IF NOT EXISTS images ON TABLE project TYPE array<string> DEFAULT [];
         DEFINE FIELD IF NOT EXISTS features ON TABLE project TYPE array<string> DEFAULT [];
         DEFINE FIELD IF NOT EXISTS created_at ON TABLE project TYPE datetime DEFAULT time::now();
         DEFINE FIELD IF NOT EXISTS updated_at ON TABLE project TYPE datetime VALUE time::now();",

        // Tender notices
        "DEFINE TABLE IF NOT EXISTS tender SCHEMALESS;
         DEFINE FIELD IF NOT EXISTS title ON TABLE tender TYPE string;
         DEFINE FIELD IF NOT EXISTS ref_no ON TABLE tender TYPE string;
         DEFINE FIELD IF NOT EXISTS submit_by ON TABLE tender TYPE string;
         DEFINE FIELD IF NOT EXISTS documents ON TABLE tender TYPE array DEFAULT [];
         DEFINE FIELD IF NOT EXISTS created_at ON TABLE tender TYPE datetime DEFAULT time::now();
         DEFINE FIELD IF NOT EXISTS updated_at ON TABLE tender TYPE datetime VALUE time::now();",

        // Indexes for listing order and lookups
        "DEFINE INDEX IF NOT EXISTS career_created ON TABLE career COLUMNS created_at;
         DEFINE INDEX IF NOT EXISTS applicant_job ON TABLE applicant COLUMNS job_id;
         DEFINE INDEX IF NOT EXISTS project_created ON TABLE project COLUMNS created_at;
         DEFINE INDEX IF NOT EXISTS tender_created ON TABLE tender COLUMNS created_at;",
    ];

    for query in schema_queries {
        db.query(query).await?.check()?;
    }

    debug!("Database schema ensured");
    Ok(())
}
