use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use zeba_api::auth::{AdminStore, NewAdmin};
use zeba_api::{AuthConfig, DatabaseConfig, config::DEFAULT_TOKEN_EXPIRY};

#[derive(Parser)]
#[command(name = "zeba-api")]
#[command(about = "Backend for the company website and admin back office")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,
        #[arg(long, env = "SURREALDB_URL", default_value = "memory")]
        db_url: String,
        /// HMAC secret used to sign and verify admin tokens
        #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
        jwt_secret: String,
        /// Token lifetime, e.g. 3600, 30m, 1h, 7d
        #[arg(long, env = "JWT_EXPIRES_IN", default_value = DEFAULT_TOKEN_EXPIRY)]
        jwt_expires_in: String,
    },
    /// Initialize the database
    Init {
        #[arg(long, env = "SURREALDB_URL", default_value = "memory")]
        db_url: String,
    },
    /// Create an admin account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "SURREALDB_URL", default_value = "memory")]
        db_url: String,
    },
}

fn db_config(db_url: String) -> DatabaseConfig {
    DatabaseConfig {
        url: db_url,
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(zeba_api::log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            db_url,
            jwt_secret,
            jwt_expires_in,
        } => {
            let auth_config = AuthConfig::new(jwt_secret, jwt_expires_in);
            auth_config
                .validate()
                .context("Refusing to start with invalid token configuration")?;

            let db_config = db_config(db_url);
            info!("Using database url for API server: {}", db_config.url);

            let app = zeba_api::create_app(db_config, &auth_config).await?;

            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
            info!("API server listening on http://0.0.0.0:{}", port);

            axum::serve(listener, app).await?;
        }
        Commands::Init { db_url } => {
            let db_config = db_config(db_url);
            info!("Using database url for initialization: {}", db_config.url);

            info!("Initializing database...");
            let db = zeba_api::create_connection(db_config).await?;
            zeba_api::ensure_schema(&db).await?;
            info!("Database initialized successfully");
        }
        Commands::CreateAdmin {
            email,
            name,
            phone,
            password,
            db_url,
        } => {
            let db = zeba_api::create_connection(db_config(db_url)).await?;
            zeba_api::ensure_schema(&db).await?;

            let store = AdminStore::new(db);
            let profile = match store
                .register(NewAdmin {
                    email,
                    password,
                    name,
                    phone,
                })
                .await
            {
                Ok(profile) => profile,
                Err(e) => bail!("Could not create admin: {}", e),
            };

            println!("Admin created successfully!");
            println!();
            println!("  Id:    {}", profile.id);
            println!("  Name:  {}", profile.name);
            println!("  Email: {}", profile.email);
            println!();
            println!("Admins on record: {}", store.count().await?);
        }
    }

    Ok(())
}
