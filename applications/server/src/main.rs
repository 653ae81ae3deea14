/// Soundcheck Server - music review catalog
use clap::{Parser, Subcommand};
use soundcheck_core::storage::StorageContext;
use soundcheck_server::{create_router, AppState, AuthService, ServerConfig};
use soundcheck_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundcheck-server")]
#[command(about = "Soundcheck music review catalog server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Register a user with a password
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email address used to log in
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
    /// Delete a user and every comment they wrote
    DeleteUser {
        /// Username
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "soundcheck_server=info,soundcheck_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            email,
            password,
        } => {
            add_user(&config, &username, &email, &password).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::DeleteUser { username } => {
            delete_user(&config, &username).await?;
        }
    }

    Ok(())
}

/// Connect, migrate and wrap the pool in a storage context
async fn open_store(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    let pool =
        soundcheck_storage::create_pool_with(&config.storage.database_url, &config.pool_settings())
            .await?;
    soundcheck_storage::run_migrations(&pool).await?;

    Ok(LocalStorageContext::new(pool).with_query_timeout(config.query_timeout()))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Soundcheck Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = open_store(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(config.auth.bcrypt_cost)?);
    tracing::info!("Auth service initialized (bcrypt cost {})", auth_service.cost());

    let app_state = AppState::new(Arc::new(store), auth_service);

    let app = create_router(app_state, &config.server.api_prefix, &config.cors)?;

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!(
        "Server listening on {} (API at {})",
        addr,
        config.server.api_prefix
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn add_user(
    config: &ServerConfig,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let auth_service = AuthService::new(config.auth.bcrypt_cost)?;

    let user = auth_service
        .register(&store, username, email, password)
        .await?;

    println!("Created user {} (id {})", user.username, user.id);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let users = store.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} <{}>",
            user.id,
            user.username,
            user.email.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

async fn delete_user(config: &ServerConfig, username: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let comments = store.delete_user(username).await?;

    println!("Deleted {} and {} comment(s)", username, comments);

    Ok(())
}
