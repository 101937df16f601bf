use anyhow::Context;
use clap::{Parser, Subcommand};
use gamehub_config::load as load_config;
use gamehub_gateway::{build_router, GatewayState};
use gamehub_runtime::{telemetry, BackendServices};
use sqlx::Row;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "gamehub-server")]
#[command(about = "GameHub user directory service (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print every user record in the directory, retired ones included
    DumpUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::DumpUsers => dump_users().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting GameHub directory");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::from_pool(
        services.db_pool.clone(),
        services.ranking_client.clone(),
        services.lookup_concurrency,
    );
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(gamehub_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("directory shut down");
    Ok(())
}

async fn dump_users() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let users = sqlx::query(
        r#"
        SELECT id, username, name, email, role, is_blocked, is_active, created_at
        FROM users
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch users")?;

    println!("=== USERS ===");
    if users.is_empty() {
        println!("No users found in database");
        return Ok(());
    }

    println!("Found {} users:", users.len());
    println!(
        "{:<26} {:<20} {:<24} {:<30} {:<7} {:<8} {:<7} {:<25}",
        "ID", "Username", "Name", "Email", "Role", "Blocked", "Active", "Created At"
    );
    println!("{}", "-".repeat(152));

    for user in users {
        let id: String = user.try_get("id")?;
        let username: String = user.try_get("username")?;
        let name: String = user.try_get("name")?;
        let email: String = user.try_get("email")?;
        let role: String = user.try_get("role")?;
        let is_blocked: bool = user.try_get("is_blocked")?;
        let is_active: bool = user.try_get("is_active")?;
        let created_at: String = user.try_get("created_at")?;

        println!(
            "{:<26} {:<20} {:<24} {:<30} {:<7} {:<8} {:<7} {:<25}",
            id, username, name, email, role, is_blocked, is_active, created_at
        );
    }

    Ok(())
}
