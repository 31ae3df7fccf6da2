use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routed_admin::api::{AppState, create_router};
use routed_admin::auth::{TokenService, generate_secret};
use routed_admin::db::Database;
use routed_admin::mailer::LogMailer;

#[derive(Parser, Debug)]
#[command(name = "routed-admin")]
#[command(about = "Admin backend for the routed fleet-management platform")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "ROUTED_PORT", default_value = "8080")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "ROUTED_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Path to the SQLite database file
    #[arg(short, long, env = "ROUTED_DB", default_value = "routed.db")]
    database: PathBuf,

    /// Token signing secret; generated per-process when unset
    #[arg(long, env = "ROUTED_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Base URL for password-reset links
    #[arg(
        long,
        env = "ROUTED_RESET_URL",
        default_value = "https://routed-web.wckd.pk/reset"
    )]
    reset_url: String,

    /// Enable verbose logging
    #[arg(short, long, env = "ROUTED_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "routed_admin=debug,tower_http=debug"
    } else {
        "routed_admin=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let secret = match cli.jwt_secret {
        Some(secret) => secret,
        None => {
            warn!("no signing secret configured; sessions will not survive a restart");
            generate_secret()
        }
    };

    let db = Database::new(&cli.database).await?;
    info!(path = %cli.database.display(), "database ready");

    let tokens = TokenService::new(&secret);
    let state = AppState::new(&db, tokens, Arc::new(LogMailer), cli.reset_url);
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port)
        .parse()
        .context("parsing bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    info!(%addr, "routed admin backend listening");
    axum::serve(listener, router).await.context("serving")?;

    Ok(())
}
