mod app;
mod config;
mod controller;
mod handlers;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use listenfd::ListenFd;
use productstore_core::{product::Product, storage::ProductRepository};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    state::AppState,
    storage::{
        check_tables, dynamodb::create_client, ensure_table, DynamoDbRepository,
        DynamoDbTableAdmin, InMemoryRepository, InMemoryTableAdmin, TableAdmin,
    },
};

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageKind {
    /// AWS DynamoDB (or DynamoDB Local via AWS_ENDPOINT_URL)
    Dynamodb,
    /// Process-local store, lost on exit
    Memory,
}

/// Productstore - CRUD service for marketplace activity records
#[derive(Parser, Debug)]
#[command(name = "productstore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = StorageKind::Dynamodb, env = "STORAGE")]
    storage: StorageKind,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "productstore=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let repo: Arc<dyn ProductRepository> = match cli.storage {
        StorageKind::Dynamodb => {
            tracing::info!(
                table = %config.table_name,
                region = %config.aws_region,
                endpoint = ?config.aws_endpoint_url,
                "Using DynamoDB storage"
            );
            let client = create_client(&config).await;
            provision(&DynamoDbTableAdmin::new(client.clone()), &config).await?;
            Arc::new(
                DynamoDbRepository::new(client, config.table_name.clone())
                    .with_health_timeout(config.health_timeout()),
            )
        }
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage");
            provision(&InMemoryTableAdmin::new(), &config).await?;
            Arc::new(InMemoryRepository::new())
        }
    };

    let state = AppState::new(repo).with_request_timeout(config.request_timeout());
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ensures the product table exists and is active, then lists the visible tables.
///
/// A provisioning failure aborts startup. The table listing is informational only.
async fn provision(admin: &dyn TableAdmin, config: &Config) -> Result<()> {
    let descriptor = Product::table_descriptor().with_table_name(&config.table_name);

    ensure_table(admin, &descriptor, &config.poll_policy())
        .await
        .with_context(|| format!("failed to provision table '{}'", descriptor.table_name))?;

    if let Err(e) = check_tables(admin).await {
        tracing::warn!(error = %e, "Failed to list tables");
    }

    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
