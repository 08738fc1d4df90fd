//! CLI entry point for the lending graph API server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use lending_api::{router, ApiConfig, AppState};
use lending_core::GraphSource;
use lending_graph::{GraphClient, MemoryGraph};

#[derive(Parser)]
#[command(name = "lending-api")]
#[command(about = "Direct lending relationship graph API")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: lending).
    #[arg(short, long, default_value = "lending", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Use the built-in demo dataset instead of Neo4j.
        #[arg(long)]
        in_memory: bool,
    },
    /// Clear the database and load the demo dataset.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let config = ApiConfig::load(&cli.config)?;

    match cli.command {
        Command::Serve { in_memory } => {
            let source: Arc<dyn GraphSource> = if in_memory {
                tracing::info!("Using in-memory demo graph");
                Arc::new(MemoryGraph::demo()?)
            } else {
                Arc::new(GraphClient::connect(&config.neo4j).await?)
            };

            let app = router(AppState::new(source), config.server.static_dir.as_deref());
            let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
            tracing::info!(bind = %config.server.bind, "Listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            tracing::info!("Server stopped");
        }
        Command::Seed => {
            let graph = GraphClient::connect(&config.neo4j).await?;
            let report = graph.seed().await?;
            println!(
                "Seeded {} nodes and {} relationships",
                report.nodes, report.relationships
            );
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
