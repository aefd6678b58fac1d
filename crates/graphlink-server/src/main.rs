//! CLI entry point for the GraphLink gRPC server.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use graphlink_core::config::{config_file_present, LogFormat, LogSettings};
use graphlink_core::Settings;
use graphlink_graph::{GraphClient, GraphConfig};
use graphlink_server::{bind, serve, shutdown_signal};

#[derive(Parser)]
#[command(name = "graphlink-server")]
#[command(about = "gRPC service for social-graph operations backed by Neo4j")]
struct Cli {
    /// Config file prefix (default: config, i.e. ./config.yaml).
    #[arg(short, long, default_value = "config")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config).context("Failed to load config")?;

    init_tracing(&settings.log);
    tracing::debug!(?settings, "Configuration resolved");
    if !config_file_present(&cli.config) {
        tracing::info!(
            prefix = %cli.config,
            "Config file not found, using environment variables and defaults"
        );
    }

    let addr = settings.grpc.socket_addr()?;
    let graph = GraphClient::connect(&GraphConfig::from(&settings.neo4j))
        .await
        .context("Failed to connect to Neo4j")?;

    let result = run(graph.clone(), addr, &settings).await;
    graph.close();
    result
}

async fn run(graph: GraphClient, addr: SocketAddr, settings: &Settings) -> anyhow::Result<()> {
    let listener = bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {addr}"))?;

    serve(
        graph,
        listener,
        settings.grpc.request_timeout(),
        shutdown_signal(),
    )
    .await
    .context("Failed to serve gRPC server")
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log.format {
        LogFormat::Json => fmt().with_env_filter(filter).json().init(),
        LogFormat::Text => fmt().with_env_filter(filter).init(),
    }
}
