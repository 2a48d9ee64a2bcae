//! DFIR-IRIS MCP Server - Binary entry point
//!
//! Reads connection settings from the environment and serves MCP over stdio.
//! Stdout carries protocol messages only; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use dfir_iris_core::{Config, IrisClient};
use dfir_iris_mcp::MCPServer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dfir-iris-mcp")]
#[command(about = "DFIR-IRIS MCP Server - Case management tools for MCP clients", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = Config::load().context("Failed to load DFIR-IRIS configuration")?;
    tracing::info!("Starting DFIR-IRIS MCP Server");
    tracing::info!("  Base URL: {}", config.base_url);
    tracing::info!("  TLS verification: {}", config.verify_tls);

    let client = IrisClient::new(&config).context("Failed to build DFIR-IRIS client")?;
    let server = MCPServer::new(&client);
    server.listen_stdio().await?;

    Ok(())
}
