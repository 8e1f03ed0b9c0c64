// Standalone MCP server binary

use anyhow::Result;
use apollo_mcp::{apollo_tools, McpConfig, McpServer};
use apollo_sdk::config::API_KEY_ENV;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apollo-mcp")]
#[command(about = "MCP server for the Apollo.io people and company API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "APOLLO_MCP_CONFIG", default_value = "apollo-mcp.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("Apollo MCP Server starting...");

    let config = McpConfig::load(&args.config)?;

    let api_key = std::env::var(API_KEY_ENV).ok();
    if api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        tracing::warn!(
            "{} is not set; every Apollo call will fail until it is provided",
            API_KEY_ENV
        );
    }

    let client = config.client(api_key)?;
    let registry = apollo_tools(client);

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry).with_name(config.server.name.clone());
    server.start().await?;

    Ok(())
}
