use anyhow::Result;
use apollo_sdk::config::DEFAULT_BASE_URL;
use apollo_sdk::ApolloClient;
use clap::Parser;
use std::time::Duration;

mod commands;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "apollo")]
#[command(about = "Apollo.io API Client", long_about = None)]
struct Cli {
    /// Apollo API key
    #[arg(long, env = "APOLLO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Apollo API base URL
    #[arg(long, env = "APOLLO_API_BASE", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn client(&self) -> Result<ApolloClient> {
        Ok(ApolloClient::builder()
            .base_url(self.base_url.clone())
            .maybe_api_key(self.api_key.clone())
            .timeout(Duration::from_secs(self.timeout))
            .build()?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs on stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = cli.client()?;

    if cli.command.is_remote() && !client.config().has_api_key() {
        tracing::warn!("No API key given; set APOLLO_API_KEY or pass --api-key");
    }

    let output = cli.command.run(&client).await?;
    println!("{}", output.render()?);

    Ok(())
}
