//! Company resolution example.
//!
//! Resolves each company name given on the command line to an enriched
//! record and prints the bulk report.
//!
//! Run with: APOLLO_API_KEY=... cargo run --example resolve_company -- Anthropic Mistral

use apollo_sdk::{ApolloClient, ApolloResult};

#[tokio::main]
async fn main() -> ApolloResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let client = ApolloClient::from_env()?;

    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        eprintln!("usage: resolve_company <company name>...");
        return Ok(());
    }

    let report = client.resolver().resolve_all(&names, None).await;
    println!(
        "Resolved {}/{} companies ({} failed)",
        report.successful, report.total, report.failed
    );

    for entry in &report.results {
        match (&entry.data, &entry.error) {
            (Some(resolution), _) => println!(
                "  {}: {}",
                entry.company_name,
                resolution.domain().unwrap_or("no domain")
            ),
            (None, Some(error)) => println!("  {}: error: {}", entry.company_name, error),
            (None, None) => println!("  {}: no result", entry.company_name),
        }
    }

    Ok(())
}
