//! # Apollo SDK
//!
//! Async client for the Apollo.io people and company endpoints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apollo_sdk::{ApolloClient, ApolloResult, ResolveCompanyArgs, SearchPeopleArgs};
//!
//! #[tokio::main]
//! async fn main() -> ApolloResult<()> {
//!     // Build client
//!     let client = ApolloClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     // Search people (free)
//!     let args = SearchPeopleArgs {
//!         person_titles: Some(vec!["CTO".to_string()]),
//!         ..Default::default()
//!     };
//!     let people = client.people().search(&args).await?;
//!     println!("{}", people);
//!
//!     // Resolve a company by name (two credited calls)
//!     let resolution = client
//!         .resolver()
//!         .resolve(&ResolveCompanyArgs {
//!             company_name: "Anthropic".to_string(),
//!             location_hint: None,
//!         })
//!         .await?;
//!     println!("Resolved domain: {:?}", resolution.domain());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod resolve;
pub mod transport;

// Re-export main client
pub use client::{ApolloClient, ApolloClientBuilder};
pub use config::ClientConfig;
pub use error::{ApolloError, ApolloResult};
pub use resolve::CompanyResolver;

// Re-export argument and result types for convenience
pub use apollo_core::{
    BulkEntry, BulkResolution, BulkResolveArgs, CompanyResolution, EnrichCompanyArgs,
    EnrichPersonArgs, EntryStatus, HttpMethod, RemoteRequest, ResolveCompanyArgs,
    SearchCompaniesArgs, SearchPeopleArgs, Warnings,
};
