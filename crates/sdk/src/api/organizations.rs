//! Organization API endpoints.

use crate::client::ApolloClient;
use crate::error::{ApolloError, ApolloResult};
use apollo_core::{advise, EnrichCompanyArgs, SearchCompaniesArgs};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Organizations API for company search and enrichment.
pub struct OrganizationsApi<'a> {
    client: &'a ApolloClient,
}

impl<'a> OrganizationsApi<'a> {
    pub(crate) fn new(client: &'a ApolloClient) -> Self {
        Self { client }
    }

    /// Search companies. Consumes credits.
    pub async fn search(&self, args: &SearchCompaniesArgs) -> ApolloResult<Value> {
        let response = self.client.send(&args.to_request()).await?;

        let count = super::result_count(&response, &["organizations", "accounts"]);
        let warnings = advise(&args.advice(), Some(count));
        for (warning, _) in warnings.iter() {
            warn!(count, "{}", warning);
        }

        Ok(warnings.attach_to(response))
    }

    /// Search companies and decode just the candidate list.
    pub async fn search_candidates(
        &self,
        args: &SearchCompaniesArgs,
    ) -> ApolloResult<CompanySearchResponse> {
        let response = self.client.send(&args.to_request()).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Enrich a company by domain. Consumes credits.
    pub async fn enrich(&self, args: &EnrichCompanyArgs) -> ApolloResult<Value> {
        if args.domain.trim().is_empty() {
            return Err(ApolloError::InvalidInput(
                "domain is required to enrich a company".to_string(),
            ));
        }
        self.client.send(&args.to_request()).await
    }
}

/// The part of a company search response the resolver needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organizations: Vec<OrganizationSummary>,
}

/// A `null` candidate list means no candidates.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<OrganizationSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<OrganizationSummary>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary_domain: Option<String>,
}

impl OrganizationSummary {
    /// The primary domain, if it is usable for enrichment.
    pub fn domain(&self) -> Option<&str> {
        self.primary_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }
}
