// Company tools: search, enrichment by domain, and name-based resolution

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_result, json_schema_number, json_schema_object, json_schema_string,
    json_schema_string_list, with_default, CreditUsage, Tool,
};
use anyhow::{Context, Result};
use apollo_core::{BulkResolveArgs, EnrichCompanyArgs, ResolveCompanyArgs, SearchCompaniesArgs};
use apollo_sdk::ApolloClient;

/// Tool to search organizations.
pub struct SearchCompaniesTool {
    client: ApolloClient,
}

impl SearchCompaniesTool {
    pub fn new(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchCompaniesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_companies".to_string(),
            description: "Search for companies/organizations in the Apollo database. CONSUMES CREDITS. Avoid accented characters in company names.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "q_organization_name": json_schema_string("Company name to search (partial match). Avoid accented characters."),
                    "organization_locations": json_schema_string_list("Company HQ locations (e.g., ['France', 'Paris', 'Texas'])"),
                    "organization_not_locations": json_schema_string_list("Locations to exclude"),
                    "organization_num_employees_ranges": json_schema_string_list("Employee count ranges (e.g., ['1,10', '11,50', '51,200'])"),
                    "revenue_range_min": json_schema_number("Minimum revenue"),
                    "revenue_range_max": json_schema_number("Maximum revenue"),
                    "latest_funding_amount_range_min": json_schema_number("Minimum amount of the latest funding round"),
                    "latest_funding_amount_range_max": json_schema_number("Maximum amount of the latest funding round"),
                    "total_funding_range_min": json_schema_number("Minimum total funding"),
                    "total_funding_range_max": json_schema_number("Maximum total funding"),
                    "currently_using_any_of_technology_uids": json_schema_string_list("Technologies used (e.g., ['salesforce', 'hubspot'])"),
                    "q_organization_keyword_tags": json_schema_string_list("Industry keywords (e.g., ['saas', 'fintech', 'healthcare'])"),
                    "page": with_default(json_schema_number("Page number (default: 1)"), serde_json::json!(1)),
                    "per_page": with_default(json_schema_number("Results per page (max 100, default: 25)"), serde_json::json!(25))
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchCompaniesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for search_companies")?;

        let result = self.client.organizations().search(&args).await?;
        json_result(&result)
    }

    fn credits(&self) -> CreditUsage {
        CreditUsage::PerCall(1)
    }
}

/// Tool to enrich a company from its domain.
pub struct EnrichCompanyTool {
    client: ApolloClient,
}

impl EnrichCompanyTool {
    pub fn new(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for EnrichCompanyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "enrich_company".to_string(),
            description: "Enrich a company's data using its domain. Returns industry, revenue, employees, funding, technologies, etc. CONSUMES CREDITS. Use enrich_company_by_name when only the name is known.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "domain": json_schema_string("Company domain without www or @ (e.g., 'apollo.io', 'microsoft.com')")
                }),
                vec!["domain"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: EnrichCompanyArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for enrich_company")?;

        let result = self.client.organizations().enrich(&args).await?;
        json_result(&result)
    }

    fn credits(&self) -> CreditUsage {
        CreditUsage::PerCall(1)
    }
}

/// Tool to resolve a company name to an enriched record.
pub struct EnrichCompanyByNameTool {
    client: ApolloClient,
}

impl EnrichCompanyByNameTool {
    pub fn new(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for EnrichCompanyByNameTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "enrich_company_by_name".to_string(),
            description: "Enrich a company from its name only: searches the company, picks the best match, then enriches it with its domain. Combines search_companies + enrich_company. CONSUMES CREDITS (2 calls). Watch the _warnings field for accent and match problems.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "company_name": json_schema_string("Company name (e.g., 'Google', 'Anthropic'). Avoid accented characters."),
                    "location_hint": json_schema_string("Optional location to narrow the match (e.g., 'France', 'San Francisco')")
                }),
                vec!["company_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ResolveCompanyArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for enrich_company_by_name")?;

        let resolution = self.client.resolver().resolve(&args).await?;
        json_result(&resolution)
    }

    fn credits(&self) -> CreditUsage {
        CreditUsage::PerCall(2)
    }
}

/// Tool to resolve a list of company names.
pub struct BulkEnrichCompaniesTool {
    client: ApolloClient,
}

impl BulkEnrichCompaniesTool {
    pub fn new(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for BulkEnrichCompaniesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "bulk_enrich_companies".to_string(),
            description: "Enrich several companies from their names, one after another. Ideal for processing a company list. A failure on one name does not stop the others. CONSUMES CREDITS (2 calls per company).".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "company_names": json_schema_string_list("Company names to enrich (e.g., ['Google', 'Microsoft', 'Anthropic'])"),
                    "location_hint": json_schema_string("Optional location applied to every search")
                }),
                vec!["company_names"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: BulkResolveArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for bulk_enrich_companies")?;

        let report = self
            .client
            .resolver()
            .resolve_all(&args.company_names, args.location_hint.as_deref())
            .await;
        json_result(&report)
    }

    fn credits(&self) -> CreditUsage {
        CreditUsage::PerItem(2)
    }
}
