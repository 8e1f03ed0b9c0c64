// People tools: prospect search and person enrichment

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_result, json_schema_boolean, json_schema_number, json_schema_object, json_schema_string,
    json_schema_string_list, with_default, CreditUsage, Tool,
};
use anyhow::{Context, Result};
use apollo_core::{EnrichPersonArgs, SearchPeopleArgs};
use apollo_sdk::ApolloClient;

/// Tool to search people. Free, returns no contact details.
pub struct SearchPeopleTool {
    client: ApolloClient,
}

impl SearchPeopleTool {
    pub fn new(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchPeopleTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_people".to_string(),
            description: "Search for people/contacts in the Apollo database. Returns prospects matching the filters. Does NOT return emails or phones, use enrich_person for that. FREE - no credits consumed.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "person_titles": json_schema_string_list("Job titles to search (e.g., ['CEO', 'CTO', 'Sales Director'])"),
                    "person_seniorities": json_schema_string_list("Seniority levels: owner, founder, c_suite, partner, vp, head, director, manager, senior, entry, intern"),
                    "person_locations": json_schema_string_list("Person locations (e.g., ['France', 'Paris', 'California'])"),
                    "organization_locations": json_schema_string_list("Company HQ locations (e.g., ['Germany', 'London'])"),
                    "organization_num_employees_ranges": json_schema_string_list("Employee count ranges (e.g., ['1,10', '11,50', '51,200', '201,500', '501,1000', '1001,5000', '5001,10000'])"),
                    "q_organization_domains_list": json_schema_string_list("Company domains to filter (e.g., ['apollo.io', 'microsoft.com'])"),
                    "q_keywords": json_schema_string("Keywords to filter results. Avoid accented characters."),
                    "contact_email_status": json_schema_string_list("Email status filter: verified, unverified, likely to engage, unavailable"),
                    "revenue_range_min": json_schema_number("Minimum company revenue (no currency symbols)"),
                    "revenue_range_max": json_schema_number("Maximum company revenue (no currency symbols)"),
                    "currently_using_any_of_technology_uids": json_schema_string_list("Technologies used by the company (e.g., ['salesforce', 'hubspot', 'google_analytics'])"),
                    "page": with_default(json_schema_number("Page number (default: 1)"), serde_json::json!(1)),
                    "per_page": with_default(json_schema_number("Results per page (max 100, default: 25)"), serde_json::json!(25))
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchPeopleArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for search_people")?;

        let result = self.client.people().search(&args).await?;
        json_result(&result)
    }
}

/// Tool to enrich a person with contact details.
pub struct EnrichPersonTool {
    client: ApolloClient,
}

impl EnrichPersonTool {
    pub fn new(client: ApolloClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for EnrichPersonTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "enrich_person".to_string(),
            description: "Enrich a person's data to get email, phone, employment history, etc. CONSUMES CREDITS. Provide at least one identifier.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "email": json_schema_string("Person's email address"),
                    "first_name": json_schema_string("First name (use with last_name and domain/organization_name)"),
                    "last_name": json_schema_string("Last name"),
                    "name": json_schema_string("Full name (alternative to first_name + last_name)"),
                    "domain": json_schema_string("Company domain (e.g., 'apollo.io')"),
                    "organization_name": json_schema_string("Company name"),
                    "linkedin_url": json_schema_string("LinkedIn profile URL"),
                    "id": json_schema_string("Apollo person ID (from search results)"),
                    "reveal_personal_emails": with_default(
                        json_schema_boolean("Include personal emails (may consume extra credits)"),
                        serde_json::json!(false)
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: EnrichPersonArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for enrich_person")?;

        let result = self.client.people().enrich(&args).await?;
        json_result(&result)
    }

    fn credits(&self) -> CreditUsage {
        CreditUsage::PerCall(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApolloClient {
        ApolloClient::builder()
            .base_url(server.uri())
            .api_key("test-key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_search_schema_advertises_paging_defaults() {
        let tool = SearchPeopleTool::new(ApolloClient::builder().build().unwrap());
        let schema = tool.schema();

        assert!(schema.description.contains("FREE"));
        assert_eq!(schema.input_schema["properties"]["per_page"]["default"], 25);
        assert_eq!(schema.input_schema["properties"]["person_titles"]["type"], "array");
        assert_eq!(tool.credits(), CreditUsage::Free);
    }

    #[tokio::test]
    async fn test_search_people_returns_annotated_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mixed_people/api_search"))
            .and(header("x-api-key", "test-key"))
            .and(body_partial_json(json!({"q_keywords": "Montréal", "per_page": 100})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"people": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = SearchPeopleTool::new(client(&server));
        let result = tool
            .execute(json!({"q_keywords": "Montréal", "per_page": 500}))
            .await
            .unwrap();

        let body: serde_json::Value = serde_json::from_str(&result.text_content()).unwrap();
        assert!(body["_warnings"][0].as_str().unwrap().contains("Montréal"));
        assert_eq!(
            body["_warnings"].as_array().unwrap().len(),
            body["_suggestions"].as_array().unwrap().len()
        );
    }

    #[tokio::test]
    async fn test_enrich_person_rejects_ill_typed_arguments() {
        let tool = EnrichPersonTool::new(ApolloClient::builder().build().unwrap());
        let err = tool.execute(json!({"email": 42})).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid arguments for enrich_person"));
    }
}
