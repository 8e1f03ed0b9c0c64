//! Name-based company lookup built from search and enrichment.

use crate::client::ApolloClient;
use crate::error::ApolloResult;
use apollo_core::advisor::advise_match;
use apollo_core::{
    advise, BulkEntry, BulkResolution, CompanyResolution, EnrichCompanyArgs, ResolveCompanyArgs,
    SearchCompaniesArgs,
};
use tracing::{info, warn};

/// Resolves company names to enriched company records.
///
/// Each resolution costs two credited calls: one search, one enrichment.
/// The first search result is taken as the best match; there is no
/// relevance scoring beyond what the remote search already does.
pub struct CompanyResolver<'a> {
    client: &'a ApolloClient,
}

impl<'a> CompanyResolver<'a> {
    pub(crate) fn new(client: &'a ApolloClient) -> Self {
        Self { client }
    }

    /// Search for a company by name, then enrich the best match.
    pub async fn resolve(&self, args: &ResolveCompanyArgs) -> ApolloResult<CompanyResolution> {
        let mut warnings = advise(&args.advice(), None);
        let hint = args.location_hint.as_deref();

        let search = SearchCompaniesArgs::for_resolution(&args.company_name, hint);
        let candidates = self.client.organizations().search_candidates(&search).await?;

        let Some(best) = candidates.organizations.into_iter().next() else {
            info!(company = %args.company_name, "No company matched");
            return Ok(CompanyResolution::not_found(&args.company_name, warnings));
        };

        let Some(domain) = best.domain().map(str::to_string) else {
            info!(company = %args.company_name, matched = ?best.name, "Best match has no domain");
            return Ok(CompanyResolution::unenrichable(best.name, warnings));
        };

        let enrichment = self
            .client
            .organizations()
            .enrich(&EnrichCompanyArgs {
                domain: domain.clone(),
            })
            .await?;

        advise_match(&args.company_name, best.name.as_deref(), hint, &mut warnings);

        info!(company = %args.company_name, domain = %domain, "Company resolved");
        Ok(CompanyResolution::enriched(
            best.name,
            domain,
            enrichment,
            warnings,
        ))
    }

    /// Resolve each name in turn. A failure is recorded on its own entry
    /// and never stops the remaining names. Entries keep input order.
    pub async fn resolve_all(
        &self,
        company_names: &[String],
        location_hint: Option<&str>,
    ) -> BulkResolution {
        let mut entries = Vec::with_capacity(company_names.len());

        for name in company_names {
            let args = ResolveCompanyArgs {
                company_name: name.clone(),
                location_hint: location_hint.map(str::to_string),
            };

            match self.resolve(&args).await {
                Ok(resolution) => entries.push(BulkEntry::success(name.as_str(), resolution)),
                Err(e) => {
                    warn!(company = %name, error = %e, "Company resolution failed");
                    entries.push(BulkEntry::failure(name.as_str(), e.to_string()));
                }
            }
        }

        let report = BulkResolution::from_entries(entries);
        info!(
            total = report.total,
            successful = report.successful,
            failed = report.failed,
            "Bulk resolution finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_core::EntryStatus;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApolloClient {
        ApolloClient::builder()
            .base_url(server.uri())
            .api_key("test-key")
            .build()
            .unwrap()
    }

    fn args(name: &str, hint: Option<&str>) -> ResolveCompanyArgs {
        ResolveCompanyArgs {
            company_name: name.to_string(),
            location_hint: hint.map(str::to_string),
        }
    }

    async fn mount_search(server: &MockServer, name: &str, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/mixed_companies/search"))
            .and(body_partial_json(json!({"q_organization_name": name, "per_page": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolve_enriches_best_match() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            "Acme",
            json!({"organizations": [
                {"name": "Acme Corp", "primary_domain": "acme.com"},
                {"name": "Acme Other", "primary_domain": "acme.org"}
            ]}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/organizations/enrich"))
            .and(query_param("domain", "acme.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"organization": {"name": "Acme Corp"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let resolution = client.resolver().resolve(&args("Acme", None)).await.unwrap();

        assert_eq!(resolution.domain(), Some("acme.com"));
        assert!(resolution.warnings().is_empty());
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(value["search_match"], "Acme Corp");
        assert_eq!(value["enrichment"]["organization"]["name"], "Acme Corp");
    }

    #[tokio::test]
    async fn test_resolve_not_found_keeps_advisories() {
        let server = MockServer::start().await;
        mount_search(&server, "Google", json!({"organizations": []})).await;

        let client = client(&server);
        let resolution = client
            .resolver()
            .resolve(&args("Google", Some("Lyon")))
            .await
            .unwrap();

        assert!(!resolution.is_found());
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(value["found"], false);
        assert_eq!(value["_warnings"].as_array().unwrap().len(), 1);
        assert_eq!(value["_suggestions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_null_candidates_is_not_found() {
        let server = MockServer::start().await;
        mount_search(&server, "Nowhere Ltd", json!({"organizations": null})).await;

        let client = client(&server);
        let resolution = client
            .resolver()
            .resolve(&args("Nowhere Ltd", None))
            .await
            .unwrap();

        assert!(!resolution.is_found());
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(value["found"], false);
    }

    #[tokio::test]
    async fn test_resolve_without_domain_skips_enrichment() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            "Anthropic",
            json!({"organizations": [{"name": "Anthropic", "primary_domain": null}]}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/organizations/enrich"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client(&server);
        let resolution = client.resolver().resolve(&args("Anthropic", None)).await.unwrap();

        assert!(resolution.is_found());
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(value["found"], true);
        assert!(value["error"].as_str().unwrap().contains("Anthropic"));
    }

    #[tokio::test]
    async fn test_resolve_flags_mismatch_with_location_hint() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            "Qonto",
            json!({"organizations": [{"name": "Banque Populaire", "primary_domain": "bp.fr"}]}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/organizations/enrich"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organization": {}})))
            .mount(&server)
            .await;

        let client = client(&server);
        let resolution = client
            .resolver()
            .resolve(&args("Qonto", Some("France")))
            .await
            .unwrap();

        let warnings = resolution.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings.warnings()[0].contains("Banque Populaire"));
    }

    #[tokio::test]
    async fn test_resolve_propagates_remote_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mixed_companies/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.resolver().resolve(&args("Acme", None)).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_resolve_all_isolates_failures() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            "Acme",
            json!({"organizations": [{"name": "Acme", "primary_domain": "acme.com"}]}),
        )
        .await;

        Mock::given(method("POST"))
            .and(path("/mixed_companies/search"))
            .and(body_partial_json(json!({"q_organization_name": "BadCo"})))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/organizations/enrich"))
            .and(query_param("domain", "acme.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organization": {}})))
            .mount(&server)
            .await;

        let client = client(&server);
        let names = vec!["Acme".to_string(), "BadCo".to_string()];
        let report = client.resolver().resolve_all(&names, None).await;

        assert_eq!(report.total, 2);
        assert_eq!(report.successful, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results[0].company_name, "Acme");
        assert_eq!(report.results[0].status, EntryStatus::Success);
        assert_eq!(report.results[1].company_name, "BadCo");
        assert_eq!(report.results[1].status, EntryStatus::Error);
        assert!(report.results[1].error.as_deref().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_resolve_all_continues_after_leading_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mixed_companies/search"))
            .and(body_partial_json(json!({"q_organization_name": "BadCo"})))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        mount_search(
            &server,
            "Acme",
            json!({"organizations": [{"name": "Acme", "primary_domain": "acme.com"}]}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/organizations/enrich"))
            .and(query_param("domain", "acme.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organization": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let names = vec!["BadCo".to_string(), "Acme".to_string()];
        let report = client.resolver().resolve_all(&names, None).await;

        assert_eq!(report.total, 2);
        assert_eq!(report.successful, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results[0].company_name, "BadCo");
        assert_eq!(report.results[0].status, EntryStatus::Error);
        assert_eq!(report.results[1].company_name, "Acme");
        assert_eq!(report.results[1].status, EntryStatus::Success);
        assert_eq!(report.results[1].data.as_ref().unwrap().domain(), Some("acme.com"));
    }
}
