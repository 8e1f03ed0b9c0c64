//! People API endpoints.

use crate::client::ApolloClient;
use crate::error::ApolloResult;
use apollo_core::{advise, EnrichPersonArgs, SearchPeopleArgs};
use serde_json::Value;
use tracing::warn;

/// People API for prospect search and person enrichment.
pub struct PeopleApi<'a> {
    client: &'a ApolloClient,
}

impl<'a> PeopleApi<'a> {
    pub(crate) fn new(client: &'a ApolloClient) -> Self {
        Self { client }
    }

    /// Search people. Free, and never returns emails or phone numbers.
    ///
    /// Advisory `_warnings`/`_suggestions` are merged into the response
    /// when the query looks likely to misfire.
    pub async fn search(&self, args: &SearchPeopleArgs) -> ApolloResult<Value> {
        let response = self.client.send(&args.to_request()).await?;

        let count = super::result_count(&response, &["people"]);
        let warnings = advise(&args.advice(), Some(count));
        for (warning, _) in warnings.iter() {
            warn!(count, "{}", warning);
        }

        Ok(warnings.attach_to(response))
    }

    /// Enrich a person to reveal email, phone and employment history.
    /// Consumes credits.
    pub async fn enrich(&self, args: &EnrichPersonArgs) -> ApolloResult<Value> {
        self.client.send(&args.to_request()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApolloClient {
        ApolloClient::builder()
            .base_url(server.uri())
            .api_key("test-key")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_clamps_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mixed_people/api_search"))
            .and(body_json(json!({"person_titles": ["CEO"], "page": 1, "per_page": 100})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"people": [{"name": "Jane"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let args: SearchPeopleArgs =
            serde_json::from_value(json!({"person_titles": ["CEO"], "per_page": 500})).unwrap();
        let result = client(&server).people().search(&args).await.unwrap();

        assert_eq!(result["people"][0]["name"], "Jane");
        assert!(result.get("_warnings").is_none());
    }

    #[tokio::test]
    async fn test_search_with_accents_is_annotated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mixed_people/api_search"))
            .and(body_partial_json(json!({"q_keywords": "ingénieur"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"people": [], "pagination": {"page": 1}})),
            )
            .mount(&server)
            .await;

        let args = SearchPeopleArgs {
            q_keywords: Some("ingénieur".to_string()),
            ..Default::default()
        };
        let result = client(&server).people().search(&args).await.unwrap();

        let warnings = result["_warnings"].as_array().unwrap();
        let suggestions = result["_suggestions"].as_array().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings.len(), suggestions.len());
        assert!(warnings[0].as_str().unwrap().contains("ingénieur"));
        assert!(suggestions[0].as_str().unwrap().contains("ingenieur"));
        // The remote payload is kept intact
        assert_eq!(result["pagination"]["page"], 1);
    }

    #[tokio::test]
    async fn test_enrich_posts_identifiers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/people/match"))
            .and(body_json(json!({"email": "jane@acme.com"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"person": {"email": "jane@acme.com"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let args = EnrichPersonArgs {
            email: Some("jane@acme.com".to_string()),
            ..Default::default()
        };
        let result = client(&server).people().enrich(&args).await.unwrap();
        assert_eq!(result["person"]["email"], "jane@acme.com");
    }
}
