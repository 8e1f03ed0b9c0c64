// Per-tool argument types and their translation into remote API requests

use crate::advisor::AdviceContext;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

pub const PEOPLE_SEARCH_ENDPOINT: &str = "/mixed_people/api_search";
pub const COMPANY_SEARCH_ENDPOINT: &str = "/mixed_companies/search";
pub const PEOPLE_MATCH_ENDPOINT: &str = "/people/match";
pub const ORGANIZATION_ENRICH_ENDPOINT: &str = "/organizations/enrich";

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 25;
pub const MAX_PER_PAGE: u64 = 100;

/// Candidates fetched when resolving a company by name.
pub const RESOLVE_CANDIDATES: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully shaped call to the remote API. Built once, then only read.
///
/// For `GET` the parameters become the query string; for `POST` they are
/// the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    method: HttpMethod,
    endpoint: &'static str,
    params: Map<String, Value>,
}

impl RemoteRequest {
    pub fn get(endpoint: &'static str, params: Map<String, Value>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint,
            params,
        }
    }

    pub fn post(endpoint: &'static str, params: Map<String, Value>) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint,
            params,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }
}

/// Resolve page and page size. Missing or zero values fall back to the
/// defaults; the page size never exceeds [`MAX_PER_PAGE`].
pub fn pagination(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
    let per_page = per_page
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PER_PAGE)
        .min(MAX_PER_PAGE);
    (page, per_page)
}

/// Decode a page number or page size from any JSON number. Fractions are
/// truncated; negative values count as absent and fall back to the default.
fn page_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| {
        n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        })
    }))
}

/// Accumulates only the parameters that were actually supplied.
#[derive(Default)]
struct Params(Map<String, Value>);

impl Params {
    fn set<T: Into<Value>>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
        self
    }

    /// Write a numeric range as `field[min]` / `field[max]`, skipping
    /// whichever bound is absent.
    fn range(&mut self, field: &str, min: Option<&Number>, max: Option<&Number>) -> &mut Self {
        if let Some(min) = min {
            self.0.insert(format!("{}[min]", field), Value::Number(min.clone()));
        }
        if let Some(max) = max {
            self.0.insert(format!("{}[max]", field), Value::Number(max.clone()));
        }
        self
    }

    fn paginate(&mut self, page: Option<u64>, per_page: Option<u64>) -> &mut Self {
        let (page, per_page) = pagination(page, per_page);
        self.0.insert("page".to_string(), Value::from(page));
        self.0.insert("per_page".to_string(), Value::from(per_page));
        self
    }

    fn finish(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.0)
    }
}

/// Arguments of the `search_people` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPeopleArgs {
    pub person_titles: Option<Vec<String>>,
    pub person_seniorities: Option<Vec<String>>,
    pub person_locations: Option<Vec<String>>,
    pub organization_locations: Option<Vec<String>>,
    pub organization_num_employees_ranges: Option<Vec<String>>,
    pub q_organization_domains_list: Option<Vec<String>>,
    pub q_keywords: Option<String>,
    pub contact_email_status: Option<Vec<String>>,
    pub revenue_range_min: Option<Number>,
    pub revenue_range_max: Option<Number>,
    pub currently_using_any_of_technology_uids: Option<Vec<String>>,
    #[serde(deserialize_with = "page_number")]
    pub page: Option<u64>,
    #[serde(deserialize_with = "page_number")]
    pub per_page: Option<u64>,
}

impl SearchPeopleArgs {
    pub fn to_request(&self) -> RemoteRequest {
        let params = Params::default()
            .set("person_titles", self.person_titles.clone())
            .set("person_seniorities", self.person_seniorities.clone())
            .set("person_locations", self.person_locations.clone())
            .set("organization_locations", self.organization_locations.clone())
            .set(
                "organization_num_employees_ranges",
                self.organization_num_employees_ranges.clone(),
            )
            .set("q_organization_domains_list", self.q_organization_domains_list.clone())
            .set("q_keywords", self.q_keywords.clone())
            .set("contact_email_status", self.contact_email_status.clone())
            .set(
                "currently_using_any_of_technology_uids",
                self.currently_using_any_of_technology_uids.clone(),
            )
            .range(
                "revenue_range",
                self.revenue_range_min.as_ref(),
                self.revenue_range_max.as_ref(),
            )
            .paginate(self.page, self.per_page)
            .finish();

        RemoteRequest::post(PEOPLE_SEARCH_ENDPOINT, params)
    }

    pub fn advice(&self) -> AdviceContext<'_> {
        AdviceContext {
            keywords: self.q_keywords.as_deref(),
            ..Default::default()
        }
    }
}

/// Arguments of the `search_companies` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCompaniesArgs {
    pub q_organization_name: Option<String>,
    pub organization_locations: Option<Vec<String>>,
    pub organization_not_locations: Option<Vec<String>>,
    pub organization_num_employees_ranges: Option<Vec<String>>,
    pub revenue_range_min: Option<Number>,
    pub revenue_range_max: Option<Number>,
    pub latest_funding_amount_range_min: Option<Number>,
    pub latest_funding_amount_range_max: Option<Number>,
    pub total_funding_range_min: Option<Number>,
    pub total_funding_range_max: Option<Number>,
    pub currently_using_any_of_technology_uids: Option<Vec<String>>,
    pub q_organization_keyword_tags: Option<Vec<String>>,
    #[serde(deserialize_with = "page_number")]
    pub page: Option<u64>,
    #[serde(deserialize_with = "page_number")]
    pub per_page: Option<u64>,
}

impl SearchCompaniesArgs {
    /// The narrow search used to find a single company by name.
    pub fn for_resolution(company_name: &str, location_hint: Option<&str>) -> Self {
        Self {
            q_organization_name: Some(company_name.to_string()),
            organization_locations: location_hint
                .filter(|hint| !hint.trim().is_empty())
                .map(|hint| vec![hint.to_string()]),
            per_page: Some(RESOLVE_CANDIDATES),
            ..Default::default()
        }
    }

    pub fn to_request(&self) -> RemoteRequest {
        let params = Params::default()
            .set("q_organization_name", self.q_organization_name.clone())
            .set("organization_locations", self.organization_locations.clone())
            .set("organization_not_locations", self.organization_not_locations.clone())
            .set(
                "organization_num_employees_ranges",
                self.organization_num_employees_ranges.clone(),
            )
            .set(
                "currently_using_any_of_technology_uids",
                self.currently_using_any_of_technology_uids.clone(),
            )
            .set("q_organization_keyword_tags", self.q_organization_keyword_tags.clone())
            .range(
                "revenue_range",
                self.revenue_range_min.as_ref(),
                self.revenue_range_max.as_ref(),
            )
            .range(
                "latest_funding_amount_range",
                self.latest_funding_amount_range_min.as_ref(),
                self.latest_funding_amount_range_max.as_ref(),
            )
            .range(
                "total_funding_range",
                self.total_funding_range_min.as_ref(),
                self.total_funding_range_max.as_ref(),
            )
            .paginate(self.page, self.per_page)
            .finish();

        RemoteRequest::post(COMPANY_SEARCH_ENDPOINT, params)
    }

    /// The company name is the free text of a company search.
    pub fn advice(&self) -> AdviceContext<'_> {
        AdviceContext {
            keywords: self.q_organization_name.as_deref(),
            ..Default::default()
        }
    }
}

/// Arguments of the `enrich_person` tool. At least one identifier is
/// expected; the remote decides whether the combination is enough.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichPersonArgs {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub organization_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub id: Option<String>,
    pub reveal_personal_emails: Option<bool>,
}

impl EnrichPersonArgs {
    pub fn to_request(&self) -> RemoteRequest {
        let params = Params::default()
            .set("email", self.email.clone())
            .set("first_name", self.first_name.clone())
            .set("last_name", self.last_name.clone())
            .set("name", self.name.clone())
            .set("domain", self.domain.clone())
            .set("organization_name", self.organization_name.clone())
            .set("linkedin_url", self.linkedin_url.clone())
            .set("id", self.id.clone())
            .set("reveal_personal_emails", self.reveal_personal_emails)
            .finish();

        RemoteRequest::post(PEOPLE_MATCH_ENDPOINT, params)
    }
}

/// Arguments of the `enrich_company` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichCompanyArgs {
    pub domain: String,
}

impl EnrichCompanyArgs {
    pub fn to_request(&self) -> RemoteRequest {
        let params = Params::default()
            .set("domain", Some(self.domain.clone()))
            .finish();
        RemoteRequest::get(ORGANIZATION_ENRICH_ENDPOINT, params)
    }
}

/// Arguments of the `enrich_company_by_name` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveCompanyArgs {
    pub company_name: String,
    #[serde(default)]
    pub location_hint: Option<String>,
}

impl ResolveCompanyArgs {
    pub fn advice(&self) -> AdviceContext<'_> {
        AdviceContext {
            company_name: Some(&self.company_name),
            location_hint: self.location_hint.as_deref(),
            ..Default::default()
        }
    }
}

/// Arguments of the `bulk_enrich_companies` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkResolveArgs {
    pub company_names: Vec<String>,
    #[serde(default)]
    pub location_hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people(args: Value) -> Map<String, Value> {
        let args: SearchPeopleArgs = serde_json::from_value(args).unwrap();
        args.to_request().params().clone()
    }

    #[test]
    fn test_pagination_defaults_and_cap() {
        assert_eq!(pagination(None, None), (1, 25));
        assert_eq!(pagination(Some(3), Some(50)), (3, 50));
        assert_eq!(pagination(Some(1), Some(500)), (1, 100));
        assert_eq!(pagination(Some(0), Some(0)), (1, 25));
    }

    #[test]
    fn test_search_people_copies_only_supplied_arguments() {
        let params = people(json!({
            "person_titles": ["CEO", "CTO"],
            "q_keywords": "fintech",
            "person_locations": null,
            "unknown_field": "ignored"
        }));

        assert_eq!(params["person_titles"], json!(["CEO", "CTO"]));
        assert_eq!(params["q_keywords"], "fintech");
        assert!(!params.contains_key("person_locations"));
        assert!(!params.contains_key("unknown_field"));
        assert!(!params.contains_key("revenue_range[min]"));
        assert_eq!(params["page"], 1);
        assert_eq!(params["per_page"], 25);
    }

    #[test]
    fn test_search_people_clamps_per_page() {
        let params = people(json!({"per_page": 500, "page": 2}));
        assert_eq!(params["per_page"], 100);
        assert_eq!(params["page"], 2);
    }

    #[test]
    fn test_fractional_paging_is_accepted() {
        let params = people(json!({"per_page": 500.0, "page": 2.0}));
        assert_eq!(params["per_page"], 100);
        assert_eq!(params["page"], 2);

        let params = people(json!({"per_page": 50.0}));
        assert_eq!(params["per_page"], 50);

        let params = people(json!({"per_page": 12.7, "page": -3}));
        assert_eq!(params["per_page"], 12);
        assert_eq!(params["page"], 1);
    }

    #[test]
    fn test_company_search_accepts_float_page_size() {
        let args: SearchCompaniesArgs =
            serde_json::from_value(json!({"per_page": 500.0, "page": null})).unwrap();
        let params = args.to_request().params().clone();
        assert_eq!(params["per_page"], 100);
        assert_eq!(params["page"], 1);
    }

    #[test]
    fn test_empty_values_are_not_coerced_away() {
        let params = people(json!({"q_keywords": "", "revenue_range_min": 0}));
        assert_eq!(params["q_keywords"], "");
        assert_eq!(params["revenue_range[min]"], 0);
        assert!(!params.contains_key("revenue_range[max]"));
    }

    #[test]
    fn test_search_people_endpoint() {
        let request = SearchPeopleArgs::default().to_request();
        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.endpoint(), "/mixed_people/api_search");
    }

    #[test]
    fn test_search_companies_ranges_use_bracket_keys() {
        let args: SearchCompaniesArgs = serde_json::from_value(json!({
            "q_organization_name": "Acme",
            "revenue_range_min": 1000000,
            "revenue_range_max": 5000000,
            "total_funding_range_max": 2.5e7
        }))
        .unwrap();
        let request = args.to_request();
        let params = request.params();

        assert_eq!(request.endpoint(), "/mixed_companies/search");
        assert_eq!(params["revenue_range[min]"], 1000000);
        assert_eq!(params["revenue_range[max]"], 5000000);
        assert_eq!(params["total_funding_range[max]"], 2.5e7);
        assert!(!params.contains_key("total_funding_range[min]"));
        assert!(!params.contains_key("latest_funding_amount_range[min]"));
        assert!(!params.contains_key("latest_funding_amount_range[max]"));
    }

    #[test]
    fn test_resolution_search() {
        let params = SearchCompaniesArgs::for_resolution("Acme", Some("France"))
            .to_request()
            .params()
            .clone();
        assert_eq!(params["q_organization_name"], "Acme");
        assert_eq!(params["organization_locations"], json!(["France"]));
        assert_eq!(params["per_page"], 5);

        let params = SearchCompaniesArgs::for_resolution("Acme", None)
            .to_request()
            .params()
            .clone();
        assert!(!params.contains_key("organization_locations"));
    }

    #[test]
    fn test_enrich_person_mapping() {
        let args: EnrichPersonArgs = serde_json::from_value(json!({
            "email": "jane@acme.com",
            "reveal_personal_emails": false
        }))
        .unwrap();
        let request = args.to_request();
        assert_eq!(request.endpoint(), "/people/match");
        assert_eq!(
            Value::Object(request.params().clone()),
            json!({"email": "jane@acme.com", "reveal_personal_emails": false})
        );
    }

    #[test]
    fn test_enrich_company_is_a_get() {
        let request = EnrichCompanyArgs {
            domain: "apollo.io".to_string(),
        }
        .to_request();
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.endpoint(), "/organizations/enrich");
        assert_eq!(request.params()["domain"], "apollo.io");
    }

    #[test]
    fn test_resolve_args_require_name() {
        let missing = serde_json::from_value::<ResolveCompanyArgs>(json!({"location_hint": "Paris"}));
        assert!(missing.is_err());

        let args: ResolveCompanyArgs =
            serde_json::from_value(json!({"company_name": "OpenAI", "location_hint": "Paris"})).unwrap();
        let ctx = args.advice();
        assert_eq!(ctx.company_name, Some("OpenAI"));
        assert_eq!(ctx.location_hint, Some("Paris"));
    }
}
