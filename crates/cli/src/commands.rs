use anyhow::{Context, Result};
use apollo_core::{
    to_csv, BulkResolveArgs, EnrichCompanyArgs, EnrichPersonArgs, ResolveCompanyArgs,
    SearchCompaniesArgs, SearchPeopleArgs,
};
use apollo_mcp::tools::Tool;
use apollo_sdk::ApolloClient;
use clap::{Args, Subcommand};
use serde_json::{Map, Number, Value};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for people (FREE)
    SearchPeople(SearchPeopleCmd),

    /// Search companies (CREDITS)
    SearchCompanies(SearchCompaniesCmd),

    /// Enrich person (CREDITS)
    EnrichPerson(EnrichPersonCmd),

    /// Enrich company by domain (CREDITS)
    EnrichCompany {
        /// Company domain (e.g., apollo.io)
        domain: String,
    },

    /// Enrich company by name (2 CREDITS)
    EnrichCompanyByName {
        /// Company name
        name: String,

        /// Location hint
        #[arg(long)]
        location: Option<String>,
    },

    /// Bulk enrich companies (2 CREDITS each)
    BulkEnrich {
        /// Company names
        #[arg(required = true)]
        names: Vec<String>,

        /// Location hint for all
        #[arg(long)]
        location: Option<String>,
    },

    /// Export JSON records to CSV
    Export {
        /// JSON array of records to export
        data: String,

        /// Columns to include
        #[arg(long, num_args = 1..)]
        columns: Option<Vec<String>>,
    },

    /// List the MCP tool catalogue with credit usage
    Tools,
}

#[derive(Args, Debug, Default)]
pub struct SearchPeopleCmd {
    /// Job titles (e.g., CEO CTO)
    #[arg(long, num_args = 1..)]
    titles: Option<Vec<String>>,

    /// Seniority levels
    #[arg(long, num_args = 1..)]
    seniorities: Option<Vec<String>>,

    /// Person locations
    #[arg(long, num_args = 1..)]
    locations: Option<Vec<String>>,

    /// Company locations
    #[arg(long, num_args = 1..)]
    org_locations: Option<Vec<String>>,

    /// Employee ranges (e.g., "11,50" "51,200")
    #[arg(long, num_args = 1..)]
    employees: Option<Vec<String>>,

    /// Company domains
    #[arg(long, num_args = 1..)]
    domains: Option<Vec<String>>,

    /// Keywords
    #[arg(long)]
    keywords: Option<String>,

    /// Email status filter
    #[arg(long, num_args = 1..)]
    email_status: Option<Vec<String>>,

    /// Minimum company revenue
    #[arg(long)]
    revenue_min: Option<u64>,

    /// Maximum company revenue
    #[arg(long)]
    revenue_max: Option<u64>,

    /// Technologies
    #[arg(long, num_args = 1..)]
    technologies: Option<Vec<String>>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Results per page
    #[arg(long, default_value_t = 25)]
    per_page: u64,
}

impl SearchPeopleCmd {
    pub fn to_args(&self) -> SearchPeopleArgs {
        SearchPeopleArgs {
            person_titles: self.titles.clone(),
            person_seniorities: self.seniorities.clone(),
            person_locations: self.locations.clone(),
            organization_locations: self.org_locations.clone(),
            organization_num_employees_ranges: self.employees.clone(),
            q_organization_domains_list: self.domains.clone(),
            q_keywords: self.keywords.clone(),
            contact_email_status: self.email_status.clone(),
            revenue_range_min: self.revenue_min.map(Number::from),
            revenue_range_max: self.revenue_max.map(Number::from),
            currently_using_any_of_technology_uids: self.technologies.clone(),
            page: Some(self.page),
            per_page: Some(self.per_page),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SearchCompaniesCmd {
    /// Company name
    #[arg(long)]
    name: Option<String>,

    /// HQ locations
    #[arg(long, num_args = 1..)]
    locations: Option<Vec<String>>,

    /// HQ locations to exclude
    #[arg(long, num_args = 1..)]
    not_locations: Option<Vec<String>>,

    /// Employee ranges
    #[arg(long, num_args = 1..)]
    employees: Option<Vec<String>>,

    /// Minimum revenue
    #[arg(long)]
    revenue_min: Option<u64>,

    /// Maximum revenue
    #[arg(long)]
    revenue_max: Option<u64>,

    /// Technologies
    #[arg(long, num_args = 1..)]
    technologies: Option<Vec<String>>,

    /// Industry keywords
    #[arg(long, num_args = 1..)]
    keywords: Option<Vec<String>>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Results per page
    #[arg(long, default_value_t = 25)]
    per_page: u64,
}

impl SearchCompaniesCmd {
    pub fn to_args(&self) -> SearchCompaniesArgs {
        SearchCompaniesArgs {
            q_organization_name: self.name.clone(),
            organization_locations: self.locations.clone(),
            organization_not_locations: self.not_locations.clone(),
            organization_num_employees_ranges: self.employees.clone(),
            revenue_range_min: self.revenue_min.map(Number::from),
            revenue_range_max: self.revenue_max.map(Number::from),
            currently_using_any_of_technology_uids: self.technologies.clone(),
            q_organization_keyword_tags: self.keywords.clone(),
            page: Some(self.page),
            per_page: Some(self.per_page),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct EnrichPersonCmd {
    /// Person email
    #[arg(long)]
    email: Option<String>,

    /// First name
    #[arg(long)]
    first_name: Option<String>,

    /// Last name
    #[arg(long)]
    last_name: Option<String>,

    /// Full name
    #[arg(long)]
    name: Option<String>,

    /// Company domain
    #[arg(long)]
    domain: Option<String>,

    /// Company name
    #[arg(long)]
    company: Option<String>,

    /// LinkedIn URL
    #[arg(long)]
    linkedin: Option<String>,

    /// Apollo person ID
    #[arg(long)]
    id: Option<String>,

    /// Include personal emails
    #[arg(long)]
    reveal_personal_emails: bool,
}

impl EnrichPersonCmd {
    pub fn to_args(&self) -> EnrichPersonArgs {
        EnrichPersonArgs {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            name: self.name.clone(),
            domain: self.domain.clone(),
            organization_name: self.company.clone(),
            linkedin_url: self.linkedin.clone(),
            id: self.id.clone(),
            reveal_personal_emails: Some(self.reveal_personal_emails),
        }
    }
}

/// What a command prints: JSON is pretty-printed, text goes out as is.
#[derive(Debug)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl Output {
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            Self::Text(text) => Ok(text.clone()),
        }
    }
}

impl Command {
    /// Whether the command talks to the Apollo API.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Export { .. } | Self::Tools)
    }

    pub async fn run(&self, client: &ApolloClient) -> Result<Output> {
        let value = match self {
            Self::SearchPeople(cmd) => client.people().search(&cmd.to_args()).await?,
            Self::SearchCompanies(cmd) => client.organizations().search(&cmd.to_args()).await?,
            Self::EnrichPerson(cmd) => client.people().enrich(&cmd.to_args()).await?,
            Self::EnrichCompany { domain } => {
                let args = EnrichCompanyArgs {
                    domain: domain.clone(),
                };
                client.organizations().enrich(&args).await?
            }
            Self::EnrichCompanyByName { name, location } => {
                let args = ResolveCompanyArgs {
                    company_name: name.clone(),
                    location_hint: location.clone(),
                };
                serde_json::to_value(client.resolver().resolve(&args).await?)?
            }
            Self::BulkEnrich { names, location } => {
                let args = BulkResolveArgs {
                    company_names: names.clone(),
                    location_hint: location.clone(),
                };
                let report = client
                    .resolver()
                    .resolve_all(&args.company_names, args.location_hint.as_deref())
                    .await;
                serde_json::to_value(report)?
            }
            Self::Export { data, columns } => {
                return export(data, columns.as_deref()).map(Output::Text);
            }
            Self::Tools => return Ok(Output::Text(tool_catalogue(client))),
        };

        Ok(Output::Json(value))
    }
}

fn export(data: &str, columns: Option<&[String]>) -> Result<String> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(data).context("Export data must be a JSON array of objects")?;
    Ok(to_csv(&records, columns)?)
}

fn tool_catalogue(client: &ApolloClient) -> String {
    let registry = apollo_mcp::apollo_tools(client.clone());
    registry
        .list_schemas()
        .into_iter()
        .filter_map(|schema| {
            registry
                .get(&schema.name)
                .map(|tool| format!("{:<24} {}", schema.name, tool.credits()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_people_args() {
        let cmd = SearchPeopleCmd {
            titles: Some(vec!["CTO".to_string()]),
            revenue_min: Some(1_000_000),
            page: 2,
            per_page: 50,
            ..Default::default()
        };

        let args = cmd.to_args();
        assert_eq!(args.person_titles, Some(vec!["CTO".to_string()]));
        assert_eq!(args.revenue_range_min, Some(Number::from(1_000_000u64)));
        assert_eq!(args.revenue_range_max, None);
        assert_eq!(args.page, Some(2));
        assert_eq!(args.per_page, Some(50));
    }

    #[test]
    fn test_enrich_person_maps_company_to_organization_name() {
        let cmd = EnrichPersonCmd {
            first_name: Some("Ada".to_string()),
            company: Some("Analytical Engines".to_string()),
            ..Default::default()
        };

        let args = cmd.to_args();
        assert_eq!(args.organization_name.as_deref(), Some("Analytical Engines"));
        assert_eq!(args.reveal_personal_emails, Some(false));
    }

    #[test]
    fn test_export_renders_csv() {
        let csv = export(r#"[{"name":"Acme","employees":12}]"#, None).unwrap();
        assert_eq!(csv, "name,employees\nAcme,12");
    }

    #[test]
    fn test_export_rejects_non_array() {
        let err = export(r#"{"name":"Acme"}"#, None).unwrap_err();
        assert!(err.to_string().contains("JSON array of objects"));
    }

    #[test]
    fn test_tool_catalogue_lists_credits() {
        let client = ApolloClient::builder().build().unwrap();
        let catalogue = tool_catalogue(&client);
        let lines: Vec<_> = catalogue.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("search_people"));
        assert!(lines[0].ends_with("free"));
        assert!(lines[5].ends_with("2 credited call(s) per item"));
    }

    #[tokio::test]
    async fn test_offline_commands_skip_api() {
        let client = ApolloClient::builder().build().unwrap();
        let command = Command::Export {
            data: r#"[{"a":"x,y"}]"#.to_string(),
            columns: None,
        };

        assert!(!command.is_remote());
        let output = command.run(&client).await.unwrap();
        assert_eq!(output.render().unwrap(), "a\n\"x,y\"");
    }
}
