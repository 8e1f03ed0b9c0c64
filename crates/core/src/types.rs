// Result types shared by the SDK, the MCP tools and the CLI

use serde::Serialize;
use serde_json::{Map, Value};

/// Advisory warnings attached to a successful result.
///
/// Warnings and suggestions are kept pairwise: the suggestion at index `i`
/// remediates the warning at index `i`. Both serialize as `_warnings` and
/// `_suggestions` and are omitted entirely when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Warnings {
    #[serde(rename = "_warnings", skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(rename = "_suggestions", skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: impl Into<String>, suggestion: impl Into<String>) {
        self.warnings.push(warning.into());
        self.suggestions.push(suggestion.into());
    }

    pub fn extend(&mut self, other: Warnings) {
        self.warnings.extend(other.warnings);
        self.suggestions.extend(other.suggestions);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Iterate over `(warning, suggestion)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.warnings
            .iter()
            .zip(self.suggestions.iter())
            .map(|(w, s)| (w.as_str(), s.as_str()))
    }

    /// Annotate a remote response with these warnings.
    ///
    /// Object responses keep every field they already had. Anything else is
    /// wrapped under `result` so the annotations still have somewhere to live.
    pub fn attach_to(&self, value: Value) -> Value {
        if self.is_empty() {
            return value;
        }

        let mut object = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("result".to_string(), other);
                map
            }
        };
        object.insert("_warnings".to_string(), Value::from(self.warnings.clone()));
        object.insert("_suggestions".to_string(), Value::from(self.suggestions.clone()));
        Value::Object(object)
    }
}

/// Outcome of resolving a company by name.
///
/// The two non-enriched outcomes are ordinary data, not errors: a search
/// that finds nothing, or a best match without a usable domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompanyResolution {
    NotFound {
        error: String,
        found: bool,
        #[serde(flatten)]
        warnings: Warnings,
    },
    Unenrichable {
        error: String,
        found: bool,
        company_name: Option<String>,
        #[serde(flatten)]
        warnings: Warnings,
    },
    Enriched {
        search_match: Option<String>,
        search_domain: String,
        enrichment: Value,
        #[serde(flatten)]
        warnings: Warnings,
    },
}

impl CompanyResolution {
    pub fn not_found(query: &str, warnings: Warnings) -> Self {
        Self::NotFound {
            error: format!("No company found matching \"{}\"", query),
            found: false,
            warnings,
        }
    }

    pub fn unenrichable(company_name: Option<String>, warnings: Warnings) -> Self {
        Self::Unenrichable {
            error: format!(
                "Company \"{}\" found but no domain available",
                company_name.as_deref().unwrap_or("(unnamed)")
            ),
            found: true,
            company_name,
            warnings,
        }
    }

    pub fn enriched(
        search_match: Option<String>,
        search_domain: String,
        enrichment: Value,
        warnings: Warnings,
    ) -> Self {
        Self::Enriched {
            search_match,
            search_domain,
            enrichment,
            warnings,
        }
    }

    /// Whether the search produced a candidate at all.
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }

    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::Enriched { search_domain, .. } => Some(search_domain),
            _ => None,
        }
    }

    pub fn warnings(&self) -> &Warnings {
        match self {
            Self::NotFound { warnings, .. }
            | Self::Unenrichable { warnings, .. }
            | Self::Enriched { warnings, .. } => warnings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Success,
    Error,
}

/// One company's outcome inside a bulk resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkEntry {
    pub company_name: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CompanyResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkEntry {
    pub fn success(company_name: impl Into<String>, data: CompanyResolution) -> Self {
        Self {
            company_name: company_name.into(),
            status: EntryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(company_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            status: EntryStatus::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate report for a bulk resolution, entries in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResolution {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BulkEntry>,
}

impl BulkResolution {
    pub fn from_entries(results: Vec<BulkEntry>) -> Self {
        let successful = results
            .iter()
            .filter(|entry| entry.status == EntryStatus::Success)
            .count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }
}
