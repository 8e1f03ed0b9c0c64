//! API endpoint groups.

mod organizations;
mod people;

pub use organizations::{CompanySearchResponse, OrganizationSummary, OrganizationsApi};
pub use people::PeopleApi;

use serde_json::Value;

/// Number of records a search returned, for the zero-results advisory.
///
/// Sums the lengths of whichever list fields are present; without any,
/// falls back to the reported total and finally to zero.
pub(crate) fn result_count(response: &Value, list_fields: &[&str]) -> u64 {
    let lists: Vec<usize> = list_fields
        .iter()
        .filter_map(|field| response.get(*field).and_then(Value::as_array))
        .map(Vec::len)
        .collect();

    if !lists.is_empty() {
        return lists.iter().sum::<usize>() as u64;
    }

    response
        .get("total_entries")
        .or_else(|| response.pointer("/pagination/total_entries"))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}
