// Heuristic checks that flag queries likely to return bad or empty results

use crate::normalize::detect_accents;
use crate::types::Warnings;

/// Companies known worldwide. Pairing one of these with a location hint
/// tends to match a local namesake instead of the real company.
const GLOBAL_COMPANIES: &[&str] = &[
    "openai", "anthropic", "google", "microsoft", "amazon", "meta", "facebook",
    "apple", "netflix", "tesla", "nvidia", "datadog", "stripe", "salesforce",
    "oracle", "ibm", "intel", "amd", "cisco", "adobe", "spotify", "uber",
    "airbnb", "twitter", "linkedin", "slack", "zoom", "dropbox", "github",
    "gitlab", "atlassian", "shopify", "twilio", "snowflake", "palantir",
    "mistral", "cohere", "hugging face", "huggingface", "stability ai",
];

/// Case-insensitive containment in either direction against the
/// global company list.
pub fn is_global_company(name: &str) -> bool {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    GLOBAL_COMPANIES
        .iter()
        .any(|known| normalized.contains(known) || known.contains(normalized.as_str()))
}

/// The arguments of a request that the advisor looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdviceContext<'a> {
    /// Free-text keyword input sent to a search endpoint.
    pub keywords: Option<&'a str>,
    pub company_name: Option<&'a str>,
    pub location_hint: Option<&'a str>,
}

/// Evaluate every rule against the request and, when known, the number of
/// results the remote returned. Rules are additive and emitted in order.
pub fn advise(ctx: &AdviceContext<'_>, result_count: Option<u64>) -> Warnings {
    let mut warnings = Warnings::new();

    let accents = ctx.keywords.map(|text| (text, detect_accents(text)));

    if let Some((text, check)) = &accents {
        if check.has_accents {
            warnings.push(
                format!("Accented characters detected in search keywords: \"{}\"", text),
                format!(
                    "Apollo does not handle accents well. Try without accents: \"{}\"",
                    check.normalized
                ),
            );
        }
    }

    let hint = ctx.location_hint.filter(|hint| !hint.trim().is_empty());
    if let (Some(company), Some(_)) = (ctx.company_name, hint) {
        if is_global_company(company) {
            warnings.push(
                format!("location_hint used with a global company: \"{}\"", company),
                format!(
                    "\"{}\" is a global company, so location_hint can cause false positives. Try again without location_hint.",
                    company
                ),
            );
        }
    }

    if result_count == Some(0) {
        if let Some((_, check)) = &accents {
            if check.has_accents {
                warnings.push(
                    "0 results, most likely caused by the accents in the search",
                    format!("Retry the search with \"{}\"", check.normalized),
                );
            }
        }
    }

    warnings
}

/// True when neither name contains the other, ignoring case.
pub fn names_mismatch(query: &str, candidate: &str) -> bool {
    let query = query.to_lowercase();
    let candidate = candidate.to_lowercase();
    !candidate.contains(&query) && !query.contains(&candidate)
}

/// Flag a best match whose name has little to do with the query. Only
/// raised when a location hint was used, since that is what usually drags
/// in a namesake.
pub fn advise_match(
    query: &str,
    candidate: Option<&str>,
    location_hint: Option<&str>,
    warnings: &mut Warnings,
) {
    let hinted = location_hint.is_some_and(|hint| !hint.trim().is_empty());
    let candidate_name = candidate.unwrap_or_default();
    if hinted && names_mismatch(query, candidate_name) {
        warnings.push(
            format!(
                "Possibly incorrect match: searched \"{}\", found \"{}\"",
                query, candidate_name
            ),
            "The result does not match the query exactly. Check that it is the right company or retry without location_hint.",
        );
    }
}
