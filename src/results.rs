use crate::{
    store::{CheckStore, Page},
    structures::{errors::ApiError, responses::WebsiteCheckResult},
};

const MAX_BOUND: i64 = 9999;

/// Raw query parameters; parsed by hand so a bad value gets a precise message.
#[derive(Debug, Default)]
pub struct ResultsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ResultsQuery {
    /// The first occurrence of a repeated key wins; later ones are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = ResultsQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "limit" if query.limit.is_none() => query.limit = Some(value),
                "offset" if query.offset.is_none() => query.offset = Some(value),
                _ => {}
            }
        }
        query
    }
}

fn parse_bound(raw: Option<&str>, default: i64, name: &str, label: &str) -> Result<i64, ApiError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(default),
    };
    let value: i64 = raw.parse().map_err(|_| {
        ApiError::BadRequest(format!("Unable to parse given {}-parameter.", name))
    })?;
    if value > MAX_BOUND {
        return Err(ApiError::BadRequest(format!(
            "Unable to process your Request: {} has to be less than {}.",
            label,
            MAX_BOUND + 1
        )));
    }
    Ok(value)
}

impl Page {
    pub fn from_query(query: &ResultsQuery) -> Result<Self, ApiError> {
        let defaults = Page::default();
        Ok(Page {
            limit: parse_bound(query.limit.as_deref(), defaults.limit, "limit", "Limit")?,
            offset: parse_bound(query.offset.as_deref(), defaults.offset, "offset", "Offset")?,
        })
    }
}

/// Newest-first check history of an enabled website. Unknown and disabled
/// urls simply have no history.
pub async fn check_results(
    store: &dyn CheckStore,
    url: &str,
    page: Page,
) -> Result<Vec<WebsiteCheckResult>, ApiError> {
    let context = || format!("Unable to fetch results for {}", url);
    let checks = store
        .results(url, page)
        .await
        .map_err(|e| ApiError::internal(context(), e))?;
    checks
        .iter()
        .map(|check| WebsiteCheckResult::listed(check).map_err(|e| ApiError::internal(context(), e)))
        .collect()
}
