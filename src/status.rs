use log::error;

use crate::{
    store::CheckStore,
    structures::{
        errors::ApiError,
        model::AvailabilityRow,
        responses::{DetailedWebsiteResponse, WebsiteAvailability, WebsiteCheckResult, WebsiteData},
    },
};

/// `None` when there is nothing to compute a ratio over.
pub fn availability(counts: AvailabilityRow) -> Option<WebsiteAvailability> {
    if counts.total <= 0 || counts.up < 0 || counts.up > counts.total {
        return None;
    }
    Some(WebsiteAvailability {
        up: counts.up,
        down: counts.total - counts.up,
        total: counts.total,
        ratio: format!("{:.2}%", counts.up as f64 / counts.total as f64 * 100.0),
    })
}

/// Current status, last failure and availability of the enabled website
/// registered under `url`. Queries run one after another and stop at the
/// first error, so the three parts are not a single snapshot.
pub async fn detailed_status(
    store: &dyn CheckStore,
    url: &str,
) -> Result<DetailedWebsiteResponse, ApiError> {
    let context = || format!("Unable to fetch website status for {}", url);

    let current = store
        .current_status(url)
        .await
        .map_err(|e| ApiError::internal(context(), e))?
        .ok_or_else(|| {
            ApiError::NotFound("Unable to find any data matching the given url.".to_string())
        })?;

    let last_failure = match store
        .last_failure(url)
        .await
        .map_err(|e| ApiError::internal(context(), e))?
    {
        Some(check) => {
            WebsiteCheckResult::detailed(&check).map_err(|e| ApiError::internal(context(), e))?
        }
        None => WebsiteCheckResult::unknown_failure(),
    };

    let counts = store
        .availability(url)
        .await
        .map_err(|e| ApiError::internal(context(), e))?;
    let Some(uptime) = counts.and_then(availability) else {
        error!(
            "{}: availability counts {:?} do not match an existing check",
            context(),
            counts
        );
        return Err(ApiError::Internal);
    };

    Ok(DetailedWebsiteResponse {
        website_data: WebsiteData {
            id: current.id,
            name: current.name,
            url: format!("{}://{}", current.protocol, current.url),
        },
        availability: uptime,
        last_check_result: WebsiteCheckResult::detailed(&current.check)
            .map_err(|e| ApiError::internal(context(), e))?,
        last_failed_check_result: last_failure,
    })
}
