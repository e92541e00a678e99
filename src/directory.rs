use crate::{
    store::CheckStore,
    structures::{
        errors::ApiError,
        model::DirectoryRow,
        responses::BasicWebsite,
    },
};

impl From<DirectoryRow> for BasicWebsite {
    fn from(row: DirectoryRow) -> Self {
        let status = match (row.status_code, row.status_text) {
            (Some(code), Some(text)) => format!("{} - {}", code, text),
            // not checked yet
            _ => "0 - unknown".to_string(),
        };
        BasicWebsite {
            name: row.name,
            protocol: row.protocol,
            url: row.url,
            status,
        }
    }
}

/// Enabled and visible websites ordered by name, each with its latest status.
pub async fn public_directory(store: &dyn CheckStore) -> Result<Vec<BasicWebsite>, ApiError> {
    Ok(store
        .directory()
        .await
        .map_err(|e| ApiError::internal("Unable to fetch websites", e))?
        .into_iter()
        .map(BasicWebsite::from)
        .collect())
}
