use async_trait::async_trait;
use futures::TryStreamExt;
use log::debug;
use sqlx::PgPool;

use super::{CheckStore, Page};
use crate::structures::{
    errors::UptimersError,
    model::{AvailabilityRow, CheckRow, CurrentStatusRow, DirectoryRow},
};

// Shared by the last-failure and availability queries so they can never
// classify the same check differently.
macro_rules! success_predicate {
    () => {
        "(checks.status_code LIKE '2%' OR checks.status_code LIKE '3%')"
    };
}

const CURRENT_STATUS: &str = r#"
    SELECT websites.id, websites.name, websites.protocol, websites.url,
           checks.status_code, checks.status_text, checks.response_time, checks.time
    FROM checks
    JOIN websites ON checks.website_id = websites.id
    WHERE websites.url = $1 AND websites.enabled
    ORDER BY checks.id DESC
    LIMIT 1
"#;

const LAST_FAILURE: &str = concat!(
    r#"
    SELECT checks.status_code, checks.status_text, checks.response_time, checks.time
    FROM checks
    JOIN websites ON checks.website_id = websites.id
    WHERE websites.url = $1 AND websites.enabled AND NOT "#,
    success_predicate!(),
    r#"
    ORDER BY checks.id DESC
    LIMIT 1
"#
);

const AVAILABILITY: &str = concat!(
    r#"
    SELECT COUNT(*) FILTER (WHERE "#,
    success_predicate!(),
    r#") AS up,
           COUNT(*) AS total
    FROM checks
    JOIN websites ON checks.website_id = websites.id
    WHERE websites.url = $1 AND websites.enabled
"#
);

const RESULTS: &str = r#"
    SELECT checks.status_code, checks.status_text, checks.response_time, checks.time
    FROM checks
    JOIN websites ON checks.website_id = websites.id
    WHERE websites.url = $1 AND websites.enabled
    ORDER BY checks.time DESC, checks.id DESC
    LIMIT $2 OFFSET $3
"#;

// One row per website; the lateral join yields NULLs for a website that has
// not been checked yet instead of shifting statuses onto its neighbours.
const DIRECTORY: &str = r#"
    SELECT websites.name, websites.protocol, websites.url,
           latest.status_code, latest.status_text
    FROM websites
    LEFT JOIN LATERAL (
        SELECT checks.status_code, checks.status_text
        FROM checks
        WHERE checks.website_id = websites.id
        ORDER BY checks.id DESC
        LIMIT 1
    ) AS latest ON TRUE
    WHERE websites.enabled AND websites.visible
    ORDER BY websites.name COLLATE "C", websites.id
"#;

pub struct PgCheckStore {
    pool: PgPool,
}

impl PgCheckStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckStore for PgCheckStore {
    async fn current_status(&self, url: &str) -> Result<Option<CurrentStatusRow>, UptimersError> {
        debug!("querying current status of {}", url);
        Ok(sqlx::query_as::<_, CurrentStatusRow>(CURRENT_STATUS)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn last_failure(&self, url: &str) -> Result<Option<CheckRow>, UptimersError> {
        debug!("querying last failure of {}", url);
        Ok(sqlx::query_as::<_, CheckRow>(LAST_FAILURE)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn availability(&self, url: &str) -> Result<Option<AvailabilityRow>, UptimersError> {
        debug!("querying availability of {}", url);
        Ok(sqlx::query_as::<_, AvailabilityRow>(AVAILABILITY)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn results(&self, url: &str, page: Page) -> Result<Vec<CheckRow>, UptimersError> {
        debug!(
            "querying results of {} (limit {}, offset {})",
            url, page.limit, page.offset
        );
        Ok(sqlx::query_as::<_, CheckRow>(RESULTS)
            .bind(url)
            .bind(page.limit)
            .bind(page.offset)
            .fetch(&self.pool)
            .try_collect()
            .await?)
    }

    async fn directory(&self) -> Result<Vec<DirectoryRow>, UptimersError> {
        debug!("querying website directory");
        Ok(sqlx::query_as::<_, DirectoryRow>(DIRECTORY)
            .fetch(&self.pool)
            .try_collect()
            .await?)
    }
}
