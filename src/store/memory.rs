use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::PrimitiveDateTime;

use super::{CheckStore, Page};
use crate::structures::{
    errors::UptimersError,
    model::{AvailabilityRow, CheckRow, CurrentStatusRow, DirectoryRow},
};

/// A check counts as a success when its status code starts with `2` or `3`.
pub fn is_success(status_code: &str) -> bool {
    matches!(status_code.as_bytes().first(), Some(b'2' | b'3'))
}

#[derive(Debug, Clone)]
pub struct Website {
    pub id: i32,
    pub name: String,
    pub protocol: String,
    pub url: String,
    pub enabled: bool,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct Check {
    pub id: i64,
    pub website_id: i32,
    pub row: CheckRow,
}

/// Mirrors the Postgres queries over plain vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    websites: Vec<Website>,
    checks: Vec<Check>,
    broken: AtomicBool,
    skip_aggregates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn website(mut self, id: i32, name: &str, url: &str, enabled: bool, visible: bool) -> Self {
        self.websites.push(Website {
            id,
            name: name.to_string(),
            protocol: "https".to_string(),
            url: url.to_string(),
            enabled,
            visible,
        });
        self
    }

    /// Appends a check; ids grow with insertion order.
    pub fn check(
        mut self,
        website_id: i32,
        status_code: &str,
        status_text: &str,
        response_time: &str,
        time: PrimitiveDateTime,
    ) -> Self {
        let id = self.checks.len() as i64 + 1;
        self.checks.push(Check {
            id,
            website_id,
            row: CheckRow {
                status_code: status_code.to_string(),
                status_text: status_text.to_string(),
                response_time: response_time.to_string(),
                time,
            },
        });
        self
    }

    /// Makes every query fail.
    pub fn break_queries(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    /// Makes the availability query come back empty.
    pub fn skip_aggregates(&self) {
        self.skip_aggregates.store(true, Ordering::SeqCst);
    }

    fn guard(&self) -> Result<(), UptimersError> {
        match self.broken.load(Ordering::SeqCst) {
            true => Err(UptimersError::Other("connection refused".to_string())),
            false => Ok(()),
        }
    }

    fn enabled(&self, url: &str) -> Option<&Website> {
        self.websites.iter().find(|w| w.enabled && w.url == url)
    }

    /// Checks of a website, newest id first.
    fn history(&self, website_id: i32) -> Vec<&Check> {
        let mut checks: Vec<&Check> = self
            .checks
            .iter()
            .filter(|c| c.website_id == website_id)
            .collect();
        checks.sort_by(|a, b| b.id.cmp(&a.id));
        checks
    }
}

#[async_trait]
impl CheckStore for MemoryStore {
    async fn current_status(&self, url: &str) -> Result<Option<CurrentStatusRow>, UptimersError> {
        self.guard()?;
        let Some(website) = self.enabled(url) else {
            return Ok(None);
        };
        Ok(self.history(website.id).first().map(|c| CurrentStatusRow {
            id: website.id,
            name: website.name.clone(),
            protocol: website.protocol.clone(),
            url: website.url.clone(),
            check: c.row.clone(),
        }))
    }

    async fn last_failure(&self, url: &str) -> Result<Option<CheckRow>, UptimersError> {
        self.guard()?;
        let Some(website) = self.enabled(url) else {
            return Ok(None);
        };
        Ok(self
            .history(website.id)
            .into_iter()
            .find(|c| !is_success(&c.row.status_code))
            .map(|c| c.row.clone()))
    }

    async fn availability(&self, url: &str) -> Result<Option<AvailabilityRow>, UptimersError> {
        self.guard()?;
        if self.skip_aggregates.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let history = self
            .enabled(url)
            .map(|w| self.history(w.id))
            .unwrap_or_default();
        Ok(Some(AvailabilityRow {
            up: history
                .iter()
                .filter(|c| is_success(&c.row.status_code))
                .count() as i64,
            total: history.len() as i64,
        }))
    }

    async fn results(&self, url: &str, page: Page) -> Result<Vec<CheckRow>, UptimersError> {
        self.guard()?;
        if page.limit < 0 || page.offset < 0 {
            return Err(UptimersError::Other(
                "LIMIT and OFFSET must not be negative".to_string(),
            ));
        }
        let Some(website) = self.enabled(url) else {
            return Ok(Vec::new());
        };
        let mut history = self.history(website.id);
        history.sort_by(|a, b| b.row.time.cmp(&a.row.time).then(b.id.cmp(&a.id)));
        Ok(history
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(|c| c.row.clone())
            .collect())
    }

    async fn directory(&self) -> Result<Vec<DirectoryRow>, UptimersError> {
        self.guard()?;
        let mut websites: Vec<&Website> = self
            .websites
            .iter()
            .filter(|w| w.enabled && w.visible)
            .collect();
        websites.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()).then(a.id.cmp(&b.id)));
        Ok(websites
            .into_iter()
            .map(|w| {
                let latest = self.history(w.id).first().map(|c| c.row.clone());
                DirectoryRow {
                    name: w.name.clone(),
                    protocol: w.protocol.clone(),
                    url: w.url.clone(),
                    status_code: latest.as_ref().map(|c| c.status_code.clone()),
                    status_text: latest.map(|c| c.status_text),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_a_prefix_test() {
        assert!(is_success("200"));
        assert!(is_success("301"));
        assert!(is_success("3"));
        assert!(is_success("2xx"));
        assert!(!is_success("404"));
        assert!(!is_success("500"));
        assert!(!is_success("0"));
        assert!(!is_success(""));
        assert!(!is_success("timeout"));
        assert!(!is_success(" 200"));
    }
}
