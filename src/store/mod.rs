//! Read access to the persisted website and check history.
//!
//! Checks are written by the external checker; nothing here mutates them.
//! Every lookup by url is restricted to enabled websites.

use async_trait::async_trait;

use crate::structures::{
    errors::UptimersError,
    model::{AvailabilityRow, CheckRow, CurrentStatusRow, DirectoryRow},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// A window into a website's check history. Values are passed to the store
/// unchanged, so a negative bound is the store's problem to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: 100,
            offset: 0,
        }
    }
}

#[async_trait]
pub trait CheckStore: Send + Sync {
    /// Identity of the website plus its newest check, by check id.
    async fn current_status(&self, url: &str) -> Result<Option<CurrentStatusRow>, UptimersError>;

    /// Newest check whose status code is not a success.
    async fn last_failure(&self, url: &str) -> Result<Option<CheckRow>, UptimersError>;

    /// Success and total check counts over the whole history.
    async fn availability(&self, url: &str) -> Result<Option<AvailabilityRow>, UptimersError>;

    /// Checks ordered newest first by check time.
    async fn results(&self, url: &str, page: Page) -> Result<Vec<CheckRow>, UptimersError>;

    /// Enabled and visible websites by name, each with its newest check if any.
    async fn directory(&self) -> Result<Vec<DirectoryRow>, UptimersError>;
}
