use time::{macros::format_description, PrimitiveDateTime};

use super::errors::UptimersError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckRow {
    pub status_code: String,
    pub status_text: String,
    pub response_time: String,
    pub time: PrimitiveDateTime,
}

impl CheckRow {
    /// `YYYY-MM-DD HH:MM:SS`
    pub fn formatted_time(&self) -> Result<String, UptimersError> {
        Ok(self
            .time
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))?)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentStatusRow {
    pub id: i32,
    pub name: String,
    pub protocol: String,
    pub url: String,
    #[sqlx(flatten)]
    pub check: CheckRow,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct AvailabilityRow {
    pub up: i64,
    pub total: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DirectoryRow {
    pub name: String,
    pub protocol: String,
    pub url: String,
    pub status_code: Option<String>,
    pub status_text: Option<String>,
}
