use actix_web::{http::header::ContentType, HttpResponse};
use serde::Serialize;

use super::{
    errors::{ApiError, UptimersError},
    model::CheckRow,
};

/// Every response body, successful or not, is `{"success": bool, ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Envelope<Message> {
    pub fn message(success: bool, message: impl Into<String>) -> Self {
        Envelope {
            success,
            body: Message {
                message: message.into(),
            },
        }
    }
}

/// Serializes `body` inside a successful envelope.
pub fn respond<T: Serialize>(body: T) -> Result<HttpResponse, ApiError> {
    let bytes = serde_json::to_vec(&Envelope {
        success: true,
        body,
    })
    .map_err(|e| ApiError::internal("Unable to serialize response", e))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(bytes))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WebsiteData {
    pub id: i32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WebsiteAvailability {
    pub up: i64,
    pub down: i64,
    pub total: i64,
    pub ratio: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteCheckResult {
    pub status: String,
    pub response_time: String,
    pub time: String,
}

impl WebsiteCheckResult {
    /// Shape used by the status endpoint: response time carries a ` ms` suffix.
    pub fn detailed(check: &CheckRow) -> Result<Self, UptimersError> {
        Ok(WebsiteCheckResult {
            status: format!("{} - {}", check.status_code, check.status_text),
            response_time: format!("{} ms", check.response_time),
            time: check.formatted_time()?,
        })
    }

    /// Shape used by the results endpoint: response time is emitted as stored.
    pub fn listed(check: &CheckRow) -> Result<Self, UptimersError> {
        Ok(WebsiteCheckResult {
            status: format!("{} - {}", check.status_code, check.status_text),
            response_time: check.response_time.clone(),
            time: check.formatted_time()?,
        })
    }

    /// Stand-in for the last failure of a website that never failed.
    pub fn unknown_failure() -> Self {
        WebsiteCheckResult {
            status: "0 - unknown".to_string(),
            response_time: "0 ms".to_string(),
            time: "0000-00-00 00:00:00".to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedWebsiteResponse {
    pub website_data: WebsiteData,
    pub availability: WebsiteAvailability,
    pub last_check_result: WebsiteCheckResult,
    pub last_failed_check_result: WebsiteCheckResult,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<WebsiteCheckResult>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BasicWebsite {
    pub name: String,
    pub protocol: String,
    pub url: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct WebsiteResponse {
    pub websites: Vec<BasicWebsite>,
}
