use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::store::PageParams;

/// Generic response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
        }
    }
}

/// Page window query parameters, defaulting to the first ten entries.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page_index")]
    pub page_index: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_index() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

impl From<&PageQuery> for PageParams {
    fn from(query: &PageQuery) -> Self {
        PageParams {
            page_index: query.page_index.max(1),
            page_size: query.page_size.clamp(1, 100),
        }
    }
}

/// Short human-readable event time, e.g. " 2 Jan 15:04".
pub fn format_short_time(time: &DateTime<Utc>) -> String {
    time.format("%e %b %H:%M").to_string()
}

/// Body returned by the create endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: uuid::Uuid,
}
