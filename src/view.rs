use serde::{Deserialize, Serialize};

pub const MSG_SERVICE_RUNNING: &str = "Service is running";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> HealthResponse {
        HealthResponse {
            status: String::from("ok"),
            message: String::from(MSG_SERVICE_RUNNING),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows_per_page: usize,
}

/// One page of rows plus its pagination metadata. Rows are JSON objects
/// keyed by column name, in file column order.
#[derive(Serialize, Deserialize, Debug)]
pub struct TabularPageResponse {
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
    pub pagination: Pagination,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl AsRef<str>) -> ErrorResponse {
        ErrorResponse {
            error: error.as_ref().to_string(),
            details: None,
        }
    }

    pub fn with_details(error: impl AsRef<str>, details: impl AsRef<str>) -> ErrorResponse {
        ErrorResponse {
            error: error.as_ref().to_string(),
            details: Some(details.as_ref().to_string()),
        }
    }
}
