use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};
use std::fmt;
use std::io;

use crate::view::ErrorResponse;

/// Wraps a string and implements the traits needed to carry it in an error enum.
pub struct StringError(String);

impl From<&str> for StringError {
    fn from(s: &str) -> Self {
        StringError(s.to_string())
    }
}

impl From<String> for StringError {
    fn from(s: String) -> Self {
        StringError(s)
    }
}

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for StringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StringError {}

/// Everything that can go wrong in the fetch/decode/paginate pipeline.
#[derive(Debug, Display, Error)]
pub enum TabularError {
    // Bad or missing request parameters
    Validation(StringError),

    // File extension we do not decode
    UnsupportedFormat(StringError),

    // Page out of the computed range
    InvalidPage(StringError),

    // Could not retrieve the remote file
    Fetch(reqwest::Error),

    // Malformed payload or unexpected internal failure
    Processing(StringError),

    // Last-resort: the response envelope itself would not serialize
    Serialization(StringError),

    // External library errors, all treated as processing failures
    IO(io::Error),
    Polars(polars::prelude::PolarsError),
    Excel(calamine::Error),
}

impl TabularError {
    pub fn validation(msg: impl AsRef<str>) -> TabularError {
        TabularError::Validation(msg.as_ref().into())
    }

    pub fn unsupported_format() -> TabularError {
        TabularError::UnsupportedFormat(
            "Unsupported file format. Only .xlsx, .xls, and .csv are supported".into(),
        )
    }

    pub fn invalid_page(total_pages: usize) -> TabularError {
        TabularError::InvalidPage(
            format!("Invalid page number. Valid range: 1-{total_pages}").into(),
        )
    }

    pub fn processing(msg: impl AsRef<str>) -> TabularError {
        TabularError::Processing(msg.as_ref().into())
    }
}

impl From<reqwest::Error> for TabularError {
    fn from(error: reqwest::Error) -> Self {
        TabularError::Fetch(error)
    }
}

impl From<io::Error> for TabularError {
    fn from(error: io::Error) -> Self {
        TabularError::IO(error)
    }
}

impl From<polars::prelude::PolarsError> for TabularError {
    fn from(error: polars::prelude::PolarsError) -> Self {
        TabularError::Polars(error)
    }
}

impl From<calamine::Error> for TabularError {
    fn from(error: calamine::Error) -> Self {
        TabularError::Excel(error)
    }
}

impl From<serde_json::Error> for TabularError {
    fn from(error: serde_json::Error) -> Self {
        TabularError::Serialization(error.to_string().into())
    }
}

/// Boundary error for the request handlers. Every pipeline error is caught
/// here and turned into a flat `{error, details?}` JSON body; nothing
/// propagates as an unhandled fault.
#[derive(Debug, Display, Error)]
pub enum TabularHttpError {
    AppDataDoesNotExist,

    // Translate TabularError to TabularHttpError
    InternalTabularError(TabularError),
}

impl From<TabularError> for TabularHttpError {
    fn from(error: TabularError) -> Self {
        TabularHttpError::InternalTabularError(error)
    }
}

impl error::ResponseError for TabularHttpError {
    fn error_response(&self) -> HttpResponse {
        match self {
            TabularHttpError::AppDataDoesNotExist => {
                log::error!("AppData does not exist");
                HttpResponse::InternalServerError()
                    .json(ErrorResponse::new("Internal server error"))
            }
            TabularHttpError::InternalTabularError(error) => match error {
                TabularError::Validation(msg) => {
                    HttpResponse::BadRequest().json(ErrorResponse::new(msg.to_string()))
                }
                TabularError::UnsupportedFormat(msg) => {
                    HttpResponse::BadRequest().json(ErrorResponse::new(msg.to_string()))
                }
                TabularError::InvalidPage(msg) => {
                    HttpResponse::BadRequest().json(ErrorResponse::new(msg.to_string()))
                }
                TabularError::Fetch(err) => {
                    log::debug!("Error fetching remote file: {err:?}");
                    HttpResponse::BadRequest()
                        .json(ErrorResponse::new(format!("Error fetching file: {err}")))
                }
                TabularError::Serialization(msg) => {
                    log::error!("Serialization error: {msg}");
                    HttpResponse::InternalServerError().json(ErrorResponse::with_details(
                        "Could not serialize response data",
                        msg.to_string(),
                    ))
                }
                TabularError::Processing(msg) => {
                    log::error!("Processing error: {msg}");
                    HttpResponse::InternalServerError()
                        .json(ErrorResponse::new(format!("Error processing file: {msg}")))
                }
                TabularError::IO(err) => {
                    log::error!("IO error: {err:?}");
                    HttpResponse::InternalServerError()
                        .json(ErrorResponse::new(format!("Error processing file: {err}")))
                }
                TabularError::Polars(err) => {
                    log::error!("Polars error: {err:?}");
                    HttpResponse::InternalServerError()
                        .json(ErrorResponse::new(format!("Error processing file: {err}")))
                }
                TabularError::Excel(err) => {
                    log::error!("Excel error: {err:?}");
                    HttpResponse::InternalServerError()
                        .json(ErrorResponse::new(format!("Error processing file: {err}")))
                }
            },
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            TabularHttpError::AppDataDoesNotExist => StatusCode::INTERNAL_SERVER_ERROR,
            TabularHttpError::InternalTabularError(error) => match error {
                TabularError::Validation(_) => StatusCode::BAD_REQUEST,
                TabularError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
                TabularError::InvalidPage(_) => StatusCode::BAD_REQUEST,
                TabularError::Fetch(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}
