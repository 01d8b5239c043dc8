use actix_web::HttpRequest;

use crate::app_data::{ServerConfig, TabularAppData};
use crate::constants::DEFAULT_PAGE_NUM;
use crate::errors::{TabularError, TabularHttpError};

pub mod data_query;
pub use data_query::DataQuery;

pub fn app_data(req: &HttpRequest) -> Result<&TabularAppData, TabularHttpError> {
    req.app_data::<TabularAppData>()
        .ok_or(TabularHttpError::AppDataDoesNotExist)
}

/// Validated parameters for the data endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataParams {
    pub url: String,
    /// 1-based. May still be out of range; that check is deferred to the
    /// paginator once the total row count is known.
    pub page: i64,
    pub rows_per_page: usize,
}

/// Validates the raw query against the configured page-size bounds.
/// Oversized `rows_per_page` is silently clamped to the ceiling, not
/// rejected.
pub fn parse_data_query(
    query: &DataQuery,
    config: &ServerConfig,
) -> Result<DataParams, TabularError> {
    let url = match &query.url {
        Some(url) if !url.is_empty() => url.clone(),
        _ => return Err(TabularError::validation("URL parameter is required")),
    };

    let page = match &query.page {
        None => DEFAULT_PAGE_NUM,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| TabularError::validation("Page parameter must be a valid integer"))?,
    };

    let rows_per_page = match &query.rows_per_page {
        None => config.default_page_size as i64,
        Some(raw) => raw.parse::<i64>().map_err(|_| {
            TabularError::validation("Rows per page parameter must be a valid integer")
        })?,
    };
    if rows_per_page < 1 {
        return Err(TabularError::validation(
            "Rows per page parameter must be a valid integer",
        ));
    }
    let mut rows_per_page = rows_per_page as usize;
    if rows_per_page > config.max_page_size {
        log::warn!(
            "rows_per_page {} exceeds the maximum, clamping to {}",
            rows_per_page,
            config.max_page_size
        );
        rows_per_page = config.max_page_size;
    }

    Ok(DataParams {
        url,
        page,
        rows_per_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TabularError;

    fn config() -> ServerConfig {
        ServerConfig {
            host: String::from("127.0.0.1"),
            port: 0,
            default_page_size: 100,
            max_page_size: 5000,
        }
    }

    fn query(url: Option<&str>, page: Option<&str>, rows_per_page: Option<&str>) -> DataQuery {
        DataQuery {
            url: url.map(String::from),
            page: page.map(String::from),
            rows_per_page: rows_per_page.map(String::from),
        }
    }

    #[test]
    fn test_parse_data_query_defaults() -> Result<(), TabularError> {
        let params = parse_data_query(&query(Some("http://x/f.csv"), None, None), &config())?;
        assert_eq!(params.page, 1);
        assert_eq!(params.rows_per_page, 100);
        Ok(())
    }

    #[test]
    fn test_parse_data_query_missing_url() {
        let err = parse_data_query(&query(None, Some("1"), None), &config()).unwrap_err();
        match err {
            TabularError::Validation(msg) => {
                assert_eq!(msg.to_string(), "URL parameter is required");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_data_query_empty_url() {
        let err = parse_data_query(&query(Some(""), None, None), &config()).unwrap_err();
        assert!(matches!(err, TabularError::Validation(_)));
    }

    #[test]
    fn test_parse_data_query_bad_page() {
        let err =
            parse_data_query(&query(Some("http://x/f.csv"), Some("abc"), None), &config())
                .unwrap_err();
        match err {
            TabularError::Validation(msg) => {
                assert_eq!(msg.to_string(), "Page parameter must be a valid integer");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_data_query_bad_rows_per_page() {
        let err = parse_data_query(
            &query(Some("http://x/f.csv"), None, Some("ten")),
            &config(),
        )
        .unwrap_err();
        match err {
            TabularError::Validation(msg) => {
                assert_eq!(
                    msg.to_string(),
                    "Rows per page parameter must be a valid integer"
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_data_query_clamps_oversized_rows_per_page() -> Result<(), TabularError> {
        let params = parse_data_query(
            &query(Some("http://x/f.csv"), None, Some("6000")),
            &config(),
        )?;
        assert_eq!(params.rows_per_page, 5000);
        Ok(())
    }

    #[test]
    fn test_parse_data_query_negative_page_passes_validation() -> Result<(), TabularError> {
        // Out-of-range pages are the paginator's concern.
        let params = parse_data_query(
            &query(Some("http://x/f.csv"), Some("-3"), None),
            &config(),
        )?;
        assert_eq!(params.page, -3);
        Ok(())
    }
}
