use actix_web::{web, HttpRequest, HttpResponse};

use crate::constants::{DATE_FORMAT, PUSH_DATE_COLUMN};
use crate::errors::{TabularError, TabularHttpError};
use crate::params::{app_data, parse_data_query, DataQuery};
use crate::view::{Pagination, TabularPageResponse};
use crate::{fetch, paginate, tabular};

/// The data-retrieval pipeline: validate → fetch → decode → paginate →
/// serialize. Strictly linear, no state shared across requests.
pub async fn index(
    req: HttpRequest,
    query: web::Query<DataQuery>,
) -> Result<HttpResponse, TabularHttpError> {
    let app_data = app_data(&req)?;
    let params = parse_data_query(&query, &app_data.config)?;
    log::debug!(
        "data::index url {} page {} rows_per_page {}",
        params.url,
        params.page,
        params.rows_per_page
    );

    let bytes = fetch::fetch_url(&params.url).await?;
    let table = tabular::read_table(&params.url, &bytes)?;
    let bounds = paginate::paginate(table.height(), params.page, params.rows_per_page)?;

    // Stamped at response time, reflecting request time rather than data time
    let push_date = chrono::Local::now().format(DATE_FORMAT).to_string();
    let data = table.to_json_rows(bounds.start, bounds.end, PUSH_DATE_COLUMN, &push_date);

    let response = TabularPageResponse {
        data,
        pagination: Pagination {
            current_page: params.page,
            total_pages: bounds.total_pages,
            total_rows: table.height(),
            rows_per_page: params.rows_per_page,
        },
    };

    // Serialize explicitly so a serde failure becomes an error envelope
    // instead of an unhandled fault.
    let body = serde_json::to_string(&response).map_err(TabularError::from)?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
