use serde::Deserialize;

/// Raw query parameters for the data endpoint. Everything is an optional
/// string so "absent" and "not an integer" stay distinguishable and can
/// produce the right validation message.
#[derive(Deserialize, Debug)]
pub struct DataQuery {
    pub url: Option<String>,
    pub page: Option<String>,
    pub rows_per_page: Option<String>,
}
