//! Defaults and ceilings for the service.

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_PAGE_NUM: i64 = 1;
pub const DEFAULT_PAGE_SIZE: usize = 100;
/// Requests above this are clamped, not rejected.
pub const MAX_PAGE_SIZE: usize = 5000;

pub const DEFAULT_INFER_SCHEMA_LEN: usize = 10000;

/// Server-stamped date column injected into every row of a response page.
pub const PUSH_DATE_COLUMN: &str = "pushDate";

/// Date-only rendering, used for date cells and the push date stamp.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
