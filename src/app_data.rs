use crate::constants::{DEFAULT_HOST, DEFAULT_PAGE_SIZE, DEFAULT_PORT, MAX_PAGE_SIZE};

/// Process configuration, built once at startup and passed into the
/// request handlers via actix app data. No global mutable state.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl ServerConfig {
    pub fn from_env() -> ServerConfig {
        let host = std::env::var("HOST").unwrap_or_else(|_| String::from(DEFAULT_HOST));
        let port: u16 = match std::env::var("PORT") {
            Ok(port) => port.parse::<u16>().expect("PORT must be a number"),
            Err(_) => DEFAULT_PORT,
        };
        ServerConfig {
            host,
            port,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabularAppData {
    pub config: ServerConfig,
}

impl TabularAppData {
    pub fn new(config: ServerConfig) -> TabularAppData {
        TabularAppData { config }
    }
}
