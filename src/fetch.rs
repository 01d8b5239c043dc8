use bytes::Bytes;
use reqwest::Client;

use crate::errors::TabularError;

/// Downloads the remote file in a single attempt. No retries, no explicit
/// timeout; a non-2xx status or transport failure surfaces as
/// `TabularError::Fetch`.
pub async fn fetch_url(url: &str) -> Result<Bytes, TabularError> {
    log::debug!("Fetching remote file {url}");
    let client = Client::new();
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    log::debug!("Fetched {} bytes from {url}", bytes.len());
    Ok(bytes)
}
