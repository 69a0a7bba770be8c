//! Plain HTTP fetch of a published spreadsheet's CSV export.

use async_trait::async_trait;
use clabot_core::{CheckError, SheetFetcher};
use reqwest::StatusCode;
use tracing::info;

#[derive(Default)]
pub struct SheetClient {
    client: reqwest::Client,
}

impl SheetClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SheetFetcher for SheetClient {
    /// Anything but `200 OK` is a fetch error, including other 2xx codes.
    async fn fetch_csv(&self, url: &str) -> Result<Vec<u8>, CheckError> {
        info!(url = %url, "fetching signer sheet");
        let target = format!("signer sheet {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CheckError::fetch(&target, e))?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(CheckError::fetch(&target, format!("sheet returned {status}")));
        }

        let body = resp.bytes().await.map_err(|e| CheckError::fetch(&target, e))?;
        Ok(body.to_vec())
    }
}
