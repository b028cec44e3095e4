//! Vimm's Lair vault client: catalog scraping, detail resolution, downloads

pub mod catalog;
pub mod detail;
pub mod download;

pub use catalog::{parse_game_list, GameEntry, GameList};
pub use detail::{parse_detail_page, ResolvedDownload};
pub use download::{content_disposition_filename, Downloaded};

use crate::config::Config;
use crate::error::{Result, VaultError};
use reqwest::StatusCode;
use std::sync::Arc;

/// HTTP client for the vault.
///
/// Certificate validation is disabled for every request; the vault's
/// download hosts do not present a chain that verifies everywhere.
#[derive(Clone)]
pub struct VaultClient {
    client: Arc<reqwest::Client>,
    config: Arc<Config>,
}

impl VaultClient {
    /// Create a new vault client
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET an HTML page, failing on anything but 200
    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.config.page_timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("{} returned {}", url, status);
            return Err(VaultError::Status {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
