//! Detail page resolution (media token + platform folder)

use super::VaultClient;
use crate::config::Config;
use crate::error::{Result, VaultError};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static MEDIA_ID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input[name='mediaId']").expect("valid selector"));
static SYSTEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input[name='system']").expect("valid selector"));

/// What a detail page tells us about a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDownload {
    /// Token for the download endpoint
    pub media_id: String,
    /// Platform code from the page, if it had one
    pub platform: Option<String>,
    /// ROM folder for the platform; `None` routes to the output root
    pub folder: Option<String>,
}

/// Pull the media token and platform folder out of a detail page
pub fn parse_detail_page(html: &str, config: &Config) -> Result<ResolvedDownload> {
    let document = Html::parse_document(html);

    let media_id = document
        .select(&MEDIA_ID)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(VaultError::MissingMediaId)?;

    let platform = document
        .select(&SYSTEM)
        .next()
        .map(|input| input.value().attr("value").unwrap_or_default().trim().to_string());

    let folder = platform
        .as_deref()
        .and_then(|code| config.platform_folder(code))
        .map(str::to_string);

    Ok(ResolvedDownload {
        media_id,
        platform,
        folder,
    })
}

impl VaultClient {
    /// Fetch a detail page and resolve its download token and folder
    pub async fn resolve_download(&self, vault_id: &str) -> Result<ResolvedDownload> {
        let url = self.config.detail_url(vault_id);
        let html = self.fetch_page(&url).await?;
        let resolved = parse_detail_page(&html, &self.config)?;

        match (&resolved.platform, &resolved.folder) {
            (Some(code), None) => {
                tracing::warn!("Unknown platform code '{}' for {}", code, vault_id)
            }
            (None, _) => tracing::warn!("No platform code on detail page for {}", vault_id),
            _ => tracing::debug!(
                "Resolved {} -> mediaId={} folder={:?}",
                vault_id,
                resolved.media_id,
                resolved.folder
            ),
        }

        Ok(resolved)
    }
}
