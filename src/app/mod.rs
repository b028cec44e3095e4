//! Interactive download flow
//!
//! menu → letter filter → paginated browse → vault ID → resolve → download

use crate::config::Config;
use crate::tui::{self, prompt, Browser, Tui};
use crate::vault::{Downloaded, GameEntry, VaultClient};

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// Main application struct that orchestrates all components
pub struct App {
    client: VaultClient,
}

impl App {
    /// Create a new App instance
    pub fn new(config: Config) -> Result<Self> {
        let client = VaultClient::new(config).context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    pub fn config(&self) -> &Config {
        self.client.config()
    }

    /// Run the whole interactive flow once
    pub async fn run(&self) -> Result<Downloaded> {
        tui::clear_screen()?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();

        let (heading, entries) = self.choose_listing(&mut input, &mut out).await?;

        let mut browser = Browser::new(entries, self.config().page_size);
        Tui::new()?.browse(&mut browser, &heading)?;

        writeln!(out)?;
        prompt::print_page(&mut out, browser.current_page_entries())?;
        let vault_id = prompt::prompt(
            &mut input,
            &mut out,
            "Enter the vault ID from the game menu above: ",
        )?;
        if vault_id.is_empty() {
            bail!("No vault ID entered");
        }

        self.download(&vault_id, &mut out).await
    }

    /// Menu and letter prompts, then scrape the chosen listing
    async fn choose_listing<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(String, Vec<GameEntry>)> {
        prompt::print_menu(out, self.config())?;

        let selection = prompt::prompt(input, out, "\nSelect the system # : ")?;
        let Some(system) = prompt::parse_system_selection(self.config(), &selection) else {
            writeln!(out, "Invalid system selection")?;
            bail!("Invalid system selection '{}'", selection);
        };

        let filter = prompt::prompt(input, out, "Enter A-Z to see a list of games: ")?;
        let url = system.listing_url(&filter);
        tracing::info!("Listing {} ({})", system.name, url);

        let games = self
            .client
            .fetch_game_list(&url)
            .await
            .with_context(|| format!("Failed to fetch game list from {}", url))?;

        Ok((system.name.clone(), GameEntry::from_list(&games)))
    }

    /// Resolve a vault ID and download it into its platform folder.
    ///
    /// Routing warnings for unmapped platforms go to `out`.
    pub async fn download<W: Write>(&self, vault_id: &str, out: &mut W) -> Result<Downloaded> {
        let config = self.config();

        let resolved = self
            .client
            .resolve_download(vault_id)
            .await
            .with_context(|| format!("Failed to resolve vault ID {}", vault_id))?;

        if resolved.folder.is_none() {
            let root = config.output_root.display();
            match resolved.platform {
                Some(_) => writeln!(out, "No console match - saving ROM to {}.", root)?,
                None => writeln!(out, "No console found - saving ROM to {}.", root)?,
            }
        }

        let output_dir = config.output_dir(resolved.folder.as_deref());
        let referer = config.detail_url(vault_id);
        let download_url = config.download_url(&resolved.media_id)?;

        self.client
            .download_file(&output_dir, &referer, &download_url)
            .await
            .with_context(|| format!("Download failed for vault ID {}", vault_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use mockito::Matcher;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn app_for(server: &mockito::Server, root: &std::path::Path) -> App {
        let mut config = Config::with_vault_base(&format!("{}/vault", server.url()));
        config.download_base = format!("{}/download/", server.url());
        config.output_root = root.to_path_buf();
        App::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_choose_listing() {
        let mut server = mockito::Server::new_async().await;
        let root = TempDir::new().unwrap();
        let app = app_for(&server, root.path());

        server
            .mock("GET", "/vault/GB/T")
            .with_status(200)
            .with_body(
                r#"<table class="rounded">
                    <tr><td><a href="/vault/2">Tetris</a></td></tr>
                    <tr><td><a href="/vault/1">Tennis</a></td></tr>
                </table>"#,
            )
            .create_async()
            .await;

        let mut input = Cursor::new("11\nT\n");
        let mut out = Vec::new();
        let (heading, entries) = app.choose_listing(&mut input, &mut out).await.unwrap();

        assert_eq!(heading, "Game Boy");
        assert_eq!(
            entries,
            vec![
                GameEntry {
                    title: "Tennis".into(),
                    vault_id: "1".into()
                },
                GameEntry {
                    title: "Tetris".into(),
                    vault_id: "2".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_system_selection() {
        let server = mockito::Server::new_async().await;
        let root = TempDir::new().unwrap();
        let app = app_for(&server, root.path());

        let mut input = Cursor::new("42\n");
        let mut out = Vec::new();
        let err = app.choose_listing(&mut input, &mut out).await.unwrap_err();

        assert!(err.to_string().contains("Invalid system selection"));
        assert!(String::from_utf8(out).unwrap().ends_with("Invalid system selection\n"));
    }

    #[tokio::test]
    async fn test_download_routes_unknown_platform_to_root() {
        let mut server = mockito::Server::new_async().await;
        let root = TempDir::new().unwrap();
        let app = app_for(&server, root.path());

        server
            .mock("GET", "/vault/321")
            .with_status(200)
            .with_body(r#"<input name="mediaId" value="555"><input name="system" value="Jaguar">"#)
            .create_async()
            .await;
        server
            .mock("GET", "/download/")
            .match_query(Matcher::UrlEncoded("mediaId".into(), "555".into()))
            .with_status(200)
            .with_header("content-disposition", r#"attachment; filename="Cybermorph.zip""#)
            .with_body("zip")
            .create_async()
            .await;

        let mut out = Vec::new();
        let downloaded = app.download("321", &mut out).await.unwrap();
        assert_eq!(downloaded.path, root.path().join("Cybermorph.zip"));
        assert!(downloaded.path.exists());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("No console match - saving ROM to {}.\n", root.path().display())
        );
    }

    #[tokio::test]
    async fn test_download_without_platform_warns() {
        let mut server = mockito::Server::new_async().await;
        let root = TempDir::new().unwrap();
        let app = app_for(&server, root.path());

        server
            .mock("GET", "/vault/77")
            .with_status(200)
            .with_body(r#"<input name="mediaId" value="77">"#)
            .create_async()
            .await;
        server
            .mock("GET", "/download/")
            .match_query(Matcher::UrlEncoded("mediaId".into(), "77".into()))
            .with_status(200)
            .with_header("content-disposition", r#"attachment; filename="Mystery.zip""#)
            .with_body("zip")
            .create_async()
            .await;

        let mut out = Vec::new();
        let downloaded = app.download("77", &mut out).await.unwrap();
        assert_eq!(downloaded.path, root.path().join("Mystery.zip"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("No console found - saving ROM to {}.\n", root.path().display())
        );
    }

    #[tokio::test]
    async fn test_mapped_platform_prints_no_warning() {
        let mut server = mockito::Server::new_async().await;
        let root = TempDir::new().unwrap();
        let app = app_for(&server, root.path());

        server
            .mock("GET", "/vault/5")
            .with_status(200)
            .with_body(r#"<input name="mediaId" value="5"><input name="system" value="GB">"#)
            .create_async()
            .await;
        server
            .mock("GET", "/download/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-disposition", r#"attachment; filename="Tetris.zip""#)
            .with_body("zip")
            .create_async()
            .await;

        let mut out = Vec::new();
        let downloaded = app.download("5", &mut out).await.unwrap();
        assert_eq!(downloaded.path, root.path().join("GB").join("Tetris.zip"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_download_failure_is_typed() {
        let mut server = mockito::Server::new_async().await;
        let root = TempDir::new().unwrap();
        let app = app_for(&server, root.path());

        server
            .mock("GET", "/vault/9")
            .with_status(200)
            .with_body(r#"<input name="mediaId" value="9"><input name="system" value="GBA">"#)
            .create_async()
            .await;
        server
            .mock("GET", "/download/")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let err = app.download("9", &mut Vec::<u8>::new()).await.unwrap_err();
        match err.downcast_ref::<VaultError>() {
            Some(VaultError::DownloadFailed(status)) => assert_eq!(status, "403 Forbidden"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
