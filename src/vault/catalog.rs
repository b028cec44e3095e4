//! Catalog listing scraper

use super::VaultClient;
use crate::error::Result;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.rounded").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Title → vault ID. Titles are not unique on the site; the last row wins.
pub type GameList = BTreeMap<String, String>;

/// One row of a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntry {
    pub title: String,
    pub vault_id: String,
}

impl GameEntry {
    /// Flatten a game list into entries sorted by title
    pub fn from_list(list: &GameList) -> Vec<GameEntry> {
        list.iter()
            .map(|(title, vault_id)| GameEntry {
                title: title.clone(),
                vault_id: vault_id.clone(),
            })
            .collect()
    }
}

/// Extract title → vault ID pairs from a listing page.
///
/// Each row of a `table.rounded` contributes its first cell's first link:
/// the link text is the title and the last `/` segment of the href is the ID.
/// Rows without a cell or link (header rows) are skipped.
pub fn parse_game_list(html: &str) -> GameList {
    let document = Html::parse_document(html);
    let mut games = GameList::new();

    for table in document.select(&TABLE) {
        for row in table.select(&ROW) {
            let Some(link) = row
                .select(&CELL)
                .next()
                .and_then(|cell| cell.select(&LINK).next())
            else {
                continue;
            };

            let title = link.text().collect::<String>().trim().to_string();
            let href = link.value().attr("href").unwrap_or_default();
            let vault_id = href.rsplit('/').next().unwrap_or_default().to_string();

            games.insert(title, vault_id);
        }
    }

    games
}

impl VaultClient {
    /// Fetch and parse one catalog listing page
    pub async fn fetch_game_list(&self, catalog_url: &str) -> Result<GameList> {
        let html = self.fetch_page(catalog_url).await?;
        let games = parse_game_list(&html);
        tracing::info!("Scraped {} games from {}", games.len(), catalog_url);
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::VaultError;

    const LISTING: &str = r#"
        <html><body>
        <table class="rounded centered cellpadding1 hovertable striped">
            <tr><th>Name</th><th>Region</th></tr>
            <tr><td><a href="/vault/7316">Castlevania: Symphony of the Night</a></td><td>USA</td></tr>
            <tr><td><a href="/vault/6938">Chrono Cross</a> <a href="/vault/9999">ignored</a></td><td>USA</td></tr>
            <tr><td><a href="https://vimm.net/vault/6935">Crash Bandicoot</a></td><td><a href="/other">x</a></td></tr>
        </table>
        <table class="other"><tr><td><a href="/vault/1">Not a game</a></td></tr></table>
        </body></html>
    "#;

    #[test]
    fn test_parse_game_list() {
        let games = parse_game_list(LISTING);

        assert_eq!(games.len(), 3);
        assert_eq!(
            games.get("Castlevania: Symphony of the Night").map(String::as_str),
            Some("7316")
        );
        assert_eq!(games.get("Chrono Cross").map(String::as_str), Some("6938"));
        assert_eq!(games.get("Crash Bandicoot").map(String::as_str), Some("6935"));
        assert!(!games.contains_key("Not a game"));
    }

    #[test]
    fn test_duplicate_titles_last_wins() {
        let html = r#"<table class="rounded">
            <tr><td><a href="/vault/1">Tetris</a></td></tr>
            <tr><td><a href="/vault/2">Tetris</a></td></tr>
        </table>"#;

        let games = parse_game_list(html);
        assert_eq!(games.len(), 1);
        assert_eq!(games["Tetris"], "2");
    }

    #[test]
    fn test_entries_sorted_by_title() {
        let entries = GameEntry::from_list(&parse_game_list(LISTING));
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Castlevania: Symphony of the Night",
                "Chrono Cross",
                "Crash Bandicoot"
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_game_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/vault/PS1/C")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(LISTING)
            .create_async()
            .await;

        let config = Config::with_vault_base(&format!("{}/vault", server.url()));
        let client = VaultClient::new(config).unwrap();
        let url = client.config().system(10).unwrap().listing_url("C");

        let games = client.fetch_game_list(&url).await.unwrap();
        assert_eq!(games.len(), 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_game_list_bad_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/vault/GB/Z")
            .with_status(503)
            .create_async()
            .await;

        let client = VaultClient::new(Config::default()).unwrap();
        let err = client
            .fetch_game_list(&format!("{}/vault/GB/Z", server.url()))
            .await
            .unwrap_err();

        match err {
            VaultError::Status { status, .. } => assert_eq!(status, "503 Service Unavailable"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
