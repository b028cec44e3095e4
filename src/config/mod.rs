//! Runtime configuration for vaultgrab
//!
//! Holds the tables and endpoints the rest of the crate reads:
//! - the numbered system menu and its catalog URLs
//! - the platform code → ROM folder table
//! - vault endpoints, output root and HTTP settings
//!
//! There is no config file. `Config::default()` reproduces the stock values
//! and the CLI overrides individual fields.

mod paths;

pub use paths::Paths;

use crate::error::{Result, VaultError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default vault listing/detail host
pub const DEFAULT_VAULT_BASE: &str = "https://vimm.net/vault";

/// Default download endpoint
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://download3.vimm.net/download/";

/// Default ROM root (SD card layout used by handheld frontends)
pub const DEFAULT_OUTPUT_ROOT: &str = "/mnt/SDCARD/Roms";

/// Desktop browser identity; the download host rejects anything else
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) Gecko/20100101 Firefox/123.0";

/// A selectable system in the main menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    /// Menu number
    pub key: u32,
    /// Display name
    pub name: String,
    /// Catalog base URL (listing pages are `<url>/<letter>`)
    pub url: String,
}

impl System {
    /// URL of the listing page for a starting letter
    pub fn listing_url(&self, filter: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), filter.trim())
    }
}

/// (menu key, display name, vault code)
const SYSTEMS: &[(u32, &str, &str)] = &[
    (1, "Atari 2600", "Atari2600"),
    (2, "Atari 5200", "Atari5200"),
    (3, "Nintendo", "NES"),
    (4, "Master System", "SMS"),
    (5, "Atari 7800", "Atari7800"),
    (6, "Genesis", "Genesis"),
    (7, "Super Nintendo", "SNES"),
    (8, "Sega 32X", "32X"),
    (9, "Saturn", "Saturn"),
    (10, "PlayStation", "PS1"),
    (11, "Game Boy", "GB"),
    (12, "Lynx", "Lynx"),
    (13, "Game Gear", "GG"),
    (14, "Virtual Boy", "VB"),
    (15, "Game Boy Color", "GBC"),
    (16, "Game Boy Advance", "GBA"),
    (17, "Nintendo DS", "DS"),
];

/// Vault platform code → ROM folder.
///
/// Folder names starting with a digit are spelled out; some frontends
/// refuse directories that begin with a number.
const PLATFORM_FOLDERS: &[(&str, &str)] = &[
    ("GB", "GB"),
    ("GBC", "GBC"),
    ("GBA", "GBA"),
    ("DS", "NDS"),
    ("Atari2600", "ATARI"),
    ("Atari5200", "FIFTYTWOHUNDRED"),
    ("NES", "FC"),
    ("SMS", "MS"),
    ("Atari7800", "SEVENTYEIGHTHUNDRED"),
    ("Genesis", "MD"),
    ("SNES", "SFC"),
    ("32X", "THIRTYTWOX"),
    ("PS1", "PS"),
    ("Lynx", "LYNX"),
    ("GG", "GG"),
    ("VB", "VB"),
    ("Saturn", "SATURN"),
    ("SegaCD", "SEGACD"),
];

/// Folder whose downloads are 7z containers that get unpacked
pub const DISC_IMAGE_FOLDER: &str = "PS";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Vault base for listing and detail pages
    pub vault_base: String,

    /// Download endpoint (receives `?mediaId=<token>`)
    pub download_base: String,

    /// Root of the ROM tree
    pub output_root: PathBuf,

    /// User-Agent sent with download requests
    pub user_agent: String,

    /// Timeout for catalog and detail page requests
    pub page_timeout: Duration,

    /// Connect timeout for every request
    pub connect_timeout: Duration,

    /// Entries shown per browse page
    pub page_size: usize,

    /// Menu systems, ordered by key
    pub systems: Vec<System>,

    /// Platform code → folder name
    pub platform_folders: Vec<(String, String)>,

    /// Folder whose downloads are extracted after download
    pub disc_image_folder: String,

    /// Log file location
    pub paths: Paths,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_vault_base(DEFAULT_VAULT_BASE)
    }
}

impl Config {
    /// Stock configuration against an alternative vault host
    pub fn with_vault_base(vault_base: &str) -> Self {
        let vault_base = vault_base.trim_end_matches('/').to_string();
        let systems = SYSTEMS
            .iter()
            .map(|(key, name, code)| System {
                key: *key,
                name: name.to_string(),
                url: format!("{}/{}", vault_base, code),
            })
            .collect();

        Self {
            vault_base,
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            user_agent: BROWSER_USER_AGENT.to_string(),
            page_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            page_size: 10,
            systems,
            platform_folders: PLATFORM_FOLDERS
                .iter()
                .map(|(code, folder)| (code.to_string(), folder.to_string()))
                .collect(),
            disc_image_folder: DISC_IMAGE_FOLDER.to_string(),
            paths: Paths::new(),
        }
    }

    /// Look up a system by its menu number
    pub fn system(&self, key: u32) -> Option<&System> {
        self.systems.iter().find(|s| s.key == key)
    }

    /// Systems sorted by menu number
    pub fn sorted_systems(&self) -> Vec<&System> {
        let mut systems: Vec<&System> = self.systems.iter().collect();
        systems.sort_by_key(|s| s.key);
        systems
    }

    /// Folder for a vault platform code, if the code is known
    pub fn platform_folder(&self, code: &str) -> Option<&str> {
        self.platform_folders
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, folder)| folder.as_str())
    }

    /// Detail page URL for a catalog ID
    pub fn detail_url(&self, vault_id: &str) -> String {
        format!("{}/{}", self.vault_base, vault_id.trim())
    }

    /// Download endpoint URL for a media token
    pub fn download_url(&self, media_id: &str) -> Result<String> {
        let url = Url::parse_with_params(&self.download_base, &[("mediaId", media_id)])
            .map_err(|source| VaultError::InvalidUrl {
                url: self.download_base.clone(),
                source,
            })?;
        Ok(url.into())
    }

    /// Output directory for a resolved folder (root when `None`)
    pub fn output_dir(&self, folder: Option<&str>) -> PathBuf {
        match folder {
            Some(folder) if !folder.is_empty() => self.output_root.join(folder),
            _ => self.output_root.clone(),
        }
    }

    /// Whether downloads landing in `dir` are disc-image archives
    pub fn is_disc_image_dir(&self, dir: &Path) -> bool {
        dir == self.output_root.join(&self.disc_image_folder)
    }

    /// Directory that extracted disc images are written to
    pub fn disc_image_dir(&self) -> PathBuf {
        self.output_root.join(&self.disc_image_folder)
    }
}
