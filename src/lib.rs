//! vaultgrab - browse and download ROMs from the Vimm's Lair vault
//!
//! This crate provides:
//! - Catalog scraping and detail page resolution
//! - Downloads routed into per-platform ROM folders
//! - 7z disc image extraction for PlayStation titles
//! - A paginated terminal browser

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod archive;
pub mod config;
pub mod error;
pub mod tui;
pub mod vault;

pub use app::App;
pub use config::Config;
pub use error::VaultError;
