//! ROM downloads from the vault's download host

use super::VaultClient;
use crate::archive;
use crate::error::{Result, VaultError};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use regex_lite::Regex;
use reqwest::header::{CONTENT_DISPOSITION, REFERER, USER_AGENT};
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::io::AsyncWriteExt;

static FILENAME_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*filename\s*=\s*(?:"([^"]*)"|([^;]*))"#).expect("valid regex")
});

/// Result of a finished download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    /// Where the response body was written
    pub path: PathBuf,
    /// Disc images unpacked from the download; the archive itself is gone
    /// when this is `Some`
    pub extracted: Option<Vec<PathBuf>>,
}

/// Filename suggested by a `Content-Disposition` header.
///
/// Accepts `filename="x"` and `filename=x`. Only the final path component
/// is returned; empty names yield `None`.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let caps = FILENAME_PARAM.captures(header)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();

    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(total) => {
            let pb = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::with_template(
                "  {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
            ) {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) =
                ProgressStyle::with_template("  {spinner:.cyan} {bytes} ({bytes_per_sec})")
            {
                pb.set_style(style.tick_chars("/-\\|"));
            }
            pb
        }
    }
}

impl VaultClient {
    /// Download a ROM into `output_dir`.
    ///
    /// The request carries the detail page as `Referer` and a desktop browser
    /// `User-Agent`; the host refuses downloads without them. Files landing
    /// in the disc-image folder are 7z containers: their `.bin`/`.cue`
    /// entries are unpacked next to them and the archive is removed.
    pub async fn download_file(
        &self,
        output_dir: &Path,
        referer_url: &str,
        download_url: &str,
    ) -> Result<Downloaded> {
        println!("Downloading... this may take some time for larger game files... (PS1, NDS)");
        tracing::info!("Downloading {} (referer {})", download_url, referer_url);

        let response = self
            .client
            .get(download_url)
            .header(REFERER, referer_url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Download of {} failed with {}", download_url, status);
            return Err(VaultError::DownloadFailed(status.to_string()));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename)
            .ok_or(VaultError::MissingFilename)?;

        tokio::fs::create_dir_all(output_dir).await?;
        let path = output_dir.join(&filename);

        let mut file = tokio::fs::File::create(&path).await?;
        let pb = progress_bar(response.content_length());
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            pb.inc(chunk.len() as u64);
        }
        file.flush().await?;
        pb.finish_and_clear();

        println!("Download complete - {}", path.display());
        tracing::info!("Saved {} ({} bytes)", path.display(), pb.position());

        if !self.config.is_disc_image_dir(output_dir) {
            return Ok(Downloaded {
                path,
                extracted: None,
            });
        }

        println!("Extracting Archive... Please wait...");
        let extracted = archive::extract_disc_images(&path, &self.config.disc_image_dir()).await?;
        println!("Extraction Complete");

        tokio::fs::remove_file(&path).await?;
        tracing::debug!("Removed archive {}", path.display());

        Ok(Downloaded {
            path,
            extracted: Some(extracted),
        })
    }
}
