//! Disc image extraction from 7z containers

use crate::error::{Result, VaultError};
use sevenz_rust::{Password, SevenZReader};
use std::path::{Path, PathBuf};

/// Extensions copied out of a disc archive
const DISC_IMAGE_EXTENSIONS: &[&str] = &[".bin", ".cue"];

fn is_disc_image(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    DISC_IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Base filename of an archive entry.
///
/// Archives from the vault wrap everything in one top-level folder, but only
/// the last component matters; entries without one are rejected.
fn entry_file_name(entry_name: &str) -> Result<String> {
    let normalized = entry_name.replace('\\', "/");
    match normalized.rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(name.to_string()),
        _ => Err(VaultError::UnexpectedArchiveLayout(entry_name.to_string())),
    }
}

/// Extract every `.bin`/`.cue` entry of `archive` into `dest`.
///
/// Other entries are skipped. Files already written stay on disk if a later
/// entry fails.
pub async fn extract_disc_images(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dest).await?;
    extract_7z(archive, dest)
}

fn extract_7z(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut reader = SevenZReader::open(archive, Password::empty())
        .map_err(|e| VaultError::Archive(format!("{}: {}", archive.display(), e)))?;

    let mut extracted = Vec::new();
    let mut failure: Option<VaultError> = None;

    let walked = reader.for_each_entries(|entry, data| {
        let name = entry.name();

        if entry.is_directory() || !is_disc_image(name) {
            tracing::trace!("Skipping archive entry {}", name);
            if let Err(e) = std::io::copy(data, &mut std::io::sink()) {
                failure = Some(e.into());
                return Ok(false);
            }
            return Ok(true);
        }

        let outpath = match entry_file_name(name) {
            Ok(file_name) => dest.join(file_name),
            Err(e) => {
                failure = Some(e);
                return Ok(false);
            }
        };

        let written = std::fs::File::create(&outpath)
            .and_then(|mut outfile| std::io::copy(data, &mut outfile));
        if let Err(e) = written {
            failure = Some(e.into());
            return Ok(false);
        }

        println!("Extracted: {}", outpath.display());
        tracing::info!("Extracted {} -> {}", name, outpath.display());
        extracted.push(outpath);
        Ok(true)
    });

    if let Some(e) = failure {
        return Err(e);
    }
    walked.map_err(|e| VaultError::Archive(format!("{}: {}", archive.display(), e)))?;

    Ok(extracted)
}
