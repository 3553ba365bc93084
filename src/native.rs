//! Native rendering runtime acquisition.
//!
//! The SVG rendering path needs a cairo/freetype library pair that the
//! package set does not provide on Windows. The pair ships inside a
//! versioned release archive holding builds for several architectures;
//! selection matches the running process's bit width against substring
//! tags in the entry names (64-bit builds are tagged, 32-bit builds are
//! either tagged `x86` or untagged). Acquisition failure is non-fatal:
//! it degrades a subset of visual features, nothing more.

use crate::error::Result;
use crate::fetch::HttpFetcher;
use anyhow::Context;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Library file extensions considered native runtime candidates.
const LIBRARY_EXTENSIONS: &[&str] = &[".dll", ".so", ".dylib"];

/// Pick the archive entry for one library stem that matches the process
/// bit width.
///
/// Falls back to the first candidate for the stem when no entry carries a
/// matching architecture tag.
pub fn select_library<'a>(entries: &'a [String], stem: &str, is_64bit: bool) -> Option<&'a String> {
    let candidates: Vec<&String> = entries
        .iter()
        .filter(|name| {
            let base = basename(name).to_ascii_lowercase();
            base.contains(&stem.to_ascii_lowercase())
                && LIBRARY_EXTENSIONS.iter().any(|ext| base.ends_with(ext))
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    // The architecture tag may sit in a directory component rather than
    // the file name (`lib/x64/cairo.dll`), so match the full entry path.
    let tagged = candidates.iter().find(|name| {
        let path = name.to_ascii_lowercase();
        if is_64bit {
            path.contains("64")
        } else {
            path.contains("x86") || path.contains("32") || !path.contains("64")
        }
    });

    tagged.copied().or_else(|| candidates.first().copied())
}

fn basename(entry: &str) -> &str {
    entry.rsplit(['/', '\\']).next().unwrap_or(entry)
}

/// Download the runtime archive and extract the architecture-matched
/// library pair into `dest`.
///
/// Returns the file names written. A stem with no candidate in the archive
/// is skipped; the caller decides whether an empty result is worth a
/// warning.
pub fn acquire(
    fetcher: &HttpFetcher,
    archive_url: &str,
    stems: &[&str],
    dest: &Path,
    is_64bit: bool,
) -> Result<Vec<String>> {
    let bytes = fetcher.fetch_bytes(archive_url)?;

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .context("reading native runtime archive")?;

    let entries: Vec<String> = archive.file_names().map(String::from).collect();

    std::fs::create_dir_all(dest)?;

    let mut written = Vec::new();
    for stem in stems {
        let Some(entry_name) = select_library(&entries, stem, is_64bit) else {
            tracing::warn!("no {} library in native runtime archive", stem);
            continue;
        };

        let mut entry = archive
            .by_name(entry_name)
            .with_context(|| format!("opening archive entry {entry_name}"))?;
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;

        let file_name = basename(entry_name).to_string();
        let out_path: PathBuf = dest.join(&file_name);
        std::fs::write(&out_path, contents)?;
        tracing::debug!("extracted {} -> {}", entry_name, out_path.display());
        written.push(file_name);
    }

    Ok(written)
}
