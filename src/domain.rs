// Image filtering, directory validation and per-directory statistics

pub mod action;

pub use action::{Action, ActionOptions, ActionOutcome, ConflictPolicy};

use crate::error::{ImgSortError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions (without the leading dot) of files offered for sorting.
///
/// Matching is case-sensitive: `photo.JPG` is not offered.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpeg", "png", "jpg", "tif", "tiff", "jp2"];

/// Returns true if `path` is a regular file with one of the [`IMAGE_EXTENSIONS`].
///
/// Symlinks are followed, so a link to a regular image file qualifies while a
/// link to a directory does not.
pub fn is_valid_image_file(path: &Path) -> bool {
    let correct_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext));

    correct_extension && fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Confirms `path` exists and is a directory, handing it back unchanged.
pub fn validate_directory(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(ImgSortError::PathInvalid(path.to_path_buf()));
    }

    debug!(path = %path.display(), "directory validated");
    Ok(path.to_path_buf())
}

/// Lists the entries of `dir_path` in the order the filesystem yields them.
///
/// The listing is a snapshot: entries moved away while it is being processed
/// do not affect it. Entries that cannot be read are skipped.
pub fn list_entries(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir_path)?
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .collect();

    Ok(entries)
}

/// Counts of what happened to the entries of one source directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortStatistics {
    pub moved: usize,
    pub copied: usize,
    pub skipped: usize,
    /// Images that passed the filter but could not be decoded
    pub unreadable: usize,
}

impl SortStatistics {
    pub fn record(&mut self, outcome: &ActionOutcome) {
        match outcome {
            ActionOutcome::Moved(_) => self.moved += 1,
            ActionOutcome::Copied(_) => self.copied += 1,
            ActionOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn record_unreadable(&mut self) {
        self.unreadable += 1;
    }

    /// Number of images the user was asked about
    pub fn reviewed(&self) -> usize {
        self.moved + self.copied + self.skipped
    }
}
