// Move, copy and skip actions and their execution against the filesystem

use crate::error::{ImgSortError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to do with the image currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the file where it is
    Skip,
    /// Relocate the file into the target directory
    Move,
    /// Duplicate the file into the target directory
    Copy,
}

/// What to do when `target/<filename>` already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Refuse with [`ImgSortError::DestinationExists`]
    #[default]
    Fail,
    /// Replace the existing file
    Overwrite,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionOptions {
    pub conflict: ConflictPolicy,
    /// Report the action without touching the filesystem
    pub dry_run: bool,
}

/// Result of executing an [`Action`]; Move and Copy carry the destination path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved(PathBuf),
    Copied(PathBuf),
    Skipped,
}

impl Action {
    /// Maps a keystroke to an action: `m`/`M` Move, `c`/`C` Copy, `s`/`S` Skip.
    pub fn from_char(key: char) -> Result<Self> {
        match key {
            'm' | 'M' => Ok(Action::Move),
            'c' | 'C' => Ok(Action::Copy),
            's' | 'S' => Ok(Action::Skip),
            other => Err(ImgSortError::UnrecognizedAction(other)),
        }
    }

    /// Applies the action to `image`, keeping its file name inside `target_dir`.
    pub fn execute(
        &self,
        image: &Path,
        target_dir: &Path,
        options: &ActionOptions,
    ) -> Result<ActionOutcome> {
        if *self == Action::Skip {
            debug!(image = %image.display(), "skipped");
            return Ok(ActionOutcome::Skipped);
        }

        let destination = destination_for(image, target_dir)?;
        check_destination(image, &destination, options.conflict)?;

        if options.dry_run {
            info!(
                action = ?self,
                image = %image.display(),
                destination = %destination.display(),
                "dry run, filesystem untouched"
            );
            return Ok(self.outcome(destination));
        }

        let result = match self {
            Action::Move => move_file(image, &destination),
            Action::Copy => fs::copy(image, &destination).map(|_| ()),
            Action::Skip => Ok(()),
        };

        result.map_err(|source| ImgSortError::FilesystemOperationFailed {
            operation: self.verb(),
            from: image.to_path_buf(),
            to_dir: target_dir.to_path_buf(),
            source,
        })?;

        info!(
            action = ?self,
            image = %image.display(),
            destination = %destination.display(),
            "action executed"
        );
        Ok(self.outcome(destination))
    }

    fn outcome(&self, destination: PathBuf) -> ActionOutcome {
        match self {
            Action::Move => ActionOutcome::Moved(destination),
            Action::Copy => ActionOutcome::Copied(destination),
            Action::Skip => ActionOutcome::Skipped,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Copy => "copy",
            Action::Skip => "skip",
        }
    }
}

fn destination_for(image: &Path, target_dir: &Path) -> Result<PathBuf> {
    let file_name = image.file_name().ok_or_else(|| {
        ImgSortError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("No file name in {}", image.display()),
        ))
    })?;

    Ok(target_dir.join(file_name))
}

fn check_destination(image: &Path, destination: &Path, policy: ConflictPolicy) -> Result<()> {
    if !destination.exists() {
        return Ok(());
    }

    // Copying a file onto itself would truncate it, whatever the policy
    let same_file = match (fs::canonicalize(image), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };

    if same_file || policy == ConflictPolicy::Fail {
        return Err(ImgSortError::DestinationExists(destination.to_path_buf()));
    }

    Ok(())
}

/// Renames `from` to `to`, copying then removing when they sit on different filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(from = %from.display(), "rename crosses devices, copying instead");
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        other => other,
    }
}
