//! The interactive sorting loop.
//!
//! A [`Session`] asks for a source and a target directory, walks the source
//! directory showing each image through an [`ImageViewer`], and applies the
//! action chosen with a single keystroke. It then starts over with new
//! directories.

use crate::domain::{
    is_valid_image_file, list_entries, validate_directory, Action, ActionOptions,
    SortStatistics,
};
use crate::error::{ImgSortError, Result};
use crate::preview::{load_image, ImageView};
use crate::prompt::PathPrompt;
use crate::tui::KeyInput;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SOURCE_PROMPT: &str = "Source Dir: ";
pub const TARGET_PROMPT: &str = "Target Dir: ";
pub const INVALID_DIRECTORY_WARNING: &str =
    "Warning: Directory does not exist or is not directory: ";

/// Where images are displayed and keystrokes come from
pub trait ImageViewer {
    /// Displays `view`, opening the window if needed
    fn show(&mut self, view: ImageView) -> Result<()>;

    /// Blocks until the next keystroke
    fn wait_for_key(&mut self) -> Result<KeyInput>;

    /// Releases the window; called after every displayed image
    fn close(&mut self) -> Result<()>;
}

/// Main loop state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Prompting for and validating the two directories
    AwaitingPaths,
    /// Walking `source`, sorting its images into `target`
    Processing { source: PathBuf, target: PathBuf },
}

pub struct Session<R, W, V> {
    prompt: PathPrompt<R, W>,
    viewer: V,
    options: ActionOptions,
}

impl<R: BufRead, W: Write, V: ImageViewer> Session<R, W, V> {
    pub fn new(input: R, output: W, viewer: V, options: ActionOptions) -> Self {
        Self {
            prompt: PathPrompt::new(input, output),
            viewer,
            options,
        }
    }

    /// Runs until the console input is exhausted.
    ///
    /// Invalid directories are reported and asked for again; any other error
    /// ends the session.
    pub fn run(&mut self) -> Result<()> {
        let mut state = SessionState::AwaitingPaths;

        loop {
            state = match state {
                SessionState::AwaitingPaths => match self.await_paths() {
                    Ok(Some((source, target))) => SessionState::Processing { source, target },
                    Ok(None) => {
                        debug!("console input closed");
                        return Ok(());
                    }
                    Err(e) if e.is_recoverable() => {
                        writeln!(self.prompt.output(), "{}{}", INVALID_DIRECTORY_WARNING, e)?;
                        SessionState::AwaitingPaths
                    }
                    Err(e) => return Err(e),
                },
                SessionState::Processing { source, target } => {
                    let stats =
                        sort_directory(&source, &target, &mut self.viewer, &self.options)?;
                    self.report(&source, &stats)?;
                    SessionState::AwaitingPaths
                }
            };
        }
    }

    /// Consumes the session, handing back the viewer
    pub fn into_viewer(self) -> V {
        self.viewer
    }

    fn await_paths(&mut self) -> Result<Option<(PathBuf, PathBuf)>> {
        let Some(source) = self.ask_directory(SOURCE_PROMPT)? else {
            return Ok(None);
        };
        let Some(target) = self.ask_directory(TARGET_PROMPT)? else {
            return Ok(None);
        };
        Ok(Some((source, target)))
    }

    fn ask_directory(&mut self, message: &str) -> Result<Option<PathBuf>> {
        match self.prompt.ask(message)? {
            Some(path) => validate_directory(&path).map(Some),
            None => Ok(None),
        }
    }

    fn report(&mut self, source: &Path, stats: &SortStatistics) -> Result<()> {
        info!(
            source = %source.display(),
            moved = stats.moved,
            copied = stats.copied,
            skipped = stats.skipped,
            unreadable = stats.unreadable,
            "directory finished"
        );

        let prefix = if self.options.dry_run { "[DRY RUN] " } else { "" };
        writeln!(
            self.prompt.output(),
            "{}Done with {}: {} moved, {} copied, {} skipped, {} unreadable",
            prefix,
            source.display(),
            stats.moved,
            stats.copied,
            stats.skipped,
            stats.unreadable
        )?;
        Ok(())
    }
}

/// Processes every entry of `source`, one at a time, in filesystem order.
pub fn sort_directory<V: ImageViewer>(
    source: &Path,
    target: &Path,
    viewer: &mut V,
    options: &ActionOptions,
) -> Result<SortStatistics> {
    let mut stats = SortStatistics::default();

    for entry in list_entries(source)? {
        process_entry(&entry, target, viewer, options, &mut stats)?;
    }

    Ok(stats)
}

/// Shows one entry, waits for the user's choice and applies it.
///
/// Entries that are not image files are passed over silently; images that
/// fail to decode are skipped with a warning. The viewer is closed before
/// returning, also when the action fails.
pub fn process_entry<V: ImageViewer>(
    entry: &Path,
    target: &Path,
    viewer: &mut V,
    options: &ActionOptions,
    stats: &mut SortStatistics,
) -> Result<()> {
    if !is_valid_image_file(entry) {
        debug!(entry = %entry.display(), "not an image file");
        return Ok(());
    }

    let image = match load_image(entry) {
        Ok(image) => Some(image),
        Err(e @ ImgSortError::UnsupportedFormat { .. }) => {
            info!(error = %e, "showing without preview");
            None
        }
        Err(e) => {
            warn!(error = %e, "skipping image");
            stats.record_unreadable();
            return Ok(());
        }
    };

    let result = viewer
        .show(ImageView::new(entry, image))
        .and_then(|()| listen_for_action(viewer))
        .and_then(|action| action.execute(entry, target, options));
    let closed = viewer.close();

    let outcome = result?;
    closed?;
    stats.record(&outcome);
    Ok(())
}

/// Waits until a keystroke resolves to an action
fn listen_for_action<V: ImageViewer>(viewer: &mut V) -> Result<Action> {
    loop {
        match viewer.wait_for_key()? {
            KeyInput::Char(key) => match Action::from_char(key) {
                Ok(action) => return Ok(action),
                Err(e) => debug!(error = %e, "waiting for another key"),
            },
            KeyInput::Interrupt => return Err(ImgSortError::Interrupted),
            KeyInput::Ignored => {}
        }
    }
}
