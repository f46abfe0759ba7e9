//! Imgsort - an interactive image sorting library
//!
//! Walks a source directory, shows each image in the terminal and moves,
//! copies or skips it into a target directory on a single keystroke.

pub mod cli;
pub mod domain;
pub mod error;
pub mod preview;
pub mod prompt;
pub mod session;
pub mod tui;

// Re-export primary types for convenience
pub use cli::{AppConfig, Args};
pub use domain::{
    is_valid_image_file, list_entries, validate_directory, Action, ActionOptions,
    ActionOutcome, ConflictPolicy, SortStatistics, IMAGE_EXTENSIONS,
};
pub use error::{ImgSortError, Result};
pub use session::{process_entry, sort_directory, ImageViewer, Session, SessionState};
pub use tui::{KeyInput, TerminalViewer};
