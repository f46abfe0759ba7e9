//! Error types shared across the crate

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImgSortError {
    /// A user-supplied directory does not exist or is not a directory
    #[error("Path does not exist or is not directory: {}", .0.display())]
    PathInvalid(PathBuf),

    /// A keystroke that maps to no action
    #[error("Unrecognized action key: {0:?}")]
    UnrecognizedAction(char),

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Failed to {operation} {} into {}: {source}", from.display(), to_dir.display())]
    FilesystemOperationFailed {
        operation: &'static str,
        from: PathBuf,
        to_dir: PathBuf,
        source: io::Error,
    },

    #[error("Failed to decode image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// No decoder for the format; the file can still be sorted without a preview
    #[error("No decoder for image {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// Ctrl+C while the image window owns the keyboard
    #[error("Interrupted")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ImgSortError>;

impl ImgSortError {
    /// Whether the main loop recovers from this error by re-prompting
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ImgSortError::PathInvalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_invalid_message() {
        let err = ImgSortError::PathInvalid(PathBuf::from("/no/such/dir"));
        assert_eq!(
            err.to_string(),
            "Path does not exist or is not directory: /no/such/dir"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_filesystem_error_message() {
        let err = ImgSortError::FilesystemOperationFailed {
            operation: "move",
            from: PathBuf::from("src/a.jpg"),
            to_dir: PathBuf::from("dst"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.starts_with("Failed to move src/a.jpg into dst"));
        assert!(message.contains("denied"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_unsupported_format_is_not_recoverable() {
        let err = ImgSortError::UnsupportedFormat {
            path: PathBuf::from("scan.jp2"),
            reason: "unknown format".to_string(),
        };
        assert!(err.to_string().starts_with("No decoder for image scan.jp2"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ImgSortError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, ImgSortError::Io(_)));
    }
}
