//! Error types for unocr library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while formatting transcriptions.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file is not valid UTF-8 text.
    #[error("File is not valid UTF-8 text: {}", .0.display())]
    Decode(PathBuf),

    /// No transcription files were found in the input directory.
    #[error("No transcription files found in {}", .0.display())]
    NoInputFiles(PathBuf),

    /// A configuration value is outside its accepted bounds.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A boilerplate pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoInputFiles(PathBuf::from("/tmp/livro"));
        assert_eq!(err.to_string(), "No transcription files found in /tmp/livro");

        let err = Error::InvalidOption("heading window is empty".into());
        assert_eq!(err.to_string(), "Invalid option: heading window is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_regex_error_conversion() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
