//! Text input sources for the pane.
//!
//! Two ways lines arrive:
//! - File loading for read-once input
//! - Stdin for piped input (live streaming)
//!
//! Both are polled non-blocking from the TUI event loop and unified behind
//! the [`InputSource`] enum.

use std::path::PathBuf;
use thiserror::Error;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Errors encountered when reading input from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No file argument and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data on stdin")]
    NoInput,

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Unified input source for pane content.
#[derive(Debug)]
pub enum InputSource {
    /// Read-once file input.
    File(FileSource),
    /// Piped stdin, read incrementally.
    Stdin(StdinSource),
}

impl InputSource {
    /// Poll for new lines. Non-blocking: returns whatever is available.
    ///
    /// A file source yields its whole content on the first poll and
    /// nothing afterwards; a stdin source yields lines as they arrive.
    pub fn poll(&mut self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain_lines()),
            InputSource::Stdin(s) => s.poll(),
        }
    }

    /// Whether more data can still arrive.
    pub fn is_live(&self) -> bool {
        match self {
            InputSource::File(_) => false,
            InputSource::Stdin(s) => !s.is_complete(),
        }
    }
}

/// Pick the input source: a file when a path is given, otherwise piped
/// stdin.
///
/// # Errors
///
/// `FileNotFound` for a missing file, `NoInput` when no path is given and
/// stdin is a TTY, `Io` for read failures.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_source_yields_everything_once() {
        let path = std::env::temp_dir().join("tailpane_source_once.log");
        fs::write(&path, "first\nsecond\n").unwrap();

        let mut source = detect_input_source(Some(path.clone())).unwrap();
        let _ = fs::remove_file(&path);

        let lines = source.poll().unwrap();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);

        assert!(source.poll().unwrap().is_empty());
        assert!(source.poll().unwrap().is_empty());
    }

    #[test]
    fn file_source_is_never_live() {
        let path = std::env::temp_dir().join("tailpane_source_live.log");
        fs::write(&path, "line\n").unwrap();

        let source = detect_input_source(Some(path.clone())).unwrap();
        let _ = fs::remove_file(&path);

        assert!(!source.is_live());
    }

    #[test]
    fn missing_file_reports_file_not_found() {
        let path = std::env::temp_dir().join("tailpane_source_missing_82631.log");
        let result = detect_input_source(Some(path.clone()));

        match result {
            Err(InputError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn stdin_source_reads_from_reader() {
        let data = b"alpha\nbeta\n";
        let mut source = InputSource::Stdin(StdinSource::from_reader(&data[..]));

        let mut lines = Vec::new();
        // The reader thread delivers asynchronously; poll until EOF.
        while source.is_live() {
            lines.extend(source.poll().unwrap());
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        lines.extend(source.poll().unwrap());

        assert_eq!(lines, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn stdin_source_goes_dead_after_eof() {
        let data = b"only\n";
        let mut source = InputSource::Stdin(StdinSource::from_reader(&data[..]));

        while source.is_live() {
            let _ = source.poll().unwrap();
            std::thread::sleep(std::time::Duration::from_millis(1));
        }

        assert!(!source.is_live());
    }

    #[test]
    fn error_message_for_no_input_mentions_piping() {
        let message = InputError::NoInput.to_string();
        assert!(message.contains("file path"));
        assert!(message.contains("pipe"));
    }
}
