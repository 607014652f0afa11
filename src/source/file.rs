//! Read-once file input.

use super::InputError;
use std::fs;
use std::path::PathBuf;

/// A file loaded whole at construction and drained on the first poll.
#[derive(Debug)]
pub struct FileSource {
    lines: Vec<String>,
}

impl FileSource {
    /// Load `path` into memory.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `Io` for read failures.
    pub fn new(path: PathBuf) -> Result<Self, InputError> {
        if !path.exists() {
            return Err(InputError::FileNotFound { path });
        }

        let contents = fs::read_to_string(&path)?;
        let lines = contents.lines().map(str::to_string).collect();
        Ok(Self { lines })
    }

    /// Take every line. Empty on every call after the first.
    pub fn drain_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}
