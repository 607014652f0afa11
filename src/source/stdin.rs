//! Piped stdin input, read on a background thread.
//!
//! Stdin has no non-blocking line API, so a reader thread pulls lines and
//! hands them over an mpsc channel; the event loop drains the channel on
//! its own schedule. The thread exits at EOF and the channel disconnect
//! marks the source complete.

use super::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;

/// Live stdin source.
#[derive(Debug)]
pub struct StdinSource {
    receiver: Receiver<String>,
    complete: bool,
}

impl StdinSource {
    /// Start reading piped stdin.
    ///
    /// # Errors
    ///
    /// `NoInput` when stdin is an interactive terminal: blocking a TUI on
    /// keyboard-stdin would deadlock the user.
    pub fn new() -> Result<Self, InputError> {
        if std::io::stdin().is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(std::io::stdin()))
    }

    /// Start reading from any reader. Tests use this seam in place of a
    /// real pipe.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        thread::spawn(move || {
            let buffered = BufReader::new(reader);
            for line in buffered.lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
            // Dropping the sender disconnects the channel, which is the
            // EOF signal the poll side observes.
        });

        Self {
            receiver,
            complete: false,
        }
    }

    /// Drain every line currently buffered. Non-blocking.
    pub fn poll(&mut self) -> Result<Vec<String>, InputError> {
        let mut lines = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.complete = true;
                    break;
                }
            }
        }
        Ok(lines)
    }

    /// Whether EOF was reached (no more data will arrive).
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
