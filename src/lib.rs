//! tailpane
//!
//! Auto-following scroll pane for live log and chat output: the viewport
//! sticks to the bottom edge while content grows, pauses when the viewer
//! scrolls away, and resumes when they scroll back, with an eased
//! animation instead of a jump.
//!
//! The crate follows a pure-core / impure-shell split. The core
//! ([`follow`]) is a host-agnostic state machine over the capability
//! traits in [`host`]; the shell ([`view`], [`source`]) is a terminal
//! host that tails a file or stdin into the pane.

pub mod config;
pub mod follow;
pub mod host;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
