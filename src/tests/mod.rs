//! Crate-level acceptance and property tests for the follow core.
