//! Configuration module.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

use crate::follow::FollowOptions;

impl ResolvedConfig {
    /// The follow-session tuning this configuration asks for.
    ///
    /// Only the at-bottom threshold is user-facing; debounce, duration and
    /// gesture window keep their fixed defaults.
    pub fn follow_options(&self) -> FollowOptions {
        FollowOptions {
            bottom_threshold: self.threshold,
            ..FollowOptions::default()
        }
    }
}
