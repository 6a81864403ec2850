//! Configuration and settings management
//!
//! Loads process settings from environment variables and defines crate
//! constants. The enforcement policy document itself lives in [`crate::policy`];
//! this module only resolves *where* that document and the session state live.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// Override for the policy document location
    pub policy_path: Option<String>,

    /// Override for the session-state directory
    pub state_dir: Option<String>,
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails. Callers are expected to fall
    /// back to [`Settings::default`]: a misconfigured environment must never
    /// prevent a hook from answering.
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Optional config file next to the binary's working directory
            .add_source(File::with_name("config/hookwarden").required(false))
            // Settings from the environment (with a prefix of HOOKWARDEN)
            // Eg. `HOOKWARDEN_STATE_DIR=/var/tmp hookwarden` sets `state_dir`
            .add_source(Environment::with_prefix("HOOKWARDEN"))
            .build()?;

        s.try_deserialize()
    }

    /// Resolved location of the policy document.
    ///
    /// Defaults to `~/.claude/config/delegation-enforcement.json`, matching
    /// where operators keep the rest of their Claude Code configuration.
    #[must_use]
    pub fn policy_path(&self) -> PathBuf {
        if let Some(path) = &self.policy_path {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(POLICY_FILE_RELATIVE)
    }

    /// Resolved directory for session-state files.
    ///
    /// Defaults to the system temp directory so that records vanish with the
    /// machine, like the sessions they describe.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .as_ref()
            .map_or_else(std::env::temp_dir, PathBuf::from)
    }
}

/// Policy document location relative to the home directory
pub const POLICY_FILE_RELATIVE: &str = ".claude/config/delegation-enforcement.json";

/// Prefix for per-session state file names
pub const STATE_FILE_PREFIX: &str = "claude-delegation-";

/// Seconds a self-implementation acknowledgment stays valid
pub const ACK_WINDOW_SECS: i64 = 60;
