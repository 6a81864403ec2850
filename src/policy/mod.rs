//! Enforcement policy document
//!
//! The operator-facing configuration for delegation enforcement, read from a
//! single JSON document with complete built-in defaults. Merging is shallow:
//! a top-level key present in the document replaces the default for that key
//! outright (a provided `thresholds` stands in for all three tiers; an absent
//! tier falls back to its built-in ceilings). Nothing is deep-merged.

pub mod tier;

pub use tier::{classify, Tier};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading the policy document
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Enforcement rule set selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Tiered responses only: silent → warn → ask → block
    #[default]
    Graduated,
    /// Tiered responses plus the hard feature-pattern rules
    Strict,
}

/// Ceilings for one enforcement tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    /// Maximum cumulative lines added this session
    pub max_lines: u64,
    /// Maximum distinct files touched this session
    pub max_files: u64,
    /// Maximum files created this session
    pub max_new_files: u64,
}

impl TierLimits {
    /// Whether the given cumulative totals fit within this tier on every
    /// dimension. Containment is conjunctive: exceeding any one dimension
    /// pushes the session out of the tier.
    #[must_use]
    pub const fn contains(&self, lines: u64, files: u64, new_files: u64) -> bool {
        lines <= self.max_lines && files <= self.max_files && new_files <= self.max_new_files
    }
}

/// Built-in silent-tier ceilings
const fn default_silent_tier() -> TierLimits {
    TierLimits {
        max_lines: 20,
        max_files: 1,
        max_new_files: 0,
    }
}

/// Built-in warn-tier ceilings
const fn default_warn_tier() -> TierLimits {
    TierLimits {
        max_lines: 50,
        max_files: 2,
        max_new_files: 1,
    }
}

/// Built-in ask-tier ceilings
const fn default_ask_tier() -> TierLimits {
    TierLimits {
        max_lines: 100,
        max_files: 4,
        max_new_files: 3,
    }
}

/// The three ordered threshold tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Ceilings below which the guard stays silent
    #[serde(default = "default_silent_tier")]
    pub silent: TierLimits,
    /// Ceilings below which the guard only warns
    #[serde(default = "default_warn_tier")]
    pub warn: TierLimits,
    /// Ceilings below which the guard asks for confirmation; beyond them it
    /// blocks
    #[serde(default = "default_ask_tier")]
    pub ask: TierLimits,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            silent: default_silent_tier(),
            warn: default_warn_tier(),
            ask: default_ask_tier(),
        }
    }
}

/// Paths and patterns exempted from enforcement entirely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Exclusions {
    /// Path prefixes of repositories to exempt
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Glob patterns matched against the working directory
    #[serde(default)]
    pub patterns: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_always_silent() -> Vec<String> {
    ["**/.env*", "**/package.json", "**/*.lock", "**/CLAUDE.md"]
        .map(String::from)
        .to_vec()
}

/// The full enforcement policy, read-only after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Global kill switch
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Which rule sets apply
    #[serde(default)]
    pub mode: Mode,

    /// Exempted repositories and working-directory patterns
    #[serde(default)]
    pub exclusions: Exclusions,

    /// Tier ceilings
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Glob patterns matched against the edited file path, exempt regardless
    /// of session totals
    #[serde(rename = "alwaysSilent", default = "default_always_silent")]
    pub always_silent: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: Mode::default(),
            exclusions: Exclusions::default(),
            thresholds: Thresholds::default(),
            always_silent: default_always_silent(),
        }
    }
}

impl PolicyConfig {
    /// Load the policy document, falling back to built-in defaults on a
    /// missing file or parse failure. Never fails: enforcement must degrade,
    /// not error, when its own configuration is broken.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Policy document unavailable, using defaults");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, PolicyError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Whether the working directory is exempted by a repository prefix or a
    /// configured glob pattern.
    #[must_use]
    pub fn is_excluded_cwd(&self, cwd: &str) -> bool {
        self.exclusions
            .repositories
            .iter()
            .any(|repo| cwd.starts_with(repo.as_str()))
            || self
                .exclusions
                .patterns
                .iter()
                .any(|pattern| matches_glob(pattern, cwd))
    }

    /// Whether the edited file lives inside an exempted repository. Checked
    /// in addition to the working directory so that edits to, say, `~/.claude`
    /// files stay exempt even while working in another project.
    #[must_use]
    pub fn is_excluded_path(&self, file_path: &str) -> bool {
        self.exclusions
            .repositories
            .iter()
            .any(|repo| file_path.starts_with(repo.as_str()))
    }

    /// Whether the edited file matches an always-silent pattern (lockfiles,
    /// dot-env files, and friends).
    #[must_use]
    pub fn is_always_silent(&self, file_path: &str) -> bool {
        self.always_silent
            .iter()
            .any(|pattern| matches_glob(pattern, file_path))
    }
}

/// Glob match that treats an invalid pattern as a non-match
fn matches_glob(pattern: &str, value: &str) -> bool {
    glob::Pattern::new(pattern).is_ok_and(|p| p.matches(value))
}
