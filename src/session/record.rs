//! Session record and metrics accumulator
//!
//! Cumulative edit metrics for one assistant session. Counters only ever grow
//! within a session; the record is superseded wholesale at the next session
//! start, never decremented.

use crate::config::ACK_WINDOW_SECS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Current on-disk record schema version
pub const SCHEMA_VERSION: u32 = 1;

const fn schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One edit event observed by the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    /// File being created or modified; must be non-empty
    pub file_path: String,
    /// Newline-delimited segments being added or changed
    pub line_delta: u64,
    /// Whether this event creates the file
    pub is_new_file: bool,
}

/// Cumulative edit metrics for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Record schema version; anything unrecognized is treated as corrupt
    #[serde(default = "schema_version")]
    pub schema: u32,

    /// Distinct files touched this session
    #[serde(default)]
    pub files_touched: BTreeSet<String>,

    /// Distinct directories touched, derived from `files_touched`
    #[serde(default)]
    pub directories_touched: BTreeSet<String>,

    /// Files created this session
    #[serde(default)]
    pub new_files_created: u64,

    /// Sum of per-event line deltas
    #[serde(default)]
    pub total_lines_added: u64,

    /// File named by a pending self-implementation acknowledgment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_acknowledged_file: Option<String>,

    /// Unix timestamp of the pending acknowledgment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_acknowledged_at: Option<i64>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            schema: SCHEMA_VERSION,
            files_touched: BTreeSet::new(),
            directories_touched: BTreeSet::new(),
            new_files_created: 0,
            total_lines_added: 0,
            last_acknowledged_file: None,
            last_acknowledged_at: None,
        }
    }
}

impl SessionRecord {
    /// Create a fresh all-zero record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one edit event into the record.
    ///
    /// Pure accumulation: paths are inserted into their sets, counters only
    /// increase. An event with an empty `file_path` is ignored entirely,
    /// since a file path is a hard precondition for counting.
    pub fn apply(&mut self, event: &EditEvent) {
        if event.file_path.is_empty() {
            return;
        }

        self.files_touched.insert(event.file_path.clone());
        self.directories_touched
            .insert(directory_of(&event.file_path));
        if event.is_new_file {
            self.new_files_created += 1;
        }
        self.total_lines_added += event.line_delta;
    }

    /// Number of distinct files touched
    #[must_use]
    pub fn num_files(&self) -> u64 {
        self.files_touched.len() as u64
    }

    /// Number of distinct directories touched
    #[must_use]
    pub fn num_directories(&self) -> u64 {
        self.directories_touched.len() as u64
    }

    /// One-line session summary for operator-facing messages.
    ///
    /// Example: `Session: 3 files, 42 lines, 1 new`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Session: {} files, {} lines",
            self.num_files(),
            self.total_lines_added
        );
        if self.new_files_created > 0 {
            summary.push_str(&format!(", {} new", self.new_files_created));
        }
        summary
    }

    /// Register a one-shot self-implementation acknowledgment for a file.
    pub fn acknowledge(&mut self, file_path: &str, now: i64) {
        self.last_acknowledged_file = Some(file_path.to_string());
        self.last_acknowledged_at = Some(now);
    }

    /// Consume a pending acknowledgment for this file, if still valid.
    ///
    /// Valid means: same file, and younger than the acknowledgment window.
    /// Returns `true` exactly once per acknowledgment; the bypass is spent
    /// whether or not it is honored downstream.
    pub fn take_valid_acknowledgment(&mut self, file_path: &str, now: i64) -> bool {
        let valid = matches!(
            (&self.last_acknowledged_file, self.last_acknowledged_at),
            (Some(file), Some(at))
                if file == file_path && now.saturating_sub(at) <= ACK_WINDOW_SECS
        );

        if valid {
            self.last_acknowledged_file = None;
            self.last_acknowledged_at = None;
        }
        valid
    }
}

/// Directory component of a file path, `.` when there is none
fn directory_of(file_path: &str) -> String {
    match Path::new(file_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    }
}
