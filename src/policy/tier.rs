//! Enforcement tier classification
//!
//! Maps a session's cumulative edit metrics onto one of four ordered
//! enforcement levels. Classification is conjunctive: a session sits in a
//! tier only when *all three* counters fit that tier's ceilings, so a single
//! oversized dimension escalates the whole session even while the others stay
//! small. The function is pure and total: it never panics, whatever the
//! counters hold.

use super::{Thresholds, TierLimits};
use crate::session::SessionRecord;

/// The four ordered enforcement levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// No observable output; the operation proceeds unimpeded
    Silent,
    /// The operation proceeds; an advisory message is surfaced
    Warn,
    /// The runtime obtains operator confirmation before proceeding
    Ask,
    /// The operation is prevented
    Block,
}

impl Tier {
    /// Lowercase label for logging
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Warn => "warn",
            Self::Ask => "ask",
            Self::Block => "block",
        }
    }
}

/// Classify a session's cumulative totals against the configured tiers.
///
/// Tiers are checked low→high; the result is the lowest tier whose ceilings
/// contain the totals on every dimension. Totals beyond the `ask` tier on any
/// one dimension classify as [`Tier::Block`].
#[must_use]
pub fn classify(record: &SessionRecord, thresholds: &Thresholds) -> Tier {
    let lines = record.total_lines_added;
    let files = record.num_files();
    let new_files = record.new_files_created;

    let ladder = [
        (Tier::Silent, &thresholds.silent),
        (Tier::Warn, &thresholds.warn),
        (Tier::Ask, &thresholds.ask),
    ];

    for (tier, limits) in ladder {
        if limits.contains(lines, files, new_files) {
            return tier;
        }
    }

    Tier::Block
}

/// Name every dimension on which the totals exceed the given ceilings, with
/// counts. Used to build block reasons that point at what actually tripped.
#[must_use]
pub fn exceeded_dimensions(record: &SessionRecord, limits: &TierLimits) -> Vec<String> {
    let mut exceeded = Vec::new();

    if record.total_lines_added > limits.max_lines {
        exceeded.push(format!(
            "{} lines added (limit: {})",
            record.total_lines_added, limits.max_lines
        ));
    }
    if record.num_files() > limits.max_files {
        exceeded.push(format!(
            "{} files touched (limit: {})",
            record.num_files(),
            limits.max_files
        ));
    }
    if record.new_files_created > limits.max_new_files {
        exceeded.push(format!(
            "{} new files created (limit: {})",
            record.new_files_created, limits.max_new_files
        ));
    }

    exceeded
}
