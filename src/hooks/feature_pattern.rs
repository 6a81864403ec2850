//! Feature Pattern Hook.
//!
//! Strict-mode hard rules layered over the same session record the graduated
//! guard maintains. Where the graduated guard escalates by degrees, this hook
//! knows only one answer: sessions that look like full feature work
//! (implementation plus tests, file sprawl, directory sprawl) are blocked
//! outright and pointed at delegation.
//!
//! Evaluation is read-only: the current edit is projected onto the loaded
//! record in memory, and persisting it is left to the graduated guard further
//! down the chain. A one-shot acknowledgment ("I'm self-implementing X
//! because ...") bypasses exactly one edit.

use super::registry::Hook;
use super::types::{HookContext, HookResult};
use crate::event::HookInvocation;
use crate::policy::Mode;
use crate::session::{SessionRecord, SessionStore};
use tracing::{debug, warn};

/// Paths that always bypass the hard rules (meta-config and lockfiles)
const ALWAYS_ALLOW_MARKERS: &[&str] = &[
    "/.claude/",
    ".env",
    "package.json",
    "pnpm-lock",
    "yarn.lock",
    "package-lock",
];

/// Path markers that identify test files
const TEST_FILE_MARKERS: &[&str] = &[
    ".test.",
    ".spec.",
    "_test.",
    "_spec.",
    "/tests/",
    "/__tests__/",
];

/// Block on the 3rd new file
const MAX_NEW_FILES: u64 = 2;
/// Block on the 4th directory
const MAX_DIRECTORIES: u64 = 3;
/// Block at this many lines when the session is also multi-file
const MAX_LINES_HARD: u64 = 100;

/// Hook that hard-blocks feature-shaped sessions in strict mode.
pub struct FeaturePatternHook<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> FeaturePatternHook<S> {
    /// Create a new feature-pattern hook over the given session store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn block_reasons(record: &SessionRecord) -> Vec<String> {
        let mut reasons = Vec::new();

        if record.new_files_created > MAX_NEW_FILES {
            reasons.push(format!(
                "Creating {} new files (threshold: {MAX_NEW_FILES})",
                record.new_files_created
            ));
        }

        if record.num_directories() > MAX_DIRECTORIES {
            reasons.push(format!(
                "Editing {} directories (threshold: {MAX_DIRECTORIES})",
                record.num_directories()
            ));
        }

        let touched_test = record.files_touched.iter().any(|f| is_test_file(f));
        let touched_impl = record.files_touched.iter().any(|f| !is_test_file(f));
        if touched_test && touched_impl {
            reasons.push("Feature pattern: implementation + test files".to_string());
        }

        if record.total_lines_added >= MAX_LINES_HARD && record.num_files() >= 3 {
            reasons.push(format!(
                "{} lines across {} files",
                record.total_lines_added,
                record.num_files()
            ));
        }

        reasons
    }

    fn block_message(record: &SessionRecord, reasons: &[String]) -> String {
        format!(
            "BLOCKED: Agentic work detected - delegate this change\n\n\
             {}, {} directories\n\n\
             Reasons:\n- {}\n\n\
             Delegate:\n  spawn_agent(\"[task description]\")\n\n\
             Then review: git diff --stat\n\n\
             To self-implement: Say \"I'm self-implementing [file] because [reason]\"",
            record.summary(),
            record.num_directories(),
            reasons.join("\n- ")
        )
    }
}

impl<S: SessionStore> Hook for FeaturePatternHook<S> {
    fn name(&self) -> &'static str {
        "feature_pattern"
    }

    fn handle(&self, event: &HookInvocation, context: &HookContext) -> HookResult {
        let policy = context.policy;
        if !policy.enabled || policy.mode != Mode::Strict {
            return HookResult::Continue;
        }

        let Some(edit) = event.edit_event() else {
            return HookResult::Continue;
        };

        if ALWAYS_ALLOW_MARKERS
            .iter()
            .any(|marker| edit.file_path.contains(marker))
        {
            return HookResult::Continue;
        }

        let mut record = self.store.load(context.session_key);

        let now = chrono::Utc::now().timestamp();
        if record.take_valid_acknowledgment(&edit.file_path, now) {
            debug!(file = %edit.file_path, "Acknowledged self-implementation, allowing one edit");
            if let Err(e) = self.store.save(context.session_key, &record) {
                warn!(error = %e, "Failed to consume acknowledgment");
            }
            return HookResult::Continue;
        }

        // Project the current edit without persisting; the graduated guard
        // downstream owns accumulation.
        record.apply(&edit);

        let reasons = Self::block_reasons(&record);
        if reasons.is_empty() {
            return HookResult::Continue;
        }

        HookResult::Block {
            reason: Self::block_message(&record, &reasons),
        }
    }
}

/// Whether a path looks like a test file
fn is_test_file(file_path: &str) -> bool {
    TEST_FILE_MARKERS
        .iter()
        .any(|marker| file_path.contains(marker))
}
