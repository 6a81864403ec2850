//! Destructive Command Hook.
//!
//! Blocks git and filesystem commands that can lose uncommitted work before
//! they run. A safe-pattern allowlist is consulted first so that the harmless
//! spellings (`git checkout -b`, `git clean -n`, `--force-with-lease`) never
//! trip the guard.

#![allow(clippy::non_std_lazy_statics)]

use super::registry::Hook;
use super::types::{HookContext, HookResult};
use crate::event::HookInvocation;
use lazy_regex::lazy_regex;

/// Patterns that override the destructive table (checked first)
const SAFE: &[&str] = &[
    "git checkout -b",       // new branch
    "git checkout --orphan", // orphan branch
    "git restore --staged",  // unstaging is safe
    "git restore -S",        // unstaging short form
    "git clean -n",          // dry run
    "git clean --dry-run",   // dry run long form
    "--force-with-lease",    // safe force push
    "--force-if-includes",   // safe force push variant
];

/// Substrings that indicate destructive commands, with remediation
const DESTRUCTIVE: &[(&str, &str)] = &[
    (
        "rm ",
        "Deletes permanently. Prefer a trash utility so the files stay recoverable.",
    ),
    (
        "git checkout -- ",
        "Discards uncommitted changes permanently. Use 'git stash' first.",
    ),
    (
        "git reset --hard",
        "Destroys all uncommitted work. Use 'git stash' first.",
    ),
    (
        "git clean -f",
        "Deletes untracked files permanently. Use 'git clean -n' to preview first.",
    ),
    (
        "git push --force",
        "Overwrites remote history. Use '--force-with-lease' instead.",
    ),
    (
        "git push -f",
        "Overwrites remote history. Use '--force-with-lease' instead.",
    ),
    (
        "git branch -D",
        "Force-deletes branch without merge check. Use '-d' for safety.",
    ),
    ("git stash drop", "Permanently deletes stashed changes."),
    ("git stash clear", "Permanently deletes ALL stashed changes."),
    (
        "git restore ",
        "Can discard uncommitted changes. Be careful.",
    ),
    ("--no-verify", "Skips git hooks. Hooks enforce quality gates."),
    (
        "--no-gpg-sign",
        "Skips commit signing. May violate repo policy.",
    ),
];

/// Match a git merge at the start of the command
static RE_GIT_MERGE: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"^git\s+merge\b");

/// Hook that blocks destructive shell commands.
pub struct DestructiveCommandHook {}

impl DestructiveCommandHook {
    /// Create a new destructive command hook.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Check whether a command should be blocked.
    ///
    /// Returns `Some(reason)` for destructive commands, `None` when the
    /// command is safe or matches the allowlist.
    #[must_use]
    pub fn check_command(&self, command: &str) -> Option<String> {
        let command = command.trim();
        if command.is_empty() {
            return None;
        }

        // Allowlist first: a safe spelling disarms every later check.
        if SAFE.iter().any(|safe| command.contains(safe)) {
            return None;
        }

        if RE_GIT_MERGE.is_match(command) {
            return Some(
                "git merge is blocked. Merges can create unexpected conflicts. \
                 Run this manually if needed."
                    .to_string(),
            );
        }

        DESTRUCTIVE
            .iter()
            .find(|(pattern, _)| command.contains(pattern))
            .map(|(_, reason)| (*reason).to_string())
    }
}

impl Default for DestructiveCommandHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for DestructiveCommandHook {
    fn name(&self) -> &'static str {
        "destructive_command"
    }

    fn handle(&self, event: &HookInvocation, _context: &HookContext) -> HookResult {
        if event.tool_name != "Bash" {
            return HookResult::Continue;
        }

        let command = event.tool_input.command.as_deref().unwrap_or_default();
        match self.check_command(command) {
            Some(reason) => HookResult::Block {
                reason: format!(
                    "BLOCKED: {reason}\n\nCommand: {command}\n\nRun this yourself if truly needed."
                ),
            },
            None => HookResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyConfig;
    use serde_json::json;

    fn bash_invocation(command: &str) -> HookInvocation {
        serde_json::from_value(json!({
            "tool_name": "Bash",
            "tool_input": { "command": command }
        }))
        .expect("valid payload")
    }

    fn run(command: &str) -> HookResult {
        let policy = PolicyConfig::default();
        let context = HookContext::new(&policy, "/repo", "1");
        DestructiveCommandHook::new().handle(&bash_invocation(command), &context)
    }

    #[test]
    fn test_plain_commands_pass() {
        assert_eq!(run("cargo build"), HookResult::Continue);
        assert_eq!(run("git status"), HookResult::Continue);
        assert_eq!(run(""), HookResult::Continue);
    }

    #[test]
    fn test_force_push_is_blocked() {
        assert!(matches!(run("git push --force origin main"), HookResult::Block { .. }));
        assert!(matches!(run("git push -f"), HookResult::Block { .. }));
    }

    #[test]
    fn test_force_with_lease_is_allowed() {
        assert_eq!(
            run("git push --force-with-lease origin main"),
            HookResult::Continue
        );
    }

    #[test]
    fn test_reset_hard_is_blocked_with_remediation() {
        match run("git reset --hard HEAD~3") {
            HookResult::Block { reason } => {
                assert!(reason.contains("git stash"));
                assert!(reason.contains("git reset --hard HEAD~3"));
            }
            other => panic!("expected Block, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_is_blocked() {
        assert!(matches!(run("git merge feature"), HookResult::Block { .. }));
        // Not at the start of the command: the merge anchor does not fire.
        assert_eq!(run("echo git merge"), HookResult::Continue);
    }

    #[test]
    fn test_dry_run_clean_is_allowed() {
        assert_eq!(run("git clean -n"), HookResult::Continue);
        assert!(matches!(run("git clean -fd"), HookResult::Block { .. }));
    }

    #[test]
    fn test_new_branch_checkout_is_allowed() {
        assert_eq!(run("git checkout -b feature/guard"), HookResult::Continue);
        assert!(matches!(
            run("git checkout -- src/main.rs"),
            HookResult::Block { .. }
        ));
    }

    #[test]
    fn test_unstaging_is_allowed_but_restore_is_not() {
        assert_eq!(run("git restore --staged ."), HookResult::Continue);
        assert!(matches!(run("git restore src/"), HookResult::Block { .. }));
    }

    #[test]
    fn test_no_verify_is_blocked() {
        assert!(matches!(
            run("git commit --no-verify -m wip"),
            HookResult::Block { .. }
        ));
    }

    #[test]
    fn test_other_tools_are_ignored() {
        let policy = PolicyConfig::default();
        let context = HookContext::new(&policy, "/repo", "1");
        let invocation: HookInvocation = serde_json::from_value(json!({
            "tool_name": "Edit",
            "tool_input": { "file_path": "/repo/a.rs", "new_string": "rm -rf /" }
        }))
        .expect("valid payload");

        let result = DestructiveCommandHook::new().handle(&invocation, &context);
        assert_eq!(result, HookResult::Continue);
    }
}
