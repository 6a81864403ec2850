//! Suppression Pattern Hook.
//!
//! Catches edits that quietly switch checks off instead of fixing what the
//! checks found: coverage exclusions, lint disables, type-checker escapes,
//! skipped tests. The guard never blocks these, since sometimes they are the
//! right call, but it makes the operator say so.

#![allow(clippy::non_std_lazy_statics)]

use super::registry::Hook;
use super::types::{HookContext, HookResult};
use crate::event::HookInvocation;
use lazy_regex::lazy_regex;

/// Match vitest/jest config files by path
static RE_COVERAGE_CONFIG: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"(?i)(vitest|jest)\.config");

/// Match an exclude key inside a config file
static RE_EXCLUDE_KEY: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"(?i)\bexclude\s*:");

/// Match eslint-disable and eslint-disable-next-line
static RE_ESLINT_DISABLE: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"(?i)eslint-disable(?:-next-line)?");

/// Match @ts-ignore
static RE_TS_IGNORE: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"(?i)@ts-ignore");

/// Match @ts-expect-error
static RE_TS_EXPECT_ERROR: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"(?i)@ts-expect-error");

/// Match `as any` casts
static RE_AS_ANY: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"\bas\s+any\b");

/// Match `: any` annotations
static RE_COLON_ANY: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r":\s*any\b");

/// Match .skip( test modifiers
static RE_SKIP: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"\.skip\s*\(");

/// Match xit( skipped tests
static RE_XIT: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"\bxit\s*\(");

/// Match xdescribe( skipped suites
static RE_XDESCRIBE: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"\bxdescribe\s*\(");

/// Hook that asks for confirmation before check-suppressing edits.
pub struct SuppressionGuardHook {}

impl SuppressionGuardHook {
    /// Create a new suppression guard hook.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Detect a suppression pattern in edited content.
    ///
    /// Returns the pattern label, or `None` when the content is clean.
    #[must_use]
    pub fn detect(&self, file_path: &str, content: &str) -> Option<&'static str> {
        if content.is_empty() {
            return None;
        }

        if !file_path.is_empty()
            && RE_COVERAGE_CONFIG.is_match(file_path)
            && RE_EXCLUDE_KEY.is_match(content)
        {
            return Some("Coverage exclusion");
        }

        if RE_ESLINT_DISABLE.is_match(content) {
            return Some("ESLint disable");
        }

        if RE_TS_IGNORE.is_match(content) {
            return Some("TypeScript ignore");
        }

        if RE_TS_EXPECT_ERROR.is_match(content) {
            return Some("TypeScript expect-error");
        }

        if RE_AS_ANY.is_match(content) || RE_COLON_ANY.is_match(content) {
            return Some("TypeScript any");
        }

        if RE_SKIP.is_match(content) || RE_XIT.is_match(content) || RE_XDESCRIBE.is_match(content) {
            return Some("Test skip");
        }

        None
    }

    fn ask_message(pattern: &str) -> String {
        format!(
            "⚠️  Exclusion Pattern Detected: {pattern}\n\n\
             Before excluding, consider:\n\
             □ Can the code be refactored to be testable?\n\
             □ Can handler functions be exported and tested with mocks?\n\
             □ Is this genuinely runtime-only code?\n\
             □ Are there existing patterns in the codebase for testing similar code?\n\n\
             If exclusion is truly necessary, document WHY in a comment.\n\n\
             Proceed with this exclusion?"
        )
    }
}

impl Default for SuppressionGuardHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for SuppressionGuardHook {
    fn name(&self) -> &'static str {
        "suppression_guard"
    }

    fn handle(&self, event: &HookInvocation, _context: &HookContext) -> HookResult {
        if !event.is_edit_tool() {
            return HookResult::Continue;
        }

        for (file_path, content) in event.tool_input.texts() {
            if let Some(pattern) = self.detect(file_path, content) {
                return HookResult::Ask {
                    reason: Self::ask_message(pattern),
                };
            }
        }

        HookResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyConfig;
    use serde_json::json;

    fn edit_invocation(file_path: &str, new_string: &str) -> HookInvocation {
        serde_json::from_value(json!({
            "tool_name": "Edit",
            "tool_input": { "file_path": file_path, "new_string": new_string }
        }))
        .expect("valid payload")
    }

    fn run(file_path: &str, new_string: &str) -> HookResult {
        let policy = PolicyConfig::default();
        let context = HookContext::new(&policy, "/repo", "1");
        SuppressionGuardHook::new().handle(&edit_invocation(file_path, new_string), &context)
    }

    #[test]
    fn test_clean_content_passes() {
        assert_eq!(
            run("/repo/src/app.ts", "export const x: number = 1;"),
            HookResult::Continue
        );
    }

    #[test]
    fn test_ts_ignore_asks() {
        match run("/repo/src/app.ts", "// @ts-ignore\nfoo();") {
            HookResult::Ask { reason } => {
                assert!(reason.contains("TypeScript ignore"));
                assert!(reason.contains("Proceed with this exclusion?"));
            }
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn test_as_any_asks() {
        assert!(matches!(
            run("/repo/src/app.ts", "const v = data as any;"),
            HookResult::Ask { .. }
        ));
    }

    #[test]
    fn test_test_skip_asks() {
        assert!(matches!(
            run("/repo/src/app.test.ts", "describe.skip('flaky', () => {});"),
            HookResult::Ask { .. }
        ));
        assert!(matches!(
            run("/repo/src/app.test.ts", "xit('later', () => {});"),
            HookResult::Ask { .. }
        ));
    }

    #[test]
    fn test_coverage_exclusion_requires_config_file() {
        let content = "coverage: { exclude: ['src/cli.ts'] }";
        assert!(matches!(
            run("/repo/vitest.config.ts", content),
            HookResult::Ask { .. }
        ));
        // The same key outside a test-runner config is not a coverage change.
        assert_eq!(run("/repo/src/options.ts", "exclude: true"), HookResult::Continue);
    }

    #[test]
    fn test_multiedit_entries_are_scanned() {
        let policy = PolicyConfig::default();
        let context = HookContext::new(&policy, "/repo", "1");
        let invocation: HookInvocation = serde_json::from_value(json!({
            "tool_name": "MultiEdit",
            "tool_input": {
                "file_path": "/repo/src/app.ts",
                "edits": [
                    { "new_string": "const ok = 1;" },
                    { "new_string": "// eslint-disable-next-line no-console" }
                ]
            }
        }))
        .expect("valid payload");

        let result = SuppressionGuardHook::new().handle(&invocation, &context);
        assert!(matches!(result, HookResult::Ask { .. }));
    }

    #[test]
    fn test_non_edit_tools_pass() {
        let policy = PolicyConfig::default();
        let context = HookContext::new(&policy, "/repo", "1");
        let invocation: HookInvocation = serde_json::from_value(json!({
            "tool_name": "Bash",
            "tool_input": { "command": "echo '@ts-ignore'" }
        }))
        .expect("valid payload");

        let result = SuppressionGuardHook::new().handle(&invocation, &context);
        assert_eq!(result, HookResult::Continue);
    }
}
