//! Hook decision payload
//!
//! Serializes guard verdicts into the `hookSpecificOutput` envelope Claude
//! Code reads from a hook's stdout. A silent verdict produces no payload at
//! all; the exit code is 0 in every case. The payload, not the exit code,
//! carries the decision.

use crate::hooks::HookResult;
use serde::Serialize;

/// The lifecycle event name stamped into every decision payload
const PRE_TOOL_USE: &str = "PreToolUse";

/// Top-level stdout document
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// The envelope Claude Code dispatches on
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput,
}

/// Decision envelope for a `PreToolUse` hook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Event this decision answers
    pub hook_event_name: &'static str,

    /// Advisory text; the operation still proceeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// `"ask"` or `"deny"`; absent for purely advisory output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<&'static str>,

    /// Human-readable reason shown alongside the permission decision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
}

impl HookOutput {
    /// Advisory message: the edit proceeds, the operator sees the text.
    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: PRE_TOOL_USE,
                message: Some(message.into()),
                permission_decision: None,
                permission_decision_reason: None,
            },
        }
    }

    /// Confirmation prompt: the runtime asks the operator before proceeding.
    #[must_use]
    pub fn ask(reason: impl Into<String>) -> Self {
        Self::permission("ask", reason)
    }

    /// Hard denial: the operation is prevented.
    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::permission("deny", reason)
    }

    fn permission(decision: &'static str, reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: PRE_TOOL_USE,
                message: None,
                permission_decision: Some(decision),
                permission_decision_reason: Some(reason.into()),
            },
        }
    }

    /// Map a hook chain result to its stdout payload.
    ///
    /// `Continue` maps to `None`: silence is the absence of output, not an
    /// explicit allow.
    #[must_use]
    pub fn from_result(result: HookResult) -> Option<Self> {
        match result {
            HookResult::Continue => None,
            HookResult::Warn { message } => Some(Self::warn(message)),
            HookResult::Ask { reason } => Some(Self::ask(reason)),
            HookResult::Block { reason } => Some(Self::deny(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_json(output: &HookOutput) -> serde_json::Value {
        serde_json::to_value(output).expect("serializable")
    }

    #[test]
    fn test_warn_payload_shape() {
        let output = HookOutput::warn("heads up");
        assert_eq!(
            as_json(&output),
            json!({
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "message": "heads up"
                }
            })
        );
    }

    #[test]
    fn test_ask_payload_shape() {
        let output = HookOutput::ask("confirm this");
        assert_eq!(
            as_json(&output),
            json!({
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "ask",
                    "permissionDecisionReason": "confirm this"
                }
            })
        );
    }

    #[test]
    fn test_deny_payload_shape() {
        let output = HookOutput::deny("not like this");
        assert_eq!(
            as_json(&output),
            json!({
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "deny",
                    "permissionDecisionReason": "not like this"
                }
            })
        );
    }

    #[test]
    fn test_continue_is_silent() {
        assert!(HookOutput::from_result(HookResult::Continue).is_none());
    }
}
