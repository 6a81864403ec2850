//! Hook invocation payload
//!
//! Deserializes the JSON document Claude Code writes to a hook's stdin and
//! derives the edit metrics the guards care about. Parsing is deliberately
//! permissive: every field is optional or defaulted, and anything the guards
//! cannot make sense of simply yields no edit event.

use crate::session::EditEvent;
use serde::Deserialize;

/// Tools whose invocations count as edit events
const EDIT_TOOLS: &[&str] = &["Edit", "Write", "MultiEdit"];

/// One hook invocation as delivered on stdin
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HookInvocation {
    /// Which lifecycle event fired the hook (`PreToolUse`, `SessionStart`, ...)
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Name of the tool about to run
    #[serde(default)]
    pub tool_name: String,

    /// Tool arguments; shape varies per tool
    #[serde(default)]
    pub tool_input: ToolInput,

    /// Working directory of the session
    #[serde(default)]
    pub cwd: Option<String>,
}

/// The subset of tool arguments the guards inspect
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToolInput {
    /// Target file for Edit/Write/MultiEdit
    #[serde(default)]
    pub file_path: Option<String>,

    /// Full file content (Write)
    #[serde(default)]
    pub content: Option<String>,

    /// Replacement text (Edit)
    #[serde(default)]
    pub new_string: Option<String>,

    /// Shell command (Bash)
    #[serde(default)]
    pub command: Option<String>,

    /// Per-edit entries (MultiEdit)
    #[serde(default)]
    pub edits: Vec<EditOp>,
}

/// A single entry in a MultiEdit payload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EditOp {
    /// Per-edit target path, when it differs from the top-level one
    #[serde(default)]
    pub file_path: Option<String>,

    /// Replacement text for this edit
    #[serde(default)]
    pub new_string: Option<String>,
}

impl HookInvocation {
    /// Parse an invocation from raw stdin bytes.
    ///
    /// Returns `None` on empty or malformed input; the caller answers
    /// silently in that case, never with an error.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        serde_json::from_str(raw).ok()
    }

    /// Whether this invocation is for a tool that edits files
    #[must_use]
    pub fn is_edit_tool(&self) -> bool {
        EDIT_TOOLS.contains(&self.tool_name.as_str())
    }

    /// Whether this invocation creates a file (the Write tool overwrites or
    /// creates; creation is what the guards count)
    #[must_use]
    pub fn is_new_file(&self) -> bool {
        self.tool_name == "Write"
    }

    /// Derive the edit event for this invocation, if it is one.
    ///
    /// A non-empty `file_path` is a hard precondition: invocations without
    /// one are not counted at all.
    #[must_use]
    pub fn edit_event(&self) -> Option<EditEvent> {
        if !self.is_edit_tool() {
            return None;
        }
        let file_path = self.tool_input.file_path.as_deref().unwrap_or_default();
        if file_path.is_empty() {
            return None;
        }
        Some(EditEvent {
            file_path: file_path.to_string(),
            line_delta: self.tool_input.line_delta(),
            is_new_file: self.is_new_file(),
        })
    }
}

impl ToolInput {
    /// Lines being added or changed by this input.
    ///
    /// `new_string` wins over `content` when both are present; MultiEdit
    /// entries are summed.
    #[must_use]
    pub fn line_delta(&self) -> u64 {
        let new_string = self.new_string.as_deref().unwrap_or_default();
        let content = self.content.as_deref().unwrap_or_default();
        let text = if new_string.is_empty() {
            content
        } else {
            new_string
        };

        let edits: u64 = self
            .edits
            .iter()
            .map(|edit| count_lines(edit.new_string.as_deref().unwrap_or_default()))
            .sum();

        count_lines(text) + edits
    }

    /// Iterate over every (path, content) pair this input carries, for guards
    /// that scan edited text. MultiEdit entries fall back to the top-level
    /// path when they name none.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        let top_path = self.file_path.as_deref().unwrap_or_default();
        let top_text = self
            .new_string
            .as_deref()
            .or(self.content.as_deref())
            .unwrap_or_default();

        let top = (!top_text.is_empty()).then_some((top_path, top_text));

        top.into_iter().chain(self.edits.iter().filter_map(move |edit| {
            let text = edit.new_string.as_deref().unwrap_or_default();
            if text.is_empty() {
                return None;
            }
            Some((edit.file_path.as_deref().unwrap_or(top_path), text))
        }))
    }
}

/// Count newline-delimited segments of edited text.
///
/// Empty text contributes zero; anything else is trimmed first, so a trailing
/// newline does not inflate the count. Whitespace-only text still counts as
/// one segment.
#[must_use]
pub fn count_lines(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }
    text.trim().split('\n').count() as u64
}
