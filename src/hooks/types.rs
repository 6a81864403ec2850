//! Hook Types - results and context for the guard hooks
//!
//! Defines the data structures shared by every guard.

use crate::policy::PolicyConfig;

/// Result of executing a hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HookResult {
    /// Nothing to say; the next hook in the chain runs
    #[default]
    Continue,

    /// Surface an advisory message; the operation proceeds
    Warn {
        /// Advisory text shown to the operator
        message: String,
    },

    /// Ask the operator to confirm before proceeding
    Ask {
        /// Why confirmation is being requested
        reason: String,
    },

    /// Prevent the operation
    Block {
        /// Why the operation is prevented, citing what tripped
        reason: String,
    },
}

/// Context provided to hooks during execution
pub struct HookContext<'a> {
    /// The loaded enforcement policy
    pub policy: &'a PolicyConfig,
    /// Working directory of the session
    pub cwd: &'a str,
    /// Key addressing this session's persisted record
    pub session_key: &'a str,
}

impl<'a> HookContext<'a> {
    /// Create a new hook context
    #[must_use]
    pub const fn new(policy: &'a PolicyConfig, cwd: &'a str, session_key: &'a str) -> Self {
        Self {
            policy,
            cwd,
            session_key,
        }
    }
}
