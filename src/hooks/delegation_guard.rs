//! Delegation Guard Hook.
//!
//! Graduated enforcement for direct editing. Session edit metrics accumulate
//! across invocations; the response escalates with the cumulative totals:
//! trivial sessions stay silent, growing ones get an advisory, substantial
//! ones require confirmation, and runaway ones are blocked with a pointer at
//! delegation.

use super::registry::Hook;
use super::types::{HookContext, HookResult};
use crate::event::HookInvocation;
use crate::policy::tier::exceeded_dimensions;
use crate::policy::{classify, Tier};
use crate::session::{SessionRecord, SessionStore};
use tracing::{debug, warn};

/// Suggested remediation command, shown in every escalated response
const DELEGATE_HINT: &str = "spawn_agent(\"[task description]\")";

/// Hook that enforces the graduated delegation policy.
pub struct DelegationGuardHook<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> DelegationGuardHook<S> {
    /// Create a new delegation guard over the given session store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn warn_message(record: &SessionRecord) -> String {
        format!(
            "⚠️  DELEGATION ENCOURAGED\n\n\
             {}\n\n\
             Consider delegating the rest of this change:\n  {DELEGATE_HINT}",
            record.summary()
        )
    }

    fn ask_message(record: &SessionRecord) -> String {
        format!(
            "📋 DELEGATION RECOMMENDED\n\n\
             {}\n\n\
             Delegate via MCP:\n  {DELEGATE_HINT}\n\n\
             Continue with direct edit?",
            record.summary()
        )
    }

    fn block_message(record: &SessionRecord, exceeded: &[String]) -> String {
        let mut reasons = String::new();
        for dimension in exceeded {
            reasons.push_str("\n- ");
            reasons.push_str(dimension);
        }
        format!(
            "🛑 DELEGATION REQUIRED\n\n\
             {}\n\
             Exceeded:{reasons}\n\n\
             Delegate via MCP:\n  {DELEGATE_HINT}\n\n\
             Or add this repository to `exclusions` in:\n  \
             ~/.claude/config/delegation-enforcement.json",
            record.summary()
        )
    }
}

impl<S: SessionStore> Hook for DelegationGuardHook<S> {
    fn name(&self) -> &'static str {
        "delegation_guard"
    }

    fn handle(&self, event: &HookInvocation, context: &HookContext) -> HookResult {
        let policy = context.policy;
        if !policy.enabled {
            return HookResult::Continue;
        }

        let Some(edit) = event.edit_event() else {
            return HookResult::Continue;
        };

        // Bypasses are checked before anything is accumulated: excluded edits
        // do not count toward the session at all.
        if policy.is_excluded_cwd(context.cwd)
            || policy.is_excluded_path(&edit.file_path)
            || policy.is_always_silent(&edit.file_path)
        {
            debug!(file = %edit.file_path, "Edit exempt from delegation enforcement");
            return HookResult::Continue;
        }

        let mut record = self.store.load(context.session_key);
        record.apply(&edit);
        if let Err(e) = self.store.save(context.session_key, &record) {
            // Lost counters only make the guard more lenient, never less.
            warn!(error = %e, "Failed to persist session record");
        }

        let tier = classify(&record, &policy.thresholds);
        debug!(tier = tier.as_str(), summary = %record.summary(), "Session classified");

        match tier {
            Tier::Silent => HookResult::Continue,
            Tier::Warn => HookResult::Warn {
                message: Self::warn_message(&record),
            },
            Tier::Ask => HookResult::Ask {
                reason: Self::ask_message(&record),
            },
            Tier::Block => HookResult::Block {
                reason: Self::block_message(
                    &record,
                    &exceeded_dimensions(&record, &policy.thresholds.ask),
                ),
            },
        }
    }
}
