//! Hook Registry - manages and executes hooks
//!
//! Provides the `Hook` trait and `HookRegistry` for registering guards and
//! running them against an incoming tool invocation.

use super::types::{HookContext, HookResult};
use crate::event::HookInvocation;
use tracing::{debug, info};

/// Trait for implementing guard hooks
pub trait Hook {
    /// Name of the hook for logging and debugging
    fn name(&self) -> &'static str;

    /// Handle a tool invocation and return the result
    ///
    /// Hooks should return `HookResult::Continue` when the invocation is not
    /// theirs to judge. Any other result ends the chain.
    fn handle(&self, event: &HookInvocation, context: &HookContext) -> HookResult;
}

/// Registry that manages multiple hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookRegistry {
    /// Create a new empty hook registry
    #[must_use]
    pub const fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new hook
    pub fn register(&mut self, hook: Box<dyn Hook>) {
        info!(hook = hook.name(), "Registered hook");
        self.hooks.push(hook);
    }

    /// Execute all hooks for an invocation
    ///
    /// Hooks are executed in registration order. The first non-Continue
    /// result stops the chain and is returned.
    #[must_use]
    pub fn execute(&self, event: &HookInvocation, context: &HookContext) -> HookResult {
        for hook in &self.hooks {
            let result = hook.handle(event, context);

            match &result {
                HookResult::Continue => {
                    debug!(hook = hook.name(), "Hook returned Continue");
                }
                HookResult::Warn { message } => {
                    info!(
                        hook = hook.name(),
                        message_len = message.len(),
                        "Hook surfacing warning"
                    );
                    return result;
                }
                HookResult::Ask { reason } => {
                    info!(
                        hook = hook.name(),
                        reason = %reason,
                        "Hook requesting confirmation"
                    );
                    return result;
                }
                HookResult::Block { reason } => {
                    info!(
                        hook = hook.name(),
                        reason = %reason,
                        "Hook blocking action"
                    );
                    return result;
                }
            }
        }

        HookResult::Continue
    }

    /// Check if any hooks are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Get the number of registered hooks
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
