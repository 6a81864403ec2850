//! Guard Hooks Module
//!
//! Provides the hook system for judging tool invocations before they run:
//! the `Hook` trait, the registry that chains guards together, and the guards
//! themselves.

pub mod delegation_guard;
pub mod destructive_command;
pub mod feature_pattern;
pub mod registry;
pub mod suppression;
pub mod types;

pub use delegation_guard::DelegationGuardHook;
pub use destructive_command::DestructiveCommandHook;
pub use feature_pattern::FeaturePatternHook;
pub use registry::{Hook, HookRegistry};
pub use suppression::SuppressionGuardHook;
pub use types::{HookContext, HookResult};
