#![deny(missing_docs)]
//! Hookwarden library.
//!
//! Guard hooks for Claude Code tool invocations: graduated delegation
//! enforcement over per-session edit metrics, plus stateless guards for
//! destructive commands and check-suppressing edits. Every invocation is a
//! fresh short-lived process; failures always degrade to the most permissive
//! outcome.

/// Process settings and crate constants.
pub mod config;
/// Stdout decision payloads.
pub mod decision;
/// Stdin invocation payloads and edit metrics derivation.
pub mod event;
/// Hook trait, registry, and the guard hooks.
pub mod hooks;
/// Enforcement policy document and tier classification.
pub mod policy;
/// Session record, accumulator, and persistence.
pub mod session;
