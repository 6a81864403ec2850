//! Hook dispatcher binary.
//!
//! Reads one hook invocation from stdin, runs the guard chain, and writes the
//! decision payload to stdout. Exit code is 0 in every case, including
//! unreadable input and broken configuration, because a guard that cannot
//! understand its input must never stand in the user's way.

use anyhow::Result;
use dotenvy::dotenv;
use hookwarden::config::Settings;
use hookwarden::decision::HookOutput;
use hookwarden::event::HookInvocation;
use hookwarden::hooks::{
    DelegationGuardHook, DestructiveCommandHook, FeaturePatternHook, HookContext, HookRegistry,
    SuppressionGuardHook,
};
use hookwarden::policy::PolicyConfig;
use hookwarden::session::{session_key, FileSessionStore, SessionStore};
use std::io::Read;
use tracing::{debug, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Logging goes to stderr: stdout belongs to the decision payload.
    init_logging();

    let settings = init_settings();

    let mut raw = String::new();
    if std::io::stdin().read_to_string(&mut raw).is_err() {
        debug!("Could not read stdin, answering silently");
        return Ok(());
    }

    let Some(invocation) = HookInvocation::parse(&raw) else {
        debug!("Empty or unparsable hook input, answering silently");
        return Ok(());
    };

    let store = FileSessionStore::new(settings.state_dir());

    match invocation.hook_event_name.as_deref() {
        Some("SessionStart") => session_start(&store),
        _ => pre_tool_use(&settings, store, &invocation),
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_settings() -> Settings {
    match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "Failed to load settings, using defaults");
            Settings::default()
        }
    }
}

/// Reinitialize the session record and announce that enforcement is active.
fn session_start(store: &FileSessionStore) {
    let key = session_key();
    if let Err(e) = store.reset(&key) {
        warn!(error = %e, "Failed to reset session state");
    }

    println!("[hookwarden] Delegation enforcement active. Multi-file/substantial edits → delegate.");
}

/// Run the guard chain over a tool invocation and print the decision.
fn pre_tool_use(settings: &Settings, store: FileSessionStore, invocation: &HookInvocation) {
    let policy = PolicyConfig::load(&settings.policy_path());
    let cwd = invocation.cwd.clone().unwrap_or_else(default_cwd);
    let key = session_key();

    let registry = build_registry(store);
    let context = HookContext::new(&policy, &cwd, &key);
    let result = registry.execute(invocation, &context);

    let Some(output) = HookOutput::from_result(result) else {
        return;
    };
    match serde_json::to_string(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!(error = %e, "Failed to serialize decision payload"),
    }
}

/// Guard chain in evaluation order. The hard strict-mode rules run before the
/// graduated guard so a hard block is never downgraded to an advisory; the
/// graduated guard owns accumulation either way.
fn build_registry(store: FileSessionStore) -> HookRegistry {
    let mut registry = HookRegistry::new();
    registry.register(Box::new(DestructiveCommandHook::new()));
    registry.register(Box::new(FeaturePatternHook::new(store.clone())));
    registry.register(Box::new(DelegationGuardHook::new(store)));
    registry.register(Box::new(SuppressionGuardHook::new()));
    registry
}

fn default_cwd() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
