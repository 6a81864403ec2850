use hookwarden::event::HookInvocation;
use hookwarden::hooks::{DelegationGuardHook, Hook, HookContext, HookResult};
use hookwarden::policy::{classify, PolicyConfig, Thresholds, Tier};
use hookwarden::session::{EditEvent, FileSessionStore, SessionRecord, SessionStore};
use proptest::prelude::*;

fn seeded_record(files: usize, lines: u64, new_files: u64) -> SessionRecord {
    let mut record = SessionRecord::new();
    for i in 0..files {
        record.apply(&EditEvent {
            file_path: format!("/repo/f{i}.rs"),
            line_delta: 0,
            is_new_file: false,
        });
    }
    record.total_lines_added = lines;
    record.new_files_created = new_files;
    record
}

proptest! {
    /// Classification is total: no combination of counters panics.
    #[test]
    fn never_panics(lines in any::<u64>(), files in 0usize..500, new_files in any::<u64>()) {
        let record = seeded_record(files, lines, new_files);
        let _ = classify(&record, &Thresholds::default());
    }

    /// Containment in the silent tier on all three dimensions is silent.
    #[test]
    fn silent_bound_holds(lines in 0u64..=20) {
        let record = seeded_record(1, lines, 0);
        prop_assert_eq!(classify(&record, &Thresholds::default()), Tier::Silent);
    }

    /// Accumulating a strictly-positive-line edit never decreases the tier.
    #[test]
    fn accumulation_is_monotone(
        files in 0usize..10,
        lines in 0u64..500,
        new_files in 0u64..6,
        extra_lines in 1u64..200,
        new_file in proptest::bool::ANY,
    ) {
        let mut record = seeded_record(files, lines, new_files);
        let thresholds = Thresholds::default();
        let before = classify(&record, &thresholds);

        record.apply(&EditEvent {
            file_path: "/repo/one-more.rs".to_string(),
            line_delta: extra_lines,
            is_new_file: new_file,
        });
        let after = classify(&record, &thresholds);

        prop_assert!(after >= before, "tier went from {:?} to {:?}", before, after);
    }

    /// With the kill switch off the guard stays silent for any stored
    /// session, even one the classifier would block.
    #[test]
    fn disabled_policy_silences_any_session(
        files in 0usize..30,
        lines in 0u64..100_000,
        new_files in 0u64..30,
    ) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSessionStore::new(dir.path());
        store.save("99", &seeded_record(files, lines, new_files)).expect("seed");

        let policy = PolicyConfig { enabled: false, ..PolicyConfig::default() };
        let context = HookContext::new(&policy, "/repo", "99");
        let guard = DelegationGuardHook::new(store);

        let invocation: HookInvocation = serde_json::from_value(serde_json::json!({
            "tool_name": "Write",
            "tool_input": { "file_path": "/repo/huge.rs", "content": "x\n".repeat(500) }
        })).expect("valid payload");

        prop_assert_eq!(guard.handle(&invocation, &context), HookResult::Continue);
    }

    /// Tier ordering is the enforcement ordering.
    #[test]
    fn block_dominates(files in 5usize..50, lines in 101u64..100_000) {
        let record = seeded_record(files, lines, 0);
        prop_assert_eq!(classify(&record, &Thresholds::default()), Tier::Block);
    }
}
