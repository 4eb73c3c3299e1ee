//! End-to-end cycle semantics over real directory trees.

mod common;

use anyhow::Result;
use common::TestTree;
use vigil::monitor::Monitor;
use vigil::snapshot::{ChangeKind, ReadErrorPolicy, Snapshot, WalkOptions, diff};
use vigil::store;

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[test]
fn test_empty_tree_produces_empty_snapshot_and_empty_diff() -> Result<()> {
    let tree = TestTree::new()?;

    let s1 = Snapshot::build(tree.path(), &WalkOptions::default())?;
    let s2 = Snapshot::build(tree.path(), &WalkOptions::default())?;

    assert!(s1.is_empty());
    assert!(diff(&s1, &s2).is_empty());

    Ok(())
}

#[test]
fn test_single_file_snapshot_has_expected_digest() -> Result<()> {
    let tree = TestTree::new()?;
    let a = tree.write("a.txt", "hello")?;

    let snapshot = Snapshot::build(tree.path(), &WalkOptions::default())?;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.digest_of(&a), Some(HELLO_SHA256));

    Ok(())
}

#[test]
fn test_added_file_yields_exactly_one_added_record() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("a.txt", "hello")?;

    let previous = Snapshot::build(tree.path(), &WalkOptions::default())?;
    let b = tree.write("b.txt", "fresh")?;
    let current = Snapshot::build(tree.path(), &WalkOptions::default())?;

    let changes = diff(&previous, &current);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::Added);
    assert_eq!(changes[0].path, b);

    Ok(())
}

#[test]
fn test_modified_file_yields_exactly_one_modified_record() -> Result<()> {
    let tree = TestTree::new()?;
    let a = tree.write("a.txt", "hello")?;

    let previous = Snapshot::build(tree.path(), &WalkOptions::default())?;
    tree.write("a.txt", "hello, tampered")?;
    let current = Snapshot::build(tree.path(), &WalkOptions::default())?;

    let changes = diff(&previous, &current);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::Modified);
    assert_eq!(changes[0].path, a);
    assert_eq!(changes[0].digest.len(), 64);
    assert_ne!(changes[0].digest, HELLO_SHA256);

    Ok(())
}

#[test]
fn test_deleted_file_yields_exactly_one_removed_record() -> Result<()> {
    let tree = TestTree::new()?;
    let a = tree.write("a.txt", "hello")?;

    let previous = Snapshot::build(tree.path(), &WalkOptions::default())?;
    tree.remove("a.txt")?;
    let current = Snapshot::build(tree.path(), &WalkOptions::default())?;

    let changes = diff(&previous, &current);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::Removed);
    assert_eq!(changes[0].path, a);
    assert_eq!(changes[0].digest, HELLO_SHA256);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_file_made_unreadable_reports_as_removed_under_skip_policy() -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new()?;
    tree.write("a.txt", "hello")?;
    let locked = tree.write("locked.txt", "secret")?;

    let mut monitor = Monitor::new(tree.path(), WalkOptions::default());
    monitor.run_cycle()?;

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    if fs::read(&locked).is_ok() {
        // Privileged processes bypass permission bits; nothing to test.
        return Ok(());
    }

    let changes = monitor.run_cycle()?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::Removed);
    assert_eq!(changes[0].path, locked);
    // The diagnostic trail: the path was recorded as skipped, and the
    // cycle itself did not fail.
    assert_eq!(monitor.baseline().unwrap().skipped, vec![locked.clone()]);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_abort_policy_fails_cycle_and_keeps_baseline() -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new()?;
    tree.write("a.txt", "hello")?;
    let locked = tree.write("locked.txt", "secret")?;

    let options = WalkOptions {
        on_read_error: ReadErrorPolicy::Abort,
        ..WalkOptions::default()
    };
    let mut monitor = Monitor::new(tree.path(), options);
    monitor.run_cycle()?;

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    if fs::read(&locked).is_ok() {
        return Ok(());
    }

    assert!(monitor.run_cycle().is_err());
    // Both files are still in the retained baseline.
    assert_eq!(monitor.baseline().unwrap().len(), 2);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[test]
fn test_persisted_baseline_survives_process_restart() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("a.txt", "hello")?;
    tree.write("sub/b.txt", "world")?;

    let state = TestTree::new()?;
    let baseline_path = state.path().join("baseline");

    // First process: establish and persist.
    let snapshot = Snapshot::build(tree.path(), &WalkOptions::default())?;
    store::save(&snapshot, &baseline_path)?;

    // Second process: resume, observe a modification.
    tree.write("a.txt", "tampered")?;
    let mut monitor = Monitor::with_baseline(
        tree.path(),
        WalkOptions::default(),
        store::load(&baseline_path)?,
    );
    let changes = monitor.run_cycle()?;

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::Modified);

    Ok(())
}

#[test]
fn test_traversal_order_does_not_affect_diff() -> Result<()> {
    let tree = TestTree::new()?;
    for name in ["z.txt", "a.txt", "m/q.txt", "m/a.txt"] {
        tree.write(name, name)?;
    }

    let s1 = Snapshot::build(tree.path(), &WalkOptions::default())?;
    let s2 = Snapshot::build(tree.path(), &WalkOptions::default())?;

    assert_eq!(s1.len(), 4);
    assert!(diff(&s1, &s2).is_empty());

    Ok(())
}
