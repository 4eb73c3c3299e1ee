//! The polling cycle driver.
//!
//! A [`Monitor`] owns the baseline snapshot and runs the cycle state
//! machine: build a fresh snapshot, diff it against the baseline, hand
//! the changes to the caller, then replace the baseline. The baseline is
//! the only cross-cycle state and is replaced only after a build
//! completes, so a failed or cancelled cycle leaves the last committed
//! baseline intact and the next cycle retries from it.
//!
//! There is no per-file read timeout; a production deployment watching
//! media that can hang reads (network mounts, dying disks) should add
//! one around the cycle.

use crate::snapshot::{ChangeRecord, Snapshot, WalkOptions, diff};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::warn;

/// Granularity at which a sleeping watch loop rechecks the stop flag.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Driver for repeated snapshot/diff cycles over one monitored root.
#[derive(Debug)]
pub struct Monitor {
    /// Root of the monitored tree.
    root: PathBuf,
    /// Walk and digest options applied to every cycle.
    options: WalkOptions,
    /// Last committed snapshot; `None` until the first cycle completes.
    baseline: Option<Snapshot>,
}

impl Monitor {
    /// Creates a monitor with no baseline; the first cycle establishes it.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, options: WalkOptions) -> Self {
        Self {
            root: root.into(),
            options,
            baseline: None,
        }
    }

    /// Creates a monitor seeded with a previously stored baseline.
    #[must_use]
    pub fn with_baseline(root: impl Into<PathBuf>, options: WalkOptions, baseline: Snapshot) -> Self {
        Self {
            root: root.into(),
            options,
            baseline: Some(baseline),
        }
    }

    /// The monitored root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The current baseline, if one has been established.
    #[must_use]
    pub fn baseline(&self) -> Option<&Snapshot> {
        self.baseline.as_ref()
    }

    /// Runs one polling cycle: build, diff, replace baseline.
    ///
    /// The first cycle returns no changes; it only establishes the
    /// baseline.
    ///
    /// # Errors
    /// Returns an error if the snapshot build fails (missing root, or an
    /// unreadable entry under the abort policy). The baseline is left
    /// unchanged in that case.
    pub fn run_cycle(&mut self) -> Result<Vec<ChangeRecord>> {
        let current = Snapshot::build(&self.root, &self.options)?;
        let changes = match &self.baseline {
            Some(previous) => diff(previous, &current),
            None => Vec::new(),
        };
        self.baseline = Some(current);
        Ok(changes)
    }

    /// Runs cycles at `interval` until `stop` is raised, invoking
    /// `report` with each completed cycle's changes (including the empty
    /// first cycle).
    ///
    /// A failed cycle is logged and does not end the loop; the next
    /// cycle retries against the retained baseline. The stop flag is
    /// honored between cycles and during the inter-cycle sleep.
    pub fn watch<F>(&mut self, interval: Duration, stop: &AtomicBool, mut report: F)
    where
        F: FnMut(&Monitor, &[ChangeRecord]),
    {
        while !stop.load(Ordering::Relaxed) {
            match self.run_cycle() {
                Ok(changes) => report(self, &changes),
                Err(err) => {
                    warn!(root = %self.root.display(), error = %err, "polling cycle failed");
                }
            }
            sleep_unless_stopped(interval, stop);
        }
    }
}

/// Sleeps for `interval`, waking early if `stop` is raised.
fn sleep_unless_stopped(interval: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while !stop.load(Ordering::Relaxed) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        std::thread::sleep(remaining.min(STOP_POLL_INTERVAL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ChangeKind;
    use std::fs;
    use std::sync::atomic::AtomicBool;
    use tempfile::TempDir;

    #[test]
    fn test_first_cycle_establishes_baseline_without_changes() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut monitor = Monitor::new(temp_dir.path(), WalkOptions::default());
        assert!(monitor.baseline().is_none());

        let changes = monitor.run_cycle()?;
        assert!(changes.is_empty());
        assert_eq!(monitor.baseline().unwrap().len(), 1);

        Ok(())
    }

    #[test]
    fn test_cycle_reports_addition_then_settles() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut monitor = Monitor::new(temp_dir.path(), WalkOptions::default());
        monitor.run_cycle()?;

        fs::write(temp_dir.path().join("b.txt"), "world")?;
        let changes = monitor.run_cycle()?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert!(changes[0].path.ends_with("b.txt"));

        // The addition was absorbed into the baseline.
        assert!(monitor.run_cycle()?.is_empty());

        Ok(())
    }

    #[test]
    fn test_cycle_reports_modification() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut monitor = Monitor::new(temp_dir.path(), WalkOptions::default());
        monitor.run_cycle()?;

        fs::write(temp_dir.path().join("a.txt"), "HELLO")?;
        let changes = monitor.run_cycle()?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Modified);

        Ok(())
    }

    #[test]
    fn test_cycle_reports_removal() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut monitor = Monitor::new(temp_dir.path(), WalkOptions::default());
        monitor.run_cycle()?;

        fs::remove_file(temp_dir.path().join("a.txt"))?;
        let changes = monitor.run_cycle()?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Removed);

        Ok(())
    }

    #[test]
    fn test_failed_cycle_retains_baseline() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("watched");
        fs::create_dir(&root)?;
        fs::write(root.join("a.txt"), "hello")?;

        let mut monitor = Monitor::new(&root, WalkOptions::default());
        monitor.run_cycle()?;
        let baseline_len = monitor.baseline().unwrap().len();

        fs::remove_file(root.join("a.txt"))?;
        fs::remove_dir(&root)?;
        assert!(monitor.run_cycle().is_err());
        assert_eq!(monitor.baseline().unwrap().len(), baseline_len);

        // Root reappears empty: the retained baseline makes the loss visible.
        fs::create_dir(&root)?;
        let changes = monitor.run_cycle()?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Removed);

        Ok(())
    }

    #[test]
    fn test_seeded_baseline_is_compared_on_first_cycle() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let seed = Snapshot::build(temp_dir.path(), &WalkOptions::default())?;
        fs::write(temp_dir.path().join("a.txt"), "tampered")?;

        let mut monitor = Monitor::with_baseline(temp_dir.path(), WalkOptions::default(), seed);
        let changes = monitor.run_cycle()?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Modified);

        Ok(())
    }

    #[test]
    fn test_raised_stop_flag_ends_watch_after_one_cycle() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "hello")?;

        let mut monitor = Monitor::new(temp_dir.path(), WalkOptions::default());
        let stop = AtomicBool::new(false);
        let mut cycles = 0;

        monitor.watch(Duration::from_millis(1), &stop, |_, _| {
            cycles += 1;
            stop.store(true, Ordering::Relaxed);
        });

        assert_eq!(cycles, 1);
        assert!(monitor.baseline().is_some());

        Ok(())
    }

    #[test]
    fn test_pre_raised_stop_flag_prevents_any_cycle() {
        let mut monitor = Monitor::new("/nonexistent/vigil/root", WalkOptions::default());
        let stop = AtomicBool::new(true);
        let mut cycles = 0;

        monitor.watch(Duration::from_millis(1), &stop, |_, _| cycles += 1);

        assert_eq!(cycles, 0);
    }
}
