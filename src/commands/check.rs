use crate::VigilContext;
use crate::snapshot::{Snapshot, diff};
use crate::store;
use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use std::path::Path;

/// Compares the live tree under `root` against a stored baseline and
/// reports every change. Returns whether any change was found, so the
/// binary can exit non-zero on a dirty tree.
pub fn execute(
    ctx: &VigilContext,
    root: &str,
    baseline: Option<&Path>,
    update: bool,
) -> Result<bool> {
    let root = expand_tilde(root)?;
    let baseline_path = baseline
        .or(ctx.config.monitor.baseline_path.as_deref())
        .context("No baseline file given (use --baseline or set monitor.baseline_path)")?;

    let previous = store::load(baseline_path)?;
    let current = Snapshot::build(&root, &ctx.walk_options())?;
    let changes = diff(&previous, &current);

    if changes.is_empty() {
        super::print_info("No changes detected");
    } else {
        println!("{} change(s) detected:", changes.len());
        super::print_changes(&changes);
    }

    if update {
        store::save(&current, baseline_path)?;
        super::print_success(&format!("Baseline updated: {}", baseline_path.display()));
    }

    Ok(!changes.is_empty())
}
