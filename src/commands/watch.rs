use crate::VigilContext;
use crate::monitor::Monitor;
use crate::output;
use crate::store;
use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runs the polling loop over `root` until interrupted.
///
/// With a baseline file, an existing baseline is resumed and the updated
/// baseline is persisted after every cycle; without one, the first cycle
/// establishes an in-memory baseline and nothing survives the process.
pub fn execute(
    ctx: &VigilContext,
    root: &str,
    interval: Option<&str>,
    baseline: Option<&Path>,
) -> Result<()> {
    let root = expand_tilde(root)?;
    let interval = match interval {
        Some(raw) => humantime::parse_duration(raw)
            .with_context(|| format!("Invalid polling interval: {raw}"))?,
        None => ctx.config.monitor.interval()?,
    };
    let baseline_path = baseline
        .map(Path::to_path_buf)
        .or_else(|| ctx.config.monitor.baseline_path.clone());

    let options = ctx.walk_options();
    let mut monitor = match &baseline_path {
        Some(path) if path.exists() => {
            let seed = store::load(path)?;
            output::info(&format!(
                "Resuming from baseline {} ({} files)",
                path.display(),
                seed.len()
            ));
            Monitor::with_baseline(&root, options, seed)
        }
        _ => Monitor::new(&root, options),
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .context("Failed to install interrupt handler")?;
    }

    output::info(&format!(
        "Monitoring {} every {}",
        root.display(),
        humantime::format_duration(interval)
    ));

    let mut establishing = monitor.baseline().is_none();
    monitor.watch(interval, &stop, |monitor, changes| {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        if establishing {
            establishing = false;
            if let Some(baseline) = monitor.baseline() {
                output::info(&format!(
                    "[{now}] Baseline established: {} files",
                    baseline.len()
                ));
            }
        } else if changes.is_empty() {
            output::verbose(&format!("[{now}] No changes detected"));
        } else {
            println!("[{now}] {} change(s) detected:", changes.len());
            super::print_changes(changes);
        }

        if let Some(path) = &baseline_path
            && let Some(baseline) = monitor.baseline()
            && let Err(err) = store::save(baseline, path)
        {
            output::warning(&format!("Failed to persist baseline: {err:#}"));
        }
    });

    output::info("Monitoring stopped");
    Ok(())
}
