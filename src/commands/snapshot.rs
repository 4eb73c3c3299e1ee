use crate::VigilContext;
use crate::snapshot::Snapshot;
use crate::store;
use crate::utils::expand_tilde;
use anyhow::Result;
use std::path::Path;

/// Builds a snapshot of `root` and either prints it as a digest table or
/// persists it to a baseline file.
pub fn execute(ctx: &VigilContext, root: &str, save: Option<&Path>) -> Result<()> {
    let root = expand_tilde(root)?;
    let snapshot = Snapshot::build(&root, &ctx.walk_options())?;

    if !snapshot.skipped.is_empty() {
        super::print_warning(&format!(
            "{} unreadable entries skipped",
            snapshot.skipped.len()
        ));
    }

    match save {
        Some(path) => {
            store::save(&snapshot, path)?;
            super::print_success(&format!(
                "Recorded {} files to {}",
                snapshot.len(),
                path.display()
            ));
        }
        None => {
            for record in snapshot.sorted_records() {
                println!("{}  {}", record.digest, record.path.display());
            }
        }
    }

    Ok(())
}
