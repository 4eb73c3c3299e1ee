use crate::VigilContext;
use crate::digest;
use crate::utils::expand_tilde;
use anyhow::Result;

/// Prints the SHA-256 digest of each file, sha256sum style.
pub fn execute(ctx: &VigilContext, files: &[String]) -> Result<()> {
    let chunk_size = ctx.config.performance.chunk_size;
    for raw in files {
        let path = expand_tilde(raw)?;
        let digest = digest::hash_file_with_chunk_size(&path, chunk_size)?;
        println!("{}  {}", digest, path.display());
    }
    Ok(())
}
