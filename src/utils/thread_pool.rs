use rayon::ThreadPoolBuilder;

/// Sizes the global rayon pool used for parallel digest computation.
///
/// Safe to call once at startup; a second call (or a pool already built
/// by rayon itself) is not an error, the existing pool just stays in
/// effect. A `num_threads` of zero keeps rayon's own default.
pub fn configure(num_threads: usize) {
    if num_threads == 0 {
        return;
    }
    let result = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("vigil-digest-{i}"))
        .build_global();
    if let Err(e) = result {
        tracing::debug!(error = %e, "global thread pool already configured");
    }
}

/// Default worker count: available cores, capped at 8.
#[must_use]
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .min(8)
}
