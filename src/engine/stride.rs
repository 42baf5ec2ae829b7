//! Static work distribution across the outer `rank x thread` grid (the first
//! half of component G). Applied exactly once, at the root node's children,
//! before any dynamic task spawning ever happens.

/// The root-level branch indices assigned to worker `worker_index` out of
/// `total_workers` cooperating workers (`processes * threads_per_process`),
/// given `n_children` candidate options at the root. Every index in
/// `0..n_children` belongs to exactly one worker.
pub fn stride_members(n_children: usize, worker_index: usize, total_workers: usize) -> impl Iterator<Item = usize> {
    debug_assert!(worker_index < total_workers);
    (worker_index..n_children).step_by(total_workers)
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
