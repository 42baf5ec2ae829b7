//! The distributed-reduction seam (component I). A `Topology` tells a process
//! where it sits among its peers and how to fold every peer's partial result
//! into one grand total; the search engine itself never knows whether it is
//! running alone or as one rank among many.

/// A process's view of the distributed run it belongs to.
///
/// The default build runs a single, unnamed process (`SingleProcessTopology`);
/// the `mpi` feature swaps in a real MPI-backed implementation without the
/// engine or CLI changing a line.
pub trait Topology: Sync {
    /// This process's rank, `0..size()`.
    fn rank(&self) -> usize;
    /// The number of cooperating processes.
    fn size(&self) -> usize;
    /// Sums `local` across every rank and returns the grand total, but only
    /// on rank 0 — every other rank hands its count off to rank 0 and gets
    /// back `None`. Also `None` on rank 0 itself if the reduction could not
    /// complete (e.g. a peer process vanished); callers fall back to
    /// reporting their own local count in that case.
    fn reduce_sum(&self, local: i64) -> Option<i64>;
}
