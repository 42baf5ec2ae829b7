//! `xcover`: a parallel, distributed exact-cover solver.
//!
//! The search follows Knuth's dancing-links generalization of Algorithm X:
//! primary items must be covered exactly once, secondary items at most once,
//! and the per-item option lists are maintained as sparse sets that support
//! O(1) LIFO undo instead of a doubly-linked list. Parallelism is applied in
//! two tiers — a static stride partition of the root node's children across
//! processes and threads, then bounded dynamic task spawning deeper in the
//! tree — both built on top of the same single-threaded DFS in `search`.
//!
//! Module layout mirrors the pieces of the design: `sparse_set` and
//! `instance` are the data structures; `context` and `cover` are the search
//! state and its mutators; `search` is the branching/recursion itself;
//! `engine` adds the two tiers of parallelism on top; `abstraction` and
//! `implementation` hold the distributed-reduction seam; `io` is the file
//! parser, progress printer and solution printer.

mod abstraction;
mod common;
mod context;
mod cover;
mod engine;
mod error;
mod implementation;
mod instance;
mod io;
mod search;
mod sparse_set;

pub use abstraction::Topology;
pub use common::{Item, Outcome, OptionId};
pub use context::SearchContext;
pub use cover::{choose_option, cover, uncover, unchoose_option};
pub use engine::{solve_parallel, TASK_BUDGET};
pub use error::LoadError;
pub use implementation::topology::SingleProcessTopology;
#[cfg(feature = "mpi")]
pub use implementation::topology::MpiTopology;
pub use instance::Instance;
pub use io::parser::parse;
pub use io::progress::{ConsoleReporter, NullReporter, Reporter};
pub use search::{choose_next_item, solve, BranchHandler, SearchConfig, Serial};
pub use sparse_set::SparseSet;
