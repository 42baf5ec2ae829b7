//! The parallel engine (component G): static stride partitioning of the
//! root node's children across `processes * threads`, followed by bounded
//! dynamic task spawning within each resulting subtree, with every
//! independently-scheduled subtree's tally folded into a shared accumulator
//! exactly once as it completes.

mod pool;
mod stride;

pub use pool::{TaskPool, TASK_BUDGET};
pub use stride::stride_members;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::abstraction::Topology;
use crate::common::Outcome;
use crate::context::SearchContext;
use crate::cover::{choose_option, cover, unchoose_option};
use crate::instance::Instance;
use crate::io::progress::Reporter;
use crate::search::{choose_next_item, solve, SearchConfig};

/// Runs the full two-tier parallel search over `instance` and returns this
/// process's local outcome (not yet reduced across ranks — see
/// `crate::abstraction::Topology::reduce_sum` for that step, performed by the
/// caller once every local run has finished).
pub fn solve_parallel(
    instance: &Instance,
    config: &SearchConfig,
    reporter: &dyn Reporter,
    topology: &dyn Topology,
    nb_threads: usize,
) -> Outcome {
    let nb_threads = nb_threads.max(1);
    let mut root = SearchContext::new_root(instance, config.progress_report_interval);

    if root.active_items.is_empty() {
        // No primary items at all: the empty selection trivially covers
        // everything, same as the zero-level base case in `search::solve`.
        if config.print_solutions {
            reporter.on_solution(&root, instance);
        }
        return Outcome { nodes: 1, solutions: 1 };
    }

    let item = choose_next_item(&root);
    let n_children = root.active_options[item].len();
    if n_children == 0 {
        return Outcome { nodes: 1, solutions: 0 };
    }

    cover(&mut root, instance, item);
    root.num_children[0] = n_children;

    let rank = topology.rank();
    let size = topology.size();
    let total_workers = size * nb_threads;

    let budget = AtomicUsize::new(0);
    let solutions_acc = AtomicU64::new(0);
    let nodes_acc = AtomicU64::new(0);

    crossbeam::thread::scope(|s| {
        for t in 0..nb_threads {
            let worker_index = rank * nb_threads + t;
            let mut ctx = root.clone();
            let budget = &budget;
            let solutions_acc = &solutions_acc;
            let nodes_acc = &nodes_acc;

            s.spawn(move |_| {
                let pool = TaskPool {
                    budget,
                    solutions_acc,
                    nodes_acc,
                    instance,
                    config,
                    reporter,
                    scope: s,
                };

                for k in stride_members(n_children, worker_index, total_workers) {
                    let option = ctx.active_options[item].nth(k);
                    ctx.child_num[0] = k;

                    if pool.handle(&ctx, instance, option, item) {
                        continue;
                    }

                    choose_option(&mut ctx, instance, option, item);
                    solve(&mut ctx, instance, config, reporter, &pool);
                    unchoose_option(&mut ctx, instance, option, item);

                    if config.max_solutions > 0 && ctx.solutions >= config.max_solutions {
                        break;
                    }
                }

                solutions_acc.fetch_add(ctx.solutions, Ordering::Relaxed);
                nodes_acc.fetch_add(ctx.nodes, Ordering::Relaxed);
            });
        }
    })
    .expect("a worker thread panicked");

    Outcome {
        nodes: 1 + nodes_acc.load(Ordering::Relaxed),
        solutions: solutions_acc.load(Ordering::Relaxed),
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
