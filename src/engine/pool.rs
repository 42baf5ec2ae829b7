//! Bounded dynamic task spawning (the second half of component G). Every
//! branch point below the root consults a single process-wide budget before
//! deciding whether to fork a new thread for it or keep exploring serially on
//! the context already in hand.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam::thread::Scope;

use crate::context::SearchContext;
use crate::cover::choose_option;
use crate::instance::Instance;
use crate::io::progress::Reporter;
use crate::search::{solve, BranchHandler, SearchConfig};

/// The total number of subtrees this process will ever spawn as independent
/// tasks, across every thread and every depth. Deliberately small: most of
/// the parallelism in a typical run comes from the static root-level split,
/// not from this dynamic layer, which exists to pick up slack when the root
/// doesn't have enough branches to keep every thread busy.
pub const TASK_BUDGET: usize = 1000;

/// A `BranchHandler` that spawns a branch as a scoped thread as long as the
/// shared task budget has not run out, and otherwise defers to the caller so
/// it explores the branch itself (i.e. serially, possibly still spawning
/// deeper in that same subtree once it gets there).
///
/// The budget counter only ever grows: each branch point does a single
/// `fetch_add` and decides whether to spawn from the *pre-increment* value it
/// gets back, so concurrent callers each observe a distinct count and never
/// double-spend the same slot. This spawns exactly `TASK_BUDGET` tasks over
/// the run, never more, with no lock needed.
pub struct TaskPool<'a> {
    pub budget: &'a AtomicUsize,
    pub solutions_acc: &'a AtomicU64,
    pub nodes_acc: &'a AtomicU64,
    pub instance: &'a Instance,
    pub config: &'a SearchConfig,
    pub reporter: &'a (dyn Reporter + 'a),
    pub scope: &'a Scope<'a>,
}

impl<'a> BranchHandler for TaskPool<'a> {
    fn handle(&self, ctx: &SearchContext, instance: &Instance, option: usize, item: usize) -> bool {
        let prev = self.budget.fetch_add(1, Ordering::Relaxed);
        if prev >= TASK_BUDGET {
            return false;
        }

        let mut task_ctx = ctx.clone();
        choose_option(&mut task_ctx, instance, option, item);

        let solutions_acc = self.solutions_acc;
        let nodes_acc = self.nodes_acc;
        let config = self.config;
        let reporter = self.reporter;
        let scope = self.scope;
        let budget = self.budget;

        self.scope.spawn(move |_| {
            let pool = TaskPool {
                budget,
                solutions_acc,
                nodes_acc,
                instance,
                config,
                reporter,
                scope,
            };
            solve(&mut task_ctx, instance, config, reporter, &pool);
            solutions_acc.fetch_add(task_ctx.solutions, Ordering::Relaxed);
            nodes_acc.fetch_add(task_ctx.nodes, Ordering::Relaxed);
        });

        true
    }
}
