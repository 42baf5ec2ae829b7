//! The mutable per-search state (component C) and its cloner (component F).
//!
//! One `SearchContext` is created per worker at the start of solving. When the
//! parallel engine decides to spawn a subtree as an independent task, it clones
//! the context wholesale (including the "removed" suffixes of every sparse-set,
//! which hold the LIFO-restore state) rather than rebuilding it from the root,
//! and hands the clone to the new task.

use crate::common::OptionId;
use crate::instance::Instance;
use crate::sparse_set::SparseSet;

/// Mutable state for one in-progress depth-first search over an `Instance`.
/// Exactly one thread ever touches a given context; when work is handed off to
/// another thread, a whole new context is cloned for it (see `Self::clone`,
/// derived below, which performs the deep copy the design calls for).
#[derive(Debug, Clone)]
pub struct SearchContext {
    /// Primary items that still need to be covered.
    pub active_items: SparseSet,
    /// `active_options[item]`: options still containing `item` that have not
    /// been ruled out. Indexed over every item, primary and secondary alike,
    /// since secondary items still need this bookkeeping even though they are
    /// never stored in `active_items` itself.
    pub active_options: Vec<SparseSet>,
    /// The options chosen so far along the current DFS path.
    pub chosen_options: Vec<OptionId>,
    /// Per-level branch bookkeeping used only for progress reporting. Both are
    /// sized to `n_primary` (the maximum possible depth) and addressed directly
    /// by `level`, rather than pushed/popped, since a level's entry is simply
    /// overwritten the next time that depth is revisited.
    pub child_num: Vec<usize>,
    pub num_children: Vec<usize>,
    /// Current recursion depth (number of options chosen so far).
    pub level: usize,
    /// Node and solution counters local to this context.
    pub nodes: u64,
    pub solutions: u64,
    /// Per-context watermark for the next progress report (see design notes:
    /// this used to be a single global counter in the original source, which
    /// raced under parallelism; here it is private to each context).
    pub next_report: u64,
}

impl SearchContext {
    /// Builds a fresh root context: every primary item active, every option of
    /// every item active, nothing chosen yet. `progress_report_interval` seeds
    /// the first progress watermark (see `SearchConfig`): zero leaves it at
    /// zero since reporting is disabled and the value is never consulted,
    /// otherwise the first report lands around node `progress_report_interval`
    /// rather than unconditionally at the first node.
    pub fn new_root(instance: &Instance, progress_report_interval: u64) -> Self {
        let mut active_items = SparseSet::empty(instance.n_items());
        for item in 0..instance.n_primary() {
            active_items.add(item);
        }

        let active_options = (0..instance.n_items())
            .map(|item| {
                let mut s = SparseSet::empty(instance.n_options());
                for &opt in instance.options_of(item) {
                    s.add(opt);
                }
                s
            })
            .collect();

        SearchContext {
            active_items,
            active_options,
            chosen_options: Vec::with_capacity(instance.n_primary()),
            child_num: vec![0; instance.n_primary()],
            num_children: vec![0; instance.n_primary()],
            level: 0,
            nodes: 0,
            solutions: 0,
            next_report: progress_report_interval,
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_context {
    use super::*;

    fn tiny_instance() -> Instance {
        // S1 from the spec: three singleton options, three primary items.
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        Instance::try_new(3, 3, names, vec![vec![0], vec![1], vec![2]]).unwrap()
    }

    #[test]
    fn new_root_activates_every_primary_item() {
        let inst = tiny_instance();
        let ctx = SearchContext::new_root(&inst, 0);
        assert_eq!(ctx.active_items.len(), 3);
        for item in 0..3 {
            assert!(ctx.active_items.contains(item));
        }
        assert_eq!(ctx.level, 0);
        assert_eq!(ctx.nodes, 0);
        assert_eq!(ctx.solutions, 0);
    }

    #[test]
    fn new_root_seeds_active_options_from_the_instance() {
        let inst = tiny_instance();
        let ctx = SearchContext::new_root(&inst, 0);
        assert_eq!(ctx.active_options[0].len(), 1);
        assert!(ctx.active_options[0].contains(0));
        assert!(ctx.active_options[1].contains(1));
        assert!(ctx.active_options[2].contains(2));
    }

    #[test]
    fn clone_is_structurally_identical_and_independent() {
        let inst = tiny_instance();
        let mut ctx = SearchContext::new_root(&inst, 0);
        ctx.active_items.remove(0);
        ctx.nodes = 42;

        let mut clone = ctx.clone();
        assert_eq!(clone.active_items.len(), ctx.active_items.len());
        assert_eq!(clone.nodes, ctx.nodes);

        // mutating the clone must not affect the original
        clone.active_items.remove(1);
        assert!(ctx.active_items.contains(1));
        assert!(!clone.active_items.contains(1));
    }

    #[test]
    fn next_report_is_seeded_from_the_configured_interval() {
        let inst = tiny_instance();
        assert_eq!(SearchContext::new_root(&inst, 0).next_report, 0);
        assert_eq!(SearchContext::new_root(&inst, 50).next_report, 50);
    }
}
