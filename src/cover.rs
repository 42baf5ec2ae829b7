//! The deterministic heart of the search: `cover`/`uncover` and the
//! `choose_option`/`unchoose_option` pair built on top of them (component D).
//!
//! `cover` and `deactivate` are mutually recursive in spirit (cover iterates the
//! options of an item, each of which deactivates every other item it touches);
//! `uncover`/`reactivate` retrace the exact same walk backwards. As long as every
//! `cover` is matched by an `uncover` in strict LIFO order, every `SparseSet`
//! touched along the way is restored bit for bit — this is what lets the DFS
//! share a single context across sibling branches without allocating.

use crate::context::SearchContext;
use crate::instance::Instance;

/// Removes `item` from play: if primary, drops it from `active_items`; either
/// way, every option that still contains it stops being a candidate for the
/// items it shares with `item`.
pub fn cover(ctx: &mut SearchContext, instance: &Instance, item: usize) {
    if instance.is_primary(item) {
        ctx.active_items.remove(item);
    }
    let len = ctx.active_options[item].len();
    for k in 0..len {
        let option = ctx.active_options[item].nth(k);
        deactivate(ctx, instance, option, item);
    }
}

/// The exact reverse of `cover`: re-admits every option `cover` ruled out, in
/// reverse order, then (if primary) restores `item` to `active_items`.
pub fn uncover(ctx: &mut SearchContext, instance: &Instance, item: usize) {
    let len = ctx.active_options[item].len();
    for k in (0..len).rev() {
        let option = ctx.active_options[item].nth(k);
        reactivate(ctx, instance, option, item);
    }
    if instance.is_primary(item) {
        ctx.active_items.unremove();
    }
}

/// `option` no longer covers `covered_item` as far as anyone else is concerned:
/// remove it from the active-option set of every other item it touches.
fn deactivate(ctx: &mut SearchContext, instance: &Instance, option: usize, covered_item: usize) {
    for &j in instance.option_items(option) {
        if j != covered_item {
            ctx.active_options[j].remove(option);
        }
    }
}

/// The reverse of `deactivate`: restores `option` into the active-option set of
/// every other item it touches, in reverse of the order `deactivate` used.
fn reactivate(ctx: &mut SearchContext, instance: &Instance, option: usize, uncovered_item: usize) {
    for &j in instance.option_items(option).iter().rev() {
        if j != uncovered_item {
            ctx.active_options[j].unremove();
        }
    }
}

/// Commits to `option` as the choice covering `chosen_item`: pushes it on the
/// path stack, then covers every other item the option touches.
pub fn choose_option(ctx: &mut SearchContext, instance: &Instance, option: usize, chosen_item: usize) {
    ctx.chosen_options.push(crate::common::OptionId(option));
    ctx.level += 1;
    for &j in instance.option_items(option) {
        if j != chosen_item {
            cover(ctx, instance, j);
        }
    }
}

/// The exact reverse of `choose_option`.
pub fn unchoose_option(ctx: &mut SearchContext, instance: &Instance, option: usize, chosen_item: usize) {
    for &j in instance.option_items(option).iter().rev() {
        if j != chosen_item {
            uncover(ctx, instance, j);
        }
    }
    ctx.level -= 1;
    ctx.chosen_options.pop();
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
