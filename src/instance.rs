//! This module defines `Instance`: the immutable problem description shared,
//! read-only, by every worker thread and process. It owns the CSR-encoded
//! option/item incidence matrix and the primary/secondary item split.

use crate::error::LoadError;

/// An exact-cover instance: a set of items (some primary, some secondary) and
/// a set of options, each option being a small subset of items. Immutable once
/// built; every `SearchContext` solving against it only ever reads it.
///
/// Options are stored in CSR (compressed sparse row) form: `items[ptr[k]..ptr[k+1])`
/// gives the items of option `k`. This matches the access pattern of `cover`/`uncover`,
/// which always iterate "all items of this option" or "all options of this item".
#[derive(Debug, Clone)]
pub struct Instance {
    n_items: usize,
    n_primary: usize,
    item_names: Vec<String>,
    items: Vec<usize>,
    ptr: Vec<usize>,
    /// `options_of[item]` lists, in ascending option-index order, every option
    /// that contains `item`. This is the transposed view of `items`/`ptr` and is
    /// what seeds each `active_options[item]` sparse-set at the start of a search.
    options_of: Vec<Vec<usize>>,
}

impl Instance {
    /// Builds and validates an instance from already name-resolved data.
    ///
    /// `options[k]` lists the item indices of option `k`. Each option must be
    /// non-empty, contain no repeated item, and contain at least one primary
    /// item (index `< n_primary`).
    pub fn try_new(
        n_items: usize,
        n_primary: usize,
        item_names: Vec<String>,
        options: Vec<Vec<usize>>,
    ) -> Result<Instance, LoadError> {
        debug_assert_eq!(item_names.len(), n_items);
        debug_assert!(n_primary <= n_items);

        let mut items = Vec::new();
        let mut ptr = Vec::with_capacity(options.len() + 1);
        let mut options_of = vec![Vec::new(); n_items];

        ptr.push(0);
        for (k, opt) in options.iter().enumerate() {
            let mut seen = vec![false; n_items];
            let mut has_primary = false;
            for &item in opt {
                if seen[item] {
                    return Err(LoadError::DuplicateItemIndex { option: k, item });
                }
                seen[item] = true;
                has_primary |= item < n_primary;
                items.push(item);
                options_of[item].push(k);
            }
            if !has_primary {
                return Err(LoadError::OptionWithoutPrimaryItem(k));
            }
            ptr.push(items.len());
        }

        Ok(Instance { n_items, n_primary, item_names, items, ptr, options_of })
    }

    #[inline]
    pub fn n_items(&self) -> usize {
        self.n_items
    }
    #[inline]
    pub fn n_primary(&self) -> usize {
        self.n_primary
    }
    #[inline]
    pub fn n_secondary(&self) -> usize {
        self.n_items - self.n_primary
    }
    #[inline]
    pub fn n_options(&self) -> usize {
        self.ptr.len() - 1
    }
    #[inline]
    pub fn is_primary(&self, item: usize) -> bool {
        item < self.n_primary
    }
    #[inline]
    pub fn item_name(&self, item: usize) -> &str {
        &self.item_names[item]
    }
    /// The items contained in option `k`, in the order they were declared.
    #[inline]
    pub fn option_items(&self, option: usize) -> &[usize] {
        &self.items[self.ptr[option]..self.ptr[option + 1]]
    }
    /// Every option that contains `item`, in ascending option-index order.
    #[inline]
    pub fn options_of(&self, item: usize) -> &[usize] {
        &self.options_of[item]
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
