#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Per-literal watch lists.
//!
//! `watches[p]` holds a watcher for every clause that has `!p` among its two
//! watched literals, i.e. the clauses that must be inspected when `p` becomes
//! true. Lists are indexed by literal code, not by variable.

use crate::sat::clause_storage::ClauseRef;
use crate::sat::literal::{Literal, Variable};
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;

/// A watched clause together with a blocking literal.
///
/// If the blocker is already true the clause is satisfied and propagation can
/// skip it without touching the clause itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watcher {
    pub cref: ClauseRef,
    pub blocker: Literal,
}

impl Watcher {
    #[must_use]
    pub const fn new(cref: ClauseRef, blocker: Literal) -> Self {
        Self { cref, blocker }
    }
}

pub type WatchList = SmallVec<[Watcher; 6]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchLists(Vec<WatchList>);

impl WatchLists {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        let mut watches = Self::default();
        if num_vars > 0 {
            watches.init_var((num_vars - 1) as Variable);
        }
        watches
    }

    /// Makes sure both literal slots of `var` exist.
    pub fn init_var(&mut self, var: Variable) {
        let needed = 2 * var as usize + 2;
        if self.0.len() < needed {
            self.0.resize_with(needed, WatchList::new);
        }
    }

    pub fn append(&mut self, lit: Literal, watcher: Watcher) {
        self[lit].push(watcher);
    }

    /// Removes the watcher of `cref` from the list of `lit`, keeping the order
    /// of the remaining watchers.
    ///
    /// # Panics
    ///
    /// If the list holds no watcher for `cref`; the watcher was lost.
    pub fn remove(&mut self, lit: Literal, cref: ClauseRef) {
        let list = &mut self[lit];
        let idx = list
            .iter()
            .position(|w| w.cref == cref)
            .unwrap_or_else(|| panic!("watcher for {cref} not found in the list of {lit:?}"));
        list.remove(idx);
    }

    /// Takes the list of `lit` out, leaving an empty list behind.
    ///
    /// Propagation walks the taken list while appending to the lists of other
    /// literals, then puts the compacted list back with [`WatchLists::restore`].
    pub(crate) fn take(&mut self, lit: Literal) -> WatchList {
        std::mem::take(&mut self[lit])
    }

    pub(crate) fn restore(&mut self, lit: Literal, list: WatchList) {
        debug_assert!(
            self[lit].is_empty(),
            "watch list of {lit:?} grew while it was taken"
        );
        self[lit] = list;
    }

    /// Number of literal slots, two per variable.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of watchers of `cref` in the list of `lit`.
    #[must_use]
    pub fn count(&self, lit: Literal, cref: ClauseRef) -> usize {
        self[lit].iter().filter(|w| w.cref == cref).count()
    }

    /// Iterates over every `(literal, watcher)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (Literal, &Watcher)> {
        self.0.iter().enumerate().flat_map(|(code, list)| {
            list.iter()
                .map(move |w| (Literal::from_code(code as u32), w))
        })
    }
}

impl Index<Literal> for WatchLists {
    type Output = WatchList;

    #[inline]
    fn index(&self, index: Literal) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<Literal> for WatchLists {
    #[inline]
    fn index_mut(&mut self, index: Literal) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
