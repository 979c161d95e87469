#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The clause allocator.
//!
//! Every clause of a solve lives here, addressed by a [`ClauseRef`]. A
//! reference is an index into a grow-only arena, so it stays valid while
//! watch lists, reasons on the trail and the clause database all hold copies
//! of it. Freeing a clause leaves a tombstone behind: the slot is never reused
//! during a session, and any later access through the stale reference is an
//! invariant violation that aborts rather than silently reading another
//! clause.

use crate::sat::clause::Clause;
use crate::sat::literal::Literal;
use core::fmt;

/// Opaque handle to a clause in a [`ClauseAllocator`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseRef(u32);

impl ClauseRef {
    /// Reserved value, never handed out by the allocator.
    pub const UNDEF: Self = Self(u32::MAX);

    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::UNDEF {
            write!(f, "cref#undef")
        } else {
            write!(f, "cref#{}", self.0)
        }
    }
}

impl fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClauseAllocator {
    clauses: Vec<Clause>,
    /// Literals held by freed clauses.
    wasted: usize,
    live: usize,
}

impl ClauseAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            clauses: Vec::with_capacity(capacity),
            wasted: 0,
            live: 0,
        }
    }

    /// Copies `literals` into a fresh clause record.
    ///
    /// # Panics
    ///
    /// If the 32-bit reference space is exhausted.
    pub fn alloc(&mut self, literals: &[Literal], learnt: bool) -> ClauseRef {
        let cref = u32::try_from(self.clauses.len())
            .ok()
            .filter(|&idx| idx < ClauseRef::UNDEF.0)
            .map(ClauseRef)
            .unwrap_or_else(|| {
                panic!(
                    "clause allocator overflow: {} references handed out",
                    self.clauses.len()
                )
            });

        self.clauses.push(Clause::new(literals, learnt));
        self.live += 1;
        cref
    }

    /// # Panics
    ///
    /// If `cref` was never allocated or has been freed.
    #[must_use]
    #[inline]
    pub fn get(&self, cref: ClauseRef) -> &Clause {
        let clause = self.clauses.get(cref.index()).unwrap_or_else(|| {
            panic!(
                "clause is not allocated: {cref} (allocated: {})",
                self.clauses.len()
            )
        });
        assert!(!clause.is_deleted(), "clause is already freed: {cref}");
        clause
    }

    /// # Panics
    ///
    /// If `cref` was never allocated or has been freed.
    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, cref: ClauseRef) -> &mut Clause {
        let allocated = self.clauses.len();
        let clause = self
            .clauses
            .get_mut(cref.index())
            .unwrap_or_else(|| panic!("clause is not allocated: {cref} (allocated: {allocated})"));
        assert!(!clause.is_deleted(), "clause is already freed: {cref}");
        clause
    }

    /// Tombstones the clause and accounts its literals as wasted.
    ///
    /// The caller must have detached the clause from every watch list and
    /// cleared it as a reason first.
    ///
    /// # Panics
    ///
    /// If `cref` was never allocated or has already been freed.
    pub fn free(&mut self, cref: ClauseRef) {
        let clause = self.get_mut(cref);
        clause.mark_deleted();
        let len = clause.release();
        self.wasted += len;
        self.live -= 1;
    }

    /// `true` if `cref` refers to an allocated clause that has not been freed.
    #[must_use]
    pub fn is_live(&self, cref: ClauseRef) -> bool {
        self.clauses
            .get(cref.index())
            .is_some_and(|c| !c.is_deleted())
    }

    /// Number of references handed out so far, freed ones included.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.clauses.len()
    }

    /// Number of clauses that have not been freed.
    #[must_use]
    pub const fn live(&self) -> usize {
        self.live
    }

    #[must_use]
    pub const fn wasted(&self) -> usize {
        self.wasted
    }

    /// Iterates over the live clauses with their references.
    pub fn iter(&self) -> impl Iterator<Item = (ClauseRef, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_deleted())
            .map(|(i, c)| (ClauseRef(i as u32), c))
    }
}
