//! Clause records as owned by the [clause allocator](crate::sat::clause_storage).
//!
//! A clause is a literal array plus a small header. Its first two literals are
//! the watched ones. Clauses only ever shrink in place (see [`Clause::pop`]),
//! so the reference handed out by the allocator stays valid for the clause's
//! whole life.

use crate::sat::literal::Literal;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;

/// Inline capacity of a clause's literal array.
pub const INLINE_LITERALS: usize = 8;

/// Literal storage of a clause.
pub type LiteralStorage = SmallVec<[Literal; INLINE_LITERALS]>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clause {
    literals: LiteralStorage,
    /// Learnt by conflict analysis, as opposed to part of the input formula.
    learnt: bool,
    /// Set once the clause has been removed from the database.
    deleted: bool,
    /// Literal block distance, recorded when the clause is learnt.
    lbd: u32,
    activity: f64,
}

impl Clause {
    #[must_use]
    pub fn new(literals: &[Literal], learnt: bool) -> Self {
        Self {
            literals: SmallVec::from_slice(literals),
            learnt,
            deleted: false,
            lbd: 0,
            activity: 0.0,
        }
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    #[must_use]
    #[inline]
    pub const fn is_learnt(&self) -> bool {
        self.learnt
    }

    #[must_use]
    #[inline]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    #[must_use]
    pub const fn lbd(&self) -> u32 {
        self.lbd
    }

    pub fn set_lbd(&mut self, lbd: u32) {
        self.lbd = lbd;
    }

    #[must_use]
    #[inline]
    pub const fn activity(&self) -> f64 {
        self.activity
    }

    pub fn bump_activity(&mut self, inc: f64) {
        self.activity += inc;
    }

    pub fn scale_activity(&mut self, factor: f64) {
        self.activity *= factor;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.literals.swap(a, b);
    }

    /// # Panics
    ///
    /// If the clause is empty.
    #[must_use]
    pub fn last(&self) -> Literal {
        *self
            .literals
            .last()
            .unwrap_or_else(|| panic!("last literal of an empty clause"))
    }

    /// Drops the last literal in place. The storage is never reallocated.
    ///
    /// # Panics
    ///
    /// If the clause is empty.
    pub fn pop(&mut self) {
        assert!(!self.literals.is_empty(), "pop on an empty clause");
        self.literals.truncate(self.literals.len() - 1);
    }

    /// Releases the literal storage of a deleted clause and returns how many
    /// literals it held.
    pub(crate) fn release(&mut self) -> usize {
        let len = self.literals.len();
        self.literals = SmallVec::new();
        len
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl IndexMut<usize> for Clause {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}
