#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Variables and literals.
//!
//! A variable is a dense, 0-based index handed out by the solver. A literal
//! packs a variable and its polarity into a single `u32` as
//! `2 * variable + (1 if negated)`, so the two literals of a variable sit
//! next to each other and a literal can index per-literal tables (watch
//! lists) directly.

use core::fmt;
use core::ops::{Neg, Not};

/// A propositional variable, 0-based.
pub type Variable = u32;

/// A variable together with a polarity.
///
/// Two literals compare equal iff they have the same variable and polarity.
/// The encoding is a bijection over `0..=Variable::MAX / 2`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    /// Builds a literal over `var`. `polarity == true` is the positive literal.
    #[must_use]
    #[inline]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        if polarity {
            Self(var << 1)
        } else {
            Self((var << 1) | 1)
        }
    }

    /// The positive literal of `var`.
    #[must_use]
    #[inline]
    pub const fn positive(var: Variable) -> Self {
        Self::new(var, true)
    }

    /// The negative literal of `var`.
    #[must_use]
    #[inline]
    pub const fn negative(var: Variable) -> Self {
        Self::new(var, false)
    }

    /// Rebuilds a literal from its packed code, see [`Literal::code`].
    #[must_use]
    #[inline]
    pub const fn from_code(code: u32) -> Self {
        Self(code)
    }

    #[must_use]
    #[inline]
    pub const fn variable(self) -> Variable {
        self.0 >> 1
    }

    /// `true` for the positive literal of a variable.
    #[must_use]
    #[inline]
    pub const fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    #[must_use]
    #[inline]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// The literal of the same variable with the opposite polarity.
    #[must_use]
    #[inline]
    pub const fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// The packed code, usable as a dense index into per-literal tables.
    #[must_use]
    #[inline]
    pub const fn code(self) -> u32 {
        self.0
    }

    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Converts a DIMACS literal (signed, 1-based, non-zero) into a literal.
    ///
    /// # Panics
    ///
    /// If `value` is zero.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        assert_ne!(value, 0, "0 terminates a DIMACS clause and is not a literal");
        Self::new(value.unsigned_abs() - 1, value.is_positive())
    }

    /// The DIMACS form of this literal (signed, 1-based).
    ///
    /// # Panics
    ///
    /// If the variable does not fit into an `i32`.
    #[must_use]
    pub fn to_i32(self) -> i32 {
        let var = i32::try_from(self.variable() + 1).expect("literal variable overflowed i32");
        if self.polarity() { var } else { -var }
    }
}

impl Not for Literal {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for Literal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity() {
            write!(f, "x{}", self.variable())
        } else {
            write!(f, "!x{}", self.variable())
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
