//! A conflict-driven clause learning SAT solver.
//!
//! Formulas are read from DIMACS ([`sat::dimacs`]) into a [`sat::cnf::Cnf`]
//! and solved by [`sat::cdcl::Cdcl`], which combines two-watched-literal
//! propagation, first-UIP clause learning, VSIDS decisions with phase saving,
//! Luby restarts and activity-based reduction of learnt clauses.

/// The `sat` module implements the solver and its input format.
pub mod sat;
