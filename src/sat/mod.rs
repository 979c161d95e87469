#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The CDCL engine and the DIMACS front end that feeds it.
//!
//! Leaf modules come first: literals, assignments, clauses and their arena,
//! watch lists and the activity heap. On top of them sit the trail,
//! propagation, conflict analysis and clause database maintenance, and
//! [`cdcl::Cdcl`] drives the search over all of them.

pub mod assignment;
pub mod cdcl;
pub mod clause;
pub mod clause_management;
pub mod clause_storage;
pub mod cnf;
pub mod configs;
pub mod conflict_analysis;
pub mod dimacs;
pub mod literal;
pub mod logging;
pub mod phase_saving;
pub mod propagation;
pub mod restarter;
pub mod solver;
pub mod trail;
pub mod variable_selection;
pub mod vsids;
pub mod watch;
