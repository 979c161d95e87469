//! Log targets used throughout the library.
//!
//! The library only emits records through the [`log`] facade and never
//! installs a logger; the binary does that with `env_logger`, so
//! `RUST_LOG=search=info,reduction=debug` selects subsystems.

/// Targets to be used within a [`log`] macro.
pub mod targets {
    /// Watch scans and implied assignments.
    pub const PROPAGATION: &str = "propagation";

    /// Conflict analysis and learnt clauses.
    pub const ANALYSIS: &str = "analysis";

    /// Learnt clause database reduction.
    pub const REDUCTION: &str = "reduction";

    /// Clause addition and root-level simplification.
    pub const CLAUSE_DB: &str = "clause_db";

    /// Undoing assignments.
    pub const BACKTRACK: &str = "backtrack";

    /// Decisions and search outcomes.
    pub const SEARCH: &str = "search";

    pub const RESTART: &str = "restart";

    /// Reading DIMACS input.
    pub const DIMACS: &str = "dimacs";
}
