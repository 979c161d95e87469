mod common;

use cdcl_sat::sat::configs::{MinimizationType, SolverOptions};
use cdcl_sat::sat::dimacs::parse_file;
use cdcl_sat::sat::restarter::RestarterType;
use cdcl_sat::sat::solver::SolveStatus;
use common::solve_checked;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(kind);
    let files: Vec<PathBuf> = WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == "cnf"))
        .collect();
    assert!(!files.is_empty(), "no fixtures in {}", dir.display());
    files
}

fn check_all(kind: &str, expected: SolveStatus, options: &SolverOptions) {
    for path in fixtures(kind) {
        let cnf = parse_file(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let (status, solver) = solve_checked(&cnf, options.clone());
        assert_eq!(status, expected, "{}", path.display());
        assert!(
            solver.clause_database().watches_consistent(),
            "{}",
            path.display()
        );
    }
}

#[test]
fn test_sat_fixtures() {
    check_all("sat", SolveStatus::Satisfiable, &SolverOptions::default());
}

#[test]
fn test_unsat_fixtures() {
    check_all("unsat", SolveStatus::Unsatisfiable, &SolverOptions::default());
}

#[test]
fn test_fixtures_under_every_configuration() {
    for restart_policy in [RestarterType::Luby, RestarterType::Geometric, RestarterType::Never] {
        for minimization in [
            MinimizationType::None,
            MinimizationType::Basic,
            MinimizationType::Recursive,
        ] {
            let options = SolverOptions {
                restart_policy,
                minimization,
                restart_first: 10,
                ..SolverOptions::default()
            };
            check_all("sat", SolveStatus::Satisfiable, &options);
            check_all("unsat", SolveStatus::Unsatisfiable, &options);
        }
    }
}
