#![allow(dead_code)]

use cdcl_sat::sat::cdcl::Cdcl;
use cdcl_sat::sat::cnf::Cnf;
use cdcl_sat::sat::configs::SolverOptions;
use cdcl_sat::sat::solver::{SolveStatus, Solver};

pub fn pigeonhole(pigeons: i32, holes: i32) -> Cnf {
    let var = |p: i32, h: i32| p * holes + h + 1;
    let mut cnf = Cnf::new((pigeons * holes) as usize);
    for p in 0..pigeons {
        cnf.add_clause((0..holes).map(|h| var(p, h)));
    }
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                cnf.add_clause([-var(p, h), -var(q, h)]);
            }
        }
    }
    cnf
}

/// Solves `cnf` and checks any model against it.
pub fn solve_checked(cnf: &Cnf, options: SolverOptions) -> (SolveStatus, Cdcl) {
    let mut solver = Cdcl::from_cnf(cnf, options);
    let status = solver.solve();
    if status == SolveStatus::Satisfiable {
        let model = solver.model_dimacs();
        assert_eq!(model.len(), cnf.num_vars);
        assert_eq!(
            cnf.first_falsified(&model),
            None,
            "model {model:?} does not satisfy the formula"
        );
    }
    (status, solver)
}

/// Exhaustive satisfiability check for small formulas.
pub fn brute_force_sat(cnf: &Cnf) -> bool {
    assert!(cnf.num_vars <= 20, "too many variables to enumerate");
    (0_u32..1 << cnf.num_vars).any(|bits| {
        let model: Vec<i32> = (0..cnf.num_vars)
            .map(|i| {
                let var = i as i32 + 1;
                if bits & (1 << i) == 0 { -var } else { var }
            })
            .collect();
        cnf.verify(&model)
    })
}
