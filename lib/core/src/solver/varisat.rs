use std::borrow::Cow;
use std::mem;

use varisat::ExtendFormula;

use crate::lit::Lit;

use super::api::Solver;
use super::types::*;

/// Adapter over the pure-Rust `varisat` CDCL engine.
///
/// The model of the last `Sat` answer and the failed assumptions of the
/// last `Unsat` answer are cached, so queries stay valid until `solve`
/// runs again.
pub struct VarisatSolver {
    engine: varisat::Solver<'static>,
    num_vars: usize,
    num_clauses: usize,
    assumptions: Vec<varisat::Lit>,
    model: Option<Vec<bool>>,
    failed: Vec<i32>,
    error: Option<String>,
}

impl std::fmt::Debug for VarisatSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarisatSolver")
            .field("num_vars", &self.num_vars)
            .field("num_clauses", &self.num_clauses)
            .field("assumptions", &self.assumptions)
            .field("model", &self.model)
            .field("failed", &self.failed)
            .field("error", &self.error)
            .finish()
    }
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            engine: varisat::Solver::new(),
            num_vars: 0,
            num_clauses: 0,
            assumptions: Vec::new(),
            model: None,
            failed: Vec::new(),
            error: None,
        }
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn engine_lit(lit: Lit) -> varisat::Lit {
    varisat::Lit::from_dimacs(lit.get() as isize)
}

impl Solver for VarisatSolver {
    fn signature(&self) -> Cow<str> {
        Cow::Borrowed("varisat")
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    fn new_var(&mut self) -> Lit {
        let var = self.engine.new_var();
        self.num_vars += 1;
        debug_assert_eq!(var.index() + 1, self.num_vars);
        Lit::new(self.num_vars as i32)
    }

    fn assume(&mut self, lit: Lit) {
        self.assumptions.push(engine_lit(lit));
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let clause: Vec<varisat::Lit> = lits.into_iter().map(|lit| engine_lit(lit.into())).collect();
        self.engine.add_clause(&clause);
        self.num_clauses += 1;
    }

    fn solve(&mut self) -> SolveResponse {
        let assumptions = mem::take(&mut self.assumptions);
        self.engine.assume(&assumptions);
        self.model = None;
        self.failed.clear();
        self.error = None;
        match self.engine.solve() {
            Ok(true) => {
                let mut assignment = vec![false; self.num_vars];
                if let Some(model) = self.engine.model() {
                    for lit in model {
                        let index = lit.index();
                        if index < assignment.len() {
                            assignment[index] = lit.is_positive();
                        }
                    }
                }
                self.model = Some(assignment);
                SolveResponse::Sat
            }
            Ok(false) => {
                if let Some(core) = self.engine.failed_core() {
                    self.failed = core.iter().map(|lit| lit.to_dimacs() as i32).collect();
                }
                SolveResponse::Unsat
            }
            Err(e) => {
                self.error = Some(e.to_string());
                SolveResponse::Unknown
            }
        }
    }

    fn value(&self, lit: Lit) -> LitValue {
        match &self.model {
            None => LitValue::DontCare,
            Some(model) => {
                let assigned = model.get(lit.var() as usize - 1).copied().unwrap_or(false);
                if assigned == lit.is_positive() {
                    LitValue::True
                } else {
                    LitValue::False
                }
            }
        }
    }

    fn failed(&self, lit: Lit) -> bool {
        self.failed.contains(&lit.get())
    }

    fn last_error(&self) -> Option<String> {
        self.error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sat_with_model() {
        let mut solver = VarisatSolver::new();
        let a = solver.new_var();
        let b = solver.new_var();
        solver.add_clause([a, b]);
        solver.add_clause([-a]);
        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert_eq!(solver.value(a), LitValue::False);
        assert_eq!(solver.value(b), LitValue::True);
    }

    #[test]
    fn unsat_under_assumptions_reports_failed() {
        let mut solver = VarisatSolver::new();
        let a = solver.new_var();
        let b = solver.new_var();
        solver.add_clause([-a, b]);
        solver.add_clause([-b]);
        solver.assume(a);
        assert_eq!(solver.solve(), SolveResponse::Unsat);
        assert!(solver.failed(a));
        // without the assumption the formula is satisfiable again
        assert_eq!(solver.solve(), SolveResponse::Sat);
    }
}
