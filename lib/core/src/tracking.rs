use log::debug;

use crate::expr::Expr;
use crate::lit::Lit;
use crate::solver::{SolveResponse, Solver};

/// Tagged assertions on top of a plain solver.
///
/// Every asserted constraint is guarded by a fresh selector literal and
/// recorded under a caller-chosen tag. `solve` assumes all selectors, so
/// an unsatisfiable instance yields a failed-assumption core that maps
/// back to the offending tags.
#[derive(Debug)]
pub struct TrackedSolver<S> {
    backend: S,
    selectors: Vec<(String, Lit)>,
}

impl<S: Solver> TrackedSolver<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            selectors: Vec::new(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn num_tags(&self) -> usize {
        self.selectors.len()
    }

    /// Assert `expr` under a fresh selector recorded as `tag`.
    /// Tags must be unique per solver.
    pub fn assert_and_track(&mut self, expr: Expr<Lit>, tag: impl Into<String>) {
        let tag = tag.into();
        debug_assert!(
            self.selectors.iter().all(|(t, _)| *t != tag),
            "duplicate tracking tag {:?}",
            tag
        );
        let selector = self.backend.new_var();
        match expr.simplify() {
            Expr::Const(true) => {}
            Expr::Const(false) => self.backend.add_clause([-selector]),
            expr => {
                let clauses = expr.to_nnf().to_clauses(&mut || self.backend.new_var());
                for mut clause in clauses {
                    clause.push(-selector);
                    self.backend.add_clause(clause);
                }
            }
        }
        self.selectors.push((tag, selector));
    }

    /// Assume every selector and solve.
    pub fn solve(&mut self) -> SolveResponse {
        debug!("solving under {} tracked assertions", self.selectors.len());
        for &(_, selector) in &self.selectors {
            self.backend.assume(selector);
        }
        self.backend.solve()
    }

    /// Tags whose selectors belong to the failed core of the last `Unsat`
    /// answer.
    pub fn failed_tags(&self) -> Vec<String> {
        self.selectors
            .iter()
            .filter(|(_, selector)| self.backend.failed(*selector))
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}
