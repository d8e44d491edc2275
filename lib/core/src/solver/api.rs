use std::borrow::Cow;

use crate::lit::Lit;

use super::types::*;

pub trait Solver {
    /// Return the signature of the backing engine.
    fn signature(&self) -> Cow<str>;

    /// Return the number of variables allocated so far.
    fn num_vars(&self) -> usize;

    /// Return the number of clauses added so far.
    fn num_clauses(&self) -> usize;

    /// Allocate a fresh variable and return its positive literal.
    fn new_var(&mut self) -> Lit;

    /// Queue an assumption for the next call to `solve`.
    /// The queue is drained when `solve` runs.
    fn assume(&mut self, lit: Lit);

    /// Add a clause, represented by an iterator of literals.
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>;

    /// Add a unit clause.
    fn add_unit<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        self.add_clause([lit.into()]);
    }

    /// Solve under the queued assumptions.
    fn solve(&mut self) -> SolveResponse;

    /// Value of the given literal in the model of the last `Sat` answer.
    fn value(&self, lit: Lit) -> LitValue;

    /// Whether an assumed literal is part of the last `Unsat` answer's
    /// failed core.
    fn failed(&self, lit: Lit) -> bool;

    /// Diagnostic message from the backend after an `Unknown` answer.
    fn last_error(&self) -> Option<String> {
        None
    }
}
