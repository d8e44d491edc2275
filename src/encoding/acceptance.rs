use crate::core::expr::Expr;
use crate::core::solver::Solver;
use crate::core::tracking::TrackedSolver;

use crate::trace::TraceSet;

use super::vars::Vars;

/// The root valuation at position 0 classifies every sample.
pub fn assert_acceptance<S: Solver>(solver: &mut TrackedSolver<S>, vars: &Vars, traces: &TraceSet) {
    let root = vars.depth() - 1;
    solver.assert_and_track(
        Expr::and(
            traces
                .accepted_indices()
                .map(|tau| Expr::from(vars.value_lit(root, tau, 0))),
        ),
        "positive traces accepted",
    );
    solver.assert_and_track(
        Expr::and(
            traces
                .rejected_indices()
                .map(|tau| Expr::not(Expr::from(vars.value_lit(root, tau, 0)))),
        ),
        "negative traces rejected",
    );
}
