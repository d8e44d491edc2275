use itertools::Itertools;

use crate::core::expr::Expr;
use crate::core::lit::Lit;
use crate::core::solver::Solver;
use crate::core::tracking::TrackedSolver;

use crate::catalog::{Catalog, Label};

use super::vars::Vars;

fn at_most_one(lits: &[Lit]) -> Expr<Lit> {
    Expr::and(
        lits.iter()
            .tuple_combinations()
            .map(|(&a, &b)| Expr::or([Expr::not(Expr::from(a)), Expr::not(Expr::from(b))])),
    )
}

fn at_least_one(lits: &[Lit]) -> Expr<Lit> {
    Expr::or(lits.iter().copied().map(Expr::from))
}

/// Some label from `labels` is chosen at node `i`.
fn labelled(vars: &Vars, i: usize, labels: &[Label]) -> Expr<Lit> {
    at_least_one(&labels.iter().map(|&label| vars.label_lit(i, label)).collect_vec())
}

/// Shape of the syntax DAG: one label per node, a leaf at node 0, children
/// matching the label's arity, no unreferenced nodes, and negation
/// restricted to atoms.
pub fn assert_structure<S: Solver>(solver: &mut TrackedSolver<S>, vars: &Vars, catalog: &Catalog) {
    let depth = vars.depth();

    solver.assert_and_track(
        Expr::and((0..depth).map(|i| at_most_one(vars.label(i).lits()))),
        "at most one label per node",
    );
    solver.assert_and_track(
        Expr::and((0..depth).map(|i| at_least_one(vars.label(i).lits()))),
        "at least one label per node",
    );

    solver.assert_and_track(
        at_least_one(&catalog.leaves().map(|label| vars.label_lit(0, label)).collect_vec()),
        "node 0 is a leaf",
    );

    let with_child = catalog.unary().chain(catalog.binary()).collect_vec();
    let with_right_child = catalog.binary().collect_vec();
    let unary = catalog.unary().collect_vec();
    let leaf = catalog.leaves().collect_vec();

    solver.assert_and_track(
        Expr::and((1..depth).map(|i| {
            Expr::imply(labelled(vars, i, &with_child), at_most_one(vars.left(i).lits()))
        })),
        "at most one left child",
    );
    solver.assert_and_track(
        Expr::and((1..depth).map(|i| {
            Expr::imply(labelled(vars, i, &with_child), at_least_one(vars.left(i).lits()))
        })),
        "at least one left child",
    );
    solver.assert_and_track(
        Expr::and((1..depth).map(|i| {
            Expr::imply(labelled(vars, i, &with_right_child), at_most_one(vars.right(i).lits()))
        })),
        "at most one right child",
    );
    solver.assert_and_track(
        Expr::and((1..depth).map(|i| {
            Expr::imply(labelled(vars, i, &with_right_child), at_least_one(vars.right(i).lits()))
        })),
        "at least one right child",
    );
    solver.assert_and_track(
        Expr::and((1..depth).map(|i| {
            Expr::imply(
                labelled(vars, i, &unary),
                Expr::not(at_least_one(vars.right(i).lits())),
            )
        })),
        "no right child under unary labels",
    );
    solver.assert_and_track(
        Expr::and((1..depth).map(|i| {
            Expr::imply(
                labelled(vars, i, &leaf),
                Expr::not(Expr::or([
                    at_least_one(vars.left(i).lits()),
                    at_least_one(vars.right(i).lits()),
                ])),
            )
        })),
        "no children under leaf labels",
    );

    // every non-root node is referenced by some later node
    solver.assert_and_track(
        Expr::and((0..depth.saturating_sub(1)).map(|j| {
            at_least_one(
                &((j + 1)..depth)
                    .flat_map(|i| [vars.left_lit(i, j), vars.right_lit(i, j)])
                    .collect_vec(),
            )
        })),
        "no dangling nodes",
    );

    // a negated node's child must carry a proposition
    solver.assert_and_track(
        Expr::and((0..depth).map(|i| {
            Expr::imply(
                Expr::from(vars.label_lit(i, Label::Not)),
                Expr::or((0..i).map(|j| {
                    Expr::and([
                        Expr::from(vars.left_lit(i, j)),
                        labelled(vars, j, catalog.props()),
                    ])
                })),
            )
        })),
        "negation applies only to atoms",
    );
}
