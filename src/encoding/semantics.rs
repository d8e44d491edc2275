use std::iter::once;

use itertools::Itertools;

use crate::core::expr::Expr;
use crate::core::lit::Lit;
use crate::core::solver::Solver;
use crate::core::tracking::TrackedSolver;

use crate::catalog::{Arity, Catalog, Label};
use crate::trace::{Trace, TraceSet};

use super::vars::Vars;

/// Tie every valuation variable to the operator table: one tracked
/// implication per node, label and trace.
pub fn assert_semantics<S: Solver>(
    solver: &mut TrackedSolver<S>,
    vars: &Vars,
    catalog: &Catalog,
    traces: &TraceSet,
) {
    for (tau, trace) in traces.iter().enumerate() {
        // ⊥ and the propositions may label any node, including node 0
        for i in 0..vars.depth() {
            assert_false_rule(solver, vars, tau, trace, i);
            for p in 0..traces.num_props {
                assert_prop_rule(solver, vars, tau, trace, i, p);
            }
        }
        for i in 1..vars.depth() {
            for &label in catalog.operators() {
                let rule = match label.arity() {
                    Arity::Zeroary => continue,
                    Arity::Unary => unary_rule(vars, tau, trace, i, label),
                    Arity::Binary => binary_rule(vars, tau, trace, i, label),
                };
                solver.assert_and_track(
                    Expr::imply(Expr::from(vars.label_lit(i, label)), rule),
                    format!("semantics of {} for trace {} at node {}", label, tau, i),
                );
            }
        }
    }
}

fn assert_false_rule<S: Solver>(
    solver: &mut TrackedSolver<S>,
    vars: &Vars,
    tau: usize,
    trace: &Trace,
    i: usize,
) {
    let body = Expr::and(
        (0..trace.length()).map(|t| Expr::not(Expr::from(vars.value_lit(i, tau, t)))),
    );
    solver.assert_and_track(
        Expr::imply(Expr::from(vars.label_lit(i, Label::False)), body),
        format!("semantics of ⊥ for trace {} at node {}", tau, i),
    );
}

fn assert_prop_rule<S: Solver>(
    solver: &mut TrackedSolver<S>,
    vars: &Vars,
    tau: usize,
    trace: &Trace,
    i: usize,
    p: usize,
) {
    let body = Expr::and((0..trace.length()).map(|t| {
        let holds = Expr::from(vars.value_lit(i, tau, t));
        if trace.value(t, p) {
            holds
        } else {
            Expr::not(holds)
        }
    }));
    solver.assert_and_track(
        Expr::imply(Expr::from(vars.label_lit(i, Label::Prop(p))), body),
        format!("semantics of x{} for trace {} at node {}", p, tau, i),
    );
}

/// For every candidate child: selecting it makes the node's valuation
/// equivalent to the operator body at every position.
fn unary_rule(vars: &Vars, tau: usize, trace: &Trace, i: usize, label: Label) -> Expr<Lit> {
    Expr::and((0..i).map(|child| {
        Expr::imply(
            Expr::from(vars.left_lit(i, child)),
            Expr::and((0..trace.length()).map(|t| {
                Expr::iff(
                    Expr::from(vars.value_lit(i, tau, t)),
                    unary_body(vars, tau, trace, child, t, label),
                )
            })),
        )
    }))
}

fn unary_body(vars: &Vars, tau: usize, trace: &Trace, child: usize, t: usize, label: Label) -> Expr<Lit> {
    let holds = |u: usize| Expr::from(vars.value_lit(child, tau, u));
    let future = trace.future_pos(t);
    match label {
        Label::Not => Expr::not(holds(t)),
        Label::Next => holds(trace.next_pos(t)),
        Label::Globally => Expr::and(future.iter().map(|&u| holds(u))),
        Label::GloballyUpTo(k) => Expr::and(up_to(future, k).iter().map(|&u| holds(u))),
        Label::GloballyAfter(k) => Expr::and(after(future, k).iter().map(|&u| holds(u))),
        Label::FinallyUpTo(k) => Expr::or(up_to(future, k).iter().map(|&u| holds(u))),
        _ => unreachable!("label {} is not unary", label),
    }
}

fn binary_rule(vars: &Vars, tau: usize, trace: &Trace, i: usize, label: Label) -> Expr<Lit> {
    Expr::and((0..i).cartesian_product(0..i).map(|(left, right)| {
        Expr::imply(
            Expr::and([
                Expr::from(vars.left_lit(i, left)),
                Expr::from(vars.right_lit(i, right)),
            ]),
            Expr::and((0..trace.length()).map(|t| {
                Expr::iff(
                    Expr::from(vars.value_lit(i, tau, t)),
                    binary_body(vars, tau, trace, left, right, t, label),
                )
            })),
        )
    }))
}

fn binary_body(
    vars: &Vars,
    tau: usize,
    trace: &Trace,
    left: usize,
    right: usize,
    t: usize,
    label: Label,
) -> Expr<Lit> {
    let left_holds = |u: usize| Expr::from(vars.value_lit(left, tau, u));
    let right_holds = |u: usize| Expr::from(vars.value_lit(right, tau, u));
    let future = trace.future_pos(t);
    // position q is released: the right child holds there, or the left
    // child held strictly earlier in the window
    let released = |q: usize| {
        Expr::or(once(right_holds(future[q])).chain((0..q).map(|q2| left_holds(future[q2]))))
    };
    match label {
        Label::And => Expr::and([left_holds(t), right_holds(t)]),
        Label::Or => Expr::or([left_holds(t), right_holds(t)]),
        Label::Implies => Expr::imply(left_holds(t), right_holds(t)),
        Label::Release => Expr::and((0..future.len()).map(released)),
        Label::ReleaseUpTo(k) => Expr::and((0..up_to(future, k).len()).map(released)),
        Label::ReleaseAfter(k) => Expr::and((k + 1..future.len()).map(released)),
        Label::UntilUpTo(k) => Expr::or((0..up_to(future, k).len()).map(|q| {
            Expr::and(once(right_holds(future[q])).chain((0..q).map(|q2| left_holds(future[q2]))))
        })),
        _ => unreachable!("label {} is not binary", label),
    }
}

/// The first `k + 1` window positions (or the whole window, if shorter).
fn up_to(future: &[usize], k: usize) -> &[usize] {
    &future[..future.len().min(k + 1)]
}

/// The window past index `k`; empty when `k + 1` overshoots.
fn after(future: &[usize], k: usize) -> &[usize] {
    future.get(k + 1..).unwrap_or(&[])
}
