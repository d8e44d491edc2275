use std::fmt::{Display, Formatter};

use crate::catalog::{Arity, Label};
use crate::trace::Trace;

/// Syntax tree of a synthesized formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    False,
    Atom(usize),
    Unary(Label, Box<Formula>),
    Binary(Label, Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(p: usize) -> Self {
        Formula::Atom(p)
    }

    pub fn unary(label: Label, child: Formula) -> Self {
        debug_assert_eq!(label.arity(), Arity::Unary);
        Formula::Unary(label, Box::new(child))
    }

    pub fn binary(label: Label, left: Formula, right: Formula) -> Self {
        debug_assert_eq!(label.arity(), Arity::Binary);
        Formula::Binary(label, Box::new(left), Box::new(right))
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::False => write!(f, "⊥"),
            Formula::Atom(p) => write!(f, "x{}", p),
            Formula::Unary(label, child) => write!(f, "{}({})", label, child),
            Formula::Binary(label, left, right) => write!(f, "({} {} {})", left, label, right),
        }
    }
}

impl Formula {
    /// Truth value at position `t` of `trace`, under the lasso semantics.
    ///
    /// This mirrors the operator table used by the encoder but is computed
    /// directly on the trace, so it can cross-check synthesized formulas.
    pub fn eval(&self, trace: &Trace, t: usize) -> bool {
        match self {
            Formula::False => false,
            Formula::Atom(p) => trace.value(t, *p),
            Formula::Unary(label, child) => {
                let future = trace.future_pos(t);
                match label {
                    Label::Not => !child.eval(trace, t),
                    Label::Next => child.eval(trace, trace.next_pos(t)),
                    Label::Globally => future.iter().all(|&u| child.eval(trace, u)),
                    Label::GloballyUpTo(k) => up_to(future, *k).iter().all(|&u| child.eval(trace, u)),
                    Label::GloballyAfter(k) => after(future, *k).iter().all(|&u| child.eval(trace, u)),
                    Label::FinallyUpTo(k) => up_to(future, *k).iter().any(|&u| child.eval(trace, u)),
                    _ => unreachable!("label {} is not unary", label),
                }
            }
            Formula::Binary(label, left, right) => {
                let future = trace.future_pos(t);
                let released = |q: usize| {
                    right.eval(trace, future[q]) || (0..q).any(|q2| left.eval(trace, future[q2]))
                };
                match label {
                    Label::And => left.eval(trace, t) && right.eval(trace, t),
                    Label::Or => left.eval(trace, t) || right.eval(trace, t),
                    Label::Implies => !left.eval(trace, t) || right.eval(trace, t),
                    Label::Release => (0..future.len()).all(released),
                    Label::ReleaseUpTo(k) => (0..up_to(future, *k).len()).all(released),
                    Label::ReleaseAfter(k) => (k + 1..future.len()).all(released),
                    Label::UntilUpTo(k) => (0..up_to(future, *k).len()).any(|q| {
                        right.eval(trace, future[q]) && (0..q).all(|q2| left.eval(trace, future[q2]))
                    }),
                    _ => unreachable!("label {} is not binary", label),
                }
            }
        }
    }
}

/// The first `k + 1` positions of the window (or all of it, if shorter).
fn up_to(future: &[usize], k: usize) -> &[usize] {
    &future[..future.len().min(k + 1)]
}

/// The window past index `k`; empty when `k + 1` overshoots.
fn after(future: &[usize], k: usize) -> &[usize] {
    future.get(k + 1..).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(bits: &[bool], lasso_start: usize) -> Trace {
        Trace::new(bits.iter().map(|&b| vec![b]).collect(), lasso_start)
    }

    #[test]
    fn globally_over_a_lasso() {
        let formula = Formula::unary(Label::Globally, Formula::atom(0));
        assert!(formula.eval(&trace(&[true, true], 1), 0));
        assert!(!formula.eval(&trace(&[true, false], 1), 0));
    }

    #[test]
    fn next_wraps_at_the_end() {
        let formula = Formula::unary(Label::Next, Formula::atom(0));
        let tr = trace(&[false, true], 0);
        assert!(formula.eval(&tr, 0));
        // next of the last position wraps to the lasso start
        assert!(!formula.eval(&tr, 1));
    }

    #[test]
    fn bounded_finally_sees_the_bound() {
        let tr = trace(&[false, false, true], 2);
        assert!(formula_f(2).eval(&tr, 0));
        assert!(!formula_f(1).eval(&tr, 0));
    }

    fn formula_f(k: usize) -> Formula {
        Formula::unary(Label::FinallyUpTo(k), Formula::atom(0))
    }

    #[test]
    fn bounded_globally_at_window_length_matches_globally() {
        let tr = trace(&[true, true, false, true], 1);
        let plain = Formula::unary(Label::Globally, Formula::atom(0));
        for t in 0..tr.length() {
            let bound = tr.future_pos(t).len() - 1;
            let bounded = Formula::unary(Label::GloballyUpTo(bound), Formula::atom(0));
            assert_eq!(bounded.eval(&tr, t), plain.eval(&tr, t));
        }
    }

    #[test]
    fn globally_after_the_window_is_vacuous() {
        let tr = trace(&[false, false], 1);
        for t in 0..tr.length() {
            let k = tr.future_pos(t).len() - 1;
            let formula = Formula::unary(Label::GloballyAfter(k), Formula::atom(0));
            assert!(formula.eval(&tr, t));
        }
    }

    #[test]
    fn release_needs_the_right_until_released() {
        let left = Formula::atom(0);
        let right = Formula::unary(Label::Not, Formula::atom(0));
        let formula = Formula::binary(Label::Release, left, right);
        // right holds everywhere: (false, false), released never
        assert!(formula.eval(&trace(&[false, false], 0), 0));
        // right fails at 1 and left never releases
        assert!(!formula.eval(&trace(&[false, true], 0), 0));
    }

    #[test]
    fn bounded_until_respects_the_bound() {
        let formula = Formula::binary(Label::UntilUpTo(0), Formula::atom(0), Formula::atom(0));
        // the witness position 1 is beyond the bound 0
        assert!(!formula.eval(&trace(&[false, true], 1), 0));
        let formula = Formula::binary(Label::UntilUpTo(1), Formula::atom(0), Formula::atom(0));
        assert!(!formula.eval(&trace(&[false, true], 1), 0));
    }

    #[test]
    fn until_holds_while_left_carries_it() {
        let left = Formula::unary(Label::Not, Formula::atom(0));
        let formula = Formula::binary(Label::UntilUpTo(1), left, Formula::atom(0));
        assert!(formula.eval(&trace(&[false, true], 1), 0));
    }

    #[test]
    fn display_is_parenthesized() {
        let formula = Formula::binary(
            Label::UntilUpTo(2),
            Formula::atom(0),
            Formula::unary(Label::Not, Formula::atom(1)),
        );
        assert_eq!(formula.to_string(), "(x0 U≤2 !(x1))");
    }
}
