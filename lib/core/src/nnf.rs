use crate::expr::Expr;
use crate::lit::Lit;

/// Negation-normal form over solver literals. Conjunctions never contain
/// conjunctions and disjunctions never contain disjunctions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nnf {
    Lit(Lit),
    And(Vec<Nnf>),
    Or(Vec<Nnf>),
}

impl Nnf {
    fn and(args: Vec<Nnf>) -> Nnf {
        let mut flat = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Nnf::And(inner) => flat.extend(inner),
                a => flat.push(a),
            }
        }
        if flat.len() == 1 {
            flat.pop().unwrap()
        } else {
            Nnf::And(flat)
        }
    }

    fn or(args: Vec<Nnf>) -> Nnf {
        let mut flat = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Nnf::Or(inner) => flat.extend(inner),
                a => flat.push(a),
            }
        }
        if flat.len() == 1 {
            flat.pop().unwrap()
        } else {
            Nnf::Or(flat)
        }
    }
}

impl Expr<Lit> {
    /// Push negations down to the literals. The expression must be
    /// constant-free; run `simplify` first.
    pub fn to_nnf(&self) -> Nnf {
        match self {
            Expr::Const(_) => panic!("constants must be simplified away before NNF conversion"),
            Expr::Terminal(lit) => Nnf::Lit(*lit),
            Expr::Not { arg } => arg.negated_nnf(),
            Expr::And { args } => Nnf::and(args.iter().map(|arg| arg.to_nnf()).collect()),
            Expr::Or { args } => Nnf::or(args.iter().map(|arg| arg.to_nnf()).collect()),
        }
    }

    fn negated_nnf(&self) -> Nnf {
        match self {
            Expr::Const(_) => panic!("constants must be simplified away before NNF conversion"),
            Expr::Terminal(lit) => Nnf::Lit(-*lit),
            Expr::Not { arg } => arg.to_nnf(),
            Expr::And { args } => Nnf::or(args.iter().map(|arg| arg.negated_nnf()).collect()),
            Expr::Or { args } => Nnf::and(args.iter().map(|arg| arg.negated_nnf()).collect()),
        }
    }
}

impl Nnf {
    /// Clausify. A disjunction over a single conjunction distributes
    /// without auxiliary variables; several conjunctions under the same
    /// disjunction are reified through fresh variables. Every subterm
    /// occurs in positive polarity, so the definitional clauses are
    /// one-directional.
    pub fn to_clauses(&self, new_var: &mut dyn FnMut() -> Lit) -> Vec<Vec<Lit>> {
        let mut clauses = Vec::new();
        match self {
            Nnf::Lit(lit) => clauses.push(vec![*lit]),
            Nnf::And(args) => {
                for arg in args {
                    match arg {
                        Nnf::Lit(lit) => clauses.push(vec![*lit]),
                        Nnf::Or(inner) => emit_or(inner, Vec::new(), new_var, &mut clauses),
                        Nnf::And(_) => unreachable!("conjunctions are flattened"),
                    }
                }
            }
            Nnf::Or(args) => emit_or(args, Vec::new(), new_var, &mut clauses),
        }
        clauses
    }
}

/// Clauses for `OR(prefix ∪ args)`.
fn emit_or(args: &[Nnf], prefix: Vec<Lit>, new_var: &mut dyn FnMut() -> Lit, out: &mut Vec<Vec<Lit>>) {
    let mut lits = prefix;
    let mut conjunctions = Vec::new();
    for arg in args {
        match arg {
            Nnf::Lit(lit) => lits.push(*lit),
            Nnf::And(inner) => conjunctions.push(inner.as_slice()),
            Nnf::Or(_) => unreachable!("disjunctions are flattened"),
        }
    }
    match conjunctions.len() {
        0 => out.push(lits),
        1 => {
            for conjunct in conjunctions[0] {
                match conjunct {
                    Nnf::Lit(lit) => {
                        let mut clause = lits.clone();
                        clause.push(*lit);
                        out.push(clause);
                    }
                    Nnf::Or(inner) => emit_or(inner, lits.clone(), new_var, out),
                    Nnf::And(_) => unreachable!("conjunctions are flattened"),
                }
            }
        }
        _ => {
            for inner in conjunctions {
                lits.push(reify_and(inner, new_var, out));
            }
            out.push(lits);
        }
    }
}

/// Fresh literal `r` with `r => AND(args)`.
fn reify_and(args: &[Nnf], new_var: &mut dyn FnMut() -> Lit, out: &mut Vec<Vec<Lit>>) -> Lit {
    let root = new_var();
    for arg in args {
        match arg {
            Nnf::Lit(lit) => out.push(vec![-root, *lit]),
            Nnf::Or(inner) => emit_or(inner, vec![-root], new_var, out),
            Nnf::And(_) => unreachable!("conjunctions are flattened"),
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(val: i32) -> Expr<Lit> {
        Expr::from(Lit::new(val))
    }

    fn clausify(expr: Expr<Lit>, next_var: i32) -> Vec<Vec<i32>> {
        let mut fresh = next_var;
        let clauses = expr.to_nnf().to_clauses(&mut || {
            fresh += 1;
            Lit::new(fresh)
        });
        clauses
            .into_iter()
            .map(|clause| clause.into_iter().map(Lit::get).collect())
            .collect()
    }

    #[test]
    fn implication_distributes_over_conjunction() {
        let expr = Expr::imply(lit(1), Expr::and([lit(2), lit(3)]));
        assert_eq!(clausify(expr, 3), vec![vec![-1, 2], vec![-1, 3]]);
    }

    #[test]
    fn equivalence_with_disjunction_stays_flat() {
        let expr = Expr::iff(lit(1), Expr::or([lit(2), lit(3)]));
        assert_eq!(clausify(expr, 3), vec![vec![-1, 2, 3], vec![1, -2], vec![1, -3]]);
    }

    #[test]
    fn disjoined_conjunctions_are_reified() {
        let expr = Expr::or([Expr::and([lit(1), lit(2)]), Expr::and([lit(3), lit(4)])]);
        let clauses = clausify(expr, 4);
        assert_eq!(
            clauses,
            vec![vec![-5, 1], vec![-5, 2], vec![-6, 3], vec![-6, 4], vec![5, 6]]
        );
    }

    #[test]
    fn negation_is_pushed_to_literals() {
        let expr = Expr::not(Expr::and([lit(1), Expr::or([lit(2), lit(3)])]));
        // ¬(1 ∧ (2 ∨ 3)) = ¬1 ∨ (¬2 ∧ ¬3)
        assert_eq!(clausify(expr, 3), vec![vec![-1, -2], vec![-1, -3]]);
    }
}
