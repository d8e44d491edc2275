use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<T> {
    Const(bool),
    Terminal(T),
    Not { arg: Box<Expr<T>> },
    And { args: Vec<Expr<T>> },
    Or { args: Vec<Expr<T>> },
}

// Constructors
impl<T> Expr<T> {
    pub fn not(arg: Self) -> Self {
        Expr::Not { arg: Box::new(arg) }
    }

    /// Empty conjunction is true, a singleton collapses to its argument.
    pub fn and<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        let mut args = args.into_iter().map_into::<Self>().collect_vec();
        match args.len() {
            0 => Expr::Const(true),
            1 => args.pop().unwrap(),
            _ => Expr::And { args },
        }
    }

    /// Empty disjunction is false, a singleton collapses to its argument.
    pub fn or<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        let mut args = args.into_iter().map_into::<Self>().collect_vec();
        match args.len() {
            0 => Expr::Const(false),
            1 => args.pop().unwrap(),
            _ => Expr::Or { args },
        }
    }

    pub fn imply(lhs: Self, rhs: Self) -> Self {
        Expr::or([Expr::not(lhs), rhs])
    }
}

impl<T: Clone> Expr<T> {
    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Expr::and([Expr::imply(lhs.clone(), rhs.clone()), Expr::imply(rhs, lhs)])
    }
}

impl<T> From<T> for Expr<T> {
    fn from(value: T) -> Self {
        Expr::Terminal(value)
    }
}

impl<T> Expr<T> {
    /// Fold constants, flatten nested connectives, cancel double negation.
    /// The result is either a `Const` or contains no `Const` anywhere.
    pub fn simplify(self) -> Self {
        match self {
            Expr::Not { arg } => match arg.simplify() {
                Expr::Const(b) => Expr::Const(!b),
                Expr::Not { arg } => *arg,
                e => Expr::not(e),
            },
            Expr::And { args } => {
                let mut flat = Vec::with_capacity(args.len());
                for arg in args {
                    match arg.simplify() {
                        Expr::Const(true) => {}
                        Expr::Const(false) => return Expr::Const(false),
                        Expr::And { args } => flat.extend(args),
                        e => flat.push(e),
                    }
                }
                Expr::and(flat)
            }
            Expr::Or { args } => {
                let mut flat = Vec::with_capacity(args.len());
                for arg in args {
                    match arg.simplify() {
                        Expr::Const(false) => {}
                        Expr::Const(true) => return Expr::Const(true),
                        Expr::Or { args } => flat.extend(args),
                        e => flat.push(e),
                    }
                }
                Expr::or(flat)
            }
            e => e,
        }
    }
}
