use crate::lit::Lit;
use crate::solver::{LitValue, Solver};

/// A total assignment snapshot, detached from the solver that produced it.
#[derive(Debug, Clone)]
pub struct Model {
    data: Vec<bool>,
}

impl Model {
    pub fn new(data: Vec<bool>) -> Self {
        Self { data }
    }

    /// Snapshot the model of the last `Sat` answer.
    pub fn from_solver<S>(solver: &S) -> Self
    where
        S: Solver + ?Sized,
    {
        let data = (1..=solver.num_vars())
            .map(|var| matches!(solver.value(Lit::new(var as i32)), LitValue::True))
            .collect();
        Self { data }
    }

    /// Polarity-aware lookup. Variables beyond the snapshot read as false.
    pub fn value(&self, lit: Lit) -> bool {
        let assigned = self.data.get(lit.var() as usize - 1).copied().unwrap_or(false);
        if lit.is_positive() {
            assigned
        } else {
            !assigned
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
