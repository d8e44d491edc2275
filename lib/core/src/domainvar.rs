use std::collections::HashMap;
use std::hash::Hash;

use itertools::Itertools;
use snafu::Snafu;

use crate::lit::Lit;
use crate::model::Model;
use crate::solver::Solver;

/// One-hot selector over a typed domain: one fresh literal per value.
///
/// The one-hot constraint itself is not asserted here; callers emit it
/// explicitly so the assertion can carry a tracking tag.
#[derive(Debug)]
pub struct DomainVar<T> {
    map: HashMap<T, Lit>,
    domain: Vec<T>,
    lits: Vec<Lit>,
}

impl<T> DomainVar<T>
where
    T: Hash + Eq + Copy,
{
    pub fn new<S, I>(solver: &mut S, domain: I) -> Self
    where
        S: Solver + ?Sized,
        I: IntoIterator<Item = T>,
    {
        let domain = domain.into_iter().collect_vec();
        let lits = (0..domain.len()).map(|_| solver.new_var()).collect_vec();
        let map = domain.iter().copied().zip(lits.iter().copied()).collect();
        Self { map, domain, lits }
    }

    /// Literal standing for `self == rhs`.
    pub fn eq(&self, rhs: T) -> Lit {
        debug_assert!(self.map.contains_key(&rhs));
        self.map[&rhs]
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    /// Read the selected value back from a model. Fails unless exactly one
    /// literal is assigned true.
    pub fn decode(&self, model: &Model) -> Result<T, OneHotError> {
        let trues = self.lits.iter().positions(|&lit| model.value(lit)).collect_vec();
        match trues[..] {
            [index] => Ok(self.domain[index]),
            _ => Err(OneHotError { num_true: trues.len() }),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("expected exactly one true selector literal, found {}", num_true))]
pub struct OneHotError {
    pub num_true: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::VarisatSolver;

    #[test]
    fn decode_picks_the_single_true_value() {
        let mut solver = VarisatSolver::new();
        let var = DomainVar::new(&mut solver, ["a", "b", "c"]);
        assert_eq!(var.lits().len(), 3);

        let model = Model::new(vec![false, true, false]);
        assert_eq!(var.decode(&model).unwrap(), "b");
    }

    #[test]
    fn decode_rejects_zero_or_multiple() {
        let mut solver = VarisatSolver::new();
        let var = DomainVar::new(&mut solver, [0usize, 1]);

        let none = Model::new(vec![false, false]);
        assert_eq!(var.decode(&none).unwrap_err().num_true, 0);

        let both = Model::new(vec![true, true]);
        assert_eq!(var.decode(&both).unwrap_err().num_true, 2);
    }
}
