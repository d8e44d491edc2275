use itertools::Itertools;

use crate::core::domainvar::DomainVar;
use crate::core::lit::Lit;
use crate::core::solver::Solver;

use crate::catalog::{Catalog, Label};
use crate::trace::TraceSet;

/// The indicator variables of the encoding: per-node label selectors,
/// per-node child selectors and per-position valuations.
#[derive(Debug)]
pub struct Vars {
    depth: usize,
    label: Vec<DomainVar<Label>>,
    left: Vec<DomainVar<usize>>,
    right: Vec<DomainVar<usize>>,
    value: Vec<Vec<Vec<Lit>>>,
}

impl Vars {
    /// Allocate every indicator family: labels first, then left and right
    /// child selectors, then valuations.
    pub fn new<S: Solver>(solver: &mut S, depth: usize, catalog: &Catalog, traces: &TraceSet) -> Self {
        let label = (0..depth)
            .map(|_| DomainVar::new(solver, catalog.labels().iter().copied()))
            .collect_vec();
        let left = (1..depth).map(|i| DomainVar::new(solver, 0..i)).collect_vec();
        let right = (1..depth).map(|i| DomainVar::new(solver, 0..i)).collect_vec();
        let value = (0..depth)
            .map(|_| {
                traces
                    .iter()
                    .map(|trace| (0..trace.length()).map(|_| solver.new_var()).collect_vec())
                    .collect_vec()
            })
            .collect_vec();
        Self {
            depth,
            label,
            left,
            right,
            value,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn label(&self, i: usize) -> &DomainVar<Label> {
        &self.label[i]
    }

    /// Node `i` carries label `o`.
    pub fn label_lit(&self, i: usize, label: Label) -> Lit {
        self.label[i].eq(label)
    }

    pub fn left(&self, i: usize) -> &DomainVar<usize> {
        &self.left[i - 1]
    }

    pub fn right(&self, i: usize) -> &DomainVar<usize> {
        &self.right[i - 1]
    }

    /// The left child of node `i` is node `j`.
    pub fn left_lit(&self, i: usize, j: usize) -> Lit {
        self.left[i - 1].eq(j)
    }

    /// The right child of node `i` is node `j`.
    pub fn right_lit(&self, i: usize, j: usize) -> Lit {
        self.right[i - 1].eq(j)
    }

    /// The subformula at node `i` holds at position `t` of trace `trace`.
    pub fn value_lit(&self, i: usize, trace: usize, t: usize) -> Lit {
        self.value[i][trace][t]
    }

    /// The label and child indicators. Unsat-core minimization in outer
    /// tooling is focused on these.
    pub fn informative(&self) -> Vec<Lit> {
        let mut lits = Vec::new();
        for var in &self.label {
            lits.extend_from_slice(var.lits());
        }
        for var in &self.left {
            lits.extend_from_slice(var.lits());
        }
        for var in &self.right {
            lits.extend_from_slice(var.lits());
        }
        lits
    }
}
