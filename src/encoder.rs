use log::{debug, info};
use snafu::ensure;

use crate::core::lit::Lit;
use crate::core::model::Model;
use crate::core::solver::{SolveResponse, Solver, VarisatSolver};
use crate::core::tracking::TrackedSolver;

use crate::catalog::Catalog;
use crate::encoding::{acceptance, semantics, structure, Vars};
use crate::error::{self, Result, SynthesisError};
use crate::formula::Formula;
use crate::reconstruct;
use crate::trace::TraceSet;

/// Answer of the solver on an encoded problem.
#[derive(Debug)]
pub enum Outcome {
    /// A separating formula of this depth exists; the model selects it.
    Sat(Model),
    /// No formula of this depth separates the samples. The tags name an
    /// unsatisfiable subset of the asserted constraints.
    Unsat(Vec<String>),
    /// The backend gave up without an answer.
    Unknown,
}

/// SAT encoding of "some syntax DAG with `depth` nodes classifies the
/// samples".
///
/// The instance owns its solver; variables and constraints are emitted
/// once and survive for the lifetime of the encoding.
#[derive(Debug)]
pub struct DagEncoding<S: Solver> {
    depth: usize,
    traces: TraceSet,
    catalog: Catalog,
    solver: TrackedSolver<S>,
    vars: Option<Vars>,
}

impl DagEncoding<VarisatSolver> {
    /// Encoding over the default backend.
    pub fn with_varisat(depth: usize, traces: TraceSet) -> Result<Self> {
        Self::new(depth, traces, VarisatSolver::new())
    }
}

impl<S: Solver> DagEncoding<S> {
    /// Validates the input; nothing is asserted yet.
    pub fn new(depth: usize, traces: TraceSet, backend: S) -> Result<Self> {
        validate(depth, &traces)?;
        let catalog = Catalog::new(traces.max_length(), traces.num_props);
        Ok(Self {
            depth,
            traces,
            catalog,
            solver: TrackedSolver::new(backend),
            vars: None,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn num_variables(&self) -> usize {
        self.solver.backend().num_vars()
    }

    pub fn num_clauses(&self) -> usize {
        self.solver.backend().num_clauses()
    }

    /// Materialize the variables and emit every constraint group. Calling
    /// this twice is a no-op.
    pub fn encode(&mut self) {
        if self.vars.is_some() {
            return;
        }
        debug!(
            "encoding depth {} over {} traces and {} labels",
            self.depth,
            self.traces.len(),
            self.catalog.labels().len()
        );
        let vars = Vars::new(self.solver.backend_mut(), self.depth, &self.catalog, &self.traces);
        structure::assert_structure(&mut self.solver, &vars, &self.catalog);
        semantics::assert_semantics(&mut self.solver, &vars, &self.catalog, &self.traces);
        acceptance::assert_acceptance(&mut self.solver, &vars, &self.traces);
        info!(
            "encoded depth {}: {} variables, {} clauses, {} tracked assertions",
            self.depth,
            self.solver.backend().num_vars(),
            self.solver.backend().num_clauses(),
            self.solver.num_tags(),
        );
        self.vars = Some(vars);
    }

    /// Encode on demand and query the backend.
    pub fn solve(&mut self) -> Result<Outcome> {
        self.encode();
        match self.solver.solve() {
            SolveResponse::Sat => Ok(Outcome::Sat(Model::from_solver(self.solver.backend()))),
            SolveResponse::Unsat => Ok(Outcome::Unsat(self.solver.failed_tags())),
            SolveResponse::Unknown => match self.solver.backend().last_error() {
                Some(message) => error::BackendSnafu { message }.fail(),
                None => Ok(Outcome::Unknown),
            },
        }
    }

    /// Read the syntax tree selected by `model`.
    pub fn reconstruct(&self, model: &Model) -> Result<Formula> {
        let vars = self.vars.as_ref().ok_or(SynthesisError::NotEncoded)?;
        reconstruct::reconstruct(vars, model)
    }

    /// The label and child indicators, for outer tooling that focuses
    /// unsat-core computation on the DAG shape.
    pub fn informative_variables(&self) -> Result<Vec<Lit>> {
        let vars = self.vars.as_ref().ok_or(SynthesisError::NotEncoded)?;
        Ok(vars.informative())
    }
}

fn validate(depth: usize, traces: &TraceSet) -> Result<()> {
    ensure!(depth >= 1, error::ZeroDepthSnafu);
    ensure!(!traces.is_empty(), error::EmptyTraceSetSnafu);
    for (index, trace) in traces.iter().enumerate() {
        ensure!(trace.length() > 0, error::EmptyTraceSnafu { trace: index });
        ensure!(
            trace.lasso_start() < trace.length(),
            error::LassoOutOfRangeSnafu {
                trace: index,
                lasso_start: trace.lasso_start(),
                length: trace.length(),
            }
        );
        for (position, row) in trace.values().iter().enumerate() {
            ensure!(
                row.len() == traces.num_props,
                error::WidthMismatchSnafu {
                    trace: index,
                    position,
                    found: row.len(),
                    expected: traces.num_props,
                }
            );
        }
    }
    Ok(())
}
