//! SAT-based synthesis of parametric LTL formulas that separate accepted
//! from rejected lasso traces.
//!
//! [`DagEncoding`] translates "some syntax DAG with a given number of nodes
//! classifies the samples" into a propositional constraint system, hands it
//! to a SAT backend, and reads a [`Formula`] back out of a model.

pub use ltl_synth_core as core;

pub mod catalog;
pub mod encoder;
pub mod encoding;
pub mod error;
pub mod formula;
pub mod reconstruct;
pub mod trace;

pub use catalog::{Arity, Catalog, Label};
pub use encoder::{DagEncoding, Outcome};
pub use error::SynthesisError;
pub use formula::Formula;
pub use trace::{Trace, TraceSet};
