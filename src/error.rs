use snafu::Snafu;

use crate::core::domainvar::OneHotError;

/// Failure modes of encoding and reconstruction. `Unsat` and `Unknown`
/// solver answers are ordinary [`Outcome`](crate::Outcome)s, not errors.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SynthesisError {
    #[snafu(display("trace set contains no traces"))]
    EmptyTraceSet,

    #[snafu(display("formula depth must be at least 1"))]
    ZeroDepth,

    #[snafu(display("trace {} is empty", trace))]
    EmptyTrace { trace: usize },

    #[snafu(display("trace {}: lasso start {} is out of range for length {}", trace, lasso_start, length))]
    LassoOutOfRange {
        trace: usize,
        lasso_start: usize,
        length: usize,
    },

    #[snafu(display(
        "trace {}: valuation at position {} has {} propositions, expected {}",
        trace,
        position,
        found,
        expected
    ))]
    WidthMismatch {
        trace: usize,
        position: usize,
        found: usize,
        expected: usize,
    },

    #[snafu(display("backend error: {}", message))]
    Backend { message: String },

    #[snafu(display("ill-formed model at node {}: {}", node, source))]
    MalformedModel { node: usize, source: OneHotError },

    #[snafu(display("the problem has not been encoded yet"))]
    NotEncoded,
}

pub type Result<T, E = SynthesisError> = std::result::Result<T, E>;
