/*!
# Errors

All fallible operations of this crate share a single error enum. Failures
are synchronous and unrecovered: callers validate or handle them, there are
no retries and no partial mutation on failure (validation always precedes
mutation).

Queries taking **payload values** report unregistered values as
[`GraphError::NotInGraph`]. Queries taking **handles** instead panic on a
stale handle, matching the convention that handles are only obtained from
the graph itself.
*/

use thiserror::Error;

/// The error type shared by all fallible operations on graphs, algorithms
/// and matchings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A referenced vertex or edge value is not registered in the graph.
    /// Carries a rendering of the offending value.
    #[error("value {0} is not registered in this graph")]
    NotInGraph(String),

    /// A call was malformed independently of graph contents, e.g. an
    /// undirected graph passed to max-flow, equal source and sink, a
    /// negative capacity, or a duplicate agent in a priority ordering.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A precondition intrinsic to an algorithm is violated, e.g. a
    /// non-positive edge weight for shortest paths or an agent with no
    /// acceptable item remaining in top-trading-cycles.
    #[error("algorithm precondition violated: {0}")]
    AlgorithmFailure(String),
}

impl GraphError {
    /// Builds a [`GraphError::NotInGraph`] naming the offending value.
    pub(crate) fn missing<T: std::fmt::Debug>(value: &T) -> Self {
        GraphError::NotInGraph(format!("{value:?}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
