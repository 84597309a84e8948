//! Typed error taxonomy for the crate's library boundary.
//!
//! Split by phase rather than flattened into one enum: callers that only
//! ever call `Graph::add_edge` shouldn't have to match on TSP-phase variants,
//! and vice versa. `OrchestratorError` is the one type `build_routes`
//! actually returns, wrapping the rest.

/// failures validating caller-supplied input before any work starts.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("no points were supplied")]
    EmptyPoints,
    #[error("route count must be positive, got {0}")]
    NonPositiveRouteCount(i64),
    #[error("{unreachable} of {total} points are not reachable in the graph")]
    UnreachablePoints { unreachable: usize, total: usize },
    #[error("{0}")]
    LimitExceeded(#[from] LimitExceededError),
}

#[derive(Debug, thiserror::Error, PartialEq, Clone, Copy)]
pub enum LimitExceededError {
    #[error("point count {got} exceeds the configured limit of {limit}")]
    Points { got: usize, limit: usize },
    #[error("edge count exceeds the configured limit of {limit}")]
    Edges { limit: usize },
    #[error("route count {got} exceeds the configured limit of {limit}")]
    Clusters { got: usize, limit: usize },
    #[error("cluster size {got} exceeds the configured limit of {limit}")]
    PointsPerCluster { got: usize, limit: usize },
}

/// failures inside the balanced K-Means solver.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum KMeansError {
    #[error("min-cost-flow solver could not find a feasible assignment for {points} points into {clusters} clusters")]
    InfeasibleAssignment { points: usize, clusters: usize },
}

/// failures in the TSP/A* routing phase.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RoutingError {
    #[error("{0}")]
    LimitExceeded(#[from] LimitExceededError),
    #[error("no path exists between {from} and {to}")]
    NoPath { from: String, to: String },
    #[error("job exceeded its time budget of {0:?}")]
    Timeout(std::time::Duration),
}

/// the single error type returned from `orchestrator::build_routes`.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrchestratorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    KMeans(#[from] KMeansError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
}
