//! Configurable numeric bounds, passed as a config struct rather than as
//! process-wide mutable variables (mirrors `original_source/routing/_limits.py`,
//! whose literal values the retrieved sources don't specify. The defaults
//! below are this crate's own documented choice).

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// maximum number of points `build_routes` will accept in one call.
    pub points_amount: usize,
    /// maximum number of edges a single `Graph` may hold.
    pub edges_amount: usize,
    /// maximum number of routes (`k`) `build_routes` will accept.
    pub clusters_amount: usize,
    /// maximum number of points any single cluster may contain.
    pub points_per_cluster: usize,
    /// wall-clock budget for one genetic-TSP job.
    pub tsp_time: Duration,
    /// wall-clock budget for one A*-stitching job.
    pub routing_time: Duration,
    /// wall-clock budget for mapping a cluster's tour onto the graph.
    pub mapping_time: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            points_amount: 10_000,
            edges_amount: 100_000,
            clusters_amount: 256,
            points_per_cluster: 2_000,
            tsp_time: Duration::from_secs(30),
            routing_time: Duration::from_secs(10),
            mapping_time: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_internally_consistent() {
        let limits = Limits::default();
        assert!(limits.points_amount >= limits.points_per_cluster);
        assert!(limits.tsp_time > limits.mapping_time);
    }
}
