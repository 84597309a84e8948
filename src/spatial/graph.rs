use std::collections::HashMap;

use crate::error::{LimitExceededError, RoutingError};
use crate::limits::Limits;
use crate::spatial::point::Point;
use crate::spatial::segment::Segment;

/// a weighted graph over points, represented as adjacency lists.
///
/// Undirected: adding an edge appends it to both endpoints' lists. Bounded
/// by `Limits::edges_amount`, checked on every insertion rather than trusted,
/// since the graph is a library boundary fed by caller-controlled input.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<Point, Vec<Segment>>,
    edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.adjacency.contains_key(point)
    }

    pub fn neighbors(&self, point: &Point) -> &[Segment] {
        self.adjacency
            .get(point)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Point> {
        self.adjacency.keys()
    }

    pub fn add_edge(&mut self, edge: Segment, limits: &Limits) -> Result<(), RoutingError> {
        if self.edges >= limits.edges_amount {
            return Err(RoutingError::LimitExceeded(LimitExceededError::Edges {
                limit: limits.edges_amount,
            }));
        }
        for node in [edge.start(), edge.finish()] {
            self.adjacency.entry(node).or_default().push(edge.clone());
        }
        self.edges += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits {
            edges_amount: 1,
            ..Limits::default()
        }
    }

    #[test]
    fn add_edge_links_both_endpoints() {
        let mut g = Graph::new();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        g.add_edge(Segment::new(a, b), &Limits::default()).unwrap();
        assert_eq!(g.neighbors(&a).len(), 1);
        assert_eq!(g.neighbors(&b).len(), 1);
        assert!(g.contains(&a) && g.contains(&b));
    }

    #[test]
    fn add_edge_rejects_over_limit() {
        let mut g = Graph::new();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(2.0, 0.0);
        g.add_edge(Segment::new(a, b), &limits()).unwrap();
        let err = g.add_edge(Segment::new(b, c), &limits());
        assert!(err.is_err());
    }
}
