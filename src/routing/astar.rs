//! A* shortest-path search over a `spatial::Graph`.
//!
//! Uses the Euclidean distance to `finish` as the heuristic, which is
//! admissible whenever every `Segment::length` is at least the straight-line
//! distance between its endpoints, an invariant `Segment`'s constructor
//! enforces. A node's shortest distance is recorded the first time it's
//! discovered and never revised afterward (no decrease-key): cheap, and
//! correct as long as the heuristic stays admissible and consistent, which
//! holds for the Euclidean-embedded graphs this crate operates on.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::spatial::{Graph, Point, Segment};

struct HeapEntry {
    priority: f64,
    sequence: usize,
    point: Point,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    /// reversed so `BinaryHeap` (a max-heap) pops the lowest priority first;
    /// ties broken by insertion order for deterministic output.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

struct Visit {
    distance: f64,
    parent: Option<Point>,
    edge: Option<Segment>,
}

/// shortest sequence of edges from `start` to `finish`, or an empty vec if
/// `finish` is unreachable.
pub fn a_star(start: Point, finish: Point, graph: &Graph) -> Vec<Segment> {
    let mut data: HashMap<Point, Visit> = HashMap::new();
    data.insert(
        start,
        Visit {
            distance: 0.0,
            parent: None,
            edge: None,
        },
    );

    let mut queue = BinaryHeap::new();
    let mut sequence = 0usize;
    queue.push(HeapEntry {
        priority: 0.0,
        sequence,
        point: start,
    });

    while let Some(HeapEntry { point: current, .. }) = queue.pop() {
        if current == finish {
            return reconstruct_path(&data, current);
        }

        let current_distance = data[&current].distance;
        for edge in graph.neighbors(&current) {
            let adjacent = edge.other_endpoint(&current);
            if data.contains_key(&adjacent) {
                continue;
            }
            let distance = current_distance + edge.length();
            data.insert(
                adjacent,
                Visit {
                    distance,
                    parent: Some(current),
                    edge: Some(edge.clone()),
                },
            );
            sequence += 1;
            queue.push(HeapEntry {
                priority: distance + adjacent.distance_to(&finish),
                sequence,
                point: adjacent,
            });
        }
    }

    Vec::new()
}

fn reconstruct_path(data: &HashMap<Point, Visit>, mut current: Point) -> Vec<Segment> {
    let mut path = Vec::new();
    while let Some(edge) = data[&current].edge.clone() {
        path.push(edge);
        current = data[&current].parent.expect("edge implies a parent");
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;

    #[test]
    fn finds_shortest_path_on_3x3_grid() {
        let points = [
            Point::new(3.0, 4.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 1.0),
        ];

        let edges = [
            Segment::with_length(points[6], points[4], 1.0).unwrap(),
            Segment::with_length(points[6], points[7], 1.0).unwrap(),
            Segment::with_length(points[4], points[2], 1.5).unwrap(),
            Segment::with_length(points[4], points[1], 1.0).unwrap(),
            Segment::with_length(points[1], points[2], 1.0).unwrap(),
            Segment::with_length(points[7], points[8], 1.0).unwrap(),
            Segment::with_length(points[7], points[5], 1.6).unwrap(),
            Segment::with_length(points[2], points[3], 1.0).unwrap(),
            Segment::with_length(points[3], points[0], 1.0).unwrap(),
        ];

        let mut graph = Graph::new();
        let limits = Limits::default();
        for edge in &edges {
            graph.add_edge(edge.clone(), &limits).unwrap();
        }

        let result = a_star(points[6], points[0], &graph);
        assert_eq!(
            result,
            vec![
                edges[0].clone(),
                edges[2].clone(),
                edges[7].clone(),
                edges[8].clone(),
            ]
        );
    }

    #[test]
    fn unreachable_finish_returns_empty_path() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let isolated = Point::new(99.0, 99.0);
        let mut graph = Graph::new();
        graph
            .add_edge(Segment::new(a, b), &Limits::default())
            .unwrap();
        assert!(a_star(a, isolated, &graph).is_empty());
    }
}
