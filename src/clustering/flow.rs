//! Min-cost max-flow, the combinatorial core of balanced K-Means's
//! cluster-assignment step.
//!
//! Expressed as a narrow trait so the assignment step can be handed an
//! alternative solver; the sole implementation here is a textbook
//! successive-shortest-augmenting-paths algorithm (Bellman-Ford/SPFA to find
//! each augmenting path, since residual arcs can carry negative cost). No
//! external min-cost-flow crate is used. Every arc in this network has
//! integer capacity and non-negative cost, a shape this algorithm handles
//! directly without needing a general-purpose LP/flow solver.

use crate::error::KMeansError;

/// a directed arc in the flow network, identified by its position in the
/// slice passed to `MinCostFlowSolver::solve`.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub from: usize,
    pub to: usize,
    pub capacity: i64,
    pub cost: i64,
}

pub trait MinCostFlowSolver {
    /// flow carried on each arc, in the same order as `arcs`, after routing
    /// exactly `required_flow` units from `source` to `sink` at minimum
    /// total cost. Errs if that much flow cannot be routed at all.
    fn solve(
        &self,
        node_count: usize,
        arcs: &[Arc],
        source: usize,
        sink: usize,
        required_flow: i64,
    ) -> Result<Vec<i64>, KMeansError>;
}

struct Edge {
    to: usize,
    capacity: i64,
    cost: i64,
    flow: i64,
}

/// successive shortest augmenting paths via SPFA.
pub struct SspSolver;

impl MinCostFlowSolver for SspSolver {
    fn solve(
        &self,
        node_count: usize,
        arcs: &[Arc],
        source: usize,
        sink: usize,
        required_flow: i64,
    ) -> Result<Vec<i64>, KMeansError> {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut edges: Vec<Edge> = Vec::with_capacity(arcs.len() * 2);
        let mut forward_edge_of_arc = Vec::with_capacity(arcs.len());

        for arc in arcs {
            forward_edge_of_arc.push(edges.len());
            adjacency[arc.from].push(edges.len());
            edges.push(Edge {
                to: arc.to,
                capacity: arc.capacity,
                cost: arc.cost,
                flow: 0,
            });
            adjacency[arc.to].push(edges.len());
            edges.push(Edge {
                to: arc.from,
                capacity: 0,
                cost: -arc.cost,
                flow: 0,
            });
        }

        let mut routed = 0i64;
        while routed < required_flow {
            let Some((distance_to_sink, parent_edge)) =
                shortest_path(node_count, &adjacency, &edges, source, sink)
            else {
                return Err(KMeansError::InfeasibleAssignment {
                    points: node_count,
                    clusters: arcs.len(),
                });
            };
            let _ = distance_to_sink;

            let mut bottleneck = required_flow - routed;
            let mut node = sink;
            while node != source {
                let edge_idx = parent_edge[node].expect("path reaches source");
                bottleneck = bottleneck.min(edges[edge_idx].capacity - edges[edge_idx].flow);
                node = reverse_source(&edges, edge_idx);
            }

            let mut node = sink;
            while node != source {
                let edge_idx = parent_edge[node].expect("path reaches source");
                edges[edge_idx].flow += bottleneck;
                let reverse_idx = edge_idx ^ 1;
                edges[reverse_idx].flow -= bottleneck;
                node = reverse_source(&edges, edge_idx);
            }

            routed += bottleneck;
        }

        Ok(forward_edge_of_arc
            .iter()
            .map(|&idx| edges[idx].flow)
            .collect())
    }
}

fn reverse_source(edges: &[Edge], edge_idx: usize) -> usize {
    edges[edge_idx ^ 1].to
}

/// shortest path by cost from `source` to `sink` in the residual graph;
/// `parent_edge[v]` is the edge used to reach `v`. Bellman-Ford-based
/// (SPFA queue variant) because residual arcs carry negative cost.
fn shortest_path(
    node_count: usize,
    adjacency: &[Vec<usize>],
    edges: &[Edge],
    source: usize,
    sink: usize,
) -> Option<(i64, Vec<Option<usize>>)> {
    let mut distance = vec![i64::MAX; node_count];
    let mut parent_edge: Vec<Option<usize>> = vec![None; node_count];
    let mut in_queue = vec![false; node_count];
    distance[source] = 0;

    let mut queue = std::collections::VecDeque::new();
    queue.push_back(source);
    in_queue[source] = true;

    while let Some(node) = queue.pop_front() {
        in_queue[node] = false;
        for &edge_idx in &adjacency[node] {
            let edge = &edges[edge_idx];
            if edge.capacity - edge.flow <= 0 || distance[node] == i64::MAX {
                continue;
            }
            let candidate = distance[node] + edge.cost;
            if candidate < distance[edge.to] {
                distance[edge.to] = candidate;
                parent_edge[edge.to] = Some(edge_idx);
                if !in_queue[edge.to] {
                    queue.push_back(edge.to);
                    in_queue[edge.to] = true;
                }
            }
        }
    }

    if distance[sink] == i64::MAX {
        None
    } else {
        Some((distance[sink], parent_edge))
    }
}
