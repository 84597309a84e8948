//! Entry point tying the whole pipeline together: validate input, cluster,
//! solve TSP per cluster in parallel, stitch each cluster's tour onto the
//! graph in parallel, and return the result pairs in cluster order.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clustering;
use crate::error::{LimitExceededError, OrchestratorError, ValidationError};
use crate::limits::Limits;
use crate::routing::{astar, genetic};
use crate::spatial::{Cluster, Graph, Point, Segment};
use crate::workers;

/// cluster `points` into `clusters_amt` balanced routes over `graph`, solve
/// TSP ordering within each cluster, then stitch each ordering into a
/// concrete edge path on `graph`.
///
/// No partial results are ever returned: every validation check runs before
/// any clustering or search work starts, and the first phase-level failure
/// aborts the whole call.
pub fn build_routes(
    points: &[Point],
    clusters_amt: i64,
    graph: &Graph,
    limits: &Limits,
) -> Result<Vec<(Cluster, Vec<Segment>)>, OrchestratorError> {
    log::info!(
        "{:<32}{} points, {} routes requested",
        "build_routes",
        points.len(),
        clusters_amt
    );

    if points.is_empty() {
        return Err(ValidationError::EmptyPoints.into());
    }
    if clusters_amt <= 0 {
        return Err(ValidationError::NonPositiveRouteCount(clusters_amt).into());
    }
    if points.len() > limits.points_amount {
        return Err(ValidationError::LimitExceeded(LimitExceededError::Points {
            got: points.len(),
            limit: limits.points_amount,
        })
        .into());
    }
    let clusters_amt = clusters_amt as usize;
    if clusters_amt > limits.clusters_amount {
        return Err(ValidationError::LimitExceeded(LimitExceededError::Clusters {
            got: clusters_amt,
            limit: limits.clusters_amount,
        })
        .into());
    }

    let unreachable = unreachable_points(points, graph);
    if !unreachable.is_empty() {
        return Err(ValidationError::UnreachablePoints {
            unreachable: unreachable.len(),
            total: points.len(),
        }
        .into());
    }

    let floor_cluster_size = points.len() / clusters_amt;
    if floor_cluster_size > limits.points_per_cluster {
        return Err(ValidationError::LimitExceeded(LimitExceededError::PointsPerCluster {
            got: floor_cluster_size,
            limit: limits.points_per_cluster,
        })
        .into());
    }

    let mut rng = StdRng::from_os_rng();
    let clusters = clustering::k_means(points, clusters_amt, &mut rng)?;
    log::info!("{:<32}{} clusters", "clustered", clusters.len());

    let tsp_jobs: Vec<_> = clusters
        .iter()
        .map(|cluster| {
            let genes = cluster.points().to_vec();
            let time_limit = limits.tsp_time;
            move || genetic::genetic_algorithm_for_tsp(&genes, time_limit)
        })
        .collect();
    let tsp_timeout = limits.tsp_time + std::time::Duration::from_secs(1);
    let progress = crate::progress(tsp_jobs.len());
    let ordered: Vec<Vec<Point>> = workers::run_jobs(tsp_jobs, tsp_timeout)
        .into_iter()
        .inspect(|_| progress.inc(1))
        .collect::<Result<_, _>>()
        .map_err(OrchestratorError::from)?;
    progress.finish_and_clear();
    log::info!("{:<32}{} clusters", "ordered", ordered.len());

    let graph = Arc::new(graph.clone());
    let routing_jobs: Vec<_> = ordered
        .iter()
        .map(|ordered_cluster| {
            let ordered_cluster = ordered_cluster.clone();
            let graph = Arc::clone(&graph);
            move || map_route_on_graph(&ordered_cluster, &graph)
        })
        .collect();
    let progress = crate::progress(routing_jobs.len());
    let routes: Vec<Vec<Segment>> = workers::run_jobs(routing_jobs, limits.routing_time)
        .into_iter()
        .inspect(|_| progress.inc(1))
        .collect::<Result<_, _>>()
        .map_err(OrchestratorError::from)?;
    progress.finish_and_clear();
    log::info!("{:<32}{} routes", "stitched", routes.len());

    Ok(ordered
        .into_iter()
        .map(Cluster::new)
        .zip(routes)
        .collect())
}

/// points that are either missing from `graph` entirely, or reachable from
/// none of the surviving points' connected component.
pub fn unreachable_points(points: &[Point], graph: &Graph) -> Vec<Point> {
    let mut isolated = Vec::new();
    let mut present: Vec<Point> = Vec::with_capacity(points.len());
    for &point in points {
        if graph.contains(&point) {
            present.push(point);
        } else {
            isolated.push(point);
        }
    }

    if present.is_empty() {
        return isolated;
    }

    let mut visited = HashSet::new();
    let mut stack = vec![present[0]];
    while let Some(point) = stack.pop() {
        if !visited.insert(point) {
            continue;
        }
        for edge in graph.neighbors(&point) {
            stack.push(edge.other_endpoint(&point));
        }
    }

    let unreached = present
        .into_iter()
        .filter(|point| !visited.contains(point));
    isolated.into_iter().chain(unreached).collect()
}

/// whether every point in `points` is reachable from the others in `graph`.
pub fn points_are_reachable(points: &[Point], graph: &Graph) -> bool {
    unreachable_points(points, graph).is_empty()
}

fn map_route_on_graph(ordered_cluster: &[Point], graph: &Graph) -> Vec<Segment> {
    let mut route = Vec::new();
    for i in 0..ordered_cluster.len() {
        let start = ordered_cluster[i];
        let finish = ordered_cluster[(i + 1) % ordered_cluster.len()];
        route.extend(astar::a_star(start, finish, graph));
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(graph: &mut Graph, a: Point, b: Point, limits: &Limits) {
        graph.add_edge(Segment::new(a, b), limits).unwrap();
    }

    #[test]
    fn rejects_points_per_cluster_over_limit() {
        let limits = Limits {
            points_per_cluster: 1,
            ..Limits::default()
        };
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let mut graph = Graph::new();
        for pair in points.windows(2) {
            edge(&mut graph, pair[0], pair[1], &limits);
        }

        let err = build_routes(&points, 2, &graph, &limits).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Validation(ValidationError::LimitExceeded(
                LimitExceededError::PointsPerCluster { .. }
            ))
        ));
    }

    #[test]
    fn rejects_unreachable_points() {
        let limits = Limits::default();
        let points = [
            Point::new(1.0, 2.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 1.0),
            Point::new(4.0, 1.0),
            Point::new(4.0, 3.0),
            Point::new(5.0, 2.0),
        ];

        let mut graph = Graph::new();
        edge(&mut graph, Point::new(1.0, 2.0), Point::new(2.0, 3.0), &limits);
        edge(&mut graph, Point::new(2.0, 1.0), Point::new(3.0, 2.0), &limits);
        edge(&mut graph, Point::new(2.0, 3.0), Point::new(3.0, 2.0), &limits);
        edge(&mut graph, Point::new(3.0, 2.0), Point::new(4.0, 1.0), &limits);
        edge(&mut graph, Point::new(4.0, 3.0), Point::new(5.0, 2.0), &limits);

        assert!(!points_are_reachable(&[Point::new(0.0, 0.0)], &graph));
        assert!(!points_are_reachable(&points, &graph));

        edge(&mut graph, Point::new(2.0, 3.0), Point::new(4.0, 3.0), &limits);
        assert!(points_are_reachable(&points, &graph));
    }

    #[test]
    fn full_solution_two_hexagons() {
        let limits = Limits::default();
        let points = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 2.0),
            Point::new(2.0, 1.0),
            Point::new(7.0, 6.0),
            Point::new(7.0, 7.0),
            Point::new(8.0, 8.0),
            Point::new(9.0, 8.0),
            Point::new(10.0, 7.0),
            Point::new(10.0, 6.0),
        ];

        let shape_edges: [(Point, Point); 20] = [
            (Point::new(1.0, 1.0), Point::new(1.0, 2.0)),
            (Point::new(1.0, 2.0), Point::new(2.0, 3.0)),
            (Point::new(2.0, 3.0), Point::new(3.0, 3.0)),
            (Point::new(3.0, 3.0), Point::new(3.0, 2.0)),
            (Point::new(3.0, 2.0), Point::new(2.0, 1.0)),
            (Point::new(2.0, 1.0), Point::new(1.0, 1.0)),
            (Point::new(1.0, 1.0), Point::new(2.0, 2.0)),
            (Point::new(2.0, 2.0), Point::new(3.0, 3.0)),
            (Point::new(1.0, 2.0), Point::new(2.0, 1.0)),
            (Point::new(2.0, 3.0), Point::new(3.0, 2.0)),
            (Point::new(2.0, 3.0), Point::new(2.0, 2.0)),
            (Point::new(2.0, 2.0), Point::new(2.0, 1.0)),
            (Point::new(1.0, 2.0), Point::new(2.0, 2.0)),
            (Point::new(2.0, 2.0), Point::new(3.0, 2.0)),
            (Point::new(7.0, 6.0), Point::new(7.0, 7.0)),
            (Point::new(7.0, 7.0), Point::new(8.0, 8.0)),
            (Point::new(8.0, 8.0), Point::new(9.0, 8.0)),
            (Point::new(9.0, 8.0), Point::new(10.0, 7.0)),
            (Point::new(10.0, 7.0), Point::new(10.0, 6.0)),
            (Point::new(10.0, 6.0), Point::new(7.0, 6.0)),
        ];
        let extra_edges: [(Point, Point); 8] = [
            (Point::new(7.0, 7.0), Point::new(8.0, 7.0)),
            (Point::new(8.0, 7.0), Point::new(9.0, 7.0)),
            (Point::new(9.0, 7.0), Point::new(10.0, 7.0)),
            (Point::new(8.0, 8.0), Point::new(8.0, 7.0)),
            (Point::new(8.0, 7.0), Point::new(8.0, 6.0)),
            (Point::new(9.0, 8.0), Point::new(9.0, 7.0)),
            (Point::new(9.0, 7.0), Point::new(9.0, 6.0)),
            (Point::new(3.0, 3.0), Point::new(7.0, 6.0)),
        ];

        let mut graph = Graph::new();
        for (a, b) in shape_edges.iter().chain(extra_edges.iter()) {
            edge(&mut graph, *a, *b, &limits);
        }

        let results = build_routes(&points, 2, &graph, &limits).unwrap();
        assert_eq!(results.len(), 2);

        let first_shape: HashSet<Point> = points[..6].iter().copied().collect();
        let second_shape: HashSet<Point> = points[6..].iter().copied().collect();

        let (first_cluster, first_route) = &results[0];
        let first_points: HashSet<Point> = first_cluster.points().iter().copied().collect();
        assert!(first_points == first_shape || first_points == second_shape);

        let outline: HashSet<(Point, Point)> = shape_edges.iter().copied().collect();
        for segment in first_route {
            assert!(
                outline.contains(&(segment.start(), segment.finish()))
                    || outline.contains(&(segment.finish(), segment.start()))
            );
        }

        let (second_cluster, _) = &results[1];
        let second_points: HashSet<Point> = second_cluster.points().iter().copied().collect();
        assert_ne!(first_points, second_points);
    }
}
