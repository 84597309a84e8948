//! Balanced K-Means: partitions a point set into `clusters_amt` clusters
//! whose sizes differ by at most one, using min-cost-max-flow for the
//! assignment step instead of nearest-centroid (which can't respect a size
//! cap). Centroid seeding runs a farthest-first traversal over the convex
//! hull, following the source algorithm credited there to QGIS.

use rand::Rng;

use crate::clustering::flow::{Arc, MinCostFlowSolver, SspSolver};
use crate::error::KMeansError;
use crate::hull;
use crate::spatial::{Cluster, Point};
use crate::PRECISION;

const MAX_ITERATIONS: usize = 10;

/// partitions `points` into `clusters_amt` balanced clusters.
///
/// `clusters_amt == 1` short-circuits to a single cluster holding every
/// point; `clusters_amt >= points.len()` short-circuits to one point per
/// cluster. Both cases make the flow network and hull-based seeding
/// degenerate or unnecessary.
pub fn k_means<R: Rng>(
    points: &[Point],
    clusters_amt: usize,
    rng: &mut R,
) -> Result<Vec<Cluster>, KMeansError> {
    k_means_with_solver(points, clusters_amt, rng, &SspSolver)
}

pub fn k_means_with_solver<R: Rng>(
    points: &[Point],
    clusters_amt: usize,
    rng: &mut R,
    solver: &dyn MinCostFlowSolver,
) -> Result<Vec<Cluster>, KMeansError> {
    if clusters_amt == 1 {
        return Ok(vec![Cluster::new(points.to_vec())]);
    }
    if clusters_amt >= points.len() {
        return Ok(points.iter().map(|&p| Cluster::new(vec![p])).collect());
    }

    log::info!(
        "{:<32}{} points into {} clusters",
        "balanced k-means",
        points.len(),
        clusters_amt
    );

    let mut centroids = initial_centroids(points, clusters_amt);
    let mut clusters = Vec::new();
    let progress = crate::progress(MAX_ITERATIONS);

    for i in 0..MAX_ITERATIONS {
        clusters = divide_into_clusters(points, clusters_amt, &centroids, solver)?;

        let previous = centroids;
        centroids = clusters
            .iter()
            .map(|cluster| {
                cluster
                    .geometric_center()
                    .unwrap_or_else(|_| points[rng.random_range(0..points.len())])
            })
            .collect::<Vec<_>>();

        progress.inc(1);
        if centroids == previous {
            log::debug!("converged after {} iterations", i + 1);
            break;
        }
    }
    progress.finish_and_clear();

    Ok(clusters)
}

/// two most distant hull points seed the first two centroids; each
/// subsequent centroid is the remaining point farthest from its nearest
/// already-chosen centroid.
fn initial_centroids(points: &[Point], clusters_amt: usize) -> Vec<Point> {
    let convex_hull = hull::graham_scan(points).expect("k_means guards clusters_amt < points.len()");

    let mut max_distance = -1.0;
    let mut first_center = convex_hull[0];
    let mut second_center = convex_hull[1];
    for i in 0..convex_hull.len() {
        for j in (i + 1)..convex_hull.len() {
            let distance = convex_hull[i].distance_to(&convex_hull[j]);
            if distance > max_distance {
                max_distance = distance;
                first_center = convex_hull[i];
                second_center = convex_hull[j];
            }
        }
    }

    let mut center_indexes = vec![
        points.iter().position(|p| *p == first_center).unwrap(),
        points.iter().position(|p| *p == second_center).unwrap(),
    ];
    let mut distances = vec![f64::INFINITY; points.len()];
    distances[center_indexes[0]] = 0.0;
    distances[center_indexes[1]] = 0.0;

    for _ in 2..clusters_amt {
        let last_added = points[*center_indexes.last().unwrap()];
        let mut candidate_distance = f64::NEG_INFINITY;
        let mut candidate_index = 0usize;

        for (j, distance) in distances.iter_mut().enumerate() {
            if *distance == 0.0 {
                continue;
            }
            *distance = distance.min(points[j].distance_to(&last_added));
            if *distance > candidate_distance {
                candidate_distance = *distance;
                candidate_index = j;
            }
        }

        center_indexes.push(candidate_index);
        distances[candidate_index] = 0.0;
    }

    center_indexes.into_iter().map(|i| points[i]).collect()
}

/// assigns points to centroids via min-cost-max-flow: source -> points
/// (cap 1, cost 0) -> centroids (cap 1, cost = distance scaled to an
/// integer) -> sink (cap `floor(n/k)` or `ceil(n/k)`, cost 0), so the flow
/// solver's optimum is the size-balanced assignment minimizing total
/// point-to-centroid distance.
fn divide_into_clusters(
    points: &[Point],
    clusters_amt: usize,
    centroids: &[Point],
    solver: &dyn MinCostFlowSolver,
) -> Result<Vec<Cluster>, KMeansError> {
    let n = points.len();
    let source = 0;
    let point_base = 1;
    let centroid_base = point_base + n;
    let sink = centroid_base + clusters_amt;
    let node_count = sink + 1;

    let scale = 10f64.powi(PRECISION as i32);
    let mut arcs = Vec::with_capacity(n + n * clusters_amt + clusters_amt);

    for (i, point) in points.iter().enumerate() {
        arcs.push(Arc {
            from: source,
            to: point_base + i,
            capacity: 1,
            cost: 0,
        });
        for (k, centroid) in centroids.iter().enumerate() {
            arcs.push(Arc {
                from: point_base + i,
                to: centroid_base + k,
                capacity: 1,
                cost: (point.distance_to(centroid) * scale).floor() as i64,
            });
        }
    }

    let edge_capacity = (n / clusters_amt) as i64;
    let remainder = n % clusters_amt;
    for k in 0..clusters_amt {
        let capacity = edge_capacity + if k < remainder { 1 } else { 0 };
        arcs.push(Arc {
            from: centroid_base + k,
            to: sink,
            capacity,
            cost: 0,
        });
    }

    let flows = solver.solve(node_count, &arcs, source, sink, n as i64)?;

    let mut clusters = vec![Cluster::default(); clusters_amt];
    let point_to_centroid_arcs = n; // number of source->point arcs precede these
    for (i, point) in points.iter().enumerate() {
        for k in 0..clusters_amt {
            let arc_idx = point_to_centroid_arcs + i * clusters_amt + k;
            if flows[arc_idx] > 0 {
                clusters[k].push(*point);
                break;
            }
        }
    }

    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn three_tight_clumps() -> Vec<Point> {
        let mut points = Vec::new();
        for cluster in 0..3 {
            let offset = (cluster * 10) as f64;
            points.push(Point::new(offset, offset));
            points.push(Point::new(offset + 0.1, offset));
            points.push(Point::new(offset, offset + 0.1));
            points.push(Point::new(offset + 0.1, offset + 0.1));
        }
        points
    }

    #[test]
    fn single_cluster_holds_every_point() {
        let points = three_tight_clumps();
        let mut rng = StdRng::seed_from_u64(1);
        let result = k_means(&points, 1, &mut rng).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), points.len());
    }

    #[test]
    fn more_clusters_than_points_gives_singletons() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let result = k_means(&points, 5, &mut rng).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn clusters_tight_clumps_without_splitting_them() {
        let points = three_tight_clumps();
        let mut rng = StdRng::seed_from_u64(1);
        let result = k_means(&points, 3, &mut rng).unwrap();

        assert_eq!(result.len(), 3);
        for cluster in &result {
            assert_eq!(cluster.len(), 4);
        }

        let total: usize = result.iter().map(Cluster::len).sum();
        assert_eq!(total, points.len());
    }

    #[test]
    fn balances_cluster_sizes_when_not_evenly_divisible() {
        let mut points = Vec::new();
        for i in 0..7 {
            points.push(Point::new(i as f64 * 0.01, 0.0));
        }
        for i in 0..7 {
            points.push(Point::new(10.0 + i as f64 * 0.01, 0.0));
        }
        let mut rng = StdRng::seed_from_u64(3);
        let result = k_means(&points, 3, &mut rng).unwrap();

        assert_eq!(result.len(), 3);
        for cluster in &result {
            assert!(cluster.len() == 4 || cluster.len() == 5);
        }
        let total: usize = result.iter().map(Cluster::len).sum();
        assert_eq!(total, points.len());
    }
}
