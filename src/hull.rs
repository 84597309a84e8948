//! Graham scan: the convex hull of a finite set of planar points.
//!
//! Pivot = lowest point (ties broken by lowest x). Remaining points are
//! sorted by polar angle from the pivot; since the pivot is the bottommost
//! point, every other point lies in the upper half-plane, so
//! `acos(dx / distance)` is monotonic in angle without needing `atan2`'s
//! full quadrant handling.

use crate::spatial::point::Point;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HullError {
    #[error("creating a convex hull of fewer than 3 points")]
    TooFewPoints,
}

pub fn graham_scan(data: &[Point]) -> Result<Vec<Point>, HullError> {
    if data.len() < 3 {
        return Err(HullError::TooFewPoints);
    }

    let origin = *data
        .iter()
        .min_by(|a, b| {
            (a.y(), a.x())
                .partial_cmp(&(b.y(), b.x()))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("non-empty by length check above");

    let mut points = data.to_vec();
    points.sort_by(|a, b| {
        polar_key(&origin, a)
            .partial_cmp(&polar_key(&origin, b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut stack = vec![origin];
    for current in &points {
        while stack.len() > 1 && !is_turn_counterclockwise(&stack, current) {
            stack.pop();
        }
        if *current != origin {
            stack.push(*current);
        }
    }

    Ok(stack)
}

/// polar angle of `point` as seen from `origin`, expressed via `acos` of the
/// normalized x-offset; `origin` itself sorts last (`INFINITY`) so it still
/// appears in the sequence for the stack's final-turn check.
fn polar_key(origin: &Point, point: &Point) -> f64 {
    if point == origin {
        return f64::INFINITY;
    }
    let distance = point.distance_to(origin);
    ((point.x() - origin.x()) / distance).acos()
}

fn is_turn_counterclockwise(stack: &[Point], current: &Point) -> bool {
    let top = stack[stack.len() - 1];
    let second_top = stack[stack.len() - 2];

    let first = (top.x() - second_top.x(), top.y() - second_top.y());
    let second = (current.x() - second_top.x(), current.y() - second_top.y());

    (first.0 * second.1 - first.1 * second.0) > 0.0
}
