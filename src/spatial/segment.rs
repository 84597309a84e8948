use crate::spatial::point::Point;

/// an undirected, weighted edge connecting two distinct points.
///
/// `length` defaults to the Euclidean distance between the endpoints when
/// not supplied; a caller-supplied length may exceed the chord (the segment
/// then abstracts a polyline or curve) but must never be shorter than it.
/// A*'s heuristic assumes straight-line distance is a lower bound on any
/// composite path, and that invariant is enforced here rather than trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point,
    finish: Point,
    length: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SegmentError {
    #[error("segment length {given} is shorter than the Euclidean distance {euclidean} between its endpoints")]
    TooShort { given: f64, euclidean: f64 },
}

impl Segment {
    /// construct a segment with an explicit length (e.g. for a polyline).
    pub fn with_length(start: Point, finish: Point, length: f64) -> Result<Self, SegmentError> {
        let euclidean = start.distance_to(&finish);
        if length > 0.0 && length < euclidean {
            return Err(SegmentError::TooShort {
                given: length,
                euclidean,
            });
        }
        let length = if length > 0.0 { length } else { euclidean };
        Ok(Self {
            start,
            finish,
            length,
        })
    }

    /// construct a segment whose length is exactly the Euclidean distance.
    pub fn new(start: Point, finish: Point) -> Self {
        let length = start.distance_to(&finish);
        Self {
            start,
            finish,
            length,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn finish(&self) -> Point {
        self.finish
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// the endpoint opposite `point`: returns `start` iff `point != start`,
    /// otherwise `finish`. Undefined (returns `start`) if `point` is neither
    /// endpoint, matching the source's unchecked `get_another_border`.
    pub fn other_endpoint(&self, point: &Point) -> Point {
        if point != &self.start {
            self.start
        } else {
            self.finish
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_length_to_euclidean_distance() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(s.length(), 5.0);
    }

    #[test]
    fn rejects_length_shorter_than_chord() {
        let err = Segment::with_length(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 1.0);
        assert!(err.is_err());
    }

    #[test]
    fn accepts_length_longer_than_chord_for_polylines() {
        let s = Segment::with_length(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 7.0).unwrap();
        assert_eq!(s.length(), 7.0);
    }

    #[test]
    fn other_endpoint_returns_opposite() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);
        let s = Segment::new(a, b);
        assert_eq!(s.other_endpoint(&a), b);
        assert_eq!(s.other_endpoint(&b), a);
    }
}
