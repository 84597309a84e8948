use crate::spatial::point::Point;

/// an ordered group of points assigned to the same route.
///
/// Wraps a `Vec<Point>` rather than a set: insertion order is preserved
/// because downstream genetic-TSP seeding reads the initial order as its
/// first candidate tour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    points: Vec<Point>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ClusterError {
    #[error("calculating geometric center of empty cluster")]
    Empty,
}

impl Cluster {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// arithmetic mean of the cluster's points; the lone point itself when
    /// the cluster is a singleton; an error when empty.
    pub fn geometric_center(&self) -> Result<Point, ClusterError> {
        match self.points.as_slice() {
            [] => Err(ClusterError::Empty),
            [only] => Ok(*only),
            points => {
                let n = points.len() as f64;
                let x = points.iter().map(|p| p.x()).sum::<f64>() / n;
                let y = points.iter().map(|p| p.y()).sum::<f64>() / n;
                Ok(Point::new(x, y))
            }
        }
    }
}

impl FromIterator<Point> for Cluster {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Cluster {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
