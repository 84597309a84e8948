use crate::PRECISION;

/// a point on the plane, rounded to `PRECISION` decimal places at
/// construction so that equality, hashing, and ordering are stable
/// regardless of how the coordinates were derived (midpoint, centroid, ...).
///
/// `Eq`/`Hash`/`Ord` are implemented over a fixed-point (scaled integer)
/// representation of the rounded coordinates rather than the `f64` fields
/// directly, since floating point cannot soundly implement those traits.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    x: f64,
    y: f64,
    xi: i64,
    yi: i64,
}

fn scale() -> f64 {
    10f64.powi(PRECISION as i32)
}

fn round(v: f64) -> f64 {
    let s = scale();
    (v * s).round() / s
}

fn scaled(v: f64) -> i64 {
    (v * scale()).round() as i64
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        let x = round(x);
        let y = round(y);
        Self {
            x,
            y,
            xi: scaled(x),
            yi: scaled(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// rounded Euclidean distance between two points; symmetric,
    /// non-negative, zero iff the points are equal.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        round((dx * dx + dy * dy).sqrt())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.xi == other.xi && self.yi == other.yi
    }
}

impl Eq for Point {}

impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.xi.hash(state);
        self.yi.hash(state);
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `p < q` holds when `p.x <= q.x && p.y <= q.y && p != q`, a partial order,
/// not a total one: two points that differ only in x (or only in y) in
/// opposite directions are incomparable.
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self == other {
            return Some(std::cmp::Ordering::Equal);
        }
        if self.xi <= other.xi && self.yi <= other.yi {
            return Some(std::cmp::Ordering::Less);
        }
        if self.xi >= other.xi && self.yi >= other.yi {
            return Some(std::cmp::Ordering::Greater);
        }
        None
    }
}

impl crate::Arbitrary for Point {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        Self::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0))
    }
}
