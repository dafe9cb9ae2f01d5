/// A position in the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with its center computed once at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bound {
    min: Point,
    max: Point,
    center: Point,
}

impl Bound {
    /// # Panics
    ///
    /// Panics if `min_x > max_x` or `min_y > max_y`, or if any coordinate is NaN.
    #[track_caller]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::from_points(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// # Panics
    ///
    /// Same preconditions as [`Bound::new`].
    #[track_caller]
    pub fn from_points(min: Point, max: Point) -> Self {
        assert!(
            min.x <= max.x && min.y <= max.y,
            "bound minimum {min:?} exceeds maximum {max:?}"
        );
        Self {
            min,
            max,
            center: Point::new(midpoint(min.x, max.x), midpoint(min.y, max.y)),
        }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive rectangle overlap test; touching edges count.
    pub fn intersects(&self, other: &Bound) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Inclusive point-in-rectangle test.
    pub fn intersects_point(&self, point: Point) -> bool {
        self.min.x <= point.x && point.x <= self.max.x && self.min.y <= point.y && point.y <= self.max.y
    }

    /// The sub-rectangle covering `quadrant` when this bound is split at its center.
    pub fn quadrant(&self, quadrant: Quadrant) -> Bound {
        let (min, max, c) = (self.min, self.max, self.center);
        match quadrant {
            Quadrant::BottomLeft => Bound::from_points(min, c),
            Quadrant::BottomRight => Bound::from_points(Point::new(c.x, min.y), Point::new(max.x, c.y)),
            Quadrant::TopLeft => Bound::from_points(Point::new(min.x, c.y), Point::new(c.x, max.y)),
            Quadrant::TopRight => Bound::from_points(c, max),
        }
    }
}

// Halving first keeps the sum finite for bounds near f64::MAX.
fn midpoint(a: f64, b: f64) -> f64 {
    a / 2.0 + b / 2.0
}

/// One of the four children of a split node, in child storage order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    BottomLeft = 0,
    BottomRight = 1,
    TopLeft = 2,
    TopRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
        Quadrant::TopLeft,
        Quadrant::TopRight,
    ];

    /// Classifies `point` against a node `center`.
    ///
    /// Points on a dividing line go to the left (x) and bottom (y) side, so
    /// every point maps to exactly one quadrant.
    pub fn containing(center: Point, point: Point) -> Quadrant {
        match (point.x <= center.x, point.y <= center.y) {
            (true, true) => Quadrant::BottomLeft,
            (false, true) => Quadrant::BottomRight,
            (true, false) => Quadrant::TopLeft,
            (false, false) => Quadrant::TopRight,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
