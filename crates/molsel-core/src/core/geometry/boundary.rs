use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3D {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Box3D {
    /// An inverted box that any point or box extends.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(-f64::MAX, -f64::MAX, -f64::MAX),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn include(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn union(&mut self, other: &Box3D) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere3D {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl Sphere3D {
    pub fn zero() -> Self {
        Self {
            center: Point3::origin(),
            radius: 0.0,
        }
    }

    pub fn contains(&self, p: &Point3<f64>, eps: f64) -> bool {
        (p - self.center).norm() <= self.radius + eps
    }
}

/// Bounding box and enclosing sphere of a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub bounding_box: Box3D,
    pub sphere: Sphere3D,
}

impl Boundary {
    pub fn empty() -> Self {
        Self {
            bounding_box: Box3D::empty(),
            sphere: Sphere3D::zero(),
        }
    }

    /// Boundary of a point set, computed with a fresh [`BoundaryHelper`].
    pub fn of_positions(positions: &[Point3<f64>]) -> Self {
        if positions.is_empty() {
            return Self::empty();
        }

        let mut bounding_box = Box3D::empty();
        let mut helper = BoundaryHelper::new(DirectionSet::default());
        for p in positions {
            bounding_box.include(p);
            helper.include_position_radius(p, 0.0);
        }
        helper.finished_include_step();
        for p in positions {
            helper.radius_position_radius(p, 0.0);
        }

        Self {
            bounding_box,
            sphere: helper.sphere(),
        }
    }
}

/// Sampling directions used to find extreme points while fitting a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionSet {
    /// Coordinate axes and body diagonals (7 directions).
    Dop14,
    /// Coordinate axes, face diagonals and body diagonals (13 directions).
    #[default]
    Dop26,
}

impl DirectionSet {
    fn directions(self) -> Vec<Vector3<f64>> {
        let mut dirs = vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, 1.0),
            Vector3::new(1.0, -1.0, 1.0),
        ];
        if self == DirectionSet::Dop26 {
            dirs.extend([
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(1.0, -1.0, 0.0),
                Vector3::new(1.0, 0.0, 1.0),
                Vector3::new(1.0, 0.0, -1.0),
                Vector3::new(0.0, 1.0, 1.0),
                Vector3::new(0.0, 1.0, -1.0),
            ]);
        }
        dirs.into_iter().map(|d| d.normalize()).collect()
    }
}

/// Incremental enclosing-sphere fitter over `(center, radius)` summaries.
///
/// Fitting runs in two phases:
///
/// 1. [`include_position_radius`](Self::include_position_radius) for every input, which
///    records the extreme points along each sampling direction;
/// 2. [`finished_include_step`](Self::finished_include_step) fixes the working center, then
///    [`radius_position_radius`](Self::radius_position_radius) for every input grows the
///    radius until each input sphere is contained.
///
/// The result encloses every input but is not guaranteed to be minimal. A helper holds
/// scratch state between the phases; it must be [`reset`](Self::reset) before reuse and must
/// not be shared by interleaved fits.
#[derive(Debug, Clone)]
pub struct BoundaryHelper {
    directions: Vec<Vector3<f64>>,
    min_dist: Vec<f64>,
    max_dist: Vec<f64>,
    min_points: Vec<Point3<f64>>,
    max_points: Vec<Point3<f64>>,
    count: usize,
    center: Point3<f64>,
    radius: f64,
}

impl BoundaryHelper {
    pub fn new(set: DirectionSet) -> Self {
        let directions = set.directions();
        let n = directions.len();
        Self {
            directions,
            min_dist: vec![f64::MAX; n],
            max_dist: vec![-f64::MAX; n],
            min_points: vec![Point3::origin(); n],
            max_points: vec![Point3::origin(); n],
            count: 0,
            center: Point3::origin(),
            radius: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.min_dist.fill(f64::MAX);
        self.max_dist.fill(-f64::MAX);
        self.count = 0;
        self.center = Point3::origin();
        self.radius = 0.0;
    }

    pub fn include_position_radius(&mut self, center: &Point3<f64>, radius: f64) {
        for (i, dir) in self.directions.iter().enumerate() {
            let d = dir.dot(&center.coords);
            if d - radius < self.min_dist[i] {
                self.min_dist[i] = d - radius;
                self.min_points[i] = center - dir * radius;
            }
            if d + radius > self.max_dist[i] {
                self.max_dist[i] = d + radius;
                self.max_points[i] = center + dir * radius;
            }
        }
        self.count += 1;
    }

    /// Fixes the working center from the extreme points collected so far.
    pub fn finished_include_step(&mut self) {
        if self.count == 0 {
            self.center = Point3::origin();
            self.radius = 0.0;
            return;
        }

        // Widest extreme pair seeds the sphere.
        let mut widest = 0;
        let mut widest_dist = -1.0;
        for i in 0..self.directions.len() {
            let dist = (self.max_points[i] - self.min_points[i]).norm_squared();
            if dist > widest_dist {
                widest_dist = dist;
                widest = i;
            }
        }
        let mut center = nalgebra::center(&self.min_points[widest], &self.max_points[widest]);
        let mut radius = widest_dist.sqrt() / 2.0;

        for p in self.min_points.iter().chain(&self.max_points) {
            let d = (p - center).norm();
            if d > radius {
                let grown = (radius + d) / 2.0;
                center += (p - center) * ((grown - radius) / d);
                radius = grown;
            }
        }

        self.center = center;
        self.radius = 0.0;
    }

    pub fn radius_position_radius(&mut self, center: &Point3<f64>, radius: f64) {
        let needed = (center - self.center).norm() + radius;
        if needed > self.radius {
            self.radius = needed;
        }
    }

    pub fn sphere(&self) -> Sphere3D {
        Sphere3D {
            center: self.center,
            radius: self.radius,
        }
    }
}
