use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};

/// An origin with three (generally orthogonal) direction vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes3D {
    pub origin: Point3<f64>,
    pub dir_a: Vector3<f64>,
    pub dir_b: Vector3<f64>,
    pub dir_c: Vector3<f64>,
}

/// Principal axes of a point cloud.
///
/// `moments_axes` is centered on the centroid; its directions are the eigenvectors of the
/// covariance matrix sorted by decreasing variance, scaled by the standard deviation along
/// each. `box_axes` shares those directions but is centered on the oriented bounding box of
/// the points, with directions scaled to the box half-extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    pub moments_axes: Axes3D,
    pub box_axes: Axes3D,
}

impl PrincipalAxes {
    /// Computes principal axes from a flat `[x0, y0, z0, x1, ...]` buffer.
    ///
    /// Returns `None` if the buffer holds no complete position.
    pub fn of_positions(positions: &[f64]) -> Option<Self> {
        let points: Vec<Point3<f64>> = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let centroid = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n);

        let mut covariance = Matrix3::zeros();
        for p in &points {
            let d = p - centroid;
            covariance += d * d.transpose();
        }
        covariance /= n;

        let eigen = SymmetricEigen::new(covariance);
        let mut order = [0usize, 1, 2];
        order.sort_by(|&i, &j| {
            eigen.eigenvalues[j]
                .partial_cmp(&eigen.eigenvalues[i])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let unit_a = eigen.eigenvectors.column(order[0]).normalize();
        let unit_b = eigen.eigenvectors.column(order[1]).normalize();
        let mut unit_c = eigen.eigenvectors.column(order[2]).normalize();
        if unit_a.cross(&unit_b).dot(&unit_c) < 0.0 {
            unit_c = -unit_c;
        }
        let units = [unit_a, unit_b, unit_c];
        let sigma = |k: usize| eigen.eigenvalues[order[k]].max(0.0).sqrt();

        let moments_axes = Axes3D {
            origin: centroid,
            dir_a: unit_a * sigma(0),
            dir_b: unit_b * sigma(1),
            dir_c: unit_c * sigma(2),
        };

        let mut lo = [f64::MAX; 3];
        let mut hi = [-f64::MAX; 3];
        for p in &points {
            let d = p - centroid;
            for k in 0..3 {
                let t = units[k].dot(&d);
                lo[k] = lo[k].min(t);
                hi[k] = hi[k].max(t);
            }
        }
        let box_center = (0..3).fold(centroid, |acc, k| acc + units[k] * ((lo[k] + hi[k]) / 2.0));

        let box_axes = Axes3D {
            origin: box_center,
            dir_a: units[0] * ((hi[0] - lo[0]) / 2.0),
            dir_b: units[1] * ((hi[1] - lo[1]) / 2.0),
            dir_c: units[2] * ((hi[2] - lo[2]) / 2.0),
        };

        Some(Self {
            moments_axes,
            box_axes,
        })
    }
}
