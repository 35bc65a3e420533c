use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Unit vector perpendicular to `direction`, used to offset the parallel
/// cylinders of double and triple bonds.
///
/// The reference axis is +Y unless `direction` is within `near_parallel_threshold`
/// of it (by absolute y component), in which case +X is used.
pub fn perpendicular(direction: &Unit<Vector3<f64>>, near_parallel_threshold: f64) -> Unit<Vector3<f64>> {
    let reference = if direction.y.abs() < near_parallel_threshold {
        Vector3::y()
    } else {
        Vector3::x()
    };
    Unit::new_normalize(reference.cross(&direction.into_inner()))
}

/// Rotation that lays a cylinder's local +Y (length) axis along `start -> end`.
///
/// Built as a look-at rotation taking local +Z to the bond direction, followed
/// by a quarter turn about local X. The look-at up vector switches from +Y to +X
/// under the same `near_parallel_threshold` rule as [`perpendicular`].
/// Degenerate bonds get the identity.
pub fn cylinder_orientation(
    start: &Point3<f64>,
    end: &Point3<f64>,
    near_parallel_threshold: f64,
) -> UnitQuaternion<f64> {
    let Some(direction) = Unit::try_new(end - start, f64::EPSILON) else {
        return UnitQuaternion::identity();
    };
    let up = if direction.y.abs() < near_parallel_threshold {
        Vector3::y()
    } else {
        Vector3::x()
    };
    let look_at = UnitQuaternion::face_towards(&direction.into_inner(), &up);
    look_at * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2)
}

/// Axis-aligned bounding box. Starts empty; grows as shapes are included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    fn include_extent(&mut self, center: &Point3<f64>, half: &Vector3<f64>) {
        self.min = self.min.inf(&(center - half));
        self.max = self.max.sup(&(center + half));
    }

    pub fn include_point(&mut self, point: &Point3<f64>) {
        self.include_extent(point, &Vector3::zeros());
    }

    pub fn include_sphere(&mut self, center: &Point3<f64>, radius: f64) {
        self.include_extent(center, &Vector3::repeat(radius));
    }

    /// Includes a capped cylinder. `axis` is the length axis, `length` the full
    /// length. Each cap disc of radius `r` spans `r * sqrt(1 - a_i^2)` along axis `i`.
    pub fn include_cylinder(
        &mut self,
        center: &Point3<f64>,
        axis: &Unit<Vector3<f64>>,
        length: f64,
        radius: f64,
    ) {
        let disc = axis.map(|a| radius * (1.0 - a * a).max(0.0).sqrt());
        let half_axis = axis.into_inner() * (length / 2.0);
        self.include_extent(&(center + half_axis), &disc);
        self.include_extent(&(center - half_axis), &disc);
    }

    pub fn merge(&mut self, other: &Aabb) {
        if !other.is_empty() {
            self.min = self.min.inf(&other.min);
            self.max = self.max.sup(&other.max);
        }
    }

    /// Center of the box; the origin for an empty box.
    pub fn center(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths; zero for an empty box.
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    pub fn max_extent(&self) -> f64 {
        self.size().max()
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
