use crate::core::models::color::Rgb;
use crate::core::utils::geometry::Aabb;
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

/// Tag separating molecule geometry from the rest of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Atoms and bonds of the live molecule. Replaced on every render.
    Molecule,
    /// Lights, background and anything else that outlives a molecule.
    Fixture,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point3<f64>,
    pub radius: f64,
    pub color: Rgb,
    /// Id of the atom this sphere draws.
    pub atom_id: String,
}

/// A capped cylinder whose local +Y axis is its length axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    pub center: Point3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub length: f64,
    pub radius: f64,
    pub color: Rgb,
}

impl Cylinder {
    /// Unit length axis in world space.
    pub fn axis(&self) -> Unit<Vector3<f64>> {
        Unit::new_unchecked(self.orientation * Vector3::y())
    }

    pub fn endpoints(&self) -> (Point3<f64>, Point3<f64>) {
        let half = self.axis().into_inner() * (self.length / 2.0);
        (self.center - half, self.center + half)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderPrimitive {
    Sphere(Sphere),
    Cylinder(Cylinder),
}

impl RenderPrimitive {
    pub fn center(&self) -> Point3<f64> {
        match self {
            Self::Sphere(s) => s.center,
            Self::Cylinder(c) => c.center,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Sphere(s) => s.color,
            Self::Cylinder(c) => c.color,
        }
    }

    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        match self {
            Self::Sphere(s) => aabb.include_sphere(&s.center, s.radius),
            Self::Cylinder(c) => aabb.include_cylinder(&c.center, &c.axis(), c.length, c.radius),
        }
        aabb
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        match self {
            Self::Sphere(s) => s.center += *offset,
            Self::Cylinder(c) => c.center += *offset,
        }
    }
}

impl From<Sphere> for RenderPrimitive {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<Cylinder> for RenderPrimitive {
    fn from(cylinder: Cylinder) -> Self {
        Self::Cylinder(cylinder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::cylinder_orientation;

    #[test]
    fn cylinder_endpoints_follow_its_orientation() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(0.0, 0.0, 2.0);
        let cylinder = Cylinder {
            center: nalgebra::center(&start, &end),
            orientation: cylinder_orientation(&start, &end, 0.9),
            length: 2.0,
            radius: 0.05,
            color: Rgb::from_hex(0x666666),
        };
        let (a, b) = cylinder.endpoints();
        assert!((a - start).norm() < 1e-9);
        assert!((b - end).norm() < 1e-9);
    }

    #[test]
    fn translate_moves_the_center() {
        let mut primitive: RenderPrimitive = Sphere {
            center: Point3::new(1.0, 1.0, 1.0),
            radius: 0.3,
            color: Rgb::from_hex(0xFFFFFF),
            atom_id: "H-1".to_string(),
        }
        .into();
        primitive.translate(&Vector3::new(-1.0, 0.0, 0.5));
        assert_eq!(primitive.center(), Point3::new(0.0, 1.0, 1.5));
        let bounds = primitive.bounds();
        assert!((bounds.min.x + 0.3).abs() < 1e-12);
        assert!((bounds.max.z - 1.8).abs() < 1e-12);
    }
}
