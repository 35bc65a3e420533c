use super::config::GeometryConfig;
use super::primitives::{Cylinder, RenderPrimitive, Sphere};
use crate::core::models::structure::{ElementStyle, StructureModel};
use crate::core::models::topology::BondKind;
use crate::core::utils::geometry::{Aabb, cylinder_orientation, perpendicular};
use nalgebra::{Unit, Vector3};
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// Renderable geometry for one molecule, in model coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeGeometry {
    pub spheres: Vec<Sphere>,
    pub cylinders: Vec<Cylinder>,
    /// Translation that moves the bounds' center to the origin.
    pub offset: Vector3<f64>,
    /// Recommended camera distance from the origin.
    pub camera_distance: f64,
    /// Bounds of every primitive, before the offset is applied.
    pub bounds: Aabb,
}

impl MoleculeGeometry {
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.cylinders.len()
    }

    /// All primitives, spheres first.
    pub fn primitives(&self) -> impl Iterator<Item = RenderPrimitive> + '_ {
        self.spheres
            .iter()
            .cloned()
            .map(RenderPrimitive::from)
            .chain(self.cylinders.iter().cloned().map(RenderPrimitive::from))
    }

    /// A copy with the offset applied to every primitive. The result has a
    /// zero offset and bounds centered at the origin.
    pub fn centered(&self) -> Self {
        let offset = self.offset;
        let mut centered = self.clone();
        for sphere in &mut centered.spheres {
            sphere.center += offset;
        }
        for cylinder in &mut centered.cylinders {
            cylinder.center += offset;
        }
        centered.bounds = self.bounds.translated(&offset);
        centered.offset = Vector3::zeros();
        centered
    }
}

/// Distance at which a sphere of `max_extent` fits the vertical field of view,
/// scaled by the margin and floored at the configured minimum.
pub fn fit_camera_distance(max_extent: f64, config: &GeometryConfig) -> f64 {
    let half_fov = config.camera.fov_degrees.to_radians() / 2.0;
    let distance = max_extent / (2.0 * half_fov.tan()) * config.camera.margin;
    distance.max(config.camera.min_distance)
}

/// Converts a validated structure into spheres and cylinders.
///
/// Every atom yields one sphere. Single, double and triple bonds yield one, two
/// and three parallel cylinders; unrecognized bond kinds yield nothing. Atoms
/// whose element has no style use the configured fallback.
#[instrument(skip_all, name = "build_geometry")]
pub fn build_geometry(model: &StructureModel, config: &GeometryConfig) -> MoleculeGeometry {
    let fallback = ElementStyle {
        color: config.atoms.fallback_color,
        radius: config.atoms.fallback_radius,
    };
    let mut unstyled = BTreeSet::new();

    let spheres: Vec<Sphere> = model
        .atoms()
        .iter()
        .map(|atom| {
            let style = match model.elements().get(&atom.element) {
                Some(style) => *style,
                None => {
                    unstyled.insert(atom.element.as_str());
                    fallback
                }
            };
            Sphere {
                center: atom.position,
                radius: style.radius,
                color: style.color,
                atom_id: atom.id.clone(),
            }
        })
        .collect();
    if !unstyled.is_empty() {
        debug!(elements = ?unstyled, "Using fallback style for elements without an entry.");
    }

    let atoms = model.atoms_by_id();
    let bond_config = &config.bonds;
    let mut cylinders = Vec::with_capacity(model.bonds().len());
    for bond in model.bonds() {
        let (Some(first), Some(second)) = (atoms.get(bond.atom1.as_str()), atoms.get(bond.atom2.as_str()))
        else {
            warn!(atom1 = %bond.atom1, atom2 = %bond.atom2, "Skipping bond with unknown endpoint.");
            continue;
        };
        let (start, end) = (first.position, second.position);

        let (radius, offsets) = match &bond.kind {
            BondKind::Single => (bond_config.single_radius, vec![0.0]),
            BondKind::Double => (
                bond_config.multi_radius,
                vec![bond_config.double_offset, -bond_config.double_offset],
            ),
            BondKind::Triple => (
                bond_config.multi_radius,
                vec![0.0, bond_config.triple_offset, -bond_config.triple_offset],
            ),
            BondKind::Unrecognized(label) => {
                debug!(kind = %label, "Ignoring bond of unrecognized kind.");
                continue;
            }
        };

        let axis = end - start;
        let length = axis.norm();
        let side = Unit::try_new(axis, f64::EPSILON)
            .map(|dir| perpendicular(&dir, bond_config.near_parallel_threshold).into_inner())
            .unwrap_or_else(Vector3::zeros);
        let orientation = cylinder_orientation(&start, &end, bond_config.near_parallel_threshold);
        let midpoint = nalgebra::center(&start, &end);

        cylinders.extend(offsets.into_iter().map(|offset| Cylinder {
            center: midpoint + side * offset,
            orientation,
            length,
            radius,
            color: bond_config.color,
        }));
    }

    let mut bounds = Aabb::empty();
    for sphere in &spheres {
        bounds.include_sphere(&sphere.center, sphere.radius);
    }
    for cylinder in &cylinders {
        bounds.include_cylinder(&cylinder.center, &cylinder.axis(), cylinder.length, cylinder.radius);
    }

    let offset = -bounds.center().coords;
    let camera_distance = fit_camera_distance(bounds.max_extent(), config);

    debug!(
        spheres = spheres.len(),
        cylinders = cylinders.len(),
        camera_distance,
        "Built molecule geometry."
    );

    MoleculeGeometry {
        spheres,
        cylinders,
        offset,
        camera_distance,
        bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::elements;
    use crate::core::io::sdf::parse_structure;
    use crate::core::models::color::Rgb;
    use crate::core::models::structure::Atom;
    use crate::core::models::topology::Bond;
    use crate::engine::config::GeometryConfigBuilder;
    use nalgebra::Point3;
    use std::collections::BTreeMap;

    const TOL: f64 = 1e-9;

    fn two_atoms(kind: BondKind, end: Point3<f64>) -> StructureModel {
        let mut styles = BTreeMap::new();
        styles.insert("C".to_string(), elements::display_style("C"));
        StructureModel::try_new(
            "C2",
            None,
            styles,
            vec![
                Atom::new("C-1", "C", Point3::origin()),
                Atom::new("C-2", "C", end),
            ],
            vec![Bond::new("C-1", "C-2", kind)],
        )
        .unwrap()
    }

    fn build(model: &StructureModel) -> MoleculeGeometry {
        build_geometry(model, &GeometryConfig::default())
    }

    mod counts {
        use super::*;

        #[test]
        fn water_has_three_spheres_and_two_cylinders() {
            let text = "\n\n\n3 2\n0 0 0 O\n0.757 0.586 0 H\n-0.757 0.586 0 H\n1 2 1\n1 3 1\n";
            let (model, _) = parse_structure(text, "H2O", None).unwrap();
            let geometry = build(&model);
            assert_eq!(model.formula(), "H2O");
            assert_eq!(geometry.spheres.len(), 3);
            assert_eq!(geometry.cylinders.len(), 2);
            assert_eq!(geometry.primitive_count(), 5);
            assert_eq!(geometry.primitives().count(), 5);
        }

        #[test]
        fn cylinders_per_bond_kind() {
            let end = Point3::new(1.0, 0.0, 0.0);
            assert_eq!(build(&two_atoms(BondKind::Single, end)).cylinders.len(), 1);
            assert_eq!(build(&two_atoms(BondKind::Double, end)).cylinders.len(), 2);
            assert_eq!(build(&two_atoms(BondKind::Triple, end)).cylinders.len(), 3);
            let ignored = build(&two_atoms(BondKind::Unrecognized("ionic".into()), end));
            assert!(ignored.cylinders.is_empty());
            assert_eq!(ignored.spheres.len(), 2);
        }
    }

    mod bonds {
        use super::*;

        #[test]
        fn single_bond_spans_the_atoms() {
            let end = Point3::new(0.0, 0.0, 1.5);
            let geometry = build(&two_atoms(BondKind::Single, end));
            let cylinder = &geometry.cylinders[0];
            assert!((cylinder.length - 1.5).abs() < TOL);
            assert!((cylinder.radius - 0.05).abs() < TOL);
            assert_eq!(cylinder.color, Rgb::from_hex(0x666666));
            let (a, b) = cylinder.endpoints();
            assert!((a - Point3::origin()).norm() < TOL);
            assert!((b - end).norm() < TOL);
        }

        #[test]
        fn double_bond_is_symmetric_and_off_axis() {
            let geometry = build(&two_atoms(BondKind::Double, Point3::new(1.0, 0.0, 0.0)));
            let midpoint = Point3::new(0.5, 0.0, 0.0);
            let [a, b] = [&geometry.cylinders[0], &geometry.cylinders[1]];
            assert!((a.length - 1.0).abs() < TOL);
            assert!((b.length - 1.0).abs() < TOL);
            assert!((a.radius - 0.04).abs() < TOL);
            assert!(((a.center - midpoint) + (b.center - midpoint)).norm() < TOL);
            assert!(((a.center - midpoint).norm() - 0.1).abs() < TOL);
            assert!((a.center - midpoint).x.abs() < TOL);
        }

        #[test]
        fn triple_bond_has_one_axial_cylinder() {
            let geometry = build(&two_atoms(BondKind::Triple, Point3::new(0.0, 0.0, 2.0)));
            let midpoint = Point3::new(0.0, 0.0, 1.0);
            let offsets: Vec<f64> = geometry
                .cylinders
                .iter()
                .map(|c| (c.center - midpoint).norm())
                .collect();
            assert!(offsets[0] < TOL);
            assert!((offsets[1] - 0.08).abs() < TOL);
            assert!((offsets[2] - 0.08).abs() < TOL);
        }

        #[test]
        fn vertical_double_bond_uses_the_x_reference() {
            let geometry = build(&two_atoms(BondKind::Double, Point3::new(0.0, 2.0, 0.0)));
            let shift = geometry.cylinders[0].center - Point3::new(0.0, 1.0, 0.0);
            assert!((shift.norm() - 0.1).abs() < TOL);
            assert!(shift.y.abs() < TOL);
        }

        #[test]
        fn cylinders_point_along_the_bond() {
            let end = Point3::new(0.3, -0.8, 1.1);
            let geometry = build(&two_atoms(BondKind::Triple, end));
            let dir = end.coords.normalize();
            for cylinder in &geometry.cylinders {
                assert!((cylinder.axis().into_inner() - dir).norm() < TOL);
            }
        }

        #[test]
        fn near_parallel_threshold_drives_offset_and_roll_together() {
            let end = Point3::new(0.1, 0.95, 0.2);
            let midpoint = nalgebra::center(&Point3::origin(), &end);
            let model = two_atoms(BondKind::Double, end);
            let mut rolls = Vec::new();
            for threshold in [0.9, 0.99] {
                let config = GeometryConfigBuilder::new()
                    .near_parallel_threshold(threshold)
                    .build()
                    .unwrap();
                let geometry = build_geometry(&model, &config);
                let cylinder = &geometry.cylinders[0];
                let side = (cylinder.center - midpoint).normalize();
                let local_x = cylinder.orientation * Vector3::x();
                assert!((side - local_x).norm() < TOL);
                rolls.push(local_x);
            }
            assert!((rolls[0] - rolls[1]).norm() > 1e-3);
        }

        #[test]
        fn zero_length_bond_is_degenerate_but_harmless() {
            let geometry = build(&two_atoms(BondKind::Double, Point3::origin()));
            assert_eq!(geometry.cylinders.len(), 2);
            assert!(geometry.cylinders.iter().all(|c| c.length == 0.0));
        }
    }

    mod styles {
        use super::*;

        #[test]
        fn missing_element_uses_configured_fallback() {
            let model = StructureModel::try_new(
                "X",
                None,
                BTreeMap::new(),
                vec![Atom::new("Q-1", "Q", Point3::origin())],
                vec![],
            )
            .unwrap();
            let config = GeometryConfigBuilder::new()
                .fallback_radius(0.7)
                .build()
                .unwrap();
            let geometry = build_geometry(&model, &config);
            assert_eq!(geometry.spheres[0].color, Rgb::from_hex(0xFF1493));
            assert!((geometry.spheres[0].radius - 0.7).abs() < TOL);
            assert_eq!(geometry.spheres[0].atom_id, "Q-1");
        }
    }

    mod scene_fit {
        use super::*;

        #[test]
        fn centered_geometry_is_centered_at_origin() {
            let geometry = build(&two_atoms(BondKind::Double, Point3::new(3.0, 1.0, -2.0)));
            let centered = geometry.centered();
            assert!(centered.bounds.center().coords.norm() < TOL);
            assert_eq!(centered.offset, Vector3::zeros());

            let mut recomputed = Aabb::empty();
            for primitive in centered.primitives() {
                recomputed.merge(&primitive.bounds());
            }
            assert!(recomputed.center().coords.norm() < TOL);
        }

        #[test]
        fn offset_negates_the_bounds_center() {
            let geometry = build(&two_atoms(BondKind::Single, Point3::new(4.0, 0.0, 0.0)));
            assert!((geometry.offset - Vector3::new(-2.0, 0.0, 0.0)).norm() < TOL);
        }

        #[test]
        fn small_molecules_get_the_minimum_distance() {
            let geometry = build(&two_atoms(BondKind::Single, Point3::new(1.0, 0.0, 0.0)));
            assert_eq!(geometry.camera_distance, 3.0);
        }

        #[test]
        fn large_molecules_are_fitted_by_field_of_view() {
            let geometry = build(&two_atoms(BondKind::Single, Point3::new(20.0, 0.0, 0.0)));
            let extent = geometry.bounds.max_extent();
            let expected = extent / (2.0 * (37.5f64).to_radians().tan()) * 1.5;
            assert!((geometry.camera_distance - expected).abs() < TOL);
            assert!(geometry.camera_distance > 3.0);
        }
    }
}
