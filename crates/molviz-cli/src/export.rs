use crate::error::{CliError, Result};
use molviz::core::models::color::Rgb;
use molviz::engine::primitives::Layer;
use molviz::engine::scene::{NodeContent, Scene};
use molviz::engine::viewer::Viewer;
use nalgebra::Point3;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct SceneExport<'a> {
    formula: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cid: Option<u64>,
    camera: CameraExport,
    /// Translation already applied to every exported position.
    offset: [f64; 3],
    bounds: BoundsExport,
    spheres: Vec<SphereExport<'a>>,
    cylinders: Vec<CylinderExport>,
    fixtures: Vec<FixtureExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct CameraExport {
    fov_degrees: f64,
    distance: f64,
    auto_rotate: bool,
}

#[derive(Serialize)]
struct BoundsExport {
    min: [f64; 3],
    max: [f64; 3],
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct SphereExport<'a> {
    atom_id: &'a str,
    center: [f64; 3],
    radius: f64,
    color: Rgb,
}

#[derive(Serialize)]
struct CylinderExport {
    start: [f64; 3],
    end: [f64; 3],
    /// Unit quaternion `[x, y, z, w]` turning local +Y onto the bond axis.
    rotation: [f64; 4],
    length: f64,
    radius: f64,
    color: Rgb,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum FixtureExport {
    Background {
        color: Rgb,
    },
    AmbientLight {
        color: Rgb,
        intensity: f64,
    },
    DirectionalLight {
        color: Rgb,
        intensity: f64,
        position: [f64; 3],
    },
}

fn coords(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn fixtures(scene: &Scene) -> Vec<FixtureExport> {
    scene
        .nodes()
        .filter(|(_, node)| node.layer == Layer::Fixture)
        .filter_map(|(_, node)| match &node.content {
            NodeContent::Background(color) => Some(FixtureExport::Background { color: *color }),
            NodeContent::AmbientLight { color, intensity } => Some(FixtureExport::AmbientLight {
                color: *color,
                intensity: *intensity,
            }),
            NodeContent::DirectionalLight {
                color,
                intensity,
                position,
            } => Some(FixtureExport::DirectionalLight {
                color: *color,
                intensity: *intensity,
                position: coords(position),
            }),
            NodeContent::Primitive(_) => None,
        })
        .collect()
}

/// Serializes the rendered scene with positions in centered world space.
pub fn scene_to_json(viewer: &Viewer<Scene>) -> Result<String> {
    let live = viewer
        .live()
        .ok_or_else(|| CliError::Argument("No molecule has been rendered".to_string()))?;
    let centered = live.geometry.centered();
    let view = viewer.scene().view();
    let offset = live.geometry.offset;

    let export = SceneExport {
        formula: live.model.formula(),
        cid: live.model.identifier(),
        camera: CameraExport {
            fov_degrees: viewer.config().camera.fov_degrees,
            distance: view.camera_distance,
            auto_rotate: view.auto_rotate,
        },
        offset: [offset.x, offset.y, offset.z],
        bounds: BoundsExport {
            min: coords(&centered.bounds.min),
            max: coords(&centered.bounds.max),
        },
        spheres: centered
            .spheres
            .iter()
            .zip(&live.geometry.spheres)
            .map(|(sphere, original)| SphereExport {
                atom_id: &original.atom_id,
                center: coords(&sphere.center),
                radius: sphere.radius,
                color: sphere.color,
            })
            .collect(),
        cylinders: centered
            .cylinders
            .iter()
            .map(|cylinder| {
                let (start, end) = cylinder.endpoints();
                let q = cylinder.orientation.quaternion();
                CylinderExport {
                    start: coords(&start),
                    end: coords(&end),
                    rotation: [q.i, q.j, q.k, q.w],
                    length: cylinder.length,
                    radius: cylinder.radius,
                    color: cylinder.color,
                }
            })
            .collect(),
        fixtures: fixtures(viewer.scene()),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn write_scene(viewer: &Viewer<Scene>, path: &Path) -> Result<()> {
    let json = scene_to_json(viewer)?;
    std::fs::write(path, json)?;
    info!("Scene exported to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use molviz::engine::config::GeometryConfig;
    use molviz::workflows::visualize::show_structure_text;
    use serde_json::Value;

    const CO2: &str = "\n\n\n3 2\n0 0 0 C\n1.16 0 0 O\n-1.16 0 0 O\n1 2 2\n1 3 2\n";

    fn rendered() -> Viewer<Scene> {
        let mut viewer = Viewer::new(Scene::new(), GeometryConfig::default());
        show_structure_text(&mut viewer, CO2, "CO2", Some(280)).unwrap();
        viewer
    }

    #[test]
    fn nothing_rendered_is_an_error() {
        let viewer = Viewer::new(Scene::new(), GeometryConfig::default());
        assert!(matches!(scene_to_json(&viewer), Err(CliError::Argument(_))));
    }

    #[test]
    fn export_lists_every_primitive_and_fixture() {
        let json: Value = serde_json::from_str(&scene_to_json(&rendered()).unwrap()).unwrap();
        assert_eq!(json["formula"], "CO2");
        assert_eq!(json["cid"], 280);
        assert_eq!(json["spheres"].as_array().unwrap().len(), 3);
        assert_eq!(json["cylinders"].as_array().unwrap().len(), 4);
        assert_eq!(json["fixtures"].as_array().unwrap().len(), 3);
        assert_eq!(json["spheres"][0]["atom-id"], "C-1");
        assert_eq!(json["cylinders"][0]["color"], "#666666");
        assert!(json["camera"]["auto-rotate"].as_bool().unwrap());
        assert!(
            json["fixtures"]
                .as_array()
                .unwrap()
                .iter()
                .any(|f| f["type"] == "directional-light")
        );
    }

    #[test]
    fn exported_bounds_are_centered() {
        let json: Value = serde_json::from_str(&scene_to_json(&rendered()).unwrap()).unwrap();
        for axis in 0..3 {
            let min = json["bounds"]["min"][axis].as_f64().unwrap();
            let max = json["bounds"]["max"][axis].as_f64().unwrap();
            assert!((min + max).abs() < 1e-9);
        }
    }

    #[test]
    fn write_scene_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        write_scene(&rendered(), &path).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"cylinders\""));
    }
}
