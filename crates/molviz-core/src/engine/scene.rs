use super::geometry::MoleculeGeometry;
use super::primitives::{Layer, RenderPrimitive};
use super::view::ViewState;
use crate::core::models::color::Rgb;
use nalgebra::{Point3, Vector3};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

new_key_type! {
    pub struct NodeId;
}

/// Boundary to whatever owns the persistent 3D scene.
///
/// Implementors only need the primitive operations; the replace protocol is
/// provided on top of them.
pub trait SceneDriver {
    /// Adds one molecule primitive.
    fn add_molecule_primitive(&mut self, primitive: RenderPrimitive);

    /// Removes every molecule-layer node, releasing its resources, and returns
    /// how many were removed. Fixture nodes are never touched.
    fn clear_molecule(&mut self) -> usize;

    /// Translation applied to the molecule group as a whole.
    fn set_molecule_offset(&mut self, offset: Vector3<f64>);

    fn view_mut(&mut self) -> &mut ViewState;

    /// Swaps the current molecule for `geometry` in one pass: clear, add,
    /// recentre, refit the camera and resume auto-rotation.
    fn replace_molecule(&mut self, geometry: &MoleculeGeometry) {
        let removed = self.clear_molecule();
        for primitive in geometry.primitives() {
            self.add_molecule_primitive(primitive);
        }
        self.set_molecule_offset(geometry.offset);
        self.view_mut().fit(geometry.camera_distance);
        debug!(
            removed,
            added = geometry.primitive_count(),
            "Replaced molecule in scene."
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    Primitive(RenderPrimitive),
    AmbientLight {
        color: Rgb,
        intensity: f64,
    },
    DirectionalLight {
        color: Rgb,
        intensity: f64,
        position: Point3<f64>,
    },
    Background(Rgb),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub layer: Layer,
    pub content: NodeContent,
}

/// In-memory scene graph standing in for a rendering engine.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    molecule_offset: Vector3<f64>,
    released: usize,
    view: ViewState,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// A scene with the standard fixtures: soft ambient light, one white
    /// directional light and a light grey background.
    pub fn new() -> Self {
        let mut scene = Self::empty();
        scene.add_fixture(NodeContent::Background(Rgb::from_hex(0xF8F9FA)));
        scene.add_fixture(NodeContent::AmbientLight {
            color: Rgb::from_hex(0x404040),
            intensity: 0.6,
        });
        scene.add_fixture(NodeContent::DirectionalLight {
            color: Rgb::from_hex(0xFFFFFF),
            intensity: 0.8,
            position: Point3::new(5.0, 5.0, 5.0),
        });
        scene
    }

    /// A scene with no nodes at all.
    pub fn empty() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            molecule_offset: Vector3::zeros(),
            released: 0,
            view: ViewState::default(),
        }
    }

    pub fn add_fixture(&mut self, content: NodeContent) -> NodeId {
        self.nodes.insert(SceneNode {
            layer: Layer::Fixture,
            content,
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn layer_count(&self, layer: Layer) -> usize {
        self.nodes.values().filter(|n| n.layer == layer).count()
    }

    /// Primitives of the current molecule.
    pub fn molecule_primitives(&self) -> impl Iterator<Item = &RenderPrimitive> {
        self.nodes.values().filter_map(|node| match (&node.layer, &node.content) {
            (Layer::Molecule, NodeContent::Primitive(p)) => Some(p),
            _ => None,
        })
    }

    pub fn molecule_offset(&self) -> Vector3<f64> {
        self.molecule_offset
    }

    /// Total number of nodes released by clears over the scene's lifetime.
    pub fn released_count(&self) -> usize {
        self.released
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

impl SceneDriver for Scene {
    fn add_molecule_primitive(&mut self, primitive: RenderPrimitive) {
        self.nodes.insert(SceneNode {
            layer: Layer::Molecule,
            content: NodeContent::Primitive(primitive),
        });
    }

    fn clear_molecule(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.layer != Layer::Molecule);
        let removed = before - self.nodes.len();
        self.released += removed;
        self.molecule_offset = Vector3::zeros();
        removed
    }

    fn set_molecule_offset(&mut self, offset: Vector3<f64>) {
        self.molecule_offset = offset;
    }

    fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }
}
