use super::color::Rgb;
use super::topology::Bond;
use crate::core::elements;
use crate::core::validation::{ValidationError, validate_model};
use nalgebra::Point3;
use std::collections::{BTreeMap, HashMap};

/// Display color and radius for one element within a structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub color: Rgb,
    pub radius: f64,
}

/// A single atom: an id unique within its structure, an element symbol and a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Identifier referenced by bonds (e.g. `"O-1"`).
    pub id: String,
    /// Element symbol, case-sensitive (e.g. `"Cl"`).
    pub element: String,
    /// Position in model space; the unit is whatever the source file used.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(id: impl Into<String>, element: impl Into<String>, position: Point3<f64>) -> Self {
        Self {
            id: id.into(),
            element: element.into(),
            position,
        }
    }
}

/// A validated molecule, ready for geometry construction.
///
/// A `StructureModel` is immutable once built: the only public constructor,
/// [`StructureModel::try_new`], runs the same checks the debug-input validator
/// runs, so every value of this type has resolvable bonds and at least one atom.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureModel {
    formula: String,
    identifier: Option<u64>,
    elements: BTreeMap<String, ElementStyle>,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl StructureModel {
    /// Builds a model and checks its invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: an empty formula, no atoms,
    /// duplicate atom ids, or a bond naming an atom id that does not exist.
    pub fn try_new(
        formula: impl Into<String>,
        identifier: Option<u64>,
        elements: BTreeMap<String, ElementStyle>,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
    ) -> Result<Self, ValidationError> {
        let model = Self::from_parts(formula.into(), identifier, elements, atoms, bonds);
        validate_model(&model)?;
        Ok(model)
    }

    /// Assembles a model whose invariants the caller already guarantees.
    pub(crate) fn from_parts(
        formula: String,
        identifier: Option<u64>,
        elements: BTreeMap<String, ElementStyle>,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
    ) -> Self {
        Self {
            formula,
            identifier,
            elements,
            atoms,
            bonds,
        }
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn identifier(&self) -> Option<u64> {
        self.identifier
    }

    pub fn elements(&self) -> &BTreeMap<String, ElementStyle> {
        &self.elements
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Finds an atom by id.
    pub fn atom(&self, id: &str) -> Option<&Atom> {
        self.atoms.iter().find(|atom| atom.id == id)
    }

    /// Builds an id → atom index for bulk lookups.
    pub fn atoms_by_id(&self) -> HashMap<&str, &Atom> {
        self.atoms
            .iter()
            .map(|atom| (atom.id.as_str(), atom))
            .collect()
    }

    /// The style for `element`, falling back to the element table's fallback
    /// entry when the structure does not define one.
    pub fn style_for(&self, element: &str) -> ElementStyle {
        self.elements
            .get(element)
            .copied()
            .unwrap_or_else(elements::fallback_style)
    }
}
