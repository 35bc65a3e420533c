use crate::core::models::color::Rgb;
use crate::core::models::structure::{Atom, ElementStyle, StructureModel};
use crate::core::models::topology::{Bond, BondKind};
use nalgebra::Point3;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Structure is missing a formula")]
    MissingFormula,
    #[error("Structure is missing an element mapping")]
    MissingElements,
    #[error("Malformed atoms: {0}")]
    MalformedAtoms(String),
    #[error("Malformed bonds: {0}")]
    MalformedBonds(String),
    #[error("Bond references unknown atom id '{atom_id}'")]
    DanglingBondReference { atom_id: String },
}

/// Checks the invariants every [`StructureModel`] must satisfy before geometry
/// construction.
///
/// Checks run in order and the first failure wins: formula, atoms, bonds.
pub fn validate_model(model: &StructureModel) -> Result<(), ValidationError> {
    if model.formula().trim().is_empty() {
        return Err(ValidationError::MissingFormula);
    }

    let atom_ids = check_atoms(model.atoms())?;

    for bond in model.bonds() {
        check_endpoint(&atom_ids, &bond.atom1)?;
        check_endpoint(&atom_ids, &bond.atom2)?;
    }
    Ok(())
}

fn check_atoms(atoms: &[Atom]) -> Result<HashSet<&str>, ValidationError> {
    if atoms.is_empty() {
        return Err(ValidationError::MalformedAtoms(
            "structure contains no atoms".to_string(),
        ));
    }
    let mut ids = HashSet::with_capacity(atoms.len());
    for atom in atoms {
        if !ids.insert(atom.id.as_str()) {
            return Err(ValidationError::MalformedAtoms(format!(
                "duplicate atom id '{}'",
                atom.id
            )));
        }
        if !atom.position.coords.iter().all(|c| c.is_finite()) {
            return Err(ValidationError::MalformedAtoms(format!(
                "atom '{}' has a non-finite position",
                atom.id
            )));
        }
    }
    Ok(ids)
}

fn check_endpoint(atom_ids: &HashSet<&str>, atom_id: &str) -> Result<(), ValidationError> {
    if atom_ids.contains(atom_id) {
        Ok(())
    } else {
        Err(ValidationError::DanglingBondReference {
            atom_id: atom_id.to_string(),
        })
    }
}

/// Validates an arbitrary JSON value against the debug structure format and
/// converts it into a [`StructureModel`].
///
/// Element entries with an unusable color or radius are dropped with a warning;
/// atoms of those elements then render with the fallback style.
pub fn validate_value(value: &Value) -> Result<StructureModel, ValidationError> {
    let formula = match value.get("formula").and_then(Value::as_str) {
        Some(formula) if !formula.trim().is_empty() => formula.to_string(),
        _ => return Err(ValidationError::MissingFormula),
    };

    let elements = match value.get("elements").and_then(Value::as_object) {
        Some(map) => element_styles(map),
        None => return Err(ValidationError::MissingElements),
    };

    let atoms = match value.get("atoms").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| atom_from_value(index, item))
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            return Err(ValidationError::MalformedAtoms(
                "'atoms' must be an array".to_string(),
            ));
        }
    };
    let atom_ids = check_atoms(&atoms)?;

    let bond_items = value
        .get("bonds")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::MalformedBonds("'bonds' must be an array".to_string()))?;
    let mut bonds = Vec::with_capacity(bond_items.len());
    for (index, item) in bond_items.iter().enumerate() {
        let fields = item
            .as_object()
            .ok_or_else(|| ValidationError::MalformedBonds(format!("bond {index} is not an object")))?;
        let atom1 = endpoint(fields, "atom1", &atom_ids)?;
        let atom2 = endpoint(fields, "atom2", &atom_ids)?;
        // A missing or non-string type is carried as an empty label and draws nothing.
        let kind = BondKind::from_label(fields.get("type").and_then(Value::as_str).unwrap_or(""));
        bonds.push(Bond::new(atom1, atom2, kind));
    }

    let identifier = value.get("cid").and_then(Value::as_u64);

    Ok(StructureModel::from_parts(
        formula, identifier, elements, atoms, bonds,
    ))
}

fn element_styles(map: &Map<String, Value>) -> BTreeMap<String, ElementStyle> {
    let mut styles = BTreeMap::new();
    for (symbol, entry) in map {
        let color = entry
            .get("color")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Rgb>().ok());
        let radius = entry
            .get("radius")
            .and_then(Value::as_f64)
            .filter(|r| r.is_finite() && *r > 0.0);
        match (color, radius) {
            (Some(color), Some(radius)) => {
                styles.insert(symbol.clone(), ElementStyle { color, radius });
            }
            _ => warn!(
                element = %symbol,
                "Dropping element entry without a valid color and positive radius."
            ),
        }
    }
    styles
}

fn atom_from_value(index: usize, item: &Value) -> Result<Atom, ValidationError> {
    let malformed = |what: &str| ValidationError::MalformedAtoms(format!("atom {index}: {what}"));

    let fields = item.as_object().ok_or_else(|| malformed("not an object"))?;
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing string 'id'"))?;
    let element = fields
        .get("element")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing string 'element'"))?;
    let coords = fields
        .get("position")
        .and_then(Value::as_array)
        .filter(|p| p.len() == 3)
        .ok_or_else(|| malformed("'position' must be an array of 3 numbers"))?;
    let xyz = coords
        .iter()
        .map(Value::as_f64)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| malformed("'position' must be an array of 3 numbers"))?;

    Ok(Atom::new(id, element, Point3::new(xyz[0], xyz[1], xyz[2])))
}

fn endpoint(
    fields: &Map<String, Value>,
    key: &str,
    atom_ids: &HashSet<&str>,
) -> Result<String, ValidationError> {
    match fields.get(key) {
        Some(Value::String(id)) => {
            check_endpoint(atom_ids, id)?;
            Ok(id.clone())
        }
        Some(other) => Err(ValidationError::DanglingBondReference {
            atom_id: other.to_string(),
        }),
        None => Err(ValidationError::DanglingBondReference {
            atom_id: String::new(),
        }),
    }
}
