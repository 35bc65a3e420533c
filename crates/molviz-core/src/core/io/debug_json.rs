use crate::core::io::traits::StructureFile;
use crate::core::models::color::Rgb;
use crate::core::models::structure::StructureModel;
use crate::core::validation::{ValidationError, validate_value};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebugJsonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid structure: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Serialize)]
struct ElementRecord {
    color: Rgb,
    radius: f64,
}

#[derive(Serialize)]
struct AtomRecord<'a> {
    id: &'a str,
    element: &'a str,
    position: [f64; 3],
}

#[derive(Serialize)]
struct BondRecord<'a> {
    atom1: &'a str,
    atom2: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct StructureRecord<'a> {
    formula: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cid: Option<u64>,
    elements: BTreeMap<&'a str, ElementRecord>,
    atoms: Vec<AtomRecord<'a>>,
    bonds: Vec<BondRecord<'a>>,
}

impl<'a> From<&'a StructureModel> for StructureRecord<'a> {
    fn from(model: &'a StructureModel) -> Self {
        Self {
            formula: model.formula(),
            cid: model.identifier(),
            elements: model
                .elements()
                .iter()
                .map(|(symbol, style)| {
                    (
                        symbol.as_str(),
                        ElementRecord {
                            color: style.color,
                            radius: style.radius,
                        },
                    )
                })
                .collect(),
            atoms: model
                .atoms()
                .iter()
                .map(|atom| AtomRecord {
                    id: &atom.id,
                    element: &atom.element,
                    position: [atom.position.x, atom.position.y, atom.position.z],
                })
                .collect(),
            bonds: model
                .bonds()
                .iter()
                .map(|bond| BondRecord {
                    atom1: &bond.atom1,
                    atom2: &bond.atom2,
                    kind: bond.kind.label(),
                })
                .collect(),
        }
    }
}

/// Parses and validates debug JSON text.
pub fn parse_debug_json(text: &str) -> Result<StructureModel, DebugJsonError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(validate_value(&value)?)
}

/// Serializes a model to pretty-printed debug JSON.
pub fn to_debug_json(model: &StructureModel) -> Result<String, DebugJsonError> {
    Ok(serde_json::to_string_pretty(&StructureRecord::from(model))?)
}

/// Reader and writer for the debug JSON structure format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugJsonFile;

impl StructureFile for DebugJsonFile {
    type Metadata = ();
    type Error = DebugJsonError;

    fn read_str(&self, text: &str) -> Result<(StructureModel, ()), DebugJsonError> {
        parse_debug_json(text).map(|model| (model, ()))
    }

    fn write_to(
        &self,
        model: &StructureModel,
        writer: &mut impl Write,
    ) -> Result<(), DebugJsonError> {
        serde_json::to_writer_pretty(&mut *writer, &StructureRecord::from(model))?;
        writeln!(writer)?;
        Ok(())
    }
}
