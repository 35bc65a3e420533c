//! # Core Models Module
//!
//! Data structures describing a molecule as the rest of the crate sees it.
//!
//! - [`structure`] - The validated [`structure::StructureModel`] with its atoms and element styles
//! - [`topology`] - Bonds and bond kinds
//! - [`color`] - The `#RRGGBB` display color type shared by every format
//!
//! ## Usage
//!
//! ```ignore
//! use molviz::core::models::structure::{Atom, StructureModel};
//! use molviz::core::models::topology::{Bond, BondKind};
//!
//! let atoms = vec![
//!     Atom::new("C-1", "C", Point3::new(0.0, 0.0, 0.0)),
//!     Atom::new("O-2", "O", Point3::new(1.2, 0.0, 0.0)),
//! ];
//! let bonds = vec![Bond::new("C-1", "O-2", BondKind::Double)];
//! let model = StructureModel::try_new("CO", None, styles, atoms, bonds)?;
//! ```

pub mod color;
pub mod structure;
pub mod topology;
