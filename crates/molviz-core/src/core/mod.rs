//! # Core Module
//!
//! Stateless building blocks for describing a molecule.
//!
//! - **Element data** ([`elements`]) - CPK colors and display radii for H through Lr
//! - **Molecular representation** ([`models`]) - Atoms, bonds and the validated structure
//! - **File I/O** ([`io`]) - SDF/MOL V2000 and debug JSON readers and writers
//! - **Validation** ([`validation`]) - Structural checks shared by every input path
//! - **Geometry helpers** ([`utils`]) - Perpendiculars, bond orientation, bounding boxes

pub mod elements;
pub mod io;
pub mod models;
pub mod utils;
pub mod validation;
