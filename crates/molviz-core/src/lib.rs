//! # molviz Core Library
//!
//! Turns chemical structure data into renderable 3D geometry: an SDF/MOL reader,
//! a validator for hand-written structures, and a builder that places atom
//! spheres and bond cylinders and fits a camera to the result.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data: the element table, the
//!   validated `StructureModel`, structure file readers and writers, and the
//!   vector math used to orient bonds.
//!
//! - **[`engine`]: The Logic Core.** Geometry construction and everything with
//!   state: the scene driver boundary and its in-memory scene, interactive view
//!   state, and the `Viewer` that owns the single live molecule.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie a compound
//!   directory and translator to the viewer: look a name up, parse it, render it.

pub mod core;
pub mod engine;
pub mod workflows;
