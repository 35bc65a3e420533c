//! Provides input/output functionality for structure file formats.
//!
//! Two formats are supported behind the common [`traits::StructureFile`] trait:
//! MDL SDF/MOL V2000 text as served by compound databases ([`sdf`]), and the
//! debug JSON format used to inject a structure directly ([`debug_json`]).

pub mod debug_json;
pub mod sdf;
pub mod traits;
