//! # Engine Module
//!
//! Converts validated structures into scene content and keeps that content
//! consistent as molecules are replaced and the user interacts with the view.
//!
//! - **Configuration** ([`config`]) - Radii, offsets and camera fitting parameters
//! - **Geometry** ([`geometry`], [`primitives`]) - Spheres, cylinders and scene fit
//! - **Scene** ([`scene`], [`view`]) - The scene driver boundary, an in-memory scene and view state
//! - **Live slot** ([`viewer`]) - Ticketed submissions and the single live molecule
//! - **Progress Monitoring** ([`progress`]) - Phase events for front ends
//! - **Error Handling** ([`error`]) - Error types for rendering and lookups

pub mod config;
pub mod error;
pub mod geometry;
pub mod primitives;
pub mod progress;
pub mod scene;
pub mod view;
pub mod viewer;
