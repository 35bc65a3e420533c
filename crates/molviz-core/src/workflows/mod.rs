//! # Workflows Module
//!
//! Top-level entry points for front ends.
//!
//! - **Lookup** ([`lookup`]) - Service traits for the compound directory and translator,
//!   Hebrew detection and the suggested molecule list
//! - **Visualization** ([`visualize`]) - Name lookup, direct structure text and debug JSON
//!   submissions, each rendered through the viewer's ticketed live slot

pub mod lookup;
pub mod visualize;
