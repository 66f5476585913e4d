//! # Core Models Module
//!
//! Data structures describing the molecules a selection refers to.
//!
//! - [`atom`] - Individual atom records with coordinates and residue metadata
//! - [`unit`] - Groups of model atoms (one per chain) addressed by unit-local indices
//! - [`structure`] - Immutable, identity-bearing structure snapshots and their lineage
//! - [`ids`] - Identifier types for structures, units and element indices
//!
//! ## Usage
//!
//! ```ignore
//! use molsel::core::models::{atom::Atom, structure::{Model, Structure}};
//!
//! let model = Model::new("1abc", atoms);
//! let structure = Structure::from_model(model);
//! assert_eq!(structure.units().len(), 2);
//! ```

pub mod atom;
pub mod ids;
pub mod structure;
pub mod unit;
