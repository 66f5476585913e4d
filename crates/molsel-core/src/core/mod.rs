//! # Core Module
//!
//! Stateless building blocks the selection engine operates on.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, units and immutable structure snapshots
//! - **Index-Set Algebra** ([`loci`]) - Per-unit element selections and their statistics
//! - **Geometry** ([`geometry`]) - Bounding boxes, enclosing spheres and principal axes
//! - **File I/O** ([`io`]) - Reading structures from PDB coordinate files
//! - **State Graph** ([`state`]) - Reference-keyed objects with removal/update notifications

pub mod geometry;
pub mod io;
pub mod loci;
pub mod models;
pub mod state;
