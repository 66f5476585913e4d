//! # Geometry Module
//!
//! Bounding geometry over selected atom positions.
//!
//! - [`boundary`] - Axis-aligned boxes, enclosing spheres and the two-phase [`boundary::BoundaryHelper`]
//! - [`principal_axes`] - Covariance based principal axes of a flat position buffer

pub mod boundary;
pub mod principal_axes;
