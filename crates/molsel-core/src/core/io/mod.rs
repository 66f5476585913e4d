//! Provides input functionality for molecular file formats.
//!
//! Structures enter the selection engine as immutable snapshots; this module turns
//! coordinate files into the [`Model`](crate::core::models::structure::Model) atom tables
//! those snapshots are built from.

pub mod pdb;
pub mod traits;
