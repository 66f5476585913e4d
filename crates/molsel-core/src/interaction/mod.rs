//! # Interaction Module
//!
//! Entry points that turn user intent into selection changes.
//!
//! ## Overview
//!
//! Nothing in this layer mutates the selection store directly. Picks, query results and stored
//! selection sets are handed to an [`Interactivity`](interactivity::Interactivity)
//! collaborator, which applies the configured [`Granularity`](granularity::Granularity) and
//! then drives the [`StructureSelectionManager`](crate::engine::manager::StructureSelectionManager).
//!
//! - [`dispatcher`] - Routes loci, asynchronous queries and selection sets by modifier
//! - [`interactivity`] - The collaborator trait and its manager-backed implementation
//! - [`granularity`] - Expansion of raw picks to residues, chains or whole structures
//! - [`query`] - Asynchronous selection queries evaluated per structure

pub mod dispatcher;
pub mod granularity;
pub mod interactivity;
pub mod query;
