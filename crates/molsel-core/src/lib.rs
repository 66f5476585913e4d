//! # MolSel Core Library
//!
//! Selection management for molecular structure viewers: per-structure selections ("loci"),
//! a bounded most-recently-used history of past selections, lazily computed statistics and
//! bounding geometry, all kept consistent with an external state graph that adds, updates and
//! removes structures.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Immutable structure models, the per-unit index-set algebra
//!   ([`core::loci`]), geometry primitives, PDB input and the reference-keyed state graph.
//!
//! - **[`engine`]: The Logic Core.** The stateful [`engine::manager::StructureSelectionManager`]
//!   with its selection store, history log, stats cache, geometry aggregation and lifecycle
//!   synchronization.
//!
//! - **[`interaction`]: The Public Entry Points.** Dispatching picks, asynchronous selection
//!   queries and stored selection sets through an interactivity collaborator that applies a
//!   granularity policy before driving the manager.

pub mod core;
pub mod engine;
pub mod interaction;
