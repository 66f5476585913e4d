//! # Loci Module
//!
//! Selections over structure snapshots and the set algebra used to combine them.
//!
//! - [`ordered_set`] - Sorted index sets with union, intersection and difference
//! - [`element`] - [`ElementLoci`]: per-unit element selections tied to one structure
//! - [`stats`] - Counting selected atoms/residues/chains and formatting labels

pub mod element;
pub mod ordered_set;
pub mod stats;

pub use element::{ElementLoci, UnitElements};

/// Anything a user can point at in the viewer.
///
/// Only [`Loci::Element`] carries a structure selection; the other kinds are accepted by the
/// selection API and ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Loci {
    /// Nothing.
    Empty,
    /// Everything in the scene, not tied to a particular structure.
    Every,
    /// Elements of a single structure snapshot.
    Element(ElementLoci),
}

impl Loci {
    pub fn is_empty(&self) -> bool {
        match self {
            Loci::Empty => true,
            Loci::Every => false,
            Loci::Element(loci) => loci.is_empty(),
        }
    }

    pub fn as_element(&self) -> Option<&ElementLoci> {
        match self {
            Loci::Element(loci) => Some(loci),
            Loci::Empty | Loci::Every => None,
        }
    }
}

impl From<ElementLoci> for Loci {
    fn from(loci: ElementLoci) -> Self {
        Loci::Element(loci)
    }
}
