use super::ids::{ElementIndex, UnitId, UnitIndex};

/// A group of model atoms addressed by unit-local indices.
///
/// The element list is sorted by model atom index. A selection refers to atoms of a unit by
/// their position in this list ([`UnitIndex`]), which keeps selections compact and lets them be
/// translated onto another snapshot that shares the same model atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub chain_id: char,
    elements: Vec<ElementIndex>,
}

impl Unit {
    /// Creates a unit; `elements` are sorted and de-duplicated.
    pub fn new(id: UnitId, chain_id: char, mut elements: Vec<ElementIndex>) -> Self {
        elements.sort_unstable();
        elements.dedup();
        Self {
            id,
            chain_id,
            elements,
        }
    }

    pub fn elements(&self) -> &[ElementIndex] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Model atom index at the given unit index.
    pub fn element(&self, index: UnitIndex) -> Option<ElementIndex> {
        self.elements.get(index as usize).copied()
    }

    /// Unit index of a model atom, if the atom belongs to this unit.
    pub fn index_of(&self, element: ElementIndex) -> Option<UnitIndex> {
        self.elements
            .binary_search(&element)
            .ok()
            .map(|i| i as UnitIndex)
    }
}
