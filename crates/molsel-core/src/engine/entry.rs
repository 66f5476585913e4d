use crate::core::loci::ElementLoci;
use crate::core::models::structure::Structure;
use std::cell::OnceCell;
use std::sync::Arc;

/// The current selection of one tracked structure reference.
///
/// The filtered structure of the selection is derived on first access and dropped whenever
/// the selection is replaced.
#[derive(Debug, Clone)]
pub struct SelectionEntry {
    selection: ElementLoci,
    structure: OnceCell<Option<Arc<Structure>>>,
}

impl SelectionEntry {
    pub fn new(selection: ElementLoci) -> Self {
        Self {
            selection,
            structure: OnceCell::new(),
        }
    }

    pub fn selection(&self) -> &ElementLoci {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: ElementLoci) {
        self.selection = selection;
        self.structure = OnceCell::new();
    }

    /// Substructure holding only the selected elements; `None` while nothing is selected.
    pub fn structure(&self) -> Option<Arc<Structure>> {
        self.structure
            .get_or_init(|| {
                (!self.selection.is_empty()).then(|| self.selection.to_structure())
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::UnitId;
    use crate::core::models::structure::test_support::linear_structure;

    #[test]
    fn empty_selection_has_no_structure() {
        let s = linear_structure(&[('A', 3)], 1);
        let entry = SelectionEntry::new(ElementLoci::empty(s));
        assert!(entry.structure().is_none());
    }

    #[test]
    fn structure_is_cached_until_selection_changes() {
        let s = linear_structure(&[('A', 5)], 1);
        let mut entry = SelectionEntry::new(ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[1, 2]));

        let first = entry.structure().unwrap();
        let again = entry.structure().unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.element_count(), 2);

        entry.set_selection(ElementLoci::of_unit(s, UnitId(0), &[4]));
        let updated = entry.structure().unwrap();
        assert!(!Arc::ptr_eq(&first, &updated));
        assert_eq!(updated.element_count(), 1);
    }
}
