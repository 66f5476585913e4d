use super::granularity::Granularity;
use crate::core::loci::Loci;
use crate::engine::manager::{SelectionModifier, StructureSelectionManager};
use std::cell::RefCell;
use std::rc::Rc;

/// Applies selection intents on behalf of the dispatcher.
///
/// `apply_granularity` asks the implementation to widen the loci with its granularity
/// policy first.
pub trait Interactivity {
    fn select(&self, loci: &Loci, apply_granularity: bool);
    fn deselect(&self, loci: &Loci, apply_granularity: bool);
    fn select_join(&self, loci: &Loci, apply_granularity: bool);
    fn select_only(&self, loci: &Loci, apply_granularity: bool);
    fn clear(&self);
}

/// [`Interactivity`] backed by a shared [`StructureSelectionManager`].
pub struct SelectionInteractivity {
    manager: Rc<RefCell<StructureSelectionManager>>,
    granularity: Granularity,
}

impl SelectionInteractivity {
    pub fn new(manager: Rc<RefCell<StructureSelectionManager>>, granularity: Granularity) -> Self {
        Self {
            manager,
            granularity,
        }
    }

    pub fn manager(&self) -> &Rc<RefCell<StructureSelectionManager>> {
        &self.manager
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn apply(&self, modifier: SelectionModifier, loci: &Loci, apply_granularity: bool) {
        let loci = if apply_granularity {
            self.granularity.apply(loci)
        } else {
            loci.clone()
        };
        self.manager.borrow_mut().modify(modifier, &loci);
    }
}

impl Interactivity for SelectionInteractivity {
    fn select(&self, loci: &Loci, apply_granularity: bool) {
        self.apply(SelectionModifier::Add, loci, apply_granularity);
    }

    fn deselect(&self, loci: &Loci, apply_granularity: bool) {
        self.apply(SelectionModifier::Remove, loci, apply_granularity);
    }

    fn select_join(&self, loci: &Loci, apply_granularity: bool) {
        self.apply(SelectionModifier::Intersect, loci, apply_granularity);
    }

    fn select_only(&self, loci: &Loci, apply_granularity: bool) {
        self.clear();
        self.apply(SelectionModifier::Set, loci, apply_granularity);
    }

    fn clear(&self) {
        self.manager.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::test_support::linear_structure;
    use crate::engine::manager::test_support::{fixture, pick, selected};
    use std::sync::Arc;

    #[test]
    fn granularity_is_applied_only_on_request() {
        let s = linear_structure(&[('A', 4)], 2);
        let fx = fixture(&[Arc::clone(&s)]);
        let interactivity = SelectionInteractivity::new(Rc::clone(&fx.manager), Granularity::Residue);

        interactivity.select(&pick(&s, 0, &[0]), false);
        assert_eq!(selected(&fx.manager.borrow(), "s0"), vec![0]);

        interactivity.select(&pick(&s, 0, &[4]), true);
        assert_eq!(selected(&fx.manager.borrow(), "s0"), vec![0, 4, 5]);
    }

    #[test]
    fn select_only_replaces_every_selection() {
        let a = linear_structure(&[('A', 6)], 1);
        let b = linear_structure(&[('B', 6)], 1);
        let fx = fixture(&[Arc::clone(&a), Arc::clone(&b)]);
        let interactivity = SelectionInteractivity::new(Rc::clone(&fx.manager), Granularity::Element);

        interactivity.select(&pick(&a, 0, &[1, 2]), false);
        interactivity.select_only(&pick(&b, 0, &[3]), false);

        let m = fx.manager.borrow();
        assert!(selected(&m, "s0").is_empty());
        assert_eq!(selected(&m, "s1"), vec![3]);
    }

    #[test]
    fn deselect_and_join_map_to_remove_and_intersect() {
        let s = linear_structure(&[('A', 8)], 1);
        let fx = fixture(&[Arc::clone(&s)]);
        let interactivity = SelectionInteractivity::new(Rc::clone(&fx.manager), Granularity::Element);

        interactivity.select(&pick(&s, 0, &[1, 2, 3, 4]), false);
        interactivity.deselect(&pick(&s, 0, &[2]), false);
        interactivity.select_join(&pick(&s, 0, &[3, 4, 5]), false);

        assert_eq!(selected(&fx.manager.borrow(), "s0"), vec![3, 4]);
    }
}
