use super::events::SelectionEvent;
use super::manager::StructureSelectionManager;
use crate::core::loci::ElementLoci;
use crate::core::models::structure::Structure;
use crate::core::state::graph::{StateEvent, StateGraph};
use crate::core::state::object::{StateObject, StateRef};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::debug;

impl StructureSelectionManager {
    /// Subscribes `manager` to removal and update notifications of `graph`.
    ///
    /// The graph only holds a weak handle. Graph mutations must not happen while the manager
    /// is mutably borrowed.
    pub fn attach(manager: &Rc<RefCell<Self>>, graph: &mut StateGraph) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(manager);
        graph.subscribe(Box::new(move |event| {
            if let Some(manager) = weak.upgrade() {
                manager.borrow_mut().handle_state_event(event);
            }
        }));
    }

    pub fn handle_state_event(&mut self, event: &StateEvent) {
        match event {
            StateEvent::ObjectCreated { .. } => {}
            StateEvent::ObjectRemoved { state_ref, .. } => self.on_remove(state_ref),
            StateEvent::ObjectUpdated {
                state_ref,
                old,
                new,
            } => self.on_update(state_ref, old.as_ref(), new),
        }
    }

    fn on_remove(&mut self, state_ref: &StateRef) {
        let Some(entry) = self.entries.shift_remove(state_ref) else {
            return;
        };
        debug!("Structure '{}' removed; dropping its selection.", state_ref);
        self.clear_history();
        self.reference_loci = None;
        if !entry.selection().is_empty() {
            self.invalidate_stats();
            self.events.emit(SelectionEvent::Changed);
        }
    }

    fn on_update(&mut self, state_ref: &StateRef, old: Option<&StateObject>, new: &StateObject) {
        if !self.entries.contains_key(state_ref) {
            return;
        }
        let Some(old_object) = old else {
            return;
        };
        let (Some(old), Some(new_structure)) = (old_object.as_structure(), new.as_structure())
        else {
            return;
        };
        if old_object.same_data(new) {
            return;
        }
        let new = new_structure;

        self.clear_history();
        self.reference_loci = None;

        let Some(entry) = self.entries.get_mut(state_ref) else {
            return;
        };
        let was_empty = entry.selection().is_empty();
        let next = if Structure::are_unit_and_indices_equal(old, new) {
            debug!("Structure '{}' updated in place; remapping selection.", state_ref);
            entry.selection().remap(new)
        } else {
            debug!("Structure '{}' changed shape; resetting selection.", state_ref);
            ElementLoci::empty(Arc::clone(new))
        };
        let dropped = !was_empty && next.is_empty();
        entry.set_selection(next);

        if dropped {
            self.invalidate_stats();
            self.events.emit(SelectionEvent::Changed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::manager::SelectionModifier;
    use super::super::manager::test_support::{fixture, pick, selected};
    use crate::core::models::structure::test_support::linear_structure;
    use crate::core::state::object::{SelectionSetEntry, StateObject, StateRef};
    use nalgebra::Point3;
    use std::sync::Arc;

    #[test]
    fn removal_clears_entry_history_and_reference() {
        let s = linear_structure(&[('A', 10)], 1);
        let fx = fixture(&[Arc::clone(&s)]);
        fx.manager
            .borrow_mut()
            .modify(SelectionModifier::Add, &pick(&s, 0, &[1, 2]));
        let changed = fx.changed.get();
        let history = fx.history_updated.get();

        fx.graph.borrow_mut().remove(&StateRef::from("s0"));

        let m = fx.manager.borrow();
        assert!(m.entries().is_empty());
        assert!(m.additions_history().is_empty());
        assert!(m.reference_loci().is_none());
        assert_eq!(m.stats().element_count, 0);
        assert_eq!(fx.changed.get(), changed + 1);
        assert_eq!(fx.history_updated.get(), history + 1);
    }

    #[test]
    fn removal_of_untracked_ref_is_ignored() {
        let s = linear_structure(&[('A', 10)], 1);
        let fx = fixture(&[Arc::clone(&s)]);
        fx.manager
            .borrow_mut()
            .modify(SelectionModifier::Add, &pick(&s, 0, &[1]));
        fx.graph
            .borrow_mut()
            .set("sets", StateObject::Selections(Arc::new(Vec::<SelectionSetEntry>::new())));

        fx.graph.borrow_mut().remove(&StateRef::from("sets"));

        let m = fx.manager.borrow();
        assert_eq!(m.entries().len(), 1);
        assert_eq!(m.additions_history().len(), 1);
    }

    #[test]
    fn identical_update_is_a_noop() {
        let s = linear_structure(&[('A', 10)], 1);
        let fx = fixture(&[Arc::clone(&s)]);
        fx.manager
            .borrow_mut()
            .modify(SelectionModifier::Add, &pick(&s, 0, &[1, 2]));
        let history = fx.history_updated.get();

        fx.graph
            .borrow_mut()
            .set("s0", StateObject::Structure(Arc::clone(&s)));

        let m = fx.manager.borrow();
        assert_eq!(selected(&m, "s0"), vec![1, 2]);
        assert_eq!(m.additions_history().len(), 1);
        assert!(m.reference_loci().is_some());
        assert_eq!(fx.history_updated.get(), history);
    }

    #[test]
    fn compatible_update_remaps_selection() {
        let s = linear_structure(&[('A', 10)], 1);
        let fx = fixture(&[Arc::clone(&s)]);
        fx.manager
            .borrow_mut()
            .modify(SelectionModifier::Add, &pick(&s, 0, &[3, 4]));
        let changed = fx.changed.get();

        let moved = s.with_positions(|atom| atom.position + nalgebra::Vector3::new(0.0, 5.0, 0.0));
        fx.graph
            .borrow_mut()
            .set("s0", StateObject::Structure(Arc::clone(&moved)));

        let m = fx.manager.borrow();
        let entry = &m.entries()[&StateRef::from("s0")];
        assert_eq!(entry.selection().structure().id(), moved.id());
        assert_eq!(selected(&m, "s0"), vec![3, 4]);
        assert_eq!(
            entry.selection().positions().next(),
            Some(Point3::new(3.0, 5.0, 0.0))
        );
        assert!(m.additions_history().is_empty());
        assert!(m.reference_loci().is_none());
        assert_eq!(fx.changed.get(), changed);
    }

    #[test]
    fn incompatible_update_resets_selection() {
        let s = linear_structure(&[('A', 10)], 1);
        let fx = fixture(&[Arc::clone(&s)]);
        fx.manager
            .borrow_mut()
            .modify(SelectionModifier::Add, &pick(&s, 0, &[3, 4]));
        let changed = fx.changed.get();

        let other = linear_structure(&[('A', 6), ('B', 6)], 1);
        fx.graph
            .borrow_mut()
            .set("s0", StateObject::Structure(Arc::clone(&other)));

        let m = fx.manager.borrow();
        let entry = &m.entries()[&StateRef::from("s0")];
        assert!(entry.selection().is_empty());
        assert_eq!(entry.selection().structure().id(), other.id());
        assert_eq!(m.stats().element_count, 0);
        assert_eq!(fx.changed.get(), changed + 1);
    }
}
