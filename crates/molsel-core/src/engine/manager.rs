use super::config::SelectionConfig;
use super::entry::SelectionEntry;
use super::events::{SelectionCallback, SelectionEvent, SelectionEvents};
use super::history::{HistoryAction, HistoryEntry, HistoryLog};
use super::stats::SelectionStats;
use crate::core::geometry::boundary::BoundaryHelper;
use crate::core::loci::ordered_set::OrderedSet;
use crate::core::loci::{ElementLoci, Loci, UnitElements};
use crate::core::models::ids::{UnitId, UnitIndex};
use crate::core::models::structure::Structure;
use crate::core::state::SubstructureParent;
use crate::core::state::object::StateRef;
use indexmap::IndexMap;
use serde::Deserialize;
use std::cell::OnceCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// How a loci is combined with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionModifier {
    Add,
    Remove,
    Intersect,
    Set,
}

/// Tracks the selection of every structure in the state graph.
///
/// Selections are stored per structure reference in insertion order. All mutations go through
/// [`modify`](Self::modify), which emits a single [`SelectionEvent::Changed`] when, and only
/// when, a stored selection actually changed. Additions are also recorded in a bounded
/// most-recently-used history; removals and intersections are not.
///
/// Inputs that cannot apply (non-element loci, structures unknown to the state graph) are
/// ignored rather than reported as errors.
#[derive(Debug)]
pub struct StructureSelectionManager {
    pub(super) config: SelectionConfig,
    parents: Rc<dyn SubstructureParent>,
    pub(super) entries: IndexMap<StateRef, SelectionEntry>,
    pub(super) history: HistoryLog,
    stats: OnceCell<SelectionStats>,
    pub(super) reference_loci: Option<ElementLoci>,
    interactive_highlight: Option<ElementLoci>,
    /// Scratch state for sphere fitting; reused by every boundary computation.
    pub(super) boundary_helper: BoundaryHelper,
    pub(super) events: SelectionEvents,
}

impl StructureSelectionManager {
    pub fn new(config: SelectionConfig, parents: Rc<dyn SubstructureParent>) -> Self {
        Self {
            history: HistoryLog::new(config.history_capacity),
            boundary_helper: BoundaryHelper::new(config.boundary_directions),
            config,
            parents,
            entries: IndexMap::new(),
            stats: OnceCell::new(),
            reference_loci: None,
            interactive_highlight: None,
            events: SelectionEvents::new(),
        }
    }

    pub fn subscribe(&mut self, callback: SelectionCallback) {
        self.events.subscribe(callback);
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn entries(&self) -> &IndexMap<StateRef, SelectionEntry> {
        &self.entries
    }

    pub fn additions_history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Most recently touched loci, the anchor for [`try_get_range`](Self::try_get_range).
    pub fn reference_loci(&self) -> Option<&ElementLoci> {
        self.reference_loci.as_ref()
    }

    /// Statistics over all current selections, recomputed after any effective change.
    pub fn stats(&self) -> &SelectionStats {
        self.stats
            .get_or_init(|| SelectionStats::from_entries(self.entries.values()))
    }

    pub(super) fn invalidate_stats(&mut self) {
        self.stats = OnceCell::new();
    }

    /// Entry for the reference owning `structure`, created empty on its root on first touch.
    fn entry_mut(&mut self, structure: &Arc<Structure>) -> Option<&mut SelectionEntry> {
        let state_ref = self.parents.parent_ref(structure)?;
        let entry = self
            .entries
            .entry(state_ref)
            .or_insert_with(|| SelectionEntry::new(ElementLoci::empty(structure.root())));
        Some(entry)
    }

    /// Applies `loci` to the selection of its structure.
    ///
    /// Returns whether the stored selection changed.
    pub fn modify(&mut self, modifier: SelectionModifier, loci: &Loci) -> bool {
        let changed = match modifier {
            SelectionModifier::Add => self.add(loci),
            SelectionModifier::Remove => self.remove(loci),
            SelectionModifier::Intersect => self.intersect(loci),
            SelectionModifier::Set => self.set(loci),
        };

        if changed {
            debug!("Selection changed by {:?}.", modifier);
            self.invalidate_stats();
            self.events.emit(SelectionEvent::Changed);
        }
        changed
    }

    /// Replaces the entry's selection with `combine(current)`, returning whether it changed.
    fn update_entry<F>(&mut self, loci: &ElementLoci, combine: F) -> Option<bool>
    where
        F: FnOnce(&ElementLoci) -> ElementLoci,
    {
        let entry = self.entry_mut(loci.structure())?;
        let next = combine(entry.selection());
        let changed = next != *entry.selection();
        entry.set_selection(next);
        Some(changed)
    }

    fn add(&mut self, loci: &Loci) -> bool {
        let Loci::Element(loci) = loci else {
            return false;
        };
        let Some(changed) = self.update_entry(loci, |sel| sel.union(loci)) else {
            return false;
        };
        self.try_add_history(loci);
        self.reference_loci = Some(loci.clone());
        changed
    }

    fn remove(&mut self, loci: &Loci) -> bool {
        let Loci::Element(loci) = loci else {
            return false;
        };
        let Some(changed) = self.update_entry(loci, |sel| sel.subtract(loci)) else {
            return false;
        };
        self.reference_loci = Some(loci.clone());
        changed
    }

    fn intersect(&mut self, loci: &Loci) -> bool {
        let Loci::Element(loci) = loci else {
            return false;
        };
        let Some(changed) = self.update_entry(loci, |sel| sel.intersect(loci)) else {
            return false;
        };
        self.reference_loci = Some(loci.clone());
        changed
    }

    fn set(&mut self, loci: &Loci) -> bool {
        let Loci::Element(loci) = loci else {
            return false;
        };
        let Some(changed) = self.update_entry(loci, |sel| loci.remap(sel.structure())) else {
            return false;
        };
        self.try_add_history(loci);
        self.reference_loci = None;
        changed
    }

    fn try_add_history(&mut self, loci: &ElementLoci) {
        if self.history.try_add(loci) {
            self.events.emit(SelectionEvent::AdditionsHistoryUpdated);
        }
    }

    /// Removes or reorders a history entry; unknown ids are ignored.
    pub fn modify_history(&mut self, id: Uuid, action: HistoryAction, modulus: Option<usize>) {
        if self.history.modify(id, action, modulus) {
            trace!("History entry {} modified with {:?}.", id, action);
            self.events.emit(SelectionEvent::AdditionsHistoryUpdated);
        }
    }

    pub(super) fn clear_history(&mut self) {
        if self.history.clear() {
            self.events.emit(SelectionEvent::AdditionsHistoryUpdated);
        }
    }

    /// Empties every selection and returns the non-empty ones that were removed.
    pub fn clear(&mut self) -> Vec<ElementLoci> {
        let mut selections = Vec::new();
        for entry in self.entries.values_mut() {
            let selection = entry.selection();
            if selection.is_empty() {
                continue;
            }
            let emptied = ElementLoci::empty(Arc::clone(selection.structure()));
            selections.push(selection.clone());
            entry.set_selection(emptied);
        }
        debug!("Cleared {} selection(s).", selections.len());
        self.reference_loci = None;
        self.invalidate_stats();
        self.events.emit(SelectionEvent::Changed);
        selections
    }

    pub fn get_loci(&mut self, structure: &Arc<Structure>) -> Loci {
        match self.entry_mut(structure) {
            Some(entry) => Loci::Element(entry.selection().clone()),
            None => Loci::Empty,
        }
    }

    /// Substructure of `structure`'s selection; `None` when nothing is selected.
    pub fn get_structure(&mut self, structure: &Arc<Structure>) -> Option<Arc<Structure>> {
        self.entry_mut(structure)?.structure()
    }

    /// Whether every element of `loci` is currently selected.
    pub fn has(&mut self, loci: &Loci) -> bool {
        let Loci::Element(loci) = loci else {
            return false;
        };
        self.entry_mut(loci.structure())
            .is_some_and(|entry| entry.selection().is_superset_of(loci))
    }

    /// Extends a single-unit pick to the contiguous index range between it and the reference
    /// loci on the same unit.
    ///
    /// The range is expressed on the root structure of the pick.
    pub fn try_get_range(&mut self, loci: &Loci) -> Option<ElementLoci> {
        let Loci::Element(loci) = loci else {
            return None;
        };
        if loci.elements().len() != 1 {
            return None;
        }
        self.entry_mut(loci.structure())?;

        let xs = &loci.elements()[0];
        let reference = self.reference_loci.as_ref()?;
        if reference.structure().root_id() != loci.structure().root_id() {
            return None;
        }
        let anchor = reference.group(xs.unit)?;

        let root = loci.structure().root();
        let to_root = |source: &ElementLoci, index: Option<UnitIndex>| -> Option<UnitIndex> {
            let element = source.structure().unit(xs.unit)?.element(index?)?;
            root.unit(xs.unit)?.index_of(element)
        };
        let min = to_root(reference, anchor.indices.min())?.min(to_root(loci, xs.indices.min())?);
        let max = to_root(reference, anchor.indices.max())?.max(to_root(loci, xs.indices.max())?);

        Some(element_range(root, xs.unit, min, max))
    }

    /// Adds `loci` to the hover highlight accumulated since the last clear.
    pub fn accumulate_interactive_highlight(&mut self, loci: &Loci) -> Option<&ElementLoci> {
        if let Loci::Element(loci) = loci {
            let accumulated = match self.interactive_highlight.take() {
                Some(previous) => previous.union(loci),
                None => loci.clone(),
            };
            self.interactive_highlight = Some(accumulated);
        }
        self.interactive_highlight.as_ref()
    }

    /// Returns and resets the accumulated hover highlight.
    pub fn clear_interactive_highlight(&mut self) -> Loci {
        self.interactive_highlight
            .take()
            .map_or(Loci::Empty, Loci::Element)
    }
}

fn element_range(
    structure: Arc<Structure>,
    unit: UnitId,
    min: UnitIndex,
    max: UnitIndex,
) -> ElementLoci {
    ElementLoci::new(
        structure,
        vec![UnitElements::new(unit, OrderedSet::of_range(min, max))],
    )
}
