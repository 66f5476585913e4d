use crate::core::loci::ElementLoci;
use crate::core::loci::stats::{ElementStats, LabelOptions, element_stats_label};
use tracing::trace;
use uuid::Uuid;

/// A past selection addition.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub loci: ElementLoci,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Remove,
    Up,
    Down,
}

/// Most-recently-used log of selection additions.
///
/// The front is the most recent entry. No two entries hold equal loci, and the log never
/// grows past its capacity; adding to a full log evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `loci` as the most recent addition.
    ///
    /// An equal entry already in the log is moved to the front instead of duplicated. Returns
    /// whether the log changed; empty loci are ignored.
    pub fn try_add(&mut self, loci: &ElementLoci) -> bool {
        if loci.is_empty() {
            return false;
        }

        if let Some(idx) = self.entries.iter().position(|e| e.loci == *loci) {
            let entry = self.entries.remove(idx);
            trace!("Moving history entry '{}' from {} to front.", entry.label, idx);
            self.entries.insert(0, entry);
            return true;
        }

        let stats = ElementStats::of_loci(loci);
        let label = element_stats_label(
            &stats,
            LabelOptions {
                counts_only: false,
                reverse: true,
            },
        );
        trace!("Adding history entry '{}'.", label);
        self.entries.insert(
            0,
            HistoryEntry {
                id: Uuid::new_v4(),
                loci: loci.clone(),
                label,
            },
        );
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
        true
    }

    /// Removes or moves the entry with the given id.
    ///
    /// `Up`/`Down` swap the entry with its neighbour, wrapping around within the first
    /// `min(len, modulus)` entries (all entries when `modulus` is `None`). Returns `false` if
    /// no entry has that id.
    pub fn modify(&mut self, id: Uuid, action: HistoryAction, modulus: Option<usize>) -> bool {
        let Some(idx) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };

        let target = match action {
            HistoryAction::Remove => {
                self.entries.remove(idx);
                return true;
            }
            HistoryAction::Up => idx as isize - 1,
            HistoryAction::Down => idx as isize + 1,
        };

        let len = self.entries.len();
        let modulus = match modulus {
            Some(m) if m > 0 => m.min(len),
            _ => len,
        };
        let swap_with = target.rem_euclid(modulus as isize) as usize;
        if swap_with < len {
            self.entries.swap(idx, swap_with);
        }
        true
    }

    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::UnitId;
    use crate::core::models::structure::Structure;
    use crate::core::models::structure::test_support::linear_structure;
    use std::sync::Arc;

    fn pick(s: &Arc<Structure>, i: u32) -> ElementLoci {
        ElementLoci::of_unit(Arc::clone(s), UnitId(0), &[i])
    }

    fn picked_indices(log: &HistoryLog) -> Vec<u32> {
        log.entries()
            .iter()
            .map(|e| e.loci.elements()[0].indices.min().unwrap())
            .collect()
    }

    #[test]
    fn empty_loci_are_not_recorded() {
        let s = linear_structure(&[('A', 3)], 1);
        let mut log = HistoryLog::new(8);
        assert!(!log.try_add(&ElementLoci::empty(s)));
        assert!(log.is_empty());
    }

    #[test]
    fn keeps_most_recent_entries_up_to_capacity() {
        let s = linear_structure(&[('A', 20)], 1);
        let mut log = HistoryLog::new(8);
        for i in 0..9 {
            assert!(log.try_add(&pick(&s, i)));
        }

        assert_eq!(log.len(), 8);
        assert_eq!(picked_indices(&log), vec![8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn re_adding_moves_entry_to_front_without_growth() {
        let s = linear_structure(&[('A', 20)], 1);
        let mut log = HistoryLog::new(8);
        for i in 0..4 {
            log.try_add(&pick(&s, i));
        }
        let original_id = log.entries()[2].id;

        assert!(log.try_add(&pick(&s, 1)));

        assert_eq!(log.len(), 4);
        assert_eq!(picked_indices(&log), vec![1, 3, 2, 0]);
        assert_eq!(log.entries()[0].id, original_id);
    }

    #[test]
    fn labels_are_computed_from_the_loci() {
        let s = linear_structure(&[('A', 3)], 1);
        let mut log = HistoryLog::new(8);
        log.try_add(&pick(&s, 1));
        assert_eq!(log.entries()[0].label, "CA | ALA 2 | A");
    }

    #[test]
    fn up_at_front_wraps_to_end_of_window() {
        let s = linear_structure(&[('A', 20)], 1);
        let mut log = HistoryLog::new(8);
        for i in 0..5 {
            log.try_add(&pick(&s, i));
        }
        let front = log.entries()[0].id;

        assert!(log.modify(front, HistoryAction::Up, Some(5)));

        assert_eq!(log.entries()[4].id, front);
        assert_eq!(picked_indices(&log), vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn down_rotates_within_a_smaller_modulus() {
        let s = linear_structure(&[('A', 20)], 1);
        let mut log = HistoryLog::new(8);
        for i in 0..5 {
            log.try_add(&pick(&s, i));
        }
        // Order is [4, 3, 2, 1, 0]; moving index 2 down inside a window of 3 wraps to index 0.
        let id = log.entries()[2].id;

        assert!(log.modify(id, HistoryAction::Down, Some(3)));

        assert_eq!(picked_indices(&log), vec![2, 3, 4, 1, 0]);
    }

    #[test]
    fn down_moves_towards_the_tail() {
        let s = linear_structure(&[('A', 20)], 1);
        let mut log = HistoryLog::new(8);
        for i in 0..3 {
            log.try_add(&pick(&s, i));
        }
        let id = log.entries()[0].id;

        assert!(log.modify(id, HistoryAction::Down, None));

        assert_eq!(picked_indices(&log), vec![1, 2, 0]);
    }

    #[test]
    fn remove_deletes_and_unknown_ids_are_ignored() {
        let s = linear_structure(&[('A', 20)], 1);
        let mut log = HistoryLog::new(8);
        for i in 0..3 {
            log.try_add(&pick(&s, i));
        }
        let id = log.entries()[1].id;

        assert!(log.modify(id, HistoryAction::Remove, None));
        assert_eq!(picked_indices(&log), vec![2, 0]);
        assert!(!log.modify(id, HistoryAction::Remove, None));
        assert!(!log.modify(Uuid::new_v4(), HistoryAction::Up, None));
    }
}
