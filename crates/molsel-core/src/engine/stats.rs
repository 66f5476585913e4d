use super::entry::SelectionEntry;
use crate::core::loci::stats::{ElementStats, LabelOptions, NOTHING_SELECTED, element_stats_label};

/// Aggregate counts over every current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStats {
    /// Number of structures with a non-empty selection.
    pub structure_count: usize,
    pub element_count: usize,
    pub label: String,
}

impl Default for SelectionStats {
    fn default() -> Self {
        Self {
            structure_count: 0,
            element_count: 0,
            label: NOTHING_SELECTED.to_string(),
        }
    }
}

impl SelectionStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a SelectionEntry>) -> Self {
        let mut structure_count = 0;
        let mut element_count = 0;
        let mut stats = ElementStats::default();

        for entry in entries {
            let selection = entry.selection();
            if selection.is_empty() {
                continue;
            }
            structure_count += 1;
            element_count += selection.size();
            stats.add(&ElementStats::of_loci(selection));
        }

        let label = element_stats_label(
            &stats,
            LabelOptions {
                counts_only: true,
                reverse: false,
            },
        );

        Self {
            structure_count,
            element_count,
            label,
        }
    }
}
