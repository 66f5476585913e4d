use super::element::ElementLoci;
use std::collections::HashSet;

/// Where a single atom sits in the chain/residue hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomLocation {
    pub chain_id: char,
    pub residue_name: String,
    pub residue_number: isize,
    pub atom_name: String,
}

/// Element, residue and chain counts of one or more loci.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStats {
    pub element_count: usize,
    pub residue_count: usize,
    pub chain_count: usize,
    /// Location of the first counted atom; used to label single-atom or single-residue stats.
    pub first_atom: Option<AtomLocation>,
}

impl ElementStats {
    pub fn of_loci(loci: &ElementLoci) -> Self {
        let mut residues = HashSet::new();
        let mut first_atom = None;
        let mut element_count = 0;

        for atom in loci.atoms() {
            element_count += 1;
            residues.insert((atom.chain_id, atom.residue_number, atom.residue_name.clone()));
            if first_atom.is_none() {
                first_atom = Some(AtomLocation {
                    chain_id: atom.chain_id,
                    residue_name: atom.residue_name.clone(),
                    residue_number: atom.residue_number,
                    atom_name: atom.name.clone(),
                });
            }
        }

        Self {
            element_count,
            residue_count: residues.len(),
            chain_count: loci.elements().len(),
            first_atom,
        }
    }

    /// Accumulates `other` into `self`. Counts from different loci are assumed disjoint.
    pub fn add(&mut self, other: &ElementStats) {
        self.element_count += other.element_count;
        self.residue_count += other.residue_count;
        self.chain_count += other.chain_count;
        if self.first_atom.is_none() {
            self.first_atom = other.first_atom.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelOptions {
    /// Only report counts, even for a single atom or residue.
    pub counts_only: bool,
    /// List hierarchy levels from the atom up instead of from the chain down.
    pub reverse: bool,
}

pub const NOTHING_SELECTED: &str = "Nothing Selected";

fn plural(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

/// Formats a human-readable label for selection statistics.
///
/// ```
/// use molsel::core::loci::stats::{element_stats_label, ElementStats, LabelOptions};
///
/// let stats = ElementStats { element_count: 12, residue_count: 3, chain_count: 1, first_atom: None };
/// let label = element_stats_label(&stats, LabelOptions { counts_only: true, reverse: false });
/// assert_eq!(label, "12 atoms, 3 residues, 1 chain");
/// ```
pub fn element_stats_label(stats: &ElementStats, options: LabelOptions) -> String {
    if stats.element_count == 0 {
        return NOTHING_SELECTED.to_string();
    }

    if !options.counts_only && stats.residue_count == 1 {
        if let Some(location) = &stats.first_atom {
            let residue = format!("{} {}", location.residue_name, location.residue_number);
            let last = if stats.element_count == 1 {
                location.atom_name.clone()
            } else {
                plural(stats.element_count, "atom")
            };
            let mut parts = vec![location.chain_id.to_string(), residue, last];
            if options.reverse {
                parts.reverse();
            }
            return parts.join(" | ");
        }
    }

    [
        plural(stats.element_count, "atom"),
        plural(stats.residue_count, "residue"),
        plural(stats.chain_count, "chain"),
    ]
    .join(", ")
}
