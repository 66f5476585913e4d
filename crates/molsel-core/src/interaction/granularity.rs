use crate::core::loci::ordered_set::OrderedSet;
use crate::core::loci::{ElementLoci, Loci, UnitElements};
use crate::core::models::ids::UnitIndex;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Level to which a raw pick is widened before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    #[default]
    Element,
    Residue,
    Chain,
    Structure,
}

impl Granularity {
    /// Widens `loci` to whole residues, chains or the whole structure.
    ///
    /// Non-element loci are returned unchanged.
    pub fn apply(self, loci: &Loci) -> Loci {
        let Loci::Element(loci) = loci else {
            return loci.clone();
        };
        let expanded = match self {
            Granularity::Element => loci.clone(),
            Granularity::Residue => expand_to_residues(loci),
            Granularity::Chain => expand_to_units(loci),
            Granularity::Structure => ElementLoci::whole(Arc::clone(loci.structure())),
        };
        Loci::Element(expanded)
    }
}

fn expand_to_residues(loci: &ElementLoci) -> ElementLoci {
    let structure = loci.structure();
    let groups = loci
        .elements()
        .iter()
        .filter_map(|group| {
            let unit = structure.unit(group.unit)?;
            let residues: HashSet<_> = group
                .indices
                .iter()
                .filter_map(|i| structure.atom(unit.element(i)?))
                .map(|atom| atom.residue_key())
                .collect();
            let indices: OrderedSet = unit
                .elements()
                .iter()
                .enumerate()
                .filter(|&(_, &element)| {
                    structure
                        .atom(element)
                        .is_some_and(|atom| residues.contains(&atom.residue_key()))
                })
                .map(|(i, _)| i as UnitIndex)
                .collect();
            Some(UnitElements::new(group.unit, indices))
        })
        .collect();
    ElementLoci::new(Arc::clone(structure), groups)
}

fn expand_to_units(loci: &ElementLoci) -> ElementLoci {
    let structure = loci.structure();
    let groups = loci
        .elements()
        .iter()
        .filter_map(|group| {
            let unit = structure.unit(group.unit)?;
            let last = unit.len().checked_sub(1)? as UnitIndex;
            Some(UnitElements::new(group.unit, OrderedSet::of_range(0, last)))
        })
        .collect();
    ElementLoci::new(Arc::clone(structure), groups)
}
