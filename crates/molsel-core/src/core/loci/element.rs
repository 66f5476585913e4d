use super::ordered_set::OrderedSet;
use crate::core::geometry::boundary::Boundary;
use crate::core::models::atom::Atom;
use crate::core::models::ids::{ElementIndex, UnitId, UnitIndex};
use crate::core::models::structure::Structure;
use crate::core::models::unit::Unit;
use nalgebra::Point3;
use std::borrow::Cow;
use std::sync::Arc;

/// The selected indices of a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitElements {
    pub unit: UnitId,
    pub indices: OrderedSet,
}

impl UnitElements {
    pub fn new(unit: UnitId, indices: OrderedSet) -> Self {
        Self { unit, indices }
    }
}

/// A selection of elements of one structure snapshot, grouped by unit.
///
/// Groups are kept sorted by unit id, never empty, and only refer to units (and unit indices)
/// that exist in the structure. Two loci are equal when they are tied to the same structure
/// snapshot and select the same indices.
#[derive(Debug, Clone)]
pub struct ElementLoci {
    structure: Arc<Structure>,
    elements: Vec<UnitElements>,
}

impl PartialEq for ElementLoci {
    fn eq(&self, other: &Self) -> bool {
        self.structure.id() == other.structure.id() && self.elements == other.elements
    }
}

impl Eq for ElementLoci {}

impl ElementLoci {
    pub fn new(structure: Arc<Structure>, groups: Vec<UnitElements>) -> Self {
        let mut elements: Vec<UnitElements> = Vec::with_capacity(groups.len());
        for group in groups {
            let Some(unit) = structure.unit(group.unit) else {
                continue;
            };
            let bound = unit.len() as UnitIndex;
            let indices: OrderedSet = group.indices.iter().filter(|&i| i < bound).collect();
            if indices.is_empty() {
                continue;
            }
            match elements.iter_mut().find(|e| e.unit == group.unit) {
                Some(existing) => existing.indices = existing.indices.union(&indices),
                None => elements.push(UnitElements::new(group.unit, indices)),
            }
        }
        elements.sort_by_key(|e| e.unit);
        Self {
            structure,
            elements,
        }
    }

    pub fn empty(structure: Arc<Structure>) -> Self {
        Self {
            structure,
            elements: Vec::new(),
        }
    }

    /// Selects every element of every unit.
    pub fn whole(structure: Arc<Structure>) -> Self {
        let elements = structure
            .units()
            .iter()
            .filter(|u| !u.is_empty())
            .map(|u| UnitElements::new(u.id, OrderedSet::of_range(0, u.len() as UnitIndex - 1)))
            .collect();
        Self {
            structure,
            elements,
        }
    }

    /// Selects the given unit indices of a single unit.
    pub fn of_unit(structure: Arc<Structure>, unit: UnitId, indices: &[UnitIndex]) -> Self {
        Self::new(
            structure,
            vec![UnitElements::new(unit, OrderedSet::new(indices.to_vec()))],
        )
    }

    pub fn structure(&self) -> &Arc<Structure> {
        &self.structure
    }

    pub fn elements(&self) -> &[UnitElements] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of selected elements.
    pub fn size(&self) -> usize {
        self.elements.iter().map(|e| e.indices.len()).sum()
    }

    /// The group selecting elements of `unit`, if any.
    pub fn group(&self, unit: UnitId) -> Option<&UnitElements> {
        self.elements.iter().find(|e| e.unit == unit)
    }

    /// Brings `other` onto this loci's structure so indices can be combined.
    fn aligned<'a>(&self, other: &'a ElementLoci) -> Cow<'a, ElementLoci> {
        if other.structure.id() == self.structure.id() {
            Cow::Borrowed(other)
        } else {
            Cow::Owned(other.remap(&self.structure))
        }
    }

    pub fn union(&self, other: &ElementLoci) -> ElementLoci {
        let other = self.aligned(other);
        let mut groups = self.elements.clone();
        for group in &other.elements {
            match groups.iter_mut().find(|g| g.unit == group.unit) {
                Some(g) => g.indices = g.indices.union(&group.indices),
                None => groups.push(group.clone()),
            }
        }
        groups.sort_by_key(|g| g.unit);
        Self {
            structure: Arc::clone(&self.structure),
            elements: groups,
        }
    }

    pub fn subtract(&self, other: &ElementLoci) -> ElementLoci {
        let other = self.aligned(other);
        let elements = self
            .elements
            .iter()
            .filter_map(|g| {
                let indices = match other.group(g.unit) {
                    Some(o) => g.indices.subtract(&o.indices),
                    None => g.indices.clone(),
                };
                (!indices.is_empty()).then(|| UnitElements::new(g.unit, indices))
            })
            .collect();
        Self {
            structure: Arc::clone(&self.structure),
            elements,
        }
    }

    pub fn intersect(&self, other: &ElementLoci) -> ElementLoci {
        let other = self.aligned(other);
        let elements = self
            .elements
            .iter()
            .filter_map(|g| {
                let o = other.group(g.unit)?;
                let indices = g.indices.intersect(&o.indices);
                (!indices.is_empty()).then(|| UnitElements::new(g.unit, indices))
            })
            .collect();
        Self {
            structure: Arc::clone(&self.structure),
            elements,
        }
    }

    /// Whether every element of `other` is selected by `self`.
    pub fn is_superset_of(&self, other: &ElementLoci) -> bool {
        let other = self.aligned(other);
        other.elements.iter().all(|o| {
            self.group(o.unit)
                .is_some_and(|g| g.indices.is_superset_of(&o.indices))
        })
    }

    /// Re-expresses this selection on another snapshot sharing the same model atoms.
    ///
    /// Each selected index is translated to its model atom and looked up in the unit with the
    /// same id in `target`; atoms absent from the target are dropped.
    pub fn remap(&self, target: &Arc<Structure>) -> ElementLoci {
        if target.id() == self.structure.id() {
            return self.clone();
        }
        let groups = self
            .elements
            .iter()
            .filter_map(|g| {
                let source = self.structure.unit(g.unit)?;
                let dest = target.unit(g.unit)?;
                let indices: OrderedSet = g
                    .indices
                    .iter()
                    .filter_map(|i| source.element(i).and_then(|e| dest.index_of(e)))
                    .collect();
                Some(UnitElements::new(g.unit, indices))
            })
            .collect();
        Self::new(Arc::clone(target), groups)
    }

    /// Derives the substructure containing only the selected elements.
    pub fn to_structure(&self) -> Arc<Structure> {
        let units = self
            .elements
            .iter()
            .filter_map(|g| {
                let unit = self.structure.unit(g.unit)?;
                let elements = g.indices.iter().filter_map(|i| unit.element(i)).collect();
                Some(Unit::new(unit.id, unit.chain_id, elements))
            })
            .collect();
        self.structure.derive(units)
    }

    /// Iterates `(unit, unit index, model atom index)` for every selected element.
    pub fn element_indices(&self) -> impl Iterator<Item = (UnitId, UnitIndex, ElementIndex)> + '_ {
        self.elements.iter().flat_map(move |g| {
            let unit = self.structure.unit(g.unit);
            g.indices.iter().filter_map(move |i| {
                unit.and_then(|u| u.element(i))
                    .map(|element| (g.unit, i, element))
            })
        })
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.element_indices()
            .filter_map(|(_, _, element)| self.structure.atom(element))
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.atoms().map(|atom| atom.position)
    }

    /// Writes selected positions as `x, y, z` triples into `buffer` starting at `offset`.
    ///
    /// Returns the number of positions written; stops early if the buffer is too short.
    pub fn to_positions_array(&self, buffer: &mut [f64], offset: usize) -> usize {
        let start = offset.min(buffer.len());
        let mut written = 0;
        for (slot, p) in buffer[start..]
            .chunks_exact_mut(3)
            .zip(self.positions())
        {
            slot.copy_from_slice(&[p.x, p.y, p.z]);
            written += 1;
        }
        written
    }

    pub fn boundary(&self) -> Boundary {
        let positions: Vec<Point3<f64>> = self.positions().collect();
        Boundary::of_positions(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::test_support::linear_structure;

    fn indices(loci: &ElementLoci, unit: u32) -> Vec<UnitIndex> {
        loci.group(UnitId(unit))
            .map(|g| g.indices.as_slice().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn construction_drops_empty_and_unknown_groups() {
        let s = linear_structure(&[('A', 10)], 1);
        let loci = ElementLoci::new(
            Arc::clone(&s),
            vec![
                UnitElements::new(UnitId(0), OrderedSet::new(vec![1, 2, 42])),
                UnitElements::new(UnitId(5), OrderedSet::new(vec![1])),
                UnitElements::new(UnitId(0), OrderedSet::new(vec![3])),
            ],
        );
        assert_eq!(loci.elements().len(), 1);
        assert_eq!(indices(&loci, 0), vec![1, 2, 3]);
        assert!(ElementLoci::new(s, vec![]).is_empty());
    }

    #[test]
    fn algebra_follows_set_semantics() {
        let s = linear_structure(&[('A', 10)], 1);
        let l = |xs: &[UnitIndex]| ElementLoci::of_unit(Arc::clone(&s), UnitId(0), xs);

        let sel = l(&[2, 3, 4]).union(&l(&[6, 7]));
        assert_eq!(indices(&sel, 0), vec![2, 3, 4, 6, 7]);

        let sel = sel.intersect(&l(&[3, 4, 6]));
        assert_eq!(indices(&sel, 0), vec![3, 4, 6]);

        let sel = sel.subtract(&l(&[4]));
        assert_eq!(indices(&sel, 0), vec![3, 6]);
        assert_eq!(sel.size(), 2);

        assert!(sel.subtract(&l(&[3, 6])).is_empty());
    }

    #[test]
    fn equality_requires_same_structure_snapshot() {
        let s = linear_structure(&[('A', 4)], 1);
        let t = linear_structure(&[('A', 4)], 1);

        let a = ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[1, 2]);
        let b = ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[2, 1]);
        let c = ElementLoci::of_unit(t, UnitId(0), &[1, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn superset_test_spans_units() {
        let s = linear_structure(&[('A', 4), ('B', 4)], 1);
        let sel = ElementLoci::whole(Arc::clone(&s)).subtract(&ElementLoci::of_unit(
            Arc::clone(&s),
            UnitId(1),
            &[0],
        ));

        assert!(sel.is_superset_of(&ElementLoci::of_unit(Arc::clone(&s), UnitId(1), &[1, 2])));
        assert!(!sel.is_superset_of(&ElementLoci::of_unit(s, UnitId(1), &[0, 1])));
    }

    #[test]
    fn remap_translates_through_model_atoms() {
        let s = linear_structure(&[('A', 6)], 1);
        let loci = ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[1, 3, 5]);

        let moved = s.with_positions(|a| a.position);
        let remapped = loci.remap(&moved);
        assert_eq!(remapped.structure().id(), moved.id());
        assert_eq!(indices(&remapped, 0), vec![1, 3, 5]);

        // A substructure holding atoms 3..=5 re-indexes them from zero.
        let sub = ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[3, 4, 5]).to_structure();
        let onto_sub = loci.remap(&sub);
        assert_eq!(indices(&onto_sub, 0), vec![0, 2]);
    }

    #[test]
    fn to_structure_keeps_only_selected_atoms() {
        let s = linear_structure(&[('A', 3), ('B', 3)], 1);
        let loci = ElementLoci::of_unit(Arc::clone(&s), UnitId(1), &[0, 2]);
        let sub = loci.to_structure();

        assert_eq!(sub.root_id(), s.id());
        assert_eq!(sub.units().len(), 1);
        assert_eq!(sub.units()[0].elements(), &[3, 5]);
    }

    #[test]
    fn positions_array_is_filled_at_offset() {
        let s = linear_structure(&[('A', 5)], 1);
        let loci = ElementLoci::of_unit(s, UnitId(0), &[1, 4]);
        let mut buffer = vec![-1.0; 9];

        let written = loci.to_positions_array(&mut buffer, 3);

        assert_eq!(written, 2);
        assert_eq!(buffer, vec![-1.0, -1.0, -1.0, 1.0, 0.0, 0.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn union_with_a_substructure_selection_uses_model_atoms() {
        let s = linear_structure(&[('A', 6)], 1);
        let sub = ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[4, 5]).to_structure();
        let pick_on_sub = ElementLoci::of_unit(sub, UnitId(0), &[0]);

        let base = ElementLoci::of_unit(Arc::clone(&s), UnitId(0), &[1]);
        let merged = base.union(&pick_on_sub);

        assert_eq!(merged.structure().id(), s.id());
        assert_eq!(indices(&merged, 0), vec![1, 4]);
    }
}
