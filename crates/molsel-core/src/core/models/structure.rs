use super::atom::Atom;
use super::ids::{ElementIndex, StructureId, UnitId};
use super::unit::Unit;
use nalgebra::Point3;
use std::sync::Arc;

/// The atom table shared by a structure and every snapshot derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub label: String,
    atoms: Vec<Atom>,
}

impl Model {
    pub fn new(label: &str, atoms: Vec<Atom>) -> Self {
        Self {
            label: label.to_string(),
            atoms,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, element: ElementIndex) -> Option<&Atom> {
        self.atoms.get(element as usize)
    }
}

/// An immutable, identity-bearing snapshot of a molecular structure.
///
/// Structures are always handled through `Arc`. A structure built from a model is a *root*;
/// structures derived from it (e.g. the filtered view of a selection) keep a handle to that
/// root and share its identity through [`Structure::root_id`], which is how selections on
/// different snapshots of the same lineage are compared.
#[derive(Debug)]
pub struct Structure {
    id: StructureId,
    root: Option<Arc<Structure>>,
    model: Arc<Model>,
    /// Units sorted by id.
    units: Vec<Unit>,
}

impl Structure {
    /// Builds a root structure with one unit per chain, in order of first appearance.
    pub fn from_model(model: Model) -> Arc<Self> {
        let mut chains: Vec<(char, Vec<ElementIndex>)> = Vec::new();
        for (i, atom) in model.atoms().iter().enumerate() {
            match chains.iter_mut().find(|(id, _)| *id == atom.chain_id) {
                Some((_, elements)) => elements.push(i as ElementIndex),
                None => chains.push((atom.chain_id, vec![i as ElementIndex])),
            }
        }

        let units = chains
            .into_iter()
            .enumerate()
            .map(|(i, (chain_id, elements))| Unit::new(UnitId(i as u32), chain_id, elements))
            .collect();

        Self::with_units(Arc::new(model), units)
    }

    /// Builds a root structure over an existing model with explicit units.
    pub fn with_units(model: Arc<Model>, mut units: Vec<Unit>) -> Arc<Self> {
        units.sort_by_key(|u| u.id);
        Arc::new(Self {
            id: StructureId::next(),
            root: None,
            model,
            units,
        })
    }

    /// Derives a substructure sharing this structure's model and lineage.
    pub fn derive(self: &Arc<Self>, mut units: Vec<Unit>) -> Arc<Self> {
        units.sort_by_key(|u| u.id);
        Arc::new(Self {
            id: StructureId::next(),
            root: Some(self.root()),
            model: Arc::clone(&self.model),
            units,
        })
    }

    /// Creates a new root snapshot with the same units and atoms but moved coordinates.
    ///
    /// This is what a conformer or trajectory frame update produces: a different snapshot
    /// whose layout is compatible with the original.
    pub fn with_positions<F>(&self, position_of: F) -> Arc<Self>
    where
        F: Fn(&Atom) -> Point3<f64>,
    {
        let atoms = self
            .model
            .atoms()
            .iter()
            .map(|atom| Atom {
                position: position_of(atom),
                ..atom.clone()
            })
            .collect();
        Self::with_units(
            Arc::new(Model::new(&self.model.label, atoms)),
            self.units.clone(),
        )
    }

    pub fn id(&self) -> StructureId {
        self.id
    }

    /// Identity of the root this structure was derived from (its own id for a root).
    pub fn root_id(&self) -> StructureId {
        self.root.as_ref().map_or(self.id, |root| root.id)
    }

    /// The root structure of this lineage.
    pub fn root(self: &Arc<Self>) -> Arc<Self> {
        match &self.root {
            Some(root) => Arc::clone(root),
            None => Arc::clone(self),
        }
    }

    pub fn label(&self) -> &str {
        &self.model.label
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units
            .binary_search_by_key(&id, |u| u.id)
            .ok()
            .map(|i| &self.units[i])
    }

    pub fn atom(&self, element: ElementIndex) -> Option<&Atom> {
        self.model.atom(element)
    }

    /// Total number of elements over all units.
    pub fn element_count(&self) -> usize {
        self.units.iter().map(Unit::len).sum()
    }

    /// Cheap layout compatibility check used before remapping selections.
    ///
    /// Two structures are compatible when they have the same units, in the same order, each
    /// covering the same model atom indices. Coordinates are not compared.
    pub fn are_unit_and_indices_equal(a: &Structure, b: &Structure) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }
        a.units.len() == b.units.len()
            && a.units
                .iter()
                .zip(&b.units)
                .all(|(ua, ub)| ua.id == ub.id && ua.elements() == ub.elements())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds a structure with one unit per `(chain, residue count)` pair. Every residue holds
    /// `atoms_per_residue` atoms laid out along the x axis, one Angstrom apart.
    pub(crate) fn linear_structure(
        chains: &[(char, usize)],
        atoms_per_residue: usize,
    ) -> Arc<Structure> {
        let mut atoms = Vec::new();
        let mut x = 0.0;
        for &(chain_id, residues) in chains {
            for residue in 0..residues {
                for a in 0..atoms_per_residue {
                    let name = if a == 0 { "CA".to_string() } else { format!("C{a}") };
                    let atom = Atom::new(&name, chain_id, Point3::new(x, 0.0, 0.0))
                        .with_residue("ALA", residue as isize + 1);
                    atoms.push(atom);
                    x += 1.0;
                }
            }
        }
        Structure::from_model(Model::new("test", atoms))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::linear_structure;
    use super::*;

    #[test]
    fn from_model_groups_atoms_by_chain() {
        let structure = linear_structure(&[('A', 3), ('B', 2)], 2);

        assert_eq!(structure.units().len(), 2);
        assert_eq!(structure.units()[0].chain_id, 'A');
        assert_eq!(structure.units()[0].len(), 6);
        assert_eq!(structure.units()[1].chain_id, 'B');
        assert_eq!(structure.units()[1].elements(), &[6, 7, 8, 9]);
        assert_eq!(structure.element_count(), 10);
        assert_eq!(structure.root_id(), structure.id());
    }

    #[test]
    fn derived_structures_share_root_identity() {
        let structure = linear_structure(&[('A', 2)], 1);
        let sub = structure.derive(vec![Unit::new(UnitId(0), 'A', vec![1])]);
        let sub_of_sub = sub.derive(vec![Unit::new(UnitId(0), 'A', vec![1])]);

        assert_ne!(sub.id(), structure.id());
        assert_eq!(sub.root_id(), structure.id());
        assert_eq!(sub_of_sub.root_id(), structure.id());
        assert!(Arc::ptr_eq(&sub_of_sub.root(), &structure));
    }

    #[test]
    fn unit_lookup_by_id() {
        let structure = linear_structure(&[('A', 1), ('B', 1)], 1);
        assert_eq!(structure.unit(UnitId(1)).unwrap().chain_id, 'B');
        assert!(structure.unit(UnitId(7)).is_none());
    }

    #[test]
    fn moved_coordinates_keep_layout_compatible() {
        let structure = linear_structure(&[('A', 2), ('B', 1)], 2);
        let moved = structure.with_positions(|atom| atom.position + nalgebra::Vector3::y());

        assert_ne!(moved.id(), structure.id());
        assert_ne!(moved.root_id(), structure.root_id());
        assert!(Structure::are_unit_and_indices_equal(&structure, &moved));
        assert_eq!(moved.atom(0).unwrap().position, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn different_layouts_are_not_compatible() {
        let a = linear_structure(&[('A', 2)], 2);
        let b = linear_structure(&[('A', 3)], 2);
        let c = linear_structure(&[('A', 2), ('B', 1)], 2);

        assert!(!Structure::are_unit_and_indices_equal(&a, &b));
        assert!(!Structure::are_unit_and_indices_equal(&a, &c));
    }
}
