use crate::core::loci::ordered_set::OrderedSet;
use crate::core::loci::{ElementLoci, UnitElements};
use crate::core::models::atom::Atom;
use crate::core::models::ids::UnitIndex;
use crate::core::models::structure::Structure;
use crate::engine::error::SelectionError;
use std::future::Future;
use std::sync::Arc;

/// Result of evaluating a query against one structure.
///
/// The matched elements may live on a derived structure; [`to_loci_with_source_units`]
/// brings them back onto the structure the query ran against.
///
/// [`to_loci_with_source_units`]: Self::to_loci_with_source_units
#[derive(Debug, Clone)]
pub struct StructureSelection {
    source: Arc<Structure>,
    matched: ElementLoci,
}

impl StructureSelection {
    pub fn new(source: Arc<Structure>, matched: ElementLoci) -> Self {
        Self { source, matched }
    }

    pub fn source(&self) -> &Arc<Structure> {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn to_loci_with_source_units(&self) -> ElementLoci {
        if self.matched.structure().id() == self.source.id() {
            self.matched.clone()
        } else {
            self.matched.remap(&self.source)
        }
    }
}

/// A selection expression evaluated asynchronously, one structure at a time.
pub trait SelectionQuery {
    fn label(&self) -> &str;

    fn evaluate(
        &self,
        structure: &Arc<Structure>,
    ) -> impl Future<Output = Result<StructureSelection, SelectionError>>;
}

type AtomPredicate = Box<dyn Fn(&Atom) -> bool>;

/// Selects every atom matching a predicate.
pub struct PredicateQuery {
    label: String,
    predicate: AtomPredicate,
}

impl PredicateQuery {
    pub fn new(label: impl Into<String>, predicate: impl Fn(&Atom) -> bool + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn chain(chain_id: char) -> Self {
        Self::new(format!("chain {chain_id}"), move |atom| atom.chain_id == chain_id)
    }

    pub fn residue_name(name: &str) -> Self {
        let name = name.to_ascii_uppercase();
        Self::new(format!("resn {name}"), move |atom| atom.residue_name == name)
    }

    pub fn atom_name(name: &str) -> Self {
        let name = name.to_ascii_uppercase();
        Self::new(format!("name {name}"), move |atom| atom.name == name)
    }

    /// Residues numbered `first..=last` on any chain.
    pub fn residue_range(first: isize, last: isize) -> Self {
        Self::new(format!("resi {first}-{last}"), move |atom| {
            (first..=last).contains(&atom.residue_number)
        })
    }

    /// Matches atoms accepted by both queries.
    pub fn and(self, other: PredicateQuery) -> Self {
        let label = format!("{} and {}", self.label, other.label);
        let (a, b) = (self.predicate, other.predicate);
        Self::new(label, move |atom| a(atom) && b(atom))
    }

    /// Synchronously collects the matching elements of `structure`.
    pub fn select(&self, structure: &Arc<Structure>) -> ElementLoci {
        let groups = structure
            .units()
            .iter()
            .map(|unit| {
                let indices: OrderedSet = unit
                    .elements()
                    .iter()
                    .enumerate()
                    .filter(|&(_, &element)| {
                        structure
                            .atom(element)
                            .is_some_and(|atom| (self.predicate)(atom))
                    })
                    .map(|(i, _)| i as UnitIndex)
                    .collect();
                UnitElements::new(unit.id, indices)
            })
            .collect();
        ElementLoci::new(Arc::clone(structure), groups)
    }
}

impl SelectionQuery for PredicateQuery {
    fn label(&self) -> &str {
        &self.label
    }

    async fn evaluate(
        &self,
        structure: &Arc<Structure>,
    ) -> Result<StructureSelection, SelectionError> {
        // Give other tasks a chance to run between structures.
        tokio::task::yield_now().await;
        Ok(StructureSelection::new(
            Arc::clone(structure),
            self.select(structure),
        ))
    }
}
