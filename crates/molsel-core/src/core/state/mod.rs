//! # State Module
//!
//! A reference-keyed object graph standing in for the viewer's state tree, and the interfaces
//! the selection engine consumes from it.
//!
//! - [`object`] - Objects stored in the graph and their references
//! - [`graph`] - [`StateGraph`](graph::StateGraph): storage plus removal/update notifications

pub mod graph;
pub mod object;

use crate::core::models::structure::Structure;
use object::StateRef;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Resolves any structure snapshot to the reference of the graph cell that owns its lineage.
pub trait SubstructureParent {
    fn parent_ref(&self, structure: &Structure) -> Option<StateRef>;
}

/// Lists the structures selection queries should run against.
pub trait ApplicableStructures {
    /// Currently displayable structures, in graph order.
    fn applicable_structures(&self) -> Vec<Arc<Structure>>;

    /// Whether `structure` is still held by the graph.
    fn is_live(&self, structure: &Structure) -> bool;
}

impl std::fmt::Debug for dyn SubstructureParent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SubstructureParent")
    }
}

impl<T: SubstructureParent + ?Sized> SubstructureParent for RefCell<T> {
    fn parent_ref(&self, structure: &Structure) -> Option<StateRef> {
        self.borrow().parent_ref(structure)
    }
}

impl<T: SubstructureParent + ?Sized> SubstructureParent for Rc<T> {
    fn parent_ref(&self, structure: &Structure) -> Option<StateRef> {
        (**self).parent_ref(structure)
    }
}

impl<T: ApplicableStructures + ?Sized> ApplicableStructures for RefCell<T> {
    fn applicable_structures(&self) -> Vec<Arc<Structure>> {
        self.borrow().applicable_structures()
    }

    fn is_live(&self, structure: &Structure) -> bool {
        self.borrow().is_live(structure)
    }
}

impl<T: ApplicableStructures + ?Sized> ApplicableStructures for Rc<T> {
    fn applicable_structures(&self) -> Vec<Arc<Structure>> {
        (**self).applicable_structures()
    }

    fn is_live(&self, structure: &Structure) -> bool {
        (**self).is_live(structure)
    }
}
