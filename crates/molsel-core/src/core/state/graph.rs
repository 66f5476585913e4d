use super::object::{StateObject, StateRef};
use super::{ApplicableStructures, SubstructureParent};
use crate::core::models::structure::Structure;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

new_key_type! {
    pub struct CellId;
}

/// Notification published by the [`StateGraph`] after a cell changes.
#[derive(Debug, Clone)]
pub enum StateEvent {
    ObjectCreated {
        state_ref: StateRef,
    },
    ObjectUpdated {
        state_ref: StateRef,
        old: Option<StateObject>,
        new: StateObject,
    },
    ObjectRemoved {
        state_ref: StateRef,
        object: StateObject,
    },
}

pub type StateCallback = Box<dyn Fn(&StateEvent)>;

#[derive(Debug)]
struct Cell {
    state_ref: StateRef,
    object: StateObject,
}

/// Reference-keyed storage of structures and selection sets.
///
/// Cells keep their insertion order. Subscribers are called synchronously after each change,
/// once the graph itself is consistent again.
#[derive(Default)]
pub struct StateGraph {
    cells: SlotMap<CellId, Cell>,
    ref_map: HashMap<StateRef, CellId>,
    order: Vec<CellId>,
    subscribers: Vec<StateCallback>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: StateCallback) {
        self.subscribers.push(callback);
    }

    fn publish(&self, event: StateEvent) {
        trace!("State event: {:?}", event);
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Stores `object` under `state_ref`, replacing (and reporting) any previous object.
    pub fn set(&mut self, state_ref: impl Into<StateRef>, object: StateObject) -> CellId {
        let state_ref = state_ref.into();
        if let Some(&id) = self.ref_map.get(&state_ref) {
            let old = std::mem::replace(&mut self.cells[id].object, object.clone());
            self.publish(StateEvent::ObjectUpdated {
                state_ref,
                old: Some(old),
                new: object,
            });
            return id;
        }

        let id = self.cells.insert(Cell {
            state_ref: state_ref.clone(),
            object,
        });
        self.ref_map.insert(state_ref.clone(), id);
        self.order.push(id);
        self.publish(StateEvent::ObjectCreated { state_ref });
        id
    }

    pub fn remove(&mut self, state_ref: &StateRef) -> Option<StateObject> {
        let id = self.ref_map.remove(state_ref)?;
        self.order.retain(|&cell| cell != id);
        let cell = self.cells.remove(id)?;
        self.publish(StateEvent::ObjectRemoved {
            state_ref: cell.state_ref,
            object: cell.object.clone(),
        });
        Some(cell.object)
    }

    pub fn get(&self, state_ref: &StateRef) -> Option<&StateObject> {
        self.ref_map
            .get(state_ref)
            .and_then(|&id| self.cells.get(id))
            .map(|cell| &cell.object)
    }

    pub fn contains(&self, state_ref: &StateRef) -> bool {
        self.ref_map.contains_key(state_ref)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateRef, &StateObject)> {
        self.order
            .iter()
            .filter_map(|&id| self.cells.get(id))
            .map(|cell| (&cell.state_ref, &cell.object))
    }

    fn structures(&self) -> impl Iterator<Item = (&StateRef, &Arc<Structure>)> {
        self.iter()
            .filter_map(|(r, obj)| obj.as_structure().map(|s| (r, s)))
    }
}

impl SubstructureParent for StateGraph {
    fn parent_ref(&self, structure: &Structure) -> Option<StateRef> {
        self.structures()
            .find(|(_, s)| s.root_id() == structure.root_id())
            .map(|(r, _)| r.clone())
    }
}

impl ApplicableStructures for StateGraph {
    fn applicable_structures(&self) -> Vec<Arc<Structure>> {
        self.structures().map(|(_, s)| Arc::clone(s)).collect()
    }

    fn is_live(&self, structure: &Structure) -> bool {
        self.structures().any(|(_, s)| s.id() == structure.id())
    }
}
