use crate::core::loci::ElementLoci;
use crate::core::models::structure::Structure;
use std::fmt;
use std::sync::Arc;

/// Stable key of a cell in the state graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateRef(String);

impl StateRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named selection stored as a graph object.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSetEntry {
    pub key: String,
    pub loci: ElementLoci,
}

/// Payload of a state graph cell.
#[derive(Debug, Clone)]
pub enum StateObject {
    Structure(Arc<Structure>),
    Selections(Arc<Vec<SelectionSetEntry>>),
}

impl StateObject {
    pub fn as_structure(&self) -> Option<&Arc<Structure>> {
        match self {
            StateObject::Structure(s) => Some(s),
            StateObject::Selections(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StateObject::Structure(_) => "structure",
            StateObject::Selections(_) => "selections",
        }
    }

    /// Whether two objects wrap the same underlying data.
    pub fn same_data(&self, other: &StateObject) -> bool {
        match (self, other) {
            (StateObject::Structure(a), StateObject::Structure(b)) => {
                Arc::ptr_eq(a, b) || a.id() == b.id()
            }
            (StateObject::Selections(a), StateObject::Selections(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
