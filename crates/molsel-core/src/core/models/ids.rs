use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STRUCTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a single structure snapshot.
///
/// Every constructed [`Structure`](super::structure::Structure) receives a fresh id, so two
/// snapshots never share one even if their contents are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(u64);

impl StructureId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STRUCTURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "structure#{}", self.0)
    }
}

/// Stable unit identifier, preserved across compatible structure snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Index of an atom inside the model's atom table.
pub type ElementIndex = u32;

/// Position of an element inside a unit's element list.
pub type UnitIndex = u32;
