use crate::core::models::ids::StructureId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Selection task was cancelled")]
    Cancelled,

    #[error("Selection query '{query}' failed on {structure}: {reason}")]
    Query {
        query: String,
        structure: StructureId,
        reason: String,
    },
}
