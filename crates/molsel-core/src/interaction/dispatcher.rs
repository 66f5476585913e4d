use super::interactivity::Interactivity;
use super::query::SelectionQuery;
use crate::core::loci::Loci;
use crate::core::state::ApplicableStructures;
use crate::core::state::graph::StateGraph;
use crate::core::state::object::{StateObject, StateRef};
use crate::engine::error::SelectionError;
use crate::engine::manager::SelectionModifier;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Routes selection intents to an [`Interactivity`] by modifier.
pub struct InteractionDispatcher<I: Interactivity> {
    interactivity: I,
}

impl<I: Interactivity> InteractionDispatcher<I> {
    pub fn new(interactivity: I) -> Self {
        Self { interactivity }
    }

    pub fn interactivity(&self) -> &I {
        &self.interactivity
    }

    pub fn from_loci(&self, modifier: SelectionModifier, loci: &Loci, apply_granularity: bool) {
        match modifier {
            SelectionModifier::Add => self.interactivity.select(loci, apply_granularity),
            SelectionModifier::Remove => self.interactivity.deselect(loci, apply_granularity),
            SelectionModifier::Intersect => {
                self.interactivity.select_join(loci, apply_granularity)
            }
            SelectionModifier::Set => self.interactivity.select_only(loci, apply_granularity),
        }
    }

    /// Evaluates `query` on every applicable structure in turn and applies each result.
    ///
    /// Structures that leave the graph before or during their evaluation are skipped.
    /// Cancellation is checked before each evaluation; selections already applied stay
    /// applied. Returns the number of results dispatched.
    #[instrument(skip_all, fields(query = query.label(), modifier = ?modifier))]
    pub async fn from_selection_query<Q, S>(
        &self,
        modifier: SelectionModifier,
        query: &Q,
        structures: &S,
        token: &CancellationToken,
        apply_granularity: bool,
    ) -> Result<usize, SelectionError>
    where
        Q: SelectionQuery,
        S: ApplicableStructures + ?Sized,
    {
        let mut dispatched = 0;
        for structure in structures.applicable_structures() {
            if token.is_cancelled() {
                debug!("Query cancelled after {} dispatch(es).", dispatched);
                return Err(SelectionError::Cancelled);
            }
            if !structures.is_live(&structure) {
                continue;
            }

            let selection = query.evaluate(&structure).await?;
            if !structures.is_live(&structure) {
                debug!("Structure {} removed during query; skipping.", structure.id());
                continue;
            }

            let loci = Loci::Element(selection.to_loci_with_source_units());
            self.from_loci(modifier, &loci, apply_granularity);
            dispatched += 1;
        }
        Ok(dispatched)
    }

    /// Replaces the current selection with the loci stored in a selection-set object.
    ///
    /// Stored loci are widened with the interactivity's granularity.
    pub fn from_selections(&self, graph: &StateGraph, state_ref: &StateRef) {
        let entries = match graph.get(state_ref) {
            Some(StateObject::Selections(entries)) => entries,
            Some(other) => {
                warn!(
                    "Expected selections at '{}', found {}; ignoring.",
                    state_ref,
                    other.kind()
                );
                return;
            }
            None => {
                warn!("No object at '{}'; ignoring.", state_ref);
                return;
            }
        };

        self.interactivity.clear();
        for entry in entries.iter() {
            self.from_loci(SelectionModifier::Set, &Loci::Element(entry.loci.clone()), true);
        }
    }
}
