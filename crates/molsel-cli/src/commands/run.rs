use super::load_structure;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::report;
use crate::script::{Script, Step, Target};
use molsel::core::loci::Loci;
use molsel::core::models::structure::Structure;
use molsel::core::state::SubstructureParent;
use molsel::core::state::graph::StateGraph;
use molsel::core::state::object::{SelectionSetEntry, StateObject, StateRef};
use molsel::engine::config::{SelectionConfig, SelectionConfigBuilder};
use molsel::engine::history::HistoryAction;
use molsel::engine::manager::{SelectionModifier, StructureSelectionManager};
use molsel::interaction::dispatcher::InteractionDispatcher;
use molsel::interaction::granularity::Granularity;
use molsel::interaction::interactivity::SelectionInteractivity;
use molsel::interaction::query::SelectionQuery;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

const STRUCTURE_REF: &str = "structure";

pub async fn run(args: RunArgs) -> Result<()> {
    let summary = execute(&args).await?;
    println!("{}", summary);
    Ok(())
}

#[instrument(skip_all, fields(script = ?args.script))]
pub async fn execute(args: &RunArgs) -> Result<String> {
    let structure = load_structure(&args.structure)?;
    let mut script = Script::load(&args.script)?;
    if let Some(capacity) = args.history_capacity {
        script.config = SelectionConfigBuilder::new()
            .history_capacity(capacity)
            .boundary_directions(script.config.boundary_directions)
            .build()?;
    }
    info!("Replaying {} script step(s).", script.steps.len());

    let session = Session::new(structure, script.config.clone(), script.granularity);
    for (i, step) in script.steps.iter().enumerate() {
        session.apply(i + 1, step).await?;
    }

    let mut manager = session.manager.borrow_mut();
    Ok(report::render(&mut manager))
}

/// A structure registered in a state graph with a manager and dispatcher attached.
struct Session {
    structure: Arc<Structure>,
    graph: Rc<RefCell<StateGraph>>,
    manager: Rc<RefCell<StructureSelectionManager>>,
    dispatcher: InteractionDispatcher<SelectionInteractivity>,
    token: CancellationToken,
}

impl Session {
    fn new(structure: Arc<Structure>, config: SelectionConfig, granularity: Granularity) -> Self {
        let graph = Rc::new(RefCell::new(StateGraph::new()));
        graph.borrow_mut().set(
            STRUCTURE_REF,
            StateObject::Structure(Arc::clone(&structure)),
        );

        let parents: Rc<dyn SubstructureParent> = graph.clone();
        let manager = Rc::new(RefCell::new(StructureSelectionManager::new(config, parents)));
        StructureSelectionManager::attach(&manager, &mut graph.borrow_mut());
        manager
            .borrow_mut()
            .subscribe(Box::new(|event| debug!("Selection event: {:?}", event)));

        let dispatcher =
            InteractionDispatcher::new(SelectionInteractivity::new(Rc::clone(&manager), granularity));

        Self {
            structure,
            graph,
            manager,
            dispatcher,
            token: CancellationToken::new(),
        }
    }

    fn target_loci(&self, target: &Target) -> Loci {
        Loci::Element(target.to_query().select(&self.structure))
    }

    fn apply_target(&self, modifier: SelectionModifier, target: &Target) {
        let loci = self.target_loci(target);
        self.dispatcher.from_loci(modifier, &loci, target.expand);
    }

    async fn apply(&self, index: usize, step: &Step) -> Result<()> {
        debug!("Step {}: {:?}", index, step);
        match step {
            Step::Add(target) => self.apply_target(SelectionModifier::Add, target),
            Step::Remove(target) => self.apply_target(SelectionModifier::Remove, target),
            Step::Intersect(target) => self.apply_target(SelectionModifier::Intersect, target),
            Step::Set(target) => self.apply_target(SelectionModifier::Set, target),
            Step::Range(target) => {
                let loci = self.target_loci(target);
                let range = self.manager.borrow_mut().try_get_range(&loci);
                let loci = match range {
                    Some(range) => Loci::Element(range),
                    None => {
                        debug!("No range anchor for step {}; adding target as is.", index);
                        loci
                    }
                };
                self.dispatcher
                    .from_loci(SelectionModifier::Add, &loci, target.expand);
            }
            Step::Query {
                modifier,
                chain,
                residue_name,
                atom,
                expand,
            } => {
                let query = Target {
                    chain: *chain,
                    residue_name: residue_name.clone(),
                    atom: atom.clone(),
                    ..Target::default()
                }
                .to_query();
                let dispatched = self
                    .dispatcher
                    .from_selection_query(*modifier, &query, &self.graph, &self.token, *expand)
                    .await?;
                info!(
                    "Query '{}' applied to {} structure(s).",
                    query.label(),
                    dispatched
                );
            }
            Step::Clear => {
                self.manager.borrow_mut().clear();
            }
            Step::Save { name } => self.save(index, name)?,
            Step::Restore { name } => self
                .dispatcher
                .from_selections(&self.graph.borrow(), &StateRef::new(name.as_str())),
            Step::HistoryUp { index: position } => {
                self.modify_history(index, *position, HistoryAction::Up)?
            }
            Step::HistoryDown { index: position } => {
                self.modify_history(index, *position, HistoryAction::Down)?
            }
            Step::HistoryRemove { index: position } => {
                self.modify_history(index, *position, HistoryAction::Remove)?
            }
        }
        Ok(())
    }

    fn save(&self, step: usize, name: &str) -> Result<()> {
        if name == STRUCTURE_REF {
            return Err(CliError::Script {
                step,
                reason: format!("'{}' is reserved for the loaded structure", name),
            });
        }

        let entries: Vec<SelectionSetEntry> = self
            .manager
            .borrow()
            .entries()
            .values()
            .filter(|entry| !entry.selection().is_empty())
            .map(|entry| SelectionSetEntry {
                key: name.to_string(),
                loci: entry.selection().clone(),
            })
            .collect();
        info!("Saving {} selection(s) as '{}'.", entries.len(), name);

        self.graph
            .borrow_mut()
            .set(name, StateObject::Selections(Arc::new(entries)));
        Ok(())
    }

    fn modify_history(&self, step: usize, position: usize, action: HistoryAction) -> Result<()> {
        let mut manager = self.manager.borrow_mut();
        let history = manager.additions_history();
        let id = history
            .get(position)
            .map(|entry| entry.id)
            .ok_or_else(|| CliError::Script {
                step,
                reason: format!(
                    "no history entry at index {} (history holds {})",
                    position,
                    history.len()
                ),
            })?;
        manager.modify_history(id, action, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::pdb_text;
    use std::path::PathBuf;

    struct Workspace {
        _dir: tempfile::TempDir,
        args: RunArgs,
    }

    fn workspace(chains: &[(char, usize)], script: &str) -> Workspace {
        let dir = tempfile::tempdir().unwrap();
        let structure: PathBuf = dir.path().join("demo.pdb");
        let script_path: PathBuf = dir.path().join("steps.toml");
        std::fs::write(&structure, pdb_text(chains)).unwrap();
        std::fs::write(&script_path, script).unwrap();
        Workspace {
            _dir: dir,
            args: RunArgs {
                structure,
                script: script_path,
                history_capacity: None,
            },
        }
    }

    #[tokio::test]
    async fn replays_selection_steps() {
        let ws = workspace(
            &[('A', 5), ('B', 2)],
            r#"
[[step]]
action = "add"
chain = "A"
residues = [1, 2]

[[step]]
action = "remove"
chain = "A"
residues = [2, 2]
atom = "CA"
"#,
        );

        let summary = execute(&ws.args).await.unwrap();
        assert!(summary.contains("Selection: 3 atoms, 2 residues, 1 chain"));
        assert!(summary.contains("Structures: 1, elements: 3"));
        assert!(summary.contains("History:\n  0. 4 atoms, 2 residues, 1 chain"));
        assert!(summary.contains("Bounding box: (1.000, 0.000, 0.000) - (3.000, 0.000, 0.000)"));
    }

    #[tokio::test]
    async fn range_extends_from_last_pick() {
        let ws = workspace(
            &[('A', 6)],
            r#"
[[step]]
action = "add"
chain = "A"
residues = [2, 2]
atom = "CA"

[[step]]
action = "range"
chain = "A"
residues = [5, 5]
atom = "N"
"#,
        );

        let summary = execute(&ws.args).await.unwrap();
        // CA of residue 2 (index 3) through N of residue 5 (index 8).
        assert!(summary.contains("Structures: 1, elements: 6"));
    }

    #[tokio::test]
    async fn query_save_clear_and_restore() {
        let ws = workspace(
            &[('A', 3), ('B', 3)],
            r#"
granularity = "chain"

[[step]]
action = "query"
modifier = "add"
chain = "B"
atom = "CA"

[[step]]
action = "save"
name = "b-alpha"

[[step]]
action = "clear"

[[step]]
action = "add"
chain = "A"
atom = "N"
expand = true

[[step]]
action = "restore"
name = "b-alpha"
"#,
        );

        let summary = execute(&ws.args).await.unwrap();
        // Restored loci are widened to the script's chain granularity.
        assert!(summary.contains("Selection: 6 atoms, 3 residues, 1 chain"));
        assert!(summary.contains("History:\n  0. "));
    }

    #[tokio::test]
    async fn history_steps_validate_index() {
        let ws = workspace(
            &[('A', 3)],
            r#"
[[step]]
action = "add"
chain = "A"
residues = [1, 1]

[[step]]
action = "history-remove"
index = 3
"#,
        );

        let result = execute(&ws.args).await;
        assert!(matches!(result, Err(CliError::Script { step: 2, .. })));
    }

    #[tokio::test]
    async fn history_remove_drops_entry() {
        let ws = workspace(
            &[('A', 3)],
            r#"
[[step]]
action = "add"
residues = [1, 1]

[[step]]
action = "add"
residues = [2, 2]

[[step]]
action = "history-down"
index = 0

[[step]]
action = "history-remove"
index = 0
"#,
        );

        let summary = execute(&ws.args).await.unwrap();
        let history: Vec<&str> = summary
            .lines()
            .filter(|line| line.starts_with("  "))
            .collect();
        assert_eq!(history.len(), 1);
        assert!(summary.contains("Structures: 1, elements: 4"));
    }

    #[tokio::test]
    async fn empty_script_reports_nothing_selected() {
        let ws = workspace(&[('A', 2)], "");
        let summary = execute(&ws.args).await.unwrap();
        assert!(summary.contains("Selection: Nothing Selected"));
        assert!(summary.contains("History: (empty)"));
        assert!(summary.contains("Boundary: (none)"));
        assert!(summary.contains("Principal axes: (none)"));
    }

    #[tokio::test]
    async fn capacity_override_bounds_history() {
        let mut ws = workspace(
            &[('A', 3)],
            r#"
[[step]]
action = "add"
residues = [1, 1]

[[step]]
action = "add"
residues = [2, 2]

[[step]]
action = "add"
residues = [3, 3]
"#,
        );
        ws.args.history_capacity = Some(2);

        let summary = execute(&ws.args).await.unwrap();
        let history = summary.lines().filter(|line| line.starts_with("  ")).count();
        assert_eq!(history, 2);
    }

    #[tokio::test]
    async fn capacity_override_is_validated() {
        let mut ws = workspace(&[('A', 2)], "");
        ws.args.history_capacity = Some(0);
        let result = execute(&ws.args).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
