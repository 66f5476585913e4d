use crate::error::{CliError, Result};
use molsel::engine::config::SelectionConfig;
use molsel::engine::manager::SelectionModifier;
use molsel::interaction::granularity::Granularity;
use molsel::interaction::query::PredicateQuery;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A selection script: manager settings plus an ordered list of steps.
///
/// ```toml
/// granularity = "residue"
///
/// [config]
/// history-capacity = 8
///
/// [[step]]
/// action = "add"
/// chain = "A"
/// residues = [10, 14]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub config: SelectionConfig,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// Atom filter shared by loci-based steps. Omitted fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Target {
    pub chain: Option<char>,
    /// Inclusive residue number range.
    pub residues: Option<(isize, isize)>,
    pub residue_name: Option<String>,
    pub atom: Option<String>,
    /// Widen the picked atoms with the script's granularity.
    #[serde(default)]
    pub expand: bool,
}

impl Target {
    pub fn to_query(&self) -> PredicateQuery {
        let filters = [
            self.chain.map(PredicateQuery::chain),
            self.residues
                .map(|(first, last)| PredicateQuery::residue_range(first, last)),
            self.residue_name.as_deref().map(PredicateQuery::residue_name),
            self.atom.as_deref().map(PredicateQuery::atom_name),
        ];
        filters
            .into_iter()
            .flatten()
            .reduce(PredicateQuery::and)
            .unwrap_or_else(|| PredicateQuery::new("all", |_| true))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case"
)]
pub enum Step {
    Add(Target),
    Remove(Target),
    Intersect(Target),
    Set(Target),
    /// Extend from the last touched loci to the target, as a shift-click would.
    Range(Target),
    /// Evaluate the target as an asynchronous query over every loaded structure.
    Query {
        modifier: SelectionModifier,
        chain: Option<char>,
        residue_name: Option<String>,
        atom: Option<String>,
        #[serde(default)]
        expand: bool,
    },
    Clear,
    /// Store the current selection as a named selection set.
    Save {
        name: String,
    },
    /// Replace the current selection with a stored selection set.
    Restore {
        name: String,
    },
    HistoryUp {
        index: usize,
    },
    HistoryDown {
        index: usize,
    },
    HistoryRemove {
        index: usize,
    },
}

impl Script {
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading selection script from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        script.config.validate()?;
        Ok(script)
    }
}
