pub mod info;
pub mod run;

use crate::error::{CliError, Result};
use molsel::core::io::pdb::PdbFile;
use molsel::core::io::traits::StructureFile;
use molsel::core::models::structure::Structure;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn load_structure(path: &Path) -> Result<Arc<Structure>> {
    let model = PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let structure = Structure::from_model(model);
    info!(
        "Loaded structure '{}' ({} atoms, {} chains) from {:?}.",
        structure.label(),
        structure.element_count(),
        structure.units().len(),
        path
    );
    Ok(structure)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fmt::Write;

    /// PDB text with `residues` two-atom ALA residues per chain.
    pub(crate) fn pdb_text(chains: &[(char, usize)]) -> String {
        let mut text = String::new();
        let mut serial = 1;
        for &(chain, residues) in chains {
            for residue in 1..=residues {
                for (name, element) in [("N", "N"), ("CA", "C")] {
                    let x = serial as f64;
                    writeln!(
                        text,
                        "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00          {:>2}",
                        serial, name, "ALA", chain, residue, x, 0.0, 0.0, element
                    )
                    .unwrap();
                    serial += 1;
                }
            }
            writeln!(text, "TER").unwrap();
        }
        writeln!(text, "END").unwrap();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::pdb_text;
    use super::*;

    #[test]
    fn loads_generated_pdb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.pdb");
        std::fs::write(&path, pdb_text(&[('A', 3), ('B', 2)])).unwrap();

        let structure = load_structure(&path).unwrap();
        assert_eq!(structure.label(), "demo");
        assert_eq!(structure.element_count(), 10);
        assert_eq!(structure.units().len(), 2);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let result = load_structure(Path::new("/nonexistent/structure.pdb"));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
