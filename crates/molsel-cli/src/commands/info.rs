use super::load_structure;
use crate::cli::InfoArgs;
use crate::error::Result;
use molsel::core::models::structure::Structure;
use std::collections::HashSet;

pub fn run(args: InfoArgs) -> Result<()> {
    let structure = load_structure(&args.structure)?;
    println!("{}", describe(&structure));
    Ok(())
}

fn describe(structure: &Structure) -> String {
    let mut lines = vec![format!(
        "{}: {} atoms in {} chain(s)",
        structure.label(),
        structure.element_count(),
        structure.units().len()
    )];
    for unit in structure.units() {
        let residues: HashSet<_> = unit
            .elements()
            .iter()
            .filter_map(|&e| structure.atom(e))
            .map(|atom| atom.residue_key())
            .collect();
        lines.push(format!(
            "  chain {}: {} residues, {} atoms",
            unit.chain_id,
            residues.len(),
            unit.len()
        ));
    }
    lines.join("\n")
}
