use nalgebra::Point3;

/// Represents an atom record in a molecular model.
///
/// Atoms are stored once per [`Model`](super::structure::Model) and shared by every structure
/// snapshot derived from it; units refer to them through their index in the model's atom table.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The chemical element symbol (e.g., "C", "FE").
    pub element: String,
    /// The three-letter name of the parent residue (e.g., "ALA").
    pub residue_name: String,
    /// The sequence number of the parent residue.
    pub residue_number: isize,
    /// The single-character identifier of the parent chain.
    pub chain_id: char,
    /// Whether the atom came from a `HETATM` record.
    pub is_hetero: bool,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` with default metadata.
    ///
    /// The element symbol is guessed from the first alphabetic character of the atom name;
    /// residue fields start empty and can be filled in afterward.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `chain_id` - The chain the atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, chain_id: char, position: Point3<f64>) -> Self {
        let element = name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_string())
            .unwrap_or_default();
        Self {
            serial: 0,
            name: name.to_string(),
            element,
            residue_name: String::new(),
            residue_number: 0,
            chain_id,
            is_hetero: false,
            position,
        }
    }

    /// Sets the residue this atom belongs to.
    pub fn with_residue(mut self, residue_name: &str, residue_number: isize) -> Self {
        self.residue_name = residue_name.to_string();
        self.residue_number = residue_number;
        self
    }

    /// Overrides the element symbol guessed from the atom name.
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    /// Key identifying the residue this atom belongs to within its chain.
    pub fn residue_key(&self) -> (char, isize, &str) {
        (self.chain_id, self.residue_number, self.residue_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_guesses_element_from_name() {
        let atom = Atom::new("CA", 'A', Point3::origin());
        assert_eq!(atom.element, "C");

        let atom = Atom::new("1HB", 'A', Point3::origin());
        assert_eq!(atom.element, "H");
    }

    #[test]
    fn builder_methods_set_residue_and_element() {
        let atom = Atom::new("FE", 'B', Point3::new(1.0, 2.0, 3.0))
            .with_residue("HEM", 401)
            .with_element("FE");

        assert_eq!(atom.element, "FE");
        assert_eq!(atom.residue_key(), ('B', 401, "HEM"));
    }
}
