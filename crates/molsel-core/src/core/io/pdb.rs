use super::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Model;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("No ATOM or HETATM records found")]
    NoAtoms,
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_int(line: usize, value: &str, columns: &'static str) -> Result<isize, PdbError> {
    value.parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidInt {
            columns,
            value: value.into(),
        },
    })
}

fn parse_float(line: usize, value: &str, columns: &'static str) -> Result<f64, PdbError> {
    value.parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.into(),
        },
    })
}

/// Reader for fixed-column PDB coordinate files.
///
/// Only `ATOM`/`HETATM` records of the first model are read. Alternate locations other than
/// the first (blank or `A`) are skipped.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead, label: &str) -> Result<Model, Self::Error> {
        let mut atoms = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {}
                "ENDMDL" => break,
                _ => continue,
            }

            if line.len() < 54 {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            let alt_loc = slice_and_trim(&line, 16, 17);
            if !alt_loc.is_empty() && alt_loc != "A" {
                continue;
            }

            let name = slice_and_trim(&line, 12, 16);
            if name.is_empty() {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::MissingRequiredField { columns: "13-16" },
                });
            }

            let serial_str = slice_and_trim(&line, 6, 11);
            let serial = if serial_str.is_empty() {
                atoms.len() + 1
            } else {
                parse_int(line_num, serial_str, "7-11")? as usize
            };
            let residue_number = parse_int(line_num, slice_and_trim(&line, 22, 26), "23-26")?;
            let x = parse_float(line_num, slice_and_trim(&line, 30, 38), "31-38")?;
            let y = parse_float(line_num, slice_and_trim(&line, 38, 46), "39-46")?;
            let z = parse_float(line_num, slice_and_trim(&line, 46, 54), "47-54")?;
            let chain_id = slice_and_trim(&line, 21, 22).chars().next().unwrap_or('A');

            let mut atom = Atom::new(name, chain_id, Point3::new(x, y, z))
                .with_residue(slice_and_trim(&line, 17, 20), residue_number);
            let element = slice_and_trim(&line, 76, 78);
            if !element.is_empty() {
                atom = atom.with_element(element);
            }
            atom.serial = serial;
            atom.is_hetero = line.starts_with("HETATM");
            atoms.push(atom);
        }

        if atoms.is_empty() {
            return Err(PdbError::NoAtoms);
        }

        debug!("Read {} atoms from PDB input '{}'.", atoms.len(), label);
        Ok(Model::new(label, atoms))
    }
}
