use crate::core::elements;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::{Atom, StructureModel};
use crate::core::models::topology::{Bond, BondKind};
use nalgebra::Point3;
use std::collections::BTreeMap;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of leading lines searched for the atom/bond count line.
pub const HEADER_SCAN_LINES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No atom/bond count line found in the first {HEADER_SCAN_LINES} lines")]
    MalformedHeader,
    #[error("Count line declares zero atoms")]
    EmptyAtomBlock,
}

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Rows the reader had to skip or discard. The reader is lenient on rows, so
/// these counts are the only trace of data that did not make it into the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub declared_atoms: usize,
    pub declared_bonds: usize,
    pub skipped_atom_rows: usize,
    pub skipped_bond_rows: usize,
    pub dropped_bonds: usize,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_atom_rows == 0 && self.skipped_bond_rows == 0 && self.dropped_bonds == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CountLine {
    index: usize,
    atoms: usize,
    bonds: usize,
}

/// Parses the integer prefix of a token, the way a count field with trailing
/// junk (`"3V2000"`) is still read as `3`.
fn leading_int(token: &str) -> Option<usize> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

fn find_count_line(lines: &[&str]) -> Option<CountLine> {
    lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .enumerate()
        .find_map(|(index, line)| {
            let mut tokens = line.split_whitespace();
            let first = tokens.next()?;
            if !first.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let atoms = first.parse().ok()?;
            let bonds = leading_int(tokens.next()?)?;
            Some(CountLine {
                index,
                atoms,
                bonds,
            })
        })
}

/// The declared rows of a block that actually exist in the text.
fn available_rows<'a>(lines: &'a [&'a str], start: usize, declared: usize) -> &'a [&'a str] {
    let present = lines.get(start..).unwrap_or_default();
    &present[..declared.min(present.len())]
}

fn parse_atom_row(line: &str) -> Option<(Point3<f64>, &str)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    let x: f64 = fields[0].parse().ok()?;
    let y: f64 = fields[1].parse().ok()?;
    let z: f64 = fields[2].parse().ok()?;
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return None;
    }
    Some((Point3::new(x, y, z), fields[3]))
}

fn parse_bond_row(line: &str) -> Option<(usize, usize, BondKind)> {
    let mut fields = line.split_whitespace();
    let first: usize = fields.next()?.parse().ok()?;
    let second: usize = fields.next()?.parse().ok()?;
    let kind = fields
        .next()
        .and_then(|code| code.parse::<i64>().ok())
        .map(BondKind::from_code)
        .unwrap_or_default();
    Some((first, second, kind))
}

/// Builds a Hill-order formula (`C`, then `H`, then alphabetical) from atom
/// element symbols.
pub fn hill_formula(atoms: &[Atom]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for atom in atoms {
        *counts.entry(atom.element.as_str()).or_default() += 1;
    }

    let mut ordered: Vec<(&str, usize)> = Vec::with_capacity(counts.len());
    if let Some(carbon) = counts.remove("C") {
        ordered.push(("C", carbon));
        if let Some(hydrogen) = counts.remove("H") {
            ordered.push(("H", hydrogen));
        }
    }
    ordered.extend(counts);

    ordered
        .into_iter()
        .map(|(symbol, n)| {
            if n == 1 {
                symbol.to_string()
            } else {
                format!("{symbol}{n}")
            }
        })
        .collect()
}

/// Interprets structure-file text as a [`StructureModel`].
///
/// The formula and identifier come from the lookup service, not from the file.
/// A blank formula is replaced with the Hill formula of the parsed atoms.
///
/// Atoms are named `"<element>-<n>"` with `n` the 1-based row within the atom
/// block. Bond ordinals refer to the atoms that parsed successfully, in order.
///
/// # Errors
///
/// Returns [`ParseError::MalformedHeader`] when no count line appears within the
/// first [`HEADER_SCAN_LINES`] lines, and [`ParseError::EmptyAtomBlock`] when the
/// count line declares no atoms.
pub fn parse_structure(
    text: &str,
    formula: &str,
    identifier: Option<u64>,
) -> Result<(StructureModel, ParseReport), ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let header = find_count_line(&lines).ok_or(ParseError::MalformedHeader)?;
    if header.atoms == 0 {
        return Err(ParseError::EmptyAtomBlock);
    }
    debug!(
        line = header.index + 1,
        atoms = header.atoms,
        bonds = header.bonds,
        "Found count line."
    );

    let mut report = ParseReport {
        declared_atoms: header.atoms,
        declared_bonds: header.bonds,
        ..ParseReport::default()
    };

    let atom_start = header.index + 1;
    let atom_rows = available_rows(&lines, atom_start, header.atoms);
    let mut atoms = Vec::with_capacity(atom_rows.len());
    for (offset, line) in atom_rows.iter().enumerate() {
        let ordinal = offset + 1;
        match parse_atom_row(line) {
            Some((position, element)) => {
                atoms.push(Atom::new(format!("{element}-{ordinal}"), element, position));
            }
            None => report.skipped_atom_rows += 1,
        }
    }
    // Declared rows past the end of the text count as skipped.
    report.skipped_atom_rows += header.atoms.saturating_sub(atom_rows.len());

    let bond_start = atom_start.saturating_add(header.atoms);
    let bond_rows = available_rows(&lines, bond_start, header.bonds);
    let mut bonds = Vec::with_capacity(bond_rows.len());
    for line in bond_rows {
        let Some((first, second, kind)) = parse_bond_row(line) else {
            report.skipped_bond_rows += 1;
            continue;
        };
        let endpoints = first
            .checked_sub(1)
            .and_then(|i| atoms.get(i))
            .zip(second.checked_sub(1).and_then(|i| atoms.get(i)));
        match endpoints {
            Some((a, b)) => bonds.push(Bond::new(a.id.clone(), b.id.clone(), kind)),
            None => report.dropped_bonds += 1,
        }
    }
    report.skipped_bond_rows += header.bonds.saturating_sub(bond_rows.len());

    if atoms.is_empty() {
        // Every declared row was unreadable; an atomless model cannot be rendered.
        return Err(ParseError::EmptyAtomBlock);
    }

    let styles = atoms
        .iter()
        .map(|atom| (atom.element.clone(), elements::display_style(&atom.element)))
        .collect();

    let formula = if formula.trim().is_empty() {
        hill_formula(&atoms)
    } else {
        formula.to_string()
    };

    if !report.is_clean() {
        warn!(
            skipped_atoms = report.skipped_atom_rows,
            skipped_bonds = report.skipped_bond_rows,
            dropped_bonds = report.dropped_bonds,
            "Structure text contained unusable rows."
        );
    }
    debug!(atoms = atoms.len(), bonds = bonds.len(), "Parsed structure.");

    Ok((
        StructureModel::from_parts(formula, identifier, styles, atoms, bonds),
        report,
    ))
}

/// MDL SDF/MOL V2000 reader and writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdfFile {
    pub formula: String,
    pub identifier: Option<u64>,
}

impl SdfFile {
    pub fn new(formula: impl Into<String>, identifier: Option<u64>) -> Self {
        Self {
            formula: formula.into(),
            identifier,
        }
    }
}

impl StructureFile for SdfFile {
    type Metadata = ParseReport;
    type Error = SdfError;

    fn read_str(&self, text: &str) -> Result<(StructureModel, ParseReport), SdfError> {
        Ok(parse_structure(text, &self.formula, self.identifier)?)
    }

    fn write_to(&self, model: &StructureModel, writer: &mut impl Write) -> Result<(), SdfError> {
        let ordinals: BTreeMap<&str, usize> = model
            .atoms()
            .iter()
            .enumerate()
            .map(|(i, atom)| (atom.id.as_str(), i + 1))
            .collect();
        let bonds: Vec<(usize, usize, u8)> = model
            .bonds()
            .iter()
            .filter_map(|bond| {
                let code = bond.kind.code()?;
                Some((
                    *ordinals.get(bond.atom1.as_str())?,
                    *ordinals.get(bond.atom2.as_str())?,
                    code,
                ))
            })
            .collect();

        writeln!(writer, "{}", model.formula())?;
        writeln!(writer, "  molviz")?;
        match model.identifier() {
            Some(cid) => writeln!(writer, "{cid}")?,
            None => writeln!(writer)?,
        }
        writeln!(
            writer,
            "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
            model.atoms().len(),
            bonds.len()
        )?;
        for atom in model.atoms() {
            let p = atom.position;
            writeln!(
                writer,
                "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
                p.x, p.y, p.z, atom.element
            )?;
        }
        for (first, second, code) in bonds {
            writeln!(writer, "{first:>3}{second:>3}{code:>3}  0  0  0  0")?;
        }
        writeln!(writer, "M  END")?;
        writeln!(writer, "$$$$")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate_model;

    const WATER_SDF: &str = "962
  -OEChem-01012512003D

  3  2  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
    0.2774    0.8929    0.2544 H   0  0  0  0  0  0  0  0  0  0  0  0
    0.6068   -0.2383   -0.7169 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
  1  3  1  0  0  0  0
M  END
$$$$
";

    const CO2_SDF: &str = "280
  -OEChem-01012512003D

  3  2  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.1600    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
   -1.1600    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  2  0  0  0  0
  1  3  2  0  0  0  0
M  END
";

    mod parsing {
        use super::*;

        #[test]
        fn parses_water() {
            let (model, report) = parse_structure(WATER_SDF, "H2O", Some(962)).unwrap();
            assert_eq!(model.formula(), "H2O");
            assert_eq!(model.identifier(), Some(962));
            let ids: Vec<&str> = model.atoms().iter().map(|a| a.id.as_str()).collect();
            assert_eq!(ids, ["O-1", "H-2", "H-3"]);
            assert_eq!(model.bonds().len(), 2);
            assert_eq!(model.bonds()[1], Bond::new("O-1", "H-3", BondKind::Single));
            assert!(report.is_clean());
            assert_eq!(report.declared_atoms, 3);
            assert_eq!(report.declared_bonds, 2);
        }

        #[test]
        fn element_styles_come_from_the_table_at_half_radius() {
            let (model, _) = parse_structure(WATER_SDF, "H2O", None).unwrap();
            assert_eq!(model.elements().len(), 2);
            assert!((model.elements()["O"].radius - 0.34).abs() < 1e-12);
            assert!((model.elements()["H"].radius - 0.15).abs() < 1e-12);
        }

        #[test]
        fn bond_codes_map_to_kinds() {
            let (model, _) = parse_structure(CO2_SDF, "CO2", Some(280)).unwrap();
            assert!(model.bonds().iter().all(|b| b.kind == BondKind::Double));

            let text = CO2_SDF.replace("  1  3  2", "  1  3  3").replace("  1  2  2", "  1  2  4");
            let (model, _) = parse_structure(&text, "CO2", None).unwrap();
            assert_eq!(model.bonds()[0].kind, BondKind::Single);
            assert_eq!(model.bonds()[1].kind, BondKind::Triple);
        }

        #[test]
        fn non_numeric_bond_code_is_single() {
            let text = "\n\n\n2 1\n0 0 0 C\n1 0 0 O\n1 2 x\n";
            let (model, report) = parse_structure(text, "CO", None).unwrap();
            assert_eq!(model.bonds()[0].kind, BondKind::Single);
            assert!(report.is_clean());
        }

        #[test]
        fn missing_count_line_is_malformed_header() {
            let text = "title\nprogram\ncomment\nnot a count line\n";
            assert_eq!(
                parse_structure(text, "X", None).unwrap_err(),
                ParseError::MalformedHeader
            );
        }

        #[test]
        fn count_line_after_the_first_ten_lines_is_not_found() {
            let mut text = "filler\n".repeat(10);
            text.push_str("1 0\n0 0 0 C\n");
            assert_eq!(
                parse_structure(&text, "C", None).unwrap_err(),
                ParseError::MalformedHeader
            );
        }

        #[test]
        fn zero_atoms_is_an_empty_atom_block() {
            let text = "x\ny\nz\n  0  0  0     0  0  0  0  0  0999 V2000\nM  END\n";
            assert_eq!(
                parse_structure(text, "X", None).unwrap_err(),
                ParseError::EmptyAtomBlock
            );
        }

        #[test]
        fn all_rows_unreadable_is_an_empty_atom_block() {
            let text = "\n\n\n2 0\ngarbage\nmore garbage\n";
            assert_eq!(
                parse_structure(text, "X", None).unwrap_err(),
                ParseError::EmptyAtomBlock
            );
        }

        #[test]
        fn malformed_atom_rows_are_skipped_and_counted() {
            let text = WATER_SDF.replace("    0.2774    0.8929    0.2544 H", "    bad    0.8929    0.2544 H");
            let (model, report) = parse_structure(&text, "H2O", None).unwrap();
            let ids: Vec<&str> = model.atoms().iter().map(|a| a.id.as_str()).collect();
            assert_eq!(ids, ["O-1", "H-3"]);
            assert_eq!(report.skipped_atom_rows, 1);
            // Ordinals index the compacted atom list: "1 3" now points past the end.
            assert_eq!(model.bonds().len(), 1);
            assert_eq!(model.bonds()[0], Bond::new("O-1", "H-3", BondKind::Single));
            assert_eq!(report.dropped_bonds, 1);
        }

        #[test]
        fn out_of_range_bonds_are_dropped() {
            let text = WATER_SDF.replace("  1  3  1", "  1  9  1").replace("  1  2  1", "  0  2  1");
            let (model, report) = parse_structure(&text, "H2O", None).unwrap();
            assert_eq!(model.atoms().len(), 3);
            assert!(model.bonds().is_empty());
            assert_eq!(report.dropped_bonds, 2);
        }

        #[test]
        fn truncated_blocks_are_counted() {
            let text = "\n\n\n3 2\n0 0 0 C\n1 0 0 C\n";
            let (model, report) = parse_structure(text, "C2", None).unwrap();
            assert_eq!(model.atoms().len(), 2);
            assert_eq!(report.skipped_atom_rows, 1);
            assert_eq!(report.skipped_bond_rows, 2);
        }

        #[test]
        fn huge_atom_count_reads_only_present_rows() {
            let text = "\n\n\n18446744073709551615 0\n0 0 0 C\n";
            let (model, report) = parse_structure(text, "C", None).unwrap();
            assert_eq!(model.atoms().len(), 1);
            assert!(model.bonds().is_empty());
            assert_eq!(report.declared_atoms, usize::MAX);
            assert_eq!(report.skipped_atom_rows, usize::MAX - 1);
            assert_eq!(report.skipped_bond_rows, 0);
        }

        #[test]
        fn huge_bond_count_reads_only_present_rows() {
            let text = "\n\n\n1 18446744073709551615\n0 0 0 C\n";
            let (model, report) = parse_structure(text, "C", None).unwrap();
            assert_eq!(model.atoms().len(), 1);
            assert!(model.bonds().is_empty());
            assert_eq!(report.skipped_atom_rows, 0);
            assert_eq!(report.skipped_bond_rows, usize::MAX);
        }

        #[test]
        fn bond_rows_without_two_ordinals_are_skipped() {
            let text = WATER_SDF.replace("  1  3  1  0  0  0  0", "M  CHG  1");
            let (model, report) = parse_structure(&text, "H2O", None).unwrap();
            assert_eq!(model.bonds().len(), 1);
            assert_eq!(report.skipped_bond_rows, 1);
        }

        #[test]
        fn unknown_elements_get_the_fallback_style() {
            let text = "\n\n\n2 1\n0 0 0 Xx\n1 0 0 C\n1 2 1\n";
            let (model, _) = parse_structure(text, "CXx", None).unwrap();
            assert_eq!(model.elements()["Xx"], elements::fallback_style());
            assert_eq!(model.atoms()[0].id, "Xx-1");
        }

        #[test]
        fn blank_formula_is_replaced_by_hill_formula() {
            let (model, _) = parse_structure(WATER_SDF, "  ", None).unwrap();
            assert_eq!(model.formula(), "H2O");
        }

        #[test]
        fn parsed_models_revalidate() {
            for text in [WATER_SDF, CO2_SDF] {
                let (model, _) = parse_structure(text, "F", None).unwrap();
                assert_eq!(validate_model(&model), Ok(()));
            }
        }
    }

    mod formula {
        use super::*;

        fn atoms(symbols: &[&str]) -> Vec<Atom> {
            symbols
                .iter()
                .enumerate()
                .map(|(i, s)| Atom::new(format!("{s}-{i}"), *s, Point3::origin()))
                .collect()
        }

        #[test]
        fn carbon_and_hydrogen_lead() {
            assert_eq!(hill_formula(&atoms(&["O", "C", "H", "H", "H", "H", "C", "N"])), "C2H4NO");
        }

        #[test]
        fn without_carbon_everything_is_alphabetical() {
            assert_eq!(hill_formula(&atoms(&["O", "H", "H"])), "H2O");
            assert_eq!(hill_formula(&atoms(&["N", "H", "H", "H"])), "H3N");
        }
    }

    mod writing {
        use super::*;

        #[test]
        fn written_text_reads_back_to_the_same_structure() {
            let (model, _) = parse_structure(CO2_SDF, "CO2", Some(280)).unwrap();
            let mut buffer = Vec::new();
            SdfFile::default().write_to(&model, &mut buffer).unwrap();
            let text = String::from_utf8(buffer).unwrap();

            let (reread, report) = SdfFile::new("CO2", Some(280)).read_str(&text).unwrap();
            assert!(report.is_clean());
            assert_eq!(reread.atoms(), model.atoms());
            assert_eq!(reread.bonds(), model.bonds());
        }

        #[test]
        fn layout_follows_v2000_columns() {
            let (model, _) = parse_structure(WATER_SDF, "H2O", Some(962)).unwrap();
            let mut buffer = Vec::new();
            SdfFile::default().write_to(&model, &mut buffer).unwrap();
            let text = String::from_utf8(buffer).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines[0], "H2O");
            assert_eq!(lines[2], "962");
            assert!(lines[3].starts_with("  3  2"));
            assert!(lines[3].ends_with("V2000"));
            assert!(lines[5].starts_with("    0.2774    0.8929    0.2544 H  "));
            assert_eq!(lines[6], "  1  2  1  0  0  0  0");
            assert_eq!(lines[lines.len() - 2], "M  END");
            assert_eq!(lines[lines.len() - 1], "$$$$");
        }

        #[test]
        fn unrecognized_bonds_are_not_written() {
            let (model, _) = parse_structure(WATER_SDF, "H2O", None).unwrap();
            let mut bonds = model.bonds().to_vec();
            bonds[0].kind = BondKind::Unrecognized("aromatic".to_string());
            let model = StructureModel::try_new(
                "H2O",
                None,
                model.elements().clone(),
                model.atoms().to_vec(),
                bonds,
            )
            .unwrap();

            let mut buffer = Vec::new();
            SdfFile::default().write_to(&model, &mut buffer).unwrap();
            let (reread, _) = SdfFile::default()
                .read_str(&String::from_utf8(buffer).unwrap())
                .unwrap();
            assert_eq!(reread.bonds().len(), 1);
        }

        #[test]
        fn path_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("water.sdf");
            let (model, _) = parse_structure(WATER_SDF, "H2O", None).unwrap();
            let file = SdfFile::new("H2O", None);
            file.write_to_path(&model, &path).unwrap();
            let (reread, _) = file.read_from_path(&path).unwrap();
            assert_eq!(reread.atoms().len(), 3);
            assert_eq!(reread.formula(), "H2O");
        }

        #[test]
        fn missing_file_is_an_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = SdfFile::default()
                .read_from_path(dir.path().join("absent.sdf"))
                .unwrap_err();
            assert!(matches!(err, SdfError::Io(_)));
        }
    }
}
