use crate::error::Result;
use molviz::workflows::lookup::{SUGGESTED_MOLECULES, SuggestedMolecule};

fn format_row(molecule: &SuggestedMolecule) -> String {
    format!(
        "  {:<16} {:<12} {}",
        molecule.name, molecule.formula, molecule.hebrew
    )
}

pub fn run() -> Result<()> {
    println!("Suggested molecules (try `molviz show <name>`):");
    for molecule in &SUGGESTED_MOLECULES {
        println!("{}", format_row(molecule));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_show_name_formula_and_hebrew() {
        let row = format_row(&SUGGESTED_MOLECULES[0]);
        assert!(row.starts_with("  water"));
        assert!(row.contains("H₂O"));
        assert!(row.ends_with("מים"));
    }
}
