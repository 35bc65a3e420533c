use std::fmt;

/// The kind of a bond between two atoms.
///
/// Structure files only ever produce the three numbered kinds. Hand-authored
/// structures may name anything else, which is kept verbatim as
/// [`BondKind::Unrecognized`] and skipped when geometry is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BondKind {
    #[default]
    Single,
    Double,
    Triple,
    Unrecognized(String),
}

impl BondKind {
    /// Maps a structure-file bond-order code. Only 2 and 3 are special; every
    /// other code, including 1, is a single bond.
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => Self::Double,
            3 => Self::Triple,
            _ => Self::Single,
        }
    }

    /// Maps a bond label such as `"double"`. Labels match exactly, so `"Double"`
    /// is unknown. Unknown labels are preserved.
    pub fn from_label(label: &str) -> Self {
        match label {
            "single" => Self::Single,
            "double" => Self::Double,
            "triple" => Self::Triple,
            _ => Self::Unrecognized(label.to_string()),
        }
    }

    /// The structure-file code for this kind, if it has one.
    pub fn code(&self) -> Option<u8> {
        match self {
            Self::Single => Some(1),
            Self::Double => Some(2),
            Self::Triple => Some(3),
            Self::Unrecognized(_) => None,
        }
    }

    /// Number of cylinders this bond is drawn with.
    pub fn cylinder_count(&self) -> usize {
        self.code().map_or(0, usize::from)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Unrecognized(label) => label,
        }
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: String, // id of the first atom
    pub atom2: String, // id of the second atom
    pub kind: BondKind,
}

impl Bond {
    pub fn new(atom1: impl Into<String>, atom2: impl Into<String>, kind: BondKind) -> Self {
        Self {
            atom1: atom1.into(),
            atom2: atom2.into(),
            kind,
        }
    }

    pub fn contains(&self, atom_id: &str) -> bool {
        self.atom1 == atom_id || self.atom2 == atom_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_maps_two_and_three_only() {
        assert_eq!(BondKind::from_code(1), BondKind::Single);
        assert_eq!(BondKind::from_code(2), BondKind::Double);
        assert_eq!(BondKind::from_code(3), BondKind::Triple);
        assert_eq!(BondKind::from_code(4), BondKind::Single);
        assert_eq!(BondKind::from_code(0), BondKind::Single);
        assert_eq!(BondKind::from_code(-2), BondKind::Single);
    }

    #[test]
    fn from_label_parses_known_labels() {
        assert_eq!(BondKind::from_label("single"), BondKind::Single);
        assert_eq!(BondKind::from_label("double"), BondKind::Double);
        assert_eq!(BondKind::from_label("triple"), BondKind::Triple);
    }

    #[test]
    fn from_label_is_case_and_space_sensitive() {
        for label in ["Double", " TRIPLE ", "single ", ""] {
            let kind = BondKind::from_label(label);
            assert_eq!(kind, BondKind::Unrecognized(label.to_string()));
            assert_eq!(kind.cylinder_count(), 0);
        }
    }

    #[test]
    fn from_label_keeps_unknown_labels() {
        assert_eq!(
            BondKind::from_label("aromatic"),
            BondKind::Unrecognized("aromatic".to_string())
        );
        assert_eq!(BondKind::from_label("aromatic").label(), "aromatic");
    }

    #[test]
    fn cylinder_count_matches_bond_multiplicity() {
        assert_eq!(BondKind::Single.cylinder_count(), 1);
        assert_eq!(BondKind::Double.cylinder_count(), 2);
        assert_eq!(BondKind::Triple.cylinder_count(), 3);
        assert_eq!(BondKind::from_label("quadruple").cylinder_count(), 0);
    }

    #[test]
    fn display_outputs_lowercase_labels() {
        assert_eq!(BondKind::Single.to_string(), "single");
        assert_eq!(BondKind::Double.to_string(), "double");
        assert_eq!(BondKind::Triple.to_string(), "triple");
    }

    #[test]
    fn default_is_single() {
        assert_eq!(BondKind::default(), BondKind::Single);
    }

    #[test]
    fn bond_contains_both_endpoints_only() {
        let bond = Bond::new("O-1", "H-2", BondKind::Single);
        assert!(bond.contains("O-1"));
        assert!(bond.contains("H-2"));
        assert!(!bond.contains("H-3"));
    }
}
