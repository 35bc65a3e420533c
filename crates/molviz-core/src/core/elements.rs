//! Static display data for chemical elements.
//!
//! Colors follow the CPK convention and radii are display radii, not physical
//! ones. The table is consulted by the structure parser and, for hand-authored
//! input, by the geometry builder.

use crate::core::models::color::Rgb;
use crate::core::models::structure::ElementStyle;
use phf::{Map, phf_map};

/// One row of the element table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementEntry {
    pub symbol: &'static str,
    pub color: Rgb,
    pub radius: f64,
}

const fn entry(symbol: &'static str, color: u32, radius: f64) -> ElementEntry {
    ElementEntry {
        symbol,
        color: Rgb::from_hex(color),
        radius,
    }
}

/// Scale applied to table radii when building the per-molecule element styles.
pub const DISPLAY_RADIUS_SCALE: f64 = 0.5;
/// Color used for symbols the table does not know.
pub const FALLBACK_COLOR: Rgb = Rgb::from_hex(0xFF1493);
/// Radius used for symbols the table does not know.
pub const FALLBACK_RADIUS: f64 = 0.5;

static ELEMENT_TABLE: Map<&'static str, ElementEntry> = phf_map! {
    "H" => entry("H", 0xFFFFFF, 0.3),
    "He" => entry("He", 0xD9FFFF, 0.28),
    "Li" => entry("Li", 0xCC80FF, 0.68),
    "Be" => entry("Be", 0xC2FF00, 0.35),
    "B" => entry("B", 0xFFB5B5, 0.83),
    "C" => entry("C", 0x909090, 0.68),
    "N" => entry("N", 0x3050F8, 0.68),
    "O" => entry("O", 0xFF0D0D, 0.68),
    "F" => entry("F", 0x90E050, 0.64),
    "Ne" => entry("Ne", 0xB3E3F5, 0.58),
    "Na" => entry("Na", 0xAB5CF2, 1.02),
    "Mg" => entry("Mg", 0x8AFF00, 0.86),
    "Al" => entry("Al", 0xBFA6A6, 1.84),
    "Si" => entry("Si", 0xF0C8A0, 1.76),
    "P" => entry("P", 0xFF8000, 1.06),
    "S" => entry("S", 0xFFFF30, 1.02),
    "Cl" => entry("Cl", 0x1FF01F, 0.99),
    "Ar" => entry("Ar", 0x80D1E3, 0.98),
    "K" => entry("K", 0x8F40D4, 1.38),
    "Ca" => entry("Ca", 0x3DFF00, 1.74),
    "Sc" => entry("Sc", 0xE6E6E6, 1.44),
    "Ti" => entry("Ti", 0xBFC2C7, 1.32),
    "V" => entry("V", 0xA6A6AB, 1.22),
    "Cr" => entry("Cr", 0x8A99C7, 1.18),
    "Mn" => entry("Mn", 0x9C7AC7, 1.17),
    "Fe" => entry("Fe", 0xE06633, 1.17),
    "Co" => entry("Co", 0xF090A0, 1.16),
    "Ni" => entry("Ni", 0x50D050, 1.15),
    "Cu" => entry("Cu", 0xC88033, 1.17),
    "Zn" => entry("Zn", 0x7D80B0, 1.25),
    "Ga" => entry("Ga", 0xC28F8F, 1.26),
    "Ge" => entry("Ge", 0x668F8F, 1.22),
    "As" => entry("As", 0xBD80E3, 1.21),
    "Se" => entry("Se", 0xFFA100, 1.16),
    "Br" => entry("Br", 0xA62929, 1.14),
    "Kr" => entry("Kr", 0x5CB8D1, 1.12),
    "Rb" => entry("Rb", 0x702EB0, 1.48),
    "Sr" => entry("Sr", 0x00FF00, 1.92),
    "Y" => entry("Y", 0x94FFFF, 1.62),
    "Zr" => entry("Zr", 0x94E0E0, 1.48),
    "Nb" => entry("Nb", 0x73C2C9, 1.37),
    "Mo" => entry("Mo", 0x54B5B5, 1.45),
    "Tc" => entry("Tc", 0x3B9E9E, 1.56),
    "Ru" => entry("Ru", 0x248F8F, 1.26),
    "Rh" => entry("Rh", 0x0A7D8C, 1.35),
    "Pd" => entry("Pd", 0x006985, 1.31),
    "Ag" => entry("Ag", 0xC0C0C0, 1.53),
    "Cd" => entry("Cd", 0xFFD98F, 1.48),
    "In" => entry("In", 0xA67573, 1.44),
    "Sn" => entry("Sn", 0x668080, 1.41),
    "Sb" => entry("Sb", 0x9E63B5, 1.38),
    "Te" => entry("Te", 0xD47A00, 1.35),
    "I" => entry("I", 0x940094, 1.33),
    "Xe" => entry("Xe", 0x429EB0, 1.31),
    "Cs" => entry("Cs", 0x57178F, 1.67),
    "Ba" => entry("Ba", 0x00C900, 1.98),
    "La" => entry("La", 0x70D4FF, 1.69),
    "Ce" => entry("Ce", 0xFFFFC7, 1.65),
    "Pr" => entry("Pr", 0xD9FFC7, 1.65),
    "Nd" => entry("Nd", 0xC7FFC7, 1.64),
    "Pm" => entry("Pm", 0xA3FFC7, 1.63),
    "Sm" => entry("Sm", 0x8FFFC7, 1.62),
    "Eu" => entry("Eu", 0x61FFC7, 1.85),
    "Gd" => entry("Gd", 0x45FFC7, 1.61),
    "Tb" => entry("Tb", 0x30FFC7, 1.59),
    "Dy" => entry("Dy", 0x1FFFC7, 1.59),
    "Ho" => entry("Ho", 0x00FF9C, 1.58),
    "Er" => entry("Er", 0x00E675, 1.57),
    "Tm" => entry("Tm", 0x00D452, 1.56),
    "Yb" => entry("Yb", 0x00BF38, 1.74),
    "Lu" => entry("Lu", 0x00AB24, 1.56),
    "Hf" => entry("Hf", 0x4DC2FF, 1.44),
    "Ta" => entry("Ta", 0x4DA6FF, 1.34),
    "W" => entry("W", 0x2194D6, 1.47),
    "Re" => entry("Re", 0x267DAB, 1.60),
    "Os" => entry("Os", 0x266696, 1.27),
    "Ir" => entry("Ir", 0x175487, 1.35),
    "Pt" => entry("Pt", 0xD0D0E0, 1.35),
    "Au" => entry("Au", 0xFFD123, 1.50),
    "Hg" => entry("Hg", 0xB8B8D0, 1.52),
    "Tl" => entry("Tl", 0xA6544D, 1.45),
    "Pb" => entry("Pb", 0x575961, 1.47),
    "Bi" => entry("Bi", 0x9E4FB5, 1.46),
    "Po" => entry("Po", 0xAB5C00, 1.53),
    "At" => entry("At", 0x754F45, 1.43),
    "Rn" => entry("Rn", 0x428296, 1.34),
    "Fr" => entry("Fr", 0x420066, 1.94),
    "Ra" => entry("Ra", 0x007D00, 2.01),
    "Ac" => entry("Ac", 0x70ABFA, 1.86),
    "Th" => entry("Th", 0x00BAFF, 1.75),
    "Pa" => entry("Pa", 0x00A1FF, 1.69),
    "U" => entry("U", 0x008FFF, 1.70),
    "Np" => entry("Np", 0x0080FF, 1.71),
    "Pu" => entry("Pu", 0x006BFF, 1.72),
    "Am" => entry("Am", 0x545CF2, 1.66),
    "Cm" => entry("Cm", 0x785CE3, 1.66),
    "Bk" => entry("Bk", 0x8A4FE3, 1.68),
    "Cf" => entry("Cf", 0xA136D4, 1.68),
    "Es" => entry("Es", 0xB31FD4, 1.65),
    "Fm" => entry("Fm", 0xB31FBA, 1.67),
    "Md" => entry("Md", 0xB30DA6, 1.73),
    "No" => entry("No", 0xBD0D87, 1.76),
    "Lr" => entry("Lr", 0xC70066, 1.61),
};

/// Looks up a symbol. Symbols are case-sensitive (`"Co"` is cobalt, `"CO"` is unknown).
pub fn lookup(symbol: &str) -> Option<&'static ElementEntry> {
    ELEMENT_TABLE.get(symbol)
}

/// Number of elements in the table.
pub fn len() -> usize {
    ELEMENT_TABLE.len()
}

/// The style a structure should carry for `symbol`: the table color with the
/// radius scaled by [`DISPLAY_RADIUS_SCALE`], or the fallback for unknown symbols.
pub fn display_style(symbol: &str) -> ElementStyle {
    match lookup(symbol) {
        Some(entry) => ElementStyle {
            color: entry.color,
            radius: entry.radius * DISPLAY_RADIUS_SCALE,
        },
        None => fallback_style(),
    }
}

pub fn fallback_style() -> ElementStyle {
    ElementStyle {
        color: FALLBACK_COLOR,
        radius: FALLBACK_RADIUS,
    }
}
