//! Element registry: symbol lookup, atomic numbers and display colors.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::AtomError;

/// Color used for elements without an entry in the color table.
pub const DEFAULT_ELEMENT_COLOR: [u8; 3] = [180, 180, 180];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_number: u32,
    pub color: [u8; 3],
}

static SYMBOL_INDEX: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    ELEMENT_SYMBOLS
        .iter()
        .enumerate()
        .map(|(i, &s)| (s, i as u32 + 1))
        .collect()
});

static ELEMENT_COLORS: Lazy<HashMap<&'static str, [u8; 3]>> = Lazy::new(|| {
    HashMap::from([
        ("H", [255, 255, 255]),
        ("He", [200, 200, 255]),
        ("Li", [204, 128, 255]),
        ("Be", [194, 255, 0]),
        ("B", [255, 181, 181]),
        ("C", [255, 50, 0]),
        ("N", [0, 0, 255]),
        ("O", [255, 0, 0]),
        ("F", [144, 224, 80]),
        ("Ne", [179, 227, 245]),
        ("Na", [171, 92, 242]),
        ("Mg", [138, 255, 0]),
        ("Al", [191, 166, 166]),
        ("Si", [240, 200, 160]),
        ("P", [255, 128, 0]),
        ("S", [255, 255, 48]),
        ("Cl", [31, 240, 31]),
        ("Ar", [128, 209, 227]),
        ("K", [143, 64, 212]),
        ("Ca", [61, 255, 0]),
        ("Fe", [224, 102, 51]),
        ("Cu", [200, 128, 51]),
        ("Zn", [125, 128, 176]),
    ])
});

/// Look up an element by its (case-sensitive) symbol.
pub fn lookup(symbol: &str) -> Result<Element, AtomError> {
    let (&symbol, &atomic_number) = SYMBOL_INDEX
        .get_key_value(symbol)
        .ok_or_else(|| AtomError::UnknownElement(symbol.to_string()))?;
    Ok(Element {
        symbol,
        atomic_number,
        color: color_for(symbol),
    })
}

pub fn atomic_number(symbol: &str) -> Result<u32, AtomError> {
    lookup(symbol).map(|e| e.atomic_number)
}

pub fn symbol_for_z(z: u32) -> Option<&'static str> {
    if z == 0 {
        return None;
    }
    ELEMENT_SYMBOLS.get(z as usize - 1).copied()
}

pub fn color_for(symbol: &str) -> [u8; 3] {
    ELEMENT_COLORS
        .get(symbol)
        .copied()
        .unwrap_or(DEFAULT_ELEMENT_COLOR)
}

const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_elements() {
        assert_eq!(atomic_number("H").unwrap(), 1);
        assert_eq!(atomic_number("Be").unwrap(), 4);
        assert_eq!(atomic_number("O").unwrap(), 8);
        assert_eq!(atomic_number("Og").unwrap(), 118);
        assert_eq!(lookup("C").unwrap().color, [255, 50, 0]);
    }

    #[test]
    fn test_unknown_element() {
        assert_eq!(
            lookup("Xx"),
            Err(AtomError::UnknownElement("Xx".to_string()))
        );
        // symbols are case-sensitive
        assert!(lookup("he").is_err());
        assert!(lookup("").is_err());
    }

    #[test]
    fn test_symbol_for_z() {
        assert_eq!(symbol_for_z(0), None);
        assert_eq!(symbol_for_z(8), Some("O"));
        assert_eq!(symbol_for_z(119), None);
    }

    #[test]
    fn test_fallback_color() {
        assert_eq!(lookup("Xe").unwrap().color, DEFAULT_ELEMENT_COLOR);
    }
}
