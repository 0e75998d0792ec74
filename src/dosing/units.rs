//! Unit canonicalization for free-text dose, concentration and dispensing units.
//!
//! Every token is folded (diacritics stripped, lower-cased, trailing
//! punctuation removed) and looked up in a fixed alias table. Unknown tokens
//! pass through as `Unit::Other` with their folded spelling.

use std::fmt;

/// Canonical unit vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Mg,
    Mcg,
    G,
    Ml,
    L,
    Ui,
    Unidade,
    Comprimido,
    Capsula,
    Gotas,
    Ampola,
    Frasco,
    Bisnaga,
    Sachet,
    Other(String),
}

impl Unit {
    /// Canonical token, e.g. `comprimido`, `mcg`, `gotas`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mg => "mg",
            Self::Mcg => "mcg",
            Self::G => "g",
            Self::Ml => "ml",
            Self::L => "l",
            Self::Ui => "ui",
            Self::Unidade => "unidade",
            Self::Comprimido => "comprimido",
            Self::Capsula => "capsula",
            Self::Gotas => "gotas",
            Self::Ampola => "ampola",
            Self::Frasco => "frasco",
            Self::Bisnaga => "bisnaga",
            Self::Sachet => "sachet",
            Self::Other(s) => s,
        }
    }

    /// Spelling used on printed documents.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ml => "mL",
            Self::L => "L",
            Self::Ui => "UI",
            Self::Capsula => "cápsula",
            Self::Sachet => "sachê",
            other => other.as_str(),
        }
    }

    /// Counted in whole or fractional pieces rather than measured.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Self::Comprimido
                | Self::Capsula
                | Self::Gotas
                | Self::Ampola
                | Self::Frasco
                | Self::Bisnaga
                | Self::Sachet
                | Self::Unidade
        )
    }

    /// A unit the caregiver can measure out directly (pieces or volume).
    pub fn is_dispensing(&self) -> bool {
        self.is_discrete() || matches!(self, Self::Ml | Self::L)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Strip diacritics, lower-case and trim. Used for unit lookup, keyword
/// matching and case/accent-insensitive de-duplication.
pub fn fold_text(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_char)
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

/// Canonicalize a raw unit token. Never fails: unknown tokens come back
/// as `Unit::Other` carrying the folded text.
pub fn normalize_unit(raw: &str) -> Unit {
    let folded = fold_text(raw);
    let key = folded
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?') || c.is_whitespace())
        .replace('.', "");

    match key.as_str() {
        "mg" => Unit::Mg,
        "mcg" | "ug" | "µg" | "μg" => Unit::Mcg,
        "g" => Unit::G,
        "ml" => Unit::Ml,
        "l" => Unit::L,
        "ui" | "u" => Unit::Ui,
        "unidade" | "unidades" | "un" => Unit::Unidade,
        "comprimido" | "comprimidos" | "comp" | "cp" => Unit::Comprimido,
        "capsula" | "capsulas" | "cap" | "caps" => Unit::Capsula,
        "gota" | "gotas" => Unit::Gotas,
        "ampola" | "ampolas" => Unit::Ampola,
        "frasco" | "frascos" => Unit::Frasco,
        "bisnaga" | "bisnagas" => Unit::Bisnaga,
        "sache" | "saches" | "sachet" | "sachets" => Unit::Sachet,
        _ => Unit::Other(key),
    }
}

/// Shorthand for `normalize_unit(raw).is_discrete()`.
pub fn is_discrete_unit(raw: &str) -> bool {
    normalize_unit(raw).is_discrete()
}

/// Guess the dispensing unit from the presentation name ("Comprimido
/// revestido", "Suspensão oral"...). Liquids and unknown forms fall back
/// to mL.
pub fn infer_presentation_unit(presentation: &str) -> Unit {
    let text = fold_text(presentation);
    let keywords: [(&str, Unit); 7] = [
        ("comprim", Unit::Comprimido),
        ("capsul", Unit::Capsula),
        ("gota", Unit::Gotas),
        ("ampola", Unit::Ampola),
        ("bisnaga", Unit::Bisnaga),
        ("sache", Unit::Sachet),
        ("frasco", Unit::Frasco),
    ];
    keywords
        .into_iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, unit)| unit)
        .unwrap_or(Unit::Ml)
}
