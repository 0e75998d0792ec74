//! Best-effort parser for free-text concentrations ("500 mg/mL",
//! "10 mg/5 mL", "16 mg/comprimido", "250 mg").

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::numbers::{format_amount, parse_number};
use super::units::{infer_presentation_unit, normalize_unit, Unit};
use super::ConcentrationError;

/// `amount unit / [perValue] perUnit`
static RE_WITH_DIVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*([\p{L}%]+)\s*/\s*(\d+(?:[.,]\d+)?)?\s*([\p{L}%]+)").unwrap()
});
/// `amount unit`, divisor implied by the presentation.
static RE_SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*([\p{L}%]+)").unwrap());

/// A concentration as a ratio: `amount amount_unit` per `per_value per_unit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedConcentration {
    pub amount: f64,
    #[serde(serialize_with = "serialize_unit")]
    pub amount_unit: Unit,
    pub per_value: f64,
    #[serde(serialize_with = "serialize_unit")]
    pub per_unit: Unit,
}

fn serialize_unit<S: serde::Serializer>(unit: &Unit, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(unit.as_str())
}

impl ParsedConcentration {
    /// Amount of active ingredient per single dispensing unit.
    pub fn ratio(&self) -> f64 {
        self.amount / self.per_value
    }
}

impl fmt::Display for ParsedConcentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/", format_amount(self.amount), self.amount_unit)?;
        if (self.per_value - 1.0).abs() > f64::EPSILON {
            write!(f, "{} ", format_amount(self.per_value))?;
        }
        write!(f, "{}", self.per_unit)
    }
}

/// Parse `concentration`; `presentation` supplies the divisor unit when
/// the text carries none.
pub fn parse_concentration(
    concentration: &str,
    presentation: &str,
) -> Result<ParsedConcentration, ConcentrationError> {
    let text = concentration.trim();
    if text.is_empty() {
        return Err(ConcentrationError::Empty);
    }

    if let Some(caps) = RE_WITH_DIVIDER.captures(text) {
        let amount = caps.get(1).and_then(|m| parse_number(m.as_str()));
        let per_value = match caps.get(3) {
            Some(m) => parse_number(m.as_str()),
            None => Some(1.0),
        };
        return match (amount, per_value) {
            (Some(amount), Some(per_value)) if amount > 0.0 && per_value > 0.0 => {
                Ok(ParsedConcentration {
                    amount,
                    amount_unit: normalize_unit(&caps[2]),
                    per_value,
                    per_unit: normalize_unit(&caps[4]),
                })
            }
            _ => Err(ConcentrationError::NonPositive(text.to_string())),
        };
    }

    let Some(caps) = RE_SIMPLE.captures(text) else {
        return Err(ConcentrationError::Unrecognized(text.to_string()));
    };
    match caps.get(1).and_then(|m| parse_number(m.as_str())) {
        Some(amount) if amount > 0.0 => Ok(ParsedConcentration {
            amount,
            amount_unit: normalize_unit(&caps[2]),
            per_value: 1.0,
            per_unit: infer_presentation_unit(presentation),
        }),
        _ => Err(ConcentrationError::NonPositive(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_per_volume() {
        let c = parse_concentration("500 mg/mL", "").unwrap();
        assert_eq!(c.amount, 500.0);
        assert_eq!(c.amount_unit, Unit::Mg);
        assert_eq!(c.per_value, 1.0);
        assert_eq!(c.per_unit, Unit::Ml);
        assert_eq!(c.ratio(), 500.0);
    }

    #[test]
    fn parses_explicit_divisor() {
        let c = parse_concentration("10 mg/5 mL", "Suspensão").unwrap();
        assert_eq!(c.per_value, 5.0);
        assert_eq!(c.ratio(), 2.0);
    }

    #[test]
    fn parses_per_tablet_and_accents() {
        let c = parse_concentration("16 mg/comprimido", "Comprimido").unwrap();
        assert_eq!(c.per_unit, Unit::Comprimido);
        let c = parse_concentration("62,5 mg / cápsula", "").unwrap();
        assert_eq!(c.amount, 62.5);
        assert_eq!(c.per_unit, Unit::Capsula);
    }

    #[test]
    fn simple_form_infers_per_unit_from_presentation() {
        let c = parse_concentration("250 mg", "Comprimido revestido").unwrap();
        assert_eq!(c.amount, 250.0);
        assert_eq!(c.per_value, 1.0);
        assert_eq!(c.per_unit, Unit::Comprimido);

        let c = parse_concentration("250 mg", "Xarope").unwrap();
        assert_eq!(c.per_unit, Unit::Ml);
        let c = parse_concentration("250 mg", "").unwrap();
        assert_eq!(c.per_unit, Unit::Ml);
    }

    #[test]
    fn distinguishes_failure_reasons() {
        assert_eq!(parse_concentration("  ", ""), Err(ConcentrationError::Empty));
        assert!(matches!(
            parse_concentration("ver bula", ""),
            Err(ConcentrationError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_concentration("0 mg/mL", ""),
            Err(ConcentrationError::NonPositive(_))
        ));
        assert!(matches!(
            parse_concentration("10 mg/0 mL", ""),
            Err(ConcentrationError::NonPositive(_))
        ));
    }

    #[test]
    fn display_omits_unit_divisor() {
        let c = parse_concentration("500 mg/mL", "").unwrap();
        assert_eq!(c.to_string(), "500 mg/mL");
        let c = parse_concentration("10 mg/5 mL", "").unwrap();
        assert_eq!(c.to_string(), "10 mg/5 mL");
    }
}
