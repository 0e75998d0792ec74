//! Dose arithmetic for a single prescription item.
//!
//! Leaves first:
//! 1. Units — canonical unit vocabulary, discrete vs continuous
//! 2. Concentration — free-text ratio parsing
//! 3. Dose — per-kg / absolute dose resolution against patient weight
//! 4. Frequency — token / interval / times-per-day normalization
//! 5. Quantity — per-dose and total output in the dispensing unit
//!
//! Nothing here fails loudly: every problem ends up as data on the result
//! (`None` quantities, an explanatory label and the calculation memory).

mod concentration;
mod dose;
mod frequency;
mod numbers;
mod quantity;
mod units;

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════════════════════

/// Why a concentration text could not be turned into a ratio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConcentrationError {
    #[error("Concentração não informada")]
    Empty,

    #[error("Concentração \"{0}\" sem formato reconhecido")]
    Unrecognized(String),

    #[error("Concentração \"{0}\" com valor não positivo")]
    NonPositive(String),
}

/// Calculation problems reported alongside a (possibly partial) result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationIssue {
    #[error("Dose não informada.")]
    MissingDose,

    #[error("Dose por kg exige peso válido do paciente.")]
    MissingWeight,

    #[error("Concentração não informada para conversão automática.")]
    MissingConcentration,

    #[error("Concentração informada sem formato reconhecido para conversão automática: {0}")]
    UnrecognizedConcentration(ConcentrationError),

    #[error(
        "Concentração \"{concentration}\" não compatível com unidade da dose ({dose_unit}) para conversão automática."
    )]
    UnitMismatch {
        concentration: String,
        dose_unit: String,
    },

    #[error("Dose por administração arredondada para zero {unit}; revisar dose ou apresentação.")]
    RoundedToZero { unit: String },

    #[error("Frequência não informada; total estimado não calculado.")]
    UnresolvedFrequency,
}

impl CalculationIssue {
    /// Short warning printed in the item subtitle instead of a quantity.
    pub fn print_warning(&self) -> Option<&'static str> {
        match self {
            Self::MissingDose => None,
            Self::MissingWeight => Some("Peso não informado para cálculo"),
            Self::MissingConcentration | Self::UnrecognizedConcentration(_) => {
                Some("Sem concentração para cálculo")
            }
            Self::UnitMismatch { .. } => Some("Unidade da concentração incompatível com a dose"),
            Self::RoundedToZero { .. } => Some("Dose menor que 1/4 da unidade"),
            Self::UnresolvedFrequency => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use concentration::*;
pub use dose::*;
pub use frequency::*;
pub use numbers::*;
pub use quantity::*;
pub use units::*;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{FrequencyType, PatientInfo, PrescriptionItem, RouteGroup};

    pub fn patient(weight_kg: &str) -> PatientInfo {
        PatientInfo {
            name: "Thor".into(),
            species: "Canina".into(),
            breed: "SRD".into(),
            age_text: "5 anos".into(),
            weight_kg: weight_kg.into(),
        }
    }

    pub fn item(dose_value: &str, dose_unit: &str, concentration: &str, presentation: &str) -> PrescriptionItem {
        PrescriptionItem {
            id: "item-1".into(),
            name: "Medicamento".into(),
            route_group: Some(RouteGroup::Oral),
            frequency_type: FrequencyType::TimesPerDay,
            dose_value: dose_value.into(),
            dose_unit: dose_unit.into(),
            concentration: concentration.into(),
            presentation: presentation.into(),
            times_per_day: "2".into(),
            duration_days: "7".into(),
            ..PrescriptionItem::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_warnings() {
        assert_eq!(
            CalculationIssue::MissingWeight.print_warning(),
            Some("Peso não informado para cálculo")
        );
        assert_eq!(
            CalculationIssue::MissingConcentration.print_warning(),
            Some("Sem concentração para cálculo")
        );
        assert_eq!(
            CalculationIssue::UnrecognizedConcentration(ConcentrationError::Unrecognized("x".into()))
                .print_warning(),
            Some("Sem concentração para cálculo")
        );
        assert_eq!(CalculationIssue::MissingDose.print_warning(), None);
    }

    #[test]
    fn rounding_and_frequency_issues() {
        let zero = CalculationIssue::RoundedToZero {
            unit: "comprimido".into(),
        };
        assert_eq!(zero.print_warning(), Some("Dose menor que 1/4 da unidade"));
        assert!(zero.to_string().contains("zero comprimido"));
        assert_eq!(CalculationIssue::UnresolvedFrequency.print_warning(), None);
    }

    #[test]
    fn issue_messages_are_displayable() {
        let issue = CalculationIssue::UnitMismatch {
            concentration: "2%".into(),
            dose_unit: "mg".into(),
        };
        assert!(issue.to_string().contains("2%"));
        assert!(issue.to_string().contains("(mg)"));
    }
}
