//! Per-dose and total quantity in the product's dispensing unit.

use crate::models::{PatientInfo, PrescriptionItem};

use super::concentration::parse_concentration;
use super::dose::{resolve_dose, BaseDose};
use super::frequency::resolve_frequency;
use super::numbers::{format_amount, format_number, parse_positive, quarter_fraction, round_to_quarter};
use super::units::{infer_presentation_unit, Unit};
use super::{CalculationIssue, ConcentrationError};

pub const QUANTITY_NOT_CALCULATED: &str = "Quantidade não calculada";

#[derive(Debug, Clone, PartialEq)]
pub struct QuantityResult {
    pub per_dose: Option<f64>,
    pub total: Option<f64>,
    /// Display spelling of the output unit ("mL", "comprimido"); empty when
    /// no quantity could be produced.
    pub unit: String,
    pub output_unit: Option<Unit>,
    pub label: String,
    /// Human-readable calculation steps, in order.
    pub memory: Vec<String>,
    pub issue: Option<CalculationIssue>,
    pub base_dose: Option<f64>,
    pub times_per_day: Option<f64>,
    pub duration_days: Option<f64>,
}

impl QuantityResult {
    fn failed(label: &str, memory: Vec<String>, issue: CalculationIssue) -> Self {
        Self {
            per_dose: None,
            total: None,
            unit: String::new(),
            output_unit: None,
            label: label.to_string(),
            memory,
            issue: Some(issue),
            base_dose: None,
            times_per_day: None,
            duration_days: None,
        }
    }

    /// Per-dose amount formatted for the caregiver, e.g. "0,5 (1/2) comprimido".
    /// `None` when nothing would be given per dose.
    pub fn per_dose_text(&self) -> Option<String> {
        let per_dose = self.per_dose.filter(|value| *value > 0.0)?;
        Some(format_quantity(per_dose, self.output_unit.as_ref()?))
    }
}

/// Display a quantity in its unit. Discrete pieces show the kitchen fraction
/// next to the decimal, drops are whole, volumes keep two decimals.
pub fn format_quantity(value: f64, unit: &Unit) -> String {
    match unit {
        Unit::Gotas => format!("{} {unit}", format_number(value, 0)),
        u if u.is_discrete() => match quarter_fraction(value) {
            Some(fraction) => format!("{} ({fraction}) {unit}", format_amount(value)),
            None => format!("{} {unit}", format_amount(value)),
        },
        _ => format!("{} {unit}", format_amount(value)),
    }
}

/// Where the per-dose amount comes from once the base dose is known.
enum Conversion {
    Converted(f64, Unit),
    Direct(Unit),
    Fallback(Unit, CalculationIssue),
}

fn choose_conversion(item: &PrescriptionItem, dose: &BaseDose, memory: &mut Vec<String>) -> Conversion {
    let fallback_unit = if dose.unit_text.is_empty() {
        infer_presentation_unit(&item.presentation)
    } else {
        dose.unit.clone()
    };

    match parse_concentration(&item.concentration, &item.presentation) {
        Ok(conc) if conc.amount_unit == dose.unit => {
            let per_dose = dose.value / conc.ratio();
            memory.push(format!(
                "{} {} ÷ {conc} = {} {}",
                format_amount(dose.value),
                dose.unit_text,
                format_amount(per_dose),
                conc.per_unit
            ));
            Conversion::Converted(per_dose, conc.per_unit)
        }
        Ok(conc) if conc.per_unit == dose.unit => {
            memory.push(format!("Dose já expressa em {}.", conc.per_unit));
            Conversion::Direct(conc.per_unit)
        }
        Ok(_) => {
            let issue = CalculationIssue::UnitMismatch {
                concentration: item.concentration.trim().to_string(),
                dose_unit: if dose.unit_text.is_empty() { "-".into() } else { dose.unit_text.clone() },
            };
            tracing::warn!(
                item_id = %item.id,
                concentration = %item.concentration,
                dose_unit = %dose.unit_text,
                "Concentration unit does not match dose unit; reporting raw dose"
            );
            memory.push(issue.to_string());
            Conversion::Fallback(fallback_unit, issue)
        }
        Err(_) if dose.unit_text.is_empty() || dose.unit.is_dispensing() => {
            memory.push(format!("Dose já expressa em {fallback_unit}."));
            Conversion::Direct(fallback_unit)
        }
        Err(ConcentrationError::Empty) => {
            let issue = CalculationIssue::MissingConcentration;
            memory.push(issue.to_string());
            Conversion::Fallback(fallback_unit, issue)
        }
        Err(err) => {
            let issue = CalculationIssue::UnrecognizedConcentration(err);
            memory.push(issue.to_string());
            Conversion::Fallback(fallback_unit, issue)
        }
    }
}

/// Compute how much of the product to give per dose and, for bounded
/// treatments, in total.
pub fn calculate_quantity(item: &PrescriptionItem, patient: &PatientInfo) -> QuantityResult {
    let mut memory = Vec::new();

    let dose = match resolve_dose(&item.dose_value, &item.dose_unit, patient.weight(), &mut memory) {
        Ok(dose) => dose,
        Err(issue @ CalculationIssue::MissingWeight) => {
            return QuantityResult::failed("Peso não informado para cálculo", memory, issue);
        }
        Err(issue) => return QuantityResult::failed(QUANTITY_NOT_CALCULATED, memory, issue),
    };

    let (mut per_dose, unit, mut issue) = match choose_conversion(item, &dose, &mut memory) {
        Conversion::Converted(value, unit) => (value, unit, None),
        Conversion::Direct(unit) => (dose.value, unit, None),
        Conversion::Fallback(unit, issue) => (dose.value, unit, Some(issue)),
    };

    if unit.is_discrete() {
        let rounded = round_to_quarter(per_dose);
        if rounded != per_dose {
            let shown = match unit {
                Unit::Gotas => format!("{} {unit}", format_amount(rounded)),
                _ => format_quantity(rounded, &unit),
            };
            memory.push(format!("Arredondamento: {} → {shown}", format_amount(per_dose)));
        }
        if rounded == 0.0 && per_dose > 0.0 {
            let zero = CalculationIssue::RoundedToZero {
                unit: unit.to_string(),
            };
            memory.push(zero.to_string());
            if issue.is_none() {
                issue = Some(zero);
            }
        }
        per_dose = rounded;
    }

    let frequency = resolve_frequency(item);
    let times_per_day = frequency.times_per_day;
    let duration_days = parse_positive(&item.duration_days);
    let mut total = None;

    if item.continuous_use {
        memory.push("Uso contínuo: total estimado não calculado.".to_string());
    } else if item.until_finished {
        memory.push("Até acabar: total estimado não calculado.".to_string());
    } else if let (Some(times), Some(days)) = (times_per_day, duration_days) {
        let raw = per_dose * times * days;
        memory.push(format!(
            "{} × {} vezes/dia × {} dias = {} {unit}",
            format_amount(per_dose),
            format_amount(times),
            format_number(days, 1),
            format_amount(raw)
        ));
        let value = if unit.is_discrete() { raw.ceil() } else { raw };
        if value != raw {
            memory.push(format!("Total arredondado para cima: {} {unit}", format_amount(value)));
        }
        total = Some(value);
    } else if !frequency.is_resolved() {
        let unresolved = CalculationIssue::UnresolvedFrequency;
        memory.push(unresolved.to_string());
        if issue.is_none() {
            issue = Some(unresolved);
        }
    } else {
        memory.push("Duração inválida para cálculo de total.".to_string());
    }

    let label = match total {
        Some(total) => format!("Total estimado: {} {unit}", format_amount(total)),
        None => format!("Por vez: {}", format_quantity(per_dose, &unit)),
    };

    tracing::debug!(
        item_id = %item.id,
        per_dose,
        total = ?total,
        unit = %unit,
        flagged = issue.is_some(),
        "Quantity calculated"
    );

    QuantityResult {
        per_dose: Some(per_dose),
        total,
        unit: unit.display_name().to_string(),
        output_unit: Some(unit),
        label,
        memory,
        issue,
        base_dose: Some(dose.value),
        times_per_day,
        duration_days,
    }
}

/// Only the human-readable steps of [`calculate_quantity`].
pub fn calculation_memory(item: &PrescriptionItem, patient: &PatientInfo) -> Vec<String> {
    calculate_quantity(item, patient).memory
}
