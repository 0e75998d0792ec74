use super::numbers::{format_amount, parse_positive};
use super::units::{fold_text, normalize_unit, Unit};
use super::CalculationIssue;

/// The absolute amount to give per administration, before conversion
/// into the dispensing unit.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDose {
    pub value: f64,
    pub unit: Unit,
    /// Unit as typed, without the "/kg" suffix ("mg").
    pub unit_text: String,
    pub per_kg: bool,
}

/// True for units such as "mg/kg" or "mcg / KG".
pub fn is_per_kg(dose_unit: &str) -> bool {
    fold_text(dose_unit).replace(' ', "").contains("/kg")
}

/// Unit before the slash: "mg/kg" → "mg".
pub fn base_unit_text(dose_unit: &str) -> String {
    dose_unit.split('/').next().unwrap_or_default().trim().to_string()
}

/// Resolve the requested dose against the patient weight, appending each
/// step to `memory`.
pub fn resolve_dose(
    dose_value: &str,
    dose_unit: &str,
    weight_kg: Option<f64>,
    memory: &mut Vec<String>,
) -> Result<BaseDose, CalculationIssue> {
    let Some(value) = parse_positive(dose_value) else {
        memory.push(CalculationIssue::MissingDose.to_string());
        return Err(CalculationIssue::MissingDose);
    };

    let dose_unit = dose_unit.trim();
    if !is_per_kg(dose_unit) {
        memory.push(format!(
            "Dose por administração: {} {}",
            format_amount(value),
            if dose_unit.is_empty() { "unidade" } else { dose_unit }
        ));
        return Ok(BaseDose {
            value,
            unit: normalize_unit(dose_unit),
            unit_text: dose_unit.to_string(),
            per_kg: false,
        });
    }

    let unit_text = base_unit_text(dose_unit);
    let Some(weight) = weight_kg.filter(|w| *w > 0.0) else {
        memory.push(CalculationIssue::MissingWeight.to_string());
        return Err(CalculationIssue::MissingWeight);
    };

    let base = value * weight;
    memory.push(format!(
        "{} {dose_unit} × {} kg = {} {unit_text}",
        format_amount(value),
        format_amount(weight),
        format_amount(base),
    ));
    Ok(BaseDose {
        value: base,
        unit: normalize_unit(&unit_text),
        unit_text,
        per_kg: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_kg_detection() {
        assert!(is_per_kg("mg/kg"));
        assert!(is_per_kg("mcg / KG"));
        assert!(!is_per_kg("mg"));
        assert!(!is_per_kg("comprimido"));
        assert_eq!(base_unit_text("mg/kg"), "mg");
        assert_eq!(base_unit_text(" UI /kg"), "UI");
    }

    #[test]
    fn per_kg_dose_multiplies_weight() {
        let mut memory = Vec::new();
        let dose = resolve_dose("25", "mg/kg", Some(10.0), &mut memory).unwrap();
        assert_eq!(dose.value, 250.0);
        assert_eq!(dose.unit, Unit::Mg);
        assert!(dose.per_kg);
        assert_eq!(memory, vec!["25 mg/kg × 10 kg = 250 mg".to_string()]);
    }

    #[test]
    fn per_kg_dose_is_exact_product() {
        for (dose, weight) in [(0.6, 12.0), (0.1, 3.3), (12.5, 7.25), (1.0 / 3.0, 9.0)] {
            let mut memory = Vec::new();
            let resolved = resolve_dose(&dose.to_string(), "mg/kg", Some(weight), &mut memory).unwrap();
            assert_eq!(resolved.value, dose * weight);
        }
    }

    #[test]
    fn absolute_dose_is_verbatim() {
        let mut memory = Vec::new();
        let dose = resolve_dose("1,5", "comprimido", None, &mut memory).unwrap();
        assert_eq!(dose.value, 1.5);
        assert_eq!(dose.unit, Unit::Comprimido);
        assert!(!dose.per_kg);
        assert_eq!(memory, vec!["Dose por administração: 1,5 comprimido".to_string()]);
    }

    #[test]
    fn missing_weight_is_reported() {
        let mut memory = Vec::new();
        let err = resolve_dose("25", "mg/kg", None, &mut memory).unwrap_err();
        assert_eq!(err, CalculationIssue::MissingWeight);
        assert_eq!(memory.len(), 1);

        let mut memory = Vec::new();
        let err = resolve_dose("25", "mg/kg", Some(0.0), &mut memory).unwrap_err();
        assert_eq!(err, CalculationIssue::MissingWeight);
    }

    #[test]
    fn non_positive_dose_is_reported() {
        for raw in ["", "0", "-1", "abc"] {
            let mut memory = Vec::new();
            let err = resolve_dose(raw, "mg", Some(10.0), &mut memory).unwrap_err();
            assert_eq!(err, CalculationIssue::MissingDose);
            assert_eq!(memory, vec!["Dose não informada.".to_string()]);
        }
    }
}
