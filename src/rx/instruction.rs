use crate::dosing::{calculate_quantity, caregiver_frequency_label, format_number, parse_positive};
use crate::models::{PatientInfo, PrescriptionItem, RouteGroup};

/// Build the caregiver sentence:
/// "Administrar {quantidade} por vez, por via {via}, {frequência}, {duração}."
pub fn build_auto_instruction(item: &PrescriptionItem, patient: &PatientInfo) -> String {
    let quantity = calculate_quantity(item, patient);

    let admin = match quantity.per_dose_text() {
        Some(text) => format!("Administrar {text} por vez"),
        None => "Administrar conforme orientação clínica".to_string(),
    };
    let route = format!(
        "por via {}",
        item.route_group.unwrap_or(RouteGroup::Outros).route_text()
    );
    let frequency =
        caregiver_frequency_label(item).unwrap_or_else(|| "conforme frequência clínica".to_string());

    let mut segments = vec![admin, route, frequency];
    if let Some(duration) = duration_clause(item) {
        segments.push(duration);
    }
    format!("{}.", segments.join(", "))
}

fn duration_clause(item: &PrescriptionItem) -> Option<String> {
    if item.continuous_use {
        return Some("com uso contínuo até reavaliação".to_string());
    }
    if item.until_finished {
        return Some("até terminar o medicamento".to_string());
    }
    let days = parse_positive(&item.duration_days)?;
    let noun = if days == 1.0 { "dia" } else { "dias" };
    Some(format!("durante {} {noun}", format_number(days, 1)))
}

/// The instruction that will be printed. Auto items are regenerated on
/// every call (with free-text notes on a second line); manually edited
/// text is returned as stored.
pub fn resolve_instruction(item: &PrescriptionItem, patient: &PatientInfo) -> String {
    if !item.auto_instruction || item.manual_edited {
        return item.instruction.clone();
    }
    let generated = build_auto_instruction(item, patient);
    match item.observations.trim() {
        "" => generated,
        notes => format!("{generated}\n{notes}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosing::test_support::{item, patient};

    #[test]
    fn full_sentence_for_tablets() {
        let it = item("0,6", "mg/kg", "16 mg/comprimido", "Comprimido");
        assert_eq!(
            build_auto_instruction(&it, &patient("12")),
            "Administrar 0,5 (1/2) comprimido por vez, por via oral, a cada 12 horas, durante 7 dias."
        );
    }

    #[test]
    fn liquid_every_eight_hours() {
        let mut it = item("25", "mg/kg", "500 mg/mL", "Suspensão");
        it.frequency_type = crate::models::FrequencyType::EveryHours;
        it.every_hours = "8".into();
        it.duration_days = "5".into();
        assert_eq!(
            build_auto_instruction(&it, &patient("10")),
            "Administrar 0,5 mL por vez, por via oral, a cada 8 horas, durante 5 dias."
        );
    }

    #[test]
    fn duration_variants() {
        let mut it = item("1", "comprimido", "", "Comprimido");
        it.continuous_use = true;
        assert!(build_auto_instruction(&it, &patient(""))
            .ends_with(", com uso contínuo até reavaliação."));

        it.continuous_use = false;
        it.until_finished = true;
        assert!(build_auto_instruction(&it, &patient("")).ends_with(", até terminar o medicamento."));

        it.until_finished = false;
        it.duration_days = "1".into();
        assert!(build_auto_instruction(&it, &patient("")).ends_with(", durante 1 dia."));

        it.duration_days = String::new();
        assert_eq!(
            build_auto_instruction(&it, &patient("")),
            "Administrar 1 comprimido por vez, por via oral, a cada 12 horas."
        );
    }

    #[test]
    fn clinical_fallbacks() {
        let mut it = item("25", "mg/kg", "500 mg/mL", "");
        it.times_per_day = String::new();
        it.route_group = Some(RouteGroup::Outros);
        assert_eq!(
            build_auto_instruction(&it, &patient("")),
            "Administrar conforme orientação clínica, por via definida pelo prescritor, \
             conforme frequência clínica, durante 7 dias."
        );
    }

    #[test]
    fn route_text_follows_route_group() {
        let mut it = item("1", "comprimido", "", "Comprimido");
        it.route_group = Some(RouteGroup::Sc);
        assert!(build_auto_instruction(&it, &patient("")).contains("por via subcutânea"));
    }

    #[test]
    fn auto_instruction_appends_notes() {
        let mut it = item("1", "comprimido", "", "Comprimido");
        it.observations = "Dar após a refeição.".into();
        let text = resolve_instruction(&it, &patient(""));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Dar após a refeição.");
    }

    #[test]
    fn manual_instruction_is_never_regenerated() {
        let mut it = item("1", "comprimido", "", "Comprimido");
        it.instruction = "Meio comprimido à noite.".into();
        it.manual_edited = true;
        assert_eq!(resolve_instruction(&it, &patient("")), "Meio comprimido à noite.");

        it.manual_edited = false;
        it.auto_instruction = false;
        assert_eq!(resolve_instruction(&it, &patient("")), "Meio comprimido à noite.");
    }
}
