//! Prescription → display-ready `PrintDoc`.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::config;
use crate::dosing::{calculate_quantity, fold_text, QUANTITY_NOT_CALCULATED};
use crate::models::{
    DocumentKind, ItemStatus, PatientInfo, PrescriptionItem, PrescriptionState, PrintDoc,
    PrintDocItem, PrintDocSection, RecommendationsState, RenderMode, TutorInfo,
};

use super::control::{split_by_control, ControlledCatalog};
use super::grouping::group_items;
use super::instruction::resolve_instruction;

/// External control parameters of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub document_kind: DocumentKind,
    /// Printed as the document date. Explicit so that rendering the same
    /// prescription twice gives the same document.
    pub issued_on: NaiveDate,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Final,
            document_kind: DocumentKind::Standard,
            issued_on: chrono::Local::now().date_naive(),
        }
    }
}

/// `incomplete` when the item lacks a name, a route or an instruction.
pub fn item_status(item: &PrescriptionItem, patient: &PatientInfo) -> ItemStatus {
    if item.name.trim().is_empty()
        || item.route_group.is_none()
        || resolve_instruction(item, patient).trim().is_empty()
    {
        ItemStatus::Incomplete
    } else {
        ItemStatus::Ok
    }
}

/// "Name Concentration (Commercial name)"; empty when there is neither a
/// name nor a concentration.
pub fn build_item_title(item: &PrescriptionItem) -> String {
    let base = [item.name.trim(), item.concentration.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if base.is_empty() {
        return base;
    }
    match item.commercial_name.as_deref().map(str::trim) {
        Some(commercial) if !commercial.is_empty() => format!("{base} ({commercial})"),
        _ => base,
    }
}

fn build_item(item: &PrescriptionItem, index: usize, patient: &PatientInfo) -> PrintDocItem {
    let quantity = calculate_quantity(item, patient);
    let instruction = resolve_instruction(item, patient);

    let mut subtitle_parts: Vec<&str> = vec![item.presentation.trim()];
    match quantity.issue.as_ref().and_then(|issue| issue.print_warning()) {
        Some(warning) => subtitle_parts.push(warning),
        None if quantity.label != QUANTITY_NOT_CALCULATED => subtitle_parts.push(&quantity.label),
        None => {}
    }
    let subtitle = subtitle_parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");

    let title = build_item_title(item);
    PrintDocItem {
        id: item.id.clone(),
        index,
        title: if title.is_empty() { "Medicamento".into() } else { title },
        subtitle,
        instruction: if instruction.trim().is_empty() {
            "Instrução não informada.".into()
        } else {
            instruction
        },
        title_bold: item.title_bold,
        title_underline: item.title_underline,
        cautions: item
            .cautions
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
        status: item_status(item, patient),
    }
}

/// Keep the first occurrence of each line, comparing case- and
/// accent-insensitively.
fn unique_by_folded_text<'a>(lines: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && seen.insert(fold_text(line)))
        .map(str::to_string)
        .collect()
}

fn build_recommendations(recs: &RecommendationsState) -> Vec<String> {
    let mut lines: Vec<String> = recs
        .bullets
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();
    let water = recs.water_ml_per_day.trim();
    if !water.is_empty() {
        lines.push(format!("Meta hídrica diária: {water} mL/dia."));
    }
    lines
}

fn build_exams(recs: &RecommendationsState) -> Vec<String> {
    let mut exams = unique_by_folded_text(recs.exams.iter().chain(recs.custom_exams.iter()));
    if !exams.is_empty() {
        exams.extend(
            unique_by_folded_text(&recs.exam_reasons)
                .into_iter()
                .map(|reason| format!("Justificativa: {reason}")),
        );
    }
    exams
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn patient_line(patient: &PatientInfo) -> String {
    let details = [patient.breed.trim(), patient.age_text.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let name = non_blank(Some(patient.name.as_str())).unwrap_or("-");
    format!("{name} ({details})")
}

fn tutor_line(tutor: &TutorInfo) -> String {
    let name = non_blank(Some(tutor.name.as_str()))
        .or_else(|| non_blank(tutor.full_name.as_deref()))
        .unwrap_or("-");
    let mut parts = vec![name.to_string()];
    if let Some(cpf) = non_blank(tutor.cpf.as_deref()) {
        parts.push(format!("CPF: {cpf}"));
    }
    if let Some(rg) = non_blank(tutor.rg.as_deref()) {
        parts.push(format!("RG: {rg}"));
    }
    parts.join(" — ")
}

fn address_line(tutor: &TutorInfo) -> String {
    let city_state = [tutor.city.as_deref(), tutor.state.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join("/");
    [
        non_blank(tutor.street.as_deref()),
        non_blank(tutor.number.as_deref()),
        non_blank(tutor.complement.as_deref()),
        non_blank(tutor.neighborhood.as_deref()),
        non_blank(Some(city_state.as_str())),
        non_blank(tutor.zipcode.as_deref()),
        non_blank(Some(tutor.phone.as_str())),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}

fn or_default(value: &str, fallback: &str) -> String {
    non_blank(Some(value)).unwrap_or(fallback).to_string()
}

/// Render one prescription sheet. Pure: the output depends only on
/// `state` and `options`.
pub fn render_print_doc(state: &PrescriptionState, options: &RenderOptions) -> PrintDoc {
    let kind = options.document_kind;
    let sections: Vec<PrintDocSection> = group_items(&state.items, options.mode, kind)
        .into_iter()
        .map(|section| {
            let mut items: Vec<PrintDocItem> = section
                .items
                .iter()
                .enumerate()
                .map(|(idx, item)| build_item(item, idx + 1, &state.patient))
                .collect();
            items.extend(section.placeholder);
            PrintDocSection {
                key: section.route,
                title: section.route.section_title().to_string(),
                items,
            }
        })
        .collect();

    let (recommendations, exams) = match kind {
        DocumentKind::SpecialControl => (Vec::new(), Vec::new()),
        DocumentKind::Standard => (
            build_recommendations(&state.recommendations),
            build_exams(&state.recommendations),
        ),
    };

    let doc = PrintDoc {
        document_kind: kind,
        document_id: or_default(&state.prescriber.admin_id, config::DEFAULT_DOCUMENT_ID),
        date_label: options.issued_on.format(config::DATE_LABEL_FORMAT).to_string(),
        clinic_name: or_default(&state.prescriber.clinic_name, config::DEFAULT_CLINIC_NAME),
        prescriber_name: or_default(&state.prescriber.name, config::DEFAULT_PRESCRIBER_NAME),
        prescriber_crmv: or_default(&state.prescriber.crmv, config::DEFAULT_PRESCRIBER_CRMV),
        patient_line: patient_line(&state.patient),
        tutor_line: tutor_line(&state.tutor),
        address_line: address_line(&state.tutor),
        sections,
        recommendations,
        exams,
    };

    tracing::debug!(
        prescription_id = %state.id,
        kind = %kind,
        mode = %options.mode,
        sections = doc.sections.len(),
        items = doc.item_count(),
        "Print document rendered"
    );
    doc
}

/// Split by controlled status and render every resulting sheet with its
/// matching document kind, standard first.
pub fn render_prescription(
    state: &PrescriptionState,
    catalog: &dyn ControlledCatalog,
    mode: RenderMode,
    issued_on: NaiveDate,
) -> Vec<PrintDoc> {
    let split = split_by_control(state, catalog);
    split
        .documents()
        .into_iter()
        .map(|(document_kind, doc_state)| {
            render_print_doc(
                doc_state,
                &RenderOptions {
                    mode,
                    document_kind,
                    issued_on,
                },
            )
        })
        .collect()
}
