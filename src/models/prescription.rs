use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::enums::{FrequencyToken, FrequencyType, ItemCategory, RouteGroup};
use crate::dosing::parse_number;

/// Editor fields arrive as strings; a blank value means "not selected".
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One line of a prescription, as maintained by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionItem {
    pub id: String,
    pub category: ItemCategory,
    pub catalog_drug_id: Option<String>,
    pub controlled: bool,
    pub name: String,
    pub presentation: String,
    pub concentration: String,
    pub commercial_name: Option<String>,
    /// Free-text notes appended under a generated instruction.
    pub observations: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub route_group: Option<RouteGroup>,
    pub dose_value: String,
    pub dose_unit: String,
    pub auto_instruction: bool,
    pub frequency_type: FrequencyType,
    #[serde(deserialize_with = "blank_as_none")]
    pub frequency_token: Option<FrequencyToken>,
    pub times_per_day: String,
    pub every_hours: String,
    pub duration_days: String,
    pub until_finished: bool,
    pub continuous_use: bool,
    pub instruction: String,
    pub manual_edited: bool,
    pub title_bold: bool,
    pub title_underline: bool,
    pub cautions: Vec<String>,
}

impl Default for PrescriptionItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            category: ItemCategory::Medication,
            catalog_drug_id: None,
            controlled: false,
            name: String::new(),
            presentation: String::new(),
            concentration: String::new(),
            commercial_name: None,
            observations: String::new(),
            route_group: None,
            dose_value: String::new(),
            dose_unit: String::new(),
            auto_instruction: true,
            frequency_type: FrequencyType::TimesPerDay,
            frequency_token: None,
            times_per_day: String::new(),
            every_hours: String::new(),
            duration_days: String::new(),
            until_finished: false,
            continuous_use: false,
            instruction: String::new(),
            manual_edited: false,
            title_bold: false,
            title_underline: false,
            cautions: Vec::new(),
        }
    }
}

impl PrescriptionItem {
    /// A fresh item as the editor creates it: per-kg dose, twice a day for 7 days.
    pub fn new(route_group: RouteGroup, frequency_type: FrequencyType) -> Self {
        Self {
            id: format!("item-{}", Uuid::new_v4()),
            route_group: Some(route_group),
            frequency_type,
            dose_unit: "mg/kg".into(),
            times_per_day: "2".into(),
            duration_days: "7".into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfo {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_text: String,
    /// Numeric text as typed ("12,5"); parsed on demand.
    pub weight_kg: String,
}

impl PatientInfo {
    /// Positive body weight in kg, if one was entered.
    pub fn weight(&self) -> Option<f64> {
        parse_number(&self.weight_kg).filter(|w| *w > 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TutorInfo {
    pub name: String,
    #[serde(alias = "full_name")]
    pub full_name: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub phone: String,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriberInfo {
    pub admin_id: String,
    pub name: String,
    pub crmv: String,
    pub clinic_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationsState {
    pub bullets: Vec<String>,
    pub water_ml_per_day: String,
    pub exams: Vec<String>,
    pub custom_exams: Vec<String>,
    pub exam_reasons: Vec<String>,
}

impl RecommendationsState {
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
            && self.water_ml_per_day.trim().is_empty()
            && self.exams.is_empty()
            && self.custom_exams.is_empty()
            && self.exam_reasons.is_empty()
    }
}

/// The whole prescription handed over by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionState {
    pub id: String,
    pub prescriber: PrescriberInfo,
    pub patient: PatientInfo,
    pub tutor: TutorInfo,
    pub items: Vec<PrescriptionItem>,
    pub recommendations: RecommendationsState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_editor_defaults() {
        let item = PrescriptionItem::new(RouteGroup::Oral, FrequencyType::TimesPerDay);
        assert!(item.id.starts_with("item-"));
        assert_eq!(item.dose_unit, "mg/kg");
        assert_eq!(item.times_per_day, "2");
        assert_eq!(item.duration_days, "7");
        assert!(item.auto_instruction);
        assert!(!item.manual_edited);
        assert_eq!(item.route_group, Some(RouteGroup::Oral));
    }

    #[test]
    fn new_items_get_distinct_ids() {
        let a = PrescriptionItem::new(RouteGroup::Oral, FrequencyType::TimesPerDay);
        let b = PrescriptionItem::new(RouteGroup::Oral, FrequencyType::TimesPerDay);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn deserializes_editor_json() {
        let json = r#"{
            "id": "i1",
            "name": "Dipirona",
            "routeGroup": "ORAL",
            "frequencyType": "everyHours",
            "frequencyToken": "",
            "everyHours": "8",
            "doseValue": "25",
            "doseUnit": "mg/kg",
            "cautions": ["Dar com alimento"]
        }"#;
        let item: PrescriptionItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.route_group, Some(RouteGroup::Oral));
        assert_eq!(item.frequency_type, FrequencyType::EveryHours);
        assert_eq!(item.frequency_token, None);
        assert_eq!(item.every_hours, "8");
        assert!(item.auto_instruction);
        assert_eq!(item.cautions, vec!["Dar com alimento".to_string()]);
    }

    #[test]
    fn deserializes_frequency_token() {
        let item: PrescriptionItem =
            serde_json::from_str(r#"{"frequencyToken": "BID", "routeGroup": ""}"#).unwrap();
        assert_eq!(item.frequency_token, Some(FrequencyToken::Bid));
        assert_eq!(item.route_group, None);
    }

    #[test]
    fn tutor_accepts_snake_case_full_name() {
        let tutor: TutorInfo = serde_json::from_str(r#"{"full_name": "Ana Souza"}"#).unwrap();
        assert_eq!(tutor.full_name.as_deref(), Some("Ana Souza"));
    }

    #[test]
    fn patient_weight_parsing() {
        let mut patient = PatientInfo::default();
        assert_eq!(patient.weight(), None);
        patient.weight_kg = "12,5".into();
        assert_eq!(patient.weight(), Some(12.5));
        patient.weight_kg = "0".into();
        assert_eq!(patient.weight(), None);
        patient.weight_kg = "abc".into();
        assert_eq!(patient.weight(), None);
    }
}
