use serde::{Deserialize, Serialize};

use super::enums::{DocumentKind, ItemStatus, RouteGroup};

/// A rendered prescription line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocItem {
    pub id: String,
    /// 1-based position inside its section.
    pub index: usize,
    pub title: String,
    pub subtitle: String,
    pub instruction: String,
    pub title_bold: bool,
    pub title_underline: bool,
    pub cautions: Vec<String>,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintDocSection {
    pub key: RouteGroup,
    pub title: String,
    pub items: Vec<PrintDocItem>,
}

/// Display-ready prescription sheet consumed by the HTML/PDF layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDoc {
    pub document_kind: DocumentKind,
    pub document_id: String,
    pub date_label: String,
    pub clinic_name: String,
    pub prescriber_name: String,
    pub prescriber_crmv: String,
    pub patient_line: String,
    pub tutor_line: String,
    pub address_line: String,
    pub sections: Vec<PrintDocSection>,
    pub recommendations: Vec<String>,
    pub exams: Vec<String>,
}

impl PrintDoc {
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
