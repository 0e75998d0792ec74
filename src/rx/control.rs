use std::collections::{HashMap, HashSet};

use crate::models::{DocumentKind, PrescriptionItem, PrescriptionState, RecommendationsState};

/// Catalog knowledge about controlled substances, keyed by catalog drug id.
pub trait ControlledCatalog {
    fn is_controlled(&self, catalog_drug_id: &str) -> bool;
}

/// No catalog available: only the item flag counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalog;

impl ControlledCatalog for NoCatalog {
    fn is_controlled(&self, _catalog_drug_id: &str) -> bool {
        false
    }
}

/// Set of controlled catalog ids.
impl ControlledCatalog for HashSet<String> {
    fn is_controlled(&self, catalog_drug_id: &str) -> bool {
        self.contains(catalog_drug_id)
    }
}

/// Catalog id → controlled flag.
impl ControlledCatalog for HashMap<String, bool> {
    fn is_controlled(&self, catalog_drug_id: &str) -> bool {
        self.get(catalog_drug_id).copied().unwrap_or(false)
    }
}

pub fn is_controlled_item(item: &PrescriptionItem, catalog: &dyn ControlledCatalog) -> bool {
    item.controlled
        || item
            .catalog_drug_id
            .as_deref()
            .is_some_and(|id| catalog.is_controlled(id))
}

/// A prescription partitioned into its two printable sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSplit {
    pub standard: Option<PrescriptionState>,
    pub special_control: Option<PrescriptionState>,
}

impl ControlSplit {
    /// Documents to print, standard first.
    pub fn documents(&self) -> Vec<(DocumentKind, &PrescriptionState)> {
        let mut docs = Vec::with_capacity(2);
        if let Some(state) = &self.standard {
            docs.push((DocumentKind::Standard, state));
        }
        if let Some(state) = &self.special_control {
            docs.push((DocumentKind::SpecialControl, state));
        }
        docs
    }
}

/// Partition items by controlled status. Without controlled items the
/// prescription is returned whole as the standard document. Otherwise each
/// sheet keeps the full patient/tutor/prescriber context; the
/// special-control sheet carries no recommendations or exams, and there is
/// no standard sheet when every item is controlled.
pub fn split_by_control(state: &PrescriptionState, catalog: &dyn ControlledCatalog) -> ControlSplit {
    let (controlled, standard): (Vec<PrescriptionItem>, Vec<PrescriptionItem>) = state
        .items
        .iter()
        .cloned()
        .partition(|item| is_controlled_item(item, catalog));

    if controlled.is_empty() {
        return ControlSplit {
            standard: Some(state.clone()),
            special_control: None,
        };
    }

    tracing::debug!(
        prescription_id = %state.id,
        controlled = controlled.len(),
        standard = standard.len(),
        "Prescription split by controlled status"
    );

    let standard = (!standard.is_empty()).then(|| PrescriptionState {
        items: standard,
        ..state.clone()
    });
    let special_control = PrescriptionState {
        items: controlled,
        recommendations: RecommendationsState::default(),
        ..state.clone()
    };

    ControlSplit {
        standard,
        special_control: Some(special_control),
    }
}
