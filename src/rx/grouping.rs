use crate::models::{DocumentKind, ItemStatus, PrescriptionItem, PrintDocItem, RenderMode, RouteGroup};

/// Items of one administration route, in prescription order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSection<'a> {
    pub route: RouteGroup,
    pub items: Vec<&'a PrescriptionItem>,
    /// Sample line shown by template previews that have nothing to show.
    pub placeholder: Option<PrintDocItem>,
}

/// Bucket items into the fixed section order. Items without a route land
/// in OUTROS.
///
/// `Final` drops empty sections. `Template` keeps only the oral section
/// and fills it with a placeholder when it is empty.
pub fn group_items(items: &[PrescriptionItem], mode: RenderMode, kind: DocumentKind) -> Vec<RouteSection<'_>> {
    let routes: &[RouteGroup] = match mode {
        RenderMode::Final => &RouteGroup::SECTION_ORDER,
        RenderMode::Template => &[RouteGroup::Oral],
    };

    routes
        .iter()
        .filter_map(|&route| {
            let bucket: Vec<&PrescriptionItem> = items
                .iter()
                .filter(|item| item.route_group.unwrap_or(RouteGroup::Outros) == route)
                .collect();

            match (mode, bucket.is_empty()) {
                (RenderMode::Final, true) => None,
                (RenderMode::Template, true) => Some(RouteSection {
                    route,
                    items: bucket,
                    placeholder: Some(placeholder_item(route, kind)),
                }),
                _ => Some(RouteSection {
                    route,
                    items: bucket,
                    placeholder: None,
                }),
            }
        })
        .collect()
}

/// Representative line for style previews of an empty template.
pub fn placeholder_item(route: RouteGroup, kind: DocumentKind) -> PrintDocItem {
    match kind {
        DocumentKind::SpecialControl => PrintDocItem {
            id: format!("{route}-placeholder-special"),
            index: 1,
            title: "Amoxicilina + Clavulanato".into(),
            subtitle: "Comprimido - Uso Oral".into(),
            instruction: "Administrar 1 comprimido por vez, por via oral, a cada 12 horas, durante 7 dias."
                .into(),
            title_bold: false,
            title_underline: false,
            cautions: vec!["Uso sob prescrição e acompanhamento veterinário.".into()],
            status: ItemStatus::Ok,
        },
        DocumentKind::Standard => PrintDocItem {
            id: format!("{route}-placeholder-standard"),
            index: 1,
            title: "Dipirona Sódica".into(),
            subtitle: "Gotas - Uso Oral".into(),
            instruction: "Administrar o volume calculado por vez, por via oral, a cada 8 horas.".into(),
            title_bold: false,
            title_underline: false,
            cautions: Vec::new(),
            status: ItemStatus::Ok,
        },
    }
}
