use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde name, so the JSON contract and
/// `as_str()` never drift apart.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(RouteGroup {
    Oral => "ORAL",
    Otologico => "OTOLOGICO",
    Oftalmico => "OFTALMICO",
    Topico => "TOPICO",
    Intranasal => "INTRANASAL",
    Retal => "RETAL",
    Sc => "SC",
    Im => "IM",
    Iv => "IV",
    Inalatorio => "INALATORIO",
    Transdermico => "TRANSDERMICO",
    Outros => "OUTROS",
});

str_enum!(FrequencyType {
    TimesPerDay => "timesPerDay",
    EveryHours => "everyHours",
});

str_enum!(FrequencyToken {
    Sid => "SID",
    Bid => "BID",
    Tid => "TID",
    Qid => "QID",
});

str_enum!(ItemCategory {
    Medication => "medication",
    Hygiene => "hygiene",
    Other => "other",
});

str_enum!(DocumentKind {
    Standard => "standard",
    SpecialControl => "special-control",
});

str_enum!(RenderMode {
    Final => "final",
    Template => "template",
});

str_enum!(ItemStatus {
    Ok => "ok",
    Incomplete => "incomplete",
});

impl RouteGroup {
    /// Fixed print order of the route sections.
    pub const SECTION_ORDER: [RouteGroup; 12] = [
        RouteGroup::Oral,
        RouteGroup::Otologico,
        RouteGroup::Oftalmico,
        RouteGroup::Topico,
        RouteGroup::Intranasal,
        RouteGroup::Retal,
        RouteGroup::Sc,
        RouteGroup::Im,
        RouteGroup::Iv,
        RouteGroup::Inalatorio,
        RouteGroup::Transdermico,
        RouteGroup::Outros,
    ];

    /// Section heading printed above the items of this route.
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Oral => "USO ORAL",
            Self::Otologico => "USO OTOLÓGICO",
            Self::Oftalmico => "USO OFTÁLMICO",
            Self::Topico => "USO TÓPICO",
            Self::Intranasal => "USO INTRANASAL",
            Self::Retal => "USO RETAL",
            Self::Sc => "USO SUBCUTÂNEO",
            Self::Im => "USO INTRAMUSCULAR",
            Self::Iv => "USO INTRAVENOSO",
            Self::Inalatorio => "USO INALATÓRIO",
            Self::Transdermico => "USO TRANSDÉRMICO",
            Self::Outros => "OUTROS",
        }
    }

    /// Route wording used inside caregiver instructions ("por via …").
    pub fn route_text(&self) -> &'static str {
        match self {
            Self::Oral => "oral",
            Self::Otologico => "otológica",
            Self::Oftalmico => "oftálmica",
            Self::Topico => "tópica",
            Self::Intranasal => "intranasal",
            Self::Retal => "retal",
            Self::Sc => "subcutânea",
            Self::Im => "intramuscular",
            Self::Iv => "intravenosa",
            Self::Inalatorio => "inalatória",
            Self::Transdermico => "transdérmica",
            Self::Outros => "definida pelo prescritor",
        }
    }
}

impl FrequencyToken {
    pub fn times_per_day(&self) -> u32 {
        match self {
            Self::Sid => 1,
            Self::Bid => 2,
            Self::Tid => 3,
            Self::Qid => 4,
        }
    }
}
