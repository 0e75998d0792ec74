//! Frequency normalization. Precedence: explicit token, then hour
//! interval, then times-per-day.

use crate::models::{FrequencyType, PrescriptionItem};

use super::numbers::{format_number, parse_positive};

pub const FREQUENCY_NOT_INFORMED: &str = "frequência não informada";

/// Times-per-day → hours between doses, for the usual schedules.
const COMMON_INTERVALS: [(u32, u32); 8] = [
    (1, 24),
    (2, 12),
    (3, 8),
    (4, 6),
    (6, 4),
    (8, 3),
    (12, 2),
    (24, 1),
];

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResolution {
    pub times_per_day: Option<f64>,
    pub interval_hours: Option<f64>,
    pub label: String,
}

impl FrequencyResolution {
    fn unresolved() -> Self {
        Self {
            times_per_day: None,
            interval_hours: None,
            label: FREQUENCY_NOT_INFORMED.to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.times_per_day.is_some()
    }
}

fn interval_label(hours: f64) -> String {
    if (hours - 1.0).abs() < f64::EPSILON {
        "a cada 1 hora".to_string()
    } else {
        format!("a cada {} horas", format_number(hours, 1))
    }
}

fn common_interval(times_per_day: f64) -> Option<u32> {
    COMMON_INTERVALS
        .iter()
        .find(|(times, _)| (f64::from(*times) - times_per_day).abs() < 1e-9)
        .map(|(_, hours)| *hours)
}

/// Internal resolution used for totals and the calculation memory.
pub fn resolve_frequency(item: &PrescriptionItem) -> FrequencyResolution {
    if let Some(token) = item.frequency_token {
        let times = f64::from(token.times_per_day());
        let hours = 24.0 / times;
        let label = if token.times_per_day() == 1 {
            "uma vez por dia".to_string()
        } else {
            interval_label(hours)
        };
        return FrequencyResolution {
            times_per_day: Some(times),
            interval_hours: Some(hours),
            label,
        };
    }

    if item.frequency_type == FrequencyType::EveryHours {
        let Some(hours) = parse_positive(&item.every_hours) else {
            return FrequencyResolution::unresolved();
        };
        return FrequencyResolution {
            times_per_day: Some(24.0 / hours),
            interval_hours: Some(hours),
            label: interval_label(hours),
        };
    }

    let Some(times) = parse_positive(&item.times_per_day) else {
        return FrequencyResolution::unresolved();
    };
    let label = if times == 1.0 {
        "uma vez por dia".to_string()
    } else {
        format!("{} vezes ao dia", format_number(times, 1))
    };
    FrequencyResolution {
        times_per_day: Some(times),
        interval_hours: Some(24.0 / times),
        label,
    }
}

/// Wording for the caregiver. Counts per day are rephrased as an hour
/// interval ("3 vezes ao dia" → "a cada 8 horas"). `None` when the item
/// has no usable frequency.
pub fn caregiver_frequency_label(item: &PrescriptionItem) -> Option<String> {
    let resolution = resolve_frequency(item);
    let times = resolution.times_per_day?;

    if item.frequency_token.is_some() || item.frequency_type == FrequencyType::EveryHours {
        return Some(resolution.label);
    }
    if times == 1.0 {
        return Some("uma vez por dia".to_string());
    }
    let label = match common_interval(times) {
        Some(hours) => interval_label(f64::from(hours)),
        None => format!("a cada {} horas", format_number(24.0 / times, 1)),
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyToken;

    fn times(value: &str) -> PrescriptionItem {
        PrescriptionItem {
            frequency_type: FrequencyType::TimesPerDay,
            times_per_day: value.into(),
            ..PrescriptionItem::default()
        }
    }

    fn every(value: &str) -> PrescriptionItem {
        PrescriptionItem {
            frequency_type: FrequencyType::EveryHours,
            every_hours: value.into(),
            ..PrescriptionItem::default()
        }
    }

    #[test]
    fn every_hours_interval() {
        let r = resolve_frequency(&every("8"));
        assert_eq!(r.label, "a cada 8 horas");
        assert_eq!(r.times_per_day, Some(3.0));
        assert_eq!(caregiver_frequency_label(&every("8")).as_deref(), Some("a cada 8 horas"));
    }

    #[test]
    fn times_per_day_labels() {
        assert_eq!(resolve_frequency(&times("1")).label, "uma vez por dia");
        assert_eq!(resolve_frequency(&times("3")).label, "3 vezes ao dia");
        assert_eq!(resolve_frequency(&times("3")).times_per_day, Some(3.0));
    }

    #[test]
    fn caregiver_label_uses_common_intervals() {
        assert_eq!(caregiver_frequency_label(&times("3")).as_deref(), Some("a cada 8 horas"));
        assert_eq!(caregiver_frequency_label(&times("2")).as_deref(), Some("a cada 12 horas"));
        assert_eq!(caregiver_frequency_label(&times("24")).as_deref(), Some("a cada 1 hora"));
        assert_eq!(caregiver_frequency_label(&times("1")).as_deref(), Some("uma vez por dia"));
    }

    #[test]
    fn caregiver_label_falls_back_to_one_decimal() {
        assert_eq!(caregiver_frequency_label(&times("5")).as_deref(), Some("a cada 4,8 horas"));
        assert_eq!(caregiver_frequency_label(&times("7")).as_deref(), Some("a cada 3,4 horas"));
    }

    #[test]
    fn token_takes_precedence() {
        let mut item = every("6");
        item.times_per_day = "4".into();
        item.frequency_token = Some(FrequencyToken::Bid);
        let r = resolve_frequency(&item);
        assert_eq!(r.times_per_day, Some(2.0));
        assert_eq!(r.interval_hours, Some(12.0));
        assert_eq!(r.label, "a cada 12 horas");

        item.frequency_token = Some(FrequencyToken::Sid);
        assert_eq!(resolve_frequency(&item).label, "uma vez por dia");
    }

    #[test]
    fn interval_beats_times_per_day() {
        let mut item = every("12");
        item.times_per_day = "3".into();
        assert_eq!(resolve_frequency(&item).times_per_day, Some(2.0));
    }

    #[test]
    fn unparsable_values_never_panic() {
        for item in [times(""), times("0"), times("-2"), times("duas"), every(""), every("0")] {
            let r = resolve_frequency(&item);
            assert_eq!(r.times_per_day, None);
            assert_eq!(r.label, FREQUENCY_NOT_INFORMED);
            assert_eq!(caregiver_frequency_label(&item), None);
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        for item in [times("3"), every("8"), times("x")] {
            assert_eq!(resolve_frequency(&item), resolve_frequency(&item));
            assert_eq!(caregiver_frequency_label(&item), caregiver_frequency_label(&item));
        }
    }
}
