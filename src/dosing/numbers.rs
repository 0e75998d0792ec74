//! Numeric text at the editor boundary, and pt-BR display of results.

/// Parse a user-typed number. Accepts either `,` or `.` as decimal
/// separator; blank, garbage and non-finite input all yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a number and keep it only when strictly positive.
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|n| *n > 0.0)
}

/// Format like `Intl.NumberFormat('pt-BR')`: comma decimals, dot thousands,
/// at most `max_fraction` decimals and no trailing zeros.
pub fn format_number(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let factor = 10f64.powi(max_fraction as i32);
    let rounded = (value * factor).round() / factor;
    let text = format!("{:.*}", max_fraction, rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if rounded < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Two-decimal display, the default precision for doses.
pub fn format_amount(value: f64) -> String {
    format_number(value, 2)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Render a quarter multiple as a kitchen fraction: 0.5 → "1/2",
/// 1.25 → "1 1/4". Whole numbers and non-quarters yield `None`.
pub fn quarter_fraction(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let quarters = (value * 4.0).round();
    if (value * 4.0 - quarters).abs() > 1e-9 || quarters <= 0.0 {
        return None;
    }
    let quarters = quarters as u64;
    let fraction = match quarters % 4 {
        1 => "1/4",
        2 => "1/2",
        3 => "3/4",
        _ => return None,
    };
    let whole = quarters / 4;
    if whole == 0 {
        Some(fraction.to_string())
    } else {
        Some(format!("{whole} {fraction}"))
    }
}

/// Nearest quarter: round(x × 4) / 4.
pub fn round_to_quarter(value: f64) -> f64 {
    (value * 4.0).round() / 4.0
}
