//! Number formatting for human-facing exports.

/// Round half away from zero and group thousands with commas.
pub fn grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn area_m2(value: f64) -> String {
    format!("{} m²", grouped(value))
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Two-decimal rounding for tabular percentage cells.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
