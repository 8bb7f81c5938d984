//! Cell rendering for text-based writers.

use metrics_core::{FormatClass, MetricValue};

/// `value` with `decimals` places and comma thousands separators.
fn with_separators(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Abbreviates large magnitudes: `1.2B`, `345.6M`, `78.9K`, else two decimals.
/// Non-finite input renders empty.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let magnitude = n.abs();
    if magnitude >= 1e9 {
        format!("{}B", with_separators(n / 1e9, 1))
    } else if magnitude >= 1e6 {
        format!("{}M", with_separators(n / 1e6, 1))
    } else if magnitude >= 1e3 {
        format!("{}K", with_separators(n / 1e3, 1))
    } else {
        with_separators(n, 2)
    }
}

pub fn format_percentage(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    format!("{:.1}%", n * 100.0)
}

/// Renders one cell according to its column's format class. Nulls are empty.
pub fn render(value: &MetricValue, class: FormatClass) -> String {
    match value {
        MetricValue::Null => String::new(),
        MetricValue::Text(text) => text.clone(),
        MetricValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        MetricValue::Number(n) => match class {
            FormatClass::Percentage => format_percentage(*n),
            FormatClass::Decimal => with_separators(*n, 1),
            FormatClass::Abbreviated => format_number(*n),
            FormatClass::Text => n.to_string(),
        },
    }
}
