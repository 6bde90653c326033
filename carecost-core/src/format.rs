//! Currency text for reports: en-US digit grouping, no currency conversion.

use crate::domain::Range;

/// Maximum fraction digits shown, matching `Number.prototype.toLocaleString("en-US")`.
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a dollar amount with thousands separators: `1200` → `"1,200"`, `1234.5` → `"1,234.5"`.
///
/// Whole amounts get no decimal point and trailing zeros are dropped. Values are
/// shown as received; only digits past the third decimal place are rounded away.
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"$1,200"`
pub fn format_price(value: f64) -> String {
    format!("${}", format_amount(value))
}

/// `"$1,200 - $3,400"`
pub fn format_range(range: &Range) -> String {
    format!("{} - {}", format_price(range.min()), format_price(range.max()))
}
