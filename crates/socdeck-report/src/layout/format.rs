//! Number formatting with `.` as grouping and `,` as decimal separator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of a value that does not exist (undefined trend, missing month).
pub const NO_VALUE: &str = "\u{2013}";

fn group_digits(digits: &str) -> String {
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

/// `12345` → `12.345`
#[must_use]
pub fn format_grouped(value: u64) -> String {
    group_digits(&value.to_string())
}

/// `1234` → `+1.234`, `-12` → `-12`, `0` → `0`
#[must_use]
pub fn format_grouped_signed(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    match value.signum() {
        1 => format!("+{grouped}"),
        -1 => format!("-{grouped}"),
        _ => grouped,
    }
}

/// Fixed-point with grouped integer part: `(1234.56, 1)` → `1.234,6`
#[must_use]
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// `4.66` → `4,7%`
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value, 1))
}

/// Always signed: `50.0` → `+50,0%`, `-20.0` → `-20,0%`, `0.0` and `-0.04` → `+0,0%`
#[must_use]
pub fn format_signed_percent(value: f64) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    let magnitude = format_decimal(value.abs(), 1);
    let rounds_to_zero = !magnitude.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if value < 0.0 && !rounds_to_zero { '-' } else { '+' };
    format!("{sign}{magnitude}%")
}

/// K/M-suffixed form for dense displays: `999` → `999`, `1234` → `1,2K`,
/// `3_400_000` → `3,4M`.
#[must_use]
pub fn format_compact(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }
    // Tenths of a thousand, rounded half up.
    let tenths_k = value.saturating_add(50) / 100;
    if tenths_k < 10_000 {
        return format!("{},{}K", tenths_k / 10, tenths_k % 10);
    }
    let tenths_m = value.saturating_add(50_000) / 100_000;
    format!("{},{}M", group_digits(&(tenths_m / 10).to_string()), tenths_m % 10)
}

/// Two decimals plus currency code: `1234.5 EUR` → `1.234,50 EUR`
#[must_use]
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{},{frac_part} {currency}", group_digits(int_part))
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out = out.trim_end().to_string();
    out.push('\u{2026}');
    out
}
