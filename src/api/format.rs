//! Human-readable formatting of durations and rupiah amounts.

use rust_decimal::Decimal;

/// Formats minutes as `2h 30m`, `2h` or `45m`. Non-positive values format
/// as an empty string.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return String::new();
    }
    match (minutes / 60, minutes % 60) {
        (0, mins) => format!("{mins}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, mins) => format!("{hours}h {mins}m"),
    }
}

/// Formats a rupiah amount as `Rp. 1.250.000`, rounded to whole rupiah.
#[must_use]
pub fn format_idr(amount: Decimal) -> String {
    let digits = amount.abs().round().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount.is_sign_negative() && grouped != "0" {
        format!("-Rp. {grouped}")
    } else {
        format!("Rp. {grouped}")
    }
}
