//! # Shared Formatting Functions
//!
//! Number formatting used by every dashboard view, so prices, volumes and
//! percentages read the same in cards, charts and tables.
//!
//! - [`format_number`] - Thousands-grouped fixed-point number
//! - [`format_currency`] - Currency symbol plus grouped number
//! - [`format_compact`] - Compact notation with at most one fraction digit
//! - [`format_signed_percent`] - Percentage with an explicit sign
//! - [`is_negative_change`] - The single sign test behind colors and arrows
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_compact, format_currency, format_signed_percent};
//!
//! assert_eq!(format_currency(1234567.891, "inr"), "₹1,234,567.89");
//! assert_eq!(format_compact(2_500_000_000_000.0), "2.5T");
//! assert_eq!(format_signed_percent(1.5, 2), "+1.50%");
//! ```

/// Whether a change value counts as negative for color, arrow and sign.
///
/// Always decided on the number, never on a formatted string, so `-0.0`
/// is non-negative.
///
/// ```rust
/// use shared::utils::is_negative_change;
///
/// assert!(is_negative_change(-0.001));
/// assert!(!is_negative_change(-0.0));
/// assert!(!is_negative_change(0.0));
/// ```
pub fn is_negative_change(value: f64) -> bool {
    value < 0.0
}

/// Format a number with `decimals` fraction digits and comma thousands separators.
///
/// A negative value that rounds to zero loses its minus sign.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
/// assert_eq!(format_number(-1234.6, 0), "-1,235");
/// assert_eq!(format_number(999.0, 2), "999.00");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    let rounds_to_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !rounds_to_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format an integer count with thousands separators.
///
/// ```rust
/// use shared::utils::format_integer;
///
/// assert_eq!(format_integer(15234), "15,234");
/// ```
pub fn format_integer(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Display symbol for a currency code (`inr` → `₹`).
///
/// Unknown codes fall back to the upper-cased code followed by a space.
pub fn currency_symbol(currency: &str) -> String {
    match currency.to_lowercase().as_str() {
        "inr" => "₹".to_string(),
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        "jpy" => "¥".to_string(),
        other => format!("{} ", other.to_uppercase()),
    }
}

/// Number of fraction digits used for a price.
///
/// Sub-unit prices keep six digits so small-cap coins don't render as zero.
pub fn price_decimals(value: f64) -> usize {
    let abs = value.abs();
    if abs > 0.0 && abs < 1.0 {
        6
    } else {
        2
    }
}

/// Format a price in `currency`: symbol, grouped digits, [`price_decimals`] fraction digits.
///
/// ```rust
/// use shared::utils::format_currency;
///
/// assert_eq!(format_currency(5712345.5, "inr"), "₹5,712,345.50");
/// assert_eq!(format_currency(-12.0, "usd"), "-$12.00");
/// assert_eq!(format_currency(0.00012345, "usd"), "$0.000123");
/// ```
pub fn format_currency(value: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let number = format_number(value, price_decimals(value));
    match number.strip_prefix('-') {
        Some(rest) => format!("-{}{}", symbol, rest),
        None => format!("{}{}", symbol, number),
    }
}

const COMPACT_UNITS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Compact notation with at most one fraction digit (`2.5T`, `12.3K`, `999`).
///
/// ```rust
/// use shared::utils::format_compact;
///
/// assert_eq!(format_compact(2_500_000_000_000.0), "2.5T");
/// assert_eq!(format_compact(1_230_000_000.0), "1.2B");
/// assert_eq!(format_compact(999_960.0), "1M");
/// assert_eq!(format_compact(42.0), "42");
/// ```
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let abs = value.abs();
    let mut level = COMPACT_UNITS
        .iter()
        .rposition(|(unit, _)| abs >= *unit)
        .unwrap_or(0);

    let round1 = |x: f64| (x * 10.0).round() / 10.0;
    let mut scaled = round1(abs / COMPACT_UNITS[level].0);
    // 999.96K rounds up into the next unit
    if scaled >= 1000.0 && level + 1 < COMPACT_UNITS.len() {
        level += 1;
        scaled = round1(abs / COMPACT_UNITS[level].0);
    }

    let sign = if value < 0.0 && scaled > 0.0 { "-" } else { "" };
    let digits = if scaled.fract() == 0.0 {
        format!("{:.0}", scaled)
    } else {
        format!("{:.1}", scaled)
    };
    format!("{}{}{}", sign, digits, COMPACT_UNITS[level].1)
}

/// Compact notation prefixed with the currency symbol (`$2.5T`).
pub fn format_compact_currency(value: f64, currency: &str) -> String {
    let compact = format_compact(value);
    match compact.strip_prefix('-') {
        Some(rest) => format!("-{}{}", currency_symbol(currency), rest),
        None => format!("{}{}", currency_symbol(currency), compact),
    }
}

/// Percentage with an explicit sign taken from [`is_negative_change`].
///
/// ```rust
/// use shared::utils::format_signed_percent;
///
/// assert_eq!(format_signed_percent(2.345678, 4), "+2.3457%");
/// assert_eq!(format_signed_percent(-1.2, 2), "-1.20%");
/// assert_eq!(format_signed_percent(-0.0, 2), "+0.00%");
/// ```
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    let sign = if is_negative_change(value) { '-' } else { '+' };
    format!("{}{:.*}%", sign, decimals, value.abs())
}

/// Unsigned-style percentage (`51.23%`), as used for dominance.
pub fn format_percent(value: f64, decimals: usize) -> String {
    // adding 0.0 turns -0.0 into 0.0
    format!("{:.*}%", decimals, value + 0.0)
}
