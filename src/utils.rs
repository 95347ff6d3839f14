use regex::Regex;
use std::sync::LazyLock;

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)").expect("leading digits pattern is valid"));

static LEADING_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)").expect("leading decimal pattern is valid")
});

// Optional SAR prefix, plain or comma-grouped integer part, optional fraction.
static STRICT_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:sar\s*)?([0-9]{1,3}(,[0-9]{3})+|[0-9]+)(\.[0-9]+)?$").expect("amount pattern is valid")
});

/// Removes every character that is not an ASCII digit or a decimal point.
/// "SAR 2,400" becomes "2400"; "12 months" becomes "12".
pub fn strip_to_decimal(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Lenient amount parsing: strip, then read the longest leading decimal.
/// Anything unreadable is 0.
pub fn parse_amount_lenient(raw: &str) -> f64 {
    let stripped = strip_to_decimal(raw);
    LEADING_DECIMAL
        .captures(&stripped)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Strict amount parsing. Blank is 0; anything else must look like an amount.
/// Returns `None` when the cell is not a clean amount.
pub fn parse_amount_strict(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if !STRICT_AMOUNT.is_match(trimmed) {
        return None;
    }
    strip_to_decimal(trimmed).parse::<f64>().ok()
}

/// Leading run of ASCII digits as an integer. "12 months" -> Some(12), "about 12" -> None.
/// A run too long for `u32` saturates.
pub fn leading_digits(raw: &str) -> Option<u32> {
    LEADING_DIGITS
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

/// Rounds to two decimal places, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Integer percentage of `part` in `whole`, rounded to nearest. 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
