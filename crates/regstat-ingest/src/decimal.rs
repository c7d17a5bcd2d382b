//! Locale-tolerant numeric field parsing.
//!
//! Source tables write decimals with a comma (`1234,5`) and sometimes group
//! thousands with spaces. Every helper here is total: text that does not
//! start with a number reads as zero.

/// Characters used as thousands separators in source tables.
fn is_group_separator(ch: char) -> bool {
    ch == ' ' || ch == '\u{00a0}' || ch == '\u{202f}'
}

/// Strips grouping spaces and turns the first comma into a period.
///
/// Grouped numbers read whole: `"12 345,6"` is 12345.6. A plain lenient
/// float reader stops at the space and returns 12; the grouped reading is
/// intended.
pub fn normalize_decimal(raw: &str) -> String {
    let compact: String = raw.trim().chars().filter(|&ch| !is_group_separator(ch)).collect();
    compact.replacen(',', ".", 1)
}

/// Longest numeric prefix of `s`, read the way a lenient float parser does:
/// `"12abc"` is 12, `"abc"` is nothing.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < len && bytes[end] == b'.' {
        let mut cursor = end + 1;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        digits += cursor - (end + 1);
        if digits > 0 {
            end = cursor;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if cursor < len && matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Parses a decimal field; empty, unparseable or non-finite input is `0.0`.
pub fn parse_decimal(raw: &str) -> f64 {
    leading_number(&normalize_decimal(raw))
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parses an absolute count, rounded to the nearest integer.
///
/// Negative values clamp to zero.
pub fn parse_count(raw: &str) -> u64 {
    let value = parse_decimal(raw);
    if value <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX.
        value.round() as u64
    }
}

/// Parses a per-population rate; negative values clamp to zero.
pub fn parse_rate(raw: &str) -> f64 {
    parse_decimal(raw).max(0.0)
}
