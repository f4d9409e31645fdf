//! Lenient numeric parsing for raw vital-sign values.
//!
//! The provider's records follow loose web conventions: `"120abc"` reads as
//! 120, `" 98.6 "` as 98.6, and an empty string compares as zero. These
//! helpers reproduce those conventions exactly so that scores and cohort
//! membership match what the provider's own tooling reports.

use triage_contracts::patient::Measurement;

/// Parse the leading integer of `s`.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when no digit is found. Values beyond the
/// `i64` range saturate.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = split_sign(s);

    let digits: &str = &rest[..digit_run(rest)];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse the leading decimal number of `s`.
///
/// Accepts leading whitespace, a sign, digits with an optional fraction, an
/// optional exponent, and the literal `Infinity`. Trailing text is ignored.
pub fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, rest) = split_sign(s);

    if rest.starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_len = digit_run(rest);
    let mut end = int_len;
    let mut frac_len = 0;
    if rest[end..].starts_with('.') {
        frac_len = digit_run(&rest[end + 1..]);
        end += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    // Only consume an exponent that actually carries digits.
    if let Some(after_e) = rest[end..].strip_prefix(|c: char| c == 'e' || c == 'E') {
        let (_, exp_body) = split_sign(after_e);
        let exp_digits = digit_run(exp_body);
        if exp_digits > 0 {
            end += 1 + (after_e.len() - exp_body.len()) + exp_digits;
        }
    }

    let value: f64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Coerce a whole raw value to a number, the way a loose `>=` comparison does.
///
/// Unlike the `leading_*` parsers the entire string must be numeric; blank
/// strings coerce to zero and booleans to one or zero. Absent values, NaN,
/// arrays, objects, and non-numeric strings yield `None`, which never compares
/// true.
pub fn loose_number(value: Option<&Measurement>) -> Option<f64> {
    match value? {
        Measurement::Number(n) if n.is_nan() => None,
        Measurement::Number(n) => Some(*n),
        Measurement::Text(s) => coerce_str(s.trim()),
        Measurement::Other(serde_json::Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Measurement::Other(_) => None,
    }
}

/// True when `value` would count as "no value" in a truthiness check:
/// absent, numeric zero or NaN, the empty string, or `false`.
pub fn is_blank(value: Option<&Measurement>) -> bool {
    match value {
        None => true,
        Some(Measurement::Number(n)) => *n == 0.0 || n.is_nan(),
        Some(Measurement::Text(s)) => s.is_empty(),
        Some(Measurement::Other(v)) => matches!(v, serde_json::Value::Bool(false) | serde_json::Value::Null),
    }
}

fn coerce_str(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(body) = s.strip_prefix(prefix) {
            return u64::from_str_radix(body, radix).ok().map(|n| n as f64);
        }
    }

    // `str::parse` also accepts "inf" and "NaN", which a loose comparison does not.
    if !s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        return None;
    }
    s.parse().ok()
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn leading_int_stops_at_first_non_digit() {
        assert_eq!(leading_int("120"), Some(120));
        assert_eq!(leading_int("  80 "), Some(80));
        assert_eq!(leading_int("120abc"), Some(120));
        assert_eq!(leading_int("98.6"), Some(98));
        assert_eq!(leading_int("-5"), Some(-5));
        assert_eq!(leading_int("+7"), Some(7));
    }

    #[test]
    fn leading_int_rejects_missing_digits() {
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int(" x12"), None);
    }

    #[test]
    fn leading_int_saturates() {
        assert_eq!(leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn leading_float_parses_prefixes() {
        assert_eq!(leading_float("98.6"), Some(98.6));
        assert_eq!(leading_float(" 101.2F"), Some(101.2));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("5."), Some(5.0));
        assert_eq!(leading_float("1e2"), Some(100.0));
        assert_eq!(leading_float("1e"), Some(1.0));
        assert_eq!(leading_float("2E-1x"), Some(0.2));
        assert_eq!(leading_float("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn leading_float_rejects_non_numeric() {
        assert_eq!(leading_float(""), None);
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float("TEMP_ERROR"), None);
        assert_eq!(leading_float("inf"), None);
    }

    #[test]
    fn loose_number_requires_whole_string() {
        let text = |s: &str| Measurement::Text(s.to_string());

        assert_eq!(loose_number(Some(&text(" 100 "))), Some(100.0));
        assert_eq!(loose_number(Some(&text(""))), Some(0.0));
        assert_eq!(loose_number(Some(&text("0x10"))), Some(16.0));
        assert_eq!(loose_number(Some(&text("100F"))), None);
        assert_eq!(loose_number(Some(&text("NaN"))), None);
        assert_eq!(loose_number(Some(&text("1-2"))), None);
        assert_eq!(loose_number(Some(&Measurement::Number(99.6))), Some(99.6));
        assert_eq!(loose_number(Some(&Measurement::Other(json!(true)))), Some(1.0));
        assert_eq!(loose_number(Some(&Measurement::Other(json!({"f": 1})))), None);
        assert_eq!(loose_number(None), None);
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Measurement::Number(0.0))));
        assert!(is_blank(Some(&Measurement::Number(f64::NAN))));
        assert!(is_blank(Some(&Measurement::Text(String::new()))));
        assert!(is_blank(Some(&Measurement::Other(json!(false)))));

        // A string "0" or a single space is not blank.
        assert!(!is_blank(Some(&Measurement::Text("0".to_string()))));
        assert!(!is_blank(Some(&Measurement::Text(" ".to_string()))));
        assert!(!is_blank(Some(&Measurement::Other(json!(true)))));
    }
}
