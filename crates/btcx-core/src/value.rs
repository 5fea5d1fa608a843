//! Loose readers for evidence values.
//!
//! Evidence payloads are schemaless JSON, so every read here is total: a
//! value of the wrong shape degrades to an empty/NaN reading instead of an
//! error. Stringification and truthiness follow the conventions of the
//! dashboard that consumes these payloads, which keeps narrative text stable
//! across producers that send `25`, `25.0` or `"25"` for the same reading.

use serde_json::{Number, Value};

/// Parses a decimal transported as a string. Blank input reads as zero and
/// anything unparseable reads as NaN.
pub fn parse_decimal(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Reads any JSON value as a number.
pub fn number_of(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_decimal(text),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => number_of(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Renders a JSON value as display text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => display_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => String::from("[object Object]"),
    }
}

/// Formats a float the way numbers are shown in evidence rows: integral
/// values drop the fractional part.
pub fn display_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        // -0 renders as 0
        return format!("{:.0}", value + 0.0);
    }

    value.to_string()
}

fn display_number(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }

    number
        .as_f64()
        .map(display_float)
        .unwrap_or_else(|| number.to_string())
}

/// Loose truthiness: `null`, `false`, `0`, NaN and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| float != 0.0 && !float.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Fractional digits needed to print any f64 exactly.
const EXACT_DIGITS: usize = 1100;

/// Formats `value` to exactly `digits` decimals. Exact halves round away
/// from zero and negative zero prints unsigned.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return display_float(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let precision = EXACT_DIGITS;
    let exact = format!("{magnitude:.precision$}");
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, dropped) = frac_part.split_at(digits.min(frac_part.len()));

    let is_tie = dropped
        .strip_prefix('5')
        .is_some_and(|rest| rest.bytes().all(|digit| digit == b'0'));
    if !is_tie {
        return format!("{sign}{magnitude:.digits$}");
    }

    let mut rounded = format!("{int_part}{kept}").into_bytes();
    let mut carry = true;
    for digit in rounded.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        rounded.insert(0, b'1');
    }

    let rounded = String::from_utf8(rounded).unwrap_or_default();
    let (int_digits, frac_digits) = rounded.split_at(rounded.len() - digits);
    if digits == 0 {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_digits}")
    }
}
