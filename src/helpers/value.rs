use serde_json::Value;

/// Coerces a raw string (e.g. an environment variable or query parameter)
/// to the closest typed JSON value.
///
/// `TRUE`/`FALSE`/`ON`/`OFF` (case-insensitive) become booleans, short
/// digit runs become integers, `1.5`, `.5`, `1.5f` and `1.f` forms become
/// floats, anything else stays a trimmed string.
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();

    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("on") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("off") {
        return Value::Bool(false);
    }

    // digit runs of 16+ characters stay strings to avoid silent overflow
    if !raw.is_empty() && raw.len() < 16 && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
    }

    if is_float_literal(raw) {
        if let Ok(n) = raw.trim_end_matches('f').parse::<f64>() {
            if let Some(n) = serde_json::Number::from_f64(n) {
                return Value::Number(n);
            }
        }
    }

    Value::String(raw.to_string())
}

fn is_float_literal(raw: &str) -> bool {
    let Some((int_part, frac_part)) = raw.split_once('.') else {
        return false;
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits = frac_part.strip_suffix('f').unwrap_or(frac_part);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())) || frac_part == "f"
}
