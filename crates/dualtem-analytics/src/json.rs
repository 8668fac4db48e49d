//! Lenient readers for loosely typed JSON payloads.

use serde_json::Value;

use dualtem_core::Date;

/// A JSON number as `f64`. Strings and booleans are rejected.
pub(crate) fn strict_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// A JSON number, or a string holding one.
pub(crate) fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        other => strict_number(other),
    }
}

/// An integral JSON number, or a string holding one.
pub(crate) fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Text form of a scalar: strings as-is, other values as rendered JSON.
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A date in any tolerated format.
pub(crate) fn date(value: &Value) -> Option<Date> {
    Date::parse_any(&text(value))
}

/// The `results` array of a statistics payload.
pub(crate) fn results(document: &Value) -> Option<&Vec<Value>> {
    document.get("results").and_then(Value::as_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers() {
        assert_eq!(strict_number(&json!(98.5)), Some(98.5));
        assert_eq!(strict_number(&json!("98.5")), None);
        assert_eq!(strict_number(&json!(true)), None);
        assert_eq!(lenient_number(&json!(" 31.25 ")), Some(31.25));
        assert_eq!(lenient_number(&json!("n/a")), None);
        assert_eq!(lenient_number(&json!(null)), None);
    }

    #[test]
    fn test_integers() {
        assert_eq!(lenient_integer(&json!(44)), Some(44));
        assert_eq!(lenient_integer(&json!(44.0)), Some(44));
        assert_eq!(lenient_integer(&json!("44")), Some(44));
        assert_eq!(lenient_integer(&json!(44.5)), None);
        assert_eq!(lenient_integer(&json!("x")), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(date(&json!("16/03/2026")), Date::from_ymd(2026, 3, 16).ok());
        assert_eq!(date(&json!(20260316)), None);
    }
}
