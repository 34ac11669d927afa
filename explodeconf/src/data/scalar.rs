use super::node::Scalar;

/// Interpret user-entered text as a scalar.
///
/// Tried in order: boolean (`true`/`false`, any case), integer, float,
/// null (`null`, `~` or blank), then the raw text as a string. Never fails.
/// Surrounding whitespace is ignored for the structured parses but kept in a
/// string result.
pub fn coerce_scalar(text: &str) -> Scalar {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return Scalar::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Scalar::Boolean(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Scalar::Integer(i);
    }

    if let Some(f) = parse_float(trimmed) {
        return Scalar::Float(f);
    }

    if trimmed.is_empty() || trimmed == "~" || trimmed.eq_ignore_ascii_case("null") {
        return Scalar::Null;
    }

    Scalar::String(text.to_string())
}

fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | "+.inf" | ".Inf" | ".INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    // Rust accepts `inf` and `nan` spelled out; the document format reads those as strings.
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(coerce_scalar("TRUE"), Scalar::Boolean(true));
        assert_eq!(coerce_scalar("false"), Scalar::Boolean(false));
        assert_eq!(coerce_scalar("42"), Scalar::Integer(42));
        assert_eq!(coerce_scalar(" -7 "), Scalar::Integer(-7));
        assert_eq!(coerce_scalar("50.0"), Scalar::Float(50.0));
        assert_eq!(coerce_scalar("1e3"), Scalar::Float(1000.0));
        assert_eq!(coerce_scalar("null"), Scalar::Null);
        assert_eq!(coerce_scalar("~"), Scalar::Null);
        assert_eq!(coerce_scalar(""), Scalar::Null);
        assert_eq!(
            coerce_scalar("REDSTONE"),
            Scalar::String("REDSTONE".to_string())
        );
    }

    #[test]
    fn test_spelled_out_infinity_is_text() {
        assert_eq!(coerce_scalar("inf"), Scalar::String("inf".to_string()));
        assert_eq!(coerce_scalar("NaN"), Scalar::String("NaN".to_string()));
        assert_eq!(coerce_scalar(".inf"), Scalar::Float(f64::INFINITY));
    }

    #[test]
    fn test_display_reads_back() {
        for scalar in [
            Scalar::Integer(2000),
            Scalar::Float(0.5),
            Scalar::Float(50.0),
            Scalar::Boolean(true),
            Scalar::Null,
            Scalar::String("ENTITY_OCELOT_HURT".to_string()),
        ] {
            assert_eq!(coerce_scalar(&scalar.to_string()), scalar);
        }
    }
}
