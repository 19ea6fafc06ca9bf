//! Recognizers for plain scalar content.
//!
//! These only decide *whether* a literal belongs to a core-schema type; no
//! value is converted. Integers of any magnitude are recognized.

/// YAML 1.2 core-schema null: `~`, `null`, `Null`, `NULL` or empty.
pub(crate) fn is_yaml12_null(s: &str) -> bool {
    matches!(s, "" | "~" | "null" | "Null" | "NULL")
}

/// YAML 1.2 core-schema boolean literals.
pub(crate) fn is_yaml12_bool(s: &str) -> bool {
    matches!(s, "true" | "True" | "TRUE" | "false" | "False" | "FALSE")
}

/// Parse a YAML 1.1 boolean from a &str (handles the "Norway problem").
///
/// Accepted TRUE literals (case-insensitive): "y", "yes", "true", "on"
/// Accepted FALSE literals (case-insensitive): "n", "no", "false", "off"
///
/// Returns:
/// - Ok(true/false) on success
/// - Err(...) if the input is not a YAML 1.1 boolean literal
pub(crate) fn parse_yaml11_bool(s: &str) -> Result<bool, String> {
    let t = s.trim();
    if t.eq_ignore_ascii_case("true")
        || t.eq_ignore_ascii_case("yes")
        || t.eq_ignore_ascii_case("y")
        || t.eq_ignore_ascii_case("on")
    {
        Ok(true)
    } else if t.eq_ignore_ascii_case("false")
        || t.eq_ignore_ascii_case("no")
        || t.eq_ignore_ascii_case("n")
        || t.eq_ignore_ascii_case("off")
    {
        Ok(false)
    } else {
        Err(format!("invalid YAML 1.1 bool: `{}`", s))
    }
}

/// True if `digits` is a non-empty run of digits valid in `radix`, with optional `_` separators.
fn is_digits(digits: &str, radix: u32) -> bool {
    let mut saw = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        if !c.is_digit(radix) {
            return false;
        }
        saw = true;
    }
    saw
}

/// Integer literal: optional sign, then decimal, `0x` hex, `0o` octal or `0b` binary digits.
/// With `legacy_octal`, a leading `0` followed by octal digits (`0755`) also counts.
pub(crate) fn is_int(s: &str, legacy_octal: bool) -> bool {
    let rest = s.strip_prefix('+').or_else(|| s.strip_prefix('-')).unwrap_or(s);

    if let Some(r) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        is_digits(r, 16)
    } else if let Some(r) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        is_digits(r, 8)
    } else if let Some(r) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        is_digits(r, 2)
    } else if legacy_octal && rest.len() > 1 && rest.starts_with('0') {
        is_digits(&rest[1..], 8)
    } else {
        is_digits(rest, 10)
    }
}

/// YAML 1.2 float: `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`,
/// or one of the `.inf` / `.nan` spellings.
pub(crate) fn is_yaml12_float(s: &str) -> bool {
    match s {
        ".nan" | ".NaN" | ".NAN" => return true,
        _ => {}
    }
    let unsigned = s.strip_prefix('+').or_else(|| s.strip_prefix('-')).unwrap_or(s);
    if matches!(unsigned, ".inf" | ".Inf" | ".INF") {
        return true;
    }

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            let int_ok = int.is_empty() || is_digits(int, 10);
            let frac_ok = frac.is_empty() || is_digits(frac, 10);
            // `.` alone is not a number
            int_ok && frac_ok && !(int.is_empty() && frac.is_empty())
        }
        None => is_digits(mantissa, 10),
    };
    let exponent_ok = match exponent {
        Some(e) => {
            let digits = e.strip_prefix('+').or_else(|| e.strip_prefix('-')).unwrap_or(e);
            is_digits(digits, 10)
        }
        None => true,
    };
    mantissa_ok && exponent_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml11_bools() {
        assert_eq!(parse_yaml11_bool("Yes"), Ok(true));
        assert_eq!(parse_yaml11_bool("off"), Ok(false));
        assert!(parse_yaml11_bool("maybe").is_err());
    }

    #[test]
    fn integers() {
        for s in ["0", "-17", "+3", "1_000", "0x1F", "0o17", "0b101", "123456789012345678901234567890"] {
            assert!(is_int(s, false), "{s} should be an int");
        }
        for s in ["", "-", "0x", "0o9", "12a", "1.0", "_"] {
            assert!(!is_int(s, false), "{s} should not be an int");
        }
    }

    #[test]
    fn legacy_octal_needs_the_option() {
        assert!(is_int("0755", true));
        assert!(is_int("0755", false)); // still a decimal literal
        assert!(!is_int("0789", true));
    }

    #[test]
    fn floats() {
        for s in ["1.5", "-0.5", ".5", "5.", "1e10", "2.5E-3", ".inf", "-.Inf", ".NaN", "3"] {
            assert!(is_yaml12_float(s), "{s} should be a float");
        }
        for s in ["", ".", "e5", "1e", "inf", "nan", "1.2.3", "-.nan"] {
            assert!(!is_yaml12_float(s), "{s} should not be a float");
        }
    }

    #[test]
    fn nulls() {
        assert!(is_yaml12_null(""));
        assert!(is_yaml12_null("~"));
        assert!(!is_yaml12_null("nil"));
    }
}
