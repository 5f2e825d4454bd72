//! Cell-level textual-to-typed conversion
//!
//! Coercion is decided by the closed text-only allowlist, never by value
//! shape: an account number that happens to look numeric stays text.

use payrep_common::{is_text_field, Scalar};

/// Parse one raw cell for a named field.
///
/// Allowlisted fields return the trimmed string unmodified. Everything else
/// has quote and thousands-separator characters stripped and is parsed as a
/// strict optional-sign decimal; anything that fails stays text. Empty input
/// passes through unchanged.
pub fn parse_value(field_name: &str, raw: &str) -> Scalar {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Scalar::Empty;
    }
    if is_text_field(field_name) {
        return Scalar::Text(trimmed.to_string());
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ','))
        .collect();
    if is_strict_decimal(&cleaned) {
        match cleaned.parse::<f64>() {
            Ok(n) => Scalar::Number(n),
            Err(_) => Scalar::Text(cleaned),
        }
    } else {
        Scalar::Text(cleaned)
    }
}

/// `[+-]? digits [. digits]?` and nothing else. Rejects exponents, lone
/// signs and trailing dots so coercion never surprises.
fn is_strict_decimal(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    match s.split_once('.') {
        None => s.chars().all(|c| c.is_ascii_digit()),
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
    }
}
