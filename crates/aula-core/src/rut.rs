//! Chilean RUT (Rol Único Tributario) helpers.
//!
//! A RUT is a 7 or 8 digit body followed by a check character computed with
//! a modulo-11 checksum. The check character is a digit or `K`.
//!
//! ```text
//! body 12345678 → reversed 8 7 6 5 4 3 2 1
//!      weights     2 3 4 5 6 7 2 3
//!      sum 138, 138 % 11 = 6, 11 - 6 = 5 → check '5'
//! ```

/// Strip `.`, `-`, and whitespace, and uppercase the check character.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '.' | '-') && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Compute the check character for a RUT body of ASCII digits.
///
/// Returns `None` if `body` is empty or contains anything other than digits.
#[must_use]
pub fn check_digit(body: &str) -> Option<char> {
    if body.is_empty() {
        return None;
    }
    let mut sum = 0u32;
    let mut weight = 2u32;
    for c in body.chars().rev() {
        sum += c.to_digit(10)? * weight;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }
    Some(match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        d => char::from_digit(d, 10)?,
    })
}

/// Split a normalized RUT into body and check character if it has the
/// expected shape: 7 or 8 digits followed by a digit or `K`.
fn split(normalized: &str) -> Option<(&str, char)> {
    let len = normalized.len();
    if !(8..=9).contains(&len) || !normalized.is_ascii() {
        return None;
    }
    let (body, check) = normalized.split_at(len - 1);
    let check = check.chars().next()?;
    if !body.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !(check.is_ascii_digit() || check == 'K') {
        return None;
    }
    Some((body, check))
}

/// Whether `raw` looks like a RUT once separators are stripped, without
/// checking the checksum.
#[must_use]
pub fn has_valid_shape(raw: &str) -> bool {
    split(&normalize(raw)).is_some()
}

/// Validate a RUT in any common notation (`12.345.678-5`, `12345678-5`,
/// `123456785`).
#[must_use]
pub fn is_valid(raw: &str) -> bool {
    let normalized = normalize(raw);
    split(&normalized).is_some_and(|(body, check)| check_digit(body) == Some(check))
}

/// Canonical wire form: body, hyphen, check character (`12345678-5`).
///
/// Input that does not have the RUT shape is returned normalized but
/// otherwise untouched.
#[must_use]
pub fn canonical(raw: &str) -> String {
    let normalized = normalize(raw);
    match split(&normalized) {
        Some((body, check)) => format!("{body}-{check}"),
        None => normalized,
    }
}

/// Display form with thousands separators (`12.345.678-5`).
///
/// Input that does not have the RUT shape is returned as given.
#[must_use]
pub fn format_display(raw: &str) -> String {
    let normalized = normalize(raw);
    let Some((body, check)) = split(&normalized) else {
        return raw.to_string();
    };
    let mut grouped = String::with_capacity(body.len() + 3);
    for (i, c) in body.chars().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{grouped}-{check}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("12345678", '5')]
    #[case("11111111", '1')]
    #[case("1234567", '4')]
    #[case("10000013", 'K')]
    #[case("10000004", '0')]
    fn computes_check_digit(#[case] body: &str, #[case] expected: char) {
        assert_eq!(check_digit(body), Some(expected));
    }

    #[test]
    fn check_digit_rejects_non_digits() {
        assert_eq!(check_digit(""), None);
        assert_eq!(check_digit("12a45678"), None);
    }

    #[rstest]
    #[case("12345678-5")]
    #[case("12.345.678-5")]
    #[case("123456785")]
    #[case("11111111-1")]
    #[case("1234567-4")]
    #[case("10000013-K")]
    #[case("10000013-k")]
    #[case("10.000.004-0")]
    fn accepts_valid(#[case] raw: &str) {
        assert!(is_valid(raw), "{raw} should be valid");
    }

    #[rstest]
    #[case("12345678-4")]
    #[case("11111111-2")]
    #[case("10000013-0")]
    #[case("123456-0")]
    #[case("123456789-0")]
    #[case("1234567X-5")]
    #[case("12345678-Z")]
    #[case("")]
    fn rejects_invalid(#[case] raw: &str) {
        assert!(!is_valid(raw), "{raw} should be invalid");
    }

    #[rstest]
    #[case("12345678-5", "12.345.678-5")]
    #[case("123456785", "12.345.678-5")]
    #[case("1234567-4", "1.234.567-4")]
    #[case("10000013-k", "10.000.013-K")]
    fn formats_for_display(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_display(raw), expected);
    }

    #[test]
    fn canonical_form_has_single_hyphen() {
        assert_eq!(canonical("12.345.678-5"), "12345678-5");
        assert_eq!(canonical("10000013k"), "10000013-K");
    }

    #[test]
    fn shape_check_ignores_checksum() {
        assert!(has_valid_shape("12345678-4"));
        assert!(!has_valid_shape("12-3"));
    }

    #[test]
    fn malformed_input_passes_through_display() {
        assert_eq!(format_display("n/a"), "n/a");
    }
}
