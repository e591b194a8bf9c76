//! Parsing and formatting of money amounts

/// Parse a numeric-looking string
///
/// Accepts surrounding whitespace, an optional sign, an optional leading
/// `$`, either plain digits or correctly grouped thousands (`7,500`), and an
/// optional fractional part. Anything else, including `inf`, `NaN`,
/// exponents and percentages, is not a number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let mut rest = text.trim();

    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };
    rest = rest.strip_prefix('$').unwrap_or(rest);

    let (integer, fraction) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    if integer.is_empty() && fraction.is_none() {
        return None;
    }
    if !integer.is_empty() && !valid_integer_part(integer) {
        return None;
    }

    let mut digits = String::with_capacity(rest.len() + 2);
    if negative {
        digits.push('-');
    }
    if integer.is_empty() {
        digits.push('0');
    } else {
        digits.extend(integer.chars().filter(|c| *c != ','));
    }
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }

    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

// Plain digits, or 1-3 digits followed by ",ddd" groups
fn valid_integer_part(integer: &str) -> bool {
    if !integer.contains(',') {
        return integer.bytes().all(|b| b.is_ascii_digit());
    }

    let mut groups = integer.split(',');
    let lead_ok = groups
        .next()
        .map(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false);

    lead_ok && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Render an amount as `$1,234.56` (`-$1,234.56` when negative)
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (integer, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // no "-$0.00" for tiny negatives that round away
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a formatted amount parses back to its rounded value
        #[test]
        fn test_format_then_parse(cents in -10_000_000_000i64..10_000_000_000i64) {
            let value = cents as f64 / 100.0;
            let parsed = parse_amount(&format_currency(value)).unwrap();
            prop_assert!((parsed - value).abs() < 0.005);
        }

        /// Property: formatting is a fixed point after one parse
        #[test]
        fn test_format_is_stable(value in -1.0e9f64..1.0e9f64) {
            let once = format_currency(value);
            let twice = format_currency(parse_amount(&once).unwrap());
            prop_assert_eq!(once, twice);
        }
    }
}
