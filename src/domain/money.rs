use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a signed decimal string into cents.
/// Example: "50.00" -> 5000, "-4.5" -> -450, "100" -> 10000
///
/// Digits past the second decimal place must be zeros, so no entered value is
/// ever rounded away. Exponents, `NaN`, `inf` and anything that is not a plain
/// decimal number are rejected.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (units_str, decimal_str) = match unsigned.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (unsigned, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !decimal_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::OutOfRange)?
    };

    let (decimal_str, sub_cents) = decimal_str.split_at(decimal_str.len().min(2));
    if sub_cents.bytes().any(|b| b != b'0') {
        return Err(ParseCentsError::TooPrecise);
    }

    // Pad the fractional part to 2 digits
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => i64::from(decimal_str.as_bytes()[0] - b'0') * 10,
        _ => decimal_str
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::OutOfRange)?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooPrecise,
    OutOfRange,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooPrecise => write!(f, "amounts have at most 2 decimal places"),
            ParseCentsError::OutOfRange => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-450), "-4.50");
        assert_eq!(format_cents(-1), "-0.01");
        assert_eq!(format_cents(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("7."), Ok(700));
        assert_eq!(parse_cents("-4.50"), Ok(-450));
        assert_eq!(parse_cents("+3"), Ok(300));
        assert_eq!(parse_cents("  -12000 "), Ok(-1200000));
        assert_eq!(parse_cents("4.500"), Ok(450));
        assert_eq!(parse_cents("-0.0100"), Ok(-1));
    }

    #[test]
    fn test_parse_cents_rejects_sub_cent_digits() {
        for input in ["100.999", "0.009", "-0.004", "1.0001", ".001"] {
            assert_eq!(
                parse_cents(input),
                Err(ParseCentsError::TooPrecise),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_cents_invalid() {
        for input in [
            "", "-", ".", "abc", "12.34.56", "--5", "1.-5", "1e5", "NaN", "inf", "4,50", "1 000",
        ] {
            assert_eq!(
                parse_cents(input),
                Err(ParseCentsError::InvalidFormat),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_cents_overflow() {
        assert_eq!(
            parse_cents("92233720368547758.08"),
            Err(ParseCentsError::OutOfRange)
        );
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::OutOfRange)
        );
    }
}
