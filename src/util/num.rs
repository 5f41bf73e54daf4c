/// Number of decimals used when a real is converted to a string.
pub const REAL_DECIMALS: usize = 6;

/// Converts a byte offset or length into the `u32` used by token and
/// diagnostic spans.
///
/// # Returns
/// `None` if the value does not fit in 32 bits.
///
/// # Example
/// ```
/// use satsu::util::num::usize_to_u32;
///
/// assert_eq!(usize_to_u32(42), Some(42));
/// assert_eq!(usize_to_u32(usize::MAX), None);
/// ```
#[must_use]
pub fn usize_to_u32(value: usize) -> Option<u32> {
    u32::try_from(value).ok()
}

/// Parses an integer the way `strtoll(text, NULL, 0)` does.
///
/// Leading whitespace is skipped, an optional sign is accepted, and the base
/// is detected from the prefix: `0x`/`0X` selects hexadecimal, a leading `0`
/// selects octal, anything else is decimal. The longest run of valid digits is
/// consumed and the rest of the text is ignored. Text without any digits
/// yields `0`, and values outside the `i64` range saturate.
///
/// # Parameters
/// - `text`: The string to parse.
///
/// # Returns
/// The parsed integer.
///
/// # Example
/// ```
/// use satsu::util::num::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("  42abc"), 42);
/// assert_eq!(parse_int_prefix("-0x1f"), -31);
/// assert_eq!(parse_int_prefix("017"), 15);
/// assert_eq!(parse_int_prefix("hello"), 0);
/// assert_eq!(parse_int_prefix("99999999999999999999"), i64::MAX);
/// ```
#[must_use]
pub fn parse_int_prefix(text: &str) -> i64 {
    let bytes = text.trim_start().as_bytes();
    let mut index = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            index += 1;
            true
        },
        Some(b'+') => {
            index += 1;
            false
        },
        _ => false,
    };

    let radix = if bytes.get(index) == Some(&b'0')
                   && matches!(bytes.get(index + 1), Some(b'x' | b'X'))
                   && bytes.get(index + 2).is_some_and(u8::is_ascii_hexdigit)
    {
        index += 2;
        16
    } else if bytes.get(index) == Some(&b'0') {
        8
    } else {
        10
    };

    let mut magnitude: i128 = 0;
    for &byte in &bytes[index..] {
        let Some(digit) = char::from(byte).to_digit(radix) else {
            break;
        };
        magnitude = magnitude.saturating_mul(i128::from(radix))
                             .saturating_add(i128::from(digit));
    }

    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

/// Parses a real the way `strtod(text, NULL)` does for decimal input.
///
/// Leading whitespace is skipped and the longest prefix of the form
/// `[+-]digits[.digits][(e|E)[+-]digits]` is converted; `inf`, `infinity` and
/// `nan` are recognised case-insensitively. Text without a numeric prefix
/// yields `0.0`.
///
/// # Example
/// ```
/// use satsu::util::num::parse_real_prefix;
///
/// assert_eq!(parse_real_prefix(" 2.5kg"), 2.5);
/// assert_eq!(parse_real_prefix("-1e3"), -1000.0);
/// assert_eq!(parse_real_prefix(".5"), 0.5);
/// assert_eq!(parse_real_prefix("x"), 0.0);
/// ```
#[must_use]
pub fn parse_real_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let lowered = trimmed[end..].to_ascii_lowercase();
    for special in ["infinity", "inf", "nan"] {
        if lowered.starts_with(special) {
            return trimmed[..end + special.len()].parse().unwrap_or(0.0);
        }
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    trimmed[..end].parse().unwrap_or(0.0)
}

/// Formats a real with six decimals, as `printf("%f")` does.
///
/// # Example
/// ```
/// use satsu::util::num::format_real;
///
/// assert_eq!(format_real(2.5), "2.500000");
/// assert_eq!(format_real(-0.125), "-0.125000");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    format!("{:.*}", REAL_DECIMALS, value)
}

/// Converts a real to an integer, truncating toward zero.
///
/// Values outside the `i64` range saturate and `NaN` becomes `0`.
///
/// # Example
/// ```
/// use satsu::util::num::real_to_int;
///
/// assert_eq!(real_to_int(3.9), 3);
/// assert_eq!(real_to_int(-3.9), -3);
/// assert_eq!(real_to_int(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn real_to_int(value: f64) -> i64 {
    value as i64
}

/// Converts an integer to a real, rounding to the nearest representable
/// value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn int_to_real(value: i64) -> f64 {
    value as f64
}
