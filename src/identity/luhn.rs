//! Luhn-style checksum digits for numeric device identifiers.

/// Compute the checksum digit for a string of ASCII digits.
///
/// Digits at even (zero-based) positions count as-is; digits at odd
/// positions are doubled, with 9 subtracted when the result reaches 10.
/// Returns `None` if `digits` contains a non-digit.
pub fn check_digit(digits: &str) -> Option<u8> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(check_digit_of(digits.bytes().map(|b| b - b'0')))
}

/// Checksum digit over digit values already known to be in `0..10`.
pub(crate) fn check_digit_of(values: impl IntoIterator<Item = u8>) -> u8 {
    let sum: u32 = values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let v = u32::from(v);
            if i % 2 == 0 {
                v
            } else if v * 2 < 10 {
                v * 2
            } else {
                v * 2 - 9
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Append the checksum digit to `digits`.
pub fn append_check_digit(digits: &str) -> Option<String> {
    let check = check_digit(digits)?;
    let mut out = String::with_capacity(digits.len() + 1);
    out.push_str(digits);
    out.push(char::from(b'0' + check));
    Some(out)
}

/// Check that the last digit of `value` is the checksum of the rest.
pub fn is_valid(value: &str) -> bool {
    match value.as_bytes().split_last() {
        Some((&last, body)) if last.is_ascii_digit() && !body.is_empty() => {
            check_digit(&value[..body.len()]) == Some(last - b'0')
        }
        _ => false,
    }
}
