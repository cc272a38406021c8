//! Percent-encoding of values inside the canonical string.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters gets escaped.
///
/// Equivalent to form encoding with space as `%20`, `*` escaped and `~` kept.
const GSN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `value` for the canonical string.
pub fn url_encode(value: &str) -> String {
    utf8_percent_encode(value, GSN_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_tilde_star() {
        assert_eq!(url_encode("a b"), "a%20b");
        assert_eq!(url_encode("~"), "~");
        assert_eq!(url_encode("*"), "%2A");
        assert_eq!(url_encode("one piece*~"), "one%20piece%2A~");
    }

    #[test]
    fn test_plus_is_escaped_not_space() {
        assert_eq!(url_encode("a+b"), "a%2Bb");
        assert_eq!(
            url_encode("2024-01-01+12:00:00"),
            "2024-01-01%2B12%3A00%3A00"
        );
    }

    #[test]
    fn test_unreserved_passthrough() {
        assert_eq!(url_encode("AZaz09-._"), "AZaz09-._");
        assert_eq!(url_encode(""), "");
    }

    #[test]
    fn test_utf8_uppercase_hex() {
        assert_eq!(url_encode("中"), "%E4%B8%AD");
        assert_eq!(url_encode("{\"k\":[]}"), "%7B%22k%22%3A%5B%5D%7D");
    }
}
