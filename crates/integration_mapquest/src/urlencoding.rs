//! Query-component percent-encoding for MapQuest request URLs

use std::fmt::Write as _;

/// Percent-encode a value for use inside a query parameter
///
/// Unreserved characters (`A-Z`, `a-z`, `0-9`, `-`, `_`, `.`, `~`) pass
/// through, spaces become `+` and every other UTF-8 byte is written as `%XX`.
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            },
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            },
        }
    }
    out
}

/// Join values with a literal comma, encoding each value on its own
pub fn encode_list<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| encode(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_address() {
        assert_eq!(encode("Amsterdam,Netherlands"), "Amsterdam%2CNetherlands");
        assert_eq!(encode("Seattle WA"), "Seattle+WA");
    }

    #[test]
    fn encode_api_key() {
        assert_eq!(
            encode("Fmjtd|luub256alu,7s=o5-9u82ur"),
            "Fmjtd%7Cluub256alu%2C7s%3Do5-9u82ur"
        );
    }

    #[test]
    fn encode_keeps_unreserved() {
        assert_eq!(encode("en_US-1.0~x"), "en_US-1.0~x");
    }

    #[test]
    fn encode_multibyte() {
        assert_eq!(encode("Zürich"), "Z%C3%BCrich");
    }

    #[test]
    fn encode_list_joins_with_raw_comma() {
        assert_eq!(encode_list(["Toll Road", "Ferry"]), "Toll+Road,Ferry");
        assert_eq!(encode_list(Vec::<String>::new()), "");
    }
}
