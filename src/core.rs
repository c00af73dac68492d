use std::borrow::Cow;

use abnf_core::is_digit;
use nom::{
    branch::alt,
    bytes::complete::{escaped, is_not, take_till1, take_while, take_while_m_n},
    character::complete::{anychar, char},
    combinator::{all_consuming, map, opt, recognize},
    multi::many0_count,
    sequence::{delimited, pair, tuple},
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::decode::LinkResult;

/// Everything but `attr-char` (RFC 5987) is encoded.
///
/// `+` is an `attr-char`, but is encoded nevertheless, as it decodes to a space with
/// `quirk_plus_as_space`.
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'{')
    .add(b'}');

// ----- whitespace -----

/// `OWS = *( SP / HTAB )`
pub(crate) fn ows(input: &str) -> LinkResult<&str, &str> {
    take_while(is_ows_char)(input)
}

pub(crate) fn is_ows_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

// ----- quoted-string -----

/// ```abnf
/// quoted-string = DQUOTE *( qdtext / quoted-pair ) DQUOTE
/// quoted-pair   = "\" ( HTAB / SP / VCHAR / obs-text )
/// ```
///
/// Returns the (still escaped) content between the quotes.
pub(crate) fn quoted_string(input: &str) -> LinkResult<&str, &str> {
    delimited(
        char('"'),
        map(opt(escaped(is_not("\"\\"), '\\', anychar)), |inner| {
            inner.unwrap_or_default()
        }),
        char('"'),
    )(input)
}

/// Text up to (excluding) the first of `delimiters` that is not part of a quoted value.
///
/// A `quoted-string` is only recognized where a value starts, i.e., right after `=` and `OWS`.
/// Any other `"`, as well as an unterminated one, is an ordinary character.
pub(crate) fn until_unquoted<'a>(
    delimiters: &'static str,
) -> impl FnMut(&'a str) -> LinkResult<&'a str, &'a str> {
    move |input: &'a str| {
        recognize(many0_count(alt((
            recognize(tuple((char('='), ows, quoted_string))),
            take_till1(move |c: char| c == '=' || delimiters.contains(c)),
            recognize(char('=')),
        ))))(input)
    }
}

/// Dequotes `value` if it is exactly one `quoted-string`. Otherwise, `value` is returned as is.
///
/// This function only allocates a new String, when needed, i.e. when
/// quoted chars need to be replaced.
pub(crate) fn dequote(value: &str) -> Cow<'_, str> {
    match all_consuming(quoted_string)(value) {
        Ok((_, quoted)) => unescape_quoted(quoted),
        Err(_) => {
            if value.starts_with('"') {
                log::debug!("Kept malformed quoted value {value:?} as is");
            }

            Cow::Borrowed(value)
        }
    }
}

/// Prefixes `"` and `\` with a backslash, so that the result can be put between quotes.
pub(crate) fn escape_quoted(unescaped: &str) -> Cow<'_, str> {
    if !unescaped.contains(is_quoted_special) {
        return Cow::Borrowed(unescaped);
    }

    let mut escaped = String::with_capacity(unescaped.len() + 2);

    for c in unescaped.chars() {
        if is_quoted_special(c) {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    Cow::Owned(escaped)
}

fn is_quoted_special(c: char) -> bool {
    c == '"' || c == '\\'
}

/// Replaces every `quoted-pair` with the quoted character.
pub(crate) fn unescape_quoted(escaped: &str) -> Cow<'_, str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }

    let mut unescaped = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => unescaped.extend(chars.next()),
            c => unescaped.push(c),
        }
    }

    Cow::Owned(unescaped)
}

// ----- percent-encoding -----

/// `pct-encoded = "%" HEXDIG HEXDIG`
pub(crate) fn pct_encoded(input: &str) -> LinkResult<&str, &str> {
    recognize(pair(char('%'), take_while_m_n(2, 2, is_hexdig_char)))(input)
}

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
///
/// Note: Lowercase letters are accepted, too.
pub(crate) fn is_hexdig_char(c: char) -> bool {
    c.is_ascii() && (is_digit(c as u8) || matches!(c, 'A'..='F' | 'a'..='f'))
}

/// Checks that every `%` in `input` introduces a `pct-encoded` triplet.
fn is_pct_encoded_text(input: &str) -> bool {
    let result: LinkResult<&str, usize> =
        all_consuming(many0_count(alt((pct_encoded, is_not("%")))))(input);

    result.is_ok()
}

/// Percent-decodes `input`.
///
/// Returns `None` if `input` contains a malformed escape or doesn't decode to UTF-8.
pub(crate) fn pct_decode(input: &str) -> Option<String> {
    if !is_pct_encoded_text(input) {
        return None;
    }

    #[cfg(feature = "quirk_plus_as_space")]
    let input = input.replace('+', " ");

    percent_decode_str(&input)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

pub(crate) fn pct_encode(input: &str) -> String {
    utf8_percent_encode(input, ATTR_CHAR_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_string() {
        let (rem, val) = quoted_string(r#""Hello"???"#).unwrap();
        assert_eq!(rem, "???");
        assert_eq!(val, "Hello");

        let (rem, val) = quoted_string(r#""""#).unwrap();
        assert_eq!(rem, "");
        assert_eq!(val, "");

        let (rem, val) = quoted_string(r#""Hello \"World\"", x"#).unwrap();
        assert_eq!(rem, ", x");
        assert_eq!(val, r#"Hello \"World\""#);

        assert!(quoted_string(r#""Hello"#).is_err());
        assert!(quoted_string(r#""Hello\"#).is_err());
        assert!(quoted_string(r#"Hello""#).is_err());
    }

    #[test]
    fn test_until_unquoted() {
        let tests = [
            ("rel=next, <b>", "rel=next", ", <b>"),
            (r#"title="a, b", <b>"#, r#"title="a, b""#, ", <b>"),
            (r#"title="a \", b", <b>"#, r#"title="a \", b""#, ", <b>"),
            (r#"title="open, <b>"#, r#"title="open"#, ", <b>"),
            (r#"title = "a, b", <b>"#, r#"title = "a, b""#, ", <b>"),
            (r#"title=5", <b>; rel="next""#, r#"title=5""#, r#", <b>; rel="next""#),
            (r#"title=it"s, <b>"#, r#"title=it"s"#, ", <b>"),
            (r#""a, b", <c>"#, r#""a"#, r#", b", <c>"#),
            (r#"title=="a, b", <c>"#, r#"title=="a, b""#, ", <c>"),
            ("", "", ""),
            (",", "", ","),
        ];

        for (test, expected, expected_remainder) in tests {
            let (rem, got) = until_unquoted(",")(test).unwrap();
            assert_eq!(expected, got);
            assert_eq!(expected_remainder, rem);
        }

        let (rem, got) = until_unquoted(";,")(r#"a="x;y"; b"#).unwrap();
        assert_eq!(got, r#"a="x;y""#);
        assert_eq!(rem, "; b");
    }

    #[test]
    fn test_dequote() {
        let tests = [
            (r#""next""#, "next"),
            ("next", "next"),
            (r#""""#, ""),
            (r#""a\"b\\c""#, r#"a"b\c"#),
            (r#""\x""#, "x"),
            (r#""open"#, r#""open"#),
            (r#""a" b"#, r#""a" b"#),
            (r#""a""b""#, r#""a""b""#),
        ];

        for (test, expected) in tests {
            assert_eq!(dequote(test), expected);
        }
    }

    #[test]
    fn test_escape_quoted() {
        let tests = [
            ("", ""),
            ("next", "next"),
            (r#"the "end""#, r#"the \"end\""#),
            (r"C:\docs\", r"C:\\docs\\"),
            (r#"a\"b"#, r#"a\\\"b"#),
        ];

        for (test, expected) in tests {
            assert_eq!(escape_quoted(test), expected);
        }

        assert!(matches!(escape_quoted("next"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_quoted_reverts_escape_quoted() {
        let titles = [
            "Chapter 2",
            r#"say "hi" \o/"#,
            r#"trailing \"#,
            "résumé ✓; with, delimiters",
        ];

        for title in titles {
            assert_eq!(unescape_quoted(&escape_quoted(title)), title);
        }
    }

    #[test]
    fn test_pct_encoded() {
        assert!(pct_encoded("%20").is_ok());
        assert!(pct_encoded("%e2").is_ok());
        assert!(pct_encoded("%2").is_err());
        assert!(pct_encoded("%zz").is_err());
        assert!(pct_encoded("20").is_err());

        let (rem, val) = pct_encoded("%E2%9C").unwrap();
        assert_eq!(rem, "%9C");
        assert_eq!(val, "%E2");
    }

    #[test]
    fn test_pct_decode() {
        let tests = [
            ("%E2%9C%93", Some("✓")),
            ("%20spaced", Some(" spaced")),
            ("plain", Some("plain")),
            ("", Some("")),
            ("100%", None),
            ("%G0", None),
            ("%E2%9C", None),
            ("%FF", None),
        ];

        for (test, expected) in tests {
            assert_eq!(pct_decode(test).as_deref(), expected);
        }
    }

    #[cfg(feature = "quirk_plus_as_space")]
    #[test]
    fn test_pct_decode_plus_as_space() {
        assert_eq!(pct_decode("a+b%2Bc").as_deref(), Some("a b+c"));
    }

    #[cfg(not(feature = "quirk_plus_as_space"))]
    #[test]
    fn test_pct_decode_plus_literal() {
        assert_eq!(pct_decode("a+b%2Bc").as_deref(), Some("a+b+c"));
    }

    #[test]
    fn test_pct_encode() {
        assert_eq!(pct_encode("✓"), "%E2%9C%93");
        assert_eq!(pct_encode("a b+c"), "a%20b%2Bc");
        assert_eq!(pct_encode("it's;ok"), "it%27s%3Bok");
        assert_eq!(pct_encode("~x-y_z.!"), "~x-y_z.!");
        assert_eq!(pct_decode(&pct_encode("a b+c ✓")).as_deref(), Some("a b+c ✓"));
    }
}
