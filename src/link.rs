use std::collections::BTreeMap;

use nom::{
    bytes::complete::take_until,
    character::complete::char,
    multi::separated_list0,
};

use crate::{
    core::{dequote, is_ows_char, ows, pct_decode, until_unquoted},
    decode::{LinkErrorKind, LinkParseError, LinkResult},
    types::{Link, Links, Param, ParamDefaults},
};

/// ```abnf
/// Link = #link-value
/// ```
///
/// Empty list elements are skipped.
pub(crate) fn links<'a>(input: &'a str, defaults: &ParamDefaults) -> LinkResult<&'a str, Links> {
    let mut links = Vec::new();
    let mut remaining = input;

    loop {
        let (rem, _) = ows(remaining)?;

        if let Some(rem) = rem.strip_prefix(',') {
            log::debug!("Skipped empty list element");
            remaining = rem;
            continue;
        }

        if rem.is_empty() {
            remaining = rem;
            break;
        }

        let (rem, link) = link_value(rem, defaults)?;
        links.push(link);

        let (rem, _) = ows(rem)?;

        if let Some(rem) = rem.strip_prefix(',') {
            remaining = rem;
            continue;
        }

        match rem.chars().next() {
            Some(character) => {
                return Err(LinkParseError::failure(
                    rem,
                    LinkErrorKind::UnexpectedCharacter(character),
                ))
            }
            None => {
                remaining = rem;
                break;
            }
        }
    }

    Ok((remaining, Links::new(links)))
}

/// ```abnf
/// link-value = "<" URI-Reference ">" *( OWS ";" OWS link-param )
/// ```
pub(crate) fn link_value<'a>(
    input: &'a str,
    defaults: &ParamDefaults,
) -> LinkResult<&'a str, Link> {
    let (remaining, uri) = reference(input)?;
    let (remaining, _) = ows(remaining)?;

    match remaining.strip_prefix(';') {
        Some(remaining) => {
            let (remaining, params) = link_params(remaining, defaults)?;

            Ok((remaining, Link::new(uri, params)))
        }
        None => Ok((remaining, Link::new(uri, BTreeMap::new()))),
    }
}

/// `"<" URI-Reference ">"`
///
/// The reference is returned verbatim. It is neither unescaped nor validated.
pub(crate) fn reference(input: &str) -> LinkResult<&str, &str> {
    let (remaining, _) = char::<_, LinkParseError<&str>>('<')(input)
        .map_err(|_| LinkParseError::failure(input, LinkErrorKind::MissingOpeningBracket))?;

    let (remaining, uri) = take_until::<_, _, LinkParseError<&str>>(">")(remaining)
        .map_err(|_| LinkParseError::failure(input, LinkErrorKind::MissingClosingBracket))?;

    let (remaining, _) = char::<_, LinkParseError<&str>>('>')(remaining)
        .map_err(|_| LinkParseError::failure(input, LinkErrorKind::MissingClosingBracket))?;

    Ok((remaining, uri))
}

/// Parameters of a single link, i.e., everything up to the next `,` outside of a quoted value.
///
/// When a name occurs more than once, the last occurrence wins.
pub(crate) fn link_params<'a>(
    input: &'a str,
    defaults: &ParamDefaults,
) -> LinkResult<&'a str, BTreeMap<String, Param>> {
    let (remaining, block) = until_unquoted(",")(input)?;
    let (_, parts) = separated_list0(char(';'), until_unquoted(";"))(block)?;

    let mut params = BTreeMap::new();

    for part in parts {
        let part = part.trim_matches(is_ows_char);

        if part.is_empty() {
            log::debug!("Skipped empty parameter");
            continue;
        }

        let (name, param) = link_param(part, defaults);
        params.insert(name, param);
    }

    Ok((remaining, params))
}

/// ```abnf
/// link-param = token BWS [ "=" BWS ( token / quoted-string ) ]
/// ```
///
/// An extended parameter (`name*=...`) is returned under its name without `*`.
///
/// # Quirks
///
/// A parameter without `=` is kept under its full text with an empty value.
pub(crate) fn link_param(input: &str, defaults: &ParamDefaults) -> (String, Param) {
    let Some((name, value)) = input.split_once('=') else {
        log::warn!("Rectified parameter {input:?} without value to empty value");

        return (input.to_owned(), Param::empty(defaults));
    };

    let name = name.trim_end_matches(is_ows_char);
    let value = value.trim_start_matches(is_ows_char);

    match name.strip_suffix('*') {
        Some(name) => (name.to_owned(), ext_value(value, defaults)),
        None => (
            name.to_owned(),
            Param::with_defaults(dequote(value).into_owned(), defaults),
        ),
    }
}

/// ```abnf
/// ext-value = charset "'" [ language ] "'" value-chars
/// ```
///
/// Without exactly two `'`, the whole value is taken as `value-chars` with default metadata.
/// When percent-decoding fails, the still encoded `value-chars` are kept.
pub(crate) fn ext_value(input: &str, defaults: &ParamDefaults) -> Param {
    let mut parts = input.split('\'');

    let (encoding, language, encoded) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(encoding), Some(language), Some(encoded), None) => (encoding, language, encoded),
            _ => (defaults.encoding.as_str(), defaults.language.as_str(), input),
        };

    let value = match pct_decode(encoded) {
        Some(decoded) => decoded,
        None => {
            log::debug!("Kept undecodable extended value {encoded:?} as is");
            encoded.to_owned()
        }
    };

    Param::new(value, encoding, language)
}
