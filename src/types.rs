//! Link-related types.

use std::{
    collections::{BTreeMap, HashMap},
    ops::Deref,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Encoding assumed for a parameter that does not declare one.
pub const DEFAULT_ENCODING: &str = "us-ascii";

/// Language assumed for a parameter that does not declare one.
pub const DEFAULT_LANGUAGE: &str = "en-us";

/// Encoding and language assigned to parameters without explicit metadata.
///
/// Only extended parameters (`title*=UTF-8'en'...`) carry their own metadata. Every other
/// parameter is tagged with these defaults.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamDefaults {
    pub encoding: String,
    pub language: String,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

/// A single link parameter.
///
/// Parameters can state their own encoding, see [RFC 2231](https://tools.ietf.org/html/rfc2231).
///
/// The value is always a Rust `String`, i.e., UTF-8. When an extended parameter declares another
/// encoding, the percent-decoded bytes must still be valid UTF-8. Otherwise, the raw
/// (percent-encoded) text is kept and conversion is left to the caller.
///
/// Multipart parameters (`title*0`, `title*1`, ...) are not reassembled. They can be
/// reconstructed by concatenating all `name*N` parameters in order of `N`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    value: String,
    encoding: String,
    language: String,
}

impl Param {
    pub fn new<V, E, L>(value: V, encoding: E, language: L) -> Self
    where
        V: Into<String>,
        E: Into<String>,
        L: Into<String>,
    {
        Self {
            value: value.into(),
            encoding: encoding.into(),
            language: language.into(),
        }
    }

    /// Parameter with an empty value and the given default metadata.
    pub fn empty(defaults: &ParamDefaults) -> Self {
        Self::with_defaults(String::new(), defaults)
    }

    pub(crate) fn with_defaults(value: String, defaults: &ParamDefaults) -> Self {
        Self {
            value,
            encoding: defaults.encoding.clone(),
            language: defaults.language.clone(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// A link parsed from a `Link` header.
///
/// The reference is kept exactly as written between `<` and `>`. It is neither unescaped nor
/// validated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    uri: String,
    params: BTreeMap<String, Param>,
}

impl Link {
    pub fn new<U>(uri: U, params: BTreeMap<String, Param>) -> Self
    where
        U: Into<String>,
    {
        Self {
            uri: uri.into(),
            params,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// All parameters of this link.
    ///
    /// Names are unique. When a name occurred more than once, the last occurrence is kept.
    pub fn params(&self) -> &BTreeMap<String, Param> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    /// Value of the `rel` parameter.
    pub fn rel(&self) -> Option<&str> {
        self.param("rel").map(Param::value)
    }

    /// Checks whether `rel` is one of the (space-separated) relation types of this link.
    ///
    /// Relation types are compared ASCII case-insensitively.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel()
            .map(|value| {
                value
                    .split_ascii_whitespace()
                    .any(|candidate| candidate.eq_ignore_ascii_case(rel))
            })
            .unwrap_or(false)
    }
}

/// Links in order of appearance in the header.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new(links: Vec<Link>) -> Self {
        Self(links)
    }

    /// Map the links by their `rel` value.
    ///
    /// Links without a `rel` parameter are omitted. When multiple links share the same `rel`
    /// value, the last one wins. Don't rely on this, as servers are free to send duplicates.
    pub fn map(&self) -> HashMap<&str, &Link> {
        self.0
            .iter()
            .filter_map(|link| link.rel().map(|rel| (rel, link)))
            .collect()
    }

    /// First link having `rel` as one of its relation types.
    pub fn by_rel(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.has_rel(rel))
    }

    pub fn into_inner(self) -> Vec<Link> {
        self.0
    }
}

impl Deref for Links {
    type Target = [Link];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<T: IntoIterator<Item = Link>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Links {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
